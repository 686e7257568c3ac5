//! JobShop plan viewer binary
//!
//! Shows a plan export as a paged text timeline and reads navigation
//! commands from stdin, one per line.
//!
//! # Usage
//!
//! ```bash
//! # Interactive: import a plan and page through it
//! jobshop-viewer plan.json
//!
//! # Print the first page of the demand view and exit
//! jobshop-viewer --once --view demand plan.json
//!
//! # Emit laid-out frames as JSON instead of text
//! jobshop-viewer --dump-frame --once plan.json
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log level (default: info). Logs go to stderr.

use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use jobshop_viewer::config::ViewerConfig;
use jobshop_viewer::error::ConfigError;
use jobshop_viewer::models::ViewMode;
use jobshop_viewer::parsing::parse_plan_json;
use jobshop_viewer::render::{Renderer, TextRenderer};
use jobshop_viewer::services::LayoutGeometry;
use jobshop_viewer::session::{Command, Session};

const HELP: &str = "\
Commands:
  p         previous page
  n         next page
  <         previous shift
  >         next shift
  g         Gantt chart view
  d         demand plan view
  i <path>  import a plan file
  ?         show this help
  q         quit";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ViewArg {
    Gantt,
    Demand,
}

impl From<ViewArg> for ViewMode {
    fn from(view: ViewArg) -> Self {
        match view {
            ViewArg::Gantt => ViewMode::GanttChart,
            ViewArg::Demand => ViewMode::DemandPlan,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "jobshop-viewer", version, about = "Paged timeline viewer for job-shop plans")]
struct Args {
    /// Plan export (JSON) to import on startup
    plan: Option<PathBuf>,

    /// Configuration file (default: search for jobshop-viewer.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// View width in pixels, overriding terminal.width
    #[arg(short, long)]
    width: Option<f64>,

    /// View shown after the import
    #[arg(long, value_enum, default_value = "gantt")]
    view: ViewArg,

    /// Render the first page and exit
    #[arg(long)]
    once: bool,

    /// Print each drawn frame as JSON instead of text
    #[arg(long)]
    dump_frame: bool,
}

fn load_config(args: &Args) -> anyhow::Result<ViewerConfig> {
    let mut config = match &args.config {
        Some(path) => ViewerConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => match ViewerConfig::from_default_location() {
            Ok(config) => config,
            Err(ConfigError::NotFound) => {
                info!("No configuration file found, using defaults");
                ViewerConfig::default()
            }
            Err(e) => return Err(e).context("Failed to load configuration"),
        },
    };

    if let Some(width) = args.width {
        config.terminal.width = width;
        config.validate().context("Invalid --width")?;
    }
    Ok(config)
}

fn dump_frame<R: Renderer>(session: &Session<R>) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match session.last_frame() {
        Some(frame) => serde_json::to_writer_pretty(&mut out, frame)?,
        None => write!(out, "null")?,
    }
    writeln!(out)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let geometry = LayoutGeometry::from(&config.layout);

    let out: Box<dyn Write> = if args.dump_frame {
        Box::new(io::sink())
    } else {
        Box::new(io::stdout())
    };
    let renderer = TextRenderer::new(out, &config.terminal, &geometry);
    let mut session = Session::new(renderer, geometry);

    if let Some(path) = &args.plan {
        let data = parse_plan_json(path)
            .with_context(|| format!("Failed to import {}", path.display()))?;
        session.load_as(data, args.view.into())?;
        if args.dump_frame {
            dump_frame(&session)?;
        }
    } else if args.once {
        warn!("--once given without a plan file; nothing to show");
    }

    if args.once {
        return Ok(());
    }

    info!("Reading commands from stdin ('?' for help)");
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read command")?;
        match line.trim() {
            "" => continue,
            "q" => break,
            "?" => println!("{}", HELP),
            input => match input.parse::<Command>() {
                Ok(command) => match session.execute(command) {
                    Ok(()) if args.dump_frame => dump_frame(&session)?,
                    Ok(()) => {}
                    Err(e) => error!("{}", e),
                },
                Err(e) => warn!("{}; type '?' for help", e),
            },
        }
    }

    info!("Bye");
    Ok(())
}
