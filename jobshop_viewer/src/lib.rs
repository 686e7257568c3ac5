//! # JobShop plan viewer
//!
//! Paged timeline views over a job-shop production plan.
//!
//! A plan export lists calendar shifts, work centers, demands and task plans.
//! The viewer shows it either as a Gantt chart (one row per work center) or
//! as a demand plan (one row per demand), a page of shifts at a time, with
//! every task plan clipped to the visible window.
//!
//! ## Architecture
//!
//! - [`parsing`]: decodes plan documents into [`models::ScheduleData`]
//! - [`preprocessing`]: consistency checks run after import
//! - [`services`]: paging ([`services::ViewportController`]) and the pure
//!   layout engine ([`services::compute_timeline_frame`])
//! - [`render`]: the [`render::Renderer`] trait and its text and recording
//!   implementations
//! - [`session`]: ties the above together and executes user commands
//! - [`config`]: TOML configuration for geometry and the text renderer
//!
//! ## Example
//!
//! ```no_run
//! use jobshop_viewer::config::ViewerConfig;
//! use jobshop_viewer::render::TextRenderer;
//! use jobshop_viewer::services::LayoutGeometry;
//! use jobshop_viewer::session::{Command, Session};
//! use std::path::Path;
//!
//! let config = ViewerConfig::default();
//! let geometry = LayoutGeometry::from(&config.layout);
//! let renderer = TextRenderer::new(std::io::stdout(), &config.terminal, &geometry);
//!
//! let mut session = Session::new(renderer, geometry);
//! session.import_file(Path::new("plan.json"))?;
//! session.execute(Command::NextPage)?;
//! # Ok::<(), jobshop_viewer::error::ViewerError>(())
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod parsing;
pub mod preprocessing;
pub mod render;
pub mod services;
pub mod session;

pub use config::ViewerConfig;
pub use error::{ConfigError, ImportError, ViewerError, ViewerResult};
pub use models::{ScheduleData, TimelineFrame, ViewMode};
pub use session::{Command, Session};
