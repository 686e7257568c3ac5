//! Viewer session: imported plan, active view and paging state.
//!
//! A [`Session`] owns everything that changes while the viewer runs and drives
//! a [`Renderer`]. Commands are applied one at a time; each either leaves the
//! session untouched or runs to completion, redrawing as needed.
//!
//! ```
//! use jobshop_viewer::render::RecordingRenderer;
//! use jobshop_viewer::services::LayoutGeometry;
//! use jobshop_viewer::session::{Command, Session};
//!
//! let plan = r#"{
//!     "shifts": [{"shiftno": 1, "shiftstart": "2017-01-03 00:00:00",
//!                 "shiftend": "2017-01-03 08:00:00", "value": 1}],
//!     "workcenters": ["WRK1"],
//!     "taskplans": [],
//!     "demands": []
//! }"#;
//!
//! let mut session = Session::new(RecordingRenderer::new(800.0, 10.0), LayoutGeometry::default());
//! session.import_str(plan).unwrap();
//! session.execute("n".parse::<Command>().unwrap()).unwrap();
//! assert_eq!(session.renderer().rows().len(), 1);
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{ViewerError, ViewerResult};
use crate::models::{RowHeader, ScheduleData, TimelineFrame, ViewMode, ViewportWindow};
use crate::parsing::{parse_plan_json, parse_plan_json_str};
use crate::preprocessing::{validate_schedule, ValidationReport};
use crate::render::Renderer;
use crate::services::{compute_timeline_frame, LayoutGeometry, PageOutcome, ViewportController};

/// A user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    PreviousPage,
    NextPage,
    PreviousShift,
    NextShift,
    SwitchView(ViewMode),
    Import(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandParseError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command '{0}'")]
    Unknown(String),
    #[error("Command 'i' needs a file path")]
    MissingPath,
}

impl FromStr for Command {
    type Err = CommandParseError;

    /// Parse `p`, `n`, `<`, `>`, `g`, `d` or `i <path>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (word, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (trimmed, ""),
        };

        match word {
            "" => Err(CommandParseError::Empty),
            "p" => Ok(Command::PreviousPage),
            "n" => Ok(Command::NextPage),
            "<" => Ok(Command::PreviousShift),
            ">" => Ok(Command::NextShift),
            "g" => Ok(Command::SwitchView(ViewMode::GanttChart)),
            "d" => Ok(Command::SwitchView(ViewMode::DemandPlan)),
            "i" if rest.is_empty() => Err(CommandParseError::MissingPath),
            "i" => Ok(Command::Import(PathBuf::from(rest))),
            other => Err(CommandParseError::Unknown(other.to_string())),
        }
    }
}

/// Row headers of `mode`, in display order.
pub fn row_headers(mode: ViewMode, data: &ScheduleData) -> Vec<RowHeader> {
    match mode {
        ViewMode::GanttChart => data
            .workcenters
            .iter()
            .map(|wc| RowHeader {
                id: wc.clone(),
                label: wc.clone(),
                tooltip: None,
            })
            .collect(),
        ViewMode::DemandPlan => data
            .demands
            .iter()
            .map(|demand| RowHeader {
                id: demand.demandid.clone(),
                label: demand.demandid.clone(),
                tooltip: Some(demand.tooltip()),
            })
            .collect(),
    }
}

pub struct Session<R: Renderer> {
    renderer: R,
    geometry: LayoutGeometry,
    data: Option<ScheduleData>,
    mode: Option<ViewMode>,
    viewport: ViewportController,
    rendered_rows: HashSet<String>,
    last_frame: Option<TimelineFrame>,
    validation: Option<ValidationReport>,
}

impl<R: Renderer> Session<R> {
    pub fn new(renderer: R, geometry: LayoutGeometry) -> Self {
        Self {
            renderer,
            geometry,
            data: None,
            mode: None,
            viewport: ViewportController::new(0),
            rendered_rows: HashSet::new(),
            last_frame: None,
            validation: None,
        }
    }

    /// Replace the loaded plan and show it in the Gantt view.
    pub fn load(&mut self, data: ScheduleData) -> ViewerResult<()> {
        self.load_as(data, ViewMode::GanttChart)
    }

    /// Replace the loaded plan and show it in `mode`.
    pub fn load_as(&mut self, data: ScheduleData, mode: ViewMode) -> ViewerResult<()> {
        let report = validate_schedule(
            &data,
            self.geometry.shift_duration_ms,
            self.geometry.underutilized_epsilon,
        );
        for warning in &report.warnings {
            log::warn!("Plan validation: {}", warning);
        }
        if report.is_clean() {
            log::debug!("Plan passed validation");
        }

        self.viewport.reset(data.shifts.len());
        self.data = Some(data);
        self.validation = Some(report);
        self.last_frame = None;

        self.switch_view(mode)
    }

    /// Import a plan document from disk. On failure the session is unchanged.
    pub fn import_file(&mut self, path: &Path) -> ViewerResult<()> {
        let data = parse_plan_json(path).map_err(|e| {
            log::error!("Import of {} failed: {}", path.display(), e);
            e
        })?;
        self.load(data)
    }

    /// Import a plan document from a string. On failure the session is unchanged.
    pub fn import_str(&mut self, json: &str) -> ViewerResult<()> {
        let data = parse_plan_json_str(json).map_err(|e| {
            log::error!("Import failed: {}", e);
            e
        })?;
        self.load(data)
    }

    /// Show `mode` from its first shift.
    ///
    /// Rebuilds the row headers and re-derives the page size from the width
    /// the renderer currently reports.
    pub fn switch_view(&mut self, mode: ViewMode) -> ViewerResult<()> {
        let Some(data) = self.data.as_ref() else {
            log::error!("Cannot show the {}: no plan has been imported", mode.title());
            return Err(ViewerError::NoData);
        };

        self.mode = Some(mode);
        self.last_frame = None;
        self.renderer.clear_all();
        self.renderer.render_view_tabs(mode);
        self.viewport.initialize(
            self.renderer.view_width(),
            self.geometry.column_width,
            self.geometry.row_header_width,
        );

        self.rendered_rows.clear();
        for row in row_headers(mode, data) {
            self.renderer.render_row(&row);
            self.rendered_rows.insert(row.id);
        }
        log::info!(
            "Showing {} with {} rows, {} shifts per page",
            mode.title(),
            self.rendered_rows.len(),
            self.viewport.shifts_to_show()
        );

        if !self.page(0)?.moved() {
            self.renderer.present()?;
        }
        Ok(())
    }

    /// Move the window by `offset` shifts and redraw if it moved.
    pub fn page(&mut self, offset: i64) -> ViewerResult<PageOutcome> {
        if self.mode.is_none() {
            log::error!("Error! Invalid report type: select a view before paging");
            return Err(ViewerError::NoActiveView);
        }

        let outcome = self.viewport.page(offset);
        if outcome.moved() {
            self.redraw()?;
        }
        Ok(outcome)
    }

    pub fn next_page(&mut self) -> ViewerResult<PageOutcome> {
        self.page(self.viewport.page_step())
    }

    pub fn previous_page(&mut self) -> ViewerResult<PageOutcome> {
        self.page(-self.viewport.page_step())
    }

    pub fn next_shift(&mut self) -> ViewerResult<PageOutcome> {
        self.page(1)
    }

    pub fn previous_shift(&mut self) -> ViewerResult<PageOutcome> {
        self.page(-1)
    }

    pub fn execute(&mut self, command: Command) -> ViewerResult<()> {
        log::debug!("Executing {:?}", command);
        match command {
            Command::PreviousPage => self.previous_page().map(|_| ()),
            Command::NextPage => self.next_page().map(|_| ()),
            Command::PreviousShift => self.previous_shift().map(|_| ()),
            Command::NextShift => self.next_shift().map(|_| ()),
            Command::SwitchView(mode) => self.switch_view(mode),
            Command::Import(path) => self.import_file(&path),
        }
    }

    /// Lay out the current window and replace the shift headers and bars on screen.
    fn redraw(&mut self) -> ViewerResult<()> {
        let (Some(mode), Some(data)) = (self.mode, self.data.as_ref()) else {
            return Ok(());
        };

        let row_field = mode.row_field();
        let mut frame = compute_timeline_frame(
            self.viewport.window(),
            &data.shifts,
            &data.taskplans,
            row_field,
            &self.geometry,
            &self.renderer,
        );

        let rendered_rows = &self.rendered_rows;
        frame.bars.retain(|bar| {
            let known = rendered_rows.contains(&bar.row_id);
            if !known {
                log::warn!(
                    "Skipping task plan {}: {} '{}' is not a row of the {}",
                    bar.taskplan_index,
                    row_field.name(),
                    bar.row_id,
                    mode.title()
                );
            }
            known
        });

        self.renderer.clear_timeline();
        for shift in &frame.visible_shifts {
            self.renderer.render_shift_header(shift);
        }
        for bar in &frame.bars {
            self.renderer.render_bar(bar);
        }
        self.renderer.present()?;

        log::debug!(
            "Drew shifts {}..{} with {} bars",
            frame.window.first_shift_index,
            frame.window.first_shift_index + frame.visible_shifts.len(),
            frame.bars.len()
        );
        self.last_frame = Some(frame);
        Ok(())
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub fn mode(&self) -> Option<ViewMode> {
        self.mode
    }

    pub fn window(&self) -> ViewportWindow {
        self.viewport.window()
    }

    pub fn data(&self) -> Option<&ScheduleData> {
        self.data.as_ref()
    }

    /// The most recently drawn frame, without bars whose row is not shown.
    pub fn last_frame(&self) -> Option<&TimelineFrame> {
        self.last_frame.as_ref()
    }

    /// Validation result of the current plan.
    pub fn validation(&self) -> Option<&ValidationReport> {
        self.validation.as_ref()
    }

    pub fn geometry(&self) -> &LayoutGeometry {
        &self.geometry
    }
}
