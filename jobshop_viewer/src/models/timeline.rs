//! Timeline view types: view modes, the viewport window and the laid-out frame.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::schedule::{Shift, TaskPlan};
use super::time::{option_timestamp, timestamp};

/// The two report views over a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// One row per work center.
    GanttChart,
    /// One row per demand.
    DemandPlan,
}

impl ViewMode {
    pub const ALL: [ViewMode; 2] = [ViewMode::GanttChart, ViewMode::DemandPlan];

    /// Task plan field that assigns bars to rows in this view.
    pub fn row_field(self) -> RowField {
        match self {
            ViewMode::GanttChart => RowField::WorkCenter,
            ViewMode::DemandPlan => RowField::Demand,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ViewMode::GanttChart => "Gantt chart",
            ViewMode::DemandPlan => "Demand plan",
        }
    }
}

/// Which task plan reference selects the row of a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RowField {
    #[serde(rename = "workcenterid")]
    WorkCenter,
    #[serde(rename = "demandid")]
    Demand,
}

impl RowField {
    /// The row this task plan belongs to, or `None` if it is not shown in the view.
    pub fn of(self, taskplan: &TaskPlan) -> Option<&str> {
        match self {
            RowField::WorkCenter => taskplan.workcenterid.as_deref(),
            RowField::Demand => taskplan.demandid.as_deref(),
        }
    }

    /// Field name as it appears in plan documents.
    pub fn name(self) -> &'static str {
        match self {
            RowField::WorkCenter => "workcenterid",
            RowField::Demand => "demandid",
        }
    }
}

/// Position and size of the visible page, in shifts.
///
/// `first_shift_index + shifts_to_show` may run past the end of the shift
/// list; layout clamps the visible range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewportWindow {
    pub first_shift_index: usize,
    pub shifts_to_show: usize,
}

impl ViewportWindow {
    pub fn new(first_shift_index: usize, shifts_to_show: usize) -> Self {
        Self {
            first_shift_index,
            shifts_to_show,
        }
    }
}

/// A row header (work center or demand).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowHeader {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

/// A shift column inside the current window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisibleShift {
    /// Index into the full shift list.
    pub index: usize,
    pub shiftno: i64,
    pub label: String,
    #[serde(with = "timestamp")]
    pub start: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub end: NaiveDateTime,
    pub underutilized: bool,
}

impl VisibleShift {
    pub fn from_shift(index: usize, shift: &Shift, epsilon: f64) -> Self {
        Self {
            index,
            shiftno: shift.shiftno,
            label: shift.header_label(),
            start: shift.shiftstart,
            end: shift.shiftend,
            underutilized: shift.is_underutilized(epsilon),
        }
    }
}

/// How a task plan interval relates to the window it is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipCase {
    /// Starts inside the window; may run past its right edge.
    StartsInside,
    /// Starts before the window and ends inside it.
    EndsInside,
    /// Starts before and ends after the window.
    SpansWindow,
}

/// A task plan bar with its horizontal geometry inside the window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedBar {
    pub row_id: String,
    /// Index into the full task plan list.
    pub taskplan_index: usize,
    pub case: ClipCase,
    /// Distance from the window start, in shifts.
    pub offset: f64,
    /// Visible length, in shifts.
    pub length: f64,
    /// Pixel position, including the row header column.
    pub left: f64,
    pub width: f64,
    pub label: String,
    /// The interval continues before the window; the edge is drawn undecorated.
    pub open_left_edge: bool,
    /// The interval continues after the window.
    pub open_right_edge: bool,
    /// Belongs to a released work order.
    pub released: bool,
    pub tooltip: String,
}

/// Everything a renderer needs to draw one page of the timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineFrame {
    pub window: ViewportWindow,
    #[serde(serialize_with = "option_timestamp::serialize")]
    pub viewport_start: Option<NaiveDateTime>,
    #[serde(serialize_with = "option_timestamp::serialize")]
    pub viewport_end: Option<NaiveDateTime>,
    pub visible_shifts: Vec<VisibleShift>,
    pub bars: Vec<PositionedBar>,
}

impl TimelineFrame {
    pub fn is_empty(&self) -> bool {
        self.visible_shifts.is_empty()
    }

    /// Bars assigned to `row_id`, in task plan order.
    pub fn bars_for_row<'a>(&'a self, row_id: &'a str) -> impl Iterator<Item = &'a PositionedBar> + 'a {
        self.bars.iter().filter(move |bar| bar.row_id == row_id)
    }
}
