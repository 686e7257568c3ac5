//! Window and bar layout for the timeline views.
//!
//! Given the current [`ViewportWindow`], the full shift list and the task
//! plans, [`compute_timeline_frame`] decides which shift columns are visible,
//! which task plans intersect the visible time span, and where each of those
//! bars goes horizontally. It is a pure function: the only outside input is a
//! [`TextMeasure`] used to decide whether a bar label fits.
//!
//! # Time axis
//!
//! The window spans `[viewport_start, viewport_end)`, from the start of the
//! first visible shift to the end of the last one. Time spans are converted
//! to columns by dividing by a fixed shift duration (8 hours by default), not
//! by the length of the individual shifts.
//!
//! # Clipping
//!
//! A task plan `[start, end)` is drawn when it starts inside the window, ends
//! inside it, or covers it entirely. The three cases are tested in that order
//! and the first match wins:
//!
//! | case | offset | length | open edges |
//! |---|---|---|---|
//! | starts inside | `start - vs` | `min(end - start, ve - start)` | right, if `end > ve` |
//! | ends inside | `0` | `end - vs` | left |
//! | spans window | `0` | `ve - vs` | both |

use chrono::NaiveDateTime;
use std::ops::Range;

use crate::config::LayoutSettings;
use crate::models::time::span_in_units;
use crate::models::{
    ClipCase, PositionedBar, RowField, Shift, TaskPlan, TimelineFrame, ViewportWindow,
    VisibleShift,
};
use crate::render::TextMeasure;

/// Milliseconds in one nominal shift.
pub const MILLIS_PER_SHIFT: i64 = 28_800_000;

/// Shift values below this mark the shift as underutilized.
pub const UNDERUTILIZED_EPSILON: f64 = 0.00001;

/// Placeholder caption for bars too narrow for their label.
pub const ELLIPSIS: &str = "...";

/// Pixel geometry and time scale used for layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutGeometry {
    pub column_width: f64,
    pub row_header_width: f64,
    pub shift_duration_ms: i64,
    pub underutilized_epsilon: f64,
    pub label_fill_ratio: f64,
}

impl Default for LayoutGeometry {
    fn default() -> Self {
        Self {
            column_width: 100.0,
            row_header_width: 200.0,
            shift_duration_ms: MILLIS_PER_SHIFT,
            underutilized_epsilon: UNDERUTILIZED_EPSILON,
            label_fill_ratio: 0.8,
        }
    }
}

impl From<&LayoutSettings> for LayoutGeometry {
    fn from(settings: &LayoutSettings) -> Self {
        Self {
            column_width: settings.column_width,
            row_header_width: settings.row_header_width,
            shift_duration_ms: settings.shift_duration_ms,
            underutilized_epsilon: settings.underutilized_epsilon,
            label_fill_ratio: settings.label_fill_ratio,
        }
    }
}

/// Time bounds of a non-empty window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Horizontal extent of a bar inside the window, in shifts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClippedSpan {
    pub offset: f64,
    pub length: f64,
    pub open_left_edge: bool,
    pub open_right_edge: bool,
}

impl WindowBounds {
    /// Classify `[start, end)` against the window, or `None` if it does not intersect.
    pub fn classify(&self, start: NaiveDateTime, end: NaiveDateTime) -> Option<ClipCase> {
        if start >= self.start && start < self.end {
            Some(ClipCase::StartsInside)
        } else if end > self.start && end <= self.end {
            Some(ClipCase::EndsInside)
        } else if start < self.start && end > self.end {
            Some(ClipCase::SpansWindow)
        } else {
            None
        }
    }

    /// Offset and length of `[start, end)` after clipping to the window.
    pub fn clip(
        &self,
        case: ClipCase,
        start: NaiveDateTime,
        end: NaiveDateTime,
        shift_duration_ms: i64,
    ) -> ClippedSpan {
        match case {
            ClipCase::StartsInside => ClippedSpan {
                offset: span_in_units(self.start, start, shift_duration_ms),
                length: span_in_units(start, end.min(self.end), shift_duration_ms),
                open_left_edge: false,
                open_right_edge: end > self.end,
            },
            ClipCase::EndsInside => ClippedSpan {
                offset: 0.0,
                length: span_in_units(self.start, end, shift_duration_ms),
                open_left_edge: true,
                open_right_edge: false,
            },
            ClipCase::SpansWindow => ClippedSpan {
                offset: 0.0,
                length: span_in_units(self.start, self.end, shift_duration_ms),
                open_left_edge: true,
                open_right_edge: true,
            },
        }
    }
}

/// Indices of the shifts shown for `window`, clamped to the shift list.
pub fn visible_range(window: ViewportWindow, shift_count: usize) -> Range<usize> {
    let start = window.first_shift_index.min(shift_count);
    let end = window
        .first_shift_index
        .saturating_add(window.shifts_to_show)
        .min(shift_count);
    start..end.max(start)
}

/// Time bounds of the visible shifts, if any are visible.
pub fn window_bounds(visible: &[VisibleShift]) -> Option<WindowBounds> {
    match (visible.first(), visible.last()) {
        (Some(first), Some(last)) => Some(WindowBounds {
            start: first.start,
            end: last.end,
        }),
        _ => None,
    }
}

/// Lay out one page of the timeline.
///
/// # Arguments
///
/// * `window` - Current window position and size
/// * `shifts` - Full shift list, in chronological order
/// * `taskplans` - All task plans; those without a `row_field` reference are skipped
/// * `row_field` - Task plan reference that selects the row of each bar
/// * `geometry` - Column widths and time scale
/// * `measure` - Text measurement used to elide labels that do not fit
pub fn compute_timeline_frame(
    window: ViewportWindow,
    shifts: &[Shift],
    taskplans: &[TaskPlan],
    row_field: RowField,
    geometry: &LayoutGeometry,
    measure: &dyn TextMeasure,
) -> TimelineFrame {
    let range = visible_range(window, shifts.len());
    let first_index = range.start;
    let visible_shifts: Vec<VisibleShift> = shifts[range]
        .iter()
        .enumerate()
        .map(|(i, shift)| {
            VisibleShift::from_shift(first_index + i, shift, geometry.underutilized_epsilon)
        })
        .collect();

    let Some(bounds) = window_bounds(&visible_shifts) else {
        return TimelineFrame {
            window,
            viewport_start: None,
            viewport_end: None,
            visible_shifts,
            bars: Vec::new(),
        };
    };

    let bars = taskplans
        .iter()
        .enumerate()
        .filter_map(|(index, tp)| position_bar(index, tp, row_field, &bounds, geometry, measure))
        .collect();

    TimelineFrame {
        window,
        viewport_start: Some(bounds.start),
        viewport_end: Some(bounds.end),
        visible_shifts,
        bars,
    }
}

/// Position a single task plan, or `None` if it is not part of this view or window.
pub fn position_bar(
    index: usize,
    taskplan: &TaskPlan,
    row_field: RowField,
    bounds: &WindowBounds,
    geometry: &LayoutGeometry,
    measure: &dyn TextMeasure,
) -> Option<PositionedBar> {
    let row_id = row_field.of(taskplan)?;
    let case = bounds.classify(taskplan.startdate, taskplan.enddate)?;
    let span = bounds.clip(
        case,
        taskplan.startdate,
        taskplan.enddate,
        geometry.shift_duration_ms,
    );

    let left = geometry.row_header_width + span.offset * geometry.column_width;
    let width = span.length * geometry.column_width;

    let mut label = taskplan.label();
    if measure.measure_text_width(&label) > geometry.label_fill_ratio * width {
        label = ELLIPSIS.to_string();
    }

    Some(PositionedBar {
        row_id: row_id.to_string(),
        taskplan_index: index,
        case,
        offset: span.offset,
        length: span.length,
        left,
        width,
        label,
        open_left_edge: span.open_left_edge,
        open_right_edge: span.open_right_edge,
        released: taskplan.is_released(),
        tooltip: taskplan.tooltip(),
    })
}
