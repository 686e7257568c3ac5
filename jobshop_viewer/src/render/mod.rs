//! Renderer capability consumed by the session.
//!
//! Layout never touches output directly. A [`Session`](crate::session::Session)
//! computes a [`TimelineFrame`](crate::models::TimelineFrame) and hands its
//! pieces to a [`Renderer`], which materializes them however it likes.
//!
//! Two implementations ship with the crate:
//!
//! - [`TextRenderer`]: draws the chart as text into any [`std::io::Write`]
//! - [`RecordingRenderer`]: keeps every call in memory, for tests and tooling

pub mod recording;
pub mod text;

pub use recording::{RecordingRenderer, RenderCall};
pub use text::TextRenderer;

use crate::models::{PositionedBar, RowHeader, ViewMode, VisibleShift};

/// Measures how much horizontal space a label needs, in pixels.
pub trait TextMeasure {
    fn measure_text_width(&self, label: &str) -> f64;
}

/// Output side of the viewer.
///
/// Calls arrive in a fixed order per redraw: `clear_timeline`, one
/// `render_shift_header` per visible shift, one `render_bar` per visible bar,
/// then `present`. A view switch is preceded by `clear_all`,
/// `render_view_tabs` and one `render_row` per row.
pub trait Renderer: TextMeasure {
    /// Horizontal space available for the chart, in pixels.
    fn view_width(&self) -> f64;

    /// Remove rows, shift headers and bars.
    fn clear_all(&mut self);

    /// Remove shift headers and bars, keeping rows.
    fn clear_timeline(&mut self);

    /// Mark `active` as the selected view.
    fn render_view_tabs(&mut self, active: ViewMode);

    fn render_row(&mut self, row: &RowHeader);

    fn render_shift_header(&mut self, shift: &VisibleShift);

    /// Draw a bar in row `bar.row_id`. The row has already been rendered.
    fn render_bar(&mut self, bar: &PositionedBar);

    /// Flush a completed frame to the output.
    fn present(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
