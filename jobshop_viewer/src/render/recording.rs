//! In-memory renderer that records every call.

use serde::Serialize;

use super::{Renderer, TextMeasure};
use crate::models::{PositionedBar, RowHeader, ViewMode, VisibleShift};

/// One call made on a [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", content = "args", rename_all = "snake_case")]
pub enum RenderCall {
    ClearAll,
    ClearTimeline,
    ViewTabs(ViewMode),
    Row(RowHeader),
    ShiftHeader(VisibleShift),
    Bar(PositionedBar),
    Present,
}

/// Renderer that keeps a log of calls plus the currently displayed state.
#[derive(Debug, Clone)]
pub struct RecordingRenderer {
    view_width: f64,
    char_width: f64,
    calls: Vec<RenderCall>,
    active_view: Option<ViewMode>,
    rows: Vec<RowHeader>,
    shift_headers: Vec<VisibleShift>,
    bars: Vec<PositionedBar>,
}

impl RecordingRenderer {
    /// A renderer reporting `view_width` pixels and measuring text at
    /// `char_width` pixels per character.
    pub fn new(view_width: f64, char_width: f64) -> Self {
        Self {
            view_width,
            char_width,
            calls: Vec::new(),
            active_view: None,
            rows: Vec::new(),
            shift_headers: Vec::new(),
            bars: Vec::new(),
        }
    }

    pub fn calls(&self) -> &[RenderCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<RenderCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn active_view(&self) -> Option<ViewMode> {
        self.active_view
    }

    /// Rows currently on display.
    pub fn rows(&self) -> &[RowHeader] {
        &self.rows
    }

    /// Shift headers currently on display.
    pub fn shift_headers(&self) -> &[VisibleShift] {
        &self.shift_headers
    }

    /// Bars currently on display.
    pub fn bars(&self) -> &[PositionedBar] {
        &self.bars
    }

    pub fn set_view_width(&mut self, view_width: f64) {
        self.view_width = view_width;
    }
}

impl TextMeasure for RecordingRenderer {
    fn measure_text_width(&self, label: &str) -> f64 {
        label.chars().count() as f64 * self.char_width
    }
}

impl Renderer for RecordingRenderer {
    fn view_width(&self) -> f64 {
        self.view_width
    }

    fn clear_all(&mut self) {
        self.rows.clear();
        self.shift_headers.clear();
        self.bars.clear();
        self.calls.push(RenderCall::ClearAll);
    }

    fn clear_timeline(&mut self) {
        self.shift_headers.clear();
        self.bars.clear();
        self.calls.push(RenderCall::ClearTimeline);
    }

    fn render_view_tabs(&mut self, active: ViewMode) {
        self.active_view = Some(active);
        self.calls.push(RenderCall::ViewTabs(active));
    }

    fn render_row(&mut self, row: &RowHeader) {
        self.rows.push(row.clone());
        self.calls.push(RenderCall::Row(row.clone()));
    }

    fn render_shift_header(&mut self, shift: &VisibleShift) {
        self.shift_headers.push(shift.clone());
        self.calls.push(RenderCall::ShiftHeader(shift.clone()));
    }

    fn render_bar(&mut self, bar: &PositionedBar) {
        self.bars.push(bar.clone());
        self.calls.push(RenderCall::Bar(bar.clone()));
    }

    fn present(&mut self) -> std::io::Result<()> {
        self.calls.push(RenderCall::Present);
        Ok(())
    }
}
