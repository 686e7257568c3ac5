//! Plain-text renderer for terminals and logs.
//!
//! Pixel geometry from the layout is mapped onto character cells at
//! `px_per_cell` pixels per cell. A frame looks like:
//!
//! ```text
//!  [Gantt chart]   Demand plan
//! Work center        01-03 (1) 01-03 (2) 01-03 (3)
//!                    ────────────────────░░░░░░░░░░
//! WRK1               │    [SKU1-10=]
//! WRK2               │===]          [SKU2-20====
//! ```
//!
//! Closed bar edges are drawn as `[` and `]`; an edge where the task plan
//! continues outside the window is left open. Released work orders are filled
//! with `-` instead of `=`.

use std::io::Write;

use super::{Renderer, TextMeasure};
use crate::config::TerminalSettings;
use crate::models::{PositionedBar, RowHeader, ViewMode, VisibleShift};
use crate::services::timeline::LayoutGeometry;

const FILL: char = '=';
const FILL_RELEASED: char = '-';
const EDGE_LEFT: char = '[';
const EDGE_RIGHT: char = ']';
const AXIS: char = '─';
const AXIS_UNDERUTILIZED: char = '░';
const ROW_SEPARATOR: char = '│';

/// Widest line drawn, in cells. Anything right of it is cut off.
pub const MAX_LINE_CELLS: usize = 4096;

/// Renders frames as text into a writer.
#[derive(Debug)]
pub struct TextRenderer<W: Write> {
    out: W,
    view_width: f64,
    px_per_cell: f64,
    column_width: f64,
    row_header_width: f64,
    active_view: Option<ViewMode>,
    rows: Vec<RowHeader>,
    shifts: Vec<VisibleShift>,
    bars: Vec<PositionedBar>,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, terminal: &TerminalSettings, geometry: &LayoutGeometry) -> Self {
        Self {
            out,
            view_width: terminal.width,
            px_per_cell: terminal.px_per_cell,
            column_width: geometry.column_width,
            row_header_width: geometry.row_header_width,
            active_view: None,
            rows: Vec::new(),
            shifts: Vec::new(),
            bars: Vec::new(),
        }
    }

    /// Consume the renderer, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn cells(&self, px: f64) -> usize {
        (px / self.px_per_cell).round().max(0.0) as usize
    }

    /// Draw the current state as text, one line per output row.
    pub fn draw(&self) -> String {
        let total = self.cells(self.view_width).min(MAX_LINE_CELLS);
        let header = self.cells(self.row_header_width).min(total);
        let column = self.cells(self.column_width).max(1);

        let mut lines: Vec<Vec<char>> = Vec::with_capacity(self.rows.len() + 3);

        lines.push(self.tabs_line().chars().collect());

        let mut axis_labels = vec![' '; total];
        let mut axis = vec![' '; total];
        let corner = match self.active_view {
            Some(ViewMode::GanttChart) => "Work center",
            Some(ViewMode::DemandPlan) => "Demand",
            None => "",
        };
        put_text(&mut axis_labels, 0, header.saturating_sub(1), corner);
        for (i, shift) in self.shifts.iter().enumerate() {
            let x = header.saturating_add(i.saturating_mul(column));
            put_text(&mut axis_labels, x, column.saturating_sub(1), &shift.label);
            let mark = if shift.underutilized {
                AXIS_UNDERUTILIZED
            } else {
                AXIS
            };
            for cell in axis.iter_mut().skip(x).take(column) {
                *cell = mark;
            }
        }
        lines.push(axis_labels);
        lines.push(axis);

        for row in &self.rows {
            let mut line = vec![' '; total];
            put_text(&mut line, 0, header.saturating_sub(1), &row.label);
            if header > 0 {
                line[header - 1] = ROW_SEPARATOR;
            }
            for bar in self.bars.iter().filter(|bar| bar.row_id == row.id) {
                self.put_bar(&mut line, bar);
            }
            lines.push(line);
        }

        lines
            .into_iter()
            .map(|line| line.into_iter().collect::<String>().trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn tabs_line(&self) -> String {
        let tabs: Vec<String> = ViewMode::ALL
            .iter()
            .map(|&mode| {
                if self.active_view == Some(mode) {
                    format!("[{}]", mode.title())
                } else {
                    format!(" {} ", mode.title())
                }
            })
            .collect();
        format!(" {}", tabs.join("  "))
    }

    fn put_bar(&self, line: &mut [char], bar: &PositionedBar) {
        let total = line.len();
        let start = self.cells(bar.left);
        if start >= total {
            return;
        }
        let end = self.cells(bar.left + bar.width).max(start + 1).min(total);

        let fill = if bar.released { FILL_RELEASED } else { FILL };
        for cell in &mut line[start..end] {
            *cell = fill;
        }
        if !bar.open_left_edge {
            line[start] = EDGE_LEFT;
        }
        if !bar.open_right_edge {
            line[end - 1] = EDGE_RIGHT;
        }

        let inner_start = if bar.open_left_edge { start } else { start + 1 };
        let inner_end = if bar.open_right_edge { end } else { end - 1 };
        let room = inner_end.saturating_sub(inner_start);
        let label_len = bar.label.chars().count();
        if label_len > 0 && label_len <= room {
            put_text(line, inner_start + (room - label_len) / 2, label_len, &bar.label);
        }
    }
}

/// Write at most `max` characters of `text` into `line` starting at `x`.
fn put_text(line: &mut [char], x: usize, max: usize, text: &str) {
    for (k, ch) in text.chars().take(max).enumerate() {
        if let Some(cell) = line.get_mut(x.saturating_add(k)) {
            *cell = ch;
        }
    }
}

impl<W: Write> TextMeasure for TextRenderer<W> {
    fn measure_text_width(&self, label: &str) -> f64 {
        label.chars().count() as f64 * self.px_per_cell
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn view_width(&self) -> f64 {
        self.view_width
    }

    fn clear_all(&mut self) {
        self.rows.clear();
        self.shifts.clear();
        self.bars.clear();
    }

    fn clear_timeline(&mut self) {
        self.shifts.clear();
        self.bars.clear();
    }

    fn render_view_tabs(&mut self, active: ViewMode) {
        self.active_view = Some(active);
    }

    fn render_row(&mut self, row: &RowHeader) {
        self.rows.push(row.clone());
    }

    fn render_shift_header(&mut self, shift: &VisibleShift) {
        self.shifts.push(shift.clone());
    }

    fn render_bar(&mut self, bar: &PositionedBar) {
        self.bars.push(bar.clone());
    }

    fn present(&mut self) -> std::io::Result<()> {
        let frame = self.draw();
        writeln!(self.out, "{}\n", frame)?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClipCase;
    use chrono::NaiveDate;

    fn renderer() -> TextRenderer<Vec<u8>> {
        let terminal = TerminalSettings {
            width: 600.0,
            px_per_cell: 10.0,
        };
        TextRenderer::new(Vec::new(), &terminal, &LayoutGeometry::default())
    }

    fn row(id: &str) -> RowHeader {
        RowHeader {
            id: id.to_string(),
            label: id.to_string(),
            tooltip: None,
        }
    }

    fn shift(index: usize, underutilized: bool) -> VisibleShift {
        let start = NaiveDate::from_ymd_opt(2017, 1, 3)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            + chrono::Duration::hours(8 * index as i64);
        VisibleShift {
            index,
            shiftno: index as i64 + 1,
            label: format!("01-03 ({})", index + 1),
            start,
            end: start + chrono::Duration::hours(8),
            underutilized,
        }
    }

    fn bar(row_id: &str, left: f64, width: f64, label: &str) -> PositionedBar {
        PositionedBar {
            row_id: row_id.to_string(),
            taskplan_index: 0,
            case: ClipCase::StartsInside,
            offset: 0.0,
            length: 0.0,
            left,
            width,
            label: label.to_string(),
            open_left_edge: false,
            open_right_edge: false,
            released: false,
            tooltip: String::new(),
        }
    }

    #[test]
    fn test_tabs_mark_active_view() {
        let mut r = renderer();
        r.render_view_tabs(ViewMode::DemandPlan);
        let first_line = r.draw().lines().next().unwrap().to_string();
        assert!(first_line.contains("[Demand plan]"));
        assert!(first_line.contains(" Gantt chart "));
    }

    #[test]
    fn test_closed_bar_with_centered_label() {
        let mut r = renderer();
        r.render_view_tabs(ViewMode::GanttChart);
        r.render_row(&row("WRK1"));
        r.render_bar(&bar("WRK1", 250.0, 100.0, "SKU1-10"));

        let text = r.draw();
        let row_line = text.lines().nth(3).unwrap();
        assert!(row_line.starts_with("WRK1"));
        assert_eq!(row_line.chars().nth(19), Some('│'));
        assert_eq!(&row_line[row_line.find('[').unwrap()..], "[SKU1-10=]");
    }

    #[test]
    fn test_open_edges_and_released_fill() {
        let mut r = renderer();
        r.render_row(&row("WRK1"));
        let mut spanning = bar("WRK1", 200.0, 300.0, "...");
        spanning.open_left_edge = true;
        spanning.open_right_edge = true;
        spanning.released = true;
        r.render_bar(&spanning);

        let text = r.draw();
        let row_line = text.lines().nth(3).unwrap();
        assert!(!row_line.contains('['));
        assert!(!row_line.contains(']'));
        assert!(row_line.contains("-------------...--------------"));
    }

    #[test]
    fn test_axis_marks_underutilized_shift() {
        let mut r = renderer();
        r.render_view_tabs(ViewMode::GanttChart);
        r.render_shift_header(&shift(0, false));
        r.render_shift_header(&shift(1, true));

        let text = r.draw();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[1].starts_with("Work center"));
        assert!(lines[1].contains("01-03 (1)"));
        assert!(lines[1].contains("01-03 (2)"));
        assert_eq!(lines[2].trim(), format!("{}{}", "─".repeat(10), "░".repeat(10)));
    }

    #[test]
    fn test_bars_only_drawn_in_their_row() {
        let mut r = renderer();
        r.render_row(&row("WRK1"));
        r.render_row(&row("WRK2"));
        r.render_bar(&bar("WRK2", 200.0, 100.0, "X"));

        let text = r.draw();
        let lines: Vec<&str> = text.lines().collect();
        assert!(!lines[3].contains('['));
        assert!(lines[4].contains('['));
    }

    #[test]
    fn test_present_writes_frame() {
        let mut r = renderer();
        r.render_view_tabs(ViewMode::GanttChart);
        r.render_row(&row("WRK1"));
        r.present().unwrap();

        let written = String::from_utf8(r.into_inner()).unwrap();
        assert!(written.contains("[Gantt chart]"));
        assert!(written.contains("WRK1"));
    }

    #[test]
    fn test_huge_view_width_is_capped() {
        let terminal = TerminalSettings {
            width: 1e30,
            px_per_cell: 10.0,
        };
        let mut r = TextRenderer::new(Vec::new(), &terminal, &LayoutGeometry::default());
        r.render_view_tabs(ViewMode::GanttChart);
        r.render_shift_header(&shift(0, false));
        r.render_row(&row("WRK1"));
        r.render_bar(&bar("WRK1", 1e29, 1e29, "X"));

        let text = r.draw();
        assert!(text.lines().all(|line| line.chars().count() <= MAX_LINE_CELLS));
        assert!(text.contains("01-03 (1)"));
    }

    #[test]
    fn test_clear_timeline_keeps_rows() {
        let mut r = renderer();
        r.render_row(&row("WRK1"));
        r.render_bar(&bar("WRK1", 200.0, 100.0, "X"));
        r.clear_timeline();

        let text = r.draw();
        assert!(text.contains("WRK1"));
        assert!(!text.contains('['));
    }
}
