//! Paging state for the timeline window.
//!
//! The controller only tracks indices. It never looks at timestamps, so the
//! window can be moved before or after the layout engine runs.
//!
//! Paging clamps asymmetrically: moving past the last shift is ignored, while
//! moving before the first shift snaps the window back to index 0.

use crate::models::ViewportWindow;

/// Result of a [`ViewportController::page`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// The window moved to the requested position (or was re-anchored in place).
    Moved,
    /// The request went before the first shift; the window now starts at 0.
    SnappedToStart,
    /// The request went past the last shift; nothing changed.
    AtEnd,
    /// The request went before the first shift while already at 0; nothing changed.
    AtStart,
}

impl PageOutcome {
    /// Whether the caller should redraw.
    pub fn moved(self) -> bool {
        matches!(self, PageOutcome::Moved | PageOutcome::SnappedToStart)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewportController {
    shift_count: usize,
    first_shift_index: usize,
    shifts_to_show: usize,
}

impl ViewportController {
    pub fn new(shift_count: usize) -> Self {
        Self {
            shift_count,
            first_shift_index: 0,
            shifts_to_show: 0,
        }
    }

    /// Number of whole shift columns that fit next to the row header, minus one.
    ///
    /// Never negative; a view narrower than two columns shows no shifts.
    pub fn shifts_to_show_for(view_width: f64, column_width: f64, row_header_width: f64) -> usize {
        let columns = ((view_width - row_header_width) / column_width).floor() - 1.0;
        if columns.is_finite() && columns > 0.0 {
            columns as usize
        } else {
            0
        }
    }

    /// Size the window for `view_width` and move it back to the first shift.
    pub fn initialize(&mut self, view_width: f64, column_width: f64, row_header_width: f64) {
        self.shifts_to_show = Self::shifts_to_show_for(view_width, column_width, row_header_width);
        self.first_shift_index = 0;
        log::debug!(
            "Viewport initialized: {} shifts per page out of {}",
            self.shifts_to_show,
            self.shift_count
        );
    }

    /// Forget the current position and track a new shift list.
    pub fn reset(&mut self, shift_count: usize) {
        self.shift_count = shift_count;
        self.first_shift_index = 0;
    }

    /// Move the window by `offset` shifts.
    pub fn page(&mut self, offset: i64) -> PageOutcome {
        let target = (self.first_shift_index as i64).saturating_add(offset);

        if target >= self.shift_count as i64 {
            log::debug!(
                "Paging to shift {} ignored: only {} shifts",
                target,
                self.shift_count
            );
            return PageOutcome::AtEnd;
        }

        if target < 0 {
            if self.first_shift_index > 0 {
                self.first_shift_index = 0;
                return PageOutcome::SnappedToStart;
            }
            log::debug!("Paging to shift {} ignored: already at the start", target);
            return PageOutcome::AtStart;
        }

        self.first_shift_index = target as usize;
        PageOutcome::Moved
    }

    /// Signed offset of one page, saturating at `i64::MAX` for very wide views.
    pub fn page_step(&self) -> i64 {
        i64::try_from(self.shifts_to_show).unwrap_or(i64::MAX)
    }

    pub fn next_page(&mut self) -> PageOutcome {
        self.page(self.page_step())
    }

    pub fn previous_page(&mut self) -> PageOutcome {
        self.page(-self.page_step())
    }

    pub fn next_shift(&mut self) -> PageOutcome {
        self.page(1)
    }

    pub fn previous_shift(&mut self) -> PageOutcome {
        self.page(-1)
    }

    pub fn window(&self) -> ViewportWindow {
        ViewportWindow::new(self.first_shift_index, self.shifts_to_show)
    }

    pub fn first_shift_index(&self) -> usize {
        self.first_shift_index
    }

    pub fn shifts_to_show(&self) -> usize {
        self.shifts_to_show
    }

    pub fn shift_count(&self) -> usize {
        self.shift_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(shift_count: usize, shifts_to_show_width: f64) -> ViewportController {
        let mut c = ViewportController::new(shift_count);
        c.initialize(shifts_to_show_width, 100.0, 200.0);
        c
    }

    #[test]
    fn test_shifts_to_show_formula() {
        assert_eq!(ViewportController::shifts_to_show_for(1200.0, 100.0, 200.0), 9);
        assert_eq!(ViewportController::shifts_to_show_for(1250.0, 100.0, 200.0), 9);
        assert_eq!(ViewportController::shifts_to_show_for(600.0, 100.0, 200.0), 3);
    }

    #[test]
    fn test_shifts_to_show_never_negative() {
        assert_eq!(ViewportController::shifts_to_show_for(250.0, 100.0, 200.0), 0);
        assert_eq!(ViewportController::shifts_to_show_for(100.0, 100.0, 200.0), 0);
        assert_eq!(ViewportController::shifts_to_show_for(0.0, 100.0, 200.0), 0);
    }

    #[test]
    fn test_initialize_resets_position() {
        let mut c = controller(20, 600.0);
        c.page(5);
        assert_eq!(c.first_shift_index(), 5);

        c.initialize(1200.0, 100.0, 200.0);
        assert_eq!(c.first_shift_index(), 0);
        assert_eq!(c.shifts_to_show(), 9);
    }

    #[test]
    fn test_page_past_end_is_ignored() {
        let mut c = controller(10, 600.0);
        assert_eq!(c.page(9), PageOutcome::Moved);
        assert_eq!(c.page(1), PageOutcome::AtEnd);
        assert_eq!(c.first_shift_index(), 9);
    }

    #[test]
    fn test_next_page_near_end_does_not_move() {
        let mut c = controller(10, 600.0);
        c.page(8);
        assert_eq!(c.next_page(), PageOutcome::AtEnd);
        assert_eq!(c.first_shift_index(), 8);
    }

    #[test]
    fn test_page_before_start_snaps_to_zero() {
        let mut c = controller(10, 600.0);
        c.page(2);
        assert_eq!(c.previous_page(), PageOutcome::SnappedToStart);
        assert_eq!(c.first_shift_index(), 0);
    }

    #[test]
    fn test_page_before_start_at_zero_is_noop() {
        let mut c = controller(10, 600.0);
        assert_eq!(c.previous_shift(), PageOutcome::AtStart);
        assert!(!PageOutcome::AtStart.moved());
        assert_eq!(c.first_shift_index(), 0);
    }

    #[test]
    fn test_page_zero_reanchors() {
        let mut c = controller(10, 600.0);
        let outcome = c.page(0);
        assert_eq!(outcome, PageOutcome::Moved);
        assert!(outcome.moved());
    }

    #[test]
    fn test_page_zero_without_shifts_is_noop() {
        let mut c = controller(0, 600.0);
        assert_eq!(c.page(0), PageOutcome::AtEnd);
    }

    #[test]
    fn test_shift_steps() {
        let mut c = controller(10, 600.0);
        c.next_shift();
        c.next_shift();
        assert_eq!(c.first_shift_index(), 2);
        c.previous_shift();
        assert_eq!(c.window(), ViewportWindow::new(1, 3));
    }

    #[test]
    fn test_page_step_saturates_for_huge_width() {
        let mut c = controller(20, 1e30);
        assert_eq!(c.shifts_to_show(), usize::MAX);
        assert_eq!(c.page_step(), i64::MAX);

        c.page(5);
        assert_eq!(c.next_page(), PageOutcome::AtEnd);
        assert_eq!(c.first_shift_index(), 5);
        assert_eq!(c.previous_page(), PageOutcome::SnappedToStart);
        assert_eq!(c.first_shift_index(), 0);
    }

    #[test]
    fn test_reset_tracks_new_shift_count() {
        let mut c = controller(10, 600.0);
        c.page(4);
        c.reset(3);
        assert_eq!(c.first_shift_index(), 0);
        assert_eq!(c.shift_count(), 3);
        assert_eq!(c.page(3), PageOutcome::AtEnd);
    }
}
