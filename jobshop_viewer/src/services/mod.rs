//! Paging and layout for the timeline views.

pub mod timeline;
pub mod viewport;

pub use timeline::{
    compute_timeline_frame, position_bar, visible_range, window_bounds, ClippedSpan,
    LayoutGeometry, WindowBounds, ELLIPSIS, MILLIS_PER_SHIFT, UNDERUTILIZED_EPSILON,
};
pub use viewport::{PageOutcome, ViewportController};
