//! Data model for plan documents and laid-out timeline frames.

pub mod schedule;
pub mod time;
pub mod timeline;

pub use schedule::{Demand, ScheduleData, Shift, TaskPlan};
pub use timeline::{
    ClipCase, PositionedBar, RowField, RowHeader, TimelineFrame, ViewMode, ViewportWindow,
    VisibleShift,
};
