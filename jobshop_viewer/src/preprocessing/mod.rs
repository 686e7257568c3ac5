//! Post-import checks run before a plan is shown.

pub mod validator;

pub use validator::{validate_schedule, ValidationIssue, ValidationReport, ValidationStats};
