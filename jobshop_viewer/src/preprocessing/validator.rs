//! Import-time consistency checks for plan documents.
//!
//! The layout engine trusts its inputs: shifts are taken to be contiguous and
//! of the nominal duration, and every task plan's row reference is taken to
//! name a rendered row. This module checks those assumptions once, when a plan
//! is imported, and reports every violation as a warning. Warnings never
//! block an import; the affected bars are still laid out (or skipped, for
//! unknown rows) exactly as they would be without validation.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use crate::models::{ScheduleData, TaskPlan};

/// A single data-consistency finding.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    /// A task plan names a work center that is not in `workcenters`.
    UnknownWorkCenter { taskplan: usize, id: String },
    /// A task plan names a demand that is not in `demands`.
    UnknownDemand { taskplan: usize, id: String },
    /// A task plan ends at or before its start.
    EmptyInterval { taskplan: usize, label: String },
    /// A shift starts before the previous shift ends.
    OverlappingShift { index: usize },
    /// A shift starts after the previous shift ends.
    ShiftGap { index: usize },
    /// A shift's length differs from the nominal shift duration.
    IrregularShiftDuration { index: usize, duration_ms: i64 },
    DuplicateWorkCenter { id: String },
    DuplicateDemand { id: String },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::UnknownWorkCenter { taskplan, id } => write!(
                f,
                "Task plan #{} references unknown work center '{}'",
                taskplan, id
            ),
            ValidationIssue::UnknownDemand { taskplan, id } => write!(
                f,
                "Task plan #{} references unknown demand '{}'",
                taskplan, id
            ),
            ValidationIssue::EmptyInterval { taskplan, label } => write!(
                f,
                "Task plan #{} ({}) ends at or before its start",
                taskplan, label
            ),
            ValidationIssue::OverlappingShift { index } => {
                write!(f, "Shift #{} starts before the previous shift ends", index)
            }
            ValidationIssue::ShiftGap { index } => {
                write!(f, "Shift #{} leaves a gap after the previous shift", index)
            }
            ValidationIssue::IrregularShiftDuration { index, duration_ms } => write!(
                f,
                "Shift #{} lasts {} ms, layout assumes a fixed shift duration",
                index, duration_ms
            ),
            ValidationIssue::DuplicateWorkCenter { id } => {
                write!(f, "Work center '{}' is listed more than once", id)
            }
            ValidationIssue::DuplicateDemand { id } => {
                write!(f, "Demand '{}' is listed more than once", id)
            }
        }
    }
}

/// Summary counts gathered while validating.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationStats {
    pub shift_count: usize,
    pub workcenter_count: usize,
    pub taskplan_count: usize,
    pub demand_count: usize,
    pub underutilized_shifts: usize,
    pub released_taskplans: usize,
    /// Task plans shown in neither view.
    pub unassigned_taskplans: usize,
}

/// Outcome of validating one plan document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub warnings: Vec<ValidationIssue>,
    pub stats: ValidationStats,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Check a plan document against the assumptions of the layout engine.
///
/// # Arguments
///
/// * `data` - The imported plan
/// * `shift_duration_ms` - Nominal shift length the layout converts spans with
/// * `epsilon` - Threshold below which a shift counts as underutilized
pub fn validate_schedule(
    data: &ScheduleData,
    shift_duration_ms: i64,
    epsilon: f64,
) -> ValidationReport {
    let mut report = ValidationReport {
        warnings: Vec::new(),
        stats: ValidationStats {
            shift_count: data.shifts.len(),
            workcenter_count: data.workcenters.len(),
            taskplan_count: data.taskplans.len(),
            demand_count: data.demands.len(),
            ..Default::default()
        },
    };

    check_shifts(data, shift_duration_ms, epsilon, &mut report);

    let workcenters = unique_ids(
        data.workcenters.iter().map(String::as_str),
        |id| ValidationIssue::DuplicateWorkCenter { id },
        &mut report,
    );
    let demands = unique_ids(
        data.demands.iter().map(|d| d.demandid.as_str()),
        |id| ValidationIssue::DuplicateDemand { id },
        &mut report,
    );

    for (index, tp) in data.taskplans.iter().enumerate() {
        check_taskplan(index, tp, &workcenters, &demands, &mut report);
    }

    report
}

fn check_shifts(data: &ScheduleData, shift_duration_ms: i64, epsilon: f64, report: &mut ValidationReport) {
    let mut irregular = 0usize;

    for (index, shift) in data.shifts.iter().enumerate() {
        if shift.is_underutilized(epsilon) {
            report.stats.underutilized_shifts += 1;
        }

        let duration_ms = shift.duration().num_milliseconds();
        if duration_ms != shift_duration_ms {
            irregular += 1;
            report
                .warnings
                .push(ValidationIssue::IrregularShiftDuration { index, duration_ms });
        }

        if index > 0 {
            let previous_end = data.shifts[index - 1].shiftend;
            if shift.shiftstart < previous_end {
                report.warnings.push(ValidationIssue::OverlappingShift { index });
            } else if shift.shiftstart > previous_end {
                report.warnings.push(ValidationIssue::ShiftGap { index });
            }
        }
    }

    if irregular > 0 {
        log::warn!(
            "{} of {} shifts differ from the nominal {} ms shift duration; bar widths are approximate",
            irregular,
            data.shifts.len(),
            shift_duration_ms
        );
    }
}

fn unique_ids<'a, F>(
    ids: impl Iterator<Item = &'a str>,
    duplicate: F,
    report: &mut ValidationReport,
) -> HashSet<&'a str>
where
    F: Fn(String) -> ValidationIssue,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            report.warnings.push(duplicate(id.to_string()));
        }
    }
    seen
}

fn check_taskplan(
    index: usize,
    tp: &TaskPlan,
    workcenters: &HashSet<&str>,
    demands: &HashSet<&str>,
    report: &mut ValidationReport,
) {
    if tp.is_released() {
        report.stats.released_taskplans += 1;
    }

    if tp.enddate <= tp.startdate {
        report.warnings.push(ValidationIssue::EmptyInterval {
            taskplan: index,
            label: tp.label(),
        });
    }

    match (&tp.workcenterid, &tp.demandid) {
        (None, None) => report.stats.unassigned_taskplans += 1,
        (workcenter, demand) => {
            if let Some(id) = workcenter {
                if !workcenters.contains(id.as_str()) {
                    report.warnings.push(ValidationIssue::UnknownWorkCenter {
                        taskplan: index,
                        id: id.clone(),
                    });
                }
            }
            if let Some(id) = demand {
                if !demands.contains(id.as_str()) {
                    report.warnings.push(ValidationIssue::UnknownDemand {
                        taskplan: index,
                        id: id.clone(),
                    });
                }
            }
        }
    }
}
