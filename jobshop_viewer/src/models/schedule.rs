//! Plan data as exported by the job shop planner.
//!
//! A plan document holds four ordered collections: shifts (the time axis),
//! work centers (Gantt rows), demands (Demand-plan rows) and task plans (the
//! bars). The collections are immutable once imported.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::time::timestamp;

/// Field decoders that accept the loose typing of plan exports.
///
/// Exports written by different tools disagree on whether numbers are quoted
/// and whether a missing reference is `null`, the string `"null"` or absent.
mod lenient {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Int(i64),
        Float(f64),
        Str(String),
    }

    pub(super) fn integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Scalar::deserialize(deserializer)? {
            Scalar::Int(i) => Ok(i),
            Scalar::Float(f) if f.fract() == 0.0 => Ok(f as i64),
            Scalar::Float(f) => Err(D::Error::custom(format!("expected an integer, got {}", f))),
            Scalar::Str(s) => s.trim().parse::<i64>().map_err(D::Error::custom),
        }
    }

    pub(super) fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Scalar::deserialize(deserializer)? {
            Scalar::Int(i) => Ok(i as f64),
            Scalar::Float(f) => Ok(f),
            Scalar::Str(s) => s.trim().parse::<f64>().map_err(D::Error::custom),
        }
    }

    pub(super) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Scalar::deserialize(deserializer)? {
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Str(s) => s,
        })
    }

    /// `null`, `"null"`, `""` and a missing key all mean "no reference".
    pub(super) fn optional_ref<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: Option<Scalar> = Option::deserialize(deserializer)?;
        Ok(match value {
            None => None,
            Some(Scalar::Str(s)) if s.is_empty() || s == "null" => None,
            Some(Scalar::Str(s)) => Some(s),
            Some(Scalar::Int(i)) => Some(i.to_string()),
            Some(Scalar::Float(f)) => Some(f.to_string()),
        })
    }
}

/// Serialize `value` as JSON indented with tabs, the layout used for tooltips.
pub(crate) fn tab_indented_json<T: Serialize>(value: &T) -> String {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(Vec::new(), formatter);
    if value.serialize(&mut serializer).is_err() {
        return String::new();
    }
    String::from_utf8(serializer.into_inner()).unwrap_or_default()
}

/// One calendar shift: a column on the time axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    #[serde(deserialize_with = "lenient::integer")]
    pub shiftno: i64,
    #[serde(with = "timestamp")]
    pub shiftstart: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub shiftend: NaiveDateTime,
    /// Efficiency value of the shift; near zero means no capacity.
    #[serde(deserialize_with = "lenient::number")]
    pub value: f64,
}

impl Shift {
    /// Whether the shift carries (effectively) no capacity.
    pub fn is_underutilized(&self, epsilon: f64) -> bool {
        self.value < epsilon
    }

    /// Column header text: `MM-DD (shiftno)`.
    ///
    /// The date comes from the stored start time. Offset timestamps are
    /// normalized to UTC on import, so `2024-01-01T23:00:00-05:00` is labeled
    /// `01-02`; exports with naive local timestamps keep their own date.
    pub fn header_label(&self) -> String {
        format!("{} ({})", self.shiftstart.format("%m-%d"), self.shiftno)
    }

    pub fn duration(&self) -> Duration {
        self.shiftend - self.shiftstart
    }
}

/// A demand (customer order); one row of the Demand-plan view.
///
/// Only `demandid` is interpreted. Every other field is kept as-is so the row
/// tooltip can show the full record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Demand {
    #[serde(deserialize_with = "lenient::string")]
    pub demandid: String,
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl Demand {
    pub fn new(demandid: impl Into<String>) -> Self {
        Self {
            demandid: demandid.into(),
            attributes: serde_json::Map::new(),
        }
    }

    pub fn tooltip(&self) -> String {
        tab_indented_json(self)
    }
}

/// A planned interval of one task, loading a work center and/or feeding a demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskPlan {
    #[serde(deserialize_with = "lenient::string")]
    pub skuid: String,
    #[serde(deserialize_with = "lenient::string")]
    pub tasknum: String,
    #[serde(with = "timestamp")]
    pub startdate: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub enddate: NaiveDateTime,
    #[serde(default, deserialize_with = "lenient::optional_ref")]
    pub workcenterid: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_ref")]
    pub demandid: Option<String>,
    /// Released work order this plan belongs to, if any.
    #[serde(default, deserialize_with = "lenient::optional_ref")]
    pub rwo: Option<String>,
}

impl TaskPlan {
    /// Bar caption: `{skuid}-{tasknum}`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.skuid, self.tasknum)
    }

    pub fn is_released(&self) -> bool {
        self.rwo.is_some()
    }

    pub fn tooltip(&self) -> String {
        tab_indented_json(self)
    }
}

/// The four collections of an imported plan document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleData {
    pub shifts: Vec<Shift>,
    pub workcenters: Vec<String>,
    pub taskplans: Vec<TaskPlan>,
    pub demands: Vec<Demand>,
}

impl ScheduleData {
    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
            && self.workcenters.is_empty()
            && self.taskplans.is_empty()
            && self.demands.is_empty()
    }
}
