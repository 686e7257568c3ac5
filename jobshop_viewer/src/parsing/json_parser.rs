use serde_json::Value;
use std::path::Path;

use crate::error::ImportError;
use crate::models::ScheduleData;

/// Top-level keys every plan document must contain.
pub const REQUIRED_KEYS: [&str; 4] = ["shifts", "workcenters", "taskplans", "demands"];

/// Parse a plan export file into its four collections.
pub fn parse_plan_json(json_path: &Path) -> Result<ScheduleData, ImportError> {
    let json_content = std::fs::read_to_string(json_path).map_err(|source| ImportError::Io {
        path: json_path.to_path_buf(),
        source,
    })?;

    log::info!("Importing plan from {}", json_path.display());
    parse_plan_json_str(&json_content)
}

/// Parse a plan export from a string.
///
/// Nothing is returned unless the whole document decodes; a single bad
/// timestamp rejects the import.
pub fn parse_plan_json_str(json_str: &str) -> Result<ScheduleData, ImportError> {
    let json_value: Value = serde_json::from_str(json_str).map_err(ImportError::Syntax)?;

    let found: Vec<String> = json_value
        .as_object()
        .map(|o| o.keys().cloned().collect())
        .unwrap_or_default();
    let missing: Vec<String> = REQUIRED_KEYS
        .iter()
        .filter(|key| !found.iter().any(|k| k == *key))
        .map(|key| key.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ImportError::MissingKeys { missing, found });
    }

    // Deserialize through the path tracker so errors name the offending
    // element, e.g. `taskplans[12].enddate`.
    let data: ScheduleData = serde_path_to_error::deserialize(&json_value).map_err(|err| {
        let path = err.path().to_string();
        ImportError::Structure {
            path,
            message: err.into_inner().to_string(),
        }
    })?;

    log::info!(
        "Imported plan: {} shifts, {} work centers, {} task plans, {} demands",
        data.shifts.len(),
        data.workcenters.len(),
        data.taskplans.len(),
        data.demands.len()
    );

    Ok(data)
}
