#![allow(dead_code)]

use chrono::{Duration, NaiveDate, NaiveDateTime};
use jobshop_viewer::models::{Demand, ScheduleData, Shift, TaskPlan};

/// 2024-01-01T00:00 plus `hours`.
pub fn at(hours: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .expect("valid date")
        .and_hms_opt(0, 0, 0)
        .expect("valid time")
        + Duration::hours(hours)
}

/// `count` contiguous 8-hour shifts from 2024-01-01T00:00, numbered 1..=3 per day.
pub fn eight_hour_shifts(count: usize) -> Vec<Shift> {
    (0..count as i64)
        .map(|i| Shift {
            shiftno: i % 3 + 1,
            shiftstart: at(8 * i),
            shiftend: at(8 * (i + 1)),
            value: 1.0,
        })
        .collect()
}

pub fn taskplan(workcenter: &str, start_h: i64, end_h: i64) -> TaskPlan {
    TaskPlan {
        skuid: "SKU1".to_string(),
        tasknum: "10".to_string(),
        startdate: at(start_h),
        enddate: at(end_h),
        workcenterid: Some(workcenter.to_string()),
        demandid: None,
        rwo: None,
    }
}

/// Ten shifts, two work centers, two demands.
pub fn sample_schedule() -> ScheduleData {
    let mut released = taskplan("WRK2", 0, 30);
    released.demandid = Some("D2".to_string());
    released.rwo = Some("RWO-7".to_string());

    let mut first = taskplan("WRK1", 4, 12);
    first.demandid = Some("D1".to_string());

    ScheduleData {
        shifts: eight_hour_shifts(10),
        workcenters: vec!["WRK1".to_string(), "WRK2".to_string()],
        taskplans: vec![first, released, taskplan("WRK1", 50, 60)],
        demands: vec![Demand::new("D1"), Demand::new("D2")],
    }
}

/// Plan export in the on-disk format, with the quirks of real exports:
/// `"null"` references, numeric strings and space-separated timestamps.
pub const SAMPLE_PLAN_JSON: &str = r#"{
    "shifts": [
        {"shiftno": 1, "shiftstart": "2017-01-03 00:00:00", "shiftend": "2017-01-03 08:00:00", "value": 1},
        {"shiftno": 2, "shiftstart": "2017-01-03 08:00:00", "shiftend": "2017-01-03 16:00:00", "value": "0.75"},
        {"shiftno": 3, "shiftstart": "2017-01-03 16:00:00", "shiftend": "2017-01-04 00:00:00", "value": 0},
        {"shiftno": "1", "shiftstart": "2017-01-04 00:00:00", "shiftend": "2017-01-04 08:00:00", "value": 1},
        {"shiftno": 2, "shiftstart": "2017-01-04 08:00:00", "shiftend": "2017-01-04 16:00:00", "value": 1}
    ],
    "workcenters": ["WRK1", "WRK2"],
    "taskplans": [
        {"skuid": "SKU1", "tasknum": 10, "startdate": "2017-01-03 04:00:00", "enddate": "2017-01-03 12:00:00",
         "workcenterid": "WRK1", "demandid": "D1", "rwo": "null"},
        {"skuid": "SKU2", "tasknum": "20", "startdate": "2017-01-02 20:00:00", "enddate": "2017-01-05 00:00:00",
         "workcenterid": "WRK2", "demandid": "D2", "rwo": "RWO-1"},
        {"skuid": "SKU3", "tasknum": 30, "startdate": "2017-01-04 02:00:00", "enddate": "2017-01-04 10:00:00",
         "workcenterid": "null", "demandid": "D1", "rwo": null}
    ],
    "demands": [
        {"demandid": "D1", "customer": "ACME", "qty": 12},
        {"demandid": "D2", "customer": "Globex", "qty": 3}
    ]
}"#;
