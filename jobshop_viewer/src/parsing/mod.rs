//! Importer for plan export documents.
//!
//! A plan export is a JSON object with four arrays:
//!
//! - `shifts`: `{shiftno, shiftstart, shiftend, value}` in chronological order
//! - `workcenters`: work center ids, in display order
//! - `taskplans`: `{skuid, tasknum, startdate, enddate, workcenterid, demandid, rwo}`
//! - `demands`: `{demandid, ...}`
//!
//! # Example
//!
//! ```no_run
//! use jobshop_viewer::parsing::json_parser::parse_plan_json;
//! use std::path::Path;
//!
//! let plan = parse_plan_json(Path::new("plan.json"))
//!     .expect("Failed to parse plan");
//! println!("{} task plans", plan.taskplans.len());
//! ```

pub mod json_parser;


pub use json_parser::{parse_plan_json, parse_plan_json_str};
