//! End-to-end tests: plan document in, render calls and text frames out.

mod support;

use std::io::Write;

use jobshop_viewer::config::ViewerConfig;
use jobshop_viewer::models::{ClipCase, ViewMode, ViewportWindow};
use jobshop_viewer::render::{RecordingRenderer, TextRenderer};
use jobshop_viewer::services::{LayoutGeometry, PageOutcome};
use jobshop_viewer::session::{Command, Session};
use jobshop_viewer::ViewerError;

use support::SAMPLE_PLAN_JSON;

/// 600 px leaves room for three shift columns.
fn recording_session() -> Session<RecordingRenderer> {
    Session::new(RecordingRenderer::new(600.0, 10.0), LayoutGeometry::default())
}

fn run(session: &mut Session<RecordingRenderer>, commands: &[&str]) {
    for input in commands {
        let command: Command = input.parse().expect("valid command");
        session.execute(command).expect("command succeeds");
    }
}

#[test]
fn test_import_shows_first_gantt_page() {
    let mut session = recording_session();
    session.import_str(SAMPLE_PLAN_JSON).unwrap();

    assert_eq!(session.mode(), Some(ViewMode::GanttChart));
    assert_eq!(session.window(), ViewportWindow::new(0, 3));

    let r = session.renderer();
    let labels: Vec<&str> = r.shift_headers().iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["01-03 (1)", "01-03 (2)", "01-03 (3)"]);
    assert!(r.shift_headers()[2].underutilized);
    assert!(!r.shift_headers()[1].underutilized);

    let rows: Vec<&str> = r.rows().iter().map(|row| row.id.as_str()).collect();
    assert_eq!(rows, vec!["WRK1", "WRK2"]);

    assert_eq!(r.bars().len(), 2);
    let first = &r.bars()[0];
    assert_eq!(first.row_id, "WRK1");
    assert_eq!(first.case, ClipCase::StartsInside);
    assert_eq!(first.left, 250.0);
    assert_eq!(first.width, 100.0);
    assert_eq!(first.label, "SKU1-10");
    assert!(!first.released);

    let spanning = &r.bars()[1];
    assert_eq!(spanning.row_id, "WRK2");
    assert_eq!(spanning.case, ClipCase::SpansWindow);
    assert_eq!(spanning.length, 3.0);
    assert!(spanning.open_left_edge && spanning.open_right_edge);
    assert!(spanning.released);
    assert!(spanning.tooltip.contains("\t\"rwo\": \"RWO-1\""));
}

#[test]
fn test_paging_through_plan() {
    let mut session = recording_session();
    session.import_str(SAMPLE_PLAN_JSON).unwrap();

    assert_eq!(session.next_page().unwrap(), PageOutcome::Moved);
    let r = session.renderer();
    assert_eq!(r.shift_headers().len(), 2);
    assert_eq!(r.bars().len(), 1);
    assert_eq!(r.bars()[0].length, 2.0);

    assert_eq!(session.next_page().unwrap(), PageOutcome::AtEnd);
    assert_eq!(session.window().first_shift_index, 3);

    assert_eq!(session.previous_shift().unwrap(), PageOutcome::Moved);
    assert_eq!(session.previous_page().unwrap(), PageOutcome::SnappedToStart);
    assert_eq!(session.previous_page().unwrap(), PageOutcome::AtStart);
    assert_eq!(session.window().first_shift_index, 0);
}

#[test]
fn test_demand_view_with_shifted_window() {
    let mut session = recording_session();
    session.import_str(SAMPLE_PLAN_JSON).unwrap();
    run(&mut session, &["d", ">"]);

    let r = session.renderer();
    assert_eq!(r.active_view(), Some(ViewMode::DemandPlan));
    assert!(r.rows()[0].tooltip.as_deref().unwrap().contains("ACME"));

    let frame = session.last_frame().unwrap();
    let d1: Vec<_> = frame.bars_for_row("D1").collect();
    assert_eq!(d1.len(), 2);
    assert_eq!(frame.bars_for_row("D2").count(), 1);
    assert_eq!(frame.bars_for_row("WRK1").count(), 0);
    assert_eq!(r.bars().len(), frame.bars.len());

    assert_eq!(d1[0].case, ClipCase::EndsInside);
    assert_eq!(d1[0].length, 0.5);
    assert_eq!(d1[0].label, "...");
    assert!(d1[0].open_left_edge);

    assert_eq!(d1[1].case, ClipCase::StartsInside);
    assert_eq!(d1[1].offset, 2.25);
    assert_eq!(d1[1].length, 0.75);
    assert!(d1[1].open_right_edge);
}

#[test]
fn test_paging_before_any_view_is_an_error() {
    let mut session = recording_session();
    let err = session.execute(Command::NextShift).unwrap_err();
    assert!(matches!(err, ViewerError::NoActiveView));
    assert_eq!(
        err.to_string(),
        "Invalid report type: no view is active"
    );
}

#[test]
fn test_validation_of_sample_plan() {
    let mut session = recording_session();
    session.import_str(SAMPLE_PLAN_JSON).unwrap();

    let report = session.validation().unwrap();
    assert!(report.is_clean(), "unexpected warnings: {:?}", report.warnings);
    assert_eq!(report.stats.shift_count, 5);
    assert_eq!(report.stats.underutilized_shifts, 1);
    assert_eq!(report.stats.released_taskplans, 1);
}

#[test]
fn test_import_command_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SAMPLE_PLAN_JSON.as_bytes()).unwrap();

    let mut session = recording_session();
    session
        .execute(Command::Import(file.path().to_path_buf()))
        .unwrap();
    assert_eq!(session.data().unwrap().taskplans.len(), 3);
}

#[test]
fn test_failed_reimport_keeps_previous_plan() {
    let mut bad = tempfile::NamedTempFile::new().unwrap();
    bad.write_all(b"{\"shifts\": [], \"workcenters\": []").unwrap();

    let mut session = recording_session();
    session.import_str(SAMPLE_PLAN_JSON).unwrap();
    run(&mut session, &["n"]);
    session.renderer_mut().take_calls();

    let err = session
        .execute(Command::Import(bad.path().to_path_buf()))
        .unwrap_err();
    assert!(matches!(err, ViewerError::Import(_)));
    assert_eq!(session.window().first_shift_index, 3);
    assert_eq!(session.data().unwrap().workcenters.len(), 2);
    assert!(session.renderer().calls().is_empty());
}

#[test]
fn test_text_renderer_draws_frame() {
    let mut config = ViewerConfig::default();
    config.terminal.width = 600.0;
    let geometry = LayoutGeometry::from(&config.layout);
    let renderer = TextRenderer::new(Vec::new(), &config.terminal, &geometry);

    let mut session = Session::new(renderer, geometry);
    session.import_str(SAMPLE_PLAN_JSON).unwrap();

    let output = String::from_utf8(session.into_renderer().into_inner()).unwrap();
    assert!(output.contains("[Gantt chart]"));
    assert!(output.contains("01-03 (1)"));
    assert!(output.contains("[SKU1-10=]"));
    assert!(output.contains("░"));
}

#[test]
fn test_frame_serializes_to_json() {
    let mut session = recording_session();
    session.import_str(SAMPLE_PLAN_JSON).unwrap();

    let frame = session.last_frame().unwrap();
    let value = serde_json::to_value(frame).unwrap();
    assert_eq!(value["viewport_start"], "2017-01-03 00:00:00");
    assert_eq!(value["viewport_end"], "2017-01-04 00:00:00");
    assert_eq!(value["visible_shifts"].as_array().unwrap().len(), 3);
    assert_eq!(value["bars"].as_array().unwrap().len(), 2);
}
