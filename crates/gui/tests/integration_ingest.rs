//! Integration tests for file ingestion: format dispatch, error handling,
//! and ordering of overlapping requests.

use std::sync::Arc;
use std::time::{Duration, Instant};

use meshview_gui_lib::fixtures;
use meshview_gui_lib::harness::ViewerHarness;
use meshview_gui_lib::state::AppState;

#[test]
fn ingests_binary_stl_into_one_uniform_mesh() {
    let mut h = ViewerHarness::new();
    assert!(h.load("cube.stl", &fixtures::binary_stl_cube()));

    let model = h.current_model().expect("model should be displayed");
    assert_eq!(model.mesh_count(), 1);
    assert_eq!(model.triangle_count(), 12);

    // Every vertex carries the uniform material color.
    let color = model.material.base_color;
    for mesh in &model.meshes {
        for vertex in mesh.vertices.chunks_exact(9) {
            assert_eq!(&vertex[6..9], &color);
        }
    }
}

#[test]
fn ingests_ascii_stl() {
    let mut h = ViewerHarness::new();
    assert!(h.load("tri.stl", &fixtures::ascii_stl_triangle()));
    assert_eq!(h.current_model().unwrap().triangle_count(), 1);
}

#[test]
fn ingests_grouped_obj_into_one_mesh_per_group() {
    let mut h = ViewerHarness::new();
    assert!(h.load("pair.obj", &fixtures::obj_two_groups()));

    let model = h.current_model().unwrap();
    assert_eq!(model.mesh_count(), 2);
    assert_eq!(model.triangle_count(), 2);
    let names: Vec<_> = model.meshes.iter().map(|m| m.name.as_deref()).collect();
    assert_eq!(names, vec![Some("base"), Some("lid")]);
}

#[test]
fn ungrouped_obj_yields_a_single_mesh() {
    let mut h = ViewerHarness::new();
    assert!(h.load("quad.obj", &fixtures::obj_quad()));
    let model = h.current_model().unwrap();
    assert_eq!(model.mesh_count(), 1);
    assert_eq!(model.triangle_count(), 2);
}

#[test]
fn unsupported_extension_is_surfaced_and_leaves_model_alone() {
    let mut h = ViewerHarness::new();
    assert!(h.load("cube.stl", &fixtures::binary_stl_cube()));
    let before = h.current_model().unwrap().clone();

    assert!(h.load("scene.gltf", b"whatever"));
    let status = h.status().expect("a diagnostic must be shown");
    assert!(status.is_error);
    assert!(status.text.contains("gltf"));
    assert!(Arc::ptr_eq(&before, h.current_model().unwrap()));
}

#[test]
fn scenario_a_corrupt_upload_keeps_previous_model() {
    let mut h = ViewerHarness::new();

    // Upload cube.stl: one mesh displayed, label reads cube.stl.
    assert!(h.load("cube.stl", &fixtures::binary_stl_cube()));
    assert_eq!(h.label_file(), Some("cube.stl"));
    assert_eq!(h.current_model().unwrap().mesh_count(), 1);
    let cube = h.current_model().unwrap().clone();

    // Upload truncated bad.obj: failure notice, label updates, cube stays.
    assert!(h.load("bad.obj", &fixtures::truncated_obj()));
    assert_eq!(h.label_file(), Some("bad.obj"));
    assert!(h.status().unwrap().is_error);
    assert!(Arc::ptr_eq(&cube, h.current_model().unwrap()));
    assert_eq!(h.displayed_file(), Some("cube.stl"));
}

#[test]
fn scenario_c_later_initiated_request_wins() {
    let mut h = ViewerHarness::new();

    // Started in order a.stl, b.stl; a.stl completes second.
    let gen_a = h.select_file("a.stl");
    let gen_b = h.select_file("b.stl");

    assert!(h.complete(gen_b, "b.stl", &fixtures::binary_stl_cube()));
    assert!(!h.complete(gen_a, "a.stl", &fixtures::ascii_stl_triangle()));

    assert_eq!(h.displayed_file(), Some("b.stl"));
    assert_eq!(h.current_model().unwrap().triangle_count(), 12);
}

#[test]
fn in_order_overlapping_requests_both_apply() {
    let mut h = ViewerHarness::new();
    let gen_a = h.select_file("a.stl");
    let gen_b = h.select_file("b.stl");

    assert!(h.complete(gen_a, "a.stl", &fixtures::ascii_stl_triangle()));
    assert_eq!(h.displayed_file(), Some("a.stl"));

    assert!(h.complete(gen_b, "b.stl", &fixtures::binary_stl_cube()));
    assert_eq!(h.displayed_file(), Some("b.stl"));
}

#[test]
fn stale_failure_does_not_clobber_newer_success() {
    let mut h = ViewerHarness::new();
    let gen_a = h.select_file("bad.obj");
    let gen_b = h.select_file("cube.stl");

    assert!(h.complete(gen_b, "cube.stl", &fixtures::binary_stl_cube()));
    let status_before = h.status().unwrap().text.clone();

    // The stale failure is discarded entirely: no error notice either.
    assert!(!h.complete(gen_a, "bad.obj", &fixtures::truncated_obj()));
    assert_eq!(h.status().unwrap().text, status_before);
    assert_eq!(h.displayed_file(), Some("cube.stl"));
}

// ── End-to-end through the async ingestor ────────────────────

fn poll_until(state: &mut AppState, deadline: Duration, done: impl Fn(&AppState) -> bool) {
    let end = Instant::now() + deadline;
    while !done(state) && Instant::now() < end {
        state.poll_ingest();
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn end_to_end_ingest_reads_the_file_off_thread() {
    let path = fixtures::write_temp("cube.stl", &fixtures::binary_stl_cube());

    let mut state = AppState::headless();
    state.open_model(path.clone());
    assert!(state.ingest.has_pending());

    poll_until(&mut state, Duration::from_secs(5), |s| !s.scene.is_empty());
    let _ = std::fs::remove_file(path);

    let model = state.scene.current().expect("ingest should have landed");
    assert_eq!(model.triangle_count(), 12);
    assert!(!state.ingest.has_pending());
}

#[test]
fn end_to_end_missing_file_reports_io_error() {
    let mut state = AppState::headless();
    state.open_model("/definitely/not/here.stl".into());

    poll_until(&mut state, Duration::from_secs(5), |s| {
        s.status.as_ref().is_some_and(|m| m.is_error)
    });

    assert!(state.scene.is_empty());
    let status = state.status.expect("error must be surfaced");
    assert!(status.is_error);
}
