//! Integration tests for the programmatic camera surface.

use meshview_gui_lib::harness::ViewerHarness;
use meshview_gui_lib::viewport::camera::{Direction, MAX_DISTANCE, MIN_DISTANCE};

#[test]
fn operations_on_unmounted_viewport_are_no_ops() {
    let mut h = ViewerHarness::new();
    assert!(h.camera_state().is_none());

    // None of these may panic or error before the viewport mounts.
    h.reset_camera();
    h.dolly_in(1.2);
    h.dolly_out(1.2);
    h.translate(Direction::Left, 1.0);
    h.orbit(10.0, 5.0);

    assert!(h.camera_state().is_none());
}

#[test]
fn reset_restores_attach_pose_after_any_sequence() {
    let mut h = ViewerHarness::new();
    h.mount_viewport();
    let home = h.camera_state().unwrap();

    h.dolly_in(1.2);
    h.dolly_in(1.2);
    h.dolly_out(1.7);
    h.translate(Direction::Up, 1.0);
    h.translate(Direction::Right, 1.0);
    h.translate(Direction::Down, 1.0);
    h.orbit(42.0, -13.0);
    h.focus_on(glam::Vec3::new(3.0, -2.0, 7.5));

    h.reset_camera();
    let restored = h.camera_state().unwrap();
    assert_eq!(restored.position, home.position);
    assert_eq!(restored.target, home.target);
    assert_eq!(restored.distance, home.distance);
}

#[test]
fn scenario_b_three_left_nudges_move_x_by_minus_three() {
    let mut h = ViewerHarness::new();
    h.mount_viewport();
    let initial = h.camera_state().unwrap();

    h.translate(Direction::Left, 1.0);
    h.translate(Direction::Left, 1.0);
    h.translate(Direction::Left, 1.0);

    let moved = h.camera_state().unwrap();
    assert!((moved.position.x - (initial.position.x - 3.0)).abs() < 1e-6);
    assert!((moved.position.y - initial.position.y).abs() < 1e-6);
    assert!((moved.position.z - initial.position.z).abs() < 1e-6);
}

#[test]
fn nudge_step_is_fixed_regardless_of_zoom() {
    let mut h = ViewerHarness::new();
    h.mount_viewport();

    h.dolly_out(8.0);
    let far = h.camera_state().unwrap();
    h.translate(Direction::Up, 1.0);
    let far_moved = h.camera_state().unwrap();
    assert!((far_moved.position.y - (far.position.y + 1.0)).abs() < 1e-6);
}

#[test]
fn dolly_clamps_to_distance_limits() {
    let mut h = ViewerHarness::new();
    h.mount_viewport();

    for _ in 0..200 {
        h.dolly_in(1.2);
    }
    assert_eq!(h.camera_state().unwrap().distance, MIN_DISTANCE);

    for _ in 0..200 {
        h.dolly_out(1.2);
    }
    assert_eq!(h.camera_state().unwrap().distance, MAX_DISTANCE);
}

#[test]
fn camera_persists_across_model_swaps() {
    use meshview_gui_lib::fixtures;

    let mut h = ViewerHarness::new();
    h.mount_viewport();
    h.dolly_in(1.2);
    h.translate(Direction::Right, 1.0);
    let before = h.camera_state().unwrap();

    assert!(h.load("cube.stl", &fixtures::binary_stl_cube()));
    assert!(h.load("tri.stl", &fixtures::ascii_stl_triangle()));

    let after = h.camera_state().unwrap();
    assert_eq!(before.position, after.position);
    assert_eq!(before.distance, after.distance);
}
