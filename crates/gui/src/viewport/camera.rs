use glam::{Mat4, Vec3, Vec4};

/// Closest the camera may dolly toward the target.
pub const MIN_DISTANCE: f32 = 0.5;
/// Farthest the camera may dolly away from the target.
pub const MAX_DISTANCE: f32 = 100.0;

/// World-axis direction for programmatic camera nudges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit world-space offset: up/down move along Y, left/right along X.
    pub fn unit(&self) -> Vec3 {
        match self {
            Direction::Up => Vec3::Y,
            Direction::Down => Vec3::NEG_Y,
            Direction::Left => Vec3::NEG_X,
            Direction::Right => Vec3::X,
        }
    }
}

/// Snapshot of the camera exposed to callers of the programmatic surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    pub target: Vec3,
    pub distance: f32,
}

/// Narrow programmatic camera surface.
///
/// The interactive gesture handling (drag orbit, pan, scroll zoom) lives in
/// the viewport panel; everything call sites need is behind this trait, so
/// the gesture engine is swappable without touching them.
pub trait CameraController {
    /// Restore position/target/zoom to the values captured at attach time.
    fn reset(&mut self);
    /// Multiplicative zoom step toward the target, clamped to the distance range.
    fn dolly_in(&mut self, factor: f32);
    /// Multiplicative zoom step away from the target, clamped to the distance range.
    fn dolly_out(&mut self, factor: f32);
    /// Additive camera-position nudge by `step` world units along a world axis.
    /// The step does not scale with the current zoom distance.
    fn translate(&mut self, direction: Direction, step: f32);
    fn current_state(&self) -> CameraState;
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct CameraHome {
    yaw: f32,
    pitch: f32,
    distance: f32,
    target: Vec3,
}

/// Arc-ball camera for the 3D viewport.
///
/// Eye position is derived from yaw/pitch/distance around the target, so a
/// target offset moves the eye by exactly the same world-space delta.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Horizontal rotation angle (radians)
    pub yaw: f32,
    /// Vertical rotation angle (radians)
    pub pitch: f32,
    /// Distance from target
    pub distance: f32,
    /// Camera target point
    pub target: Vec3,
    /// Vertical field of view (radians)
    pub fov: f32,
    home: CameraHome,
}

impl OrbitCamera {
    /// Attach a camera at the default pose and capture it as home.
    pub fn new() -> Self {
        Self::attached(0.0, 0.0, 5.0, Vec3::ZERO)
    }

    /// Attach a camera at an explicit pose; `reset` returns to this pose.
    pub fn attached(yaw: f32, pitch: f32, distance: f32, target: Vec3) -> Self {
        Self {
            yaw,
            pitch,
            distance,
            target,
            fov: 50.0_f32.to_radians(),
            home: CameraHome {
                yaw,
                pitch,
                distance,
                target,
            },
        }
    }

    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx.to_radians();
        self.pitch = (self.pitch + dy.to_radians()).clamp(-1.5, 1.5);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance * (1.0 - delta)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        let right = self.right_vector();
        let up = self.up_vector();
        self.target += right * dx + up * dy;
    }

    /// Re-aim at a point without changing orientation or distance.
    pub fn focus_on(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Camera position in world space
    pub fn eye_position(&self) -> Vec3 {
        let cy = self.yaw.cos();
        let sy = self.yaw.sin();
        let cp = self.pitch.cos();
        let sp = self.pitch.sin();

        self.target
            + Vec3::new(
                self.distance * cp * sy,
                self.distance * sp,
                self.distance * cp * cy,
            )
    }

    /// View matrix (world -> camera)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye_position(), self.target, Vec3::Y)
    }

    /// Projection matrix (camera -> clip)
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov, aspect, 0.1, 200.0)
    }

    /// Combined view-projection matrix
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    fn right_vector(&self) -> Vec3 {
        let fwd = (self.target - self.eye_position()).normalize_or_zero();
        fwd.cross(Vec3::Y).normalize_or_zero()
    }

    fn up_vector(&self) -> Vec3 {
        let fwd = (self.target - self.eye_position()).normalize_or_zero();
        let right = self.right_vector();
        right.cross(fwd).normalize_or_zero()
    }

    /// Project a 3D point to 2D screen coords (for overlay text)
    pub fn project(&self, point: [f32; 3], rect: egui::Rect) -> Option<egui::Pos2> {
        let aspect = rect.width() / rect.height();
        let vp = self.view_projection(aspect);
        let p = vp * Vec4::new(point[0], point[1], point[2], 1.0);
        if p.w <= 0.0 {
            return None;
        }
        let ndc = p.truncate() / p.w;
        let screen_x = rect.center().x + ndc.x * rect.width() * 0.5;
        let screen_y = rect.center().y - ndc.y * rect.height() * 0.5;
        Some(egui::pos2(screen_x, screen_y))
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraController for OrbitCamera {
    fn reset(&mut self) {
        self.yaw = self.home.yaw;
        self.pitch = self.home.pitch;
        self.distance = self.home.distance;
        self.target = self.home.target;
    }

    fn dolly_in(&mut self, factor: f32) {
        if factor > 0.0 {
            self.distance = (self.distance / factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
        }
    }

    fn dolly_out(&mut self, factor: f32) {
        if factor > 0.0 {
            self.distance = (self.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
        }
    }

    fn translate(&mut self, direction: Direction, step: f32) {
        // Eye = target + spherical offset, so shifting the target shifts the
        // eye by exactly the same delta.
        self.target += direction.unit() * step;
    }

    fn current_state(&self) -> CameraState {
        CameraState {
            position: self.eye_position(),
            target: self.target,
            distance: self.distance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pose_looks_down_negative_z() {
        let camera = OrbitCamera::new();
        let eye = camera.eye_position();
        assert!((eye - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-6);
    }

    #[test]
    fn reset_restores_attach_pose_exactly() {
        let mut camera = OrbitCamera::attached(0.6, 0.4, 6.0, Vec3::new(1.0, 2.0, 3.0));
        camera.rotate(35.0, -10.0);
        camera.dolly_in(1.2);
        camera.dolly_in(1.2);
        camera.translate(Direction::Left, 1.0);
        camera.translate(Direction::Up, 1.0);
        camera.pan(0.3, -0.7);

        camera.reset();
        assert_eq!(camera.yaw, 0.6);
        assert_eq!(camera.pitch, 0.4);
        assert_eq!(camera.distance, 6.0);
        assert_eq!(camera.target, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn dolly_is_clamped_to_distance_range() {
        let mut camera = OrbitCamera::new();
        for _ in 0..100 {
            camera.dolly_in(1.2);
        }
        assert_eq!(camera.distance, MIN_DISTANCE);

        for _ in 0..100 {
            camera.dolly_out(1.2);
        }
        assert_eq!(camera.distance, MAX_DISTANCE);
    }

    #[test]
    fn translate_moves_position_by_unit_steps() {
        let mut camera = OrbitCamera::new();
        let before = camera.current_state().position;

        camera.translate(Direction::Left, 1.0);
        camera.translate(Direction::Left, 1.0);
        camera.translate(Direction::Left, 1.0);

        let after = camera.current_state().position;
        assert!((after.x - (before.x - 3.0)).abs() < 1e-6);
        assert!((after.y - before.y).abs() < 1e-6);
        assert!((after.z - before.z).abs() < 1e-6);
    }

    #[test]
    fn translate_step_is_independent_of_zoom() {
        let mut camera = OrbitCamera::new();
        camera.dolly_out(4.0);
        let before = camera.current_state().position;
        camera.translate(Direction::Up, 1.0);
        let after = camera.current_state().position;
        assert!((after.y - (before.y + 1.0)).abs() < 1e-6);
    }
}
