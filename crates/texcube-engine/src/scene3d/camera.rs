use glam::{Mat4, Vec3};

/// Perspective camera with a cached projection matrix.
///
/// Editing `fov`, `aspect`, `near` or `far` has no effect until
/// `update_projection_matrix()` is called.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Vertical field of view, degrees.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Recomputes the projection from the current fields.
    pub fn update_projection_matrix(&mut self) {
        self.projection = Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far);
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, Vec3::NEG_Z, Vec3::Y)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(75.0, 2.0, 0.1, 5.0).with_position(Vec3::new(0.0, 0.0, 2.0))
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec4;

    use super::*;

    #[test]
    fn aspect_change_needs_explicit_update() {
        let mut cam = PerspectiveCamera::default();
        let before = cam.projection_matrix();

        cam.aspect = 1.0;
        assert_eq!(cam.projection_matrix(), before);

        cam.update_projection_matrix();
        assert_ne!(cam.projection_matrix(), before);
        // x scale is f / aspect; halving the aspect doubles it.
        let ratio = cam.projection_matrix().x_axis.x / before.x_axis.x;
        assert!((ratio - 2.0).abs() < 1e-5);
    }

    #[test]
    fn near_and_far_map_to_wgpu_depth_range() {
        let cam = PerspectiveCamera::default();
        let vp = cam.view_projection();

        let near = vp * Vec4::new(0.0, 0.0, 2.0 - 0.1, 1.0);
        let far = vp * Vec4::new(0.0, 0.0, 2.0 - 5.0, 1.0);
        assert!((near.z / near.w).abs() < 1e-5);
        assert!((far.z / far.w - 1.0).abs() < 1e-5);
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let cam = PerspectiveCamera::default();
        let p = cam.view_projection() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((p.x / p.w).abs() < 1e-6);
        assert!((p.y / p.w).abs() < 1e-6);
        assert!(p.w > 0.0);
    }
}
