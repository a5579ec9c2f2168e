//! Per-frame scene update: keep the surface and camera in step with the
//! window, then spin the cubes.

use texcube_engine::device::{resize_to_display_size, RenderSurface};
use texcube_engine::scene3d::{Mesh, PerspectiveCamera};

/// Rotation of mesh `index` after `seconds`, in radians.
pub fn rotation_angle(seconds: f64, index: usize) -> f32 {
    let speed = 0.2 + 0.1 * index as f64;
    (seconds * speed) as f32
}

/// Sets every mesh's X and Y rotation from the elapsed time.
pub fn spin_meshes(meshes: &mut [Mesh], seconds: f64) {
    for (i, mesh) in meshes.iter_mut().enumerate() {
        let angle = rotation_angle(seconds, i);
        mesh.transform.rotation.x = angle;
        mesh.transform.rotation.y = angle;
    }
}

/// Keeps the backing surface and the camera's aspect ratio in step with the
/// displayed size.
///
/// The window's swapchain is created at the display size, so the first frame
/// would see no mismatch; the camera is fitted on the first non-empty frame
/// regardless and afterwards only when the surface is resized.
#[derive(Debug, Default)]
pub struct SurfaceSync {
    fitted: bool,
}

impl SurfaceSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resizes the backing surface to the displayed size if they differ and
    /// refits the camera when it did (or nothing was fitted yet).
    ///
    /// A zero-area display (minimised window) still resizes but leaves the
    /// camera alone. Returns whether the surface was resized.
    pub fn sync<S: RenderSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        camera: &mut PerspectiveCamera,
    ) -> bool {
        let resized = resize_to_display_size(surface);
        if !resized && self.fitted {
            return false;
        }
        let (w, h) = surface.display_size();
        if w > 0 && h > 0 {
            camera.aspect = w as f32 / h as f32;
            camera.update_projection_matrix();
            self.fitted = true;
        }
        resized
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use texcube_engine::scene3d::Geometry;
    use texcube_engine::texture::Texture;

    use super::*;

    struct FakeSurface {
        display: (u32, u32),
        backing: (u32, u32),
        reconfigures: u32,
    }

    impl FakeSurface {
        fn new(display: (u32, u32), backing: (u32, u32)) -> Self {
            Self { display, backing, reconfigures: 0 }
        }
    }

    impl RenderSurface for FakeSurface {
        fn display_size(&self) -> (u32, u32) {
            self.display
        }
        fn backing_size(&self) -> (u32, u32) {
            self.backing
        }
        fn set_backing_size(&mut self, width: u32, height: u32) {
            self.backing = (width, height);
            self.reconfigures += 1;
        }
    }

    fn cubes(n: usize) -> Vec<Mesh> {
        let texture = Rc::new(RefCell::new(Texture::empty()));
        (0..n).map(|_| Mesh::new(Geometry::cuboid(1.0, 1.0, 1.0), texture.clone())).collect()
    }

    #[test]
    fn speed_grows_with_index() {
        assert!((rotation_angle(1.0, 0) - 0.2).abs() < 1e-6);
        assert!((rotation_angle(1.0, 1) - 0.3).abs() < 1e-6);
        assert!((rotation_angle(10.0, 2) - 4.0).abs() < 1e-5);
        assert_eq!(rotation_angle(0.0, 5), 0.0);
    }

    #[test]
    fn rotation_is_monotonic_in_time() {
        let mut last = -1.0;
        for ms in (0..5_000).step_by(16) {
            let a = rotation_angle(ms as f64 * 0.001, 0);
            assert!(a >= last);
            last = a;
        }
    }

    #[test]
    fn spin_sets_x_and_y_only() {
        let mut meshes = cubes(2);
        spin_meshes(&mut meshes, 1.0);
        let r0 = meshes[0].transform.rotation;
        let r1 = meshes[1].transform.rotation;
        assert!((r0.x - 0.2).abs() < 1e-6 && r0.x == r0.y && r0.z == 0.0);
        assert!((r1.x - 0.3).abs() < 1e-6 && r1.x == r1.y);
    }

    #[test]
    fn resize_updates_camera_once() {
        let mut sync = SurfaceSync::new();
        let mut surface = FakeSurface::new((900, 600), (300, 150));
        let mut camera = PerspectiveCamera::default();
        let before = camera.projection_matrix();

        assert!(sync.sync(&mut surface, &mut camera));
        assert_eq!(surface.reconfigures, 1);
        assert_eq!(surface.backing, (900, 600));
        assert!((camera.aspect - 1.5).abs() < 1e-6);
        assert_ne!(camera.projection_matrix(), before);
    }

    #[test]
    fn first_frame_fits_camera_without_resize() {
        let mut sync = SurfaceSync::new();
        let mut surface = FakeSurface::new((960, 540), (960, 540));
        let mut camera = PerspectiveCamera::default();
        assert_eq!(camera.aspect, 2.0);

        for _ in 0..100 {
            assert!(!sync.sync(&mut surface, &mut camera));
        }
        assert_eq!(surface.reconfigures, 0);
        assert!((camera.aspect - 960.0 / 540.0).abs() < 1e-6);
    }

    #[test]
    fn steady_size_touches_nothing_after_first_fit() {
        let mut sync = SurfaceSync::new();
        let mut surface = FakeSurface::new((800, 400), (800, 400));
        let mut camera = PerspectiveCamera::default();
        sync.sync(&mut surface, &mut camera);

        camera.aspect = 3.0;
        let before = camera.projection_matrix();
        for _ in 0..3 {
            assert!(!sync.sync(&mut surface, &mut camera));
        }
        assert_eq!(surface.reconfigures, 0);
        assert_eq!(camera.aspect, 3.0);
        assert_eq!(camera.projection_matrix(), before);
    }

    #[test]
    fn zero_area_resizes_but_keeps_aspect() {
        let mut sync = SurfaceSync::new();
        let mut surface = FakeSurface::new((0, 0), (640, 480));
        let mut camera = PerspectiveCamera::default();
        assert!(sync.sync(&mut surface, &mut camera));
        assert_eq!(surface.backing, (0, 0));
        assert_eq!(camera.aspect, 2.0);

        // Restored to the size it had before minimising: still fitted.
        surface.display = (640, 480);
        assert!(sync.sync(&mut surface, &mut camera));
        assert!((camera.aspect - 640.0 / 480.0).abs() < 1e-6);
    }
}
