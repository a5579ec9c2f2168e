use std::cell::RefCell;
use std::rc::Rc;

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::texture::Texture;

use super::Geometry;

/// Position, XYZ Euler rotation (radians) and scale.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Model matrix: scale, then rotate X, Y, Z (intrinsic), then translate.
    pub fn matrix(&self) -> Mat4 {
        let r = self.rotation;
        Mat4::from_scale_rotation_translation(
            self.scale,
            Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z),
            self.position,
        )
    }
}

/// Geometry drawn with a shared texture.
#[derive(Debug)]
pub struct Mesh {
    pub geometry: Geometry,
    pub texture: Rc<RefCell<Texture>>,
    pub transform: Transform,
}

impl Mesh {
    pub fn new(geometry: Geometry, texture: Rc<RefCell<Texture>>) -> Self {
        Self {
            geometry,
            texture,
            transform: Transform::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn identity_by_default() {
        assert!(Transform::default().matrix().abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn euler_xyz_applies_z_first_to_points() {
        // Rx(90) * Ry(90) * Rz(0): +Z goes to +X under Ry, which Rx leaves alone.
        let t = Transform {
            rotation: Vec3::new(FRAC_PI_2, FRAC_PI_2, 0.0),
            ..Default::default()
        };
        let p = t.matrix().transform_point3(Vec3::Z);
        assert!(p.abs_diff_eq(Vec3::X, 1e-5), "{p:?}");
    }

    #[test]
    fn translation_comes_last() {
        let t = Transform {
            position: Vec3::new(1.0, 2.0, 3.0),
            scale: Vec3::splat(2.0),
            ..Default::default()
        };
        let p = t.matrix().transform_point3(Vec3::ONE);
        assert!(p.abs_diff_eq(Vec3::new(3.0, 4.0, 5.0), 1e-6));
    }
}
