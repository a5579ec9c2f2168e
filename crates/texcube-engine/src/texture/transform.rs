use glam::{DMat3, DVec2, DVec3};

use super::wrap::CLAMP_TO_EDGE_WRAPPING;

/// Sampling parameters of a texture.
///
/// Values are never validated or clamped here; range limits are a concern of
/// whatever edits them.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextureTransform {
    /// Raw wrap code for the horizontal axis (see `WrapMode::from_code`).
    pub wrap_s: f64,
    pub wrap_t: f64,
    pub repeat: DVec2,
    pub offset: DVec2,
    /// Pivot for `rotation`, in UV space.
    pub center: DVec2,
    /// Counter-clockwise, radians.
    pub rotation: f64,
}

impl Default for TextureTransform {
    fn default() -> Self {
        Self {
            wrap_s: CLAMP_TO_EDGE_WRAPPING,
            wrap_t: CLAMP_TO_EDGE_WRAPPING,
            repeat: DVec2::ONE,
            offset: DVec2::ZERO,
            center: DVec2::ZERO,
            rotation: 0.0,
        }
    }
}

impl TextureTransform {
    /// 3x3 matrix applied to mesh UVs before sampling.
    ///
    /// Scales by `repeat` and rotates by `rotation`, both about `center`, then
    /// translates by `offset`.
    pub fn uv_matrix(&self) -> DMat3 {
        let (s, c) = self.rotation.sin_cos();
        let DVec2 { x: rx, y: ry } = self.repeat;
        let DVec2 { x: cx, y: cy } = self.center;
        let DVec2 { x: ox, y: oy } = self.offset;

        DMat3::from_cols(
            DVec3::new(rx * c, -ry * s, 0.0),
            DVec3::new(rx * s, ry * c, 0.0),
            DVec3::new(
                -rx * (c * cx + s * cy) + cx + ox,
                -ry * (-s * cx + c * cy) + cy + oy,
                1.0,
            ),
        )
    }
}
