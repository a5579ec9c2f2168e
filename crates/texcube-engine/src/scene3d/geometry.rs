use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Indexed triangle list, counter-clockwise front faces.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u16>,
}

impl Geometry {
    /// Axis-aligned box centred on the origin.
    ///
    /// Every face has its own four vertices so each one maps the full
    /// `[0, 1]` UV square, `v = 1` at the face's top edge. Faces are emitted
    /// in the order +X, -X, +Y, -Y, +Z, -Z.
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let mut g = Geometry {
            vertices: Vec::with_capacity(24),
            indices: Vec::with_capacity(36),
        };

        // (u axis, v axis, normal axis, u dir, v dir, face width, face height, signed depth)
        let faces: [(usize, usize, usize, f32, f32, f32, f32, f32); 6] = [
            (2, 1, 0, -1.0, -1.0, depth, height, width),
            (2, 1, 0, 1.0, -1.0, depth, height, -width),
            (0, 2, 1, 1.0, 1.0, width, depth, height),
            (0, 2, 1, 1.0, -1.0, width, depth, -height),
            (0, 1, 2, 1.0, -1.0, width, height, depth),
            (0, 1, 2, -1.0, -1.0, width, height, -depth),
        ];
        for (u, v, w, udir, vdir, fw, fh, fd) in faces {
            g.push_face(u, v, w, udir, vdir, fw, fh, fd);
        }
        g
    }

    #[allow(clippy::too_many_arguments)]
    fn push_face(&mut self, u: usize, v: usize, w: usize, udir: f32, vdir: f32, fw: f32, fh: f32, fd: f32) {
        let base = self.vertices.len() as u16;

        for iy in 0..2u16 {
            for ix in 0..2u16 {
                let mut p = [0.0f32; 3];
                p[u] = (ix as f32 - 0.5) * fw * udir;
                p[v] = (iy as f32 - 0.5) * fh * vdir;
                p[w] = fd * 0.5;
                self.vertices.push(MeshVertex {
                    position: p,
                    uv: [ix as f32, 1.0 - iy as f32],
                });
            }
        }

        // a b / d c on the 2x2 grid.
        let (a, b, c, d) = (base, base + 2, base + 3, base + 1);
        self.indices.extend_from_slice(&[a, b, d, b, c, d]);
    }
}
