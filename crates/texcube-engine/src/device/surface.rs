use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::{Gpu, RenderSurface};

pub(crate) fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    let first = caps.formats.first().copied()?;
    if prefer_srgb {
        if let Some(f) = caps.formats.iter().copied().find(|f| f.is_srgb()) {
            return Some(f);
        }
    }
    Some(first)
}

pub(crate) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// A window paired with its GPU surface.
///
/// Display size is what the window currently shows; backing size is what the
/// swapchain was last configured to.
pub struct WindowSurface<'a, 'w> {
    window: &'a Window,
    gpu: &'a mut Gpu<'w>,
}

impl<'a, 'w> WindowSurface<'a, 'w> {
    pub fn new(window: &'a Window, gpu: &'a mut Gpu<'w>) -> Self {
        Self { window, gpu }
    }
}

impl RenderSurface for WindowSurface<'_, '_> {
    fn display_size(&self) -> (u32, u32) {
        let s = self.window.inner_size();
        (s.width, s.height)
    }

    fn backing_size(&self) -> (u32, u32) {
        let s = self.gpu.size();
        (s.width, s.height)
    }

    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.gpu.resize(PhysicalSize::new(width, height));
    }
}
