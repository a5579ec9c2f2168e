use std::path::PathBuf;

use glam::Vec3;
use texcube_engine::scene3d::PerspectiveCamera;
use texcube_engine::window::RuntimeConfig;
use winit::dpi::LogicalSize;

/// Overrides the texture path.
pub const TEXTURE_ENV: &str = "TEXCUBE_TEXTURE";

const DEFAULT_TEXTURE: &str = "image/wall.jpg";

const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

/// Everything the demo needs before the window opens.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub title: String,
    pub window_size: (f64, f64),
    pub texture_path: PathBuf,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub camera_position: Vec3,
    /// Number of cubes. Cube `i` spins at `0.2 + 0.1 * i` rad/s.
    pub mesh_count: usize,
    /// Tried in order for the panel font.
    pub font_paths: Vec<PathBuf>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "texcube".to_string(),
            window_size: (960.0, 540.0),
            texture_path: PathBuf::from(DEFAULT_TEXTURE),
            fov: 75.0,
            aspect: 2.0,
            near: 0.1,
            far: 5.0,
            camera_position: Vec3::new(0.0, 0.0, 2.0),
            mesh_count: 1,
            font_paths: FONT_CANDIDATES.iter().map(PathBuf::from).collect(),
        }
    }
}

impl DemoConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(path) = lookup(TEXTURE_ENV).filter(|p| !p.trim().is_empty()) {
            config.texture_path = PathBuf::from(path);
        }
        config
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.window_size.0, self.window_size.1),
        }
    }

    pub fn camera(&self) -> PerspectiveCamera {
        PerspectiveCamera::new(self.fov, self.aspect, self.near, self.far)
            .with_position(self.camera_position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_scene() {
        let c = DemoConfig::default();
        assert_eq!(c.texture_path, PathBuf::from("image/wall.jpg"));
        assert_eq!(c.mesh_count, 1);
        let cam = c.camera();
        assert_eq!((cam.fov, cam.aspect, cam.near, cam.far), (75.0, 2.0, 0.1, 5.0));
        assert_eq!(cam.position, Vec3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn texture_env_overrides_path() {
        let c = DemoConfig::from_lookup(|k| (k == TEXTURE_ENV).then(|| "assets/brick.png".to_string()));
        assert_eq!(c.texture_path, PathBuf::from("assets/brick.png"));
    }

    #[test]
    fn blank_env_keeps_default() {
        let c = DemoConfig::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(c.texture_path, PathBuf::from(DEFAULT_TEXTURE));
    }

    #[test]
    fn runtime_config_carries_title_and_size() {
        let rc = DemoConfig::default().runtime_config();
        assert_eq!(rc.title, "texcube");
        assert_eq!(rc.initial_size, LogicalSize::new(960.0, 540.0));
    }
}
