use std::fmt;
use std::path::{Path, PathBuf};

use fontdue::layout::{CoordinateSystem, GlyphPosition, Layout, LayoutSettings, TextStyle};

use crate::coords::Vec2;

/// A font file could not be read or parsed.
#[derive(Debug, Clone)]
pub struct FontLoadError {
    pub path: Option<PathBuf>,
    pub reason: String,
}

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(p) => write!(f, "failed to load font {}: {}", p.display(), self.reason),
            None => write!(f, "failed to load font: {}", self.reason),
        }
    }
}

impl std::error::Error for FontLoadError {}

/// Handle to a font inside a `FontSystem`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Loaded fonts. Owned by the application and lent to the text renderer.
#[derive(Default)]
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default()).map_err(|e| {
            FontLoadError {
                path: None,
                reason: e.to_string(),
            }
        })?;
        self.fonts.push(font);
        Ok(FontId(self.fonts.len() - 1))
    }

    pub fn load_font_file(&mut self, path: &Path) -> Result<FontId, FontLoadError> {
        let bytes = std::fs::read(path).map_err(|e| FontLoadError {
            path: Some(path.to_path_buf()),
            reason: e.to_string(),
        })?;
        self.load_font(&bytes).map_err(|e| FontLoadError {
            path: Some(path.to_path_buf()),
            ..e
        })
    }

    /// Loads the first candidate that exists and parses.
    pub fn load_first_available<P: AsRef<Path>>(&mut self, candidates: &[P]) -> Option<FontId> {
        for path in candidates.iter().map(AsRef::as_ref) {
            if !path.exists() {
                continue;
            }
            match self.load_font_file(path) {
                Ok(id) => {
                    log::info!("font: {}", path.display());
                    return Some(id);
                }
                Err(e) => log::warn!("{e}"),
            }
        }
        None
    }

    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    /// Size of `text` laid out on one line at `size` logical pixels.
    ///
    /// Unknown fonts measure as zero width with a nominal line height.
    pub fn measure_text(&self, text: &str, id: FontId, size: f32) -> Vec2 {
        let Some(font) = self.get(id) else {
            return Vec2::new(0.0, line_height(size));
        };
        let mut layout = Layout::new(CoordinateSystem::PositiveYDown);
        layout_line(&mut layout, font, text, size, Vec2::ZERO);

        let width = layout
            .glyphs()
            .iter()
            .map(|g| g.x + font.metrics_indexed(g.key.glyph_index, size).advance_width)
            .fold(0.0f32, f32::max);
        Vec2::new(width, line_height(size))
    }
}

#[inline]
pub(crate) fn line_height(size: f32) -> f32 {
    (size * 1.25).ceil()
}

/// Lays `text` out on a single line starting at `origin` and returns the
/// positioned glyphs. Shared by measurement and rendering so both agree.
pub(crate) fn layout_line<'l>(
    layout: &'l mut Layout<()>,
    font: &fontdue::Font,
    text: &str,
    size: f32,
    origin: Vec2,
) -> &'l [GlyphPosition<()>] {
    layout.reset(&LayoutSettings {
        x: origin.x,
        y: origin.y,
        max_width: None,
        ..LayoutSettings::default()
    });
    layout.append(&[font], &TextStyle::new(text, size, 0));
    layout.glyphs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_fail_to_parse() {
        let mut fs = FontSystem::new();
        let err = fs.load_font(b"not a font").unwrap_err();
        assert!(err.path.is_none());
    }

    #[test]
    fn missing_file_carries_path() {
        let mut fs = FontSystem::new();
        let err = fs.load_font_file(Path::new("/no/such/font.ttf")).unwrap_err();
        assert_eq!(err.path.as_deref(), Some(Path::new("/no/such/font.ttf")));
        assert!(err.to_string().contains("/no/such/font.ttf"));
    }

    #[test]
    fn no_candidates_found() {
        let mut fs = FontSystem::new();
        assert!(fs.load_first_available(&["/no/such/a.ttf", "/no/such/b.ttf"]).is_none());
    }

    #[test]
    fn unknown_font_measures_empty() {
        let fs = FontSystem::new();
        let m = fs.measure_text("hello", FontId(3), 16.0);
        assert_eq!(m.x, 0.0);
        assert_eq!(m.y, line_height(16.0));
    }
}
