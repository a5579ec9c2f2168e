use std::fmt;
use std::path::{Path, PathBuf};

/// Decoded RGBA8 pixels, rows bottom-up.
///
/// Rows are flipped on decode so that `v = 0` addresses the bottom edge of the
/// picture, matching the UV layout of the box geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl TextureImage {
    /// A `width` x `height` image filled with one color.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = rgba
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self { width, height, pixels }
    }

    pub fn bytes_per_row(&self) -> u32 {
        self.width * 4
    }

    /// Whether both sides are at most `max_dimension` texels.
    pub fn fits_within(&self, max_dimension: u32) -> bool {
        self.width <= max_dimension && self.height <= max_dimension
    }
}

/// Image file could not be read or decoded.
#[derive(Debug, Clone)]
pub struct TextureLoadError {
    pub path: PathBuf,
    pub reason: String,
}

impl fmt::Display for TextureLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to load texture {}: {}", self.path.display(), self.reason)
    }
}

impl std::error::Error for TextureLoadError {}

/// Reads and decodes an image file into bottom-up RGBA8.
pub fn decode_file(path: &Path) -> Result<TextureImage, TextureLoadError> {
    let decoded = ::image::open(path).map_err(|e| TextureLoadError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let rgba = decoded.flipv().to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(TextureLoadError {
            path: path.to_path_buf(),
            reason: "image has no pixels".to_string(),
        });
    }

    Ok(TextureImage {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_fills_every_pixel() {
        let img = TextureImage::solid(2, 3, [1, 2, 3, 4]);
        assert_eq!(img.pixels.len(), 24);
        assert!(img.pixels.chunks(4).all(|p| p == [1, 2, 3, 4]));
        assert_eq!(img.bytes_per_row(), 8);
    }

    #[test]
    fn fits_within_checks_both_sides() {
        let wide = TextureImage::solid(20, 1, [0; 4]);
        assert!(wide.fits_within(20));
        assert!(!wide.fits_within(19));
        assert!(!TextureImage::solid(1, 9, [0; 4]).fits_within(8));
    }

    #[test]
    fn missing_file_reports_path() {
        let path = Path::new("definitely/not/here.png");
        let err = decode_file(path).unwrap_err();
        assert_eq!(err.path, path);
        assert!(err.to_string().contains("not/here.png"));
    }

    #[test]
    fn decoded_rows_are_bottom_up() {
        let mut src = ::image::RgbaImage::new(1, 2);
        src.put_pixel(0, 0, ::image::Rgba([255, 0, 0, 255]));
        src.put_pixel(0, 1, ::image::Rgba([0, 0, 255, 255]));

        let path = std::env::temp_dir().join(format!("texcube-decode-{}.png", std::process::id()));
        src.save(&path).unwrap();
        let img = decode_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!((img.width, img.height), (1, 2));
        // Bottom row (blue) comes first.
        assert_eq!(&img.pixels[0..4], &[0, 0, 255, 255]);
        assert_eq!(&img.pixels[4..8], &[255, 0, 0, 255]);
    }
}
