use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};

use super::decode::{decode_file, TextureImage, TextureLoadError};
use super::transform::TextureTransform;

type LoadResult = Result<TextureImage, TextureLoadError>;

/// A texture as the rest of the program sees it.
///
/// `transform` is read fresh by the renderer every frame, except for the wrap
/// codes: those become sampler state and only take effect after
/// `mark_needs_update()`. A freshly arrived image bumps the version on its own.
#[derive(Debug)]
pub struct Texture {
    pub transform: TextureTransform,
    image: Option<TextureImage>,
    version: u64,
    source: Option<PathBuf>,
    pending: Option<Receiver<LoadResult>>,
}

impl Texture {
    /// A texture with no image; renderers substitute a placeholder.
    pub fn empty() -> Self {
        Self {
            transform: TextureTransform::default(),
            image: None,
            version: 0,
            source: None,
            pending: None,
        }
    }

    /// Starts decoding `path` on a worker thread and returns immediately.
    ///
    /// The image shows up after a later `poll_load()` picks it up.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (tx, rx) = mpsc::channel();
        let worker_path = path.clone();

        let spawned = std::thread::Builder::new()
            .name("texture-decode".to_string())
            .spawn(move || {
                // The receiver may be gone if the texture was dropped first.
                let _ = tx.send(decode_file(&worker_path));
            });

        let pending = match spawned {
            Ok(_) => {
                log::debug!("decoding {} in the background", path.display());
                Some(rx)
            }
            Err(e) => {
                log::warn!("could not start texture decode thread: {e}");
                None
            }
        };

        Self {
            source: Some(path),
            pending,
            ..Self::empty()
        }
    }

    /// Picks up a finished background decode.
    ///
    /// Returns `true` when a new image was installed. Decode failures are
    /// logged and leave the texture without an image.
    pub fn poll_load(&mut self) -> bool {
        let Some(rx) = self.pending.as_ref() else {
            return false;
        };

        match rx.try_recv() {
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                log::warn!("texture decode worker exited without a result");
                self.pending = None;
                false
            }
            Ok(Err(e)) => {
                log::warn!("{e}");
                self.pending = None;
                false
            }
            Ok(Ok(image)) => {
                let name = self.source().map(|p| p.display().to_string()).unwrap_or_default();
                log::info!("texture loaded: {name} ({}x{})", image.width, image.height);
                self.pending = None;
                self.set_image(image);
                true
            }
        }
    }

    pub fn set_image(&mut self, image: TextureImage) {
        self.image = Some(image);
        self.mark_needs_update();
    }

    #[cfg(test)]
    fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn image(&self) -> Option<&TextureImage> {
        self.image.as_ref()
    }

    /// Path passed to `load`, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Monotonic counter; changes whenever GPU-side state must be rebuilt.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Flags the texture for re-upload and sampler rebuild.
    pub fn mark_needs_update(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}

impl Default for Texture {
    fn default() -> Self {
        Self::empty()
    }
}
