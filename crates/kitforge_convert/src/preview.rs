//! Preview capture
//!
//! The host's preview renderer is asynchronous: it may or may not have an
//! image ready for a freshly saved kit. Capture polls it a bounded number
//! of times, keys out the background color, and writes a PNG next to the
//! kit files. Preview generation is best-effort throughout — a timeout is
//! an absent thumbnail, never a failed item.

use std::io;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use image::{Rgba, RgbaImage};

/// Maximum number of preview polls per kit
pub const PREVIEW_POLL_ATTEMPTS: u32 = 50;

/// Pause between preview polls
pub const PREVIEW_POLL_INTERVAL: Duration = Duration::from_millis(6);

/// Name of the screenshot subdirectory beside the kit files
pub const SCREENSHOT_DIR: &str = "Screenshots";

/// The host preview-rendering service seam
pub trait PreviewSource {
    /// Non-blocking query: the current preview image for the given kit
    /// asset, or `None` if the renderer has not produced one yet
    fn poll_preview(&mut self, kit_path: &Path) -> Option<RgbaImage>;
}

/// A preview source that never yields an image
///
/// Used where no host renderer exists (headless runs); every capture
/// times out and kits are saved without thumbnails.
pub struct NullPreviewSource;

impl PreviewSource for NullPreviewSource {
    fn poll_preview(&mut self, _kit_path: &Path) -> Option<RgbaImage> {
        None
    }
}

/// Recolor every pixel matching the background to fully transparent
///
/// The pixel at (0, 0) is taken as the background color. The keying is an
/// exact-match pass, not edge-aware: interior pixels that happen to match
/// the background are keyed out too, and anti-aliased edge pixels are not.
pub fn key_background(image: &mut RgbaImage) {
    if image.width() == 0 || image.height() == 0 {
        return;
    }

    let background = *image.get_pixel(0, 0);
    for pixel in image.pixels_mut() {
        if *pixel == background {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }
}

/// Poll for a preview of the saved kit and write it as a PNG
///
/// Returns the written screenshot path, or `Ok(None)` when no preview
/// became available within the poll bound.
pub fn capture_preview(
    source: &mut dyn PreviewSource,
    kit_path: &Path,
    shots_dir: &Path,
    name: &str,
) -> Result<Option<PathBuf>, PreviewError> {
    let mut preview = None;
    for _ in 0..PREVIEW_POLL_ATTEMPTS {
        if let Some(image) = source.poll_preview(kit_path) {
            preview = Some(image);
            break;
        }
        thread::sleep(PREVIEW_POLL_INTERVAL);
    }

    // No preview within the bound; the kit stays valid without one.
    let Some(mut image) = preview else {
        return Ok(None);
    };

    key_background(&mut image);

    fs::create_dir_all(shots_dir)?;
    let path = shots_dir.join(format!("{}.png", name));
    image.save(&path)?;
    log::debug!("Wrote screenshot {}", path.display());

    Ok(Some(path))
}

/// Error writing a preview screenshot
#[derive(Debug)]
pub enum PreviewError {
    /// IO error creating the screenshot directory
    Io(io::Error),
    /// Encoding or writing the PNG failed
    Encode(image::ImageError),
}

impl From<io::Error> for PreviewError {
    fn from(e: io::Error) -> Self {
        PreviewError::Io(e)
    }
}

impl From<image::ImageError> for PreviewError {
    fn from(e: image::ImageError) -> Self {
        PreviewError::Encode(e)
    }
}

impl std::fmt::Display for PreviewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreviewError::Io(e) => write!(f, "IO error: {}", e),
            PreviewError::Encode(e) => write!(f, "Encode error: {}", e),
        }
    }
}

impl std::error::Error for PreviewError {}

#[cfg(test)]
mod tests {
    use super::*;

    /// Yields an image only after a configurable number of polls
    struct DelayedPreviewSource {
        polls_until_ready: u32,
        image: RgbaImage,
    }

    impl PreviewSource for DelayedPreviewSource {
        fn poll_preview(&mut self, _kit_path: &Path) -> Option<RgbaImage> {
            if self.polls_until_ready == 0 {
                Some(self.image.clone())
            } else {
                self.polls_until_ready -= 1;
                None
            }
        }
    }

    fn checker_image() -> RgbaImage {
        // 2x2: background gray at (0,0) and (1,1), red elsewhere
        let gray = Rgba([128, 128, 128, 255]);
        let red = Rgba([255, 0, 0, 255]);
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(0, 0, gray);
        img.put_pixel(1, 0, red);
        img.put_pixel(0, 1, red);
        img.put_pixel(1, 1, gray);
        img
    }

    #[test]
    fn test_key_background_exact_match_only() {
        let mut img = checker_image();
        key_background(&mut img);

        // Both gray pixels keyed, including the interior one
        assert_eq!(*img.get_pixel(0, 0), Rgba([0, 0, 0, 0]));
        assert_eq!(*img.get_pixel(1, 1), Rgba([0, 0, 0, 0]));
        // Non-matching pixels untouched
        assert_eq!(*img.get_pixel(1, 0), Rgba([255, 0, 0, 255]));
        assert_eq!(*img.get_pixel(0, 1), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_key_background_empty_image() {
        let mut img = RgbaImage::new(0, 0);
        key_background(&mut img); // must not panic
    }

    #[test]
    fn test_capture_timeout_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let shots = dir.path().join(SCREENSHOT_DIR);

        let result = capture_preview(
            &mut NullPreviewSource,
            Path::new("bench.kit.ron"),
            &shots,
            "bench",
        )
        .unwrap();

        assert!(result.is_none());
        // Nothing written on timeout
        assert!(!shots.exists());
    }

    #[test]
    fn test_capture_writes_png_after_delay() {
        let dir = tempfile::tempdir().unwrap();
        let shots = dir.path().join(SCREENSHOT_DIR);

        let mut source = DelayedPreviewSource {
            polls_until_ready: 3,
            image: checker_image(),
        };

        let written = capture_preview(&mut source, Path::new("bench.kit.ron"), &shots, "bench")
            .unwrap()
            .expect("preview should be captured");

        assert_eq!(written, shots.join("bench.png"));
        assert!(written.exists());

        // Round-trip the PNG and verify the keying was applied
        let reloaded = image::open(&written).unwrap().to_rgba8();
        assert_eq!(*reloaded.get_pixel(0, 0), Rgba([0, 0, 0, 0]));
        assert_eq!(*reloaded.get_pixel(1, 0), Rgba([255, 0, 0, 255]));
    }
}
