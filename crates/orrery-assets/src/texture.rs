//! Decoding image files into RGBA8 pixel buffers.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors returned while loading a texture.
#[derive(Debug, Error)]
pub enum TextureError {
    /// The file could not be read.
    #[error("failed to read texture {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not a supported image.
    #[error("failed to decode texture {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The image decoded but has no pixels.
    #[error("texture {} has zero size ({width}x{height})", path.display())]
    ZeroDimensions {
        path: PathBuf,
        width: u32,
        height: u32,
    },
}

/// A decoded texture owned on the CPU.
///
/// Pixels are row-major RGBA8, `width * height * 4` bytes, top row first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl TextureImage {
    /// Size of one row in bytes.
    pub fn row_bytes(&self) -> usize {
        self.width as usize * 4
    }

    /// RGBA value at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = y as usize * self.row_bytes() + x as usize * 4;
        let px = self.pixels.get(offset..offset + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Load and decode `path` (BMP, PNG or JPEG; detected from the file contents).
pub fn load_texture(path: &Path) -> Result<TextureImage, TextureError> {
    let bytes = std::fs::read(path).map_err(|source| TextureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = image::load_from_memory(&bytes).map_err(|source| TextureError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let rgba = decoded.into_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(TextureError::ZeroDimensions {
            path: path.to_path_buf(),
            width,
            height,
        });
    }

    tracing::debug!("Loaded texture {} ({width}x{height})", path.display());
    Ok(TextureImage {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

/// Like [`load_texture`], but a failure is logged and reported as `None`.
pub fn try_load_texture(path: &Path) -> Option<TextureImage> {
    match load_texture(path) {
        Ok(texture) => Some(texture),
        Err(e) => {
            tracing::warn!("{e}; drawing without texture");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_bmp(path: &Path, width: u32, height: u32) {
        let img = image::RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x * 40) as u8, (y * 40) as u8, 200])
        });
        img.save(path).unwrap();
    }

    #[test]
    fn test_bmp_decodes_to_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("earth.bmp");
        write_bmp(&path, 4, 3);

        let texture = load_texture(&path).unwrap();
        assert_eq!((texture.width, texture.height), (4, 3));
        assert_eq!(texture.pixels.len(), 4 * 3 * 4);
        assert_eq!(texture.pixel(0, 0), Some([0, 0, 200, 255]));
        assert_eq!(texture.pixel(3, 2), Some([120, 80, 200, 255]));
    }

    #[test]
    fn test_png_is_also_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mars.png");
        image::RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 40]))
            .save(&path)
            .unwrap();

        let texture = load_texture(&path).unwrap();
        assert_eq!(texture.pixel(1, 1), Some([10, 20, 30, 40]));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_texture(&dir.path().join("pluto.bmp")).unwrap_err();
        assert!(matches!(err, TextureError::Io { .. }));
        assert!(err.to_string().contains("pluto.bmp"));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("venus.bmp");
        std::fs::write(&path, b"definitely not an image").unwrap();
        assert!(matches!(
            load_texture(&path),
            Err(TextureError::Decode { .. })
        ));
    }

    #[test]
    fn test_try_load_returns_none_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        assert!(try_load_texture(&dir.path().join("missing.bmp")).is_none());
    }

    #[test]
    fn test_pixel_outside_image_is_none() {
        let texture = TextureImage {
            width: 1,
            height: 1,
            pixels: vec![1, 2, 3, 4],
        };
        assert_eq!(texture.pixel(0, 0), Some([1, 2, 3, 4]));
        assert_eq!(texture.pixel(1, 0), None);
        assert_eq!(texture.pixel(0, 1), None);
    }
}
