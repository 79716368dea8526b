/// Texture image loading
use std::io::ErrorKind;
use std::path::Path;

use crate::error::TextureError;
use crate::resource::read_with_fallback;

/// A decoded image, rows top to bottom, `channels` bytes per pixel.
///
/// Greyscale images keep one channel; images with alpha are widened to RGBA,
/// everything else to RGB.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub pixels: Vec<u8>,
}

impl TextureImage {
    /// Colour of pixel (`x`, `y`) with components in [0, 1], or `None` outside the image.
    pub fn rgb(&self, x: u32, y: u32) -> Option<[f32; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let channels = self.channels as usize;
        let start = (y as usize * self.width as usize + x as usize) * channels;
        let texel = self.pixels.get(start..start + channels)?;
        let level = |b: u8| b as f32 / 255.0;
        Some(match texel {
            [grey] => [level(*grey); 3],
            [r, g, b, ..] => [level(*r), level(*g), level(*b)],
            _ => return None,
        })
    }
}

/// Read an image file, trying `resources/<path>` if `path` is missing.
pub fn load_texture(path: impl AsRef<Path>) -> Result<TextureImage, TextureError> {
    let path = path.as_ref();
    let (bytes, opened) = read_with_fallback(path).map_err(|(failed, e)| match e.kind() {
        ErrorKind::NotFound => TextureError::NotFound(path.to_path_buf()),
        _ => TextureError::Io(failed, e),
    })?;
    decode_texture(&bytes).map_err(|e| TextureError::Decode(opened, e))
}

/// Decode encoded image bytes; the format is guessed from the content.
pub fn decode_texture(bytes: &[u8]) -> image::ImageResult<TextureImage> {
    let decoded = image::load_from_memory(bytes)?;

    let (channels, (width, height), pixels) = match decoded.color().channel_count() {
        1 => {
            let buffer = decoded.into_luma8();
            (1, buffer.dimensions(), buffer.into_raw())
        }
        2 | 4 => {
            let buffer = decoded.into_rgba8();
            (4, buffer.dimensions(), buffer.into_raw())
        }
        _ => {
            let buffer = decoded.into_rgb8();
            (3, buffer.dimensions(), buffer.into_raw())
        }
    };

    Ok(TextureImage {
        width,
        height,
        channels,
        pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GrayImage, ImageFormat, Luma, Rgb, RgbImage};
    use std::fs;
    use std::io::Cursor;
    use std::path::PathBuf;

    fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
        bytes
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("scop-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_decode_non_square_rgb() {
        let image = RgbImage::from_fn(3, 2, |x, y| Rgb([x as u8 * 100, y as u8 * 255, 7]));
        let bytes = encode(DynamicImage::ImageRgb8(image), ImageFormat::Bmp);
        let texture = decode_texture(&bytes).unwrap();

        assert_eq!((texture.width, texture.height, texture.channels), (3, 2, 3));
        assert_eq!(texture.pixels.len(), 3 * 2 * 3);
        // Top-left first
        assert_eq!(&texture.pixels[..3], &[0, 0, 7]);
        assert_eq!(texture.rgb(2, 1), Some([200.0 / 255.0, 1.0, 7.0 / 255.0]));
        assert_eq!(texture.rgb(3, 0), None);
    }

    #[test]
    fn test_decode_greyscale_keeps_one_channel() {
        let image = GrayImage::from_pixel(2, 2, Luma([51]));
        let bytes = encode(DynamicImage::ImageLuma8(image), ImageFormat::Png);
        let texture = decode_texture(&bytes).unwrap();

        assert_eq!(texture.channels, 1);
        assert_eq!(texture.rgb(1, 1), Some([0.2; 3]));
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(decode_texture(b"definitely not an image").is_err());
        assert!(decode_texture(&[]).is_err());
    }

    #[test]
    fn test_load_errors() {
        let missing = temp_path("missing.bmp");
        assert!(matches!(load_texture(&missing), Err(TextureError::NotFound(_))));

        let corrupt = temp_path("corrupt.bmp");
        fs::write(&corrupt, b"BM this is not a bitmap").unwrap();
        let result = load_texture(&corrupt);
        fs::remove_file(&corrupt).unwrap();
        match result {
            Err(TextureError::Decode(path, _)) => assert_eq!(path, corrupt),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_load_from_file() {
        let path = temp_path("tiles.png");
        let image = RgbImage::from_fn(4, 1, |x, _| Rgb([x as u8, 0, 0]));
        fs::write(&path, encode(DynamicImage::ImageRgb8(image), ImageFormat::Png)).unwrap();

        let texture = load_texture(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!((texture.width, texture.height), (4, 1));
        assert_eq!(texture.pixels[9], 3);
    }
}
