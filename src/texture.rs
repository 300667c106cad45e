//! Particle sprite texture.
//!
//! The sprite is used twice by the point shader: its rgb tints the vertex
//! colour, and its green channel acts as an alpha map (a white-on-black
//! sprite image needs no alpha channel). When no image is configured,
//! [`SpriteTexture::soft_disc`] generates a radial falloff that reads the
//! same way.

use std::path::Path;

use crate::error::TextureError;

/// RGBA8 pixel data for the particle sprite.
#[derive(Debug, Clone)]
pub struct SpriteTexture {
    /// Raw RGBA pixel data (width * height * 4 bytes).
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl SpriteTexture {
    /// Wrap raw RGBA data.
    ///
    /// # Panics
    ///
    /// Panics if `data` is not exactly `width * height * 4` bytes.
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> Self {
        assert_eq!(
            data.len(),
            (width * height * 4) as usize,
            "RGBA data size mismatch"
        );
        Self { data, width, height }
    }

    /// Decode an image file (PNG or JPEG) into RGBA8.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let img = image::open(path)
            .map_err(|source| TextureError::ImageLoad {
                path: path.to_path_buf(),
                source,
            })?
            .into_rgba8();
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(TextureError::Empty(path.to_path_buf()));
        }
        Ok(Self {
            data: img.into_raw(),
            width,
            height,
        })
    }

    /// White disc fading to black at the edge, `size` x `size` pixels.
    pub fn soft_disc(size: u32) -> Self {
        let size = size.max(1);
        let half = size as f32 / 2.0;
        let mut data = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let dx = (x as f32 + 0.5 - half) / half;
                let dy = (y as f32 + 0.5 - half) / half;
                let d = (dx * dx + dy * dy).sqrt();
                let falloff = (1.0 - d).clamp(0.0, 1.0);
                // Squared for a brighter core and softer rim.
                let v = (falloff * falloff * 255.0).round() as u8;
                data.extend_from_slice(&[v, v, v, 255]);
            }
        }
        Self::from_rgba(data, size, size)
    }

    /// Load `path` if given, otherwise fall back to a generated disc.
    ///
    /// A file that fails to load is logged and replaced by the disc so a bad
    /// path never prevents the viewer from starting.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path {
            Some(path) => match Self::from_file(path) {
                Ok(tex) => {
                    log::info!(
                        "loaded particle sprite {} ({}x{})",
                        path.display(),
                        tex.width,
                        tex.height
                    );
                    tex
                }
                Err(e) => {
                    log::warn!("{e}; falling back to generated sprite");
                    Self::soft_disc(64)
                }
            },
            None => Self::soft_disc(64),
        }
    }

    /// Green channel at pixel `(x, y)`.
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        self.data[((y * self.width + x) * 4 + 1) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soft_disc_is_bright_centre_dark_corner() {
        let tex = SpriteTexture::soft_disc(32);
        assert_eq!(tex.data.len(), 32 * 32 * 4);
        assert!(tex.alpha_at(16, 16) > 200);
        assert_eq!(tex.alpha_at(0, 0), 0);
        assert_eq!(tex.alpha_at(31, 31), 0);
    }

    #[test]
    fn test_soft_disc_zero_size_clamps_to_one_pixel() {
        let tex = SpriteTexture::soft_disc(0);
        assert_eq!((tex.width, tex.height), (1, 1));
    }

    #[test]
    #[should_panic(expected = "RGBA data size mismatch")]
    fn test_from_rgba_checks_size() {
        SpriteTexture::from_rgba(vec![0; 7], 1, 2);
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = SpriteTexture::from_file("no/such/sprite.png").unwrap_err();
        assert!(matches!(err, TextureError::ImageLoad { .. }));
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let tex = SpriteTexture::load_or_default(Some(Path::new("no/such/sprite.png")));
        assert_eq!((tex.width, tex.height), (64, 64));
    }

    #[test]
    fn test_png_round_trip_through_file() {
        let path = std::env::temp_dir().join(format!("wavefield-sprite-{}.png", std::process::id()));
        let img = image::RgbaImage::from_fn(4, 2, |x, _| image::Rgba([0, (x * 60) as u8, 0, 255]));
        img.save(&path).unwrap();

        let tex = SpriteTexture::from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!((tex.width, tex.height), (4, 2));
        assert_eq!(tex.alpha_at(3, 1), 180);
    }
}
