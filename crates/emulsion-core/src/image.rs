//! Image representation for the film-emulation pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported texel formats for source and target surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PixelFormat {
    /// 8-bit unsigned normalized RGBA.
    Rgba8,
    /// 16-bit float RGBA.
    Rgba16F,
    /// 32-bit float RGBA. Working format of every intermediate surface.
    Rgba32F,
}

impl PixelFormat {
    /// Bytes per texel in the caller-facing encoding.
    pub const fn bytes_per_texel(&self) -> u32 {
        match self {
            Self::Rgba8 => 4,
            Self::Rgba16F => 8,
            Self::Rgba32F => 16,
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgba8 => write!(f, "RGBA8"),
            Self::Rgba16F => write!(f, "RGBA16F"),
            Self::Rgba32F => write!(f, "RGBA32F"),
        }
    }
}

/// Caller-owned image buffer. Always stored as RGBA f32 internally;
/// `source_format` records the encoding the pixels came from.
#[derive(Debug, Clone)]
pub struct FilmImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Pixel data in RGBA f32 format, row-major.
    pub pixels: Vec<[f32; 4]>,
    /// Format of the source the pixels were decoded from.
    pub source_format: PixelFormat,
}

impl FilmImage {
    /// Create an image filled with a constant color.
    pub fn filled(width: u32, height: u32, color: [f32; 4]) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; (width as usize) * (height as usize)],
            source_format: PixelFormat::Rgba32F,
        }
    }

    /// Pixel at (x, y). Coordinates are clamped to the image bounds.
    pub fn texel(&self, x: u32, y: u32) -> [f32; 4] {
        let x = x.min(self.width.saturating_sub(1)) as usize;
        let y = y.min(self.height.saturating_sub(1)) as usize;
        self.pixels[y * self.width as usize + x]
    }

    /// Bilinear sample at normalized coordinates (u, v) in [0, 1].
    /// Out-of-range coordinates clamp to the edge texel.
    pub fn sample(&self, u: f32, v: f32) -> [f32; 4] {
        let fx = (u.clamp(0.0, 1.0) * (self.width - 1) as f32).max(0.0);
        let fy = (v.clamp(0.0, 1.0) * (self.height - 1) as f32).max(0.0);
        let x0 = fx.floor() as u32;
        let y0 = fy.floor() as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);
        let tx = fx - x0 as f32;
        let ty = fy - y0 as f32;

        let p00 = self.texel(x0, y0);
        let p10 = self.texel(x1, y0);
        let p01 = self.texel(x0, y1);
        let p11 = self.texel(x1, y1);

        let mut out = [0.0_f32; 4];
        for c in 0..4 {
            let top = p00[c] * (1.0 - tx) + p10[c] * tx;
            let bottom = p01[c] * (1.0 - tx) + p11[c] * tx;
            out[c] = top * (1.0 - ty) + bottom * ty;
        }
        out
    }
}
