//! Pooled intermediate surfaces.

use emulsion_core::image::{FilmImage, PixelFormat};

/// One intermediate render surface, always RGBA f32.
///
/// Ownership of a `Surface` is the aliasing guarantee: a surface handed to
/// a stage as output is moved out of the pool's free list and cannot be
/// observed as any other stage's input until it is released back.
#[derive(Debug)]
pub struct Surface {
    pub(crate) id: u64,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Texel format tag used for pool reuse matching.
    pub format: PixelFormat,
    /// Pixel storage, row-major RGBA.
    pub pixels: Vec<[f32; 4]>,
}

impl Surface {
    /// Unique id of this surface within its pool.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Copy an image's pixels into this surface. Sizes must already match.
    pub fn copy_from_image(&mut self, image: &FilmImage) {
        debug_assert_eq!(self.pixels.len(), image.pixels.len());
        self.pixels.copy_from_slice(&image.pixels);
    }
}
