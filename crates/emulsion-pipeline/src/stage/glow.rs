//! Combined glow stage: bloom, halation, CCD bloom.

use emulsion_core::params::{BloomParams, CcdBloomParams, HalationParams};
use emulsion_core::spatial::glow::{bloom_pass, ccd_bloom_pass, composite_additive, halation_pass};

use crate::error::StageError;
use crate::stage::{AuxiliaryTextures, Stage, check_dims};
use crate::surface::Surface;

/// Runs the active glow extractions and composites them additively in the
/// order bloom → halation → CCD bloom.
///
/// The extractions read only the stage's input, so they are independent of
/// each other and run on scoped worker threads; compositing happens once
/// all extractions have joined. Addition commutes, so the declared order
/// fixes the result regardless of which extraction finishes first.
pub struct GlowStage {
    bloom: BloomParams,
    halation: HalationParams,
    ccd: CcdBloomParams,
}

impl GlowStage {
    pub fn new(bloom: BloomParams, halation: HalationParams, ccd: CcdBloomParams) -> Self {
        Self {
            bloom,
            halation,
            ccd,
        }
    }

    fn run(&self, pixels: &mut [[f32; 4]], width: u32, height: u32) {
        let input: &[[f32; 4]] = pixels;

        let (bloom_buf, halation_buf, ccd_buf) = std::thread::scope(|scope| {
            let bloom = self
                .bloom
                .is_active()
                .then(|| scope.spawn(|| bloom_pass(input, width, height, &self.bloom)));
            let halation = self
                .halation
                .is_active()
                .then(|| scope.spawn(|| halation_pass(input, width, height, &self.halation)));
            let ccd = self
                .ccd
                .is_active()
                .then(|| scope.spawn(|| ccd_bloom_pass(input, width, height, &self.ccd)));

            (
                bloom.map(|h| h.join().expect("bloom pass panicked")),
                halation.map(|h| h.join().expect("halation pass panicked")),
                ccd.map(|h| h.join().expect("ccd bloom pass panicked")),
            )
        });

        if let Some(buf) = bloom_buf {
            composite_additive(pixels, &buf, self.bloom.tint, self.bloom.intensity);
        }
        if let Some(buf) = halation_buf {
            composite_additive(pixels, &buf, self.halation.color, self.halation.intensity);
        }
        if let Some(buf) = ccd_buf {
            composite_additive(pixels, &buf, self.ccd.tint, self.ccd.intensity);
        }
    }
}

impl Stage for GlowStage {
    fn name(&self) -> &'static str {
        "glow"
    }

    fn in_place(&self) -> bool {
        true
    }

    fn apply(
        &self,
        src: &Surface,
        dst: &mut Surface,
        _aux: &AuxiliaryTextures,
    ) -> Result<(), StageError> {
        check_dims(src, dst)?;
        dst.pixels.copy_from_slice(&src.pixels);
        self.run(&mut dst.pixels, dst.width, dst.height);
        Ok(())
    }

    fn apply_in_place(
        &self,
        surface: &mut Surface,
        _aux: &AuxiliaryTextures,
    ) -> Result<(), StageError> {
        let (width, height) = (surface.width, surface.height);
        self.run(&mut surface.pixels, width, height);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emulsion_core::image::PixelFormat;

    fn bright_spot_surface(width: u32, height: u32) -> Surface {
        let mut pixels = vec![[0.1, 0.1, 0.1, 1.0]; (width * height) as usize];
        pixels[(height / 2 * width + width / 2) as usize] = [4.0, 4.0, 4.0, 1.0];
        Surface {
            id: 1,
            width,
            height,
            format: PixelFormat::Rgba32F,
            pixels,
        }
    }

    #[test]
    fn test_bloom_adds_light_near_highlight() {
        let stage = GlowStage::new(
            BloomParams {
                enabled: true,
                intensity: 1.0,
                threshold: 0.8,
                radius: 2.0,
                ..Default::default()
            },
            HalationParams::default(),
            CcdBloomParams::default(),
        );
        let mut s = bright_spot_surface(32, 32);
        let neighbor = (16 * 32 + 14) as usize;
        let before = s.pixels[neighbor][0];
        stage
            .apply_in_place(&mut s, &AuxiliaryTextures::default())
            .unwrap();
        assert!(s.pixels[neighbor][0] > before, "glow should spill outward");
    }

    #[test]
    fn test_halation_shifts_toward_red() {
        let stage = GlowStage::new(
            BloomParams::default(),
            HalationParams {
                enabled: true,
                intensity: 1.0,
                threshold: 0.5,
                radius: 2.0,
                ..Default::default()
            },
            CcdBloomParams::default(),
        );
        let mut s = bright_spot_surface(32, 32);
        let neighbor = (16 * 32 + 15) as usize;
        stage
            .apply_in_place(&mut s, &AuxiliaryTextures::default())
            .unwrap();
        let px = s.pixels[neighbor];
        assert!(px[0] > px[2], "halation glow is red-biased");
    }

    #[test]
    fn test_all_disabled_is_a_copy() {
        let stage = GlowStage::new(
            BloomParams::default(),
            HalationParams::default(),
            CcdBloomParams::default(),
        );
        let mut s = bright_spot_surface(16, 16);
        let before = s.pixels.clone();
        stage
            .apply_in_place(&mut s, &AuxiliaryTextures::default())
            .unwrap();
        assert_eq!(s.pixels, before);
    }
}
