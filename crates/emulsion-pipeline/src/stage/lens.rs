//! Geometric rectification stage.

use emulsion_core::params::LensDistortionParams;
use emulsion_core::spatial::optics::apply_lens_distortion;

use crate::error::StageError;
use crate::stage::{AuxiliaryTextures, Stage, check_dims};
use crate::surface::Surface;

/// Barrel/pincushion distortion with chromatic aberration.
///
/// Resamples the source with bilinear taps, so it always needs a
/// destination surface distinct from its input.
pub struct LensStage {
    params: LensDistortionParams,
}

impl LensStage {
    pub fn new(params: LensDistortionParams) -> Self {
        Self { params }
    }
}

impl Stage for LensStage {
    fn name(&self) -> &'static str {
        "lens"
    }

    fn apply(
        &self,
        src: &Surface,
        dst: &mut Surface,
        _aux: &AuxiliaryTextures,
    ) -> Result<(), StageError> {
        check_dims(src, dst)?;
        apply_lens_distortion(
            &src.pixels,
            src.width,
            src.height,
            &mut dst.pixels,
            &self.params,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emulsion_core::image::PixelFormat;

    fn surface(id: u64, width: u32, height: u32) -> Surface {
        Surface {
            id,
            width,
            height,
            format: PixelFormat::Rgba32F,
            pixels: vec![[0.5, 0.5, 0.5, 1.0]; (width * height) as usize],
        }
    }

    #[test]
    fn test_dimension_mismatch_is_rejected() {
        let stage = LensStage::new(LensDistortionParams {
            enabled: true,
            k1: 0.2,
            ..Default::default()
        });
        let src = surface(1, 16, 16);
        let mut dst = surface(2, 16, 8);
        let err = stage.apply(&src, &mut dst, &AuxiliaryTextures::default());
        assert!(matches!(err, Err(StageError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_flat_field_survives_distortion_interior() {
        let stage = LensStage::new(LensDistortionParams {
            enabled: true,
            k1: 0.1,
            ..Default::default()
        });
        let src = surface(1, 32, 32);
        let mut dst = surface(2, 32, 32);
        stage
            .apply(&src, &mut dst, &AuxiliaryTextures::default())
            .unwrap();
        // Center pixel resamples from inside the flat field.
        let center = dst.pixels[16 * 32 + 16];
        assert!((center[0] - 0.5).abs() < 1e-4);
    }
}
