//! Finishing stages: grain, vignette, black-and-white.

use emulsion_core::compose::mono::bw_pixel;
use emulsion_core::params::{BwParams, GrainParams, VignetteParams};
use emulsion_core::spatial::grain::apply_grain;
use emulsion_core::spatial::vignette::apply_vignette;

use crate::error::StageError;
use crate::stage::{AuxiliaryTextures, Stage, check_dims};
use crate::surface::Surface;

/// Seeded film grain.
pub struct GrainStage {
    params: GrainParams,
}

impl GrainStage {
    pub fn new(params: GrainParams) -> Self {
        Self { params }
    }
}

impl Stage for GrainStage {
    fn name(&self) -> &'static str {
        "grain"
    }

    fn in_place(&self) -> bool {
        true
    }

    fn apply(
        &self,
        src: &Surface,
        dst: &mut Surface,
        aux: &AuxiliaryTextures,
    ) -> Result<(), StageError> {
        check_dims(src, dst)?;
        dst.pixels.copy_from_slice(&src.pixels);
        self.apply_in_place(dst, aux)
    }

    fn apply_in_place(
        &self,
        surface: &mut Surface,
        _aux: &AuxiliaryTextures,
    ) -> Result<(), StageError> {
        apply_grain(&mut surface.pixels, surface.width, &self.params);
        Ok(())
    }
}

/// Corner darkening.
pub struct VignetteStage {
    params: VignetteParams,
}

impl VignetteStage {
    pub fn new(params: VignetteParams) -> Self {
        Self { params }
    }
}

impl Stage for VignetteStage {
    fn name(&self) -> &'static str {
        "vignette"
    }

    fn in_place(&self) -> bool {
        true
    }

    fn apply(
        &self,
        src: &Surface,
        dst: &mut Surface,
        aux: &AuxiliaryTextures,
    ) -> Result<(), StageError> {
        check_dims(src, dst)?;
        dst.pixels.copy_from_slice(&src.pixels);
        self.apply_in_place(dst, aux)
    }

    fn apply_in_place(
        &self,
        surface: &mut Surface,
        _aux: &AuxiliaryTextures,
    ) -> Result<(), StageError> {
        let (width, height) = (surface.width, surface.height);
        apply_vignette(&mut surface.pixels, width, height, &self.params);
        Ok(())
    }
}

/// Black-and-white override with its own grain.
///
/// Runs after color and glow so the monochrome conversion sees the fully
/// graded frame; its dedicated grain replaces the color grain look when
/// both are enabled.
pub struct BwStage {
    params: BwParams,
}

impl BwStage {
    pub fn new(params: BwParams) -> Self {
        Self { params }
    }
}

impl Stage for BwStage {
    fn name(&self) -> &'static str {
        "bw"
    }

    fn in_place(&self) -> bool {
        true
    }

    fn apply(
        &self,
        src: &Surface,
        dst: &mut Surface,
        aux: &AuxiliaryTextures,
    ) -> Result<(), StageError> {
        check_dims(src, dst)?;
        dst.pixels.copy_from_slice(&src.pixels);
        self.apply_in_place(dst, aux)
    }

    fn apply_in_place(
        &self,
        surface: &mut Surface,
        _aux: &AuxiliaryTextures,
    ) -> Result<(), StageError> {
        for px in surface.pixels.iter_mut() {
            let mono = bw_pixel([px[0], px[1], px[2]], &self.params);
            px[0] = mono[0];
            px[1] = mono[1];
            px[2] = mono[2];
        }
        apply_grain(&mut surface.pixels, surface.width, &self.params.grain);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emulsion_core::image::PixelFormat;
    use emulsion_core::params::ToningMode;

    fn surface(width: u32, height: u32, fill: [f32; 4]) -> Surface {
        Surface {
            id: 1,
            width,
            height,
            format: PixelFormat::Rgba32F,
            pixels: vec![fill; (width * height) as usize],
        }
    }

    #[test]
    fn test_vignette_darkens_corners_not_center() {
        let stage = VignetteStage::new(VignetteParams {
            enabled: true,
            intensity: 0.8,
            ..Default::default()
        });
        let mut s = surface(100, 100, [1.0, 1.0, 1.0, 1.0]);
        stage
            .apply_in_place(&mut s, &AuxiliaryTextures::default())
            .unwrap();
        let corner = s.pixels[0];
        let center = s.pixels[50 * 100 + 50];
        assert!(corner[0] < center[0]);
        assert!((center[0] - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_bw_without_toning_has_zero_chroma() {
        let stage = BwStage::new(BwParams {
            enabled: true,
            ..Default::default()
        });
        let mut s = surface(8, 8, [0.8, 0.3, 0.1, 1.0]);
        stage
            .apply_in_place(&mut s, &AuxiliaryTextures::default())
            .unwrap();
        let px = s.pixels[0];
        assert!((px[0] - px[1]).abs() < 1e-6);
        assert!((px[1] - px[2]).abs() < 1e-6);
    }

    #[test]
    fn test_sepia_tints_midtones() {
        let stage = BwStage::new(BwParams {
            enabled: true,
            toning: ToningMode::Sepia,
            toning_intensity: 1.0,
            ..Default::default()
        });
        let mut s = surface(8, 8, [0.5, 0.5, 0.5, 1.0]);
        stage
            .apply_in_place(&mut s, &AuxiliaryTextures::default())
            .unwrap();
        let px = s.pixels[0];
        assert!(px[0] > px[2], "sepia is warm: red above blue");
    }

    #[test]
    fn test_grain_is_seed_deterministic() {
        let params = GrainParams {
            enabled: true,
            intensity: 0.8,
            seed: 42,
            ..Default::default()
        };
        let stage = GrainStage::new(params);
        let mut a = surface(16, 16, [0.5, 0.5, 0.5, 1.0]);
        let mut b = surface(16, 16, [0.5, 0.5, 0.5, 1.0]);
        stage
            .apply_in_place(&mut a, &AuxiliaryTextures::default())
            .unwrap();
        stage
            .apply_in_place(&mut b, &AuxiliaryTextures::default())
            .unwrap();
        assert_eq!(a.pixels, b.pixels);
    }
}
