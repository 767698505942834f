//! Pointwise color grading stage.

use emulsion_core::grading::grade_pixel;
use emulsion_core::params::{ColorGradingParams, SkinToneParams, ToneMappingParams};

use crate::error::StageError;
use crate::stage::{AuxiliaryTextures, Stage, check_dims};
use crate::surface::Surface;

/// The full grading chain for one pixel: exposure through saturation,
/// with tone mapping, curves, optional LUT, split toning and the
/// skin-masked selective pass in between.
pub struct ColorStage {
    grading: ColorGradingParams,
    skin: SkinToneParams,
    tone: ToneMappingParams,
}

impl ColorStage {
    pub fn new(
        grading: ColorGradingParams,
        skin: SkinToneParams,
        tone: ToneMappingParams,
    ) -> Self {
        Self {
            grading,
            skin,
            tone,
        }
    }

    fn grade_surface(
        &self,
        pixels: &mut [[f32; 4]],
        aux: &AuxiliaryTextures,
    ) -> Result<(), StageError> {
        let lut = if self.grading.uses_lut() {
            match aux.lut.as_deref() {
                Some(lut) => Some(lut),
                None => return Err(StageError::MissingAuxiliary("lut")),
            }
        } else {
            None
        };

        for px in pixels.iter_mut() {
            let graded = grade_pixel(
                [px[0], px[1], px[2]],
                &self.grading,
                &self.skin,
                &self.tone,
                lut,
            );
            px[0] = graded[0];
            px[1] = graded[1];
            px[2] = graded[2];
        }
        Ok(())
    }
}

impl Stage for ColorStage {
    fn name(&self) -> &'static str {
        "color"
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
        self.grade_surface(&mut dst.pixels, aux)
    }

    fn apply_in_place(
        &self,
        surface: &mut Surface,
        aux: &AuxiliaryTextures,
    ) -> Result<(), StageError> {
        self.grade_surface(&mut surface.pixels, aux)
    }
}
