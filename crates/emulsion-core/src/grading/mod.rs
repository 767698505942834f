//! Per-pixel color science: sliders, split tone, selective color, skin
//! protection, filmic tone mapping, curves and LUT blending.

pub mod basic;
pub mod hsl;
pub mod selective;
pub mod tonemap;

use crate::lut::Lut3D;
use crate::params::{ColorGradingParams, SkinToneParams, ToneMappingParams};

/// Rec. 709 luminance weights.
pub const LUMA_REC709: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// Apply the complete global tone/color chain to a single RGB pixel.
///
/// Order, fixed by inter-stage dependencies:
/// 1. Exposure
/// 2. White balance (temperature/tint)
/// 3. Contrast
/// 4. Whites/blacks and highlight/shadow recovery
/// 5. Fade and clarity
/// 6. Filmic tone mapping
/// 7. Per-channel tone curves
/// 8. 3D LUT blend
/// 9. Split tone
/// 10. Selective color (skin-masked)
/// 11. Saturation and vibrance (skin-masked)
///
/// `lut` must be present when `params.uses_lut()`; the orchestrator
/// validates that before any pixel is touched.
pub fn grade_pixel(
    rgb: [f32; 3],
    params: &ColorGradingParams,
    skin: &SkinToneParams,
    tone: &ToneMappingParams,
    lut: Option<&Lut3D>,
) -> [f32; 3] {
    let mut px = basic::apply_exposure(rgb, params.exposure);
    px = basic::apply_white_balance(px, params.temperature, params.tint);
    px = basic::apply_contrast(px, params.contrast);
    px = basic::apply_tonal_ranges(
        px,
        params.highlights,
        params.shadows,
        params.whites,
        params.blacks,
    );
    px = basic::apply_fade(px, params.fade);
    px = basic::apply_clarity(px, params.clarity);
    px = tonemap::apply_tone_map(px, tone);

    if !params.curves.is_identity() {
        px = params.curves.apply(px);
    }

    if params.uses_lut()
        && let Some(lut) = lut
    {
        let graded = lut.apply([
            px[0].clamp(0.0, 1.0),
            px[1].clamp(0.0, 1.0),
            px[2].clamp(0.0, 1.0),
        ]);
        let t = params.lut_intensity.clamp(0.0, 1.0);
        for c in 0..3 {
            px[c] = px[c] * (1.0 - t) + graded[c] * t;
        }
    }

    px = selective::apply_split_tone(px, &params.split_tone);

    // The skin mask attenuates the chroma-altering adjustments below it.
    let mask = selective::skin_mask(px, skin);
    px = selective::apply_selective_color(px, &params.selective, mask);
    px = basic::apply_saturation_vibrance(px, params.saturation, params.vibrance, mask);

    px
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_identity_params_pass_pixel_through() {
        let rgb = [0.3, 0.5, 0.7];
        let out = grade_pixel(
            rgb,
            &ColorGradingParams::default(),
            &SkinToneParams::default(),
            &ToneMappingParams::default(),
            None,
        );
        for c in 0..3 {
            assert!((out[c] - rgb[c]).abs() < EPSILON);
        }
    }

    #[test]
    fn test_exposure_brightens_without_hue_shift() {
        let gray = [0.18, 0.18, 0.18];
        let params = ColorGradingParams {
            exposure: 1.0,
            ..Default::default()
        };
        let out = grade_pixel(
            gray,
            &params,
            &SkinToneParams::default(),
            &ToneMappingParams::default(),
            None,
        );
        assert!(out[0] > gray[0]);
        assert!((out[0] - out[1]).abs() < EPSILON);
        assert!((out[1] - out[2]).abs() < EPSILON);
    }

    #[test]
    fn test_lut_blend_interpolates_toward_lut_output() {
        // A LUT that maps everything to 1.0.
        let mut lut = Lut3D::identity(2);
        for entry in &mut lut.data {
            *entry = [1.0, 1.0, 1.0, 1.0];
        }
        let params = ColorGradingParams {
            lut: Some(crate::params::LutRef(0)),
            lut_intensity: 0.5,
            ..Default::default()
        };
        let out = grade_pixel(
            [0.0, 0.0, 0.0],
            &params,
            &SkinToneParams::default(),
            &ToneMappingParams::default(),
            Some(&lut),
        );
        for c in 0..3 {
            assert!((out[c] - 0.5).abs() < EPSILON);
        }
    }
}
