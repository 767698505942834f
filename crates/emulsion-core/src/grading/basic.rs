//! Slider-based global adjustments: exposure, white balance, contrast,
//! tonal-range recovery, fade, clarity, saturation and vibrance.

use crate::grading::LUMA_REC709;
use crate::noise::smoothstep;

/// Apply exposure in photographic stops.
///
/// ```text
/// out = in × 2^exposure
/// ```
///
/// `exposure = 0.0` produces no change.
pub fn apply_exposure(rgb: [f32; 3], exposure: f32) -> [f32; 3] {
    if exposure.abs() < 1e-7 {
        return rgb;
    }
    let gain = exposure.exp2();
    [rgb[0] * gain, rgb[1] * gain, rgb[2] * gain]
}

/// Apply white balance as opposing red/blue (temperature) and
/// green/magenta (tint) gains. Both at 0.0 produce no change.
pub fn apply_white_balance(rgb: [f32; 3], temperature: f32, tint: f32) -> [f32; 3] {
    if temperature.abs() < 1e-7 && tint.abs() < 1e-7 {
        return rgb;
    }
    let t = temperature.clamp(-1.0, 1.0) * 0.25;
    let g = tint.clamp(-1.0, 1.0) * 0.25;
    [
        rgb[0] * (1.0 + t),
        rgb[1] * (1.0 + g),
        rgb[2] * (1.0 - t),
    ]
}

/// Apply contrast as a sigmoid around middle gray.
///
/// ```text
/// out = mix(in, smoothstep-shaped(in), contrast)   for contrast > 0
/// out = mix(in, 0.5, -contrast × 0.5)              for contrast < 0
/// ```
///
/// `contrast = 0.0` produces no change.
pub fn apply_contrast(rgb: [f32; 3], contrast: f32) -> [f32; 3] {
    if contrast.abs() < 1e-7 {
        return rgb;
    }
    let c = contrast.clamp(-1.0, 1.0);
    let mut out = [0.0_f32; 3];
    for ch in 0..3 {
        let v = rgb[ch];
        out[ch] = if c > 0.0 {
            let shaped = smoothstep(v);
            v + (shaped - v) * c
        } else {
            v + (0.5 - v) * (-c * 0.5)
        };
    }
    out
}

/// Apply whites/blacks endpoint adjustments and highlight/shadow recovery.
///
/// Whites/blacks move the mapping endpoints; highlights/shadows act on
/// soft-knee-isolated tonal ranges:
/// ```text
/// shadow_weight    = 1 − smoothstep(in)
/// highlight_weight = smoothstep(in)
/// ```
///
/// All four at 0.0 produce no change.
pub fn apply_tonal_ranges(
    rgb: [f32; 3],
    highlights: f32,
    shadows: f32,
    whites: f32,
    blacks: f32,
) -> [f32; 3] {
    if highlights.abs() < 1e-7
        && shadows.abs() < 1e-7
        && whites.abs() < 1e-7
        && blacks.abs() < 1e-7
    {
        return rgb;
    }

    let white_point = 1.0 + whites.clamp(-1.0, 1.0) * 0.25;
    let black_point = -blacks.clamp(-1.0, 1.0) * 0.25;
    let range = (white_point - black_point).max(1e-4);

    let mut out = [0.0_f32; 3];
    for c in 0..3 {
        let mut v = (rgb[c] - black_point) / range;

        let s = smoothstep(v);
        v += shadows * (1.0 - s) * 0.25;
        v -= highlights * s * 0.25;

        out[c] = v;
    }
    out
}

/// Apply fade: lifts blacks toward a matte floor.
///
/// `fade = 0.0` produces no change.
pub fn apply_fade(rgb: [f32; 3], fade: f32) -> [f32; 3] {
    if fade.abs() < 1e-7 {
        return rgb;
    }
    let floor = fade.clamp(0.0, 1.0) * 0.25;
    let mut out = [0.0_f32; 3];
    for c in 0..3 {
        out[c] = floor + rgb[c] * (1.0 - floor * 0.5);
    }
    out
}

/// Apply clarity as midtone-weighted contrast.
///
/// Weights the contrast boost by distance from the tonal extremes so
/// highlights and deep shadows are left alone. Non-spatial approximation
/// of local contrast.
pub fn apply_clarity(rgb: [f32; 3], clarity: f32) -> [f32; 3] {
    if clarity.abs() < 1e-7 {
        return rgb;
    }
    let c = clarity.clamp(-1.0, 1.0) * 0.5;
    let luma = luminance(rgb);
    // Midtone weight peaks at 0.5 and falls to 0 at the extremes.
    let w = 1.0 - ((luma - 0.5) * 2.0).clamp(-1.0, 1.0).powi(2);
    let shaped = smoothstep(luma);
    let delta = (shaped - luma) * c * w;
    [rgb[0] + delta, rgb[1] + delta, rgb[2] + delta]
}

/// Apply saturation and vibrance.
///
/// Saturation scales chroma uniformly. Vibrance weights the boost toward
/// low-saturation pixels so already-vivid colors do not clip:
/// ```text
/// chroma = rgb − luma
/// vib_weight = 1 − current_saturation
/// out = luma + chroma × (1 + saturation + vibrance × vib_weight × mask)
/// ```
///
/// `mask` attenuates the adjustment inside protected hue bands (skin).
/// Both at 0.0 produce no change.
pub fn apply_saturation_vibrance(
    rgb: [f32; 3],
    saturation: f32,
    vibrance: f32,
    mask: f32,
) -> [f32; 3] {
    if saturation.abs() < 1e-7 && vibrance.abs() < 1e-7 {
        return rgb;
    }

    let luma = luminance(rgb);
    let chroma = [rgb[0] - luma, rgb[1] - luma, rgb[2] - luma];

    let max_c = chroma[0].abs().max(chroma[1].abs()).max(chroma[2].abs());
    let current_sat = (max_c / luma.max(1e-4)).clamp(0.0, 1.0);
    let vib_weight = 1.0 - current_sat;

    let gain = 1.0 + (saturation + vibrance * vib_weight) * mask.clamp(0.0, 1.0);
    let gain = gain.max(0.0);

    [
        luma + chroma[0] * gain,
        luma + chroma[1] * gain,
        luma + chroma[2] * gain,
    ]
}

/// Rec. 709 luminance.
pub fn luminance(rgb: [f32; 3]) -> f32 {
    rgb[0] * LUMA_REC709[0] + rgb[1] * LUMA_REC709[1] + rgb[2] * LUMA_REC709[2]
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_exposure_zero_is_identity() {
        let rgb = [0.3, 0.5, 0.7];
        assert_eq!(apply_exposure(rgb, 0.0), rgb);
    }

    #[test]
    fn test_exposure_one_stop_doubles() {
        let result = apply_exposure([0.25, 0.25, 0.25], 1.0);
        for c in 0..3 {
            assert!((result[c] - 0.5).abs() < EPSILON);
        }
    }

    #[test]
    fn test_exposure_preserves_channel_ratios() {
        let rgb = [0.2, 0.4, 0.1];
        let result = apply_exposure(rgb, 1.0);
        assert!((result[1] / result[0] - 2.0).abs() < 1e-4);
        assert!((result[0] / result[2] - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_white_balance_warm_shifts_red_up_blue_down() {
        let result = apply_white_balance([0.5, 0.5, 0.5], 0.5, 0.0);
        assert!(result[0] > 0.5);
        assert!((result[1] - 0.5).abs() < EPSILON);
        assert!(result[2] < 0.5);
    }

    #[test]
    fn test_contrast_zero_is_identity() {
        let rgb = [0.3, 0.5, 0.7];
        assert_eq!(apply_contrast(rgb, 0.0), rgb);
    }

    #[test]
    fn test_contrast_positive_spreads_around_midgray() {
        let dark = apply_contrast([0.25, 0.25, 0.25], 0.8);
        let bright = apply_contrast([0.75, 0.75, 0.75], 0.8);
        assert!(dark[0] < 0.25);
        assert!(bright[0] > 0.75);
    }

    #[test]
    fn test_contrast_midgray_fixed_point() {
        let result = apply_contrast([0.5, 0.5, 0.5], 0.8);
        for c in 0..3 {
            assert!((result[c] - 0.5).abs() < EPSILON);
        }
    }

    #[test]
    fn test_tonal_ranges_zero_is_identity() {
        let rgb = [0.3, 0.5, 0.7];
        assert_eq!(apply_tonal_ranges(rgb, 0.0, 0.0, 0.0, 0.0), rgb);
    }

    #[test]
    fn test_shadows_lift_darks_more_than_brights() {
        let dark = apply_tonal_ranges([0.1, 0.1, 0.1], 0.0, 1.0, 0.0, 0.0);
        let bright = apply_tonal_ranges([0.9, 0.9, 0.9], 0.0, 1.0, 0.0, 0.0);
        assert!(dark[0] - 0.1 > bright[0] - 0.9);
    }

    #[test]
    fn test_fade_lifts_blacks() {
        let result = apply_fade([0.0, 0.0, 0.0], 1.0);
        assert!(result[0] > 0.0);
    }

    #[test]
    fn test_saturation_negative_one_desaturates_fully() {
        let result = apply_saturation_vibrance([0.8, 0.4, 0.2], -1.0, 0.0, 1.0);
        assert!((result[0] - result[1]).abs() < EPSILON);
        assert!((result[1] - result[2]).abs() < EPSILON);
    }

    #[test]
    fn test_vibrance_boosts_muted_more_than_vivid() {
        let muted = [0.5, 0.45, 0.4];
        let vivid = [0.9, 0.2, 0.1];
        let muted_out = apply_saturation_vibrance(muted, 0.0, 0.5, 1.0);
        let vivid_out = apply_saturation_vibrance(vivid, 0.0, 0.5, 1.0);
        let gain = |before: [f32; 3], after: [f32; 3]| {
            let lb = luminance(before);
            let la = luminance(after);
            ((after[0] - la) / (before[0] - lb).max(1e-6)).abs()
        };
        assert!(gain(muted, muted_out) > gain(vivid, vivid_out));
    }

    #[test]
    fn test_mask_zero_blocks_saturation() {
        let rgb = [0.8, 0.4, 0.2];
        let result = apply_saturation_vibrance(rgb, 1.0, 0.0, 0.0);
        for c in 0..3 {
            assert!((result[c] - rgb[c]).abs() < EPSILON);
        }
    }
}
