//! Hue-targeted adjustments: selective color, split toning, and the
//! skin-tone protection mask.

use crate::grading::hsl::{hsl_to_rgb, hue_distance_deg, rgb_to_hsl};
use crate::noise::smoothstep;
use crate::params::{SelectiveColorSet, SkinToneParams, SplitTone};

/// Per-pixel skin-protection weight in [0, 1].
///
/// 1.0 = unprotected (color adjustments apply fully), approaching
/// `1 − protection` inside the protected hue band. Desaturated pixels are
/// left unprotected since the band is meaningless without chroma.
pub fn skin_mask(rgb: [f32; 3], params: &SkinToneParams) -> f32 {
    if !params.is_active() {
        return 1.0;
    }

    let (hue, sat, _) = rgb_to_hsl(rgb);
    if sat < 1e-4 {
        return 1.0;
    }

    let range = params.hue_range_deg.max(1e-3);
    let dist = hue_distance_deg(hue, params.hue_center_deg);
    // Soft edge: full protection at the center, none past the band edge.
    let band = 1.0 - smoothstep(dist / range);
    1.0 - band * params.protection.clamp(0.0, 1.0)
}

/// Apply all selective-color channels, attenuated by `mask`.
///
/// Channels union additively: each contributes a saturation, luminance and
/// hue delta weighted by the pixel's angular proximity to its target hue.
/// Evaluation is order-independent.
pub fn apply_selective_color(rgb: [f32; 3], set: &SelectiveColorSet, mask: f32) -> [f32; 3] {
    if set.is_empty() || mask < 1e-6 {
        return rgb;
    }

    let (hue, sat, lum) = rgb_to_hsl(rgb);
    if sat < 1e-4 {
        return rgb;
    }

    let mut sat_delta = 0.0_f32;
    let mut lum_delta = 0.0_f32;
    let mut hue_delta = 0.0_f32;

    for channel in set.channels() {
        let target_deg = channel.target_hue.rem_euclid(1.0) * 360.0;
        let range_deg = (channel.range.max(1e-3)) * 360.0;
        let dist = hue_distance_deg(hue, target_deg);
        let weight = 1.0 - smoothstep(dist / range_deg);
        if weight < 1e-6 {
            continue;
        }
        sat_delta += channel.sat_adjust.clamp(-1.0, 1.0) * weight;
        lum_delta += channel.lum_adjust.clamp(-1.0, 1.0) * weight;
        hue_delta += channel.hue_shift.clamp(-0.1, 0.1) * weight;
    }

    if sat_delta.abs() < 1e-6 && lum_delta.abs() < 1e-6 && hue_delta.abs() < 1e-6 {
        return rgb;
    }

    let mask = mask.clamp(0.0, 1.0);
    let out_sat = (sat * (1.0 + sat_delta * mask)).clamp(0.0, 1.0);
    let out_lum = (lum * (1.0 + lum_delta * 0.5 * mask)).clamp(0.0, 1.0);
    let out_hue = (hue + hue_delta * 360.0 * mask).rem_euclid(360.0);

    hsl_to_rgb(out_hue, out_sat, out_lum)
}

/// Apply split toning: independent shadow/highlight tinting.
///
/// ```text
/// highlight_weight = smoothstep(luma shifted by balance)
/// shadow_weight    = 1 − highlight_weight
/// midtone_guard    = midtone_protection damping around luma 0.5
/// ```
pub fn apply_split_tone(rgb: [f32; 3], params: &SplitTone) -> [f32; 3] {
    if params.is_identity() {
        return rgb;
    }

    let luma = super::basic::luminance(rgb);
    let balance = params.balance.clamp(-1.0, 1.0) * 0.25;
    let hw = smoothstep(luma - balance);
    let sw = 1.0 - hw;

    // Damp tinting near middle gray when midtone protection is raised.
    let mid = 1.0 - ((luma - 0.5) * 2.0).abs().clamp(0.0, 1.0);
    let guard = 1.0 - mid * params.midtone_protection.clamp(0.0, 1.0);

    let shadow_tint = hsl_to_rgb(params.shadow_hue.rem_euclid(1.0) * 360.0, 1.0, 0.5);
    let highlight_tint = hsl_to_rgb(params.highlight_hue.rem_euclid(1.0) * 360.0, 1.0, 0.5);

    let s_amt = params.shadow_sat.clamp(0.0, 1.0) * sw * guard * 0.25;
    let h_amt = params.highlight_sat.clamp(0.0, 1.0) * hw * guard * 0.25;

    let mut out = [0.0_f32; 3];
    for c in 0..3 {
        out[c] = rgb[c]
            + (shadow_tint[c] - 0.5) * s_amt
            + (highlight_tint[c] - 0.5) * h_amt;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SelectiveColor;

    const EPSILON: f32 = 1e-5;

    fn red_channel(sat_adjust: f32) -> SelectiveColorSet {
        SelectiveColorSet::from_channels(vec![SelectiveColor {
            target_hue: 0.0,
            range: 0.1,
            sat_adjust,
            lum_adjust: 0.0,
            hue_shift: 0.0,
        }])
        .unwrap()
    }

    #[test]
    fn test_skin_mask_is_one_when_disabled() {
        let params = SkinToneParams::default();
        assert_eq!(skin_mask([0.8, 0.5, 0.3], &params), 1.0);
    }

    #[test]
    fn test_skin_mask_protects_band_center() {
        let params = SkinToneParams {
            hue_center_deg: 25.0,
            hue_range_deg: 30.0,
            protection: 1.0,
            enabled: true,
        };
        // Skin-ish orange vs. deep blue
        let skin = skin_mask([0.8, 0.55, 0.4], &params);
        let blue = skin_mask([0.2, 0.3, 0.9], &params);
        assert!(skin < 0.5, "skin hue should be protected, mask={skin}");
        assert!(blue > 0.99, "blue should be unprotected, mask={blue}");
    }

    #[test]
    fn test_selective_color_empty_set_is_identity() {
        let rgb = [0.7, 0.3, 0.2];
        assert_eq!(
            apply_selective_color(rgb, &SelectiveColorSet::empty(), 1.0),
            rgb
        );
    }

    #[test]
    fn test_selective_color_desaturates_targeted_hue_only() {
        let set = red_channel(-1.0);
        let red = [0.8, 0.2, 0.2];
        let green = [0.2, 0.8, 0.2];

        let red_out = apply_selective_color(red, &set, 1.0);
        let green_out = apply_selective_color(green, &set, 1.0);

        let (_, red_sat, _) = rgb_to_hsl(red_out);
        let (_, red_sat_in, _) = rgb_to_hsl(red);
        assert!(red_sat < red_sat_in);
        for c in 0..3 {
            assert!((green_out[c] - green[c]).abs() < EPSILON);
        }
    }

    #[test]
    fn test_selective_color_respects_mask() {
        let set = red_channel(-1.0);
        let rgb = [0.8, 0.2, 0.2];
        let out = apply_selective_color(rgb, &set, 0.0);
        assert_eq!(out, rgb);
    }

    #[test]
    fn test_split_tone_identity_when_unsaturated() {
        let rgb = [0.3, 0.5, 0.7];
        assert_eq!(apply_split_tone(rgb, &SplitTone::default()), rgb);
    }

    #[test]
    fn test_split_tone_tints_shadows_and_highlights_differently() {
        let params = SplitTone {
            shadow_hue: 0.6, // blue
            shadow_sat: 1.0,
            highlight_hue: 0.1, // orange
            highlight_sat: 1.0,
            balance: 0.0,
            midtone_protection: 0.0,
        };
        let dark = apply_split_tone([0.1, 0.1, 0.1], &params);
        let bright = apply_split_tone([0.9, 0.9, 0.9], &params);
        // Shadows pushed toward blue, highlights toward orange.
        assert!(dark[2] > dark[0], "shadows should gain blue: {dark:?}");
        assert!(bright[0] > bright[2], "highlights should gain red: {bright:?}");
    }
}
