//! Seeded film grain.

use crate::grading::basic::luminance;
use crate::noise::value_noise;
use crate::params::GrainParams;

/// Add grain to the frame in place.
///
/// Noise is sampled from a deterministic lattice hash, so identical
/// (seed, snapshot, input) triples produce bit-identical output. Grain
/// amplitude is weighted by a midtone visibility curve (film grain shows
/// most in midtones, barely at all in crushed blacks and blown whites)
/// and by the per-channel intensities.
pub fn apply_grain(pixels: &mut [[f32; 4]], width: u32, params: &GrainParams) {
    if !params.is_active() {
        return;
    }

    let gain = params.intensity.clamp(0.0, 1.0) * 0.25;
    let size = params.size.max(1.0);
    let softness = params.softness.clamp(0.0, 1.0);
    let w = width.max(1);

    for (i, px) in pixels.iter_mut().enumerate() {
        let x = (i as u32 % w) as f32;
        let y = (i as u32 / w) as f32;

        let luma = luminance([px[0], px[1], px[2]]).clamp(0.0, 1.0);
        let visibility = 1.0 - (2.0 * luma - 1.0).powi(2) * 0.75;

        for c in 0..3 {
            // Channel-decorrelated noise via per-channel seed offsets.
            let n = value_noise(x, y, size, softness, params.seed.wrapping_add(c as u32 * 7919));
            let amp = gain * params.channel_intensity[c].clamp(0.0, 4.0) * visibility;
            px[c] = (px[c] + n * amp).max(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grain(seed: u32) -> GrainParams {
        GrainParams {
            intensity: 0.5,
            seed,
            enabled: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_inactive_grain_is_noop() {
        let mut pixels = vec![[0.5, 0.5, 0.5, 1.0]; 16];
        let before = pixels.clone();
        apply_grain(&mut pixels, 4, &GrainParams::default());
        assert_eq!(pixels, before);
    }

    #[test]
    fn test_grain_is_bit_reproducible_for_same_seed() {
        let mut a = vec![[0.5, 0.5, 0.5, 1.0]; 64];
        let mut b = a.clone();
        apply_grain(&mut a, 8, &grain(77));
        apply_grain(&mut b, 8, &grain(77));
        for (pa, pb) in a.iter().zip(b.iter()) {
            for c in 0..4 {
                assert_eq!(pa[c].to_bits(), pb[c].to_bits());
            }
        }
    }

    #[test]
    fn test_different_seeds_produce_different_grain() {
        let mut a = vec![[0.5, 0.5, 0.5, 1.0]; 64];
        let mut b = a.clone();
        apply_grain(&mut a, 8, &grain(1));
        apply_grain(&mut b, 8, &grain(2));
        assert_ne!(a, b);
    }

    #[test]
    fn test_grain_perturbs_midtones() {
        let mut pixels = vec![[0.5, 0.5, 0.5, 1.0]; 256];
        apply_grain(&mut pixels, 16, &grain(5));
        let changed = pixels.iter().filter(|p| (p[0] - 0.5).abs() > 1e-6).count();
        assert!(changed > 128, "grain should touch most midtone pixels");
    }

    #[test]
    fn test_grain_leaves_alpha_untouched() {
        let mut pixels = vec![[0.5, 0.5, 0.5, 0.7]; 64];
        apply_grain(&mut pixels, 8, &grain(3));
        for px in &pixels {
            assert_eq!(px[3], 0.7);
        }
    }
}
