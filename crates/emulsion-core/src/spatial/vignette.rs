//! Radial vignette.

use crate::noise::smoothstep;
use crate::params::VignetteParams;

/// Darken corners in place.
///
/// The radial coordinate is measured from the frame center, optionally
/// aspect-corrected, and shaped by roundness:
/// ```text
/// d = length(mix(|p|, max(|px|, |py|), 1 − roundness))
/// falloff = smoothstep((d − midpoint) / feather)
/// out = rgb × (1 − intensity × falloff)
/// ```
/// Pixels inside the midpoint radius are untouched.
pub fn apply_vignette(pixels: &mut [[f32; 4]], width: u32, height: u32, params: &VignetteParams) {
    if !params.is_active() {
        return;
    }

    let w = width.max(1) as f32;
    let h = height.max(1) as f32;
    let aspect = if params.aspect_correction { w / h } else { 1.0 };
    let intensity = params.intensity.clamp(0.0, 1.0);
    let roundness = params.roundness.clamp(0.0, 1.0);
    let feather = params.feather.clamp(0.01, 1.0);
    let midpoint = params.midpoint.clamp(0.0, 1.0);

    // Normalize so the corner of a round vignette sits at d = 1.
    let corner = (aspect * aspect + 1.0_f32).sqrt();

    for (i, px) in pixels.iter_mut().enumerate() {
        let x = (i as u32 % width) as f32;
        let y = (i as u32 / width) as f32;

        let nx = ((x + 0.5) / w * 2.0 - 1.0) * aspect;
        let ny = (y + 0.5) / h * 2.0 - 1.0;

        let circular = (nx * nx + ny * ny).sqrt();
        let square = nx.abs().max(ny.abs());
        let d = (circular * roundness + square * (1.0 - roundness)) / corner;

        let falloff = smoothstep((d - midpoint) / feather);
        let gain = 1.0 - intensity * falloff;
        for c in 0..3 {
            px[c] *= gain;
        }
    }
}
