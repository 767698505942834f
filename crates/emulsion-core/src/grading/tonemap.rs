//! Filmic tone mapping (Hable curve).

use crate::params::ToneMappingParams;

/// Apply the filmic curve to one channel value.
///
/// Hable's operator with the D/E/F terms fixed at their film-print values:
/// ```text
/// f(x) = ((x × (A×x + C×B) + D×E) / (x × (A×x + B) + D×F)) − E/F
/// out  = f(x) / f(white_point)
/// ```
/// where A = shoulder, B = linear, C = toe.
fn hable(x: f32, shoulder: f32, linear: f32, toe: f32) -> f32 {
    const D: f32 = 0.2;
    const E: f32 = 0.01;
    const F: f32 = 0.3;
    let a = shoulder;
    let b = linear;
    let c = toe;
    ((x * (a * x + c * b) + D * E) / (x * (a * x + b) + D * F)) - E / F
}

/// Apply filmic tone mapping to an RGB pixel.
///
/// The white point is normalized so `white_point` maps to 1.0. Disabled
/// parameters produce no change.
pub fn apply_tone_map(rgb: [f32; 3], params: &ToneMappingParams) -> [f32; 3] {
    if !params.is_active() {
        return rgb;
    }

    let shoulder = params.shoulder.max(1e-4);
    let linear = params.linear.max(1e-4);
    let toe = params.toe.max(0.0);
    let white = hable(params.white_point.max(1e-3), shoulder, linear, toe).max(1e-6);

    let mut out = [0.0_f32; 3];
    for c in 0..3 {
        out[c] = (hable(rgb[c].max(0.0), shoulder, linear, toe) / white).clamp(0.0, 1.0);
    }
    out
}
