//! Black-and-white conversion with chemical toning.

use crate::noise::smoothstep;
use crate::params::{BwParams, ToningMode};

/// Fixed toner colors for the chemical presets, as (shadow, highlight)
/// tint pairs around middle gray.
fn toner_colors(params: &BwParams) -> ([f32; 3], [f32; 3]) {
    match params.toning {
        ToningMode::None => ([0.5; 3], [0.5; 3]),
        ToningMode::Sepia => ([0.44, 0.36, 0.26], [0.62, 0.55, 0.42]),
        ToningMode::Selenium => ([0.42, 0.38, 0.45], [0.56, 0.53, 0.58]),
        ToningMode::Cyanotype => ([0.30, 0.42, 0.58], [0.52, 0.62, 0.72]),
        ToningMode::Split => (
            scale_half(params.split_shadow_color),
            scale_half(params.split_highlight_color),
        ),
        ToningMode::Custom => (
            scale_half(params.custom_color),
            scale_half(params.custom_color),
        ),
    }
}

fn scale_half(color: [f32; 3]) -> [f32; 3] {
    // Tint colors are authored as display colors; center them on gray.
    let luma = (color[0] + color[1] + color[2]) / 3.0;
    [
        0.5 + (color[0] - luma) * 0.5,
        0.5 + (color[1] - luma) * 0.5,
        0.5 + (color[2] - luma) * 0.5,
    ]
}

/// Convert one pixel to the monochrome look.
///
/// Channel-mix weights are normalized before the dot product, then
/// brightness, contrast and gamma shape the gray value, then toning tints
/// it back toward a (possibly split) color.
pub fn bw_pixel(rgb: [f32; 3], params: &BwParams) -> [f32; 3] {
    let w = params.channel_mix;
    let total = (w[0] + w[1] + w[2]).abs().max(1e-4);
    let mut gray =
        (rgb[0] * w[0] + rgb[1] * w[1] + rgb[2] * w[2]) / total;

    gray += params.brightness.clamp(-1.0, 1.0) * 0.25;

    let c = params.contrast.clamp(-1.0, 1.0);
    if c > 0.0 {
        gray += (smoothstep(gray) - gray) * c;
    } else if c < 0.0 {
        gray += (0.5 - gray) * (-c * 0.5);
    }

    let gamma = params.gamma.clamp(0.05, 4.0);
    if (gamma - 1.0).abs() > 1e-6 {
        gray = gray.clamp(0.0, 1.0).powf(1.0 / gamma);
    }
    let gray = gray.clamp(0.0, 1.0);

    if params.toning == ToningMode::None || params.toning_intensity < 1e-6 {
        return [gray, gray, gray];
    }

    let (shadow, highlight) = toner_colors(params);
    let t = smoothstep(gray);
    let intensity = params.toning_intensity.clamp(0.0, 1.0);

    let mut out = [0.0_f32; 3];
    for ch in 0..3 {
        let tint = shadow[ch] * (1.0 - t) + highlight[ch] * t;
        // The tint is centered on 0.5; shift the gray toward it.
        let toned = gray + (tint - 0.5) * 2.0 * gray * (1.0 - gray);
        out[ch] = gray + (toned - gray) * intensity;
    }
    out
}
