//! Frame-space compositing overlays: flash, light leak and the instant
//! border. These never re-read original pixel values, so they are safe to
//! apply in place.

use crate::noise::{hash3, smoothstep, value_noise};
use crate::params::{FlashParams, InstantFrameParams, LeakBlendMode, LightLeakParams};

/// Composite a radial additive flash in place.
///
/// ```text
/// d = distance from center (aspect-corrected)
/// light = intensity × (1 − d)^falloff
/// out = rgb + light × warm_color + shadow_lift × light × (1 − rgb)
/// ```
pub fn apply_flash(pixels: &mut [[f32; 4]], width: u32, height: u32, params: &FlashParams) {
    if !params.is_active() {
        return;
    }

    let w = width.max(1) as f32;
    let h = height.max(1) as f32;
    let aspect = w / h;
    let intensity = params.intensity.clamp(0.0, 1.0);
    let falloff = params.falloff.max(0.1);
    let warmth = params.warmth.clamp(0.0, 1.0);
    let lift = params.shadow_lift.clamp(0.0, 1.0);

    let warm = [1.0, 1.0 - warmth * 0.15, 1.0 - warmth * 0.4];

    for (i, px) in pixels.iter_mut().enumerate() {
        let x = (i as u32 % width) as f32;
        let y = (i as u32 / width) as f32;

        let dx = ((x + 0.5) / w - params.center[0]) * aspect;
        let dy = (y + 0.5) / h - params.center[1];
        let d = (dx * dx + dy * dy).sqrt();

        let light = intensity * (1.0 - d).max(0.0).powf(falloff);
        if light < 1e-6 {
            continue;
        }
        for c in 0..3 {
            let added = light * warm[c] * 0.6;
            let lifted = lift * light * (1.0 - px[c]).max(0.0) * 0.5;
            px[c] += added + lifted;
        }
    }
}

/// Composite a seeded procedural light leak in place.
///
/// The leak field is a warm diagonal streak plus a corner glow; streak
/// angle, position and corner are all derived from the seed, so a given
/// seed always produces the same leak.
pub fn apply_light_leak(
    pixels: &mut [[f32; 4]],
    width: u32,
    height: u32,
    params: &LightLeakParams,
) {
    if !params.is_active() {
        return;
    }

    let w = width.max(1) as f32;
    let h = height.max(1) as f32;
    let intensity = params.intensity.clamp(0.0, 1.0);
    let warmth = params.warmth.clamp(0.0, 1.0);

    // Seed-derived leak geometry.
    let streak_pos = hash3(1, 0, params.seed); // crossing point along x
    let streak_angle = (hash3(2, 0, params.seed) - 0.5) * 1.2;
    let streak_width = 0.12 + hash3(3, 0, params.seed) * 0.25;
    let corner_x = if hash3(4, 0, params.seed) < 0.5 { 0.0 } else { 1.0 };
    let corner_y = if hash3(5, 0, params.seed) < 0.5 { 0.0 } else { 1.0 };

    let leak_color = [
        1.0,
        0.45 + (1.0 - warmth) * 0.4,
        0.25 + (1.0 - warmth) * 0.55,
    ];

    for (i, px) in pixels.iter_mut().enumerate() {
        let x = (i as u32 % width) as f32;
        let y = (i as u32 / width) as f32;
        let u = (x + 0.5) / w;
        let v = (y + 0.5) / h;

        // Diagonal streak: distance from a seed-angled line.
        let line = (u - streak_pos) + streak_angle * (v - 0.5);
        let streak = 1.0 - smoothstep(line.abs() / streak_width);

        // Corner glow.
        let cd = ((u - corner_x).powi(2) + (v - corner_y).powi(2)).sqrt();
        let corner = (1.0 - cd * 1.6).max(0.0).powi(2);

        // Low-frequency breakup so edges are not mathematically clean.
        let breakup =
            0.75 + 0.25 * value_noise(u * 64.0, v * 64.0, 16.0, 1.0, params.seed);

        let field = ((streak * 0.7 + corner * 0.8) * breakup * intensity).min(1.0);
        if field < 1e-6 {
            continue;
        }

        for c in 0..3 {
            let blended = blend_channel(px[c], leak_color[c], params.blend);
            px[c] += (blended - px[c]) * field;
        }
    }
}

/// Blend one leak channel fully over one frame channel. The caller lerps
/// between base and the result by the leak field strength.
fn blend_channel(base: f32, leak: f32, mode: LeakBlendMode) -> f32 {
    let b = base.clamp(0.0, 1.0);
    let l = leak.clamp(0.0, 1.0);
    match mode {
        LeakBlendMode::Screen => 1.0 - (1.0 - b) * (1.0 - l),
        LeakBlendMode::Add => base + leak,
        LeakBlendMode::Overlay => {
            if b < 0.5 {
                2.0 * b * l
            } else {
                1.0 - 2.0 * (1.0 - b) * (1.0 - l)
            }
        }
        LeakBlendMode::SoftLight => ((1.0 - 2.0 * l) * b * b + 2.0 * l * b).clamp(0.0, 1.0),
    }
}

/// Draw the instant-film border in place.
///
/// Border widths are fractions of the frame per edge (top, left, right,
/// bottom). `edge_fade` softens the inner edge; `corner_darkening` adds a
/// radial falloff inside the image area.
pub fn apply_instant_frame(
    pixels: &mut [[f32; 4]],
    width: u32,
    height: u32,
    params: &InstantFrameParams,
) {
    if !params.is_active() {
        return;
    }

    let w = width.max(1) as f32;
    let h = height.max(1) as f32;
    let [top, left, right, bottom] = params.border_widths.map(|v| v.clamp(0.0, 0.45));
    let fade = params.edge_fade.clamp(1e-4, 0.2);
    let darkening = params.corner_darkening.clamp(0.0, 1.0);

    for (i, px) in pixels.iter_mut().enumerate() {
        let x = (i as u32 % width) as f32;
        let y = (i as u32 / width) as f32;
        let u = (x + 0.5) / w;
        let v = (y + 0.5) / h;

        // Signed distance into the image area, negative inside the border.
        let inset = (u - left)
            .min(1.0 - right - u)
            .min(v - top)
            .min(1.0 - bottom - v);

        // 0 = fully border, 1 = fully image.
        let image_weight = smoothstep(inset / fade + 0.5);

        for c in 0..3 {
            px[c] = params.border_color[c] * (1.0 - image_weight) + px[c] * image_weight;
        }

        if darkening > 0.0 && image_weight > 0.0 {
            let dx = u - 0.5;
            let dy = v - 0.5;
            let d = (dx * dx + dy * dy).sqrt() / 0.7071;
            let gain = 1.0 - darkening * smoothstep((d - 0.5) * 2.0) * image_weight;
            for c in 0..3 {
                px[c] *= gain;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_brightens_center_most() {
        let mut pixels = vec![[0.2, 0.2, 0.2, 1.0]; 32 * 32];
        let params = FlashParams {
            intensity: 1.0,
            enabled: true,
            ..Default::default()
        };
        apply_flash(&mut pixels, 32, 32, &params);
        let center = pixels[16 * 32 + 16][0];
        let corner = pixels[0][0];
        assert!(center > 0.2);
        assert!(center > corner);
    }

    #[test]
    fn test_light_leak_reproducible_for_same_seed() {
        let make = |seed: u32| {
            let mut pixels = vec![[0.3, 0.3, 0.3, 1.0]; 64 * 64];
            let params = LightLeakParams {
                seed,
                intensity: 0.8,
                enabled: true,
                ..Default::default()
            };
            apply_light_leak(&mut pixels, 64, 64, &params);
            pixels
        };
        let a = make(9);
        let b = make(9);
        for (pa, pb) in a.iter().zip(b.iter()) {
            for c in 0..4 {
                assert_eq!(pa[c].to_bits(), pb[c].to_bits());
            }
        }
        assert_ne!(make(9), make(10));
    }

    #[test]
    fn test_screen_blend_never_exceeds_one() {
        for base in [0.0, 0.5, 1.0] {
            for leak in [0.0, 0.5, 1.0] {
                let out = blend_channel(base, leak, LeakBlendMode::Screen);
                assert!(out <= 1.0 + 1e-6);
                assert!(out >= base - 1e-6);
            }
        }
    }

    #[test]
    fn test_instant_frame_paints_border_color() {
        let mut pixels = vec![[0.0, 0.0, 0.0, 1.0]; 100 * 100];
        let params = InstantFrameParams {
            enabled: true,
            ..Default::default()
        };
        apply_instant_frame(&mut pixels, 100, 100, &params);
        // Top-left corner is deep inside the border.
        let corner = pixels[0];
        for c in 0..3 {
            assert!((corner[c] - params.border_color[c]).abs() < 0.05);
        }
        // Center remains image content.
        assert!(pixels[50 * 100 + 50][0] < 0.05);
    }
}
