//! The luminance-driven glow family: thresholded extraction, separable
//! blur, vertical CCD smear, and additive compositing.

use crate::grading::basic::luminance;
use crate::params::{BloomParams, CcdBloomParams, HalationParams};

/// Extract pixels above a soft luminance threshold into an RGB buffer.
///
/// ```text
/// knee = smooth ramp of width `softness` above `threshold`
/// out  = rgb × knee
/// ```
pub fn extract_highlights(
    pixels: &[[f32; 4]],
    threshold: f32,
    softness: f32,
) -> Vec<[f32; 3]> {
    let t = threshold.clamp(0.0, 1.0);
    let knee = (softness.clamp(0.0, 1.0) * 0.5).max(1e-3);
    pixels
        .iter()
        .map(|p| {
            let luma = luminance([p[0], p[1], p[2]]);
            let w = ((luma - t) / knee).clamp(0.0, 1.0);
            let w = w * w * (3.0 - 2.0 * w);
            [p[0] * w, p[1] * w, p[2] * w]
        })
        .collect()
}

/// Separable box blur, three passes per axis (approximates Gaussian).
///
/// `radius` below 1.0 is interpreted as a fraction of the image height.
pub fn blur(buffer: &mut [[f32; 3]], width: u32, height: u32, radius: f32) {
    let r = resolve_radius(radius, height).min(width.max(1) as usize / 2);
    if r == 0 {
        return;
    }
    let mut scratch = vec![[0.0_f32; 3]; buffer.len()];
    for _ in 0..3 {
        blur_axis(buffer, &mut scratch, width as usize, height as usize, r, true);
        blur_axis(&scratch, buffer, width as usize, height as usize, r, false);
    }
}

fn resolve_radius(radius: f32, height: u32) -> usize {
    let px = if radius < 1.0 {
        radius * height as f32
    } else {
        radius
    };
    (px.max(0.0) as usize).min(height.max(1) as usize / 2)
}

fn blur_axis(
    src: &[[f32; 3]],
    dst: &mut [[f32; 3]],
    width: usize,
    height: usize,
    radius: usize,
    horizontal: bool,
) {
    let norm = 1.0 / (2 * radius + 1) as f32;
    let (outer, inner) = if horizontal {
        (height, width)
    } else {
        (width, height)
    };
    let index = |o: usize, i: usize| -> usize {
        if horizontal { o * width + i } else { i * width + o }
    };

    for o in 0..outer {
        // Running sum over the sliding window, clamped at the ends.
        let mut sum = [0.0_f32; 3];
        for i in 0..=radius.min(inner - 1) {
            for c in 0..3 {
                sum[c] += src[index(o, i)][c];
            }
        }
        // Edge texels count multiple times to keep the window size fixed.
        for c in 0..3 {
            sum[c] += src[index(o, 0)][c] * radius as f32;
        }

        for i in 0..inner {
            for c in 0..3 {
                dst[index(o, i)][c] = sum[c] * norm;
            }
            let add = (i + radius + 1).min(inner - 1);
            let sub = i.saturating_sub(radius);
            for c in 0..3 {
                sum[c] += src[index(o, add)][c] - src[index(o, sub)][c];
            }
        }
    }
}

/// Smear a highlight buffer vertically, emulating CCD charge bleed.
///
/// Each column accumulates an exponentially-decaying trail in both
/// directions; `length` is the trail extent as a fraction of image height,
/// `falloff` the per-step attenuation. The trail is a finite window:
/// contributions older than the extent expire, so shortening `length`
/// shortens the smear rather than rescaling it.
pub fn vertical_smear(
    buffer: &[[f32; 3]],
    width: u32,
    height: u32,
    length: f32,
    falloff: f32,
) -> Vec<[f32; 3]> {
    let steps = ((length.clamp(0.0, 1.0) * height as f32) as usize).max(1);
    let decay = falloff.clamp(0.0, 0.999);
    let expire = decay.powi(steps as i32);
    let w = width as usize;
    let h = height as usize;
    let mut out = vec![[0.0_f32; 3]; buffer.len()];

    for x in 0..w {
        // Downward pass: windowed running trail, rows older than `steps`
        // drop out with their accumulated decay.
        let mut trail = [0.0_f32; 3];
        for y in 0..h {
            let px = buffer[y * w + x];
            for c in 0..3 {
                trail[c] = trail[c] * decay + px[c];
                if y >= steps {
                    trail[c] = (trail[c] - expire * buffer[(y - steps) * w + x][c]).max(0.0);
                }
                out[y * w + x][c] += trail[c];
            }
        }
        // Upward pass
        let mut trail = [0.0_f32; 3];
        for y in (0..h).rev() {
            let px = buffer[y * w + x];
            for c in 0..3 {
                trail[c] = trail[c] * decay + px[c];
                if y + steps < h {
                    trail[c] = (trail[c] - expire * buffer[(y + steps) * w + x][c]).max(0.0);
                }
                out[y * w + x][c] += trail[c] - px[c]; // source counted once
            }
        }
    }

    // Normalize by the trail's geometric-series weight so intensity is
    // comparable across falloff settings.
    let weight = (1.0 - decay.powi(steps as i32)) / (1.0 - decay).max(1e-4);
    let norm = 1.0 / weight.max(1.0);
    for px in &mut out {
        for c in 0..3 {
            px[c] *= norm;
        }
    }
    out
}

/// Additively composite a tinted glow buffer onto the frame.
pub fn composite_additive(
    frame: &mut [[f32; 4]],
    glow: &[[f32; 3]],
    tint: [f32; 3],
    intensity: f32,
) {
    let gain = intensity.clamp(0.0, 4.0);
    if gain < 1e-7 {
        return;
    }
    for (px, g) in frame.iter_mut().zip(glow.iter()) {
        for c in 0..3 {
            px[c] += g[c] * tint[c] * gain;
        }
    }
}

/// Run the standard bloom extraction: threshold → blur.
pub fn bloom_pass(
    pixels: &[[f32; 4]],
    width: u32,
    height: u32,
    params: &BloomParams,
) -> Vec<[f32; 3]> {
    let mut glow = extract_highlights(pixels, params.threshold, params.softness);
    blur(&mut glow, width, height, params.radius);
    glow
}

/// Run the halation extraction. Same shape as bloom; the red bias comes
/// from the tint at composite time.
pub fn halation_pass(
    pixels: &[[f32; 4]],
    width: u32,
    height: u32,
    params: &HalationParams,
) -> Vec<[f32; 3]> {
    let mut glow = extract_highlights(pixels, params.threshold, params.softness);
    blur(&mut glow, width, height, params.radius);
    glow
}

/// Run the CCD bloom extraction: threshold → isotropic blur + vertical
/// smear + purple fringe, summed.
pub fn ccd_bloom_pass(
    pixels: &[[f32; 4]],
    width: u32,
    height: u32,
    params: &CcdBloomParams,
) -> Vec<[f32; 3]> {
    let bright = extract_highlights(pixels, params.threshold, params.softness);

    let mut iso = bright.clone();
    blur(&mut iso, width, height, params.radius);

    let smear = vertical_smear(
        &bright,
        width,
        height,
        params.smear_length,
        params.smear_falloff,
    );

    // Purple fringe: a narrow blurred band weighted toward R and B.
    let fringe_gain = params.fringe_intensity.clamp(0.0, 1.0);
    let mut fringe = bright;
    blur(&mut fringe, width, height, (params.radius * 0.5).max(1.0));

    let mut out = iso;
    for i in 0..out.len() {
        for c in 0..3 {
            out[i][c] += smear[i][c];
        }
        if fringe_gain > 0.0 {
            let f = fringe[i];
            out[i][0] += f[0] * 0.6 * fringe_gain;
            out[i][2] += f[2] * 0.9 * fringe_gain;
        }
    }
    out
}
