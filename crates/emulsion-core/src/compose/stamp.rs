//! Seven-segment date stamp, in the style of quartz-date film cameras.

use crate::params::{DateStampParams, StampAnchor, StampGlyph};

/// Segment bitmask per digit. Bit order: A top, B top-right, C
/// bottom-right, D bottom, E bottom-left, F top-left, G middle.
const DIGIT_SEGMENTS: [u8; 10] = [
    0b0111111, // 0: ABCDEF
    0b0000110, // 1: BC
    0b1011011, // 2: ABDEG
    0b1001111, // 3: ABCDG
    0b1100110, // 4: BCFG
    0b1101101, // 5: ACDFG
    0b1111101, // 6: ACDEFG
    0b0000111, // 7: ABC
    0b1111111, // 8: all
    0b1101111, // 9: ABCDFG
];

/// One segment as a line in unit glyph space (x right, y down, cell 1×2).
/// (x0, y0, x1, y1)
const SEGMENT_LINES: [(f32, f32, f32, f32); 7] = [
    (0.0, 0.0, 1.0, 0.0), // A
    (1.0, 0.0, 1.0, 1.0), // B
    (1.0, 1.0, 1.0, 2.0), // C
    (0.0, 2.0, 1.0, 2.0), // D
    (0.0, 1.0, 0.0, 2.0), // E
    (0.0, 0.0, 0.0, 1.0), // F
    (0.0, 1.0, 1.0, 1.0), // G
];

/// Margin from the anchored corner as a fraction of image height.
const MARGIN: f32 = 0.05;
/// Horizontal glyph advance in glyph-height units.
const ADVANCE: f32 = 0.8;

/// The image-space bounding box a stamp occupies, in pixels:
/// (x0, y0, x1, y1). Used by callers that need the dirty region.
pub fn stamp_bounds(
    width: u32,
    height: u32,
    params: &DateStampParams,
) -> (u32, u32, u32, u32) {
    let h = height.max(1) as f32;
    let glyph_h = params.size.clamp(0.01, 0.2) * h;
    let track_w = params.digits.len() as f32 * ADVANCE * glyph_h;
    let margin = MARGIN * h;
    let pad = glyph_h * 0.5; // room for glow

    let (x0, y0) = match params.anchor {
        StampAnchor::BottomRight => (width as f32 - margin - track_w, h - margin - glyph_h),
        StampAnchor::BottomLeft => (margin, h - margin - glyph_h),
        StampAnchor::TopRight => (width as f32 - margin - track_w, margin),
        StampAnchor::TopLeft => (margin, margin),
    };

    (
        (x0 - pad).max(0.0) as u32,
        (y0 - pad).max(0.0) as u32,
        ((x0 + track_w + pad) as u32).min(width),
        ((y0 + glyph_h + pad) as u32).min(height),
    )
}

/// Draw the date stamp in place.
///
/// Each glyph renders its lit segments as soft-edged line strokes with an
/// additive glow, never re-reading neighboring pixels, so the pass is
/// in-place safe.
pub fn apply_date_stamp(
    pixels: &mut [[f32; 4]],
    width: u32,
    height: u32,
    params: &DateStampParams,
) {
    if !params.is_active() {
        return;
    }

    let h = height.max(1) as f32;
    let glyph_h = params.size.clamp(0.01, 0.2) * h;
    let glyph_w = glyph_h * 0.5;
    let stroke = (glyph_h * 0.09).max(1.0);
    let glow_r = stroke * (1.0 + params.glow.clamp(0.0, 1.0) * 3.0);

    let (bx0, by0, bx1, by1) = stamp_bounds(width, height, params);
    let track_x = match params.anchor {
        StampAnchor::BottomRight | StampAnchor::TopRight => {
            width as f32 - MARGIN * h - params.digits.len() as f32 * ADVANCE * glyph_h
        }
        _ => MARGIN * h,
    };
    let track_y = match params.anchor {
        StampAnchor::BottomRight | StampAnchor::BottomLeft => h - MARGIN * h - glyph_h,
        _ => MARGIN * h,
    };

    for y in by0..by1 {
        for x in bx0..bx1 {
            let px = (x as f32 + 0.5, y as f32 + 0.5);
            let mut lit = 0.0_f32;

            for (slot, glyph) in params.digits.glyphs().iter().enumerate() {
                let mask = match glyph {
                    StampGlyph::Digit(d) => DIGIT_SEGMENTS[(*d).min(9) as usize],
                    StampGlyph::Tick => 0b0000010, // B segment only, top half
                    StampGlyph::Space => continue,
                };
                let gx = track_x + slot as f32 * ADVANCE * glyph_h;
                // Glyph-local coordinates in segment space (cell 1×2).
                let lx = (px.0 - gx) / glyph_w;
                let ly = (px.1 - track_y) / (glyph_h * 0.5);
                if !(-1.0..=2.0).contains(&lx) || !(-1.0..=3.0).contains(&ly) {
                    continue;
                }

                for (s, line) in SEGMENT_LINES.iter().enumerate() {
                    if mask & (1 << s) == 0 {
                        continue;
                    }
                    let d = dist_to_segment(lx, ly, *line) * glyph_w;
                    let core = 1.0 - (d / stroke).clamp(0.0, 1.0);
                    let halo = (1.0 - (d / glow_r).clamp(0.0, 1.0)).powi(2) * 0.4;
                    lit = lit.max(core + halo);
                }
            }

            if lit > 1e-4 {
                let out = &mut pixels[(y * width + x) as usize];
                for c in 0..3 {
                    out[c] += params.color[c] * lit.min(1.2);
                }
            }
        }
    }
}

/// Distance from point (x, y) to a line segment in glyph space.
fn dist_to_segment(x: f32, y: f32, (x0, y0, x1, y1): (f32, f32, f32, f32)) -> f32 {
    let dx = x1 - x0;
    let dy = y1 - y0;
    let len2 = dx * dx + dy * dy;
    let t = if len2 < 1e-10 {
        0.0
    } else {
        (((x - x0) * dx + (y - y0) * dy) / len2).clamp(0.0, 1.0)
    };
    let cx = x0 + dx * t;
    let cy = y0 + dy * t;
    ((x - cx).powi(2) + (y - cy).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::DigitString;

    fn stamp(text: &str) -> DateStampParams {
        DateStampParams {
            digits: DigitString::parse(text).unwrap(),
            enabled: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_stamp_is_noop() {
        let mut pixels = vec![[0.0, 0.0, 0.0, 1.0]; 100 * 100];
        let before = pixels.clone();
        apply_date_stamp(&mut pixels, 100, 100, &stamp(""));
        assert_eq!(pixels, before);
    }

    #[test]
    fn test_stamp_lights_pixels_inside_bounds_only() {
        let params = stamp("88");
        let mut pixels = vec![[0.0, 0.0, 0.0, 1.0]; 200 * 200];
        apply_date_stamp(&mut pixels, 200, 200, &params);

        let (bx0, by0, bx1, by1) = stamp_bounds(200, 200, &params);
        let mut lit_inside = 0;
        for y in 0..200u32 {
            for x in 0..200u32 {
                let p = pixels[(y * 200 + x) as usize];
                if p[0] > 0.01 {
                    assert!(
                        x >= bx0 && x < bx1 && y >= by0 && y < by1,
                        "lit pixel ({x},{y}) outside bounds"
                    );
                    lit_inside += 1;
                }
            }
        }
        assert!(lit_inside > 0, "an 88 stamp must light pixels");
    }

    #[test]
    fn test_different_digits_differ_only_in_stamp_region() {
        let a_params = stamp("11");
        let b_params = stamp("88");
        let mut a = vec![[0.1, 0.1, 0.1, 1.0]; 200 * 200];
        let mut b = a.clone();
        apply_date_stamp(&mut a, 200, 200, &a_params);
        apply_date_stamp(&mut b, 200, 200, &b_params);

        let (bx0, by0, bx1, by1) = stamp_bounds(200, 200, &a_params);
        let mut differs = false;
        for y in 0..200u32 {
            for x in 0..200u32 {
                let i = (y * 200 + x) as usize;
                if a[i] != b[i] {
                    differs = true;
                    assert!(
                        x >= bx0 && x < bx1 && y >= by0 && y < by1,
                        "digit change leaked outside the stamp region at ({x},{y})"
                    );
                }
            }
        }
        assert!(differs, "different digits must render differently");
    }

    #[test]
    fn test_stamp_color_reaches_output() {
        let params = DateStampParams {
            digits: DigitString::parse("8").unwrap(),
            color: [1.0, 0.6, 0.15],
            enabled: true,
            ..Default::default()
        };
        let mut pixels = vec![[0.0, 0.0, 0.0, 1.0]; 200 * 200];
        apply_date_stamp(&mut pixels, 200, 200, &params);
        let brightest = pixels
            .iter()
            .cloned()
            .fold([0.0_f32; 4], |acc, p| if p[0] > acc[0] { p } else { acc });
        assert!(brightest[0] > 0.5);
        assert!(brightest[0] > brightest[2], "stamp should be orange-biased");
    }
}
