//! 3D LUT application and `.cube` file I/O.

use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// A 3D lookup table mapping input RGB to graded output RGB.
///
/// Applied with trilinear interpolation. Typical sizes are 33³ or 65³
/// entries.
#[derive(Debug, Clone)]
pub struct Lut3D {
    /// Grid size per axis (typically 33 or 65).
    pub size: u32,
    /// LUT entries as RGBA values, red-fastest order. Length = size³.
    pub data: Vec<[f32; 4]>,
    /// Minimum domain values per channel.
    pub domain_min: [f32; 3],
    /// Maximum domain values per channel.
    pub domain_max: [f32; 3],
}

impl Lut3D {
    /// An identity LUT of the given grid size.
    pub fn identity(size: u32) -> Self {
        let n = size.max(2);
        let mut data = Vec::with_capacity((n * n * n) as usize);
        let step = 1.0 / (n - 1) as f32;
        for b in 0..n {
            for g in 0..n {
                for r in 0..n {
                    data.push([r as f32 * step, g as f32 * step, b as f32 * step, 1.0]);
                }
            }
        }
        Self {
            size: n,
            data,
            domain_min: [0.0; 3],
            domain_max: [1.0; 3],
        }
    }

    /// Apply this LUT to an RGB pixel using trilinear interpolation.
    ///
    /// Input is remapped from the LUT domain to grid coordinates and
    /// clamped to the grid; the eight surrounding entries are blended.
    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        let n = self.size as usize;
        if n < 2 || self.data.len() < n * n * n {
            return rgb;
        }

        let mut grid = [0.0_f32; 3];
        for c in 0..3 {
            let span = (self.domain_max[c] - self.domain_min[c]).max(1e-10);
            let t = ((rgb[c] - self.domain_min[c]) / span).clamp(0.0, 1.0);
            grid[c] = t * (n - 1) as f32;
        }

        let i0: [usize; 3] = std::array::from_fn(|c| (grid[c].floor() as usize).min(n - 2));
        let frac: [f32; 3] = std::array::from_fn(|c| grid[c] - i0[c] as f32);

        let entry = |r: usize, g: usize, b: usize| -> [f32; 4] {
            self.data[(b * n + g) * n + r]
        };

        let mut out = [0.0_f32; 3];
        for c in 0..3 {
            // Interpolate along r, then g, then b.
            let lerp = |a: f32, b: f32, t: f32| a + (b - a) * t;
            let c00 = lerp(
                entry(i0[0], i0[1], i0[2])[c],
                entry(i0[0] + 1, i0[1], i0[2])[c],
                frac[0],
            );
            let c10 = lerp(
                entry(i0[0], i0[1] + 1, i0[2])[c],
                entry(i0[0] + 1, i0[1] + 1, i0[2])[c],
                frac[0],
            );
            let c01 = lerp(
                entry(i0[0], i0[1], i0[2] + 1)[c],
                entry(i0[0] + 1, i0[1], i0[2] + 1)[c],
                frac[0],
            );
            let c11 = lerp(
                entry(i0[0], i0[1] + 1, i0[2] + 1)[c],
                entry(i0[0] + 1, i0[1] + 1, i0[2] + 1)[c],
                frac[0],
            );
            let c0 = lerp(c00, c10, frac[1]);
            let c1 = lerp(c01, c11, frac[1]);
            out[c] = lerp(c0, c1, frac[2]);
        }
        out
    }

    /// Load a 3D LUT from a `.cube` file.
    pub fn load_cube(path: &Path) -> std::io::Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);

        let mut size = 0u32;
        let mut domain_min = [0.0_f32; 3];
        let mut domain_max = [1.0_f32; 3];
        let mut data: Vec<[f32; 4]> = Vec::new();

        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with("TITLE") {
                continue;
            }
            let mut tokens = line.split_whitespace();
            match tokens.next() {
                Some("LUT_3D_SIZE") => {
                    size = tokens
                        .next()
                        .and_then(|t| t.parse().ok())
                        .ok_or_else(|| malformed("bad LUT_3D_SIZE"))?;
                    data.reserve((size as usize).pow(3));
                }
                Some("DOMAIN_MIN") => {
                    domain_min = parse_triplet(tokens).ok_or_else(|| malformed("bad DOMAIN_MIN"))?;
                }
                Some("DOMAIN_MAX") => {
                    domain_max = parse_triplet(tokens).ok_or_else(|| malformed("bad DOMAIN_MAX"))?;
                }
                Some(first) => {
                    let r: f32 = first.parse().map_err(|_| malformed("bad entry"))?;
                    let [g, b] = [tokens.next(), tokens.next()]
                        .map(|t| t.and_then(|t| t.parse::<f32>().ok()));
                    let (Some(g), Some(b)) = (g, b) else {
                        return Err(malformed("short entry row"));
                    };
                    data.push([r, g, b, 1.0]);
                }
                None => {}
            }
        }

        if size < 2 || data.len() != (size as usize).pow(3) {
            return Err(malformed("entry count does not match LUT_3D_SIZE"));
        }

        if domain_min.iter().zip(domain_max).any(|(lo, hi)| *lo >= hi) {
            tracing::warn!(?domain_min, ?domain_max, "degenerate LUT domain, using [0, 1]");
            domain_min = [0.0; 3];
            domain_max = [1.0; 3];
        }

        Ok(Self {
            size,
            data,
            domain_min,
            domain_max,
        })
    }

    /// Save this LUT to a `.cube` file.
    pub fn save_cube(&self, path: &Path) -> std::io::Result<()> {
        let mut out = std::io::BufWriter::new(std::fs::File::create(path)?);
        writeln!(out, "LUT_3D_SIZE {}", self.size)?;
        writeln!(
            out,
            "DOMAIN_MIN {} {} {}",
            self.domain_min[0], self.domain_min[1], self.domain_min[2]
        )?;
        writeln!(
            out,
            "DOMAIN_MAX {} {} {}",
            self.domain_max[0], self.domain_max[1], self.domain_max[2]
        )?;
        for entry in &self.data {
            writeln!(out, "{:.6} {:.6} {:.6}", entry[0], entry[1], entry[2])?;
        }
        Ok(())
    }
}

fn parse_triplet<'a>(mut tokens: impl Iterator<Item = &'a str>) -> Option<[f32; 3]> {
    let a = tokens.next()?.parse().ok()?;
    let b = tokens.next()?.parse().ok()?;
    let c = tokens.next()?.parse().ok()?;
    Some([a, b, c])
}

fn malformed(what: &str) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidData, format!("cube file: {what}"))
}
