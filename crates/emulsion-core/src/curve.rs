//! Bounded tone curves and Catmull-Rom spline evaluation.
//!
//! A [`ChannelCurve`] holds up to [`MAX_CURVE_POINTS`] control points with
//! monotonically non-decreasing input coordinates, enforced at construction.
//! Evaluation uses Catmull-Rom interpolation:
//! ```text
//! q(t) = 0.5 × ((2×P1) + (-P0 + P2)×t + (2×P0 - 5×P1 + 4×P2 - P3)×t² + (-P0 + 3×P1 - 3×P2 + P3)×t³)
//! ```
//! An empty curve is the identity.

use serde::{Deserialize, Serialize};

use crate::params::ParamError;

/// Maximum control points per channel curve.
pub const MAX_CURVE_POINTS: usize = 8;

/// One curve control point. Both coordinates live in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Input luminance position.
    pub input: f32,
    /// Output luminance at that position.
    pub output: f32,
}

impl CurvePoint {
    /// Construct a point, clamping both coordinates into [0, 1].
    pub fn new(input: f32, output: f32) -> Self {
        Self {
            input: input.clamp(0.0, 1.0),
            output: output.clamp(0.0, 1.0),
        }
    }
}

/// A bounded, monotone sequence of control points for one color channel.
///
/// Invariants, enforced at construction:
/// - at most [`MAX_CURVE_POINTS`] points,
/// - `input` coordinates monotonically non-decreasing.
///
/// The empty curve evaluates as identity. By convention the first and last
/// points pin the 0/1 endpoints unless the caller overrides them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<CurvePoint>", into = "Vec<CurvePoint>")]
pub struct ChannelCurve {
    points: Vec<CurvePoint>,
}

impl ChannelCurve {
    /// The identity curve (no control points).
    pub const fn identity() -> Self {
        Self { points: Vec::new() }
    }

    /// Build a curve from control points, validating count and monotonicity.
    pub fn from_points(points: Vec<CurvePoint>) -> Result<Self, ParamError> {
        if points.len() > MAX_CURVE_POINTS {
            return Err(ParamError::CapacityExceeded {
                what: "curve points",
                max: MAX_CURVE_POINTS,
                got: points.len(),
            });
        }
        for pair in points.windows(2) {
            if pair[1].input < pair[0].input {
                return Err(ParamError::NonMonotonicCurve {
                    at: pair[1].input,
                    previous: pair[0].input,
                });
            }
        }
        Ok(Self { points })
    }

    /// Control points, sorted by input.
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// True when evaluation would be the identity map.
    pub fn is_identity(&self) -> bool {
        self.points.len() < 2
    }

    /// Evaluate the curve at position `t`.
    ///
    /// Values outside the control-point range clamp to the first/last
    /// point's output. Returns `t` unchanged for fewer than 2 points.
    pub fn evaluate(&self, t: f32) -> f32 {
        let pts = &self.points;
        if pts.len() < 2 {
            return t;
        }

        if t <= pts[0].input {
            return pts[0].output;
        }
        if t >= pts[pts.len() - 1].input {
            return pts[pts.len() - 1].output;
        }

        // Binary search for the segment containing t
        let mut lo = 0;
        let mut hi = pts.len() - 1;
        while hi - lo > 1 {
            let mid = (lo + hi) / 2;
            if pts[mid].input <= t {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        let p1 = pts[lo];
        let p2 = pts[hi];

        // Virtual endpoints: mirror at boundaries
        let p0 = if lo > 0 {
            pts[lo - 1]
        } else {
            CurvePoint {
                input: 2.0 * p1.input - p2.input,
                output: 2.0 * p1.output - p2.output,
            }
        };
        let p3 = if hi < pts.len() - 1 {
            pts[hi + 1]
        } else {
            CurvePoint {
                input: 2.0 * p2.input - p1.input,
                output: 2.0 * p2.output - p1.output,
            }
        };

        let segment_t = if (p2.input - p1.input).abs() < 1e-10 {
            0.5
        } else {
            (t - p1.input) / (p2.input - p1.input)
        };

        catmull_rom(p0.output, p1.output, p2.output, p3.output, segment_t).clamp(0.0, 1.0)
    }

    /// Bake the curve into a uniformly-spaced 1D LUT of `size` entries.
    pub fn bake_1d(&self, size: usize) -> Vec<f32> {
        (0..size)
            .map(|i| {
                let t = i as f32 / (size - 1).max(1) as f32;
                self.evaluate(t)
            })
            .collect()
    }
}

impl TryFrom<Vec<CurvePoint>> for ChannelCurve {
    type Error = ParamError;

    fn try_from(points: Vec<CurvePoint>) -> Result<Self, Self::Error> {
        Self::from_points(points)
    }
}

impl From<ChannelCurve> for Vec<CurvePoint> {
    fn from(curve: ChannelCurve) -> Self {
        curve.points
    }
}

/// Independent per-channel tone curves.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ToneCurves {
    /// Red channel curve.
    pub red: ChannelCurve,
    /// Green channel curve.
    pub green: ChannelCurve,
    /// Blue channel curve.
    pub blue: ChannelCurve,
}

impl ToneCurves {
    /// True when all three channel curves are identity.
    pub fn is_identity(&self) -> bool {
        self.red.is_identity() && self.green.is_identity() && self.blue.is_identity()
    }

    /// Apply all three channel curves to one RGB value.
    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        [
            self.red.evaluate(rgb[0].clamp(0.0, 1.0)),
            self.green.evaluate(rgb[1].clamp(0.0, 1.0)),
            self.blue.evaluate(rgb[2].clamp(0.0, 1.0)),
        ]
    }
}

/// Catmull-Rom cubic interpolation between P1 and P2.
fn catmull_rom(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_catmull_rom_endpoints() {
        let v = catmull_rom(0.0, 0.25, 0.75, 1.0, 0.0);
        assert!((v - 0.25).abs() < EPSILON);
        let v = catmull_rom(0.0, 0.25, 0.75, 1.0, 1.0);
        assert!((v - 0.75).abs() < EPSILON);
    }

    #[test]
    fn test_empty_curve_is_identity() {
        let curve = ChannelCurve::identity();
        assert!(curve.is_identity());
        assert!((curve.evaluate(0.37) - 0.37).abs() < EPSILON);
    }

    #[test]
    fn test_two_point_diagonal_is_near_identity() {
        let curve = ChannelCurve::from_points(vec![
            CurvePoint::new(0.0, 0.0),
            CurvePoint::new(1.0, 1.0),
        ])
        .unwrap();
        assert!((curve.evaluate(0.0) - 0.0).abs() < EPSILON);
        assert!((curve.evaluate(0.5) - 0.5).abs() < 0.01);
        assert!((curve.evaluate(1.0) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_capacity_enforced_at_construction() {
        let points: Vec<CurvePoint> = (0..9)
            .map(|i| CurvePoint::new(i as f32 / 8.0, i as f32 / 8.0))
            .collect();
        let err = ChannelCurve::from_points(points).unwrap_err();
        assert!(matches!(err, ParamError::CapacityExceeded { .. }));
    }

    #[test]
    fn test_non_monotonic_input_rejected() {
        let err = ChannelCurve::from_points(vec![
            CurvePoint::new(0.5, 0.5),
            CurvePoint::new(0.2, 0.8),
        ])
        .unwrap_err();
        assert!(matches!(err, ParamError::NonMonotonicCurve { .. }));
    }

    #[test]
    fn test_bake_1d_endpoints() {
        let curve = ChannelCurve::from_points(vec![
            CurvePoint::new(0.0, 0.1),
            CurvePoint::new(1.0, 0.9),
        ])
        .unwrap();
        let lut = curve.bake_1d(256);
        assert_eq!(lut.len(), 256);
        assert!((lut[0] - 0.1).abs() < EPSILON);
        assert!((lut[255] - 0.9).abs() < EPSILON);
    }

    #[test]
    fn test_evaluate_clamps_outside_range() {
        let curve = ChannelCurve::from_points(vec![
            CurvePoint::new(0.25, 0.4),
            CurvePoint::new(0.75, 0.6),
        ])
        .unwrap();
        assert!((curve.evaluate(0.0) - 0.4).abs() < EPSILON);
        assert!((curve.evaluate(1.0) - 0.6).abs() < EPSILON);
    }
}
