//! The luminance-driven glow family: bloom, halation, CCD bloom.
//!
//! All three extract a thresholded luminance pass from the tone-mapped
//! image and composite additively, in the declared order
//! bloom → halation → CCD bloom.

use serde::{Deserialize, Serialize};

/// Soft glow around bright highlights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BloomParams {
    /// Glow strength, [0, 1].
    pub intensity: f32,
    /// Luminance threshold gating the extraction, [0, 1].
    pub threshold: f32,
    /// Blur radius in pixels (fraction of image height when < 1).
    pub radius: f32,
    /// Softness of the threshold knee, [0, 1].
    pub softness: f32,
    /// Color tint multiplied into the glow.
    pub tint: [f32; 3],
    /// Whether the bloom runs.
    pub enabled: bool,
}

impl Default for BloomParams {
    fn default() -> Self {
        Self {
            intensity: 0.0,
            threshold: 0.8,
            radius: 0.02,
            softness: 0.5,
            tint: [1.0, 1.0, 1.0],
            enabled: false,
        }
    }
}

impl BloomParams {
    /// True when the glow would add any light.
    pub fn is_active(&self) -> bool {
        self.enabled && self.intensity > 1e-6
    }
}

/// Red-biased highlight glow emulating film light scatter (CineStill look).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HalationParams {
    /// Glow strength, [0, 1].
    pub intensity: f32,
    /// Luminance threshold gating the extraction, [0, 1].
    pub threshold: f32,
    /// Blur radius in pixels (fraction of image height when < 1).
    pub radius: f32,
    /// Softness of the threshold knee, [0, 1].
    pub softness: f32,
    /// Glow color. Defaults to the red-orange scatter of remjet-free film.
    pub color: [f32; 3],
    /// Whether halation runs.
    pub enabled: bool,
}

impl Default for HalationParams {
    fn default() -> Self {
        Self {
            intensity: 0.0,
            threshold: 0.85,
            radius: 0.03,
            softness: 0.5,
            color: [1.0, 0.3, 0.1],
            enabled: false,
        }
    }
}

impl HalationParams {
    /// True when the glow would add any light.
    pub fn is_active(&self) -> bool {
        self.enabled && self.intensity > 1e-6
    }
}

/// CCD sensor bloom: vertical charge smear plus a purple fringe band.
///
/// Structurally a superset of [`BloomParams`] for a different sensor
/// emulation; composites additively after bloom and halation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CcdBloomParams {
    /// Glow strength, [0, 1].
    pub intensity: f32,
    /// Luminance threshold gating the extraction, [0, 1].
    pub threshold: f32,
    /// Blur radius of the isotropic component.
    pub radius: f32,
    /// Softness of the threshold knee, [0, 1].
    pub softness: f32,
    /// Color tint of the isotropic glow.
    pub tint: [f32; 3],
    /// Vertical smear length as a fraction of image height, [0, 1].
    pub smear_length: f32,
    /// Per-step smear attenuation, [0, 1].
    pub smear_falloff: f32,
    /// Purple-fringe band strength, [0, 1].
    pub fringe_intensity: f32,
    /// Whether CCD bloom runs.
    pub enabled: bool,
}

impl Default for CcdBloomParams {
    fn default() -> Self {
        Self {
            intensity: 0.0,
            threshold: 0.9,
            radius: 0.015,
            softness: 0.3,
            tint: [0.9, 0.9, 1.0],
            smear_length: 0.25,
            smear_falloff: 0.92,
            fringe_intensity: 0.3,
            enabled: false,
        }
    }
}

impl CcdBloomParams {
    /// True when the glow would add any light.
    pub fn is_active(&self) -> bool {
        self.enabled && self.intensity > 1e-6
    }
}
