//! Filmic tone mapping and grain parameters.

use serde::{Deserialize, Serialize};

/// Filmic HDR-to-display remap (Hable-style shoulder/linear/toe curve).
///
/// Conceptually ordered after exposure/contrast and before grain, so noise
/// is added to the already tone-mapped signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneMappingParams {
    /// Linear white point mapped to 1.0.
    pub white_point: f32,
    /// Shoulder strength.
    pub shoulder: f32,
    /// Linear section strength.
    pub linear: f32,
    /// Toe strength.
    pub toe: f32,
    /// Whether tone mapping runs.
    pub enabled: bool,
}

impl Default for ToneMappingParams {
    fn default() -> Self {
        Self {
            white_point: 11.2,
            shoulder: 0.22,
            linear: 0.3,
            toe: 0.2,
            enabled: false,
        }
    }
}

impl ToneMappingParams {
    /// True when the remap runs.
    pub fn is_active(&self) -> bool {
        self.enabled
    }
}

/// Simulated film grain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrainParams {
    /// Overall grain strength, [0, 1].
    pub intensity: f32,
    /// Grain size in pixels (>= 1.0).
    pub size: f32,
    /// Edge softness of individual grains, [0, 1].
    pub softness: f32,
    /// Per-channel grain intensity for R, G, B.
    pub channel_intensity: [f32; 3],
    /// Deterministic seed. The same seed, snapshot and input produce
    /// bit-identical grain.
    pub seed: u32,
    /// Whether grain runs.
    pub enabled: bool,
}

impl Default for GrainParams {
    fn default() -> Self {
        Self {
            intensity: 0.0,
            size: 1.5,
            softness: 0.5,
            channel_intensity: [1.0, 1.0, 1.0],
            seed: 0,
            enabled: false,
        }
    }
}

impl GrainParams {
    /// True when grain would perturb any pixel.
    pub fn is_active(&self) -> bool {
        self.enabled && self.intensity > 1e-6
    }
}
