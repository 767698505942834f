//! Lens distortion and vignette parameters.

use serde::{Deserialize, Serialize};

/// Barrel distortion + chromatic aberration of a disposable-camera lens.
///
/// Applied once, spatially, before any color operation that assumes
/// rectified geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LensDistortionParams {
    /// Whether the distortion pass runs at all.
    pub enabled: bool,
    /// Barrel distortion coefficient.
    pub k1: f32,
    /// Edge distortion coefficient.
    pub k2: f32,
    /// Chromatic aberration strength.
    pub ca_strength: f32,
    /// Output scale compensating the crop introduced by distortion.
    pub scale: f32,
}

impl Default for LensDistortionParams {
    fn default() -> Self {
        Self {
            enabled: false,
            k1: 0.0,
            k2: 0.0,
            ca_strength: 0.0,
            scale: 1.0,
        }
    }
}

impl LensDistortionParams {
    /// True when the pass would move or fringe any pixel.
    pub fn is_active(&self) -> bool {
        self.enabled
            && (self.k1.abs() > 1e-6
                || self.k2.abs() > 1e-6
                || self.ca_strength.abs() > 1e-6
                || (self.scale - 1.0).abs() > 1e-6)
    }
}

/// Radial corner darkening.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VignetteParams {
    /// Darkening strength, [0, 1].
    pub intensity: f32,
    /// Corner roundness, [0, 1]. 1.0 = circular.
    pub roundness: f32,
    /// Feather width of the falloff, [0, 1].
    pub feather: f32,
    /// Radial midpoint where falloff begins, [0, 1].
    pub midpoint: f32,
    /// Correct the radial distance for the image aspect ratio.
    pub aspect_correction: bool,
    /// Whether the vignette runs.
    pub enabled: bool,
}

impl Default for VignetteParams {
    fn default() -> Self {
        Self {
            intensity: 0.0,
            roundness: 1.0,
            feather: 0.5,
            midpoint: 0.5,
            aspect_correction: true,
            enabled: false,
        }
    }
}

impl VignetteParams {
    /// True when the vignette would darken any pixel.
    pub fn is_active(&self) -> bool {
        self.enabled && self.intensity > 1e-6
    }
}
