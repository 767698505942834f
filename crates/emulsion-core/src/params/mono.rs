//! Black-and-white conversion parameters.

use serde::{Deserialize, Serialize};

use crate::params::tone::GrainParams;

/// Chemical toning applied after the channel mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ToningMode {
    /// Neutral silver print.
    #[default]
    None,
    /// Warm brown sepia.
    Sepia,
    /// Cool purple-brown selenium.
    Selenium,
    /// Prussian-blue cyanotype.
    Cyanotype,
    /// Independent shadow/highlight tint colors.
    Split,
    /// Single user-supplied tint color.
    Custom,
}

/// Black-and-white conversion with channel mixing and toning.
///
/// When enabled this stage supersedes the color pipeline's chroma output:
/// saturation and vibrance downstream of it have nothing left to act on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BwParams {
    /// Channel-mix luminance weights for R, G, B. Normalized at use.
    pub channel_mix: [f32; 3],
    /// Contrast around middle gray, [-1, 1].
    pub contrast: f32,
    /// Brightness offset, [-1, 1].
    pub brightness: f32,
    /// Gamma exponent, (0, 4].
    pub gamma: f32,
    /// Toning mode.
    pub toning: ToningMode,
    /// Toning intensity, [0, 1].
    pub toning_intensity: f32,
    /// Tint color for [`ToningMode::Custom`].
    pub custom_color: [f32; 3],
    /// Shadow tint for [`ToningMode::Split`].
    pub split_shadow_color: [f32; 3],
    /// Highlight tint for [`ToningMode::Split`].
    pub split_highlight_color: [f32; 3],
    /// Dedicated grain for the monochrome look.
    pub grain: GrainParams,
    /// Whether the conversion runs.
    pub enabled: bool,
}

impl Default for BwParams {
    fn default() -> Self {
        Self {
            channel_mix: [0.299, 0.587, 0.114],
            contrast: 0.0,
            brightness: 0.0,
            gamma: 1.0,
            toning: ToningMode::None,
            toning_intensity: 0.0,
            custom_color: [1.0, 1.0, 1.0],
            split_shadow_color: [0.2, 0.25, 0.35],
            split_highlight_color: [1.0, 0.95, 0.85],
            grain: GrainParams::default(),
            enabled: false,
        }
    }
}

impl BwParams {
    /// True when the conversion runs.
    pub fn is_active(&self) -> bool {
        self.enabled
    }
}
