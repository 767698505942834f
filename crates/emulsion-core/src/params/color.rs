//! Color grading, selective color, and skin-tone protection parameters.

use serde::{Deserialize, Serialize};

use crate::curve::ToneCurves;
use crate::params::ParamError;

/// Maximum selective-color channels per snapshot.
pub const MAX_SELECTIVE_COLORS: usize = 8;

/// Hue-band-targeted saturation/luminance/hue adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectiveColor {
    /// Target hue, normalized [0, 1).
    pub target_hue: f32,
    /// Influence range around the target hue.
    pub range: f32,
    /// Saturation delta, [-1, 1].
    pub sat_adjust: f32,
    /// Luminance delta, [-1, 1].
    pub lum_adjust: f32,
    /// Hue shift, [-0.1, 0.1].
    pub hue_shift: f32,
}

/// A bounded, order-independent set of selective-color channels.
///
/// At most [`MAX_SELECTIVE_COLORS`] entries; their adjustments union
/// additively per pixel.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<SelectiveColor>", into = "Vec<SelectiveColor>")]
pub struct SelectiveColorSet {
    channels: Vec<SelectiveColor>,
}

impl SelectiveColorSet {
    /// The empty set.
    pub const fn empty() -> Self {
        Self {
            channels: Vec::new(),
        }
    }

    /// Build a set from channels, validating the capacity bound.
    pub fn from_channels(channels: Vec<SelectiveColor>) -> Result<Self, ParamError> {
        if channels.len() > MAX_SELECTIVE_COLORS {
            return Err(ParamError::CapacityExceeded {
                what: "selective color channels",
                max: MAX_SELECTIVE_COLORS,
                got: channels.len(),
            });
        }
        Ok(Self { channels })
    }

    /// Append a channel, failing once the set is full.
    pub fn push(&mut self, channel: SelectiveColor) -> Result<(), ParamError> {
        if self.channels.len() >= MAX_SELECTIVE_COLORS {
            return Err(ParamError::CapacityExceeded {
                what: "selective color channels",
                max: MAX_SELECTIVE_COLORS,
                got: self.channels.len() + 1,
            });
        }
        self.channels.push(channel);
        Ok(())
    }

    /// Channels in insertion order (evaluation is order-independent).
    pub fn channels(&self) -> &[SelectiveColor] {
        &self.channels
    }

    /// Number of channels.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// True when no channel is present.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

impl TryFrom<Vec<SelectiveColor>> for SelectiveColorSet {
    type Error = ParamError;

    fn try_from(channels: Vec<SelectiveColor>) -> Result<Self, Self::Error> {
        Self::from_channels(channels)
    }
}

impl From<SelectiveColorSet> for Vec<SelectiveColor> {
    fn from(set: SelectiveColorSet) -> Self {
        set.channels
    }
}

/// Stable handle to a caller-bound 3D LUT auxiliary texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LutRef(pub u32);

/// Split-tone tinting of shadow vs. highlight luminance ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitTone {
    /// Shadow tint hue, normalized [0, 1).
    pub shadow_hue: f32,
    /// Shadow tint saturation, [0, 1].
    pub shadow_sat: f32,
    /// Highlight tint hue, normalized [0, 1).
    pub highlight_hue: f32,
    /// Highlight tint saturation, [0, 1].
    pub highlight_sat: f32,
    /// Balance between shadow and highlight regions, [-1, 1].
    pub balance: f32,
    /// Protects midtones from tinting, [0, 1].
    pub midtone_protection: f32,
}

impl Default for SplitTone {
    fn default() -> Self {
        Self {
            shadow_hue: 0.0,
            shadow_sat: 0.0,
            highlight_hue: 0.0,
            highlight_sat: 0.0,
            balance: 0.0,
            midtone_protection: 0.5,
        }
    }
}

impl SplitTone {
    /// True when neither range carries any tint.
    pub fn is_identity(&self) -> bool {
        self.shadow_sat.abs() < 1e-6 && self.highlight_sat.abs() < 1e-6
    }
}

/// The full color-grading parameter block.
///
/// All sliders default to their identity values, so
/// `ColorGradingParams::default()` passes pixels through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorGradingParams {
    /// Exposure in stops. 0.0 = neutral.
    pub exposure: f32,
    /// Contrast around middle gray. 0.0 = neutral.
    pub contrast: f32,
    /// Highlight recovery, [-1, 1]. 0.0 = neutral.
    pub highlights: f32,
    /// Shadow recovery, [-1, 1]. 0.0 = neutral.
    pub shadows: f32,
    /// White point adjustment, [-1, 1].
    pub whites: f32,
    /// Black point adjustment, [-1, 1].
    pub blacks: f32,
    /// Saturation delta, [-1, 1]. 0.0 = neutral.
    pub saturation: f32,
    /// Vibrance delta (weights low-saturation pixels), [-1, 1].
    pub vibrance: f32,
    /// Color temperature shift (blue-orange), [-1, 1].
    pub temperature: f32,
    /// Tint shift (green-magenta), [-1, 1].
    pub tint: f32,
    /// Fade (lifted blacks, matte look), [0, 1].
    pub fade: f32,
    /// Midtone local-contrast boost, [-1, 1].
    pub clarity: f32,
    /// Split-tone tinting.
    #[serde(default)]
    pub split_tone: SplitTone,
    /// Selective-color channels.
    #[serde(default)]
    pub selective: SelectiveColorSet,
    /// Bound LUT handle, if any. Requires the LUT in the auxiliary inputs.
    #[serde(default)]
    pub lut: Option<LutRef>,
    /// LUT blend intensity, [0, 1]. 0.0 disables the LUT.
    #[serde(default)]
    pub lut_intensity: f32,
    /// Optional per-channel tone curves.
    #[serde(default)]
    pub curves: ToneCurves,
}

impl Default for ColorGradingParams {
    /// Identity grade with every slider at its neutral value.
    fn default() -> Self {
        Self {
            exposure: 0.0,
            contrast: 0.0,
            highlights: 0.0,
            shadows: 0.0,
            whites: 0.0,
            blacks: 0.0,
            saturation: 0.0,
            vibrance: 0.0,
            temperature: 0.0,
            tint: 0.0,
            fade: 0.0,
            clarity: 0.0,
            split_tone: SplitTone::default(),
            selective: SelectiveColorSet::empty(),
            lut: None,
            lut_intensity: 0.0,
            curves: ToneCurves::default(),
        }
    }
}

impl ColorGradingParams {
    /// True when the LUT branch contributes to the output.
    pub fn uses_lut(&self) -> bool {
        self.lut.is_some() && self.lut_intensity > 1e-6
    }

    /// True when applying the grade would change at least one pixel.
    pub fn is_active(&self) -> bool {
        !(self.exposure.abs() < 1e-6
            && self.contrast.abs() < 1e-6
            && self.highlights.abs() < 1e-6
            && self.shadows.abs() < 1e-6
            && self.whites.abs() < 1e-6
            && self.blacks.abs() < 1e-6
            && self.saturation.abs() < 1e-6
            && self.vibrance.abs() < 1e-6
            && self.temperature.abs() < 1e-6
            && self.tint.abs() < 1e-6
            && self.fade.abs() < 1e-6
            && self.clarity.abs() < 1e-6
            && self.split_tone.is_identity()
            && self.selective.is_empty()
            && !self.uses_lut()
            && self.curves.is_identity())
    }
}

/// Protects a hue band (skin tones) from the color operations around it.
///
/// Evaluated as a per-pixel mask that attenuates saturation, vibrance and
/// selective-color adjustments inside the band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkinToneParams {
    /// Center of the protected hue band, degrees [0, 360).
    pub hue_center_deg: f32,
    /// Half-width of the protected band, degrees.
    pub hue_range_deg: f32,
    /// Protection strength, [0, 1]. 1.0 fully masks other color ops.
    pub protection: f32,
    /// Whether protection is applied.
    pub enabled: bool,
}

impl Default for SkinToneParams {
    fn default() -> Self {
        Self {
            hue_center_deg: 25.0,
            hue_range_deg: 30.0,
            protection: 0.0,
            enabled: false,
        }
    }
}

impl SkinToneParams {
    /// True when the mask would attenuate anything.
    pub fn is_active(&self) -> bool {
        self.enabled && self.protection > 1e-6
    }
}
