//! Parameter structs and the per-frame snapshot aggregate.
//!
//! `LookSnapshot` is the single source of truth for one render pass: every
//! effect contributes one plain-data block, aggregated immutably. The
//! orchestrator reads activity predicates (`is_active`) to decide which
//! stages exist at all; it never mutates caller-owned parameters.
//!
//! Values are expected pre-clamped by the caller. The pipeline documents
//! the accepted range per field and clamps again at the point of use;
//! out-of-range input never panics and is never rejected.

pub mod color;
pub mod glow;
pub mod mono;
pub mod optics;
pub mod overlay;
pub mod tone;

use serde::{Deserialize, Serialize};

pub use color::{
    ColorGradingParams, LutRef, MAX_SELECTIVE_COLORS, SelectiveColor, SelectiveColorSet,
    SkinToneParams, SplitTone,
};
pub use glow::{BloomParams, CcdBloomParams, HalationParams};
pub use mono::{BwParams, ToningMode};
pub use optics::{LensDistortionParams, VignetteParams};
pub use overlay::{
    DateStampParams, DigitString, FlashParams, InstantFrameParams, LeakBlendMode,
    LightLeakParams, MAX_STAMP_DIGITS, StampAnchor, StampGlyph,
};
pub use tone::{GrainParams, ToneMappingParams};

/// Current snapshot schema version. Older presets deserialize through
/// serde defaults on every block.
pub const SNAPSHOT_VERSION: u32 = 4;

/// Construction-time parameter validation failures.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ParamError {
    /// A bounded sequence was given more entries than it can hold.
    #[error("too many {what}: {got} exceeds capacity {max}")]
    CapacityExceeded {
        what: &'static str,
        max: usize,
        got: usize,
    },
    /// Curve control points must be non-decreasing in input.
    #[error("curve input {at} decreases below previous point {previous}")]
    NonMonotonicCurve { at: f32, previous: f32 },
    /// A date-stamp character outside digits, `'` and space.
    #[error("invalid date stamp character {0:?}")]
    InvalidDigit(char),
}

/// Immutable aggregate of all effect parameters for one render.
///
/// `Default` is the full identity look: every effect disabled, so rendering
/// it is a no-op copy of the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookSnapshot {
    /// Schema version the snapshot was authored against.
    #[serde(default = "LookSnapshot::current_version")]
    pub version: u32,
    /// Geometric rectification: barrel distortion + chromatic aberration.
    #[serde(default)]
    pub lens: LensDistortionParams,
    /// Global tone and color.
    #[serde(default)]
    pub grading: ColorGradingParams,
    /// Skin-tone protection mask feeding the color stage.
    #[serde(default)]
    pub skin: SkinToneParams,
    /// Filmic tone mapping.
    #[serde(default)]
    pub tone_mapping: ToneMappingParams,
    /// Soft highlight glow.
    #[serde(default)]
    pub bloom: BloomParams,
    /// Red-biased film halation.
    #[serde(default)]
    pub halation: HalationParams,
    /// CCD vertical smear + purple fringe.
    #[serde(default)]
    pub ccd_bloom: CcdBloomParams,
    /// Film grain.
    #[serde(default)]
    pub grain: GrainParams,
    /// Corner darkening.
    #[serde(default)]
    pub vignette: VignetteParams,
    /// Black-and-white override.
    #[serde(default)]
    pub bw: BwParams,
    /// Radial additive flash.
    #[serde(default)]
    pub flash: FlashParams,
    /// Procedural light leak.
    #[serde(default)]
    pub light_leak: LightLeakParams,
    /// Instant-film border.
    #[serde(default)]
    pub instant_frame: InstantFrameParams,
    /// Seven-segment date stamp.
    #[serde(default)]
    pub date_stamp: DateStampParams,
}

impl Default for LookSnapshot {
    fn default() -> Self {
        Self::identity()
    }
}

impl LookSnapshot {
    fn current_version() -> u32 {
        SNAPSHOT_VERSION
    }

    /// The identity look: every effect disabled.
    pub fn identity() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            lens: LensDistortionParams::default(),
            grading: ColorGradingParams::default(),
            skin: SkinToneParams::default(),
            tone_mapping: ToneMappingParams::default(),
            bloom: BloomParams::default(),
            halation: HalationParams::default(),
            ccd_bloom: CcdBloomParams::default(),
            grain: GrainParams::default(),
            vignette: VignetteParams::default(),
            bw: BwParams::default(),
            flash: FlashParams::default(),
            light_leak: LightLeakParams::default(),
            instant_frame: InstantFrameParams::default(),
            date_stamp: DateStampParams::default(),
        }
    }

    /// True when no effect would change any pixel.
    pub fn is_identity(&self) -> bool {
        !(self.lens.is_active()
            || self.grading.is_active()
            || self.tone_mapping.is_active()
            || self.bloom.is_active()
            || self.halation.is_active()
            || self.ccd_bloom.is_active()
            || self.grain.is_active()
            || self.vignette.is_active()
            || self.bw.is_active()
            || self.flash.is_active()
            || self.light_leak.is_active()
            || self.instant_frame.is_active()
            || self.date_stamp.is_active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_snapshot_is_identity() {
        assert!(LookSnapshot::default().is_identity());
    }

    #[test]
    fn test_enabled_effect_breaks_identity() {
        let snapshot = LookSnapshot {
            vignette: VignetteParams {
                intensity: 1.0,
                enabled: true,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(!snapshot.is_identity());
    }

    #[test]
    fn test_snapshot_json_roundtrip() {
        let snapshot = LookSnapshot {
            grading: ColorGradingParams {
                exposure: 0.5,
                temperature: -0.2,
                ..Default::default()
            },
            grain: GrainParams {
                intensity: 0.4,
                seed: 42,
                enabled: true,
                ..Default::default()
            },
            ..LookSnapshot::identity()
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: LookSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_older_preset_without_new_blocks_still_loads() {
        // A minimal revision-1 preset: only grading, no version field.
        let json = r#"{"grading": {"exposure": 1.0, "contrast": 0.0,
            "highlights": 0.0, "shadows": 0.0, "whites": 0.0, "blacks": 0.0,
            "saturation": 0.0, "vibrance": 0.0, "temperature": 0.0,
            "tint": 0.0, "fade": 0.0, "clarity": 0.0}}"#;
        let snapshot: LookSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert!((snapshot.grading.exposure - 1.0).abs() < 1e-6);
        assert!(!snapshot.bloom.is_active());
    }
}
