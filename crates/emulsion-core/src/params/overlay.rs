//! Frame-space compositing overlays: flash, light leak, instant frame,
//! date stamp. Applied last, in that fixed order, independent of image
//! content semantics.

use serde::{Deserialize, Serialize};

use crate::params::ParamError;

/// Maximum digits (including separators) in a date stamp.
pub const MAX_STAMP_DIGITS: usize = 10;

/// Radial additive light emulating an on-camera flash.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlashParams {
    /// Added light strength, [0, 1].
    pub intensity: f32,
    /// Radial falloff exponent.
    pub falloff: f32,
    /// Warm shift of the added light, [0, 1].
    pub warmth: f32,
    /// Extra lift applied to shadows inside the flash circle, [0, 1].
    pub shadow_lift: f32,
    /// Flash center in normalized coordinates.
    pub center: [f32; 2],
    /// Whether the flash runs.
    pub enabled: bool,
}

impl Default for FlashParams {
    fn default() -> Self {
        Self {
            intensity: 0.0,
            falloff: 2.0,
            warmth: 0.2,
            shadow_lift: 0.1,
            center: [0.5, 0.5],
            enabled: false,
        }
    }
}

impl FlashParams {
    /// True when the flash would add any light.
    pub fn is_active(&self) -> bool {
        self.enabled && self.intensity > 1e-6
    }
}

/// Blend mode for light-leak compositing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LeakBlendMode {
    /// `1 - (1-a)(1-b)`.
    #[default]
    Screen,
    /// `a + b`.
    Add,
    /// Contrast-preserving overlay.
    Overlay,
    /// Photoshop-style soft light.
    SoftLight,
}

/// Seeded procedural stray-light streaks and corner glow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightLeakParams {
    /// Deterministic seed selecting the leak pattern.
    pub seed: u32,
    /// Leak strength, [0, 1].
    pub intensity: f32,
    /// Warm shift of the leak color, [0, 1].
    pub warmth: f32,
    /// How the leak composites over the frame.
    pub blend: LeakBlendMode,
    /// Whether the leak runs.
    pub enabled: bool,
}

impl Default for LightLeakParams {
    fn default() -> Self {
        Self {
            seed: 1,
            intensity: 0.0,
            warmth: 0.6,
            blend: LeakBlendMode::Screen,
            enabled: false,
        }
    }
}

impl LightLeakParams {
    /// True when the leak would add any light.
    pub fn is_active(&self) -> bool {
        self.enabled && self.intensity > 1e-6
    }
}

/// Instant-film border with edge fade and corner darkening.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InstantFrameParams {
    /// Border widths as fractions of the frame: top, left, right, bottom.
    pub border_widths: [f32; 4],
    /// Border color.
    pub border_color: [f32; 3],
    /// Softness of the border's inner edge, [0, 1].
    pub edge_fade: f32,
    /// Extra darkening toward the image corners, [0, 1].
    pub corner_darkening: f32,
    /// Whether the frame is drawn.
    pub enabled: bool,
}

impl Default for InstantFrameParams {
    fn default() -> Self {
        Self {
            border_widths: [0.06, 0.06, 0.06, 0.18],
            border_color: [0.96, 0.95, 0.92],
            edge_fade: 0.02,
            corner_darkening: 0.0,
            enabled: false,
        }
    }
}

impl InstantFrameParams {
    /// True when any border edge has nonzero width.
    pub fn is_active(&self) -> bool {
        self.enabled && self.border_widths.iter().any(|w| *w > 1e-6)
    }
}

/// One glyph slot of a date stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StampGlyph {
    /// A decimal digit, 0–9.
    Digit(u8),
    /// The `'` year separator / apostrophe.
    Tick,
    /// A blank slot the width of a digit.
    Space,
}

/// A bounded sequence of date-stamp glyphs, max [`MAX_STAMP_DIGITS`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DigitString {
    glyphs: Vec<StampGlyph>,
}

impl DigitString {
    /// Parse from text: digits, `'` and spaces are accepted.
    pub fn parse(text: &str) -> Result<Self, ParamError> {
        if text.chars().count() > MAX_STAMP_DIGITS {
            return Err(ParamError::CapacityExceeded {
                what: "date stamp glyphs",
                max: MAX_STAMP_DIGITS,
                got: text.chars().count(),
            });
        }
        let mut glyphs = Vec::with_capacity(text.len());
        for ch in text.chars() {
            glyphs.push(match ch {
                '0'..='9' => StampGlyph::Digit(ch as u8 - b'0'),
                '\'' => StampGlyph::Tick,
                ' ' => StampGlyph::Space,
                other => return Err(ParamError::InvalidDigit(other)),
            });
        }
        Ok(Self { glyphs })
    }

    /// Glyphs left to right.
    pub fn glyphs(&self) -> &[StampGlyph] {
        &self.glyphs
    }

    /// Number of glyph slots.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// True when no glyph is present.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl TryFrom<String> for DigitString {
    type Error = ParamError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::parse(&text)
    }
}

impl From<DigitString> for String {
    fn from(digits: DigitString) -> Self {
        digits
            .glyphs
            .iter()
            .map(|g| match g {
                StampGlyph::Digit(d) => (b'0' + d) as char,
                StampGlyph::Tick => '\'',
                StampGlyph::Space => ' ',
            })
            .collect()
    }
}

/// Corner the stamp is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StampAnchor {
    /// Classic quartz-date position.
    #[default]
    BottomRight,
    BottomLeft,
    TopRight,
    TopLeft,
}

/// Seven-segment date stamp in the style of quartz-date film cameras.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateStampParams {
    /// Glyphs to render, e.g. `"26 8 29"`.
    pub digits: DigitString,
    /// Corner anchor.
    pub anchor: StampAnchor,
    /// Glyph height as a fraction of image height.
    pub size: f32,
    /// Stamp color. Defaults to the orange LED burn-in.
    pub color: [f32; 3],
    /// Glow radius around segments, [0, 1].
    pub glow: f32,
    /// Whether the stamp is drawn.
    pub enabled: bool,
}

impl Default for DateStampParams {
    fn default() -> Self {
        Self {
            digits: DigitString::default(),
            anchor: StampAnchor::BottomRight,
            size: 0.035,
            color: [1.0, 0.6, 0.15],
            glow: 0.3,
            enabled: false,
        }
    }
}

impl DateStampParams {
    /// True when there is anything to draw.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.digits.is_empty()
    }
}
