//! GPU-consumable parameter packing and the fixed binding contract.
//!
//! Every struct here is `#[repr(C)]` + `bytemuck::Pod`, laid out so a
//! full-screen-quad pass can bind it as a uniform buffer byte-for-byte.
//! Enabled flags are packed as `i32` (0/1) and bounded sequences as
//! fixed-capacity arrays plus a count, matching the wire layout uniform
//! shaders expect.

use bytemuck::{Pod, Zeroable};

use crate::params::{
    ColorGradingParams, GrainParams, LensDistortionParams, LookSnapshot, SelectiveColor,
    VignetteParams,
};

/// Vertex buffer binding index.
pub const BUFFER_INDEX_VERTICES: u32 = 0;
/// Uniform/parameter buffer binding index.
pub const BUFFER_INDEX_UNIFORMS: u32 = 1;

/// Input texture binding index.
pub const TEXTURE_INDEX_INPUT: u32 = 0;
/// LUT texture binding index.
pub const TEXTURE_INDEX_LUT: u32 = 1;
/// Output target binding index.
pub const TEXTURE_INDEX_OUTPUT: u32 = 2;

/// Full-screen-quad vertex: 2D position + 2D texture coordinate.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Clip-space position.
    pub position: [f32; 2],
    /// Texture coordinate.
    pub tex_coord: [f32; 2],
}

/// The standard full-screen triangle strip quad.
pub const FULLSCREEN_QUAD: [Vertex; 4] = [
    Vertex { position: [-1.0, -1.0], tex_coord: [0.0, 1.0] },
    Vertex { position: [1.0, -1.0], tex_coord: [1.0, 1.0] },
    Vertex { position: [-1.0, 1.0], tex_coord: [0.0, 0.0] },
    Vertex { position: [1.0, 1.0], tex_coord: [1.0, 0.0] },
];

/// One packed selective-color channel.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct SelectiveColorUniform {
    pub hue: f32,
    pub range: f32,
    pub sat_adjust: f32,
    pub lum_adjust: f32,
    pub hue_shift: f32,
}

impl From<&SelectiveColor> for SelectiveColorUniform {
    fn from(c: &SelectiveColor) -> Self {
        Self {
            hue: c.target_hue,
            range: c.range,
            sat_adjust: c.sat_adjust,
            lum_adjust: c.lum_adjust,
            hue_shift: c.hue_shift,
        }
    }
}

/// Packed color-grading block, fixed-capacity selective array + count.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ColorGradingUniform {
    pub exposure: f32,
    pub contrast: f32,
    pub highlights: f32,
    pub shadows: f32,
    pub whites: f32,
    pub blacks: f32,
    pub saturation: f32,
    pub vibrance: f32,
    pub temperature: f32,
    pub tint: f32,
    pub fade: f32,
    pub clarity: f32,
    pub shadow_hue: f32,
    pub shadow_sat: f32,
    pub highlight_hue: f32,
    pub highlight_sat: f32,
    pub split_balance: f32,
    pub midtone_protection: f32,
    pub selective: [SelectiveColorUniform; 8],
    pub selective_count: i32,
    pub lut_intensity: f32,
    pub use_lut: i32,
}

impl From<&ColorGradingParams> for ColorGradingUniform {
    fn from(p: &ColorGradingParams) -> Self {
        let mut selective = [SelectiveColorUniform::default(); 8];
        for (slot, channel) in p.selective.channels().iter().enumerate() {
            selective[slot] = channel.into();
        }
        Self {
            exposure: p.exposure,
            contrast: p.contrast,
            highlights: p.highlights,
            shadows: p.shadows,
            whites: p.whites,
            blacks: p.blacks,
            saturation: p.saturation,
            vibrance: p.vibrance,
            temperature: p.temperature,
            tint: p.tint,
            fade: p.fade,
            clarity: p.clarity,
            shadow_hue: p.split_tone.shadow_hue,
            shadow_sat: p.split_tone.shadow_sat,
            highlight_hue: p.split_tone.highlight_hue,
            highlight_sat: p.split_tone.highlight_sat,
            split_balance: p.split_tone.balance,
            midtone_protection: p.split_tone.midtone_protection,
            selective,
            selective_count: p.selective.len() as i32,
            lut_intensity: p.lut_intensity,
            use_lut: p.uses_lut() as i32,
        }
    }
}

/// Packed lens-distortion block.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LensDistortionUniform {
    pub enabled: i32,
    pub k1: f32,
    pub k2: f32,
    pub ca_strength: f32,
    pub scale: f32,
}

impl From<&LensDistortionParams> for LensDistortionUniform {
    fn from(p: &LensDistortionParams) -> Self {
        Self {
            enabled: p.enabled as i32,
            k1: p.k1,
            k2: p.k2,
            ca_strength: p.ca_strength,
            scale: p.scale,
        }
    }
}

/// Packed grain block.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GrainUniform {
    pub intensity: f32,
    pub size: f32,
    pub softness: f32,
    pub channel_intensity: [f32; 3],
    pub seed: u32,
    pub enabled: i32,
}

impl From<&GrainParams> for GrainUniform {
    fn from(p: &GrainParams) -> Self {
        Self {
            intensity: p.intensity,
            size: p.size,
            softness: p.softness,
            channel_intensity: p.channel_intensity,
            seed: p.seed,
            enabled: p.enabled as i32,
        }
    }
}

/// Packed vignette block.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct VignetteUniform {
    pub intensity: f32,
    pub roundness: f32,
    pub feather: f32,
    pub midpoint: f32,
    pub enabled: i32,
}

impl From<&VignetteParams> for VignetteUniform {
    fn from(p: &VignetteParams) -> Self {
        Self {
            intensity: p.intensity,
            roundness: p.roundness,
            feather: p.feather,
            midpoint: p.midpoint,
            enabled: p.enabled as i32,
        }
    }
}

/// Pack the snapshot blocks a uniform-buffer pass consumes into one
/// contiguous byte vector, in binding order.
pub fn pack_snapshot(snapshot: &LookSnapshot) -> Vec<u8> {
    let grading: ColorGradingUniform = (&snapshot.grading).into();
    let lens: LensDistortionUniform = (&snapshot.lens).into();
    let grain: GrainUniform = (&snapshot.grain).into();
    let vignette: VignetteUniform = (&snapshot.vignette).into();

    let mut bytes = Vec::with_capacity(
        size_of::<ColorGradingUniform>()
            + size_of::<LensDistortionUniform>()
            + size_of::<GrainUniform>()
            + size_of::<VignetteUniform>(),
    );
    bytes.extend_from_slice(bytemuck::bytes_of(&lens));
    bytes.extend_from_slice(bytemuck::bytes_of(&grading));
    bytes.extend_from_slice(bytemuck::bytes_of(&grain));
    bytes.extend_from_slice(bytemuck::bytes_of(&vignette));
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SelectiveColorSet;

    #[test]
    fn test_vertex_layout_is_16_bytes() {
        assert_eq!(size_of::<Vertex>(), 16);
    }

    #[test]
    fn test_selective_array_packs_count_and_entries() {
        let set = SelectiveColorSet::from_channels(vec![
            SelectiveColor {
                target_hue: 0.1,
                range: 0.05,
                sat_adjust: 0.5,
                lum_adjust: 0.0,
                hue_shift: 0.0,
            },
            SelectiveColor {
                target_hue: 0.6,
                range: 0.08,
                sat_adjust: -0.3,
                lum_adjust: 0.1,
                hue_shift: 0.02,
            },
        ])
        .unwrap();
        let params = ColorGradingParams {
            selective: set,
            ..Default::default()
        };
        let uniform: ColorGradingUniform = (&params).into();
        assert_eq!(uniform.selective_count, 2);
        assert_eq!(uniform.selective[1].hue, 0.6);
        assert_eq!(uniform.selective[2], SelectiveColorUniform::default());
    }

    #[test]
    fn test_pack_snapshot_is_deterministic() {
        let snapshot = LookSnapshot::identity();
        assert_eq!(pack_snapshot(&snapshot), pack_snapshot(&snapshot));
    }

    #[test]
    fn test_disabled_flags_pack_as_zero() {
        let uniform: LensDistortionUniform = (&LensDistortionParams::default()).into();
        assert_eq!(uniform.enabled, 0);
    }
}
