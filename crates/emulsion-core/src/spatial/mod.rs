//! Image-space effects: geometric rectification, the glow family, grain
//! and vignette.

pub mod glow;
pub mod grain;
pub mod optics;
pub mod vignette;
