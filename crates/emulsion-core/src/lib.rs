//! Domain layer for the film-emulation pipeline.
//!
//! This crate contains all parameter structs, per-pixel color science,
//! image-space effect math, LUT operations, and GPU-consumable uniform
//! packing. It has no execution or threading dependencies; the
//! orchestration layer lives in `emulsion-pipeline`.

pub mod compose;
pub mod curve;
pub mod grading;
pub mod image;
pub mod lut;
pub mod noise;
pub mod params;
pub mod spatial;
pub mod uniforms;

// Re-exports for convenience.
pub use curve::{ChannelCurve, CurvePoint, ToneCurves};
pub use image::{FilmImage, PixelFormat};
pub use lut::Lut3D;
pub use params::{LookSnapshot, ParamError};
