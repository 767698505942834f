//! Effect-pipeline orchestration for the film-emulation renderer.
//!
//! Takes an immutable [`LookSnapshot`](emulsion_core::params::LookSnapshot)
//! plus an input image, builds the active stage chain in fixed order, and
//! runs it over pooled intermediate surfaces. See [`Renderer`] for the
//! entry point.

pub mod error;
pub mod pool;
pub mod renderer;
pub mod stage;
pub mod surface;

pub use error::{PoolError, RenderError, StageError};
pub use pool::SurfacePool;
pub use renderer::{RenderJob, Renderer};
pub use stage::{AuxiliaryTextures, Stage, StageSeverity, build_stages};
pub use surface::Surface;
