//! Effect stages and the fixed-order stage builder.
//!
//! Each stage wraps one effect family's math behind a uniform interface so
//! the orchestrator can chain them without knowing their internals. The
//! chain order is fixed; enabling or disabling effects only removes links,
//! never reorders them:
//!
//! ```text
//! lens → color → glow → grain → vignette → bw
//!      → flash → light leak → instant frame → date stamp
//! ```

use std::sync::Arc;

use emulsion_core::Lut3D;
use emulsion_core::params::LookSnapshot;

use crate::error::StageError;
use crate::surface::Surface;

mod color;
mod finish;
mod glow;
mod lens;
mod overlay;

pub use color::ColorStage;
pub use finish::{BwStage, GrainStage, VignetteStage};
pub use glow::GlowStage;
pub use lens::LensStage;
pub use overlay::{DateStampStage, FlashStage, InstantFrameStage, LightLeakStage};

/// How the orchestrator treats a stage failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageSeverity {
    /// Failure aborts the frame.
    Fatal,
    /// Failure is logged and the stage skipped; the frame completes.
    Cosmetic,
}

/// Shared read-only resources a stage may bind.
#[derive(Default, Clone)]
pub struct AuxiliaryTextures {
    /// 3D grading LUT, required when the color stage references one.
    pub lut: Option<Arc<Lut3D>>,
}

/// One link of the effect chain.
///
/// Stages that resample (read neighbors of the pixel they write) go
/// through `apply` with distinct surfaces; purely pointwise or
/// forward-writing stages advertise `in_place` and run on one surface.
pub trait Stage: Send + Sync {
    /// Stable name used in logs and errors.
    fn name(&self) -> &'static str;

    fn severity(&self) -> StageSeverity {
        StageSeverity::Fatal
    }

    /// True when the stage never reads a pixel it has already written.
    fn in_place(&self) -> bool {
        false
    }

    /// Run src → dst. Surfaces must match in size.
    fn apply(
        &self,
        src: &Surface,
        dst: &mut Surface,
        aux: &AuxiliaryTextures,
    ) -> Result<(), StageError>;

    /// Run on a single surface. Only valid when `in_place` is true.
    fn apply_in_place(
        &self,
        _surface: &mut Surface,
        _aux: &AuxiliaryTextures,
    ) -> Result<(), StageError> {
        Err(StageError::Unsupported("stage does not run in place"))
    }
}

/// Check that src and dst agree in size before a two-surface apply.
pub(crate) fn check_dims(src: &Surface, dst: &Surface) -> Result<(), StageError> {
    if src.width != dst.width || src.height != dst.height {
        return Err(StageError::DimensionMismatch {
            src_width: src.width,
            src_height: src.height,
            dst_width: dst.width,
            dst_height: dst.height,
        });
    }
    Ok(())
}

/// Build the active stage chain for a snapshot, in fixed order.
///
/// Inactive effects contribute no stage at all, so a default snapshot
/// yields an empty chain and the render degenerates to a copy.
pub fn build_stages(snapshot: &LookSnapshot) -> Vec<Box<dyn Stage>> {
    let mut stages: Vec<Box<dyn Stage>> = Vec::new();

    if snapshot.lens.is_active() {
        stages.push(Box::new(LensStage::new(snapshot.lens)));
    }
    if snapshot.grading.is_active() || snapshot.tone_mapping.is_active() {
        stages.push(Box::new(ColorStage::new(
            snapshot.grading.clone(),
            snapshot.skin,
            snapshot.tone_mapping,
        )));
    }
    if snapshot.bloom.is_active() || snapshot.halation.is_active() || snapshot.ccd_bloom.is_active()
    {
        stages.push(Box::new(GlowStage::new(
            snapshot.bloom,
            snapshot.halation,
            snapshot.ccd_bloom,
        )));
    }
    if snapshot.grain.is_active() {
        stages.push(Box::new(GrainStage::new(snapshot.grain)));
    }
    if snapshot.vignette.is_active() {
        stages.push(Box::new(VignetteStage::new(snapshot.vignette)));
    }
    if snapshot.bw.is_active() {
        stages.push(Box::new(BwStage::new(snapshot.bw)));
    }
    if snapshot.flash.is_active() {
        stages.push(Box::new(FlashStage::new(snapshot.flash)));
    }
    if snapshot.light_leak.is_active() {
        stages.push(Box::new(LightLeakStage::new(snapshot.light_leak)));
    }
    if snapshot.instant_frame.is_active() {
        stages.push(Box::new(InstantFrameStage::new(snapshot.instant_frame)));
    }
    if snapshot.date_stamp.is_active() {
        stages.push(Box::new(DateStampStage::new(snapshot.date_stamp.clone())));
    }

    stages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_snapshot_builds_empty_chain() {
        let stages = build_stages(&LookSnapshot::identity());
        assert!(stages.is_empty());
    }

    #[test]
    fn test_chain_order_is_fixed() {
        let mut snapshot = LookSnapshot::identity();
        snapshot.date_stamp.enabled = true;
        snapshot.date_stamp.digits = emulsion_core::params::DigitString::parse("26 8 29").unwrap();
        snapshot.grain.enabled = true;
        snapshot.grain.intensity = 0.5;
        snapshot.lens.enabled = true;
        snapshot.lens.k1 = 0.1;
        snapshot.vignette.enabled = true;
        snapshot.vignette.intensity = 0.5;

        let names: Vec<&str> = build_stages(&snapshot).iter().map(|s| s.name()).collect();
        assert_eq!(names, ["lens", "grain", "vignette", "date_stamp"]);
    }

    #[test]
    fn test_severity_split() {
        let mut snapshot = LookSnapshot::identity();
        snapshot.vignette.enabled = true;
        snapshot.vignette.intensity = 0.5;
        snapshot.flash.enabled = true;
        snapshot.flash.intensity = 0.5;

        let stages = build_stages(&snapshot);
        assert_eq!(stages[0].severity(), StageSeverity::Fatal);
        assert_eq!(stages[1].severity(), StageSeverity::Cosmetic);
    }
}
