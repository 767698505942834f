//! Render error taxonomy.

use emulsion_core::image::PixelFormat;

/// Failure inside one stage's `apply`.
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    /// Source and destination surfaces disagree in size.
    #[error("surface dimensions mismatch: {src_width}x{src_height} vs {dst_width}x{dst_height}")]
    DimensionMismatch {
        src_width: u32,
        src_height: u32,
        dst_width: u32,
        dst_height: u32,
    },
    /// A required auxiliary texture is missing.
    #[error("missing auxiliary texture: {0}")]
    MissingAuxiliary(&'static str),
    /// The stage was driven through the wrong entry point.
    #[error("unsupported stage operation: {0}")]
    Unsupported(&'static str),
}

/// Surface pool failures.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    /// The pool cap is reached and every surface is in flight.
    #[error(
        "surface pool exhausted: {in_use} surfaces in use at cap {cap}, \
         no eviction candidate for {width}x{height} {format}"
    )]
    Exhausted {
        in_use: usize,
        cap: usize,
        width: u32,
        height: u32,
        format: PixelFormat,
    },
}

/// Frame-level render failures returned by the orchestrator.
///
/// Configuration failures are detected up front, before any stage has
/// executed. Resource exhaustion can also surface mid-chain when a
/// ping-pong acquire fails. Either way no pixel reaches the caller's
/// target, and a failed frame never corrupts the renderer; the next
/// `render` call proceeds independently.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The snapshot or the caller-supplied surfaces are inconsistent
    /// (missing LUT while the grade uses one, target size mismatch).
    #[error("configuration: {0}")]
    Configuration(String),
    /// The surface pool could not satisfy an acquire.
    #[error("resource exhaustion: {0}")]
    ResourceExhaustion(#[from] PoolError),
    /// A fatal stage failed mid-frame.
    #[error("execution failed in stage `{stage}`: {source}")]
    Execution {
        stage: &'static str,
        source: StageError,
    },
}
