//! Frame orchestrator.
//!
//! `Renderer::render` drives one frame through the active stage chain built
//! from a parameter snapshot: validate, acquire pooled surfaces, run each
//! stage (ping-ponging only where a stage cannot run in place), and hand
//! back the finished image. A failed frame releases every surface it
//! acquired and leaves the renderer reusable.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use emulsion_core::image::FilmImage;
use emulsion_core::params::LookSnapshot;

use crate::error::RenderError;
use crate::pool::SurfacePool;
use crate::stage::{AuxiliaryTextures, StageSeverity, build_stages};

pub struct Renderer {
    pool: Arc<SurfacePool>,
}

impl Renderer {
    pub fn new(pool: Arc<SurfacePool>) -> Self {
        Self { pool }
    }

    /// The pool this renderer draws intermediate surfaces from.
    pub fn pool(&self) -> &Arc<SurfacePool> {
        &self.pool
    }

    /// Render one frame into a caller-owned target.
    ///
    /// The target is never resized; a size mismatch against the input is
    /// a configuration error reported before any stage runs. On failure
    /// the target is left untouched.
    pub fn render_into(
        &self,
        input: &FilmImage,
        snapshot: &LookSnapshot,
        target: &mut FilmImage,
        aux: &AuxiliaryTextures,
    ) -> Result<(), RenderError> {
        if target.width != input.width || target.height != input.height {
            return Err(RenderError::Configuration(format!(
                "target {}x{} does not match input {}x{}",
                target.width, target.height, input.width, input.height
            )));
        }
        let rendered = self.render(input, snapshot, aux)?;
        target.pixels = rendered.pixels;
        Ok(())
    }

    /// Render one frame synchronously.
    ///
    /// Validates the snapshot against the bound auxiliaries before any
    /// stage runs, then executes the chain. Cosmetic stage failures are
    /// logged and skipped; fatal ones abort the frame.
    pub fn render(
        &self,
        input: &FilmImage,
        snapshot: &LookSnapshot,
        aux: &AuxiliaryTextures,
    ) -> Result<FilmImage, RenderError> {
        if input.width == 0 || input.height == 0 {
            return Err(RenderError::Configuration(format!(
                "degenerate input image {}x{}",
                input.width, input.height
            )));
        }
        if snapshot.grading.uses_lut() && aux.lut.is_none() {
            return Err(RenderError::Configuration(
                "snapshot references a 3D LUT but none is bound".into(),
            ));
        }

        let stages = build_stages(snapshot);
        tracing::debug!(
            width = input.width,
            height = input.height,
            stages = stages.len(),
            "frame start"
        );

        let mut current = self
            .pool
            .acquire(input.width, input.height, input.source_format)?;
        current.copy_from_image(input);

        for stage in &stages {
            let outcome = if stage.in_place() {
                stage.apply_in_place(&mut current, aux)
            } else {
                // Ping-pong: resampling stages read src while writing dst.
                let mut dst = match self
                    .pool
                    .acquire(current.width, current.height, current.format)
                {
                    Ok(dst) => dst,
                    Err(err) => {
                        self.pool.release(current);
                        return Err(err.into());
                    }
                };
                match stage.apply(&current, &mut dst, aux) {
                    Ok(()) => {
                        self.pool.release(std::mem::replace(&mut current, dst));
                        Ok(())
                    }
                    Err(err) => {
                        self.pool.release(dst);
                        Err(err)
                    }
                }
            };

            if let Err(source) = outcome {
                match stage.severity() {
                    StageSeverity::Cosmetic => {
                        tracing::warn!(stage = stage.name(), error = %source, "cosmetic stage skipped");
                    }
                    StageSeverity::Fatal => {
                        self.pool.release(current);
                        return Err(RenderError::Execution {
                            stage: stage.name(),
                            source,
                        });
                    }
                }
            }
        }

        let output = FilmImage {
            width: current.width,
            height: current.height,
            pixels: current.pixels.clone(),
            source_format: current.format,
        };
        self.pool.release(current);
        tracing::debug!("frame done");
        Ok(output)
    }

    /// Queue a frame on a worker thread.
    ///
    /// The returned [`RenderJob`] can cancel the frame up until the worker
    /// picks it up; a cancelled job is dropped without invoking the
    /// completion callback. Once the frame is in flight it always runs to
    /// completion (or failure) and the callback fires exactly once.
    pub fn render_async<F>(
        self: &Arc<Self>,
        input: FilmImage,
        snapshot: LookSnapshot,
        aux: AuxiliaryTextures,
        on_complete: F,
    ) -> RenderJob
    where
        F: FnOnce(Result<FilmImage, RenderError>) + Send + 'static,
    {
        let state = Arc::new(AtomicU8::new(JOB_PENDING));
        let renderer = Arc::clone(self);
        let job_state = Arc::clone(&state);

        std::thread::spawn(move || {
            // Claim the job; a concurrent cancel wins this race.
            if job_state
                .compare_exchange(
                    JOB_PENDING,
                    JOB_SUBMITTED,
                    Ordering::AcqRel,
                    Ordering::Acquire,
                )
                .is_err()
            {
                tracing::debug!("render job cancelled before submission");
                return;
            }
            let result = renderer.render(&input, &snapshot, &aux);
            on_complete(result);
            job_state.store(JOB_DONE, Ordering::Release);
        });

        RenderJob { state }
    }
}

const JOB_PENDING: u8 = 0;
const JOB_SUBMITTED: u8 = 1;
const JOB_CANCELLED: u8 = 2;
const JOB_DONE: u8 = 3;

/// Handle to a queued asynchronous frame.
pub struct RenderJob {
    state: Arc<AtomicU8>,
}

impl RenderJob {
    /// Attempt to cancel the frame. Succeeds only while the job is still
    /// queued; once the worker has claimed it the frame runs to completion.
    pub fn cancel(&self) -> bool {
        self.state
            .compare_exchange(
                JOB_PENDING,
                JOB_CANCELLED,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    /// True once the completion callback has returned.
    pub fn is_done(&self) -> bool {
        self.state.load(Ordering::Acquire) == JOB_DONE
    }

    /// True if the job was cancelled before the worker claimed it.
    pub fn is_cancelled(&self) -> bool {
        self.state.load(Ordering::Acquire) == JOB_CANCELLED
    }
}
