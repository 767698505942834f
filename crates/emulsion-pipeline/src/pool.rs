//! Intermediate-surface pool with size/format reuse and LRU eviction.

use std::collections::HashSet;

use emulsion_core::image::PixelFormat;
use parking_lot::Mutex;

use crate::error::PoolError;
use crate::surface::Surface;

/// Default cap on total surfaces (free + in flight).
pub const DEFAULT_POOL_CAP: usize = 8;

struct FreeEntry {
    surface: Surface,
    /// Tick of the last release, for LRU eviction.
    last_used: u64,
}

struct PoolInner {
    free: Vec<FreeEntry>,
    /// Ids currently handed out. A released surface must be in here.
    in_flight: HashSet<u64>,
    next_id: u64,
    tick: u64,
}

/// Pool of reusable render surfaces.
///
/// Surfaces are tagged by (width, height, format) and reused when the tag
/// matches. A request for a new size above the cap evicts the
/// least-recently-used free surface; if every surface is in flight the
/// acquire fails with [`PoolError::Exhausted`].
///
/// The free list is guarded by a mutex, so one pool may serve concurrent
/// frame renders from multiple threads.
pub struct SurfacePool {
    cap: usize,
    inner: Mutex<PoolInner>,
}

impl SurfacePool {
    /// Create a pool with the given surface cap.
    pub fn new(cap: usize) -> Self {
        Self {
            cap: cap.max(1),
            inner: Mutex::new(PoolInner {
                free: Vec::new(),
                in_flight: HashSet::new(),
                next_id: 1,
                tick: 0,
            }),
        }
    }

    /// Acquire a surface of exactly (width, height, format).
    ///
    /// Reuses a matching free surface when available; otherwise allocates,
    /// evicting the least-recently-used incompatible free surface when the
    /// pool is at cap.
    pub fn acquire(
        &self,
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> Result<Surface, PoolError> {
        let mut inner = self.inner.lock();

        // Exact-tag reuse.
        if let Some(pos) = inner.free.iter().position(|e| {
            e.surface.width == width && e.surface.height == height && e.surface.format == format
        }) {
            let entry = inner.free.swap_remove(pos);
            let id = entry.surface.id;
            inner.in_flight.insert(id);
            tracing::debug!(id, width, height, %format, "surface reused");
            return Ok(entry.surface);
        }

        // Room to grow?
        if inner.free.len() + inner.in_flight.len() >= self.cap {
            // Evict the LRU free surface to make room.
            let lru = inner
                .free
                .iter()
                .enumerate()
                .min_by_key(|(_, e)| e.last_used)
                .map(|(i, _)| i);
            match lru {
                Some(pos) => {
                    let evicted = inner.free.swap_remove(pos);
                    tracing::debug!(
                        id = evicted.surface.id,
                        width = evicted.surface.width,
                        height = evicted.surface.height,
                        "surface evicted"
                    );
                }
                None => {
                    return Err(PoolError::Exhausted {
                        in_use: inner.in_flight.len(),
                        cap: self.cap,
                        width,
                        height,
                        format,
                    });
                }
            }
        }

        let id = inner.next_id;
        inner.next_id += 1;
        inner.in_flight.insert(id);
        tracing::debug!(id, width, height, %format, "surface allocated");
        Ok(Surface {
            id,
            width,
            height,
            format,
            pixels: vec![[0.0; 4]; (width as usize) * (height as usize)],
        })
    }

    /// Return a surface to the free list.
    ///
    /// Surfaces must only be released after all work reading them has
    /// completed; the orchestrator enforces submit → signal → release.
    pub fn release(&self, surface: Surface) {
        let mut inner = self.inner.lock();
        debug_assert!(
            inner.in_flight.contains(&surface.id),
            "released a surface the pool never issued"
        );
        inner.in_flight.remove(&surface.id);
        inner.tick += 1;
        let last_used = inner.tick;
        inner.free.push(FreeEntry { surface, last_used });
    }

    /// Surfaces currently in flight.
    pub fn in_flight(&self) -> usize {
        self.inner.lock().in_flight.len()
    }

    /// Total surfaces currently held or issued by the pool.
    pub fn total(&self) -> usize {
        let inner = self.inner.lock();
        inner.free.len() + inner.in_flight.len()
    }

    /// The configured cap.
    pub fn cap(&self) -> usize {
        self.cap
    }
}

impl Default for SurfacePool {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_CAP)
    }
}
