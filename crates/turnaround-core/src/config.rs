//! Run configuration threaded through every engine call.

use crate::pose::ReferenceMeasurements;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Smallest frame count a turn can be spread over.
pub const MIN_FRAMES: usize = 2;

/// User-supplied settings for one run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnConfig {
    /// Number of in-between frames `n` (at least `MIN_FRAMES`).
    pub frames: usize,
    /// When unset, the nose is mirrored in every quarter frame.
    pub nose_points_right: bool,
}

/// Cooperative cancellation, checked once per frame.
///
/// Clones share the same flag, so it can be handed to another thread.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Everything a pose engine needs besides the scene itself.
#[derive(Clone, Debug)]
pub struct RunContext {
    pub config: TurnConfig,
    pub measurements: ReferenceMeasurements,
    pub cancel: CancelFlag,
}

impl RunContext {
    pub fn new(config: TurnConfig, measurements: ReferenceMeasurements) -> Self {
        Self {
            config,
            measurements,
            cancel: CancelFlag::new(),
        }
    }

    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Shorthand for `config.frames`.
    pub fn n(&self) -> usize {
        self.config.frames
    }
}
