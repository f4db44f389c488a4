//! Off-thread puzzle generation.
//!
//! Generation can take unbounded wall-clock time across validation retries,
//! so it must never run on an interaction-handling thread. A process-wide
//! busy flag admits a single computation at a time; the caller polls the job
//! for completion. Cancellation is not supported: a computation in progress
//! always runs to completion.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use crate::error::EngineError;
use crate::generator::generate_puzzle;
use crate::puzzle::Puzzle;

static ENGINE_BUSY: AtomicBool = AtomicBool::new(false);

/// Handle to a generation running on a dedicated thread.
pub struct GenerationJob {
    result: Arc<Mutex<Option<Result<Puzzle, EngineError>>>>,
}

impl GenerationJob {
    /// Takes the finished result if the computation has completed.
    ///
    /// Non-blocking; yields the result exactly once.
    pub fn poll(&self) -> Option<Result<Puzzle, EngineError>> {
        self.result.lock().ok()?.take()
    }
}

/// Starts generating a puzzle for `seed` on a worker thread.
///
/// Returns `None` while another generation is still running: the engine
/// shares its catalog cache and is not reentrant across concurrent
/// computations.
pub fn spawn_generation(seed: u64) -> Option<GenerationJob> {
    if ENGINE_BUSY
        .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        .is_err()
    {
        return None;
    }

    let result = Arc::new(Mutex::new(None));
    let slot = Arc::clone(&result);

    thread::spawn(move || {
        let outcome = generate_puzzle(seed);
        if let Ok(mut guard) = slot.lock() {
            *guard = Some(outcome);
        }
        ENGINE_BUSY.store(false, Ordering::Release);
    });

    Some(GenerationJob { result })
}
