use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crate::error::StoreResult;
use crate::simulation::SimulationHandle;
use crate::types::SimulationReport;

/// Default bound for waits in tests.
///
/// Runs in tests finish in milliseconds; the bound only matters when a run deadlocks.
pub const DEFAULT_TEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Polls `condition` until it holds or `timeout` elapses. Returns whether it held.
pub fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;

    loop {
        if condition() {
            return true;
        }

        if Instant::now() >= deadline {
            return false;
        }

        thread::sleep(Duration::from_millis(5));
    }
}

/// Waits for `handle` on a helper thread and returns its result.
///
/// # Panics
///
/// Panics if the run does not finish within [`DEFAULT_TEST_TIMEOUT`], which means some thread
/// is blocked forever.
pub fn wait_with_timeout(handle: SimulationHandle) -> StoreResult<SimulationReport> {
    wait_with_custom_timeout(handle, DEFAULT_TEST_TIMEOUT)
}

/// Same as [`wait_with_timeout`] with a custom bound.
pub fn wait_with_custom_timeout(
    handle: SimulationHandle,
    timeout: Duration,
) -> StoreResult<SimulationReport> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(handle.wait());
    });

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(_) => panic!(
            "Simulation did not terminate after {timeout:?}. \
             Some producer or consumer thread is most likely blocked forever."
        ),
    }
}
