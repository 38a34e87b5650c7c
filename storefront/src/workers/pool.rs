use std::sync::Arc;

use tracing::{debug, error};

use crate::context::SharedContext;
use crate::error::{StoreError, StoreResult};
use crate::workers::base::{Worker, WorkerHandle};
use crate::workers::consumer::{Consumer, ConsumerHandle};

/// The fixed set of consumer threads of a run.
///
/// The pool is sized once at start and never grows or shrinks.
#[derive(Debug)]
pub struct ConsumerPool {
    handles: Vec<ConsumerHandle>,
}

impl ConsumerPool {
    /// Starts `count` consumers with ids `0..count`.
    ///
    /// If a thread cannot be spawned, the consumers already running are released through the
    /// coordinator and joined before the spawn error is returned.
    pub fn start(count: usize, context: &Arc<SharedContext>) -> StoreResult<Self> {
        let mut handles = Vec::with_capacity(count);

        for consumer_id in 0..count {
            match Consumer::new(consumer_id, context.clone()).start() {
                Ok(handle) => {
                    debug!(consumer_id, "spawned consumer in pool");
                    handles.push(handle);
                }
                Err(err) => {
                    error!(consumer_id, error = %err, "failed to spawn consumer, releasing pool");
                    context.coordinator.mark_all_produced();
                    context.coordinator.mark_all_consumed();
                    let _ = Self { handles }.wait_all();

                    return Err(err);
                }
            }
        }

        Ok(Self { handles })
    }

    /// Number of consumer threads that have not returned yet.
    pub fn live_count(&self) -> usize {
        self.handles
            .iter()
            .filter(|handle| !handle.is_finished())
            .count()
    }

    /// Joins every consumer and returns the number of items each one bought, indexed by
    /// [`crate::types::ConsumerId`].
    ///
    /// All consumers are joined even when some fail; failures are aggregated into one error.
    pub fn wait_all(self) -> StoreResult<Vec<u64>> {
        let mut bought = Vec::with_capacity(self.handles.len());
        let mut errors = Vec::new();

        for (consumer_id, handle) in self.handles.into_iter().enumerate() {
            match handle.wait() {
                Ok(count) => bought.push(count),
                Err(err) => {
                    error!(consumer_id, error = %err, "consumer completed with error");
                    bought.push(0);
                    errors.push(err);
                }
            }
        }

        if errors.is_empty() {
            Ok(bought)
        } else {
            Err(StoreError::from(errors))
        }
    }
}
