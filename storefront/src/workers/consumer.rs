use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, trace};

use crate::concurrency::shutdown::WaitOutcome;
use crate::context::SharedContext;
use crate::error::StoreResult;
use crate::observer::SimulationEvent;
use crate::types::ConsumerId;
use crate::workers::base::{ThreadWorkerHandle, Worker, WorkerType};
use crate::workers::pacing::Pacer;

pub type ConsumerHandle = ThreadWorkerHandle<u64>;

/// Phases a consumer goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumerPhase {
    WaitingForItemOrShutdown,
    Consuming,
    Terminated,
}

impl fmt::Display for ConsumerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsumerPhase::WaitingForItemOrShutdown => f.write_str("waiting_for_item_or_shutdown"),
            ConsumerPhase::Consuming => f.write_str("consuming"),
            ConsumerPhase::Terminated => f.write_str("terminated"),
        }
    }
}

/// Buys items off the shelf until the run is over.
#[derive(Debug)]
pub struct Consumer {
    consumer_id: ConsumerId,
    context: Arc<SharedContext>,
}

impl Consumer {
    pub fn new(consumer_id: ConsumerId, context: Arc<SharedContext>) -> Self {
        Self {
            consumer_id,
            context,
        }
    }

    /// Runs the consumer loop on the calling thread and returns the number of items bought.
    fn run(self) -> StoreResult<u64> {
        let Self {
            consumer_id,
            context,
        } = self;
        let pacer = Pacer::new(context.pacing.max_consume_delay());
        let mut bought = 0;
        let mut phase = ConsumerPhase::WaitingForItemOrShutdown;

        debug!(consumer_id, "consumer started");

        loop {
            trace!(consumer_id, %phase, "waiting for an item or shutdown");

            match context.coordinator.wait_for_item(&context.filled) {
                WaitOutcome::Claimed => {}
                outcome @ (WaitOutcome::AllConsumed | WaitOutcome::NothingLeft) => {
                    phase = ConsumerPhase::Terminated;
                    info!(consumer_id, bought, ?outcome, %phase, "consumer going home");
                    break;
                }
            }

            phase = ConsumerPhase::Consuming;
            context.emit(SimulationEvent::ConsumerWaiting { consumer_id });

            // The filled token is already held, so the shelf cannot be empty here.
            let outcome = context.buffer.take()?;
            context.empty.release();
            bought += 1;

            debug!(
                consumer_id,
                serial = outcome.item.serial(),
                occupied = outcome.occupied,
                %phase,
                "item bought"
            );
            context.emit(SimulationEvent::Consumed {
                consumer_id,
                serial: outcome.item.serial(),
                sequence: outcome.consumed,
                occupied: outcome.occupied,
            });

            if outcome.last {
                context.coordinator.mark_all_consumed();
            }

            pacer.pause();
            phase = ConsumerPhase::WaitingForItemOrShutdown;
        }

        context.emit(SimulationEvent::ConsumerExited {
            consumer_id,
            consumed: bought,
        });

        Ok(bought)
    }
}

impl Worker for Consumer {
    type Handle = ConsumerHandle;

    fn start(self) -> StoreResult<Self::Handle> {
        let worker_type = WorkerType::Consumer {
            consumer_id: self.consumer_id,
        };
        ThreadWorkerHandle::spawn(worker_type, move || self.run())
    }
}
