use std::sync::Arc;

use tracing::{debug, info};

use crate::context::SharedContext;
use crate::error::StoreResult;
use crate::observer::SimulationEvent;
use crate::types::Item;
use crate::workers::base::{ThreadWorkerHandle, Worker, WorkerType};
use crate::workers::pacing::Pacer;

pub type ProducerHandle = ThreadWorkerHandle<u64>;

/// Makes the run's items one by one and shelves them in serial order.
#[derive(Debug)]
pub struct Producer {
    context: Arc<SharedContext>,
}

impl Producer {
    pub fn new(context: Arc<SharedContext>) -> Self {
        Self { context }
    }

    /// Runs the production loop on the calling thread and returns the number of items made.
    ///
    /// For each serial the producer waits for an empty slot, shelves the item, hands a filled
    /// token to the consumers and pauses. `all_produced` is raised exactly once, after the last
    /// filled token has been released.
    fn run(self) -> StoreResult<u64> {
        let context = self.context;
        let pacer = Pacer::new(context.pacing.max_produce_delay());

        info!(total = context.total, "producer started");
        context.emit(SimulationEvent::ProductionStarted {
            total: context.total,
        });

        for serial in 1..=context.total {
            context.emit(SimulationEvent::ProducerWaiting { serial });

            // Token first, then the shelf lock.
            context.empty.acquire();
            let outcome = context.buffer.put(Item::new(serial))?;
            context.filled.release();
            context.coordinator.notify_item_available();

            debug!(serial, occupied = outcome.occupied, "item shelved");
            context.emit(SimulationEvent::Produced {
                serial,
                occupied: outcome.occupied,
            });

            pacer.pause();
        }

        context.coordinator.mark_all_produced();
        info!(produced = context.total, "producer finished");

        Ok(context.total)
    }
}

impl Worker for Producer {
    type Handle = ProducerHandle;

    fn start(self) -> StoreResult<Self::Handle> {
        ThreadWorkerHandle::spawn(WorkerType::Producer, move || self.run())
    }
}
