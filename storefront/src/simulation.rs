use std::sync::Arc;
use std::time::Duration;

use config::shared::SimulationConfig;
use tracing::{error, info};

use crate::context::SharedContext;
use crate::error::{StoreError, StoreResult};
use crate::observer::{Observer, SimulationEvent};
use crate::types::{Progress, SimulationReport};
use crate::workers::base::{Worker, WorkerHandle};
use crate::workers::pool::ConsumerPool;
use crate::workers::producer::{Producer, ProducerHandle};

/// A producer/consumer run that has been configured but not started.
pub struct Simulation {
    config: SimulationConfig,
    observer: Arc<dyn Observer>,
}

impl Simulation {
    /// Validates `config` and prepares a run reporting to `observer`.
    pub fn new<O>(config: SimulationConfig, observer: O) -> StoreResult<Self>
    where
        O: Observer + 'static,
    {
        config.validate()?;

        Ok(Self {
            config,
            observer: Arc::new(observer),
        })
    }

    /// Spawns the consumers and the producer and returns immediately.
    pub fn start(self) -> StoreResult<SimulationHandle> {
        info!(
            buffer_capacity = self.config.buffer_capacity,
            consumers = self.config.consumers,
            items = self.config.items,
            "starting simulation"
        );

        let context = Arc::new(SharedContext::new(&self.config, self.observer));

        let pool = ConsumerPool::start(self.config.consumers, &context)?;

        let producer = match Producer::new(context.clone()).start() {
            Ok(producer) => producer,
            Err(err) => {
                error!(error = %err, "failed to spawn producer, releasing consumers");
                context.coordinator.mark_all_produced();
                context.coordinator.mark_all_consumed();
                let _ = pool.wait_all();

                return Err(err);
            }
        };

        Ok(SimulationHandle {
            context,
            producer,
            pool,
        })
    }

    /// Starts the run and blocks until it completes.
    pub fn run(self) -> StoreResult<SimulationReport> {
        self.start()?.wait()
    }
}

/// Handle to a running simulation.
///
/// Dropping the handle does not stop the run: its threads keep going detached.
#[derive(Debug)]
pub struct SimulationHandle {
    context: Arc<SharedContext>,
    producer: ProducerHandle,
    pool: ConsumerPool,
}

impl SimulationHandle {
    pub fn progress(&self) -> Progress {
        self.context
            .progress(self.producer.is_finished(), self.pool.live_count())
    }

    /// Waits up to `timeout` for every item to be consumed. Returns whether that happened.
    ///
    /// A run without consumers and with items to make never completes; this is the way to
    /// observe it without blocking forever.
    pub fn wait_for_completion(&self, timeout: Duration) -> bool {
        self.context.coordinator.wait_all_consumed_timeout(timeout)
    }

    /// Blocks until the producer and every consumer have returned.
    ///
    /// Once the producer is done the calling thread waits for the last take to raise
    /// `all_consumed`, broadcasts it once more and joins the consumers.
    pub fn wait(self) -> StoreResult<SimulationReport> {
        let Self {
            context,
            producer,
            pool,
        } = self;
        let mut errors = vec![];

        let produced = match producer.wait() {
            Ok(produced) => produced,
            Err(err) => {
                // Without a producer no more items arrive; let idle consumers go home.
                context.coordinator.mark_all_produced();
                errors.push(err);
                context.buffer.produced()
            }
        };
        context.emit(SimulationEvent::ProductionFinished);

        if errors.is_empty() {
            info!(produced, "producer completed, waiting for consumers");
            context.emit(SimulationEvent::AwaitingConsumers);

            context.coordinator.wait_all_consumed();
            context.coordinator.mark_all_consumed();
        }

        let per_consumer = match pool.wait_all() {
            Ok(per_consumer) => per_consumer,
            Err(err) => {
                errors.push(err);
                vec![]
            }
        };

        if !errors.is_empty() {
            return Err(StoreError::from(errors));
        }

        let consumed = context.buffer.consumed();
        info!(produced, consumed, "simulation completed");
        context.emit(SimulationEvent::SimulationCompleted { consumed });

        Ok(SimulationReport {
            produced,
            consumed,
            per_consumer,
        })
    }
}
