use std::fmt;

/// Identifier of a consumer thread, used for logging and reporting only.
pub type ConsumerId = usize;

/// An item made by the producer.
///
/// Serial numbers start at 1 and grow by one per item within a run, so the sequence of serials
/// taken from the shelf doubles as a check of its FIFO order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Item {
    serial: u64,
}

impl Item {
    pub fn new(serial: u64) -> Self {
        Self { serial }
    }

    pub fn serial(&self) -> u64 {
        self.serial
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.serial)
    }
}

/// Snapshot of a run's progress.
///
/// Values are read under their owning locks one after the other, so a snapshot taken while
/// workers are running is not a single atomic view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub total: u64,
    pub produced: u64,
    pub consumed: u64,
    /// Slots currently holding an item.
    pub occupied: usize,
    pub all_produced: bool,
    pub all_consumed: bool,
    /// Whether the producer thread has returned.
    pub producer_finished: bool,
    /// Consumer threads that have not returned yet.
    pub live_consumers: usize,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationReport {
    pub produced: u64,
    pub consumed: u64,
    /// Number of items bought by each consumer, indexed by [`ConsumerId`].
    pub per_consumer: Vec<u64>,
}
