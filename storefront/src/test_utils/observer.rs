use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::observer::{Observer, SimulationEvent};
use crate::types::ConsumerId;

/// Observer keeping every event in arrival order.
///
/// Clones share the same recording, so one clone can be handed to the simulation while the test
/// keeps another.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<SimulationEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SimulationEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Serials in the order the producer shelved them.
    pub fn produced_serials(&self) -> Vec<u64> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SimulationEvent::Produced { serial, .. } => Some(serial),
                _ => None,
            })
            .collect()
    }

    /// Serials in the order they were taken off the shelf.
    ///
    /// Consumers report after leaving the shelf lock, so reports can arrive out of take order;
    /// they are put back in order using the take sequence carried by each event.
    pub fn consumed_serials(&self) -> Vec<u64> {
        let mut takes = self
            .events()
            .into_iter()
            .filter_map(|event| match event {
                SimulationEvent::Consumed {
                    serial, sequence, ..
                } => Some((sequence, serial)),
                _ => None,
            })
            .collect::<Vec<_>>();
        takes.sort_unstable();

        takes.into_iter().map(|(_, serial)| serial).collect()
    }

    /// Take sequences that were reported more than once or skipped.
    pub fn sequence_gaps_or_duplicates(&self) -> Vec<u64> {
        let mut sequences = self
            .events()
            .into_iter()
            .filter_map(|event| match event {
                SimulationEvent::Consumed { sequence, .. } => Some(sequence),
                _ => None,
            })
            .collect::<Vec<_>>();
        sequences.sort_unstable();

        let mut anomalies = vec![];
        for (index, sequence) in sequences.into_iter().enumerate() {
            if sequence != index as u64 + 1 {
                anomalies.push(sequence);
            }
        }

        anomalies
    }

    /// Serials bought by each consumer, in the order that consumer bought them.
    pub fn consumed_by_consumer(&self) -> BTreeMap<ConsumerId, Vec<u64>> {
        let mut by_consumer: BTreeMap<ConsumerId, Vec<u64>> = BTreeMap::new();
        for event in self.events() {
            if let SimulationEvent::Consumed {
                consumer_id,
                serial,
                ..
            } = event
            {
                by_consumer.entry(consumer_id).or_default().push(serial);
            }
        }

        by_consumer
    }

    /// Consumers that reported going home, with the count each reported.
    pub fn exited_consumers(&self) -> BTreeMap<ConsumerId, u64> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SimulationEvent::ConsumerExited {
                    consumer_id,
                    consumed,
                } => Some((consumer_id, consumed)),
                _ => None,
            })
            .collect()
    }

    /// Occupancies reported after every put and take.
    pub fn occupancies(&self) -> Vec<usize> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SimulationEvent::Produced { occupied, .. }
                | SimulationEvent::Consumed { occupied, .. } => Some(occupied),
                _ => None,
            })
            .collect()
    }

    pub fn count_matching(&self, predicate: impl Fn(&SimulationEvent) -> bool) -> usize {
        self.events().iter().filter(|event| predicate(event)).count()
    }
}

impl Observer for RecordingObserver {
    fn on_event(&self, event: SimulationEvent) {
        self.events.lock().unwrap().push(event);
    }
}
