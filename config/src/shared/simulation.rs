use serde::{Deserialize, Serialize};

use crate::shared::{PacingConfig, ValidationError};

/// Inputs of a single producer/consumer run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SimulationConfig {
    /// Number of slots on the shared shelf.
    pub buffer_capacity: usize,
    /// Number of consumer threads. Zero is accepted, the run then never completes unless no
    /// items are produced.
    pub consumers: usize,
    /// Number of items the producer makes before closing.
    pub items: u64,
    #[serde(default)]
    pub pacing: PacingConfig,
}

impl SimulationConfig {
    pub fn new(buffer_capacity: usize, consumers: usize, items: u64) -> Self {
        Self {
            buffer_capacity,
            consumers,
            items,
            pacing: PacingConfig::default(),
        }
    }

    pub fn with_pacing(mut self, pacing: PacingConfig) -> Self {
        self.pacing = pacing;
        self
    }

    /// Validates the run inputs.
    ///
    /// Ensures the buffer has at least one slot and the pacing bounds are sane.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.buffer_capacity == 0 {
            return Err(ValidationError::BufferCapacityZero);
        }

        self.pacing.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_is_rejected() {
        let config = SimulationConfig::new(0, 1, 3);
        assert_eq!(config.validate(), Err(ValidationError::BufferCapacityZero));
    }

    #[test]
    fn zero_consumers_and_items_are_accepted() {
        let config = SimulationConfig::new(2, 0, 0).with_pacing(PacingConfig::immediate());
        assert!(config.validate().is_ok());
    }
}
