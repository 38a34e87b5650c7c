use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::shared::ValidationError;

/// Upper bounds of the random pauses taken by the producer and the consumers.
///
/// Each worker sleeps a uniformly random duration in `[0, max)` after every item to simulate
/// production and shopping latency. A bound of `0` disables the pause.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PacingConfig {
    /// Maximum pause, in milliseconds, after the producer shelves an item.
    #[serde(default = "default_max_produce_delay_ms")]
    pub max_produce_delay_ms: u64,
    /// Maximum pause, in milliseconds, after a consumer buys an item.
    #[serde(default = "default_max_consume_delay_ms")]
    pub max_consume_delay_ms: u64,
}

impl PacingConfig {
    /// Default producer pause bound, a tenth of a second on average.
    pub const DEFAULT_MAX_PRODUCE_DELAY_MS: u64 = 200;

    /// Default consumer pause bound.
    pub const DEFAULT_MAX_CONSUME_DELAY_MS: u64 = 1000;

    /// Maximum pause that can be configured for either side.
    pub const MAX_DELAY_MS: u64 = 60_000;

    /// Pacing that never sleeps, used by tests and benchmarks.
    pub fn immediate() -> Self {
        Self {
            max_produce_delay_ms: 0,
            max_consume_delay_ms: 0,
        }
    }

    pub fn max_produce_delay(&self) -> Duration {
        Duration::from_millis(self.max_produce_delay_ms)
    }

    pub fn max_consume_delay(&self) -> Duration {
        Duration::from_millis(self.max_consume_delay_ms)
    }

    /// Validates that both bounds stay below [`PacingConfig::MAX_DELAY_MS`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("pacing.max_produce_delay_ms", self.max_produce_delay_ms),
            ("pacing.max_consume_delay_ms", self.max_consume_delay_ms),
        ] {
            if value > Self::MAX_DELAY_MS {
                return Err(ValidationError::InvalidFieldValue {
                    field: field.to_string(),
                    constraint: format!("must be at most {}", Self::MAX_DELAY_MS),
                });
            }
        }

        Ok(())
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            max_produce_delay_ms: default_max_produce_delay_ms(),
            max_consume_delay_ms: default_max_consume_delay_ms(),
        }
    }
}

fn default_max_produce_delay_ms() -> u64 {
    PacingConfig::DEFAULT_MAX_PRODUCE_DELAY_MS
}

fn default_max_consume_delay_ms() -> u64 {
    PacingConfig::DEFAULT_MAX_CONSUME_DELAY_MS
}
