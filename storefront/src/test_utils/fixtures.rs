use config::shared::{PacingConfig, SimulationConfig};

/// Configuration for a run that never sleeps between items.
pub fn immediate_config(buffer_capacity: usize, consumers: usize, items: u64) -> SimulationConfig {
    SimulationConfig::new(buffer_capacity, consumers, items).with_pacing(PacingConfig::immediate())
}

/// Configuration for a run with short random pauses, to shake out different interleavings.
pub fn jittery_config(buffer_capacity: usize, consumers: usize, items: u64) -> SimulationConfig {
    SimulationConfig::new(buffer_capacity, consumers, items).with_pacing(PacingConfig {
        max_produce_delay_ms: 2,
        max_consume_delay_ms: 5,
    })
}
