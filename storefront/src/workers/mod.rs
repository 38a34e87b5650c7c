//! Worker threads of a simulation: the producer, the consumers and their pool.

pub mod base;
pub mod consumer;
pub mod pacing;
pub mod pool;
pub mod producer;
