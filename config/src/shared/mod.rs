//! Shared configuration types for the storefront simulation.

mod base;
mod pacing;
mod shopkeeper;
mod simulation;

pub use base::ValidationError;
pub use pacing::PacingConfig;
pub use shopkeeper::ShopkeeperConfig;
pub use simulation::SimulationConfig;
