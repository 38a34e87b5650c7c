use config::load_config;
use config::shared::{ShopkeeperConfig, SimulationConfig};
use storefront::simulation::Simulation;
use tracing::info;

use crate::args::AppArgs;
use crate::presenter::StdoutPresenter;

/// Loads the file and environment settings and builds the run configuration from `args`.
pub fn build_simulation_config(args: &AppArgs) -> anyhow::Result<SimulationConfig> {
    let shopkeeper_config: ShopkeeperConfig = load_config()?;

    Ok(
        SimulationConfig::new(args.buffer_size, args.num_consumers, args.max_items)
            .with_pacing(shopkeeper_config.pacing),
    )
}

/// Runs the store front to completion, announcing every step on stdout.
pub fn start_shopkeeper(args: AppArgs) -> anyhow::Result<()> {
    let config = build_simulation_config(&args)?;
    info!(?config, "loaded simulation configuration");

    let report = Simulation::new(config, StdoutPresenter)?.run()?;
    info!(
        produced = report.produced,
        consumed = report.consumed,
        per_consumer = ?report.per_consumer,
        "store front closed"
    );

    Ok(())
}
