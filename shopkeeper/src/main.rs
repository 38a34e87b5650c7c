//! Store front simulation binary.
//!
//! Runs one producer and a pool of consumers over a bounded shelf and announces each step on
//! stdout. Logs go to stderr.

use crate::args::{Invocation, USAGE};
use crate::core::start_shopkeeper;

use telemetry::tracing::init_tracing;
use tracing::error;

mod args;
mod core;
mod presenter;

/// Parses the positional parameters, sets up logging and runs the simulation.
///
/// Unusable parameters print the usage line and exit successfully without starting any thread.
fn main() -> anyhow::Result<()> {
    let args = match args::parse(std::env::args_os()) {
        Invocation::Run(args) => args,
        Invocation::Display(output) => {
            print!("{output}");
            return Ok(());
        }
        Invocation::Usage => {
            println!("{USAGE}");
            return Ok(());
        }
    };

    let _log_flusher = init_tracing(env!("CARGO_BIN_NAME"))?;

    if let Err(err) = start_shopkeeper(args) {
        error!("{err:#}");
        return Err(err);
    }

    Ok(())
}
