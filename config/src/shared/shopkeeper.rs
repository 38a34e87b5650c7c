use serde::{Deserialize, Serialize};

use crate::load::Config;
use crate::shared::{PacingConfig, ValidationError};

/// Settings of the `shopkeeper` binary that come from configuration files and `APP_` variables.
///
/// The shelf size, number of consumers and number of items are per-run inputs and are passed on
/// the command line instead.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ShopkeeperConfig {
    #[serde(default)]
    pub pacing: PacingConfig,
}

impl Config for ShopkeeperConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        self.pacing.validate()
    }
}
