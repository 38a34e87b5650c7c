use std::fmt;
use std::io::Error;

/// Name of the environment variable selecting the configuration environment.
const APP_ENVIRONMENT_ENV_NAME: &str = "APP_ENVIRONMENT";

/// Name of the development environment.
const DEV_ENV_NAME: &str = "dev";

/// Name of the production environment.
const PROD_ENV_NAME: &str = "prod";

/// Environment whose configuration file overrides the base configuration.
///
/// Development runs use the default store front pacing, production runs are expected
/// to ship a `prod` file that tightens or disables the random delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Prod,
}

impl Environment {
    /// Loads the environment from `APP_ENVIRONMENT`, falling back to [`Environment::Dev`].
    pub fn load() -> Result<Environment, Error> {
        std::env::var(APP_ENVIRONMENT_ENV_NAME)
            .unwrap_or_else(|_| DEV_ENV_NAME.into())
            .try_into()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => DEV_ENV_NAME,
            Environment::Prod => PROD_ENV_NAME,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Environment {
    type Error = Error;

    /// Parses an [`Environment`] case-insensitively.
    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            DEV_ENV_NAME => Ok(Self::Dev),
            PROD_ENV_NAME => Ok(Self::Prod),
            other => Err(Error::other(format!(
                "{other} is not a supported environment. Use either `{DEV_ENV_NAME}` or `{PROD_ENV_NAME}`.",
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_environments_case_insensitively() {
        assert_eq!(
            Environment::try_from("DEV".to_string()).unwrap(),
            Environment::Dev
        );
        assert_eq!(
            Environment::try_from("prod".to_string()).unwrap(),
            Environment::Prod
        );
    }

    #[test]
    fn rejects_unknown_environment() {
        let err = Environment::try_from("staging".to_string()).unwrap_err();
        assert!(err.to_string().contains("staging is not a supported environment"));
    }

    #[test]
    fn display_matches_file_stem() {
        assert_eq!(Environment::Prod.to_string(), "prod");
        assert_eq!(Environment::Dev.as_str(), "dev");
    }
}
