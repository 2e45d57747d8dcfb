use serde::Deserialize;
use std::num::NonZeroUsize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_TIMEOUT_SECONDS: u8 = 10;
const MIN_TIMEOUT_SECONDS: u8 = 1;
const MAX_TIMEOUT_SECONDS: u8 = 60;

/// Settings of an [`Engine`](crate::Engine).
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Configuration {
    /// Duration limit of a single ping, in seconds. Must be in `1..=60`.
    pub timeout_seconds: u8,

    /// Sweep `.1` to `.255` instead of `.2` to `.254`.
    pub include_network_broadcast: bool,

    /// Maximum number of external commands in flight during one phase.
    ///
    /// `None` starts a command for every address at once.
    pub concurrency_limit: Option<NonZeroUsize>,

    /// Name of the wireless interface describing the local host.
    ///
    /// `None` picks the first interface named `wl*`, falling back to `en0`.
    pub interface: Option<String>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            include_network_broadcast: false,
            concurrency_limit: None,
            interface: None,
        }
    }
}

impl Configuration {
    /// Reads a JSON configuration file. Missing fields take their default values.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let content = tokio::fs::read(path).await?;
        let configuration: Self = serde_json::from_slice(&content)?;
        configuration.validate()?;
        Ok(configuration)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(MIN_TIMEOUT_SECONDS..=MAX_TIMEOUT_SECONDS).contains(&self.timeout_seconds) {
            return Err(ConfigurationError::InvalidTimeout(self.timeout_seconds));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.into())
    }
}

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Invalid timeout: {0}, must be between 1 and 60 seconds")]
    InvalidTimeout(u8),

    #[error("Failed to read the configuration file")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse the configuration file")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_is_valid() {
        let configuration = Configuration::default();

        configuration.validate().unwrap();
        assert_eq!(configuration.timeout(), Duration::from_secs(10));
        assert!(!configuration.include_network_broadcast);
    }

    #[test]
    fn timeout_out_of_range() {
        for timeout_seconds in [0, 61, 255] {
            let configuration = Configuration {
                timeout_seconds,
                ..Default::default()
            };

            // When
            let e = configuration.validate().unwrap_err();

            // Then
            if let ConfigurationError::InvalidTimeout(t) = e {
                assert_eq!(t, timeout_seconds);
            } else {
                panic!("Expecting `InvalidTimeout`");
            }
        }
    }

    #[test]
    fn timeout_bounds_are_inclusive() {
        for timeout_seconds in [1, 60] {
            Configuration {
                timeout_seconds,
                ..Default::default()
            }
            .validate()
            .unwrap();
        }
    }

    #[test]
    fn deserialize_partial() {
        let json = r#"{ "timeoutSeconds": 3, "concurrencyLimit": 32 }"#;

        // When
        let configuration: Configuration = serde_json::from_str(json).unwrap();

        // Then
        assert_eq!(configuration.timeout_seconds, 3);
        assert_eq!(configuration.concurrency_limit, NonZeroUsize::new(32));
        assert!(!configuration.include_network_broadcast);
        assert_eq!(configuration.interface, None);
    }

    #[test]
    fn deserialize_rejects_unknown_fields() {
        let json = r#"{ "timeout": 3 }"#;
        assert!(serde_json::from_str::<Configuration>(json).is_err());
    }

    #[tokio::test]
    async fn load_missing_file() {
        let e = Configuration::load("/__arpsweep_missing__/config.json")
            .await
            .unwrap_err();
        if let ConfigurationError::Io(_) = e {
        } else {
            panic!("Expecting `Io`");
        }
    }
}
