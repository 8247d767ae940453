use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::fmt;

use crate::models::credentials::GatewayCredentials;
use crate::services::FailurePolicy;

#[derive(Deserialize)]
pub struct IntraPay {
    pub client_key: String,
    pub client_secret: String,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl fmt::Debug for IntraPay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntraPay")
            .field("client_key", &self.client_key)
            .field("client_secret", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
pub struct Server {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for Server {
    fn default() -> Self {
        Server {
            listen: default_listen(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Batch {
    #[serde(default)]
    pub stop_on_error: bool,
}

impl Batch {
    pub fn failure_policy(&self) -> FailurePolicy {
        if self.stop_on_error {
            FailurePolicy::StopOnError
        } else {
            FailurePolicy::Isolate
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub intrapay: IntraPay,
    #[serde(default)]
    pub server: Server,
    #[serde(default)]
    pub batch: Batch,
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_listen() -> String {
    "0.0.0.0:8080".to_string()
}

impl Settings {
    /// Reads `path` (optional) and overlays `INTRAPAY__<SECTION>__<KEY>` variables.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("INTRAPAY").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

impl From<&IntraPay> for GatewayCredentials {
    fn from(settings: &IntraPay) -> Self {
        GatewayCredentials::new(
            settings.client_key.clone(),
            settings.client_secret.clone(),
            settings.base_url.clone(),
        )
    }
}
