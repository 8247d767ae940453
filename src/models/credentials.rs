use serde::Deserialize;
use std::fmt;

pub const DEFAULT_BASE_URL: &str = "https://api.intrapay.io/api/financial/v1";

#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayCredentials {
    pub client_key: String,
    pub client_secret: String,
    #[serde(default)]
    pub base_url: String,
}

impl GatewayCredentials {
    pub fn new(
        client_key: impl Into<String>,
        client_secret: impl Into<String>,
        base_url: Option<String>,
    ) -> Self {
        Self {
            client_key: client_key.into(),
            client_secret: client_secret.into(),
            base_url: base_url.unwrap_or_default(),
        }
    }

    /// Base URL without trailing slash, falling back to the production API.
    pub fn base_url(&self) -> &str {
        let url = self.base_url.trim();
        if url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            url.trim_end_matches('/')
        }
    }
}

impl fmt::Debug for GatewayCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayCredentials")
            .field("client_key", &self.client_key)
            .field("client_secret", &"[REDACTED]")
            .field("base_url", &self.base_url())
            .finish()
    }
}
