use super::{body_message, GatewayError, PaymentGateway};
use crate::models::cash_in::{ImmediateChargeRequest, StaticChargeRequest};
use crate::models::cash_out::{AccountPayout, EmvPayout, KeyPayout};
use crate::models::credentials::GatewayCredentials;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tokio::sync::OnceCell;
use uuid::Uuid;

const USER_AGENT: &str = concat!("intrapay-pix/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Deserialize)]
struct TokenResponse {
    #[serde(rename = "accessToken", alias = "access_token", alias = "token")]
    access_token: String,
}

pub struct IntraPayClient {
    credentials: GatewayCredentials,
    client: reqwest::Client,
    token: OnceCell<String>,
}

impl IntraPayClient {
    pub fn new(credentials: GatewayCredentials) -> Result<Self, GatewayError> {
        Self::with_timeout(credentials, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        credentials: GatewayCredentials,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        Ok(Self {
            credentials,
            client,
            token: OnceCell::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        self.credentials.base_url()
    }

    async fn authenticate(&self) -> Result<String, GatewayError> {
        let payload = json!({
            "clientKey": self.credentials.client_key,
            "clientSecret": self.credentials.client_secret,
        });

        let response = self
            .client
            .post(format!("{}/auth/token", self.base_url()))
            .json(&payload)
            .send()
            .await
            .map_err(|e| GatewayError::Authentication(self.scrub(e.to_string())))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::Authentication(self.scrub(e.to_string())))?;

        if !status.is_success() {
            let detail = match parse_body(&text) {
                Some(body) => body_message(&body).unwrap_or_else(|| text.clone()),
                None => String::new(),
            };
            return Err(GatewayError::Authentication(self.scrub(format!(
                "token request failed with status code {} {}",
                status.as_u16(),
                detail
            ))
            .trim_end()
            .to_string()));
        }

        let token: TokenResponse = serde_json::from_str(&text).map_err(|e| {
            GatewayError::Authentication(format!("Bad token response format: {}", e))
        })?;

        log::info!("Authenticated against {}", self.base_url());
        Ok(token.access_token)
    }

    async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<Value, GatewayError> {
        let token = self.token.get().ok_or(GatewayError::NotAuthenticated)?;
        let request_id = Uuid::new_v4().hyphenated().to_string();

        log::debug!("POST {} (request id {})", path, request_id);
        let response = self
            .client
            .post(format!("{}{}", self.base_url(), path))
            .bearer_auth(token)
            .header("X-Request-Id", request_id)
            .json(payload)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(self.scrub(e.to_string())))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport(self.scrub(e.to_string())))?;

        if !status.is_success() {
            return Err(api_error(status, &self.scrub(text)));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| GatewayError::Decode(e.to_string()))
    }

    fn scrub(&self, message: String) -> String {
        let secret = &self.credentials.client_secret;
        if secret.is_empty() {
            message
        } else {
            message.replace(secret.as_str(), "[REDACTED]")
        }
    }
}

fn parse_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }

    Some(serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string())))
}

fn api_error(status: StatusCode, text: &str) -> GatewayError {
    GatewayError::Api {
        status: status.as_u16(),
        body: parse_body(text),
        message: format!("Request failed with status code {}", status.as_u16()),
    }
}

#[async_trait]
impl PaymentGateway for IntraPayClient {
    async fn ensure_authenticated(&self) -> Result<(), GatewayError> {
        self.token
            .get_or_try_init(|| self.authenticate())
            .await?;

        Ok(())
    }

    fn secrets(&self) -> Vec<&str> {
        vec![self.credentials.client_secret.as_str()]
    }

    async fn create_static_charge(
        &self,
        request: &StaticChargeRequest,
    ) -> Result<Value, GatewayError> {
        self.post("/pix/cash-in/static", request).await
    }

    async fn create_immediate_charge(
        &self,
        request: &ImmediateChargeRequest,
    ) -> Result<Value, GatewayError> {
        self.post("/pix/cash-in/immediate", request).await
    }

    async fn pay_by_account(&self, request: &AccountPayout) -> Result<Value, GatewayError> {
        self.post("/pix/cash-out/account", request).await
    }

    async fn pay_by_emv(&self, request: &EmvPayout) -> Result<Value, GatewayError> {
        self.post("/pix/cash-out/emv", request).await
    }

    async fn pay_by_key(&self, request: &KeyPayout) -> Result<Value, GatewayError> {
        self.post("/pix/cash-out/key", request).await
    }
}
