use async_trait::async_trait;
use serde_json::Value;

use crate::models::cash_in::{ImmediateChargeRequest, StaticChargeRequest};
use crate::models::cash_out::{AccountPayout, EmvPayout, KeyPayout};

pub mod intrapay;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Authentication failed: {0}")]
    Authentication(String),
    #[error("Client is not authenticated")]
    NotAuthenticated,
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        body: Option<Value>,
        message: String,
    },
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Structured body returned by the API, if any.
    pub fn response_body(&self) -> Option<&Value> {
        match self {
            GatewayError::Api { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// Plain error message, `None` when there is nothing to say.
    pub fn message(&self) -> Option<String> {
        let message = match self {
            GatewayError::Authentication(m)
            | GatewayError::Transport(m)
            | GatewayError::Decode(m) => m.clone(),
            GatewayError::Api { message, .. } => message.clone(),
            GatewayError::NotAuthenticated => self.to_string(),
        };

        if message.trim().is_empty() {
            None
        } else {
            Some(message)
        }
    }
}

/// First non-blank `message`, `error` or `detail` of a response body, or the
/// body itself when it is plain text.
pub fn body_message(body: &Value) -> Option<String> {
    let message = match body {
        Value::String(s) => Some(s.as_str()),
        Value::Object(map) => ["message", "error", "detail"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str)),
        _ => None,
    }?;

    if message.trim().is_empty() {
        None
    } else {
        Some(message.to_string())
    }
}

/// Operations offered by the Pix payment gateway.
///
/// Every call returns the raw response payload untouched.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Blocking and idempotent. Must succeed before any other call.
    async fn ensure_authenticated(&self) -> Result<(), GatewayError>;

    /// Credential values to strip from anything reported back to the caller.
    fn secrets(&self) -> Vec<&str> {
        Vec::new()
    }

    async fn create_static_charge(
        &self,
        request: &StaticChargeRequest,
    ) -> Result<Value, GatewayError>;

    async fn create_immediate_charge(
        &self,
        request: &ImmediateChargeRequest,
    ) -> Result<Value, GatewayError>;

    async fn pay_by_account(&self, request: &AccountPayout) -> Result<Value, GatewayError>;

    async fn pay_by_emv(&self, request: &EmvPayout) -> Result<Value, GatewayError>;

    async fn pay_by_key(&self, request: &KeyPayout) -> Result<Value, GatewayError>;
}
