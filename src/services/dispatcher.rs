use serde_json::Value;

use super::translator::{translate, Translation};
use crate::models::params::ItemParameters;
use crate::models::records::{ItemError, OperationalError, ResultRecord};
use crate::repositories::{body_message, GatewayError, PaymentGateway};

pub const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Record the failure in the item's slot and keep going.
    #[default]
    Isolate,
    /// End the batch at the first failing item.
    StopOnError,
}

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Gateway setup failed: {0}")]
    Setup(GatewayError),
    #[error("Gateway authentication failed: {0}")]
    Authentication(GatewayError),
    #[error("{0}")]
    Item(ItemError),
}

/// Translates each item and calls the gateway, one item at a time.
pub struct Dispatcher<'a, G: PaymentGateway + ?Sized> {
    gateway: &'a G,
    policy: FailurePolicy,
}

impl<'a, G: PaymentGateway + ?Sized> Dispatcher<'a, G> {
    pub fn new(gateway: &'a G, policy: FailurePolicy) -> Self {
        Self { gateway, policy }
    }

    /// Authenticates once, then processes `items` in order.
    pub async fn run(&self, items: &[ItemParameters]) -> Result<Vec<ResultRecord>, BatchError> {
        self.gateway
            .ensure_authenticated()
            .await
            .map_err(BatchError::Authentication)?;

        log::info!("Processing batch of {} item(s).", items.len());
        let mut records = Vec::with_capacity(items.len());

        for (index, params) in items.iter().enumerate() {
            match self.process_item(index, params).await {
                Ok(data) => records.push(ResultRecord::Data(data)),
                Err(e) => {
                    log::warn!("{}", e);
                    if self.policy == FailurePolicy::StopOnError {
                        return Err(BatchError::Item(e));
                    }
                    records.push(ResultRecord::from(Err(e)));
                }
            }
        }

        let failed = records.iter().filter(|r| r.is_error()).count();
        log::info!(
            "Batch finished: {} succeeded, {} failed.",
            records.len() - failed,
            failed
        );

        Ok(records)
    }

    pub async fn process_item(
        &self,
        index: usize,
        params: &ItemParameters,
    ) -> Result<Value, ItemError> {
        let operational = |error: OperationalError| ItemError::Operational { item: index, error };

        let call = match translate(params).map_err(operational)? {
            Translation::Call(call) => call,
            Translation::NotImplemented { operation, tx_id } => {
                return Err(operational(OperationalError::NotImplemented { operation, tx_id }));
            }
        };

        log::debug!("Item {}: invoking {}", index, call.operation());
        call.invoke(self.gateway).await.map_err(|e| {
            let mut secrets = self.gateway.secrets();
            secrets.extend(call.secrets());

            let (message, details) = normalize(&e);
            ItemError::Api {
                item: index,
                message: redact(message, &secrets),
                details: details.map(|body| redact_value(body, &secrets)),
            }
        })
    }
}

/// Upstream body message, else the error's own message, else [`UNKNOWN_ERROR`].
pub fn normalize(error: &GatewayError) -> (String, Option<Value>) {
    let body = error.response_body().cloned();
    let message = body
        .as_ref()
        .and_then(body_message)
        .or_else(|| error.message())
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string());

    (message, body)
}

fn redact(message: String, secrets: &[&str]) -> String {
    secrets
        .iter()
        .filter(|s| !s.is_empty())
        .fold(message, |m, secret| m.replace(secret, "[REDACTED]"))
}

/// Applies [`redact`] to every string in the tree, object keys included.
fn redact_value(value: Value, secrets: &[&str]) -> Value {
    match value {
        Value::String(s) => Value::String(redact(s, secrets)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|v| redact_value(v, secrets))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (redact(k, secrets), redact_value(v, secrets)))
                .collect(),
        ),
        other => other,
    }
}
