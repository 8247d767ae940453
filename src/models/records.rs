use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::selector::Operation;

/// Failures decided locally, before or instead of calling the gateway.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OperationalError {
    #[error("Unsupported operation: {resource}/{operation}")]
    Unsupported { resource: String, operation: String },
    #[error("Operation {operation} is not available in this version. txId: {tx_id}")]
    NotImplemented { operation: Operation, tx_id: String },
    #[error("Invalid parameter '{name}': expected {expected}")]
    InvalidParameter { name: String, expected: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Operational,
    Api,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ItemError {
    #[error("Item {item}: {error}")]
    Operational { item: usize, error: OperationalError },
    #[error("Item {item}: API error: {message}")]
    Api {
        item: usize,
        message: String,
        details: Option<Value>,
    },
}

impl ItemError {
    pub fn item(&self) -> usize {
        match self {
            ItemError::Operational { item, .. } | ItemError::Api { item, .. } => *item,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ItemError::Operational { .. } => ErrorKind::Operational,
            ItemError::Api { .. } => ErrorKind::Api,
        }
    }

    /// Message without the item prefix.
    pub fn message(&self) -> String {
        match self {
            ItemError::Operational { error, .. } => error.to_string(),
            ItemError::Api { message, .. } => message.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ErrorDescriptor {
    pub kind: ErrorKind,
    pub item: usize,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl From<&ItemError> for ErrorDescriptor {
    fn from(error: &ItemError) -> Self {
        let details = match error {
            ItemError::Api { details, .. } => details.clone(),
            ItemError::Operational { .. } => None,
        };

        Self {
            kind: error.kind(),
            item: error.item(),
            message: error.message(),
            details,
        }
    }
}

/// Output of one input item: `{"data": ...}` or `{"error": {...}}`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum ResultRecord {
    #[serde(rename = "data")]
    Data(Value),
    #[serde(rename = "error")]
    Error(ErrorDescriptor),
}

impl ResultRecord {
    pub fn is_error(&self) -> bool {
        matches!(self, ResultRecord::Error(_))
    }
}

impl From<Result<Value, ItemError>> for ResultRecord {
    fn from(result: Result<Value, ItemError>) -> Self {
        match result {
            Ok(data) => ResultRecord::Data(data),
            Err(e) => ResultRecord::Error(ErrorDescriptor::from(&e)),
        }
    }
}
