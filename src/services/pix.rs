use super::dispatcher::{BatchError, Dispatcher, FailurePolicy};
use super::RequestHandler;
use super::ServiceError;

use crate::models::credentials::GatewayCredentials;
use crate::models::params::ItemParameters;
use crate::models::records::ResultRecord;
use crate::repositories::intrapay::IntraPayClient;

use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::oneshot;
use uuid::Uuid;

pub enum PixServiceRequest {
    Execute {
        items: Vec<ItemParameters>,
        response: oneshot::Sender<Result<Vec<ResultRecord>, ServiceError>>,
    },
}

/// Builds one authenticated client for the batch and runs every item through it.
pub async fn execute_batch(
    credentials: GatewayCredentials,
    timeout: Duration,
    policy: FailurePolicy,
    items: &[ItemParameters],
) -> Result<Vec<ResultRecord>, BatchError> {
    let client = IntraPayClient::with_timeout(credentials, timeout).map_err(BatchError::Setup)?;
    Dispatcher::new(&client, policy).run(items).await
}

#[derive(Clone)]
pub struct PixRequestHandler {
    credentials: GatewayCredentials,
    timeout: Duration,
    policy: FailurePolicy,
}

impl PixRequestHandler {
    pub fn new(credentials: GatewayCredentials, timeout: Duration, policy: FailurePolicy) -> Self {
        PixRequestHandler {
            credentials,
            timeout,
            policy,
        }
    }

    async fn execute(&self, items: Vec<ItemParameters>) -> Result<Vec<ResultRecord>, ServiceError> {
        let batch_id = Uuid::new_v4().hyphenated().to_string();
        log::info!("Batch {}: received {} item(s).", batch_id, items.len());

        let records = execute_batch(self.credentials.clone(), self.timeout, self.policy, &items)
            .await
            .map_err(|e| {
                log::error!("Batch {}: {}", batch_id, e);
                ServiceError::Batch(e)
            })?;

        Ok(records)
    }
}

#[async_trait]
impl RequestHandler<PixServiceRequest> for PixRequestHandler {
    async fn handle_request(&self, request: PixServiceRequest) {
        match request {
            PixServiceRequest::Execute { items, response } => {
                let records = self.execute(items).await;
                if response.send(records).is_err() {
                    log::warn!("Pix service: requester dropped before the batch finished.");
                }
            }
        }
    }
}

pub struct PixService;

impl PixService {
    pub fn new() -> Self {
        PixService
    }
}

impl Default for PixService {
    fn default() -> Self {
        Self::new()
    }
}

impl super::Service<PixServiceRequest, PixRequestHandler> for PixService {}
