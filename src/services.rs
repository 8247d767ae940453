use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::models::credentials::GatewayCredentials;
use crate::settings::Settings;

pub mod dispatcher;
pub mod fields;
pub mod http;
pub mod pix;
pub mod translator;

pub use dispatcher::{BatchError, Dispatcher, FailurePolicy};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Internal error: {0}")]
    Internal(String),
    #[error("Communication error: {0} - {1}")]
    Communication(String, String),
    #[error(transparent)]
    Batch(#[from] BatchError),
}

#[async_trait]
pub trait RequestHandler<T>: Send + Sync + 'static
where
    T: Send + 'static,
{
    async fn handle_request(&self, request: T);
}

#[async_trait]
pub trait Service<T, H>: Send + Sync + 'static
where
    T: Send + 'static,
    H: RequestHandler<T> + Clone + Send,
{
    async fn run(&mut self, handler: H, receiver: &mut mpsc::Receiver<T>) {
        while let Some(request) = receiver.recv().await {
            let handler = handler.clone();

            tokio::spawn(async move {
                handler.handle_request(request).await;
            });
        }
    }
}

/// Spawns the Pix service and serves HTTP until the listener stops.
pub async fn start_services(settings: Settings) -> Result<(), anyhow::Error> {
    let (pix_tx, mut pix_rx) = mpsc::channel(512);

    let credentials = GatewayCredentials::from(&settings.intrapay);
    let timeout = Duration::from_secs(settings.intrapay.timeout_seconds);
    let policy = settings.batch.failure_policy();

    log::info!("Starting Pix service against {}.", credentials.base_url());
    let mut pix_service = pix::PixService::new();
    tokio::spawn(async move {
        pix_service
            .run(
                pix::PixRequestHandler::new(credentials, timeout, policy),
                &mut pix_rx,
            )
            .await;
    });

    log::info!("Starting HTTP server.");
    http::start_http_server(&settings.server.listen, pix_tx).await
}
