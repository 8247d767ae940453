use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::{mpsc, oneshot};
use tower_http::trace::TraceLayer;

use super::dispatcher::BatchError;
use super::fields;
use super::pix::PixServiceRequest;
use super::ServiceError;
use crate::models::params::ItemParameters;
use crate::models::records::ErrorDescriptor;
use crate::models::selector::OperationSelector;

#[derive(Clone)]
struct AppState {
    pix_channel: mpsc::Sender<PixServiceRequest>,
}

#[derive(Deserialize)]
struct ExecuteRequest {
    items: Vec<ItemParameters>,
}

#[derive(Deserialize)]
struct FieldsQuery {
    resource: Option<String>,
    operation: Option<String>,
}

fn error_response(status: StatusCode, description: String) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "description": description })))
}

async fn execute(
    State(state): State<AppState>,
    Json(req): Json<ExecuteRequest>,
) -> (StatusCode, Json<Value>) {
    let (response_tx, response_rx) = oneshot::channel();

    let send_result = state
        .pix_channel
        .send(PixServiceRequest::Execute {
            items: req.items,
            response: response_tx,
        })
        .await;

    if let Err(e) = send_result {
        let error = ServiceError::Communication("Pix".to_string(), e.to_string());
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, error.to_string());
    }

    let result = match response_rx.await {
        Ok(result) => result,
        Err(e) => Err(ServiceError::Internal(format!(
            "Failed to receive response: {}",
            e
        ))),
    };

    match result {
        Ok(records) => (StatusCode::OK, Json(json!({ "results": records }))),
        Err(ServiceError::Batch(BatchError::Item(item_error))) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": ErrorDescriptor::from(&item_error) })),
        ),
        Err(ServiceError::Batch(e)) => error_response(StatusCode::BAD_GATEWAY, e.to_string()),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

async fn list_fields(Query(query): Query<FieldsQuery>) -> (StatusCode, Json<Value>) {
    match (query.resource, query.operation) {
        (None, None) => (StatusCode::OK, Json(json!({ "fields": fields::fields() }))),
        (resource, operation) => {
            let selector =
                OperationSelector::new(resource.unwrap_or_default(), operation.unwrap_or_default());

            match selector.resolve() {
                Some((resource, operation)) => (
                    StatusCode::OK,
                    Json(json!({ "fields": fields::applicable_fields(resource, operation) })),
                ),
                None => error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Unsupported operation: {}", selector),
                ),
            }
        }
    }
}

/// One field, plus whether it is shown when a resource/operation pair is given.
async fn describe_field(
    Path(name): Path<String>,
    Query(query): Query<FieldsQuery>,
) -> (StatusCode, Json<Value>) {
    let Some(spec) = fields::field(&name) else {
        return error_response(StatusCode::NOT_FOUND, format!("Unknown field: {}", name));
    };

    match (query.resource, query.operation) {
        (None, None) => (StatusCode::OK, Json(json!({ "field": spec }))),
        (resource, operation) => {
            let selector =
                OperationSelector::new(resource.unwrap_or_default(), operation.unwrap_or_default());

            match selector.resolve() {
                Some((resource, operation)) => (
                    StatusCode::OK,
                    Json(json!({
                        "field": spec,
                        "applicable": fields::is_applicable(&name, resource, operation),
                    })),
                ),
                None => error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Unsupported operation: {}", selector),
                ),
            }
        }
    }
}

pub fn router(pix_channel: mpsc::Sender<PixServiceRequest>) -> Router {
    let app_state = AppState { pix_channel };

    Router::new()
        .route("/execute", post(execute))
        .route("/fields", get(list_fields))
        .route("/fields/{name}", get(describe_field))
        .route("/health", get(|| async { "OK" }))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}

pub async fn start_http_server(
    listen: &str,
    pix_channel: mpsc::Sender<PixServiceRequest>,
) -> Result<(), anyhow::Error> {
    let listener = tokio::net::TcpListener::bind(listen).await?;
    log::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(pix_channel)).await?;

    Ok(())
}
