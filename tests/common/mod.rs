#![allow(dead_code)]

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

pub const CLIENT_KEY: &str = "client-key";
pub const CLIENT_SECRET: &str = "client-secret";
pub const TOKEN: &str = "tok-1";
/// `pixKeyId` that makes the static charge route reject with the client secret in the body.
pub const REJECTED_PIX_KEY: &str = "rejected-key";
/// `description` that makes the account payout route echo the request back.
pub const ECHO_DESCRIPTION: &str = "echo";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: &'static str,
    pub authorization: Option<String>,
    pub request_id: Option<String>,
    pub body: Value,
}

/// In-process stand-in for the IntraPay API.
#[derive(Default)]
pub struct StubApi {
    pub token_requests: Mutex<usize>,
    pub requests: Mutex<Vec<Recorded>>,
}

impl StubApi {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn token_requests(&self) -> usize {
        *self.token_requests.lock().unwrap()
    }

    fn record(&self, path: &'static str, headers: &HeaderMap, body: Value) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        self.requests.lock().unwrap().push(Recorded {
            path,
            authorization: header("authorization"),
            request_id: header("x-request-id"),
            body,
        });
    }
}

async fn token(
    State(stub): State<Arc<StubApi>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    *stub.token_requests.lock().unwrap() += 1;

    if body["clientKey"] == CLIENT_KEY && body["clientSecret"] == CLIENT_SECRET {
        (StatusCode::OK, Json(json!({ "accessToken": TOKEN })))
    } else {
        let secret = body["clientSecret"].as_str().unwrap_or_default();
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": format!("invalid credentials ({})", secret) })),
        )
    }
}

async fn static_charge(
    State(stub): State<Arc<StubApi>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let rejected = body["pixKeyId"] == REJECTED_PIX_KEY;
    stub.record("/pix/cash-in/static", &headers, body);
    if rejected {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": format!("client {} rejected", CLIENT_SECRET) })),
        );
    }
    (
        StatusCode::CREATED,
        Json(json!({ "txid": "tx-static-1", "status": "ACTIVE" })),
    )
}

async fn immediate_charge(
    State(stub): State<Arc<StubApi>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    stub.record("/pix/cash-in/immediate", &headers, body);
    (StatusCode::CREATED, Json(json!({ "txid": "tx-immediate-1" })))
}

async fn pay_by_account(
    State(stub): State<Arc<StubApi>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let echo = (body["description"] == ECHO_DESCRIPTION).then(|| body.clone());
    stub.record("/pix/cash-out/account", &headers, body);
    match echo {
        Some(body) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "rejected", "echo": body })),
        )
            .into_response(),
        None => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}

async fn pay_by_emv(
    State(stub): State<Arc<StubApi>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    stub.record("/pix/cash-out/emv", &headers, body);
    (StatusCode::OK, Json(json!({ "endToEndId": "E2E-EMV" })))
}

async fn pay_by_key(
    State(stub): State<Arc<StubApi>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    stub.record("/pix/cash-out/key", &headers, body);
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "message": "insufficient funds", "code": "E01" })),
    )
}

/// Serves the stub on an ephemeral port and returns its base URL.
pub async fn spawn_stub() -> (String, Arc<StubApi>) {
    let stub = Arc::new(StubApi::default());

    let app = Router::new()
        .route("/auth/token", post(token))
        .route("/pix/cash-in/static", post(static_charge))
        .route("/pix/cash-in/immediate", post(immediate_charge))
        .route("/pix/cash-out/account", post(pay_by_account))
        .route("/pix/cash-out/emv", post(pay_by_emv))
        .route("/pix/cash-out/key", post(pay_by_key))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), stub)
}
