use crate::{
    domain::{requests::event::RequestEvent, response::event::ResponseEvent},
    state::AppState,
};
use axum::{
    Json,
    extract::{Query, State},
    http::{
        HeaderName, HeaderValue, Method, StatusCode,
        header::CONTENT_TYPE,
    },
    response::{IntoResponse, Response},
};
use prometheus_client::encoding::text::encode;
use serde_json::{Value, json};
use shared::errors::HttpError;
use std::{collections::HashMap, sync::Arc};
use tracing::{error, warn};

impl IntoResponse for ResponseEvent {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = (status, self.body).into_response();
        let headers = response.headers_mut();
        headers.remove(CONTENT_TYPE);

        for (name, value) in self.headers {
            match (
                HeaderName::try_from(name.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) {
                (Ok(header_name), Ok(header_value)) => {
                    headers.insert(header_name, header_value);
                }
                _ => warn!("Dropping invalid response header {name}"),
            }
        }

        response
    }
}

/// HTTP trigger: turns a plain HTTP request into a request envelope and
/// replays the envelope's status, headers and body.
pub async fn trigger_handler(
    State(state): State<Arc<AppState>>,
    method: Method,
    Query(params): Query<HashMap<String, String>>,
    body: String,
) -> Result<ResponseEvent, HttpError> {
    let mut event = RequestEvent::new(method.as_str());
    if !body.is_empty() {
        event = event.with_body(body);
    }
    if !params.is_empty() {
        event = event.with_query(params);
    }

    let response = state.order_handler.handle(event).await.map_err(|e| {
        error!("❌ Invocation failed: {e}");
        HttpError::from(e)
    })?;

    Ok(response)
}

/// Function-runtime style invocation with a raw JSON envelope.
pub async fn invoke_handler(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<ResponseEvent>, HttpError> {
    let event: RequestEvent = serde_json::from_str(&body)
        .map_err(|e| HttpError::BadRequest(format!("Invalid request envelope: {e}")))?;

    let response = state.order_handler.handle(event).await.map_err(|e| {
        error!("❌ Invocation failed: {e}");
        HttpError::from(e)
    })?;

    Ok(Json(response))
}

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    let mut buffer = String::new();

    let registry = state.registry.lock().await;

    if let Err(e) = encode(&mut buffer, &registry) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to encode metrics: {e}"),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        [(
            CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        buffer,
    )
        .into_response()
}

pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
