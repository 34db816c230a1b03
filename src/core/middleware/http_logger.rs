use axum::{
    body::Body,
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use http::{HeaderValue, Method, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use std::time::Instant;
use uuid::Uuid;

use crate::config::APP_CONFIG;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub async fn http_logger(
    mut req: Request,
    next: Next,
) -> std::result::Result<impl IntoResponse, (StatusCode, String)> {
    let start_time = Instant::now();

    // Every request gets an id so sweep logs can be tied to the trigger.
    if !req.headers().contains_key(REQUEST_ID_HEADER) {
        if let Ok(value) = HeaderValue::from_str(&Uuid::new_v4().to_string()) {
            req.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
    }

    let method = req.method().clone();
    let uri = req.uri().clone();
    let path = uri.path();
    let version = req.version();
    let req_headers = req.headers().clone();
    let x_request_id = req_headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let (parts, body) = req.into_parts();

    let bytes = buffer_body("request", body).await?;
    let req_body = parse_json_body(&bytes);

    // Reconstruct request with original body
    let req = Request::from_parts(parts, Body::from(bytes));

    let mut response = next.run(req).await;

    let latency = start_time.elapsed();

    let status = response.status();
    let res_headers = response.headers().clone();

    let should_log_body = matches!(method, Method::POST | Method::PUT | Method::PATCH);
    let res_body = if should_log_body {
        let (parts, body) = response.into_parts();
        let bytes = buffer_body("response", body).await?;
        let json_body = parse_json_body(&bytes);
        response = Response::from_parts(parts, Body::from(bytes));
        json_body
    } else {
        Value::Object(serde_json::Map::new())
    };

    if method == Method::OPTIONS {
        return Ok(response);
    }

    if let Ok(value) = HeaderValue::from_str(&x_request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    // have to use span.in_scope in async fn
    let span = tracing::info_span!("http_request");
    span.in_scope(|| {
        tracing::info!(
          method = ?method,
          uri = ?uri,
          path = path,
          x_request_id = x_request_id.as_str(),
          version = ?version,
          req_headers = ?req_headers,
          req_body = req_body.to_string(),
          status = ?status,
          latency = ?latency,
          latency_micros = latency.as_micros(),
          res_headers = ?res_headers,
          res_body = res_body.to_string(),
          app_env = APP_CONFIG.app_env.to_string()
        );
    });

    Ok(response)
}

fn parse_json_body(bytes: &Bytes) -> Value {
    let body_str = String::from_utf8_lossy(bytes.as_ref());
    serde_json::from_str::<Value>(&body_str).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

pub async fn buffer_body<B>(
    direction: &str,
    body: B,
) -> std::result::Result<Bytes, (StatusCode, String)>
where
    B: axum::body::HttpBody<Data = Bytes>,
    B::Error: std::fmt::Display,
{
    let bytes = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(err) => {
            return Err((
                StatusCode::BAD_REQUEST,
                format!("failed to read {direction} body: {err}"),
            ));
        }
    };

    Ok(bytes)
}
