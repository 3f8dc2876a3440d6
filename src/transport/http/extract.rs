//! Lenient JSON body extractor for the product routes.
//!
//! Unlike `axum::Json`, a missing or non-JSON `Content-Type` and an empty body both read as
//! `{}`, so the validator reports the missing fields instead of the request being rejected
//! up front. Only a JSON body that fails to parse is refused.

use crate::transport::http::error::ApiError;
use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use serde_json::Value as JsonValue;

pub struct JsonBody(pub JsonValue);

fn empty_object() -> JsonValue {
    JsonValue::Object(serde_json::Map::new())
}

fn is_json_content(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| {
            let mime = ct.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json_content(&req) {
            return Ok(JsonBody(empty_object()));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::MalformedBody(e.body_text()))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonBody(empty_object()));
        }

        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|e| ApiError::MalformedBody(e.to_string()))
    }
}
