use axum::body::Body;
use axum::http::header::{HeaderValue, InvalidHeaderValue, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Logs `METHOD URI STATUS ELAPSEDms` for every request.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = Instant::now();

    let response = next.run(req).await;

    let elapsed = start.elapsed().as_secs_f64() * 1000.0;
    let status = response.status().as_u16();
    tracing::info!("{method} {uri} {status} {elapsed:.3}ms");

    response
}

/// CORS policy: a request's origin is echoed back only when it equals `frontend_url`.
/// Without a frontend no origin is allowed.
pub fn cors_layer(frontend_url: Option<&str>) -> Result<CorsLayer, InvalidHeaderValue> {
    let origins = frontend_url.map(HeaderValue::from_str).transpose()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_origins_that_are_not_header_values() {
        assert!(cors_layer(Some("http://bad\norigin")).is_err());
        assert!(cors_layer(Some("http://localhost:5173")).is_ok());
        assert!(cors_layer(None).is_ok());
    }
}
