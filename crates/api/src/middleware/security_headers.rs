//! Security headers middleware.
//!
//! Applies the header policy for a JSON API that serves attendee PII:
//! responses must never be interpreted as markup, framed, or cached by
//! intermediaries.

use axum::{
    body::Body,
    http::{header, HeaderValue, Request},
    middleware::Next,
    response::Response,
};

/// Middleware that adds security headers to all responses.
///
/// - `X-Content-Type-Options: nosniff` — responses are JSON, never sniffed
/// - `X-Frame-Options: DENY` — nothing here is embeddable
/// - `Referrer-Policy: no-referrer` — URLs can carry event and user IDs
/// - `Cache-Control: no-store` on `/api` paths — registration and profile
///   data must not land in shared caches (ops endpoints stay cacheable)
/// - `Strict-Transport-Security` — only when `EV__SECURITY__HSTS_ENABLED`
///   is "true"; it belongs behind real TLS termination
pub async fn security_headers_middleware(req: Request<Body>, next: Next) -> Response {
    let is_api_path = req.uri().path().starts_with("/api");
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        header::HeaderName::from_static("x-content-type-options"),
        HeaderValue::from_static("nosniff"),
    );

    headers.insert(
        header::HeaderName::from_static("x-frame-options"),
        HeaderValue::from_static("DENY"),
    );

    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("no-referrer"),
    );

    if is_api_path {
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    }

    if std::env::var("EV__SECURITY__HSTS_ENABLED")
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(false)
    {
        headers.insert(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        );
    }

    response
}
