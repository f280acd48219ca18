//! Cross-origin headers
//!
//! Every response carries the same fixed set of headers, preflight or not.
//! `tower_http::cors::CorsLayer` refuses to pair a wildcard origin with
//! credentials, so the headers are set directly.

use axum::Router;
use axum::http::{HeaderName, HeaderValue, header};
use tower_http::set_header::SetResponseHeaderLayer;

pub const ALLOW_CREDENTIALS: &str = "true";
pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET,OPTIONS,PATCH,DELETE,POST,PUT";
pub const ALLOW_HEADERS: &str = "X-CSRF-Token, X-Requested-With, Accept, Accept-Version, Content-Length, Content-MD5, Content-Type, Date, X-Api-Version";

/// The header pairs added to every response
pub fn cors_headers() -> [(HeaderName, HeaderValue); 4] {
    [
        (
            header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static(ALLOW_CREDENTIALS),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ),
    ]
}

/// Wrap a router so that all its responses carry the CORS headers
pub fn with_cors_headers(router: Router) -> Router {
    cors_headers()
        .into_iter()
        .fold(router, |router, (name, value)| {
            router.layer(SetResponseHeaderLayer::overriding(name, value))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_values_are_valid() {
        let headers = cors_headers();

        assert_eq!(headers.len(), 4);
        assert_eq!(headers[1].1, "*");
        assert!(headers[3].1.to_str().unwrap().contains("X-Api-Version"));
    }
}
