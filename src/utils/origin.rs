//! Request origin extraction.

use crate::AppError;
use axum::http::{HeaderMap, Uri, header};
use serde_json::Value;

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";
const X_FORWARDED_HOST: &str = "x-forwarded-host";

/// Builds the `scheme://host[:port]` origin of an inbound request.
///
/// Host resolution order:
/// 1. `X-Forwarded-Host` (only when `trust_forwarded` is set)
/// 2. `Host` header
/// 3. Authority of the request URI (HTTP/2 requests)
///
/// Scheme resolution order:
/// 1. `X-Forwarded-Proto` (only when `trust_forwarded` is set)
/// 2. Scheme of the request URI
/// 3. `http`
///
/// The port is kept: a short URL has to point back at the same listener.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if no host can be determined or a header holds
/// invalid UTF-8.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "sho.rt:8080".parse().unwrap());
///
/// let origin = request_origin(&headers, &"/api/links".parse().unwrap(), false).unwrap();
/// assert_eq!(origin, "http://sho.rt:8080");
/// ```
pub fn request_origin(headers: &HeaderMap, uri: &Uri, trust_forwarded: bool) -> Result<String, AppError> {
    let forwarded_host = if trust_forwarded {
        first_forwarded_value(headers, X_FORWARDED_HOST)?
    } else {
        None
    };

    let host = match forwarded_host {
        Some(host) => host,
        None => match headers.get(header::HOST) {
            Some(value) => value
                .to_str()
                .map_err(|_| AppError::bad_request("Invalid Host header", Value::Null))?
                .trim()
                .to_string(),
            None => uri
                .authority()
                .map(|a| a.as_str().to_string())
                .ok_or_else(|| AppError::bad_request("missing Host header", Value::Null))?,
        },
    };

    if host.is_empty() {
        return Err(AppError::bad_request("missing Host header", Value::Null));
    }

    let forwarded_proto = if trust_forwarded {
        first_forwarded_value(headers, X_FORWARDED_PROTO)?
    } else {
        None
    };

    let scheme = forwarded_proto
        .or_else(|| uri.scheme_str().map(str::to_string))
        .unwrap_or_else(|| "http".to_string());

    Ok(format!("{}://{}", scheme.to_ascii_lowercase(), host))
}

/// Returns the first entry of a comma-separated forwarding header, if present.
fn first_forwarded_value(headers: &HeaderMap, name: &str) -> Result<Option<String>, AppError> {
    let Some(value) = headers.get(name) else {
        return Ok(None);
    };

    let value = value
        .to_str()
        .map_err(|_| AppError::bad_request(format!("Invalid {name} header"), Value::Null))?;

    Ok(value
        .split(',')
        .next()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn path_uri() -> Uri {
        Uri::from_static("/api/links")
    }

    #[test]
    fn test_origin_from_host_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("sho.rt"));

        let origin = request_origin(&headers, &path_uri(), false).unwrap();
        assert_eq!(origin, "http://sho.rt");
    }

    #[test]
    fn test_origin_keeps_port() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("localhost:3000"));

        let origin = request_origin(&headers, &path_uri(), false).unwrap();
        assert_eq!(origin, "http://localhost:3000");
    }

    #[test]
    fn test_origin_ipv6_host() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("[::1]:8080"));

        let origin = request_origin(&headers, &path_uri(), false).unwrap();
        assert_eq!(origin, "http://[::1]:8080");
    }

    #[test]
    fn test_origin_from_absolute_uri() {
        let headers = HeaderMap::new();
        let uri = Uri::from_static("https://sho.rt/api/links");

        let origin = request_origin(&headers, &uri, false).unwrap();
        assert_eq!(origin, "https://sho.rt");
    }

    #[test]
    fn test_host_header_wins_over_uri_authority() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("sho.rt"));
        let uri = Uri::from_static("https://internal:9000/api/links");

        let origin = request_origin(&headers, &uri, false).unwrap();
        assert_eq!(origin, "https://sho.rt");
    }

    #[test]
    fn test_forwarded_headers_ignored_when_untrusted() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("10.0.0.5:3000"));
        headers.insert(X_FORWARDED_PROTO, HeaderValue::from_static("https"));
        headers.insert(X_FORWARDED_HOST, HeaderValue::from_static("sho.rt"));

        let origin = request_origin(&headers, &path_uri(), false).unwrap();
        assert_eq!(origin, "http://10.0.0.5:3000");
    }

    #[test]
    fn test_forwarded_headers_used_when_trusted() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("10.0.0.5:3000"));
        headers.insert(X_FORWARDED_PROTO, HeaderValue::from_static("https, http"));
        headers.insert(X_FORWARDED_HOST, HeaderValue::from_static("sho.rt"));

        let origin = request_origin(&headers, &path_uri(), true).unwrap();
        assert_eq!(origin, "https://sho.rt");
    }

    #[test]
    fn test_missing_host() {
        let headers = HeaderMap::new();

        let result = request_origin(&headers, &path_uri(), false);
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[test]
    fn test_invalid_utf8_host() {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_bytes(&[0xFF, 0xFE]) {
            headers.insert(header::HOST, value);
            assert!(request_origin(&headers, &path_uri(), false).is_err());
        }
    }
}
