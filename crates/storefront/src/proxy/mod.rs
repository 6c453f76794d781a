//! Local development proxy.
//!
//! During development the storefront talks to its backend through the dev
//! server: requests under `/user` and `/admin` are forwarded to a local
//! HTTPS origin. This has no role in production.
//!
//! # Forwarding
//!
//! - Method, path, query and body are passed through unchanged
//! - Hop-by-hop headers are dropped in both directions
//! - With `change_origin`, `Host` and `Origin` are rewritten to the target
//! - Without `secure`, the target's certificate is not verified
//! - Upstream redirects are returned to the client, never followed

mod rules;

pub use rules::{DevProxyConfig, PROXIED_PREFIXES, ProxyRule};

use axum::body::{Body, to_bytes};
use axum::extract::Request;
use axum::http::header::{self, HeaderMap, HeaderValue};
use axum::response::Response;
use reqwest::Client;
use reqwest::redirect::Policy;

use crate::error::{AppError, Result};

/// Largest request body forwarded upstream (10 MiB).
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Headers that describe a single connection and must not be forwarded.
const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

struct ProxyRoute {
    rule: ProxyRule,
    client: Client,
}

/// Forwards matching requests according to a [`DevProxyConfig`].
pub struct DevProxy {
    routes: Vec<ProxyRoute>,
}

impl DevProxy {
    /// Build HTTP clients for every rule.
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if a client cannot be constructed.
    pub fn new(config: &DevProxyConfig) -> std::result::Result<Self, reqwest::Error> {
        let routes = config
            .rules
            .iter()
            .map(|rule| {
                let client = Client::builder()
                    .redirect(Policy::none())
                    .danger_accept_invalid_certs(!rule.secure)
                    .build()?;
                Ok(ProxyRoute {
                    rule: rule.clone(),
                    client,
                })
            })
            .collect::<std::result::Result<Vec<_>, reqwest::Error>>()?;

        Ok(Self { routes })
    }

    /// The rules this proxy serves, in match order.
    pub fn rules(&self) -> impl Iterator<Item = &ProxyRule> {
        self.routes.iter().map(|route| &route.rule)
    }

    /// Forward `request` to the first matching rule's target.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no rule matches, `AppError::BadRequest`
    /// if the body cannot be read, and `AppError::Upstream` if the target
    /// cannot be reached.
    pub async fn forward(&self, request: Request) -> Result<Response> {
        let path = request.uri().path().to_string();
        let route = self
            .routes
            .iter()
            .find(|route| route.rule.matches(&path))
            .ok_or_else(|| AppError::NotFound(path.clone()))?;

        let (parts, body) = request.into_parts();
        let url = route.rule.upstream_url(&path, parts.uri.query());
        let headers = upstream_headers(&parts.headers, &route.rule);
        let body = to_bytes(body, MAX_BODY_BYTES)
            .await
            .map_err(|e| AppError::BadRequest(format!("unreadable request body: {e}")))?;

        tracing::debug!(
            method = %parts.method,
            upstream = %url,
            "Forwarding request"
        );

        let upstream = route
            .client
            .request(parts.method, url)
            .headers(headers)
            .body(body)
            .send()
            .await?;

        let status = upstream.status();
        let headers = downstream_headers(upstream.headers());
        let bytes = upstream.bytes().await?;

        let mut response = Response::new(Body::from(bytes));
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        Ok(response)
    }
}

/// Headers to send upstream for an incoming request.
///
/// `Content-Length` is recomputed from the buffered body.
fn upstream_headers(incoming: &HeaderMap, rule: &ProxyRule) -> HeaderMap {
    let mut headers = strip_hop_by_hop(incoming);
    headers.remove(header::CONTENT_LENGTH);

    if rule.change_origin {
        headers.remove(header::HOST);
        if let Ok(host) = HeaderValue::from_str(&rule.target_host()) {
            headers.insert(header::HOST, host);
        }
        if headers.contains_key(header::ORIGIN)
            && let Ok(origin) = HeaderValue::from_str(&rule.target_origin())
        {
            headers.insert(header::ORIGIN, origin);
        }
    }

    headers
}

/// Headers to return to the client for an upstream response.
fn downstream_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut headers = strip_hop_by_hop(upstream);
    headers.remove(header::CONTENT_LENGTH);
    headers
}

fn strip_hop_by_hop(headers: &HeaderMap) -> HeaderMap {
    let mut out = headers.clone();
    for name in HOP_BY_HOP {
        out.remove(name);
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use url::Url;

    use super::*;

    fn rule(change_origin: bool) -> ProxyRule {
        ProxyRule {
            prefix: "/user".to_string(),
            target: Url::parse("https://localhost:7001").unwrap(),
            change_origin,
            secure: false,
        }
    }

    fn incoming() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("127.0.0.1:5173"));
        headers.insert(
            header::ORIGIN,
            HeaderValue::from_static("http://127.0.0.1:5173"),
        );
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("12"));
        headers.insert(header::COOKIE, HeaderValue::from_static("sid=abc"));
        headers
    }

    #[test]
    fn test_upstream_headers_change_origin() {
        let headers = upstream_headers(&incoming(), &rule(true));

        assert_eq!(headers.get(header::HOST).unwrap(), "localhost:7001");
        assert_eq!(
            headers.get(header::ORIGIN).unwrap(),
            "https://localhost:7001"
        );
        assert_eq!(headers.get(header::COOKIE).unwrap(), "sid=abc");
        assert!(headers.get(header::CONNECTION).is_none());
        assert!(headers.get(header::CONTENT_LENGTH).is_none());
    }

    #[test]
    fn test_upstream_headers_keep_origin() {
        let headers = upstream_headers(&incoming(), &rule(false));

        assert_eq!(headers.get(header::HOST).unwrap(), "127.0.0.1:5173");
        assert_eq!(
            headers.get(header::ORIGIN).unwrap(),
            "http://127.0.0.1:5173"
        );
    }

    #[test]
    fn test_origin_not_added_when_absent() {
        let mut headers = incoming();
        headers.remove(header::ORIGIN);

        let headers = upstream_headers(&headers, &rule(true));
        assert!(headers.get(header::ORIGIN).is_none());
    }

    #[test]
    fn test_downstream_headers() {
        let mut upstream = HeaderMap::new();
        upstream.insert(
            header::TRANSFER_ENCODING,
            HeaderValue::from_static("chunked"),
        );
        upstream.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        upstream.insert(header::SET_COOKIE, HeaderValue::from_static("sid=xyz"));

        let headers = downstream_headers(&upstream);
        assert!(headers.get(header::TRANSFER_ENCODING).is_none());
        assert_eq!(
            headers.get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(headers.get(header::SET_COOKIE).unwrap(), "sid=xyz");
    }

    #[test]
    fn test_builds_client_per_rule() {
        let config = DevProxyConfig::standard(&Url::parse("https://localhost:7001").unwrap());
        let proxy = DevProxy::new(&config).unwrap();

        let prefixes: Vec<&str> = proxy.rules().map(|r| r.prefix.as_str()).collect();
        assert_eq!(prefixes, PROXIED_PREFIXES);
    }
}
