//! Dev proxy forwarding rules.

use url::Url;

/// Path prefixes forwarded to the local backend during development.
pub const PROXIED_PREFIXES: [&str; 2] = ["/user", "/admin"];

/// Forward requests whose path starts with `prefix` to `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyRule {
    /// Path prefix, matched as a plain string prefix.
    pub prefix: String,
    /// Destination origin.
    pub target: Url,
    /// Rewrite `Host` and `Origin` to the target's.
    pub change_origin: bool,
    /// Verify the target's TLS certificate.
    pub secure: bool,
}

impl ProxyRule {
    /// Whether this rule handles `path`.
    ///
    /// Matching is a plain prefix test, so `/user` also claims `/users`.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }

    /// Upstream URL for an incoming path and optional query.
    ///
    /// The incoming path is appended to any path already on the target.
    #[must_use]
    pub fn upstream_url(&self, path: &str, query: Option<&str>) -> Url {
        let mut url = self.target.clone();
        let base = self.target.path().trim_end_matches('/');
        url.set_path(&format!("{base}{path}"));
        url.set_query(query);
        url
    }

    /// `Host` header value for the target (host plus non-default port).
    #[must_use]
    pub fn target_host(&self) -> String {
        let host = self.target.host_str().unwrap_or_default();
        match self.target.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        }
    }

    /// `Origin` header value for the target.
    #[must_use]
    pub fn target_origin(&self) -> String {
        self.target.origin().ascii_serialization()
    }
}

/// The full set of dev proxy rules, checked in order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DevProxyConfig {
    pub rules: Vec<ProxyRule>,
}

impl DevProxyConfig {
    /// `/user` and `/admin` forwarded to `target`, with origin rewriting on
    /// and certificate checks off.
    #[must_use]
    pub fn standard(target: &Url) -> Self {
        let rules = PROXIED_PREFIXES
            .iter()
            .map(|prefix| ProxyRule {
                prefix: (*prefix).to_string(),
                target: target.clone(),
                change_origin: true,
                secure: false,
            })
            .collect();
        Self { rules }
    }

    /// First rule claiming `path`.
    #[must_use]
    pub fn rule_for(&self, path: &str) -> Option<&ProxyRule> {
        self.rules.iter().find(|rule| rule.matches(path))
    }
}
