//! Proxy configurations applied to the HTTP transport.

use crate::error::Result;

/// Transport-level proxy capability.
///
/// The core never inspects a proxy config beyond asking it for a
/// [`reqwest::Proxy`] to hand to the client builder.
pub trait ProxyConfig {
    fn proxy(&self) -> Result<reqwest::Proxy>;
}

/// Any HTTP, HTTPS, or SOCKS proxy URL, with optional credentials.
#[derive(Debug, Clone)]
pub struct GenericProxyConfig {
    proxy_url: String,
    username: Option<String>,
    password: Option<String>,
}

impl GenericProxyConfig {
    /// `proxy_url` is anything reqwest accepts, e.g.
    /// `http://proxy.example.com:8080` or `socks5://127.0.0.1:9050`.
    pub fn new(proxy_url: impl Into<String>) -> Self {
        Self {
            proxy_url: proxy_url.into(),
            username: None,
            password: None,
        }
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }
}

impl ProxyConfig for GenericProxyConfig {
    fn proxy(&self) -> Result<reqwest::Proxy> {
        let mut proxy = reqwest::Proxy::all(&self.proxy_url)?;

        if let (Some(username), Some(password)) = (&self.username, &self.password) {
            proxy = proxy.basic_auth(username, password);
        }

        Ok(proxy)
    }
}

/// Webshare rotating-proxy endpoint; always an authenticated HTTP proxy.
#[derive(Debug, Clone)]
pub struct WebshareProxyConfig {
    host: String,
    port: u16,
    username: String,
    password: String,
}

impl WebshareProxyConfig {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            username: username.into(),
            password: password.into(),
        }
    }
}

impl ProxyConfig for WebshareProxyConfig {
    fn proxy(&self) -> Result<reqwest::Proxy> {
        let proxy = reqwest::Proxy::all(format!("http://{}:{}", self.host, self.port))?
            .basic_auth(&self.username, &self.password);
        Ok(proxy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_accepts_plain_url() {
        let cfg = GenericProxyConfig::new("http://proxy.example.com:8080");
        assert!(cfg.proxy().is_ok());
    }

    #[test]
    fn generic_accepts_socks_url_with_credentials() {
        let cfg = GenericProxyConfig::new("socks5://127.0.0.1:9050")
            .with_credentials("user", "pass");
        assert!(cfg.proxy().is_ok());
    }

    #[test]
    fn generic_rejects_unparseable_url() {
        let cfg = GenericProxyConfig::new("not a proxy url \u{0}");
        assert!(cfg.proxy().is_err());
    }

    #[test]
    fn webshare_builds_authenticated_proxy() {
        let cfg = WebshareProxyConfig::new("p.webshare.io", 80, "user", "pass");
        assert!(cfg.proxy().is_ok());
    }
}
