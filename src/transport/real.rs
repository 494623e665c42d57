//! Real-connection transport.
//!
//! Per-request pipeline, in order: resolve the proxy for the target scheme,
//! construct the connection, configure TLS trust, apply the read timeout,
//! send. The connection is exclusively owned by this transport, dropped
//! with it, and never reused across requests.

use async_trait::async_trait;

use crate::config::{ClientConfig, ProxySpec};
use crate::error::{Error, Result};
use crate::http::request::{HttpRequest, RequestOptions};
use crate::http::response::ResponseTuple;
use crate::net::{Connection, Connector, VerifyMode};
use crate::transport::Transport;

pub struct RealConnectionTransport {
    connection: Box<dyn Connection>,
}

impl RealConnectionTransport {
    /// Build a connection honoring the config snapshot and per-request
    /// options. Configuration problems surface here, before any I/O.
    pub(crate) fn open(
        config: &ClientConfig,
        connector: &dyn Connector,
        request: &HttpRequest,
        options: &RequestOptions,
    ) -> Result<Self> {
        let url = &request.url;
        let host = url
            .host_str()
            .ok_or_else(|| Error::Config(format!("url has no host: {url}")))?;
        let port = url.port_or_known_default().unwrap_or(80);

        let proxy = resolve_proxy(config, url.scheme())?;
        let mut connection = connector.connect(host, port, proxy.as_ref());

        if url.scheme() == "https" {
            configure_tls(connection.as_mut(), config);
        }
        if let Some(timeout) = options.net_read_timeout {
            connection.set_read_timeout(timeout);
        }

        Ok(Self { connection })
    }
}

#[async_trait]
impl Transport for RealConnectionTransport {
    async fn execute(&mut self, request: &HttpRequest) -> Result<ResponseTuple> {
        self.connection.send(request).await
    }
}

/// Pick and parse the proxy string matching the target scheme. A malformed
/// string fails the request rather than silently connecting directly.
fn resolve_proxy(config: &ClientConfig, scheme: &str) -> Result<Option<ProxySpec>> {
    let raw = if scheme == "https" {
        config.https_proxy.as_deref()
    } else {
        config.http_proxy.as_deref()
    };
    raw.map(ProxySpec::parse).transpose()
}

/// Apply the TLS trust settings, most specific first. `skip_ssl_validation`
/// supersedes both trust sources; with nothing configured the verification
/// mode is left entirely untouched.
fn configure_tls(connection: &mut dyn Connection, config: &ClientConfig) {
    if config.skip_ssl_validation {
        tracing::warn!("TLS certificate verification disabled for this request");
        connection.set_verify_mode(VerifyMode::None);
    } else if let Some(store) = &config.ssl_cert_store {
        connection.set_verify_mode(VerifyMode::Peer);
        connection.set_cert_store(store.clone());
    } else if let Some(path) = &config.ssl_ca_file {
        connection.set_verify_mode(VerifyMode::Peer);
        connection.set_ca_file(path);
    }
}
