//! Reqwest-backed connection.
//!
//! # Responsibilities
//! - Translate accumulated connection settings into a `reqwest::Client`
//! - Perform the round trip and collect status, body, headers
//! - Classify transport failures exactly once: TLS problems become
//!   [`Error::Ssl`], everything else [`Error::Connection`]
//!
//! # Design Decisions
//! - A fresh client is built per request. The configuration surface is
//!   mutable between requests, so nothing is cached across calls.
//! - TLS classification walks the error source chain looking for a
//!   `rustls::Error`, with a text match as fallback for failures that
//!   arrive wrapped in opaque I/O errors.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;

use crate::config::ProxySpec;
use crate::error::{Error, Result};
use crate::http::request::HttpRequest;
use crate::http::response::ResponseTuple;
use crate::net::{CertStore, Connection, Connector, VerifyMode};

/// Builds [`ReqwestConnection`] values. The default connector for real
/// network traffic.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReqwestConnector;

impl Connector for ReqwestConnector {
    fn connect(&self, _host: &str, _port: u16, proxy: Option<&ProxySpec>) -> Box<dyn Connection> {
        // reqwest derives target host and port from the request URL; only
        // the proxy hop needs to be carried explicitly.
        Box::new(ReqwestConnection {
            proxy: proxy.cloned(),
            read_timeout: None,
            verify_mode: None,
            ca_file: None,
            cert_store: None,
        })
    }
}

/// One-shot connection; accumulates settings, then builds and uses a
/// `reqwest::Client` in [`Connection::send`].
pub struct ReqwestConnection {
    proxy: Option<ProxySpec>,
    read_timeout: Option<Duration>,
    verify_mode: Option<VerifyMode>,
    ca_file: Option<PathBuf>,
    cert_store: Option<CertStore>,
}

impl ReqwestConnection {
    fn build_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();

        if let Some(proxy) = &self.proxy {
            let mut upstream = reqwest::Proxy::all(format!("http://{}:{}", proxy.host, proxy.port))
                .map_err(|e| Error::Config(format!("unusable proxy address '{proxy}': {e}")))?;
            if let (Some(user), Some(password)) = (&proxy.user, &proxy.password) {
                upstream = upstream.basic_auth(user, password);
            }
            tracing::debug!(proxy = %proxy, "routing request through proxy");
            builder = builder.proxy(upstream);
        }

        if self.verify_mode == Some(VerifyMode::None) {
            builder = builder.danger_accept_invalid_certs(true);
        } else {
            if let Some(store) = &self.cert_store {
                for der in store.der_certs() {
                    builder = builder.add_root_certificate(
                        reqwest::Certificate::from_der(der)
                            .map_err(|e| Error::Config(format!("invalid certificate in trust store: {e}")))?,
                    );
                }
            } else if let Some(path) = &self.ca_file {
                let store = CertStore::from_pem_file(path)?;
                for der in store.der_certs() {
                    builder = builder.add_root_certificate(
                        reqwest::Certificate::from_der(der)
                            .map_err(|e| Error::Config(format!("invalid certificate in {}: {e}", path.display())))?,
                    );
                }
            }
        }

        if let Some(timeout) = self.read_timeout {
            builder = builder.read_timeout(timeout);
        }

        builder.build().map_err(classify)
    }
}

#[async_trait]
impl Connection for ReqwestConnection {
    fn set_read_timeout(&mut self, timeout: Duration) {
        self.read_timeout = Some(timeout);
    }

    fn set_verify_mode(&mut self, mode: VerifyMode) {
        self.verify_mode = Some(mode);
    }

    fn set_ca_file(&mut self, path: &Path) {
        self.ca_file = Some(path.to_path_buf());
    }

    fn set_cert_store(&mut self, store: CertStore) {
        self.cert_store = Some(store);
    }

    async fn send(&mut self, request: &HttpRequest) -> Result<ResponseTuple> {
        let client = self.build_client()?;

        let mut pending = client.request(request.method.clone(), request.url.clone());
        for (name, value) in &request.headers {
            pending = pending.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            pending = pending.body(body.clone());
        }

        let response = pending.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect::<Vec<_>>();
        let body = response.text().await.map_err(classify)?;

        Ok(ResponseTuple::new(status, body, headers))
    }
}

/// Translate a `reqwest::Error` into the crate taxonomy. Called at every
/// point a reqwest error can escape, so the rest of the crate never sees
/// the library type.
fn classify(err: reqwest::Error) -> Error {
    if is_tls_failure(&err) {
        Error::Ssl(err.to_string())
    } else {
        Error::Connection(err.to_string())
    }
}

fn is_tls_failure(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut source = err.source();
    while let Some(inner) = source {
        if inner.downcast_ref::<rustls::Error>().is_some() {
            return true;
        }
        let text = inner.to_string();
        if text.contains("certificate") || text.contains("handshake") {
            return true;
        }
        source = inner.source();
    }
    false
}
