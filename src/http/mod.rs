//! Request executor.
//!
//! # Responsibilities
//! - Expose the caller-facing surface: `http_request`, the method
//!   convenience wrappers, and `json_get`
//! - Snapshot the configuration per request and hand it to the transport
//!   selector
//! - Propagate transport errors untouched; non-2xx statuses are returned
//!   as ordinary response tuples, never raised
//!
//! # Design Decisions
//! - No connection or client object is cached across calls. Config changes
//!   between requests always take effect on the next request.
//! - The crate does no retries; retry policy belongs to the caller.

pub mod json;
pub mod request;
pub mod response;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;
use url::Url;

use crate::config::{ClientConfig, RequestHandler};
use crate::error::{Error, Result};
use crate::net::{CertStore, Connector, ReqwestConnector};
use crate::transport;

use request::{HttpRequest, Method, RequestOptions};
use response::ResponseTuple;

/// The HTTP client surface used by the identity-service client library.
///
/// Configuration setters may be called between requests; each request works
/// from a snapshot taken when it starts. Mutating the config while another
/// request is in flight is not atomic with respect to that request.
pub struct HttpClient {
    config: ClientConfig,
    connector: Arc<dyn Connector>,
}

impl HttpClient {
    /// Client backed by the real network stack.
    pub fn new() -> Self {
        Self::with_connector(Arc::new(ReqwestConnector))
    }

    /// Client backed by a caller-supplied connection factory. Used by tests
    /// and callers with custom routing needs.
    pub fn with_connector(connector: Arc<dyn Connector>) -> Self {
        Self {
            config: ClientConfig::default(),
            connector,
        }
    }

    /// Proxy for `http://` targets, `[user:password@]host:port` form.
    pub fn set_http_proxy(&mut self, proxy: impl Into<String>) {
        self.config.http_proxy = Some(proxy.into());
    }

    /// Proxy for `https://` targets, same form.
    pub fn set_https_proxy(&mut self, proxy: impl Into<String>) {
        self.config.https_proxy = Some(proxy.into());
    }

    /// Disable TLS certificate verification. Supersedes the CA file and the
    /// cert store while set.
    pub fn set_skip_ssl_validation(&mut self, skip: bool) {
        self.config.skip_ssl_validation = skip;
    }

    /// Verify TLS peers against the CAs in this PEM file.
    pub fn set_ssl_ca_file(&mut self, path: impl Into<PathBuf>) {
        self.config.ssl_ca_file = Some(path.into());
    }

    /// Verify TLS peers against this trust store. Wins over the CA file
    /// when both are set.
    pub fn set_ssl_cert_store(&mut self, store: CertStore) {
        self.config.ssl_cert_store = Some(store);
    }

    /// Install the injected request handler. While set, the handler is the
    /// sole determinant of every response and no network I/O happens.
    pub fn set_request_handler<F>(&mut self, handler: F)
    where
        F: Fn(&HttpRequest) -> (u16, String, HashMap<String, String>) + Send + Sync + 'static,
    {
        self.config.request_handler = Some(Arc::new(handler) as RequestHandler);
    }

    /// Remove the injected request handler, restoring real connections.
    pub fn clear_request_handler(&mut self) {
        self.config.request_handler = None;
    }

    /// Issue one request and return `(status, body, headers)`. Response
    /// header keys are lowercased; the status comes back intact whatever
    /// its range.
    pub async fn http_request(
        &self,
        url: &str,
        method: Method,
        body: Option<String>,
        headers: HashMap<String, String>,
        options: &RequestOptions,
    ) -> Result<ResponseTuple> {
        let url: Url = url
            .parse()
            .map_err(|e| Error::Config(format!("invalid url '{url}': {e}")))?;

        // Snapshot: in-flight requests are unaffected by later setter calls.
        let config = self.config.clone();
        let request = HttpRequest {
            url,
            method,
            body,
            headers,
        };

        let mut transport = transport::select(&config, &self.connector, &request, options)?;
        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        let reply = transport.execute(&request).await?;
        tracing::debug!(status = reply.status, "received response");
        Ok(reply)
    }

    /// `GET` with no body.
    pub async fn http_get(&self, url: &str, options: &RequestOptions) -> Result<ResponseTuple> {
        self.http_request(url, Method::GET, None, HashMap::new(), options).await
    }

    /// `POST` with the given body.
    pub async fn http_post(
        &self,
        url: &str,
        body: impl Into<String>,
        headers: HashMap<String, String>,
        options: &RequestOptions,
    ) -> Result<ResponseTuple> {
        self.http_request(url, Method::POST, Some(body.into()), headers, options).await
    }

    /// `PUT` with the given body.
    pub async fn http_put(
        &self,
        url: &str,
        body: impl Into<String>,
        headers: HashMap<String, String>,
        options: &RequestOptions,
    ) -> Result<ResponseTuple> {
        self.http_request(url, Method::PUT, Some(body.into()), headers, options).await
    }

    /// `DELETE` with no body.
    pub async fn http_delete(&self, url: &str, options: &RequestOptions) -> Result<ResponseTuple> {
        self.http_request(url, Method::DELETE, None, HashMap::new(), options).await
    }

    /// `GET` expecting a JSON body; sends `accept: application/json` and
    /// decodes the reply. In strict mode the status predicate (default:
    /// 2xx) is checked before decoding.
    pub async fn json_get(&self, url: &str, options: &RequestOptions) -> Result<Value> {
        let headers =
            HashMap::from([("accept".to_string(), "application/json".to_string())]);
        let reply = self.http_request(url, Method::GET, None, headers, options).await?;
        json::check_status(&reply, options)?;
        json::json_parse_reply(&reply)
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}
