//! Client configuration.
//!
//! # Responsibilities
//! - Hold the transport-affecting settings: proxies, TLS trust, the
//!   injected request handler
//! - Provide a cheap clone so each request can work from a snapshot
//!
//! # Design Decisions
//! - The executor clones the config at the start of every request
//!   (copy-on-read). Concurrent readers never see a torn config, but a
//!   mutation racing an in-flight request may or may not be observed by
//!   that request. Callers needing that guarantee serialize their own
//!   config changes; this is a documented limitation, not defended here.

pub mod proxy;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::http::request::HttpRequest;
use crate::net::CertStore;

pub use proxy::ProxySpec;

/// Injected request handler: `(url, method, body, headers)` arrive on the
/// [`HttpRequest`]; the returned tuple is `(status, body, headers)`.
///
/// When set, the handler is the sole determinant of the response: the real
/// network stack is never touched and proxy/TLS/timeout settings are
/// ignored.
pub type RequestHandler =
    Arc<dyn Fn(&HttpRequest) -> (u16, String, HashMap<String, String>) + Send + Sync>;

/// Transport-affecting settings, snapshotted per request.
#[derive(Clone, Default)]
pub struct ClientConfig {
    /// Proxy for `http://` targets, `[user:password@]host:port` form.
    pub http_proxy: Option<String>,

    /// Proxy for `https://` targets, same form.
    pub https_proxy: Option<String>,

    /// Disable TLS certificate verification. When true this supersedes
    /// `ssl_ca_file` and `ssl_cert_store` entirely.
    pub skip_ssl_validation: bool,

    /// PEM file of CA certificates to trust instead of the stack default.
    pub ssl_ca_file: Option<PathBuf>,

    /// Pre-built trust store. Takes precedence over `ssl_ca_file` when both
    /// are set.
    pub ssl_cert_store: Option<CertStore>,

    /// Test/mocking seam; see [`RequestHandler`].
    pub request_handler: Option<RequestHandler>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("http_proxy", &self.http_proxy)
            .field("https_proxy", &self.https_proxy)
            .field("skip_ssl_validation", &self.skip_ssl_validation)
            .field("ssl_ca_file", &self.ssl_ca_file)
            .field("ssl_cert_store", &self.ssl_cert_store)
            .field("request_handler", &self.request_handler.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
