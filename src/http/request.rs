//! Request-side types.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

pub use reqwest::Method;

/// One outgoing request, as handed to a transport.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: Url,
    pub method: Method,
    pub body: Option<String>,
    pub headers: HashMap<String, String>,
}

/// Caller-supplied success predicate for strict-mode status checking.
pub type StatusPredicate = Arc<dyn Fn(u16) -> bool + Send + Sync>;

/// Per-call options.
///
/// `net_read_timeout` is applied to the connection before the request is
/// sent; absent means the transport default. `strict` and `success` only
/// affect `json_get`: with `strict` set, a response failing the predicate
/// (default: 2xx) becomes a `BadResponse` error instead of being decoded.
#[derive(Clone, Default)]
pub struct RequestOptions {
    pub net_read_timeout: Option<Duration>,
    pub strict: bool,
    pub success: Option<StatusPredicate>,
}

impl RequestOptions {
    pub fn net_read_timeout(mut self, timeout: Duration) -> Self {
        self.net_read_timeout = Some(timeout);
        self
    }

    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    pub fn success<F>(mut self, predicate: F) -> Self
    where
        F: Fn(u16) -> bool + Send + Sync + 'static,
    {
        self.success = Some(Arc::new(predicate));
        self
    }
}

impl std::fmt::Debug for RequestOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestOptions")
            .field("net_read_timeout", &self.net_read_timeout)
            .field("strict", &self.strict)
            .field("success", &self.success.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
