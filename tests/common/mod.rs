//! Shared test doubles: a recording connector that stands in for the real
//! network stack and remembers every constructor argument and setter call.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use ident_http::{
    CertStore, Connection, Connector, Error, HttpRequest, ProxySpec, ResponseTuple, Result,
    VerifyMode,
};

/// Initialize test logging once; repeat calls are no-ops.
#[allow(dead_code)]
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .with_test_writer()
        .try_init();
}

/// Arguments of one `Connector::connect` call.
#[derive(Debug, Clone)]
pub struct ConnectCall {
    pub host: String,
    pub port: u16,
    pub proxy: Option<ProxySpec>,
}

/// One request as seen by `Connection::send`.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct SentRequest {
    pub method: String,
    pub url: String,
    pub body: Option<String>,
    pub headers: HashMap<String, String>,
}

/// Everything the mock observed, across all connections it produced.
#[derive(Default)]
pub struct Recorded {
    pub connects: Vec<ConnectCall>,
    pub verify_modes: Vec<VerifyMode>,
    pub ca_files: Vec<PathBuf>,
    pub cert_stores: Vec<CertStore>,
    pub read_timeouts: Vec<Duration>,
    pub sent: Vec<SentRequest>,
}

type Reply = Arc<dyn Fn(&HttpRequest) -> Result<ResponseTuple> + Send + Sync>;

/// Connection factory double. Clone it before handing it to the client to
/// keep a handle on the recorded state.
#[derive(Clone)]
pub struct MockConnector {
    state: Arc<Mutex<Recorded>>,
    reply: Reply,
}

impl MockConnector {
    /// Every connection replies with this fixed tuple.
    pub fn replying(status: u16, body: &str, headers: &[(&str, &str)]) -> Self {
        let reply = ResponseTuple::new(
            status,
            body,
            headers.iter().map(|(n, v)| (n.to_string(), v.to_string())),
        );
        Self {
            state: Arc::default(),
            reply: Arc::new(move |_| Ok(reply.clone())),
        }
    }

    /// Every send fails with the produced error.
    #[allow(dead_code)]
    pub fn failing<F>(make: F) -> Self
    where
        F: Fn() -> Error + Send + Sync + 'static,
    {
        Self {
            state: Arc::default(),
            reply: Arc::new(move |_| Err(make())),
        }
    }

    pub fn recorded(&self) -> MutexGuard<'_, Recorded> {
        self.state.lock().unwrap()
    }
}

impl Connector for MockConnector {
    fn connect(&self, host: &str, port: u16, proxy: Option<&ProxySpec>) -> Box<dyn Connection> {
        self.state.lock().unwrap().connects.push(ConnectCall {
            host: host.to_string(),
            port,
            proxy: proxy.cloned(),
        });
        Box::new(MockConnection {
            state: Arc::clone(&self.state),
            reply: Arc::clone(&self.reply),
        })
    }
}

struct MockConnection {
    state: Arc<Mutex<Recorded>>,
    reply: Reply,
}

#[async_trait]
impl Connection for MockConnection {
    fn set_read_timeout(&mut self, timeout: Duration) {
        self.state.lock().unwrap().read_timeouts.push(timeout);
    }

    fn set_verify_mode(&mut self, mode: VerifyMode) {
        self.state.lock().unwrap().verify_modes.push(mode);
    }

    fn set_ca_file(&mut self, path: &Path) {
        self.state.lock().unwrap().ca_files.push(path.to_path_buf());
    }

    fn set_cert_store(&mut self, store: CertStore) {
        self.state.lock().unwrap().cert_stores.push(store);
    }

    async fn send(&mut self, request: &HttpRequest) -> Result<ResponseTuple> {
        self.state.lock().unwrap().sent.push(SentRequest {
            method: request.method.to_string(),
            url: request.url.to_string(),
            body: request.body.clone(),
            headers: request.headers.clone(),
        });
        (self.reply)(request)
    }
}
