//! Embeddable HTTP transport layer for identity-service REST clients.
//!
//! Two layers: a transport selector that decides between an injected
//! request handler and a real network connection (with proxy and TLS trust
//! settings applied), and a request executor exposing `http_request`, the
//! method convenience wrappers and `json_get` with a typed error model.
//!
//! ```no_run
//! # async fn run() -> ident_http::Result<()> {
//! use ident_http::{HttpClient, RequestOptions};
//!
//! let mut client = HttpClient::new();
//! client.set_https_proxy("user:password@proxy.internal:3128");
//! client.set_ssl_ca_file("/etc/ssl/internal-ca.pem");
//!
//! let info = client
//!     .json_get("https://login.example.com/info", &RequestOptions::default())
//!     .await?;
//! # let _ = info;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod net;
pub mod transport;

pub use config::{ClientConfig, ProxySpec, RequestHandler};
pub use error::{Error, ErrorKind, Result};
pub use http::json::{json_parse_reply, json_parse_reply_as};
pub use http::request::{HttpRequest, Method, RequestOptions, StatusPredicate};
pub use http::response::{Headers, ResponseTuple};
pub use http::HttpClient;
pub use net::{CertStore, Connection, Connector, ReqwestConnector, VerifyMode};
pub use transport::Transport;
