//! Connection capability interface.
//!
//! # Responsibilities
//! - Define what the transport layer needs from an underlying connection:
//!   construction with optional proxy parameters, a read timeout, TLS
//!   verification mode, CA file, trust store, and a single request/response
//!   round trip
//! - Carry trust-store material in an opaque, cheaply cloneable handle
//!
//! # Design Decisions
//! - The traits are deliberately library-agnostic. The real implementation
//!   lives in [`client`]; tests substitute a recording mock and assert which
//!   setters were invoked, without any network.

pub mod client;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::ProxySpec;
use crate::error::{Error, Result};
use crate::http::request::HttpRequest;
use crate::http::response::ResponseTuple;

pub use client::ReqwestConnector;

/// TLS peer-verification mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyMode {
    /// Do not verify the peer certificate at all.
    None,
    /// Verify the peer certificate against the configured trust roots.
    Peer,
}

/// An opaque collection of trusted CA certificates (DER-encoded).
///
/// Cloning shares the underlying material; [`CertStore::ptr_eq`] tells
/// whether two handles refer to the same store.
#[derive(Clone)]
pub struct CertStore {
    ders: Arc<Vec<Vec<u8>>>,
}

impl CertStore {
    /// Build a store from already DER-encoded certificates.
    pub fn from_der_certs(ders: Vec<Vec<u8>>) -> Self {
        Self { ders: Arc::new(ders) }
    }

    /// Parse all certificates out of a PEM bundle.
    pub fn from_pem_bytes(pem: &[u8]) -> Result<Self> {
        let ders = read_pem_certs(&mut &pem[..], "<pem bytes>")?;
        Ok(Self::from_der_certs(ders))
    }

    /// Load all certificates from a PEM file.
    pub fn from_pem_file(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .map_err(|e| Error::Config(format!("cannot open CA file {}: {e}", path.display())))?;
        let ders = read_pem_certs(&mut std::io::BufReader::new(file), &path.display().to_string())?;
        Ok(Self::from_der_certs(ders))
    }

    /// DER-encoded certificates in this store.
    pub fn der_certs(&self) -> &[Vec<u8>] {
        &self.ders
    }

    /// Whether two handles point at the same underlying store.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.ders, &b.ders)
    }
}

impl std::fmt::Debug for CertStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CertStore").field("certs", &self.ders.len()).finish()
    }
}

fn read_pem_certs(reader: &mut dyn std::io::BufRead, origin: &str) -> Result<Vec<Vec<u8>>> {
    let mut ders = Vec::new();
    for cert in rustls_pemfile::certs(reader) {
        let cert = cert.map_err(|e| Error::Config(format!("invalid PEM in {origin}: {e}")))?;
        ders.push(cert.to_vec());
    }
    if ders.is_empty() {
        return Err(Error::Config(format!("no certificates found in {origin}")));
    }
    Ok(ders)
}

/// One configurable connection, exclusively owned by a single request.
///
/// Setters accumulate state; [`Connection::send`] performs the round trip.
/// A TLS failure during send must surface as [`Error::Ssl`], any other
/// transport failure as [`Error::Connection`].
#[async_trait]
pub trait Connection: Send {
    /// Apply a read timeout before the request is sent.
    fn set_read_timeout(&mut self, timeout: Duration);

    /// Select the TLS peer-verification mode. Not calling this leaves the
    /// underlying stack's default behavior untouched.
    fn set_verify_mode(&mut self, mode: VerifyMode);

    /// Trust the CA certificates in the given PEM file.
    fn set_ca_file(&mut self, path: &Path);

    /// Trust the given certificate store.
    fn set_cert_store(&mut self, store: CertStore);

    /// Perform the request and collect status, body and headers.
    async fn send(&mut self, request: &HttpRequest) -> Result<ResponseTuple>;
}

/// Factory for [`Connection`] values.
///
/// `proxy` carries host, port, user and password for the proxy hop, in that
/// order; `None` means a direct connection to `host:port`.
pub trait Connector: Send + Sync {
    fn connect(&self, host: &str, port: u16, proxy: Option<&ProxySpec>) -> Box<dyn Connection>;
}
