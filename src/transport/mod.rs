//! Transport selection.
//!
//! # Responsibilities
//! - Decide, per request, between the injected request handler and a real
//!   network connection
//! - Keep that decision in one factory function instead of scattered
//!   conditionals
//!
//! An injected handler always wins: when one is set, no connection is
//! constructed and proxy/TLS/timeout settings are ignored entirely.

pub mod handler;
pub mod real;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::request::{HttpRequest, RequestOptions};
use crate::http::response::ResponseTuple;
use crate::net::Connector;

use handler::HandlerTransport;
use real::RealConnectionTransport;

/// Something capable of executing exactly one HTTP request.
#[async_trait]
pub trait Transport: Send {
    async fn execute(&mut self, request: &HttpRequest) -> Result<ResponseTuple>;
}

/// Pick the transport for one request from a config snapshot.
///
/// Fails with [`crate::Error::Config`] before any I/O when the relevant
/// proxy string is malformed.
pub(crate) fn select(
    config: &ClientConfig,
    connector: &Arc<dyn Connector>,
    request: &HttpRequest,
    options: &RequestOptions,
) -> Result<Box<dyn Transport>> {
    if let Some(handler) = &config.request_handler {
        tracing::debug!(url = %request.url, "dispatching to injected request handler");
        return Ok(Box::new(HandlerTransport::new(Arc::clone(handler))));
    }

    let transport = RealConnectionTransport::open(config, connector.as_ref(), request, options)?;
    Ok(Box::new(transport))
}
