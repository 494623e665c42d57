//! Injected-handler transport: the test/mocking seam.

use async_trait::async_trait;

use crate::config::RequestHandler;
use crate::error::Result;
use crate::http::request::HttpRequest;
use crate::http::response::ResponseTuple;
use crate::transport::Transport;

/// Dispatches to the caller-supplied handler verbatim. The handler's tuple
/// is the response; only header keys are normalized to lowercase.
pub struct HandlerTransport {
    handler: RequestHandler,
}

impl HandlerTransport {
    pub fn new(handler: RequestHandler) -> Self {
        Self { handler }
    }
}

#[async_trait]
impl Transport for HandlerTransport {
    async fn execute(&mut self, request: &HttpRequest) -> Result<ResponseTuple> {
        let (status, body, headers) = (self.handler)(request);
        Ok(ResponseTuple::new(status, body, headers))
    }
}
