//! JSON decode helper.
//!
//! Turns response body text into a structured value. Malformed input fails
//! with the parse-error kind; it is never silently mapped to null.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::http::request::RequestOptions;
use crate::http::response::ResponseTuple;

/// Parse the reply body as a JSON value.
pub fn json_parse_reply(reply: &ResponseTuple) -> Result<Value> {
    Ok(serde_json::from_str(&reply.body)?)
}

/// Parse the reply body into a caller-chosen type.
pub fn json_parse_reply_as<T: DeserializeOwned>(reply: &ResponseTuple) -> Result<T> {
    Ok(serde_json::from_str(&reply.body)?)
}

/// Enforce the strict-mode status policy, if enabled. The default
/// predicate accepts the 2xx range.
pub(crate) fn check_status(reply: &ResponseTuple, options: &RequestOptions) -> Result<()> {
    if !options.strict {
        return Ok(());
    }
    let ok = match &options.success {
        Some(predicate) => predicate(reply.status),
        None => reply.is_success(),
    };
    if ok {
        Ok(())
    } else {
        Err(Error::BadResponse {
            status: reply.status,
            body: reply.body.clone(),
        })
    }
}
