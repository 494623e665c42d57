//! Response-side types.
//!
//! Header keys are normalized to lowercase at construction, so lookups are
//! effectively case-insensitive no matter how the transport or an injected
//! handler capitalized them.

use std::collections::HashMap;

/// Response headers with lowercase keys.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Headers {
    map: HashMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a header; the name is lowercased. A repeated name replaces
    /// the earlier value.
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.map.insert(name.as_ref().to_lowercase(), value.into());
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<N: AsRef<str>, V: Into<String>> FromIterator<(N, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

/// The `(status, body, headers)` result of one request. Immutable once
/// returned; non-2xx statuses are carried here intact, not raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseTuple {
    pub status: u16,
    pub body: String,
    pub headers: Headers,
}

impl ResponseTuple {
    pub fn new<N, V>(status: u16, body: impl Into<String>, headers: impl IntoIterator<Item = (N, V)>) -> Self
    where
        N: AsRef<str>,
        V: Into<String>,
    {
        Self {
            status,
            body: body.into(),
            headers: headers.into_iter().collect(),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_keys_are_lowercased() {
        let reply = ResponseTuple::new(200, "", [("Content-Type", "text/plain")]);
        assert_eq!(reply.headers.get("content-type"), Some("text/plain"));
        assert_eq!(reply.headers.get("CONTENT-TYPE"), Some("text/plain"));
        assert_eq!(reply.headers.iter().next(), Some(("content-type", "text/plain")));
    }

    #[test]
    fn success_range_is_2xx() {
        assert!(ResponseTuple::new(200, "", Vec::<(String, String)>::new()).is_success());
        assert!(ResponseTuple::new(299, "", Vec::<(String, String)>::new()).is_success());
        assert!(!ResponseTuple::new(199, "", Vec::<(String, String)>::new()).is_success());
        assert!(!ResponseTuple::new(404, "", Vec::<(String, String)>::new()).is_success());
    }
}
