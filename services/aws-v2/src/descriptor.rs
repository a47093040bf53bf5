use http::header::{CONTENT_TYPE, DATE};

use crate::constants::{CONTENT_MD5, X_AMZ_PREFIX};

/// RequestDescriptor is the minimal view of an outgoing request that the
/// signer needs: the method, the url relative to the endpoint and the
/// headers.
///
/// Header names are kept verbatim, in insertion order, and compared
/// case-insensitively.
///
/// ```
/// use rgwsign_aws_v2::RequestDescriptor;
///
/// let req = RequestDescriptor::new("GET", "admin/user?uid=foo")
///     .with_header("Content-Type", "application/json");
/// assert_eq!(req.header("content-type"), Some("application/json"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestDescriptor {
    /// HTTP method, e.g. `GET`.
    pub method: String,
    /// Path with optional `?query`, e.g. `admin/bucket?format=json`.
    pub url: String,
    /// Header (name, value) pairs.
    pub headers: Vec<(String, String)>,
}

impl RequestDescriptor {
    /// Create a new descriptor without headers.
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: Vec::new(),
        }
    }

    /// Append a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Get the value of the first header matching `name` case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Set a header, replacing the value of an existing entry.
    ///
    /// The first entry matching `name` case-insensitively keeps its original
    /// spelling and gets the new value; later duplicates are dropped. If no
    /// entry matches, a new one is appended under `name`.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        let mut found = false;
        self.headers.retain_mut(|(k, v)| {
            if !k.eq_ignore_ascii_case(name) {
                return true;
            }
            if found {
                return false;
            }
            found = true;
            *v = value.clone();
            true
        });

        if !found {
            self.headers.push((name.to_string(), value));
        }
    }

    /// Build a descriptor from http request parts.
    ///
    /// The url is the path plus query of the uri, scheme and authority
    /// are not part of the signature.
    ///
    /// Only the headers that take part in the string to sign are copied:
    /// `date`, `content-type`, `content-md5` and `x-amz-*`. Their values
    /// must be visible ascii, other headers may carry arbitrary bytes.
    pub fn from_parts(parts: &http::request::Parts) -> rgwsign_core::Result<Self> {
        let url = match parts.uri.query() {
            Some(query) => format!("{}?{query}", parts.uri.path()),
            None => parts.uri.path().to_string(),
        };

        let headers = parts
            .headers
            .iter()
            .filter(|(k, _)| is_signed_header(k.as_str()))
            .map(|(k, v)| -> rgwsign_core::Result<(String, String)> {
                Ok((k.as_str().to_string(), v.to_str()?.to_string()))
            })
            .collect::<rgwsign_core::Result<Vec<_>>>()?;

        Ok(Self {
            method: parts.method.as_str().to_string(),
            url,
            headers,
        })
    }
}

fn is_signed_header(name: &str) -> bool {
    name == DATE.as_str()
        || name == CONTENT_TYPE.as_str()
        || name == CONTENT_MD5
        || name.starts_with(X_AMZ_PREFIX)
}
