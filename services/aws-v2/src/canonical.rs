//! Canonicalization steps of AWS Signature Version 2.
//!
//! - [Signing and authenticating REST requests](https://docs.aws.amazon.com/AmazonS3/latest/userguide/RESTAuthentication.html)

use std::collections::BTreeMap;
use std::fmt::Write;
use std::str::FromStr;

use http::header::{CONTENT_TYPE, DATE};
use rgwsign_core::{Error, Result};

use crate::constants::{is_sub_resource, CONTENT_MD5, X_AMZ_PREFIX};

/// How query parameters are matched against [`SUB_RESOURCES`](crate::SUB_RESOURCES).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SubResourceMatch {
    /// Keep parameters whose *name* is a sub-resource.
    ///
    /// This is the documented canonicalization rule.
    #[default]
    Name,
    /// Keep parameters whose *value* is a sub-resource name.
    ///
    /// Reproduces the Ceph s3gw UI client, which tested values instead of
    /// names. Only use it to talk to servers that were tuned against that
    /// client.
    Value,
}

impl FromStr for SubResourceMatch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(SubResourceMatch::Name),
            "value" => Ok(SubResourceMatch::Value),
            v => Err(Error::config_invalid(format!(
                "sub resource match must be `name` or `value`, got `{v}`"
            ))),
        }
    }
}

/// Headers that take part in the string to sign.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ClassifiedHeaders<'a> {
    /// Value of the first `date` header.
    pub date: Option<&'a str>,
    /// Value of the first `content-type` header.
    pub content_type: Option<&'a str>,
    /// Value of the first `content-md5` header.
    pub content_md5: Option<&'a str>,
    /// All `x-amz-*` headers keyed by their lower-cased name.
    ///
    /// If a name shows up more than once, the last value wins.
    pub x_amz_headers: BTreeMap<String, &'a str>,
}

/// Classify headers into the parts used by the string to sign.
///
/// Names are matched case-insensitively; the input is never modified.
/// Headers not listed in [`ClassifiedHeaders`] are ignored.
pub fn classify<'a>(headers: impl IntoIterator<Item = (&'a str, &'a str)>) -> ClassifiedHeaders<'a> {
    let mut classified = ClassifiedHeaders::default();

    for (name, value) in headers {
        let lc_name = name.to_ascii_lowercase();
        if lc_name == DATE.as_str() {
            classified.date.get_or_insert(value);
        } else if lc_name == CONTENT_TYPE.as_str() {
            classified.content_type.get_or_insert(value);
        } else if lc_name == CONTENT_MD5 {
            classified.content_md5.get_or_insert(value);
        } else if lc_name.starts_with(X_AMZ_PREFIX) {
            classified.x_amz_headers.insert(lc_name, value);
        }
    }

    classified
}

/// Build the CanonicalizedAmzHeaders element.
///
/// Names are lower-cased and sorted bytewise, every header is rendered as
/// `name:value\n`. Returns an empty string if there are no headers.
///
/// ```
/// use rgwsign_aws_v2::canonicalize_amz_headers;
///
/// let s = canonicalize_amz_headers([("X-Amz-Meta-Foo", "1"), ("x-amz-date", "D")]);
/// assert_eq!(s, "x-amz-date:D\nx-amz-meta-foo:1\n");
/// ```
pub fn canonicalize_amz_headers<'a>(headers: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let headers = headers
        .into_iter()
        .map(|(k, v)| (k.to_ascii_lowercase(), v))
        .collect::<BTreeMap<_, _>>();

    let mut s = String::new();
    for (k, v) in headers {
        s.push_str(&k);
        s.push(':');
        s.push_str(v);
        s.push('\n');
    }
    s
}

/// Build the sub-resource suffix of the CanonicalizedResource element.
///
/// `query` is the raw query string without the leading `?`. It's decoded as
/// `application/x-www-form-urlencoded`. Parameters that are not
/// sub-resources are dropped, the rest are sorted by name and rendered as
/// `name` (empty value) or `name=value`, joined with `&` and prefixed with
/// `?`. Returns an empty string if nothing is left.
///
/// With [`SubResourceMatch::Name`] a repeated name is kept once with the
/// value of its first occurrence.
pub fn extract_sub_resources(query: &str, mode: SubResourceMatch) -> String {
    let decoded = form_urlencoded::parse(query.as_bytes()).collect::<Vec<_>>();
    let params = decoded
        .iter()
        .map(|(k, v)| (&**k, &**v))
        .collect::<Vec<(&str, &str)>>();

    let entries = match mode {
        SubResourceMatch::Name => sub_resources_by_name(&params),
        SubResourceMatch::Value => sub_resources_by_value(&params),
    };
    if entries.is_empty() {
        return String::new();
    }

    let mut s = String::with_capacity(query.len() + 1);
    for (idx, entry) in entries.iter().enumerate() {
        s.push(if idx == 0 { '?' } else { '&' });
        s.push_str(entry);
    }
    s
}

fn sub_resources_by_name<'a>(params: &[(&'a str, &'a str)]) -> Vec<String> {
    let mut kept: Vec<(&str, &str)> = Vec::new();
    for &(k, v) in params {
        if is_sub_resource(k) && !kept.iter().any(|(name, _)| *name == k) {
            kept.push((k, v));
        }
    }
    kept.sort_unstable_by(|a, b| a.0.cmp(b.0));

    kept.into_iter()
        .map(|(k, v)| {
            if v.is_empty() {
                k.to_string()
            } else {
                format!("{k}={v}")
            }
        })
        .collect()
}

fn sub_resources_by_value<'a>(params: &[(&'a str, &'a str)]) -> Vec<String> {
    let mut names = params
        .iter()
        .map(|&(_, v)| v)
        .filter(|v| is_sub_resource(v))
        .collect::<Vec<_>>();
    names.sort_unstable();

    names
        .into_iter()
        .map(|name| {
            let value = params
                .iter()
                .find(|&&(k, _)| k == name)
                .map(|&(_, v)| v);
            match value {
                Some("") => name.to_string(),
                Some(v) => format!("{name}={v}"),
                // A parameter that only shows up as a value has no value of
                // its own; the legacy client rendered that as `null`.
                None => format!("{name}=null"),
            }
        })
        .collect()
}

/// Build the CanonicalizedResource element from a url.
///
/// The url is split at the first `?`. The path gets a leading `/` unless it
/// already has one, and the query is reduced by [`extract_sub_resources`].
///
/// ```
/// use rgwsign_aws_v2::{canonicalize_resource, SubResourceMatch};
///
/// let s = canonicalize_resource("admin/bucket?uploads&format=json", SubResourceMatch::Name);
/// assert_eq!(s, "/admin/bucket?uploads");
/// ```
pub fn canonicalize_resource(url: &str, mode: SubResourceMatch) -> String {
    let (path, query) = match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url, None),
    };

    let mut s = String::with_capacity(url.len() + 1);
    if !path.starts_with('/') {
        s.push('/');
    }
    s.push_str(path);
    if let Some(query) = query {
        s.push_str(&extract_sub_resources(query, mode));
    }
    s
}

/// Construct string to sign
///
/// ## Format
///
/// ```text
/// VERB + "\n" +
/// Content-MD5 + "\n" +
/// Content-Type + "\n" +
/// Date + "\n" +
/// CanonicalizedAmzHeaders +
/// CanonicalizedResource;
/// ```
pub fn string_to_sign(
    method: &str,
    headers: &ClassifiedHeaders<'_>,
    date: &str,
    resource: &str,
) -> Result<String> {
    let amz_headers =
        canonicalize_amz_headers(headers.x_amz_headers.iter().map(|(k, v)| (k.as_str(), *v)));

    let mut s = String::with_capacity(
        method.len() + date.len() + amz_headers.len() + resource.len() + 64,
    );
    writeln!(&mut s, "{method}")?;
    writeln!(&mut s, "{}", headers.content_md5.unwrap_or_default())?;
    writeln!(&mut s, "{}", headers.content_type.unwrap_or_default())?;
    writeln!(&mut s, "{date}")?;
    write!(&mut s, "{amz_headers}{resource}")?;
    Ok(s)
}
