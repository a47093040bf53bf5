use http::header::{AUTHORIZATION, DATE};
use http::request::Parts;
use http::HeaderValue;
use log::debug;
use rgwsign_core::hash::base64_hmac_sha1;
use rgwsign_core::time::{format_http_date, now, DateTime};
use rgwsign_core::{Error, Result, SignRequest, SigningCredential};

use crate::canonical::{canonicalize_resource, classify, string_to_sign, SubResourceMatch};
use crate::constants::X_AMZ_DATE;
use crate::{Config, Credential, RequestDescriptor};

/// RequestSigner that implement AWS Signature Version 2 for Ceph RGW.
///
/// - [Signing and authenticating REST requests](https://docs.aws.amazon.com/AmazonS3/latest/userguide/RESTAuthentication.html)
/// - [RGW Admin Operations](https://docs.ceph.com/en/latest/radosgw/adminops/)
///
/// The signer holds no credential and no mutable state, a single instance
/// can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct RequestSigner {
    sub_resource_match: SubResourceMatch,
    strict: bool,

    time: Option<DateTime>,
}

/// Headers produced by signing a descriptor.
struct Signed {
    /// Date to add if the request carried none.
    date: Option<String>,
    authorization: String,
}

impl RequestSigner {
    /// Create a new signer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a signer from config.
    pub fn from_config(config: &Config) -> Self {
        Self {
            sub_resource_match: config.sub_resource_match.unwrap_or_default(),
            strict: config.strict.unwrap_or_default(),
            time: None,
        }
    }

    /// Specify how query parameters are matched against sub-resources.
    pub fn with_sub_resource_match(mut self, mode: SubResourceMatch) -> Self {
        self.sub_resource_match = mode;
        self
    }

    /// Reject requests with an empty method or url and invalid credentials
    /// instead of signing them.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Specify the signing time used when the request has no date.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Sign the descriptor in place.
    ///
    /// Sets `Authorization` and, when neither `date` nor `x-amz-date` is
    /// present, `date`.
    pub fn sign(&self, req: &mut RequestDescriptor, cred: &Credential) -> Result<()> {
        let signed = self.build(req, cred)?;

        if let Some(date) = signed.date {
            req.set_header(DATE.as_str(), date);
        }
        req.set_header("Authorization", signed.authorization);
        Ok(())
    }

    /// Return the string that [`RequestSigner::sign`] would sign for this
    /// descriptor, without modifying it.
    ///
    /// Useful to compare against the `StringToSign` a server reports when
    /// it rejects a request.
    pub fn string_to_sign(&self, req: &RequestDescriptor) -> Result<String> {
        self.validate(req)?;
        let (s, _) = self.build_string_to_sign(req)?;
        Ok(s)
    }

    fn validate(&self, req: &RequestDescriptor) -> Result<()> {
        if !self.strict {
            return Ok(());
        }
        if req.method.is_empty() {
            return Err(Error::request_invalid("request method must not be empty"));
        }
        if req.url.is_empty() {
            return Err(Error::request_invalid("request url must not be empty"));
        }
        Ok(())
    }

    fn build(&self, req: &RequestDescriptor, cred: &Credential) -> Result<Signed> {
        self.validate(req)?;
        if self.strict && !cred.is_valid() {
            return Err(Error::credential_invalid(
                "access key id and secret access key must not be empty",
            ));
        }

        let (string_to_sign, date) = self.build_string_to_sign(req)?;
        let signature =
            base64_hmac_sha1(cred.secret_access_key.as_bytes(), string_to_sign.as_bytes());

        Ok(Signed {
            date,
            authorization: format!("AWS {}:{}", cred.access_key_id, signature),
        })
    }

    /// Returns the string to sign and the date that has to be added to the
    /// request, if any.
    fn build_string_to_sign(&self, req: &RequestDescriptor) -> Result<(String, Option<String>)> {
        let headers = classify(req.headers.iter().map(|(k, v)| (k.as_str(), v.as_str())));

        let default_date = match headers.date {
            Some(date) if !date.is_empty() => None,
            _ if headers.x_amz_headers.contains_key(X_AMZ_DATE) => None,
            _ => {
                let date = format_http_date(self.time.unwrap_or_else(now));
                debug!("request has no date, use {date}");
                Some(date)
            }
        };
        let date = default_date
            .as_deref()
            .or(headers.date)
            .unwrap_or_default();

        let resource = canonicalize_resource(&req.url, self.sub_resource_match);
        debug!("calculated canonicalized resource: {resource}");

        let s = string_to_sign(&req.method, &headers, date, &resource)?;
        debug!("calculated string to sign: {s:?}");

        Ok((s, default_date))
    }
}

impl SignRequest for RequestSigner {
    type Credential = Credential;

    fn sign_request(&self, req: &mut Parts, credential: Option<&Self::Credential>) -> Result<()> {
        let Some(cred) = credential else {
            return Ok(());
        };

        let signed = {
            let desc = RequestDescriptor::from_parts(req)?;
            self.build(&desc, cred)?
        };

        if let Some(date) = signed.date {
            req.headers.insert(DATE, date.parse()?);
        }
        req.headers.insert(AUTHORIZATION, {
            let mut value: HeaderValue = signed.authorization.parse()?;
            value.set_sensitive(true);

            value
        });

        Ok(())
    }
}
