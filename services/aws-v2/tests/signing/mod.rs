mod admin;
mod offline;

use anyhow::Result;
use http::{Request, StatusCode};
use log::debug;
use rgwsign_aws_v2::{Credential, RequestSigner};
use rgwsign_core::SignRequest;
use reqwest::Client;
use std::env;

/// Load static credential from environment variables
pub fn load_static_credential() -> Credential {
    let access_key = env::var("RGWSIGN_ACCESS_KEY").expect("RGWSIGN_ACCESS_KEY must be set");
    let secret_key = env::var("RGWSIGN_SECRET_KEY").expect("RGWSIGN_SECRET_KEY must be set");

    Credential::new(&access_key, &secret_key)
}

/// Initialize test environment
///
/// Returns `None` unless `RGWSIGN_TEST` is `on`.
pub fn init_signing_test() -> Option<(RequestSigner, String)> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("RGWSIGN_TEST").unwrap_or_default() != "on" {
        return None;
    }

    let endpoint = env::var("RGWSIGN_ENDPOINT").expect("RGWSIGN_ENDPOINT must be set");

    Some((RequestSigner::new(), endpoint.trim_end_matches('/').to_string()))
}

/// Send signed request and return response
pub async fn send_signed_request(
    signer: &RequestSigner,
    req: Request<String>,
    cred: &Credential,
) -> Result<(StatusCode, String)> {
    let (mut parts, body) = req.into_parts();
    signer
        .sign_request(&mut parts, Some(cred))
        .expect("sign request must succeed");
    let req = Request::from_parts(parts, body);

    debug!("signed request: {req:?}");

    let client = Client::new();
    let resp = client
        .execute(req.try_into().map_err(|e| {
            rgwsign_core::Error::unexpected("failed to convert request")
                .with_source(anyhow::Error::new(e))
        })?)
        .await
        .map_err(|e| {
            rgwsign_core::Error::unexpected("failed to execute request")
                .with_source(anyhow::Error::new(e))
        })?;

    let status = resp.status();
    let body = resp.text().await.map_err(|e| {
        rgwsign_core::Error::unexpected("failed to get response body")
            .with_source(anyhow::Error::new(e))
    })?;

    debug!("response status: {status}, body: {body}");
    Ok((status, body))
}
