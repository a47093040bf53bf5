use super::{init_signing_test, load_static_credential, send_signed_request};
use anyhow::Result;
use http::{Method, Request, StatusCode};
use log::warn;
use rgwsign_aws_v2::Credential;
use std::str::FromStr;

#[tokio::test]
async fn test_list_buckets() -> Result<()> {
    let Some((signer, endpoint)) = init_signing_test() else {
        warn!("RGWSIGN_TEST is not set, skipped");
        return Ok(());
    };

    let cred = load_static_credential();

    let mut req = Request::new(String::new());
    *req.method_mut() = Method::GET;
    *req.uri_mut() = http::Uri::from_str(&format!("{endpoint}/admin/bucket?format=json"))?;

    let (status, body) = send_signed_request(&signer, req, &cred).await?;
    assert_eq!(StatusCode::OK, status, "{body}");
    Ok(())
}

#[tokio::test]
async fn test_get_user_info() -> Result<()> {
    let Some((signer, endpoint)) = init_signing_test() else {
        warn!("RGWSIGN_TEST is not set, skipped");
        return Ok(());
    };

    let cred = load_static_credential();

    let mut req = Request::new(String::new());
    *req.method_mut() = Method::GET;
    *req.uri_mut() = http::Uri::from_str(&format!(
        "{endpoint}/admin/user?info&uid=rgwsign-not-exist&format=json"
    ))?;

    let (status, body) = send_signed_request(&signer, req, &cred).await?;
    assert_eq!(StatusCode::NOT_FOUND, status, "{body}");
    Ok(())
}

#[tokio::test]
async fn test_wrong_secret_is_rejected() -> Result<()> {
    let Some((signer, endpoint)) = init_signing_test() else {
        warn!("RGWSIGN_TEST is not set, skipped");
        return Ok(());
    };

    let cred = load_static_credential();
    let cred = Credential::new(&cred.access_key_id, "definitely-not-the-secret");

    let mut req = Request::new(String::new());
    *req.method_mut() = Method::GET;
    *req.uri_mut() = http::Uri::from_str(&format!("{endpoint}/admin/bucket?format=json"))?;

    let (status, body) = send_signed_request(&signer, req, &cred).await?;
    assert_eq!(StatusCode::FORBIDDEN, status, "{body}");
    Ok(())
}
