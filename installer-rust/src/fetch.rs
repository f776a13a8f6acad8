use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

use crate::error::{InstallError, InstallResult};

/// Downloads `url` into memory. The response must be a success status and
/// declare a content type containing `expected_content_type`.
pub fn fetch_archive(url: &str, expected_content_type: &str, timeout: Duration) -> InstallResult<Vec<u8>> {
    log::info!("downloading {url}");
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()?;
    let resp = client.get(url).send()?;

    let status = resp.status();
    if !status.is_success() {
        return Err(InstallError::DownloadFailed {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    if !content_type_matches(&content_type, expected_content_type) {
        return Err(InstallError::UnexpectedContentType {
            url: url.to_string(),
            expected: expected_content_type.to_string(),
            actual: content_type,
        });
    }

    let body = resp.bytes()?;
    log::debug!("downloaded {} bytes ({content_type})", body.len());
    Ok(body.to_vec())
}

fn content_type_matches(actual: &str, expected: &str) -> bool {
    !actual.is_empty() && actual.contains(expected)
}
