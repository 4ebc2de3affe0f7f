//! Blocking HTTP helpers shared by the provider clients.
//!
//! Uses the curl crate (libcurl). These run in the current thread; call
//! from `spawn_blocking` when used from async code.

use std::time::Duration;

use super::error::CheckError;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// POST `body` to `url` and return the response body. Non-2xx is an error.
pub(super) fn post_json(
    url: &str,
    headers: &[(&str, &str)],
    body: &[u8],
    timeout: Duration,
) -> Result<Vec<u8>, CheckError> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.post(true)?;
    easy.post_fields_copy(body)?;
    configure(&mut easy, headers, timeout)?;
    perform(&mut easy)
}

/// GET `url` and return the response body. Non-2xx is an error.
pub(super) fn get_json(
    url: &str,
    headers: &[(&str, &str)],
    timeout: Duration,
) -> Result<Vec<u8>, CheckError> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    configure(&mut easy, headers, timeout)?;
    perform(&mut easy)
}

fn configure(
    easy: &mut curl::easy::Easy,
    headers: &[(&str, &str)],
    timeout: Duration,
) -> Result<(), CheckError> {
    easy.follow_location(true)?;
    easy.connect_timeout(CONNECT_TIMEOUT.min(timeout))?;
    easy.timeout(timeout)?;

    let mut list = curl::easy::List::new();
    for (name, value) in headers {
        list.append(&format!("{name}: {value}"))?;
    }
    if !headers.is_empty() {
        easy.http_headers(list)?;
    }
    Ok(())
}

fn perform(easy: &mut curl::easy::Easy) -> Result<Vec<u8>, CheckError> {
    let mut response = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            response.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(CheckError::Http(code));
    }
    Ok(response)
}
