//! HTTP fetching.
//!
//! One blocking GET per call with an explicit total timeout and redirect
//! limit. The body is decoded to UTF-8 by [`crate::encoding::decode_body`].

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use url::Url;

use crate::encoding::decode_body;
use crate::error::{Error, Result};
use crate::options::FetchOptions;

/// Fetch the HTML text of a page.
///
/// # Errors
///
/// - [`Error::InvalidUrl`] if `url` cannot be parsed
/// - [`Error::Timeout`] if the request exceeds [`FetchOptions::timeout`]
/// - [`Error::Status`] for a non-success HTTP status
/// - [`Error::Fetch`] for any other transport failure
pub fn fetch_html(url: &str, options: &FetchOptions) -> Result<String> {
    let parsed = Url::parse(url.trim()).map_err(|source| Error::InvalidUrl {
        url: url.to_string(),
        source,
    })?;

    let client = build_client(options).map_err(|e| transport_error(url, options, e))?;

    tracing::debug!(url = %parsed, timeout_secs = options.timeout.as_secs_f64(), "fetching");

    let response = client
        .get(parsed)
        .send()
        .map_err(|e| transport_error(url, options, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status {
            url: url.to_string(),
            status,
        });
    }

    let final_url = response.url().clone();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let body = response
        .bytes()
        .map_err(|e| transport_error(url, options, e))?;

    tracing::debug!(
        url = %final_url,
        status = status.as_u16(),
        bytes = body.len(),
        content_type = content_type.as_deref().unwrap_or(""),
        "fetched"
    );

    Ok(decode_body(&body, content_type.as_deref()))
}

fn build_client(options: &FetchOptions) -> reqwest::Result<Client> {
    let redirect = if options.max_redirects == 0 {
        Policy::none()
    } else {
        Policy::limited(options.max_redirects)
    };

    Client::builder()
        .timeout(options.timeout)
        .connect_timeout(options.connect_timeout)
        .redirect(redirect)
        .user_agent(options.user_agent.as_str())
        .build()
}

fn transport_error(url: &str, options: &FetchOptions, source: reqwest::Error) -> Error {
    if source.is_timeout() {
        Error::Timeout {
            url: url.to_string(),
            timeout: options.timeout,
        }
    } else {
        Error::Fetch {
            url: url.to_string(),
            source,
        }
    }
}
