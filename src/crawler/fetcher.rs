//! HTTP fetcher implementation
//!
//! Pages and archives are fetched with plain GET requests on a client built
//! with reqwest defaults. Any status above 299 is treated as a failure.

use crate::FetchError;
use reqwest::{Client, Response};

/// Builds the HTTP client shared by page and archive fetches
///
/// # Example
///
/// ```no_run
/// use sinit_grabber::crawler::build_http_client;
///
/// let client = build_http_client().unwrap();
/// ```
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder().build()
}

/// Sends a GET request and checks the response status
///
/// # Returns
///
/// * `Ok(Response)` - The response, with its body not yet read
/// * `Err(FetchError::Network)` - The request could not be completed
/// * `Err(FetchError::Status)` - The server answered with a status above 299
pub async fn fetch_url(client: &Client, url: &str) -> Result<Response, FetchError> {
    tracing::debug!("Downloading {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| FetchError::Network {
            url: url.to_string(),
            source,
        })?;

    let status = response.status().as_u16();
    if status > 299 {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    Ok(response)
}
