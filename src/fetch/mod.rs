mod client;
mod basic;
pub mod auth;

pub use client::HttpClient;
pub use basic::BasicClient;

use crate::error::AirQualityError;

/// Status and body of a response, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Issues a GET and reads the body as text whatever the status.
///
/// Only transport failures are errors here; status handling is left to
/// [`crate::parser::parse_response`].
pub async fn fetch_text<C: HttpClient>(
    client: &C,
    url: reqwest::Url,
) -> Result<RawResponse, AirQualityError> {
    let req = reqwest::Request::new(reqwest::Method::GET, url);

    let resp = client.execute(req).await?;
    let status = resp.status().as_u16();
    let body = resp.text().await?;

    Ok(RawResponse { status, body })
}
