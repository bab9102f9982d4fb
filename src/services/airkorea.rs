//! Client for the AirKorea real-time measurement API by province.

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::ValueEnum;
use reqwest::Url;
use std::fmt;
use tracing::{debug, info};

use crate::analyzers::types::RawStationRecord;
use crate::config::ApiConfig;
use crate::error::AirQualityError;
use crate::fetch::auth::UrlParam;
use crate::fetch::{BasicClient, HttpClient, fetch_text};
use crate::parser::parse_response;

/// Province or metropolitan city accepted as `sidoName`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Sido {
    Seoul,
    Busan,
    Daegu,
    Incheon,
    Gwangju,
    Daejeon,
    Ulsan,
}

impl Sido {
    /// Name the API expects in the `sidoName` parameter.
    pub fn api_name(self) -> &'static str {
        match self {
            Sido::Seoul => "서울",
            Sido::Busan => "부산",
            Sido::Daegu => "대구",
            Sido::Incheon => "인천",
            Sido::Gwangju => "광주",
            Sido::Daejeon => "대전",
            Sido::Ulsan => "울산",
        }
    }
}

/// Uses the CLI value name (`seoul`, `busan`, ...).
impl fmt::Display for Sido {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_possible_value() {
            Some(value) => f.pad(value.get_name()),
            None => Ok(()),
        }
    }
}

/// Supplier of raw station records for a region.
#[async_trait]
pub trait MeasurementApi: Send + Sync {
    async fn fetch_region(&self, sido: Sido) -> Result<Vec<RawStationRecord>, AirQualityError>;
}

pub struct AirKoreaClient<C> {
    http: C,
    endpoint: Url,
    num_of_rows: u32,
    page_no: u32,
    version: String,
}

impl AirKoreaClient<UrlParam<BasicClient>> {
    /// Builds a client that sends the configured service key with each request.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let transport = BasicClient::with_timeouts(config.timeout, config.connect_timeout)
            .context("Failed to build HTTP client")?;
        let http = UrlParam::service_key(transport, config.service_key.clone());
        Self::with_client(http, config)
    }
}

impl<C: HttpClient> AirKoreaClient<C> {
    pub fn with_client(http: C, config: &ApiConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid API base URL '{}'", config.base_url))?;

        Ok(Self {
            http,
            endpoint,
            num_of_rows: config.num_of_rows,
            page_no: config.page_no,
            version: config.version.clone(),
        })
    }

    /// Request URL for `sido`, without credentials.
    pub fn request_url(&self, sido: Sido) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("sidoName", sido.api_name())
            .append_pair("returnType", "json")
            .append_pair("numOfRows", &self.num_of_rows.to_string())
            .append_pair("pageNo", &self.page_no.to_string())
            .append_pair("ver", &self.version);
        url
    }
}

#[async_trait]
impl<C: HttpClient> MeasurementApi for AirKoreaClient<C> {
    #[tracing::instrument(skip(self))]
    async fn fetch_region(&self, sido: Sido) -> Result<Vec<RawStationRecord>, AirQualityError> {
        let url = self.request_url(sido);
        debug!(endpoint = %self.endpoint, "Requesting measurements");

        let response = fetch_text(&self.http, url).await?;
        debug!(
            status = response.status,
            bytes = response.body.len(),
            "Measurement response received"
        );

        let records = parse_response(response.status, &response.body)?;
        info!(records = records.len(), "Measurements fetched");
        Ok(records)
    }
}
