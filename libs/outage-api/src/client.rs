//! HTTP client for the outage service.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::models::{Outage, SiteInfo, SiteOutage};
use crate::retry::retry;

/// Header carrying the static API credential.
const API_KEY_HEADER: &str = "x-api-key";

/// Client for the outage service REST API.
///
/// Wraps a `reqwest` client and runs every operation under the configured
/// retry policy. Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct OutageApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl OutageApiClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    /// Returns [`ApiError::Request`] if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| ApiError::request(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    /// Fetch the full outage collection.
    ///
    /// # Errors
    /// Returns the last [`ApiError`] once the retry policy gives up.
    #[tracing::instrument(skip(self))]
    pub async fn get_outages(&self) -> Result<Vec<Outage>, ApiError> {
        retry(&self.config.retry, "GET /outages", || {
            self.fetch_json("outages")
        })
        .await
    }

    /// Fetch the device registry for one site.
    ///
    /// # Errors
    /// Returns the last [`ApiError`] once the retry policy gives up.
    #[tracing::instrument(skip(self))]
    pub async fn get_site_info(&self, site_id: &str) -> Result<SiteInfo, ApiError> {
        let path = format!("site-info/{site_id}");
        retry(&self.config.retry, "GET /site-info", || {
            self.fetch_json(&path)
        })
        .await
    }

    /// Submit the filtered outages for one site.
    ///
    /// The body is the complete desired subset, so replaying it on retry is
    /// safe.
    ///
    /// # Errors
    /// Returns the last [`ApiError`] once the retry policy gives up.
    #[tracing::instrument(skip(self, outages), fields(count = outages.len()))]
    pub async fn post_site_outages(
        &self,
        site_id: &str,
        outages: &[SiteOutage],
    ) -> Result<(), ApiError> {
        let url = self.endpoint_url(&format!("site-outages/{site_id}"));
        retry(&self.config.retry, "POST /site-outages", || async {
            let response = self
                .http
                .post(&url)
                .header(API_KEY_HEADER, self.config.api_key.expose())
                .json(outages)
                .send()
                .await
                .map_err(ApiError::from)?;

            let status = response.status();
            if let Some(err) = ApiError::from_status(status) {
                return Err(err);
            }
            tracing::debug!(url = %url, status = status.as_u16(), "request completed");
            Ok(())
        })
        .await
    }

    /// Issue one GET against `path` and decode the JSON body.
    async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint_url(path);
        let response = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, self.config.api_key.expose())
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        if let Some(err) = ApiError::from_status(status) {
            return Err(err);
        }
        tracing::debug!(url = %url, status = status.as_u16(), "request completed");

        response.json::<T>().await.map_err(ApiError::from)
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }
}
