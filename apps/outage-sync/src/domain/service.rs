//! Run coordination: fetch, filter, submit.

use outage_api::{ApiError, OutageApiClient};
use thiserror::Error;

use super::filter;
use crate::config::SyncConfig;

/// Failure of a specific pipeline step.
///
/// A failed fetch aborts the run before later steps execute; a failed
/// submission is simply the final outcome of the run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The outage collection could not be fetched.
    #[error("failed to fetch outages")]
    FetchOutages(#[source] ApiError),

    /// The site's device registry could not be fetched.
    #[error("failed to fetch site info for {site_id}")]
    FetchSiteInfo {
        site_id: String,
        #[source]
        source: ApiError,
    },

    /// The filtered outages could not be submitted.
    #[error("failed to submit {count} outages for {site_id}")]
    Submit {
        site_id: String,
        count: usize,
        #[source]
        source: ApiError,
    },
}

/// Summary of one synchronization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Outages reported by the service, before filtering.
    pub total_outages: usize,
    /// Outages relevant to the target site.
    pub relevant_outages: usize,
    /// Whether the filtered set was submitted (false in dry-run mode).
    pub submitted: bool,
}

/// Coordinates one synchronization run against the outage service.
///
/// Four sequential steps, no branching except early exit on failure:
/// fetch all outages, fetch the target site's registry, filter, submit.
/// Each step fully completes (including the transport's retries) before the
/// next begins; nothing is re-fetched or re-filtered after a submit failure.
pub struct SyncService {
    client: OutageApiClient,
    config: SyncConfig,
}

impl SyncService {
    /// Create a service over an existing client.
    #[must_use]
    pub fn new(client: OutageApiClient, config: SyncConfig) -> Self {
        Self { client, config }
    }

    /// Execute the pipeline once.
    ///
    /// With `dry_run` set, the submission step is skipped and the outcome
    /// reports `submitted: false`.
    ///
    /// # Errors
    /// Returns the step-tagged [`SyncError`] of the first step that failed.
    #[tracing::instrument(skip(self), fields(site_id = %self.config.site_id))]
    pub async fn run(&self, dry_run: bool) -> Result<SyncOutcome, SyncError> {
        let outages = self
            .client
            .get_outages()
            .await
            .map_err(SyncError::FetchOutages)?;
        tracing::info!(count = outages.len(), "fetched outages");

        let site = self
            .client
            .get_site_info(&self.config.site_id)
            .await
            .map_err(|source| SyncError::FetchSiteInfo {
                site_id: self.config.site_id.clone(),
                source,
            })?;
        tracing::info!(devices = site.devices.len(), "fetched site info");

        let relevant = filter::relevant_outages(&outages, &site, self.config.min_begin);
        tracing::info!(relevant = relevant.len(), "filtered outages");

        if dry_run {
            tracing::info!("dry run; skipping submission");
            return Ok(SyncOutcome {
                total_outages: outages.len(),
                relevant_outages: relevant.len(),
                submitted: false,
            });
        }

        self.client
            .post_site_outages(&self.config.site_id, &relevant)
            .await
            .map_err(|source| SyncError::Submit {
                site_id: self.config.site_id.clone(),
                count: relevant.len(),
                source,
            })?;
        tracing::info!(submitted = relevant.len(), "submitted site outages");

        Ok(SyncOutcome {
            total_outages: outages.len(),
            relevant_outages: relevant.len(),
            submitted: true,
        })
    }
}
