//! Outage service client configuration.

use serde::{Deserialize, Serialize};

use crate::retry::RetryPolicy;
use crate::secret::SecretString;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.krakenflex.systems/interview-tests-mock-api/v1";

/// Fallback credential used when none is configured or present in the
/// environment.
const DEFAULT_API_KEY: &str = "EltgJ5G8m44IzwE6UN2Y4B4NjPW77Zk6FJK3lL23";

/// Immutable configuration for [`OutageApiClient`](crate::OutageApiClient).
///
/// Constructed once at process start and passed by reference; there is no
/// ambient or global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL of the outage service.
    pub base_url: String,
    /// Static API credential sent as `x-api-key` on every call.
    pub api_key: SecretString,
    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// Retry policy applied to every call.
    pub retry: RetryPolicy,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: SecretString::new(DEFAULT_API_KEY),
            request_timeout_ms: 30_000,
            retry: RetryPolicy::default(),
        }
    }
}
