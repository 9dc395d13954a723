use crate::domain::Endpoint;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

/// Failure while loading one API series
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP {status} loading {endpoint}")]
    Request {
        endpoint: Endpoint,
        status: StatusCode,
    },
    #[error("network error loading {endpoint}: {source}")]
    Network {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },
    #[error("malformed response from {endpoint}: {source}")]
    Decode {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    pub const fn endpoint(&self) -> Endpoint {
        match self {
            Self::Request { endpoint, .. }
            | Self::Network { endpoint, .. }
            | Self::Decode { endpoint, .. } => *endpoint,
        }
    }

    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Request { status, .. } => Some(*status),
            Self::Network { .. } | Self::Decode { .. } => None,
        }
    }
}

/// Thin JSON client for the statistics API.
///
/// Every request is an unauthenticated GET without query parameters. There is
/// no retry and no timeout: a failure is reported once and left to the caller.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    #[tracing::instrument(skip(self), fields(endpoint = %endpoint))]
    pub async fn fetch_json<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, ApiError> {
        let url = self.url_for(endpoint);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ApiError::Network { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, %url, "API returned an error status");
            return Err(ApiError::Request { endpoint, status });
        }

        let body = response
            .json::<T>()
            .await
            .map_err(|source| ApiError::Decode { endpoint, source })?;

        debug!(%url, "API response decoded");
        Ok(body)
    }
}
