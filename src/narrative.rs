//! Local market narrative.
//!
//! The narrative is produced by an external collaborator from the property's
//! city, state and address. A failed fetch never aborts report generation;
//! it is replaced by one of two fixed messages.

use serde::{Deserialize, Serialize};

use crate::error::{Error, NarrativeFailure, Result};

/// Shown when the collaborator answers with a non-success status.
pub const STATUS_FALLBACK: &str = "Market report could not be generated. Please try again.";

/// Shown when the collaborator cannot be reached or is not configured.
pub const TRANSPORT_FALLBACK: &str =
    "Market report generation failed. Please check your API configuration.";

/// Request body sent to the collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeRequest {
    pub city: String,
    pub state: String,
    pub address: String,
}

impl NarrativeRequest {
    pub fn new(
        city: impl Into<String>,
        state: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            city: city.into(),
            state: state.into(),
            address: address.into(),
        }
    }
}

/// Response body returned by the collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeResponse {
    pub report: String,
}

/// Produces market narrative text.
pub trait NarrativeSource: Send + Sync {
    /// Fetch the narrative. Failures are reported as [`Error::NarrativeFetch`].
    fn fetch(&self, request: &NarrativeRequest) -> Result<String>;
}

/// Fixed text for a failure.
pub fn fallback_for(failure: &NarrativeFailure) -> &'static str {
    match failure {
        NarrativeFailure::Status(_) => STATUS_FALLBACK,
        NarrativeFailure::Transport(_) => TRANSPORT_FALLBACK,
    }
}

/// Fetch the narrative, substituting the matching fallback on failure.
pub fn resolve_narrative(source: &dyn NarrativeSource, request: &NarrativeRequest) -> String {
    match source.fetch(request) {
        Ok(report) => report,
        Err(Error::NarrativeFetch(failure)) => {
            log::warn!("Market narrative unavailable ({}), using fallback", failure);
            fallback_for(&failure).to_string()
        }
        Err(e) => {
            log::warn!("Market narrative unavailable ({}), using fallback", e);
            TRANSPORT_FALLBACK.to_string()
        }
    }
}

/// Always returns the same text.
#[derive(Debug, Clone, Default)]
pub struct StaticNarrative {
    report: String,
}

impl StaticNarrative {
    pub fn new(report: impl Into<String>) -> Self {
        Self {
            report: report.into(),
        }
    }
}

impl NarrativeSource for StaticNarrative {
    fn fetch(&self, _request: &NarrativeRequest) -> Result<String> {
        Ok(self.report.clone())
    }
}

/// No collaborator configured; every fetch is a transport failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableNarrative;

impl NarrativeSource for UnavailableNarrative {
    fn fetch(&self, _request: &NarrativeRequest) -> Result<String> {
        Err(Error::NarrativeFetch(NarrativeFailure::Transport(
            "no narrative endpoint configured".to_string(),
        )))
    }
}

#[cfg(feature = "http")]
pub use http::{HttpNarrativeSource, DEFAULT_TIMEOUT};

#[cfg(feature = "http")]
mod http {
    use std::time::Duration;

    use reqwest::blocking::Client;

    use super::{NarrativeRequest, NarrativeResponse, NarrativeSource};
    use crate::error::{Error, NarrativeFailure, Result};

    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// POSTs the request as JSON and reads `{report}` back.
    #[derive(Debug, Clone)]
    pub struct HttpNarrativeSource {
        client: Client,
        endpoint: String,
    }

    impl HttpNarrativeSource {
        /// Create a source with the default timeout.
        pub fn new(endpoint: impl Into<String>) -> Result<Self> {
            Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
        }

        /// Create a source with a request timeout.
        pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
            let client = Client::builder()
                .user_agent(concat!("leasedeck/", env!("CARGO_PKG_VERSION")))
                .timeout(timeout)
                .build()
                .map_err(|e| Error::DependencyLoad(format!("HTTP client: {}", e)))?;
            Ok(Self {
                client,
                endpoint: endpoint.into(),
            })
        }

        /// Collaborator URL.
        pub fn endpoint(&self) -> &str {
            &self.endpoint
        }
    }

    fn transport(err: reqwest::Error) -> Error {
        Error::NarrativeFetch(NarrativeFailure::Transport(err.to_string()))
    }

    impl NarrativeSource for HttpNarrativeSource {
        fn fetch(&self, request: &NarrativeRequest) -> Result<String> {
            log::debug!(
                "Requesting market narrative for {}, {} from {}",
                request.city,
                request.state,
                self.endpoint
            );
            let response = self
                .client
                .post(&self.endpoint)
                .json(request)
                .send()
                .map_err(transport)?;

            let status = response.status();
            if !status.is_success() {
                return Err(Error::NarrativeFetch(NarrativeFailure::Status(
                    status.as_u16(),
                )));
            }

            let body: NarrativeResponse = response.json().map_err(transport)?;
            Ok(body.report)
        }
    }
}
