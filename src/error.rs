//! Classification of failed HTTP calls

use thiserror::Error;

/// Why a remote API call failed.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The server answered with a non-success status.
    #[error("{service} API error: {status} - {body}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    /// The request went out but nothing usable came back.
    #[error("No response received from {service} API: {source}")]
    NoResponse {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The request could not be built.
    #[error("Request setup failed: {0}")]
    Setup(String),

    #[error("Unexpected {service} API response: {source}")]
    Decode {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

impl RequestError {
    /// Sorts a transport error into one of the variants.
    pub fn from_transport(service: &'static str, err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::Setup(err.to_string())
        } else if err.is_decode() {
            Self::Decode {
                service,
                source: err,
            }
        } else {
            Self::NoResponse {
                service,
                source: err,
            }
        }
    }

    /// Turns a non-success response into [`RequestError::Status`].
    pub async fn check(
        service: &'static str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, Self> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(Self::Status {
            service,
            status,
            body,
        })
    }
}
