//! Client error types.

use thiserror::Error;
use wcps_common::WcpsError;

pub type ClientResult<T> = Result<T, ClientError>;

/// Errors raised while building clients or decoding results.
///
/// Transport faults are not errors; see
/// [`TransportFailure`](crate::transport::TransportFailure).
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Query(#[from] WcpsError),

    #[error("Failed to decode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Failed to parse exception report: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Cell ({row}, {col}) is not numeric: '{value}'")]
    NotNumeric {
        row: usize,
        col: usize,
        value: String,
    },
}

impl ClientError {
    pub(crate) fn invalid_state(msg: impl Into<String>) -> Self {
        ClientError::Query(WcpsError::InvalidState(msg.into()))
    }

    /// True for decoding attempted on a failed or empty result.
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, ClientError::Query(WcpsError::InvalidState(_)))
    }
}
