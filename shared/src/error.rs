use thiserror::Error;

/// Failure at the network boundary. Never retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("request timed out")]
    Timeout,
    #[error("backend unreachable: {0}")]
    NetworkUnreachable(String),
    #[error("backend responded with HTTP {0}")]
    ServerError(u16),
}

/// A response that does not have the shape of the expected records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("record is missing `{0}`")]
    MissingField(&'static str),
    #[error("record has a negative star count ({0})")]
    NegativeStars(i64),
    #[error("response body could not be decoded: {0}")]
    Undecodable(String),
}

/// Error returned by every [`crate::WarResultsGateway`] operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("malformed record: {0}")]
    Malformed(#[from] RecordError),
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Gateway(GatewayError::Timeout))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("clan store failure: {0}")]
pub struct StoreError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClanIdError {
    /// Nothing is left once `#` characters and surrounding whitespace are stripped.
    #[error("clan identifier is empty")]
    InvalidIdentifier,
    #[error(transparent)]
    Store(#[from] StoreError),
}
