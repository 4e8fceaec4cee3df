//! Error types

mod api;

pub use api::*;

use crate::session::Operation;

/// Errors returned by the library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Fetching a page from the collection API failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Another fetching operation is still in flight.
    #[error("{0} already in progress")]
    Busy(Operation),

    /// The request cannot be satisfied as given (for example a zero page size).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl Error {
    /// Returns the HTTP status code if this error came from a non-2xx response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(api) => api.status_code(),
            _ => None,
        }
    }

    /// Returns `true` if the error was caused by an overlapping operation.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy(_))
    }
}
