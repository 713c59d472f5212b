use thiserror::Error;

/// Failure categories of a single resolution attempt.
///
/// Callers that only care about "try another input" versus "try again later"
/// can match on [`Error::kind`] instead of the full error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidLocation,
    LocationNotFound,
    Upstream,
    NoObservationAvailable,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidLocation => "invalid-location",
            ErrorKind::LocationNotFound => "location-not-found",
            ErrorKind::Upstream => "upstream",
            ErrorKind::NoObservationAvailable => "no-observation-available",
        }
    }

    /// True for errors caused by the input rather than the providers.
    pub fn is_bad_input(&self) -> bool {
        matches!(self, ErrorKind::InvalidLocation | ErrorKind::LocationNotFound)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// Malformed postal code, or one the directory does not know.
    #[error("invalid location: {0}")]
    InvalidLocation(String),

    /// City name without any directory record.
    #[error("location not found: {0}")]
    LocationNotFound(String),

    /// Transport failure, timeout, bad status or undecodable body from either provider.
    #[error("upstream provider failed")]
    Upstream(#[source] anyhow::Error),

    /// Every candidate code answered with the "no data" sentinel.
    #[error("no current observation available for {location} (tried: {})", .tried.join(", "))]
    NoObservationAvailable { location: String, tried: Vec<String> },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidLocation(_) => ErrorKind::InvalidLocation,
            Error::LocationNotFound(_) => ErrorKind::LocationNotFound,
            Error::Upstream(_) => ErrorKind::Upstream,
            Error::NoObservationAvailable { .. } => ErrorKind::NoObservationAvailable,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
