use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server could not be reached at all: DNS, connect, or timeout.
    #[error("catalog API unreachable at {url}: {reason}")]
    Unreachable { url: String, reason: String },

    #[error("unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid request URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to read fixture {path}: {source}")]
    Fixture {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// How the catalog controller should react to a [`FetchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// No HTTP status was received.
    Network,
    /// Status 500 or above.
    Server { status: u16 },
    /// Status 400 to 499. Shown to the user; never masked by sample data.
    Client { status: u16 },
    /// A response arrived but its body is unusable.
    Validation,
}

impl ErrorClass {
    /// Network, server and validation failures are masked by the sample
    /// catalog; client errors are not.
    #[must_use]
    pub fn triggers_fallback(self) -> bool {
        !matches!(self, ErrorClass::Client { .. })
    }
}

impl FetchError {
    /// The HTTP status carried by the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Http(e) => e.status().map(|s| s.as_u16()),
            FetchError::Unreachable { .. }
            | FetchError::Deserialize { .. }
            | FetchError::InvalidUrl { .. }
            | FetchError::Fixture { .. } => None,
        }
    }

    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            FetchError::Deserialize { .. } => ErrorClass::Validation,
            _ => match self.status() {
                Some(status @ 400..=499) => ErrorClass::Client { status },
                Some(status) if status >= 500 => ErrorClass::Server { status },
                // 1xx/3xx never reach here as errors in practice; treat them
                // like a failed round trip.
                Some(_) | None => ErrorClass::Network,
            },
        }
    }
}
