use thiserror::Error;

/// Errors surfaced by schedule resolution and the provider gateway.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The provider could not be reached (connect failure, timeout, broken body).
    #[error("Prayer time provider unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The provider answered with a non-success HTTP status or envelope code.
    #[error("Prayer time provider rejected the request (code {code}): {message}")]
    UpstreamRejected { code: u16, message: String },

    /// The response is missing the `timings`, `date` or `meta` structure.
    #[error("Malformed provider payload: {0}")]
    MalformedUpstreamPayload(String),

    /// A timing list that cannot be resolved (empty, or a time that isn't `HH:MM`).
    #[error("Malformed prayer timing: {0}")]
    MalformedTiming(String),

    /// Caller-supplied coordinates, method, date or year out of range.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid month {0}, expected 1-12")]
    InvalidMonth(u32),

    #[error("No day records available for {month:02}/{year}")]
    EmptyMonth { month: u32, year: i32 },
}

impl ScheduleError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }

    pub fn malformed_payload(reason: impl Into<String>) -> Self {
        Self::MalformedUpstreamPayload(reason.into())
    }

    /// True when the caller is at fault and retrying the same request is pointless.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::InvalidMonth(_))
    }

    /// The provider's status/code, when the failure carries one.
    pub fn upstream_code(&self) -> Option<u16> {
        match self {
            Self::UpstreamRejected { code, .. } => Some(*code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
