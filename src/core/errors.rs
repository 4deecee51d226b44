use crate::core::address::Ipv4Address;
use std::fmt;

/*-------------------------------------------------------------------------------------------------
  Errors and Results
-------------------------------------------------------------------------------------------------*/

/// Error type used throughout the crate. Each variant is a distinct, caller-visible outcome; none
/// of them are retryable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The input is neither a valid IPv4 address nor a well-formed hostname.
    #[error("Invalid IPv4 address or hostname: {0:?}")]
    InvalidFormat(String),

    /// Name resolution returned an error or no IPv4 addresses.
    #[error("DNS resolution failed for {hostname}: {reason}")]
    DnsFailure { hostname: String, reason: String },

    /// The address belongs to a private or otherwise reserved range.
    #[error("IPv4 address {0} is a reserved (private, loopback, link-local or CGNAT) address")]
    ReservedAddressRejected(Ipv4Address),

    /// A valid public address that no provider dataset contains.
    #[error("No cloud provider subnet contains {0}")]
    NoMatchFound(String),

    /// The provider name is not one of the fixed, known providers.
    #[error("Cloud provider {0:?} not found")]
    UnknownProvider(String),

    /// The provider's dataset could not be read or parsed.
    #[error("Error reading subnet details for {provider}: {reason}")]
    DatasetUnavailable { provider: String, reason: String },
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/*--------------------------------------------------------------------------------------
  Outcome Kind
--------------------------------------------------------------------------------------*/

/// Outcome of a lookup or listing operation, used by callers (the CLI, or an HTTP layer) to map
/// results to exit codes or status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    Success,
    InvalidFormat,
    ReservedAddressRejected,
    DnsFailure,
    NoMatchFound,
    UnknownProvider,
    DatasetUnavailable,
}

impl Error {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Error::InvalidFormat(_) => OutcomeKind::InvalidFormat,
            Error::DnsFailure { .. } => OutcomeKind::DnsFailure,
            Error::ReservedAddressRejected(_) => OutcomeKind::ReservedAddressRejected,
            Error::NoMatchFound(_) => OutcomeKind::NoMatchFound,
            Error::UnknownProvider(_) => OutcomeKind::UnknownProvider,
            Error::DatasetUnavailable { .. } => OutcomeKind::DatasetUnavailable,
        }
    }

    pub(crate) fn dataset_unavailable(provider: impl fmt::Display, reason: impl fmt::Display) -> Self {
        Error::DatasetUnavailable {
            provider: provider.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl<T> From<&Result<T>> for OutcomeKind {
    fn from(value: &Result<T>) -> Self {
        match value {
            Ok(_) => OutcomeKind::Success,
            Err(error) => error.kind(),
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutcomeKind::Success => "success",
            OutcomeKind::InvalidFormat => "invalid format",
            OutcomeKind::ReservedAddressRejected => "reserved address rejected",
            OutcomeKind::DnsFailure => "DNS failure",
            OutcomeKind::NoMatchFound => "no match found",
            OutcomeKind::UnknownProvider => "unknown provider",
            OutcomeKind::DatasetUnavailable => "dataset unavailable",
        };
        f.write_str(name)
    }
}

/*--------------------------------------------------------------------------------------
  Log Error Function
--------------------------------------------------------------------------------------*/

#[cfg(test)]
pub(crate) fn log_error(error: &Error) {
    log::error!("{}", error);
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
