use thiserror::Error;

/// Startup configuration failure. The only error that stops the process.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variables: {0}")]
    Missing(String),

    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Failure to obtain a decoded response from the review API.
///
/// The HTTP status is kept as data only, so different 5xx codes produce the
/// same message and deduplicate to a single notification.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EndpointError {
    #[error("Endpoint is unavailable")]
    Unavailable,

    #[error("API unavailable: status code is not 200")]
    BadStatus { status: u16 },

    #[error("JSON conversion error")]
    JsonConversion,

    #[error("API error: {0}")]
    Api(String),
}

/// Malformed API response structure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("API is not a dictionary")]
    NotADictionary,

    #[error("There is no key homeworks")]
    MissingHomeworks,

    #[error("API is not a list")]
    NotAList,
}

/// A work item carries a status outside the verdict catalog.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown homework status: {status:?}")]
pub struct UnknownStatusError {
    pub status: String,
}

/// A message could not be delivered to the chat.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("Error sending message: {0}")]
    Transport(String),

    #[error("Error sending message: status {status}: {description}")]
    Rejected { status: u16, description: String },
}

/// Any recoverable failure inside one poll cycle.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CycleError {
    #[error(transparent)]
    Endpoint(#[from] EndpointError),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    UnknownStatus(#[from] UnknownStatusError),
}
