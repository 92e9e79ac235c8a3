use thiserror::Error;

/// Why a submitted workout form was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{field} is not a finite number")]
    NotFinite { field: &'static str },
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },
    #[error("unknown workout type: {0:?}")]
    UnknownKind(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("geolocation is not available")]
    Unavailable,
    #[error("geolocation permission denied")]
    Denied,
    #[error("geolocation failed: {0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage encoding: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a form submission produced no workout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("no map location picked")]
    NoLocation,
    #[error(transparent)]
    Invalid(#[from] InputError),
}
