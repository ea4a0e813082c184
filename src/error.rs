/// Error type for accessory-metrics operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The accessory detached or became invalid while it was being queried.
    #[error("accessory detached or unavailable")]
    AccessoryGone,

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("feature not available: {0}")]
    NotAvailable(String),

    #[error("system error: {0}")]
    System(String),
}

impl Error {
    pub(crate) fn invalid_data<S: Into<String>>(msg: S) -> Self {
        Error::InvalidData(msg.into())
    }

    pub(crate) fn not_available<S: Into<String>>(msg: S) -> Self {
        Error::NotAvailable(msg.into())
    }

    #[allow(dead_code)]
    pub(crate) fn system<S: Into<String>>(msg: S) -> Self {
        Error::System(msg.into())
    }
}

/// Result type for accessory-metrics operations
pub type Result<T> = std::result::Result<T, Error>;
