use crate::types::DisplayId;

/// Failures reported by the virtual display registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DisplayError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("No capacity for another virtual display (limit {limit})")]
    ResourceExhausted { limit: u32 },

    #[error("Every display ID has been issued")]
    IdsExhausted,

    #[error("Host registration failed: {0}")]
    HostRegistrationFailed(String),

    #[error("Invalid display handle: {0}")]
    InvalidHandle(DisplayId),

    #[error("Host deregistration of display {id} failed: {reason}")]
    HostDeregistrationFailed { id: DisplayId, reason: String },
}

pub type DisplayResult<T> = Result<T, DisplayError>;

/// Failures reported by a host display subsystem.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("Host display capacity reached ({limit})")]
    CapacityReached { limit: u32 },

    #[error("{0}")]
    Failed(String),
}

impl From<HostError> for DisplayError {
    fn from(err: HostError) -> Self {
        match err {
            HostError::CapacityReached { limit } => DisplayError::ResourceExhausted { limit },
            HostError::Failed(reason) => DisplayError::HostRegistrationFailed(reason),
        }
    }
}
