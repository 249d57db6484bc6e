use thiserror::Error;

/// The only failure text shown to users, whatever went wrong underneath.
pub const FETCH_FAILURE_MESSAGE: &str = "Failed to load resource data. Please try again.";

/// Why an inventory retrieval failed. Kept for diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("inventory service responded with status {status}")]
    Response { status: u16 },
    #[error("malformed inventory payload: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Response { .. } => "response",
            Self::Decode(_) => "decode",
        }
    }

    pub fn user_message(&self) -> &'static str {
        FETCH_FAILURE_MESSAGE
    }
}
