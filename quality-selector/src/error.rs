use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("quality change rate limit exceeded")]
    RateLimited,

    #[error("unknown quality tier: {0}")]
    InvalidTier(String),

    #[error("a quality change is already in flight")]
    ChangeInFlight,
}
