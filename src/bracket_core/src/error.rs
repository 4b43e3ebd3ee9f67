use thiserror::Error;

/// Request-validation failures. Missing ratings and unknown model names are not errors.
#[derive(Debug, Error)]
pub enum BracketError {
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] serde_json::Error),

    #[error("rating for team `{team}` is not numeric: {value}")]
    NonNumericRating { team: String, value: String },

    #[error("round1[{index}] is missing required field `region`")]
    MissingRegion { index: usize },

    #[error("region `{region}` has {games} first-round games, expected {expected}")]
    IncompleteRegion {
        region: String,
        games: usize,
        expected: usize,
    },
}

pub type Result<T> = std::result::Result<T, BracketError>;
