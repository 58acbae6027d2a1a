use thiserror::Error;

/// Rejected custom time range input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("Please enter both minimum and maximum time values.")]
    MissingValue,
    #[error("Please enter valid numbers for time range.")]
    NotANumber,
    #[error("Time values must be greater than 0.")]
    NonPositive,
    #[error("Minimum time must be less than maximum time.")]
    RangeInverted,
}

/// Failure loading a prompt file.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("invalid JSON prompt file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML prompt file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("prompt category '{0}' has no entries")]
    EmptyPool(&'static str),
}
