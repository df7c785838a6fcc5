use thiserror::Error;

/// Failures raised while scoring a piece of text.
#[derive(Debug, Error, PartialEq)]
pub enum ScoreError {
    /// The submitted text was empty or whitespace only.
    #[error("Please enter text for analysis.")]
    EmptyInput,

    /// The underlying scorer could not produce a result.
    #[error("sentiment scoring failed: {0}")]
    Failed(String),
}

impl ScoreError {
    /// Empty input is recoverable as a warning; everything else aborts the interaction.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ScoreError::EmptyInput)
    }
}
