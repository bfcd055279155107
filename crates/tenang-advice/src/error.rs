use std::time::Duration;

use thiserror::Error;

/// Failures of the external advice model. Every variant is fully
/// recoverable: the generator falls back to deterministic advice text and
/// none of these ever reaches the respondent as an error.
#[derive(Debug, Error)]
pub enum AdviceError {
    #[error("advice model invocation failed: {0}")]
    Invocation(String),

    #[error("advice model returned an empty response")]
    EmptyResponse,

    #[error("advice model timed out after {0:?}")]
    Timeout(Duration),
}
