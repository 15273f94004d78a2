use thiserror::Error;

/// Error taxonomy for the aggregation pipeline.
///
/// `Validation` covers input the pipeline refuses to interpret: malformed
/// dates, unrecognized severity or status values, undecodable records.
/// A single bad record fails the whole load; silently dropping it would
/// skew every downstream statistic.
///
/// `SourceUnavailable` covers failures of the record source itself.
/// These are surfaced to the caller as-is; retry policy belongs to the
/// source, not to the pipeline.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("validation error: {message}")]
    Validation { message: String },

    #[error("source unavailable: {message}")]
    SourceUnavailable { message: String },
}

impl AuditError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn source_unavailable(message: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            message: message.into(),
        }
    }

    /// Validation problems are fixable by correcting the input data.
    pub fn is_user_fixable(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Source failures are transient from the pipeline's point of view;
    /// a later fetch may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::SourceUnavailable { .. })
    }
}
