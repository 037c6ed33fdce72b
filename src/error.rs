//! Error taxonomy for the PPE pipeline.

/// Pipeline errors.
///
/// `Configuration` and `Invariant` are local, non-retryable conditions.
/// The remaining variants carry failures reported by the collaborators.
#[derive(Debug, thiserror::Error)]
pub enum PpeError {
    #[error("configuration error: {reason}")]
    Configuration { reason: String },

    #[error("vision service error: {reason}")]
    Service { reason: String },

    #[error("object {key} not found in bucket {bucket}")]
    NotFound { bucket: String, key: String },

    #[error("access to object {key} in bucket {bucket} denied: {reason}")]
    Access {
        bucket: String,
        key: String,
        reason: String,
    },

    #[error("notification delivery failed: {reason}")]
    Delivery { reason: String },

    #[error("detection result invariant violated: {details}")]
    Invariant { details: String },
}

impl PpeError {
    pub(crate) fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    pub(crate) fn service(reason: impl Into<String>) -> Self {
        Self::Service {
            reason: reason.into(),
        }
    }

    pub(crate) fn delivery(reason: impl Into<String>) -> Self {
        Self::Delivery {
            reason: reason.into(),
        }
    }

    pub(crate) fn invariant(details: impl Into<String>) -> Self {
        Self::Invariant {
            details: details.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PpeError>;
