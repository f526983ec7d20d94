//! Admin service errors

use thiserror::Error;

/// Boxed underlying cause of a failed store call.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum AdminError {
    /// Caller lacks the admin role. Token failures never reach this layer.
    #[error("Admin role required. Your role: {role}")]
    Unauthorized { role: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{context}: {source}")]
    RetrievalFailed {
        context: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("{context}: {source}")]
    CreationFailed {
        context: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("{context}: {source}")]
    DeletionFailed {
        context: &'static str,
        #[source]
        source: BoxError,
    },
}

impl AdminError {
    pub(crate) fn retrieval(context: &'static str, source: impl Into<BoxError>) -> Self {
        Self::RetrievalFailed {
            context,
            source: source.into(),
        }
    }

    pub(crate) fn creation(context: &'static str, source: impl Into<BoxError>) -> Self {
        Self::CreationFailed {
            context,
            source: source.into(),
        }
    }

    pub(crate) fn deletion(context: &'static str, source: impl Into<BoxError>) -> Self {
        Self::DeletionFailed {
            context,
            source: source.into(),
        }
    }

    /// Operation context for store failures, `None` for the other kinds.
    pub fn context(&self) -> Option<&'static str> {
        match self {
            Self::RetrievalFailed { context, .. }
            | Self::CreationFailed { context, .. }
            | Self::DeletionFailed { context, .. } => Some(context),
            Self::Unauthorized { .. } | Self::InvalidInput(_) => None,
        }
    }
}

/// Result type for admin operations
pub type AdminResult<T> = Result<T, AdminError>;
