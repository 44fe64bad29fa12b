//! Error types shared by the core contracts and the reconcilers.

use crate::vocabulary::EndpointRole;
use thiserror::Error;

/// Result type for reconciliation operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur while building vocabularies or running a pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// A required vocabulary lookup failed.
    ///
    /// Fatal to the current status or property pass: it signals a
    /// misconfigured vocabulary, not a transient condition.
    #[error("no {role} mapping registered for status {status:?}")]
    MappingNotFound {
        /// Role whose table was consulted.
        role: EndpointRole,
        /// The status code that could not be translated.
        status: String,
    },

    /// A status code was registered twice in the same direction.
    ///
    /// Vocabularies are built once before any reconciler runs; a duplicate
    /// registration is a construction defect and must not silently
    /// overwrite the earlier entry.
    #[error("{role} status {status:?} is already mapped")]
    DuplicateMapping {
        /// Role whose table rejected the insert.
        role: EndpointRole,
        /// The status code that was already present.
        status: String,
    },

    /// An endpoint operation failed.
    ///
    /// Raised by `SyncEndpoint` implementations for transport or
    /// persistence failures. The remainder of the current pass is
    /// abandoned; writes already issued may have taken effect.
    #[error("endpoint error: {message}")]
    Endpoint {
        /// Description from the failing endpoint.
        message: String,
    },
}

impl SyncError {
    /// Creates an endpoint error from any displayable message.
    pub fn endpoint(message: impl Into<String>) -> Self {
        Self::Endpoint {
            message: message.into(),
        }
    }

    /// Returns true if this error indicates a misconfigured vocabulary.
    pub fn is_configuration_defect(&self) -> bool {
        matches!(
            self,
            SyncError::MappingNotFound { .. } | SyncError::DuplicateMapping { .. }
        )
    }
}
