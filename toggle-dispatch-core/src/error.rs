//! Errors raised by reducers and context consumers

use thiserror::Error;

/// Errors surfaced by toggle transitions and compound consumers.
///
/// Both variants indicate a programming defect in the caller (an action kind
/// no reducer handles, or a consumer used outside its provider). They are
/// returned immediately and never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToggleError {
    /// The reducer received an action kind outside its transition table.
    #[error("unsupported action kind: {kind:?}")]
    UnsupportedAction {
        /// Kind string of the rejected action
        kind: String,
    },

    /// A compound consumer was used with no toggle provided in scope.
    #[error("{consumer} must be used within a toggle provider (wrap it in `context::provide`)")]
    MissingContext {
        /// Name of the consumer that looked up the context
        consumer: &'static str,
    },
}

impl ToggleError {
    /// Shorthand for [`ToggleError::UnsupportedAction`].
    pub fn unsupported(kind: impl Into<String>) -> Self {
        Self::UnsupportedAction { kind: kind.into() }
    }
}
