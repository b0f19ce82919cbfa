//! Action trait and the toggle action taxonomy

use std::convert::Infallible;
use std::fmt::Debug;
use std::str::FromStr;

use crate::reducer::ToggleState;

/// Marker trait for actions that can be dispatched to a store
///
/// Actions represent intents to change state. They should be:
/// - Clone: Actions may be logged, replayed, or reported to callbacks
/// - Debug: For debugging and logging
/// - Send + 'static: Handles may be shared across threads
///
/// Use `#[derive(Action)]` from `toggle-dispatch-macros` to auto-implement this trait.
pub trait Action: Clone + Debug + Send + 'static {
    /// Get the action name for logging and filtering
    fn name(&self) -> &'static str;

    /// Get the action kind, the string a reducer's transition table matches on
    ///
    /// Defaults to [`Action::name`].
    fn kind(&self) -> &str {
        self.name()
    }
}

/// Kind strings of the built-in toggle transitions
pub mod kinds {
    /// Flip `on`
    pub const TOGGLE: &str = "toggle";
    /// Restore the initial state
    pub const RESET: &str = "reset";
}

/// Actions understood by the toggle controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleAction {
    /// Flip the `on` value
    Toggle,
    /// Restore the state captured when the controller was created
    Reset {
        /// State to restore
        initial: ToggleState,
    },
    /// Any other kind; only a custom reducer can handle it
    Custom(String),
}

impl ToggleAction {
    /// Build a custom action of the given kind
    ///
    /// Meant for kinds outside [`kinds`]: the value is always
    /// [`ToggleAction::Custom`], so `custom("toggle")` reaches the reducer as
    /// an unknown kind. Use [`from_kind`](Self::from_kind) (or
    /// `ToggleHandle::dispatch_kind`) to parse a string that may name a
    /// built-in transition.
    pub fn custom(kind: impl Into<String>) -> Self {
        Self::Custom(kind.into())
    }

    /// Parse a kind string, attaching `initial` to a reset.
    ///
    /// Unknown kinds are kept as [`ToggleAction::Custom`] so the reducer
    /// decides whether to reject them.
    pub fn from_kind(kind: &str, initial: ToggleState) -> Self {
        match kind {
            kinds::TOGGLE => Self::Toggle,
            kinds::RESET => Self::Reset { initial },
            other => Self::Custom(other.to_string()),
        }
    }
}

impl FromStr for ToggleAction {
    type Err = Infallible;

    /// Parses with a default (off) initial state for `reset`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_kind(s, ToggleState::default()))
    }
}

impl Action for ToggleAction {
    fn name(&self) -> &'static str {
        match self {
            ToggleAction::Toggle => "Toggle",
            ToggleAction::Reset { .. } => "Reset",
            ToggleAction::Custom(_) => "Custom",
        }
    }

    fn kind(&self) -> &str {
        match self {
            ToggleAction::Toggle => kinds::TOGGLE,
            ToggleAction::Reset { .. } => kinds::RESET,
            ToggleAction::Custom(kind) => kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_kinds() {
        assert_eq!("toggle".parse::<ToggleAction>(), Ok(ToggleAction::Toggle));

        let initial = ToggleState::new(true);
        assert_eq!(
            ToggleAction::from_kind("reset", initial),
            ToggleAction::Reset { initial }
        );
    }

    #[test]
    fn test_parse_unknown_kind() {
        let action: ToggleAction = "bogus".parse().unwrap();
        assert_eq!(action, ToggleAction::custom("bogus"));
        assert_eq!(action.kind(), "bogus");
        assert_eq!(action.name(), "Custom");
    }

    #[test]
    fn test_custom_never_maps_to_builtin() {
        assert_eq!(
            ToggleAction::custom(kinds::TOGGLE),
            ToggleAction::Custom("toggle".into())
        );
        assert_eq!(
            ToggleAction::from_kind(kinds::TOGGLE, ToggleState::default()),
            ToggleAction::Toggle
        );
    }

    #[test]
    fn test_kind_and_name() {
        assert_eq!(ToggleAction::Toggle.kind(), kinds::TOGGLE);
        assert_eq!(ToggleAction::Toggle.name(), "Toggle");

        let reset = ToggleAction::Reset {
            initial: ToggleState::default(),
        };
        assert_eq!(reset.kind(), kinds::RESET);
        assert_eq!(reset.name(), "Reset");
    }
}
