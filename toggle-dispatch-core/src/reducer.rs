//! Toggle state and its default transition table

use serde::{Deserialize, Serialize};

use crate::action::ToggleAction;
use crate::error::ToggleError;

/// A pure reducer: computes the next state from the current one.
///
/// Reducers never mutate their input. Returning an error aborts the
/// transition and leaves the store untouched.
pub type Reducer<S, A> = fn(&S, &A) -> Result<S, ToggleError>;

/// The state of a toggle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToggleState {
    /// Whether the toggle is on
    pub on: bool,
}

impl ToggleState {
    /// Create a state with the given `on` value
    pub const fn new(on: bool) -> Self {
        Self { on }
    }

    /// The state with `on` flipped
    pub const fn flipped(self) -> Self {
        Self { on: !self.on }
    }
}

impl From<bool> for ToggleState {
    fn from(on: bool) -> Self {
        Self::new(on)
    }
}

/// Default transition table for [`ToggleAction`]
///
/// - `Toggle` flips `on`
/// - `Reset` returns the carried initial state
/// - anything else is rejected with [`ToggleError::UnsupportedAction`]
///
/// Custom reducers usually handle their extra kinds and delegate the rest here:
///
/// ```
/// use toggle_dispatch_core::{toggle_reducer, ToggleAction, ToggleError, ToggleState};
///
/// fn with_force_on(
///     state: &ToggleState,
///     action: &ToggleAction,
/// ) -> Result<ToggleState, ToggleError> {
///     match action {
///         ToggleAction::Custom(kind) if kind == "force_on" => Ok(ToggleState::new(true)),
///         _ => toggle_reducer(state, action),
///     }
/// }
///
/// let next = with_force_on(&ToggleState::default(), &ToggleAction::custom("force_on"));
/// assert_eq!(next, Ok(ToggleState::new(true)));
/// ```
pub fn toggle_reducer(
    state: &ToggleState,
    action: &ToggleAction,
) -> Result<ToggleState, ToggleError> {
    match action {
        ToggleAction::Toggle => Ok(state.flipped()),
        ToggleAction::Reset { initial } => Ok(*initial),
        ToggleAction::Custom(kind) => Err(ToggleError::unsupported(kind.as_str())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips() {
        let off = ToggleState::default();
        let on = toggle_reducer(&off, &ToggleAction::Toggle).unwrap();
        assert!(on.on);
        assert_eq!(toggle_reducer(&on, &ToggleAction::Toggle), Ok(off));
    }

    #[test]
    fn test_reset_returns_carried_initial() {
        let current = ToggleState::new(false);
        let initial = ToggleState::new(true);
        let next = toggle_reducer(&current, &ToggleAction::Reset { initial }).unwrap();
        assert_eq!(next, initial);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let state = ToggleState::new(true);
        let err = toggle_reducer(&state, &ToggleAction::custom("bogus")).unwrap_err();
        assert_eq!(err, ToggleError::unsupported("bogus"));
    }

    #[test]
    fn test_state_serde() {
        let json = serde_json::to_string(&ToggleState::new(true)).unwrap();
        assert_eq!(json, r#"{"on":true}"#);

        let state: ToggleState = serde_json::from_str(r#"{"on":false}"#).unwrap();
        assert_eq!(state, ToggleState::new(false));
    }
}
