//! Toggle state controller
//!
//! A [`ToggleHandle`] owns one toggle: its store, the initial state captured
//! at creation, and the callbacks that report transitions. Handles are cheap
//! to clone and every clone drives the same instance.
//!
//! # Uncontrolled
//!
//! ```
//! use toggle_dispatch_core::{create, ToggleConfig};
//!
//! let toggle = create(ToggleConfig::new().with_initial_on(false));
//! toggle.toggle().unwrap();
//! assert!(toggle.on());
//! toggle.reset().unwrap();
//! assert!(!toggle.on());
//! ```
//!
//! # Controlled
//!
//! The caller owns the value. Transitions are proposed through the change
//! callback, and only take effect once the caller feeds them back in.
//!
//! ```
//! use toggle_dispatch_core::{create, ToggleConfig};
//!
//! let toggle = create(ToggleConfig::new().with_on(false));
//! let proposed = toggle.toggle().unwrap();
//! assert!(proposed.on);
//! assert!(!toggle.on());
//!
//! toggle.set_controlled(Some(proposed.on));
//! assert!(toggle.on());
//! ```

use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, ReentrantMutex};
use serde::{Deserialize, Serialize};

use crate::action::{Action, ToggleAction};
use crate::error::ToggleError;
use crate::props::{self, Handler, Props};
use crate::reducer::{toggle_reducer, Reducer, ToggleState};
use crate::store::{
    ComposedMiddleware, ControlledStore, ControlledStoreWithMiddleware, Middleware,
};

/// Callback receiving the (proposed) next state and the action that produced it
pub type Callback = Arc<dyn Fn(&ToggleState, &ToggleAction) + Send + Sync>;

/// Plain-data options, re-supplied by the caller whenever its inputs change
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToggleOptions {
    /// Initial `on` value. Only the value seen at creation is used by reset.
    pub initial_on: bool,
    /// Controlling value. Present means controlled mode.
    pub on: Option<bool>,
}

/// Configuration for a toggle controller
pub struct ToggleConfig {
    options: ToggleOptions,
    on_change: Option<Callback>,
    on_reset: Option<Callback>,
    reducer: Reducer<ToggleState, ToggleAction>,
    middleware: ComposedMiddleware<ToggleAction>,
}

impl Default for ToggleConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ToggleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToggleConfig")
            .field("options", &self.options)
            .field("on_change", &self.on_change.is_some())
            .field("on_reset", &self.on_reset.is_some())
            .field("middleware", &self.middleware)
            .finish()
    }
}

impl ToggleConfig {
    /// Uncontrolled, initially off, default reducer, no callbacks
    pub fn new() -> Self {
        Self {
            options: ToggleOptions::default(),
            on_change: None,
            on_reset: None,
            reducer: toggle_reducer,
            middleware: ComposedMiddleware::new(),
        }
    }

    /// Start from plain-data options
    pub fn from_options(options: ToggleOptions) -> Self {
        Self {
            options,
            ..Self::new()
        }
    }

    /// Set the initial `on` value
    pub fn with_initial_on(mut self, initial_on: bool) -> Self {
        self.options.initial_on = initial_on;
        self
    }

    /// Supply a controlling value, switching to controlled mode
    pub fn with_on(mut self, on: bool) -> Self {
        self.options.on = Some(on);
        self
    }

    /// Callback for toggles and custom transitions
    pub fn with_on_change<F>(mut self, f: F) -> Self
    where
        F: Fn(&ToggleState, &ToggleAction) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(f));
        self
    }

    /// Callback for resets
    pub fn with_on_reset<F>(mut self, f: F) -> Self
    where
        F: Fn(&ToggleState, &ToggleAction) + Send + Sync + 'static,
    {
        self.on_reset = Some(Arc::new(f));
        self
    }

    /// Replace the default transition table
    pub fn with_reducer(mut self, reducer: Reducer<ToggleState, ToggleAction>) -> Self {
        self.reducer = reducer;
        self
    }

    /// Observe every dispatch through a middleware
    ///
    /// Hooks run while the instance state is locked. A middleware must not
    /// call back into the handle it observes; the state it needs arrives
    /// through the hook arguments.
    pub fn with_middleware<M>(mut self, middleware: M) -> Self
    where
        M: Middleware<ToggleAction> + Send + 'static,
    {
        self.middleware.add(middleware);
        self
    }

    /// The plain-data options
    pub fn options(&self) -> ToggleOptions {
        self.options
    }
}

type ToggleStore =
    ControlledStoreWithMiddleware<ToggleState, ToggleAction, ComposedMiddleware<ToggleAction>>;

struct Inner {
    store: ToggleStore,
    initial: ToggleState,
    options: ToggleOptions,
    on_change: Option<Callback>,
    on_reset: Option<Callback>,
}

/// Handle to a toggle controller
#[derive(Clone)]
pub struct ToggleHandle {
    inner: Arc<Mutex<Inner>>,
    /// Held across reducer + callback so transitions report in order.
    /// Reentrant: a callback may dispatch on the same handle.
    turn: Arc<ReentrantMutex<()>>,
}

/// Create a toggle controller
pub fn create(config: ToggleConfig) -> ToggleHandle {
    ToggleHandle::new(config)
}

impl ToggleHandle {
    /// Create a toggle controller
    pub fn new(config: ToggleConfig) -> Self {
        let ToggleConfig {
            options,
            on_change,
            on_reset,
            reducer,
            middleware,
        } = config;

        let initial = ToggleState::new(options.initial_on);
        let mut store = ControlledStore::new(initial, reducer);
        store.set_controlled(options.on.map(ToggleState::new));

        tracing::debug!(
            initial_on = options.initial_on,
            controlled = options.on.is_some(),
            "Toggle controller created"
        );

        Self {
            inner: Arc::new(Mutex::new(Inner {
                store: ControlledStoreWithMiddleware::new(store, middleware),
                initial,
                options,
                on_change,
                on_reset,
            })),
            turn: Arc::new(ReentrantMutex::new(())),
        }
    }

    /// The externally visible `on` value
    pub fn on(&self) -> bool {
        self.state().on
    }

    /// The externally visible state
    pub fn state(&self) -> ToggleState {
        *self.inner.lock().store.state()
    }

    /// The state restored by [`reset`](Self::reset), captured at creation
    pub fn initial_state(&self) -> ToggleState {
        self.inner.lock().initial
    }

    /// Whether a controlling value is present
    pub fn is_controlled(&self) -> bool {
        self.inner.lock().store.store().is_controlled()
    }

    /// The options most recently supplied
    pub fn options(&self) -> ToggleOptions {
        self.inner.lock().options
    }

    /// Flip `on`
    ///
    /// Returns the next state. In controlled mode that state is only a
    /// proposal: it is reported to the change callback but not applied.
    pub fn toggle(&self) -> Result<ToggleState, ToggleError> {
        self.dispatch(ToggleAction::Toggle)
    }

    /// Restore the state captured at creation, reporting it to the reset callback
    pub fn reset(&self) -> Result<ToggleState, ToggleError> {
        let initial = self.initial_state();
        self.dispatch(ToggleAction::Reset { initial })
    }

    /// Run an action through the reducer.
    ///
    /// The reducer's input is the visible state at the moment of dispatch.
    /// A rejected action mutates nothing and fires no callback.
    ///
    /// Dispatches on one instance are serialized: the next one starts only
    /// after the previous reducer and callback have both finished, so the
    /// last reported state is the current one.
    pub fn dispatch(&self, action: ToggleAction) -> Result<ToggleState, ToggleError> {
        let _turn = self.turn.lock();

        let (transition, callback) = {
            let mut inner = self.inner.lock();
            let transition = match inner.store.dispatch(action.clone()) {
                Ok(transition) => transition,
                Err(error) => {
                    tracing::warn!(kind = %action.kind(), %error, "Toggle action rejected");
                    return Err(error);
                }
            };
            let callback = match action {
                ToggleAction::Reset { .. } => inner.on_reset.clone(),
                _ => inner.on_change.clone(),
            };
            (transition, callback)
        };

        tracing::trace!(
            kind = %action.kind(),
            on = transition.next.on,
            applied = transition.applied,
            "Toggle transition"
        );

        // State lock released: callbacks may read the handle or feed a value back
        if let Some(callback) = callback {
            callback(&transition.next, &action);
        }
        Ok(transition.next)
    }

    /// Dispatch by kind string. `reset` carries the state captured at creation.
    pub fn dispatch_kind(&self, kind: &str) -> Result<ToggleState, ToggleError> {
        let initial = self.initial_state();
        self.dispatch(ToggleAction::from_kind(kind, initial))
    }

    /// Supply (or withdraw) the controlling value
    pub fn set_controlled(&self, on: Option<bool>) {
        let mut inner = self.inner.lock();
        inner.options.on = on;
        inner
            .store
            .store_mut()
            .set_controlled(on.map(ToggleState::new));
    }

    /// Re-supply options, as a caller does whenever its inputs change.
    ///
    /// The controlling value is taken as given. A changed `initial_on` is
    /// recorded but does not affect [`reset`](Self::reset).
    pub fn reconfigure(&self, options: ToggleOptions) {
        let mut inner = self.inner.lock();
        if options.initial_on != inner.initial.on {
            tracing::debug!(
                initial_on = options.initial_on,
                captured = inner.initial.on,
                "Ignoring changed initial value"
            );
        }
        inner.options = options;
        inner
            .store
            .store_mut()
            .set_controlled(options.on.map(ToggleState::new));
    }

    /// A handler that toggles this controller
    pub fn toggle_handler(&self) -> Handler {
        let handle = self.clone();
        Handler::try_new(move || handle.toggle().map(|_| ()))
    }

    /// A handler that resets this controller
    pub fn reset_handler(&self) -> Handler {
        let handle = self.clone();
        Handler::try_new(move || handle.reset().map(|_| ()))
    }

    /// Merge caller props with this toggle's behavior.
    ///
    /// See [`props::toggler_props`].
    pub fn toggler_props(&self, props: Props) -> Props {
        props::toggler_props(self.on(), self.toggle_handler(), props)
    }
}

impl fmt::Debug for ToggleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("ToggleHandle")
            .field("state", inner.store.state())
            .field("initial", &inner.initial)
            .field("controlled", &inner.store.store().is_controlled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording() -> (Arc<Mutex<Vec<bool>>>, impl Fn(&ToggleState, &ToggleAction) + Send + Sync) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |state: &ToggleState, _: &ToggleAction| {
            sink.lock().push(state.on)
        })
    }

    #[test]
    fn test_initial_value() {
        for initial in [false, true] {
            let toggle = create(ToggleConfig::new().with_initial_on(initial));
            assert_eq!(toggle.on(), initial);
            assert!(!toggle.is_controlled());
        }
    }

    #[test]
    fn test_toggle_twice_restores() {
        let toggle = create(ToggleConfig::new().with_initial_on(true));
        toggle.toggle().unwrap();
        assert!(!toggle.on());
        toggle.toggle().unwrap();
        assert!(toggle.on());
    }

    #[test]
    fn test_toggle_then_reset_scenario() {
        let (changes, on_change) = recording();
        let (resets, on_reset) = recording();
        let toggle = create(
            ToggleConfig::new()
                .with_initial_on(false)
                .with_on_change(on_change)
                .with_on_reset(on_reset),
        );

        toggle.toggle().unwrap();
        assert!(toggle.on());
        assert_eq!(*changes.lock(), vec![true]);

        toggle.reset().unwrap();
        assert!(!toggle.on());
        assert_eq!(*resets.lock(), vec![false]);
        assert_eq!(changes.lock().len(), 1);
    }

    #[test]
    fn test_reset_ignores_reconfigured_initial() {
        let toggle = create(ToggleConfig::new().with_initial_on(true));
        for _ in 0..5 {
            toggle.toggle().unwrap();
        }
        toggle.reconfigure(ToggleOptions {
            initial_on: false,
            on: None,
        });
        assert!(!toggle.options().initial_on);

        toggle.reset().unwrap();
        assert!(toggle.on());
        assert_eq!(toggle.initial_state(), ToggleState::new(true));
    }

    #[test]
    fn test_controlled_value_wins() {
        let (changes, on_change) = recording();
        let toggle = create(ToggleConfig::new().with_on(true).with_on_change(on_change));
        assert!(toggle.is_controlled());

        let proposed = toggle.toggle().unwrap();
        assert!(!proposed.on);
        assert!(toggle.on());
        assert_eq!(*changes.lock(), vec![false]);

        // Not fed back, so the next proposal is computed from the same value
        toggle.toggle().unwrap();
        assert_eq!(*changes.lock(), vec![false, false]);
    }

    #[test]
    fn test_controlled_reset_reports_initial() {
        let (resets, on_reset) = recording();
        let toggle = create(
            ToggleConfig::new()
                .with_initial_on(false)
                .with_on(true)
                .with_on_reset(on_reset),
        );

        toggle.reset().unwrap();
        assert!(toggle.on());
        assert_eq!(*resets.lock(), vec![false]);
    }

    #[test]
    fn test_callback_can_feed_value_back() {
        let mirror = create(ToggleConfig::new().with_on(false));
        let sink = mirror.clone();
        let driver = create(
            ToggleConfig::new()
                .with_on(false)
                .with_on_change(move |state, _| sink.set_controlled(Some(state.on))),
        );

        driver.toggle().unwrap();
        assert!(mirror.on());
        assert!(!driver.on());
    }

    #[test]
    fn test_unsupported_action_leaves_state() {
        let (changes, on_change) = recording();
        let toggle = create(ToggleConfig::new().with_initial_on(true).with_on_change(on_change));

        let err = toggle.dispatch(ToggleAction::custom("bogus")).unwrap_err();
        assert_eq!(err, ToggleError::unsupported("bogus"));
        assert!(toggle.on());
        assert!(changes.lock().is_empty());
    }

    #[test]
    fn test_dispatch_kind_uses_captured_initial() {
        let toggle = create(ToggleConfig::new().with_initial_on(true));
        toggle.dispatch_kind("toggle").unwrap();
        assert!(!toggle.on());

        toggle.dispatch_kind("reset").unwrap();
        assert!(toggle.on());

        let err = toggle.dispatch_kind("bogus").unwrap_err();
        assert_eq!(err, ToggleError::unsupported("bogus"));
    }

    #[test]
    fn test_callback_may_dispatch_on_same_handle() {
        let slot: Arc<Mutex<Option<ToggleHandle>>> = Arc::new(Mutex::new(None));
        let reenter = slot.clone();
        let toggle = create(ToggleConfig::new().with_on_change(move |state, _| {
            let handle = reenter.lock().clone();
            if let (true, Some(handle)) = (state.on, handle) {
                handle.toggle().unwrap();
            }
        }));
        *slot.lock() = Some(toggle.clone());

        // Turning on flips straight back off from inside the callback
        toggle.toggle().unwrap();
        assert!(!toggle.on());
        slot.lock().take();
    }

    fn force_on(state: &ToggleState, action: &ToggleAction) -> Result<ToggleState, ToggleError> {
        match action {
            ToggleAction::Custom(kind) if kind == "force_on" => Ok(ToggleState::new(true)),
            _ => toggle_reducer(state, action),
        }
    }

    #[test]
    fn test_custom_reducer() {
        let toggle = create(ToggleConfig::new().with_reducer(force_on));
        toggle.dispatch(ToggleAction::custom("force_on")).unwrap();
        assert!(toggle.on());
        toggle.dispatch(ToggleAction::custom("force_on")).unwrap();
        assert!(toggle.on());
        assert!(toggle.dispatch(ToggleAction::custom("bogus")).is_err());
    }

    #[test]
    fn test_toggler_props() {
        let external = Arc::new(Mutex::new(Vec::new()));
        let toggle = create(ToggleConfig::new());
        let probe = {
            let external = external.clone();
            let toggle = toggle.clone();
            Handler::new(move || external.lock().push(toggle.on()))
        };

        let props = toggle.toggler_props(Props::new().with_on_click(probe));
        props.click().unwrap();

        // External handler ran first, while still off
        assert_eq!(*external.lock(), vec![false]);
        assert!(toggle.on());
    }

    #[test]
    fn test_toggler_props_without_handler() {
        let toggle = create(ToggleConfig::new());
        toggle.toggler_props(Props::new()).click().unwrap();
        assert!(toggle.on());
    }

    #[test]
    fn test_options_from_json() {
        let options: ToggleOptions = serde_json::from_str(r#"{"initial_on": true}"#).unwrap();
        assert_eq!(options.on, None);

        let toggle = create(ToggleConfig::from_options(options));
        assert!(toggle.on());
        assert!(!toggle.is_controlled());
    }
}
