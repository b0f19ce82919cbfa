//! Controlled state store with reducer pattern

use std::marker::PhantomData;

use crate::error::ToggleError;
use crate::reducer::Reducer;
use crate::Action;

/// Outcome of a successful dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition<S> {
    /// State computed by the reducer from the visible state
    pub next: S,
    /// Whether the store applied `next` to its own state (uncontrolled mode)
    pub applied: bool,
    /// Whether `next` differs from the visible state before dispatch
    pub changed: bool,
}

/// State store that can be driven from outside ("controlled") or own its
/// state ("uncontrolled")
///
/// With no controlled value, dispatch applies the reducer's result to the
/// internal state. With a controlled value, [`state`](Self::state) always
/// returns that value; dispatch still runs the reducer, starting from the
/// controlled value, and reports the proposed next state without applying
/// it. The owner is expected to feed the proposal back through
/// [`set_controlled`](Self::set_controlled).
///
/// # Example
/// ```
/// use toggle_dispatch_core::{toggle_reducer, ControlledStore, ToggleAction, ToggleState};
///
/// let mut store = ControlledStore::new(ToggleState::default(), toggle_reducer);
/// store.dispatch(ToggleAction::Toggle).unwrap();
/// assert!(store.state().on);
///
/// store.set_controlled(Some(ToggleState::new(false)));
/// let proposal = store.dispatch(ToggleAction::Toggle).unwrap();
/// assert!(proposal.next.on);
/// assert!(!proposal.applied);
/// assert!(!store.state().on);
/// ```
pub struct ControlledStore<S, A: Action> {
    state: S,
    controlled: Option<S>,
    reducer: Reducer<S, A>,
    _marker: PhantomData<A>,
}

impl<S, A> ControlledStore<S, A>
where
    S: Clone + PartialEq,
    A: Action,
{
    /// Create an uncontrolled store with initial state and reducer
    pub fn new(state: S, reducer: Reducer<S, A>) -> Self {
        Self {
            state,
            controlled: None,
            reducer,
            _marker: PhantomData,
        }
    }

    /// Create a store whose visible state is owned by the caller
    pub fn controlled(state: S, controlled: S, reducer: Reducer<S, A>) -> Self {
        Self {
            controlled: Some(controlled),
            ..Self::new(state, reducer)
        }
    }

    /// Dispatch an action to the store
    ///
    /// The reducer receives the visible state, never a stale internal copy.
    /// On error nothing is mutated.
    pub fn dispatch(&mut self, action: A) -> Result<Transition<S>, ToggleError> {
        let current = self.state();
        let next = (self.reducer)(current, &action)?;
        let changed = next != *current;
        let applied = self.controlled.is_none();
        if applied {
            self.state = next.clone();
        }
        Ok(Transition {
            next,
            applied,
            changed,
        })
    }

    /// The visible state: the controlled value if present, else internal state
    pub fn state(&self) -> &S {
        self.controlled.as_ref().unwrap_or(&self.state)
    }

    /// The internal state, ignoring any controlled value
    pub fn internal_state(&self) -> &S {
        &self.state
    }

    /// Whether a controlled value is present
    pub fn is_controlled(&self) -> bool {
        self.controlled.is_some()
    }

    /// Supply (or withdraw, with `None`) the controlled value
    pub fn set_controlled(&mut self, controlled: Option<S>) {
        self.controlled = controlled;
    }

    /// Replace the reducer
    pub fn set_reducer(&mut self, reducer: Reducer<S, A>) {
        self.reducer = reducer;
    }
}

/// Controlled store with middleware support
///
/// Wraps a [`ControlledStore`] and allows middleware to observe actions
/// before and after they are processed by the reducer.
pub struct ControlledStoreWithMiddleware<S, A: Action, M: Middleware<A>> {
    store: ControlledStore<S, A>,
    middleware: M,
}

impl<S, A, M> ControlledStoreWithMiddleware<S, A, M>
where
    S: Clone + PartialEq,
    A: Action,
    M: Middleware<A>,
{
    /// Create a new store with middleware
    pub fn new(store: ControlledStore<S, A>, middleware: M) -> Self {
        Self { store, middleware }
    }

    /// Dispatch an action through middleware and store
    pub fn dispatch(&mut self, action: A) -> Result<Transition<S>, ToggleError> {
        self.middleware.before(&action);
        match self.store.dispatch(action.clone()) {
            Ok(transition) => {
                self.middleware.after(&action, transition.changed);
                Ok(transition)
            }
            Err(error) => {
                self.middleware.failed(&action, &error);
                Err(error)
            }
        }
    }

    /// Get a reference to the wrapped store
    pub fn store(&self) -> &ControlledStore<S, A> {
        &self.store
    }

    /// Get a mutable reference to the wrapped store
    pub fn store_mut(&mut self) -> &mut ControlledStore<S, A> {
        &mut self.store
    }

    /// The visible state
    pub fn state(&self) -> &S {
        self.store.state()
    }

    /// Get a reference to the middleware
    pub fn middleware(&self) -> &M {
        &self.middleware
    }

    /// Get a mutable reference to the middleware
    pub fn middleware_mut(&mut self) -> &mut M {
        &mut self.middleware
    }
}

/// Middleware trait for intercepting actions
///
/// Implement this trait to add logging, auditing, or other
/// cross-cutting concerns to a store.
pub trait Middleware<A: Action> {
    /// Called before the action is dispatched to the reducer
    fn before(&mut self, action: &A);

    /// Called after the reducer accepted the action
    fn after(&mut self, action: &A, state_changed: bool);

    /// Called when the reducer rejected the action
    fn failed(&mut self, action: &A, error: &ToggleError) {
        let _ = (action, error);
    }
}

/// A no-op middleware that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl<A: Action> Middleware<A> for NoopMiddleware {
    fn before(&mut self, _action: &A) {}
    fn after(&mut self, _action: &A, _state_changed: bool) {}
}

/// Middleware that logs actions through `tracing`
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    /// Whether to log before dispatch
    pub log_before: bool,
    /// Whether to log after dispatch
    pub log_after: bool,
}

impl LoggingMiddleware {
    /// Create a new logging middleware with default settings (log after only)
    pub fn new() -> Self {
        Self {
            log_before: false,
            log_after: true,
        }
    }

    /// Create a logging middleware that logs both before and after
    pub fn verbose() -> Self {
        Self {
            log_before: true,
            log_after: true,
        }
    }
}

impl<A: Action> Middleware<A> for LoggingMiddleware {
    fn before(&mut self, action: &A) {
        if self.log_before {
            tracing::debug!(action = %action.name(), kind = %action.kind(), "Dispatching action");
        }
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        if self.log_after {
            tracing::debug!(
                action = %action.name(),
                state_changed = state_changed,
                "Action processed"
            );
        }
    }

    fn failed(&mut self, action: &A, error: &ToggleError) {
        tracing::warn!(action = %action.name(), %error, "Action rejected");
    }
}

/// Compose multiple middleware into a single middleware
pub struct ComposedMiddleware<A: Action> {
    middlewares: Vec<Box<dyn Middleware<A> + Send>>,
}

impl<A: Action> std::fmt::Debug for ComposedMiddleware<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComposedMiddleware")
            .field("middlewares_count", &self.middlewares.len())
            .finish()
    }
}

impl<A: Action> Default for ComposedMiddleware<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Action> ComposedMiddleware<A> {
    /// Create a new composed middleware
    pub fn new() -> Self {
        Self {
            middlewares: Vec::new(),
        }
    }

    /// Add a middleware to the composition
    pub fn add<M: Middleware<A> + Send + 'static>(&mut self, middleware: M) {
        self.middlewares.push(Box::new(middleware));
    }

    /// Number of composed middleware
    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    /// Whether nothing has been added
    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }
}

impl<A: Action> Middleware<A> for ComposedMiddleware<A> {
    fn before(&mut self, action: &A) {
        for middleware in &mut self.middlewares {
            middleware.before(action);
        }
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        // Reverse order for proper nesting
        for middleware in self.middlewares.iter_mut().rev() {
            middleware.after(action, state_changed);
        }
    }

    fn failed(&mut self, action: &A, error: &ToggleError) {
        for middleware in self.middlewares.iter_mut().rev() {
            middleware.failed(action, error);
        }
    }
}
