//! Test utilities for toggle controllers
//!
//! - [`TestHarness`]: hands out recording callbacks and handlers, and drains
//!   what they recorded in call order
//! - Assertion macros for verifying emitted events
//!
//! # Example
//!
//! ```
//! use toggle_dispatch_core::testing::{Emitted, TestHarness};
//! use toggle_dispatch_core::{assert_emitted, create, ToggleConfig};
//!
//! let mut harness = TestHarness::new();
//! let toggle = create(
//!     ToggleConfig::new()
//!         .with_on_change(harness.on_change())
//!         .with_on_reset(harness.on_reset()),
//! );
//!
//! toggle.toggle().unwrap();
//! toggle.reset().unwrap();
//!
//! let emitted = harness.drain_emitted();
//! assert_emitted!(emitted, Emitted::Change { state, .. } if state.on);
//! assert_emitted!(emitted, Emitted::Reset { state, .. } if !state.on);
//! ```

use tokio::sync::mpsc;

use crate::action::ToggleAction;
use crate::props::Handler;
use crate::reducer::ToggleState;

/// Something a recording callback or handler observed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emitted {
    /// The change callback fired
    Change {
        /// State reported
        state: ToggleState,
        /// Action that produced it
        action: ToggleAction,
    },
    /// The reset callback fired
    Reset {
        /// State reported
        state: ToggleState,
        /// Action that produced it
        action: ToggleAction,
    },
    /// A labelled handler was invoked
    Handler(&'static str),
}

/// Test harness capturing what callbacks and handlers emit.
///
/// Everything handed out shares one unbounded channel, so the drained
/// events reflect the order in which they actually fired.
pub struct TestHarness {
    tx: mpsc::UnboundedSender<Emitted>,
    rx: mpsc::UnboundedReceiver<Emitted>,
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHarness {
    /// Create a new, empty harness
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    /// A change callback that records [`Emitted::Change`]
    pub fn on_change(&self) -> impl Fn(&ToggleState, &ToggleAction) + Send + Sync + 'static {
        let tx = self.tx.clone();
        move |state: &ToggleState, action: &ToggleAction| {
            let _ = tx.send(Emitted::Change {
                state: *state,
                action: action.clone(),
            });
        }
    }

    /// A reset callback that records [`Emitted::Reset`]
    pub fn on_reset(&self) -> impl Fn(&ToggleState, &ToggleAction) + Send + Sync + 'static {
        let tx = self.tx.clone();
        move |state: &ToggleState, action: &ToggleAction| {
            let _ = tx.send(Emitted::Reset {
                state: *state,
                action: action.clone(),
            });
        }
    }

    /// A handler that records [`Emitted::Handler`] with the given label
    pub fn handler(&self, label: &'static str) -> Handler {
        let tx = self.tx.clone();
        Handler::new(move || {
            let _ = tx.send(Emitted::Handler(label));
        })
    }

    /// Record an event directly
    pub fn emit(&self, emitted: Emitted) {
        let _ = self.tx.send(emitted);
    }

    /// Drain all recorded events, oldest first
    pub fn drain_emitted(&mut self) -> Vec<Emitted> {
        let mut emitted = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            emitted.push(event);
        }
        emitted
    }

    /// Drain only the `on` values reported through the change callback.
    ///
    /// Other events are dropped.
    pub fn drain_changes(&mut self) -> Vec<bool> {
        self.drain_emitted()
            .into_iter()
            .filter_map(|event| match event {
                Emitted::Change { state, .. } => Some(state.on),
                _ => None,
            })
            .collect()
    }

    /// Check if anything was recorded.
    pub fn has_emitted(&mut self) -> bool {
        !self.drain_emitted().is_empty()
    }
}

/// Assert that an event matching a pattern was emitted.
///
/// ```ignore
/// let emitted = harness.drain_emitted();
/// assert_emitted!(emitted, Emitted::Handler("external"));
/// ```
#[macro_export]
macro_rules! assert_emitted {
    ($emitted:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $emitted.iter().any(|e| matches!(e, $pattern $(if $guard)?)),
            "Expected event matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $emitted
        );
    };
}

/// Assert that no event matching a pattern was emitted.
#[macro_export]
macro_rules! assert_not_emitted {
    ($emitted:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$emitted.iter().any(|e| matches!(e, $pattern $(if $guard)?)),
            "Expected event matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $emitted
        );
    };
}

/// Find and return the first event matching a pattern.
#[macro_export]
macro_rules! find_emitted {
    ($emitted:expr, $pattern:pat $(if $guard:expr)?) => {
        $emitted.iter().find(|e| matches!(e, $pattern $(if $guard)?))
    };
}

/// Count how many events match a pattern.
#[macro_export]
macro_rules! count_emitted {
    ($emitted:expr, $pattern:pat $(if $guard:expr)?) => {
        $emitted.iter().filter(|e| matches!(e, $pattern $(if $guard)?)).count()
    };
}
