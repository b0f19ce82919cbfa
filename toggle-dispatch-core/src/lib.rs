//! Core traits and types for toggle-dispatch
//!
//! This crate provides a boolean toggle controller built on a reducer-driven
//! store, following a Redux/Elm-inspired architecture.
//!
//! # Core Concepts
//!
//! - **Action**: Events that describe state changes
//! - **Reducer**: Pure `(state, action) -> state` transition function
//! - **ControlledStore**: State container that either owns its state or
//!   defers to a value supplied from outside
//! - **ToggleHandle**: The toggle controller: `on`, `toggle`, `reset`, and
//!   a prop getter that composes interaction handlers
//! - **Context**: Compound consumers sharing an implicit toggle
//!
//! # Basic Example
//!
//! ```
//! use toggle_dispatch_core::prelude::*;
//!
//! let toggle = create(
//!     ToggleConfig::new()
//!         .with_initial_on(false)
//!         .with_on_change(|state, _action| println!("on: {}", state.on)),
//! );
//!
//! toggle.toggle()?;
//! assert!(toggle.on());
//!
//! toggle.reset()?;
//! assert!(!toggle.on());
//! # Ok::<(), ToggleError>(())
//! ```
//!
//! # Controlled Mode
//!
//! When the caller supplies the `on` value, the controller never changes it
//! on its own. Each transition is computed from the supplied value and
//! reported through the change callback; the caller decides whether to feed
//! it back with [`ToggleHandle::set_controlled`].
//!
//! ```
//! use toggle_dispatch_core::prelude::*;
//!
//! let toggle = create(ToggleConfig::new().with_on(true));
//! let proposed = toggle.toggle()?;
//! assert!(!proposed.on);
//! assert!(toggle.on());
//! # Ok::<(), ToggleError>(())
//! ```

pub mod action;
pub mod context;
pub mod controller;
pub mod debug;
pub mod error;
pub mod props;
pub mod reducer;
pub mod store;
pub mod testing;

// Core trait exports
pub use action::{kinds, Action, ToggleAction};
pub use error::ToggleError;
pub use reducer::{toggle_reducer, Reducer, ToggleState};

// Store exports
pub use store::{
    ComposedMiddleware, ControlledStore, ControlledStoreWithMiddleware, LoggingMiddleware,
    Middleware, NoopMiddleware, Transition,
};

// Controller exports
pub use controller::{create, Callback, ToggleConfig, ToggleHandle, ToggleOptions};
pub use props::{call_all, toggler_props, Handler, Props, ARIA_PRESSED};

// Testing exports
pub use testing::{Emitted, TestHarness};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{kinds, Action, ToggleAction};
    pub use crate::context::{button_props, provide, use_toggle_context, when_off, when_on};
    pub use crate::controller::{create, ToggleConfig, ToggleHandle, ToggleOptions};
    pub use crate::error::ToggleError;
    pub use crate::props::{call_all, Handler, Props};
    pub use crate::reducer::{toggle_reducer, Reducer, ToggleState};
    pub use crate::store::{
        ComposedMiddleware, ControlledStore, ControlledStoreWithMiddleware, LoggingMiddleware,
        Middleware, NoopMiddleware, Transition,
    };
}
