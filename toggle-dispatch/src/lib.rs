//! toggle-dispatch: a reducer-driven toggle controller
//!
//! A boolean toggle that can own its state or defer to a value supplied by
//! its caller, with resets to the value captured at creation, custom
//! reducers, compound consumers and prop getters that compose handlers.
//!
//! # Example
//! ```
//! use toggle_dispatch::prelude::*;
//!
//! let toggle = create(
//!     ToggleConfig::new()
//!         .with_on_change(|state, _| println!("toggled to {}", state.on))
//!         .with_middleware(LoggingMiddleware::new()),
//! );
//!
//! let props = toggle.toggler_props(Props::new().with_attr("id", "switch"));
//! props.click()?;
//! assert!(toggle.on());
//! # Ok::<(), ToggleError>(())
//! ```
//!
//! Custom action enums for a [`ControlledStore`] derive [`Action`]:
//!
//! ```ignore
//! #[derive(Action, Clone, Debug)]
//! enum FormAction {
//!     Toggle,
//!     SetCount(u32),
//! }
//! ```

// Re-export everything from core
pub use toggle_dispatch_core::*;

// Re-export derive macros
pub use toggle_dispatch_macros::Action;

/// Prelude for convenient imports
pub mod prelude {
    pub use toggle_dispatch_core::prelude::*;

    // Derive macros
    pub use toggle_dispatch_macros::Action;
}
