//! Inspection utilities for toggle controllers
//!
//! - **Action Logging**: pattern-filtered logging of dispatched actions,
//!   with an optional in-memory ring buffer for later inspection
//!
//! # Example
//!
//! ```
//! use toggle_dispatch_core::debug::{ActionLogConfig, ActionLoggerMiddleware};
//! use toggle_dispatch_core::{create, ToggleConfig};
//!
//! let middleware = ActionLoggerMiddleware::with_log(ActionLogConfig::default());
//! let toggle = create(ToggleConfig::new().with_middleware(middleware));
//! toggle.toggle().unwrap();
//! ```

pub mod action_logger;

pub use action_logger::{
    glob_match, ActionLog, ActionLogConfig, ActionLogEntry, ActionLoggerConfig,
    ActionLoggerMiddleware, Outcome, SharedActionLog,
};
