//! Action logging with pattern-based filtering and in-memory storage
//!
//! Provides configurable action logging using glob patterns to include/exclude
//! specific actions from logs. Supports both tracing output and an in-memory
//! ring buffer that can be inspected after the middleware has been handed to
//! a controller.
//!
//! # Example
//!
//! ```
//! use toggle_dispatch_core::debug::{ActionLogConfig, ActionLoggerMiddleware, Outcome};
//! use toggle_dispatch_core::{create, ToggleAction, ToggleConfig};
//!
//! let middleware = ActionLoggerMiddleware::with_log(ActionLogConfig::default());
//! let log = middleware.log().unwrap();
//!
//! let toggle = create(ToggleConfig::new().with_middleware(middleware));
//! toggle.toggle().unwrap();
//! let _ = toggle.dispatch(ToggleAction::custom("bogus"));
//!
//! let log = log.lock();
//! let outcomes: Vec<_> = log.entries().map(|e| e.outcome.clone()).collect();
//! assert_eq!(outcomes[0], Outcome::Changed);
//! assert!(matches!(outcomes[1], Outcome::Rejected(_)));
//! ```

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;

use crate::action::Action;
use crate::error::ToggleError;
use crate::store::Middleware;

/// Configuration for action logging with glob pattern filtering.
///
/// Patterns match against the action name and support:
/// - `*` matches any sequence of characters
/// - `?` matches any single character
/// - Literal text matches exactly
///
/// # Examples
///
/// - `Toggle` matches only Toggle
/// - `*` matches everything
/// - `Re*` matches Reset
#[derive(Debug, Clone, Default)]
pub struct ActionLoggerConfig {
    /// If non-empty, only log actions matching these patterns
    pub include_patterns: Vec<String>,
    /// Exclude actions matching these patterns (applied after include)
    pub exclude_patterns: Vec<String>,
}

impl ActionLoggerConfig {
    /// Create a new config from comma-separated pattern strings
    ///
    /// # Example
    /// ```
    /// use toggle_dispatch_core::debug::ActionLoggerConfig;
    ///
    /// let config = ActionLoggerConfig::new(Some("Toggle,Re*"), Some("Custom"));
    /// assert!(config.should_log("Toggle"));
    /// assert!(config.should_log("Reset"));
    /// assert!(!config.should_log("Custom"));
    /// ```
    pub fn new(include: Option<&str>, exclude: Option<&str>) -> Self {
        Self {
            include_patterns: split_patterns(include),
            exclude_patterns: split_patterns(exclude),
        }
    }

    /// Create a config with specific pattern vectors
    pub fn with_patterns(include: Vec<String>, exclude: Vec<String>) -> Self {
        Self {
            include_patterns: include,
            exclude_patterns: exclude,
        }
    }

    /// Check if an action name should be logged based on include/exclude patterns
    pub fn should_log(&self, action_name: &str) -> bool {
        if !self.include_patterns.is_empty()
            && !self
                .include_patterns
                .iter()
                .any(|p| glob_match(p, action_name))
        {
            return false;
        }

        !self
            .exclude_patterns
            .iter()
            .any(|p| glob_match(p, action_name))
    }
}

fn split_patterns(patterns: Option<&str>) -> Vec<String> {
    patterns
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

// ============================================================================
// In-Memory Action Log
// ============================================================================

/// What happened to a logged action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The reducer has not finished yet
    Pending,
    /// Accepted, and the next state differs from the previous visible state
    Changed,
    /// Accepted, with no difference in state
    Unchanged,
    /// Rejected by the reducer
    Rejected(String),
}

/// An entry in the action log
#[derive(Debug, Clone)]
pub struct ActionLogEntry {
    /// Action name (from Action::name())
    pub name: &'static str,
    /// Action kind (from Action::kind())
    pub kind: String,
    /// Debug representation of the action
    pub summary: String,
    /// Timestamp when the action was logged
    pub timestamp: Instant,
    /// Sequence number for ordering
    pub sequence: u64,
    /// Set once the reducer has run
    pub outcome: Outcome,
}

impl ActionLogEntry {
    /// Create a new log entry
    pub fn new<A: Action>(action: &A, sequence: u64) -> Self {
        Self {
            name: action.name(),
            kind: action.kind().to_string(),
            summary: format!("{:?}", action),
            timestamp: Instant::now(),
            sequence,
            outcome: Outcome::Pending,
        }
    }

    /// Time since this action was logged
    pub fn elapsed(&self) -> std::time::Duration {
        self.timestamp.elapsed()
    }

    /// Format the elapsed time for display (e.g., "2.3s", "150ms")
    pub fn elapsed_display(&self) -> String {
        let elapsed = self.elapsed();
        if elapsed.as_secs() >= 1 {
            format!("{:.1}s", elapsed.as_secs_f64())
        } else {
            format!("{}ms", elapsed.as_millis())
        }
    }
}

/// Configuration for the action log ring buffer
#[derive(Debug, Clone)]
pub struct ActionLogConfig {
    /// Maximum number of entries to keep
    pub capacity: usize,
    /// Which actions are stored
    pub filter: ActionLoggerConfig,
}

impl Default for ActionLogConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            filter: ActionLoggerConfig::default(),
        }
    }
}

impl ActionLogConfig {
    /// Create with custom capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }

    /// Create with custom capacity and filter
    pub fn new(capacity: usize, filter: ActionLoggerConfig) -> Self {
        Self { capacity, filter }
    }
}

/// In-memory ring buffer for storing recent actions
///
/// Older entries are discarded when capacity is reached.
#[derive(Debug, Clone)]
pub struct ActionLog {
    entries: VecDeque<ActionLogEntry>,
    config: ActionLogConfig,
    next_sequence: u64,
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new(ActionLogConfig::default())
    }
}

impl ActionLog {
    /// Create a new action log with configuration
    pub fn new(config: ActionLogConfig) -> Self {
        Self {
            entries: VecDeque::with_capacity(config.capacity),
            config,
            next_sequence: 0,
        }
    }

    /// Log an action (if it passes the filter)
    ///
    /// Returns the entry if it was logged, None if filtered out.
    pub fn log<A: Action>(&mut self, action: &A) -> Option<&ActionLogEntry> {
        if self.config.capacity == 0 || !self.config.filter.should_log(action.name()) {
            return None;
        }

        let entry = ActionLogEntry::new(action, self.next_sequence);
        self.next_sequence += 1;

        if self.entries.len() >= self.config.capacity {
            self.entries.pop_front();
        }

        self.entries.push_back(entry);
        self.entries.back()
    }

    /// Record the outcome of the last entry (called after the reducer)
    pub fn update_last_outcome(&mut self, outcome: Outcome) {
        if let Some(entry) = self.entries.back_mut() {
            entry.outcome = outcome;
        }
    }

    /// Get all entries (oldest first)
    pub fn entries(&self) -> impl Iterator<Item = &ActionLogEntry> {
        self.entries.iter()
    }

    /// Get the most recent N entries (newest first)
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &ActionLogEntry> {
        self.entries.iter().rev().take(count)
    }

    /// Number of entries currently stored
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Get configuration
    pub fn config(&self) -> &ActionLogConfig {
        &self.config
    }
}

/// An action log shared between a middleware and whoever inspects it
pub type SharedActionLog = Arc<Mutex<ActionLog>>;

// ============================================================================
// Middleware
// ============================================================================

/// Middleware that logs actions with configurable pattern filtering.
///
/// Supports two modes:
/// - **Tracing only** (default): logs via `tracing::debug!()`
/// - **With storage**: also stores in a [`SharedActionLog`]
#[derive(Debug, Clone)]
pub struct ActionLoggerMiddleware {
    config: ActionLoggerConfig,
    log: Option<SharedActionLog>,
    /// Whether the last action made it into the log
    last_action_logged: bool,
    /// When false, all methods are no-ops
    active: bool,
}

impl ActionLoggerMiddleware {
    /// Create a new action logger middleware with tracing only (no in-memory storage)
    pub fn new(config: ActionLoggerConfig) -> Self {
        Self {
            config,
            log: None,
            last_action_logged: false,
            active: true,
        }
    }

    /// Create middleware with in-memory storage
    pub fn with_log(config: ActionLogConfig) -> Self {
        Self {
            config: config.filter.clone(),
            log: Some(Arc::new(Mutex::new(ActionLog::new(config)))),
            last_action_logged: false,
            active: true,
        }
    }

    /// Create with no filtering (logs all actions), tracing only
    pub fn log_all() -> Self {
        Self::new(ActionLoggerConfig::default())
    }

    /// Set whether the middleware is active.
    ///
    /// ```
    /// use toggle_dispatch_core::debug::ActionLoggerMiddleware;
    ///
    /// let verbose = std::env::var_os("TOGGLE_DEBUG").is_some();
    /// let middleware = ActionLoggerMiddleware::log_all().active(verbose);
    /// assert_eq!(middleware.is_active(), verbose);
    /// ```
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Check if the middleware is active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Handle to the action log (if storage is enabled)
    pub fn log(&self) -> Option<SharedActionLog> {
        self.log.clone()
    }

    /// Get a reference to the config
    pub fn config(&self) -> &ActionLoggerConfig {
        &self.config
    }

    fn finish(&mut self, outcome: Outcome) {
        if self.last_action_logged {
            if let Some(log) = &self.log {
                log.lock().update_last_outcome(outcome);
            }
        }
    }
}

impl<A: Action> Middleware<A> for ActionLoggerMiddleware {
    fn before(&mut self, action: &A) {
        if !self.active {
            return;
        }

        let name = action.name();
        if self.config.should_log(name) {
            tracing::debug!(action = %name, kind = %action.kind(), "action");
        }

        self.last_action_logged = match &self.log {
            Some(log) => log.lock().log(action).is_some(),
            None => false,
        };
    }

    fn after(&mut self, _action: &A, state_changed: bool) {
        if !self.active {
            return;
        }
        self.finish(if state_changed {
            Outcome::Changed
        } else {
            Outcome::Unchanged
        });
    }

    fn failed(&mut self, action: &A, error: &ToggleError) {
        if !self.active {
            return;
        }
        if self.config.should_log(action.name()) {
            tracing::debug!(action = %action.name(), %error, "action rejected");
        }
        self.finish(Outcome::Rejected(error.to_string()));
    }
}

/// Simple glob pattern matching supporting `*` and `?`.
///
/// - `*` matches zero or more characters
/// - `?` matches exactly one character
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let mut pi = 0;
    let mut ti = 0;
    let mut star: Option<(usize, usize)> = None;

    while ti < text.len() {
        match pattern.get(pi) {
            Some('*') => {
                star = Some((pi, ti));
                pi += 1;
            }
            Some(&c) if c == '?' || c == text[ti] => {
                pi += 1;
                ti += 1;
            }
            _ => match star {
                // Backtrack: let the last star swallow one more character
                Some((star_pi, star_ti)) => {
                    pi = star_pi + 1;
                    ti = star_ti + 1;
                    star = Some((star_pi, star_ti + 1));
                }
                None => return false,
            },
        }
    }

    pattern[pi..].iter().all(|&c| c == '*')
}
