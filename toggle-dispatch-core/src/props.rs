//! Prop getters: composing interaction handlers
//!
//! A rendering layer hands the controller a partial set of props (its own
//! click handler plus arbitrary attributes). The controller returns props
//! whose click handler runs the caller's handler first, then the toggle,
//! so attaching toggle behavior never displaces the caller's own.
//!
//! ```
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//! use toggle_dispatch_core::props::{call_all, Handler};
//!
//! let count = Arc::new(AtomicUsize::new(0));
//! let bump = {
//!     let count = count.clone();
//!     Handler::new(move || {
//!         count.fetch_add(1, Ordering::SeqCst);
//!     })
//! };
//!
//! let merged = call_all([Some(bump.clone()), None, Some(bump)]);
//! merged.call().unwrap();
//! assert_eq!(count.load(Ordering::SeqCst), 2);
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::ToggleError;

/// Attribute mirroring the toggle's `on` value onto the rendered element
pub const ARIA_PRESSED: &str = "aria-pressed";

type HandlerFn = dyn Fn() -> Result<(), ToggleError> + Send + Sync;

/// A shareable interaction handler
///
/// Handlers are fallible so that a rejected transition inside a merged
/// handler reaches whoever invoked it.
#[derive(Clone)]
pub struct Handler(Arc<HandlerFn>);

impl Handler {
    /// Wrap an infallible callback
    pub fn new(f: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Arc::new(move || {
            f();
            Ok(())
        }))
    }

    /// Wrap a fallible callback
    pub fn try_new(f: impl Fn() -> Result<(), ToggleError> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Invoke the handler
    pub fn call(&self) -> Result<(), ToggleError> {
        (self.0)()
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handler(..)")
    }
}

/// Compose handlers into one that invokes every present handler in order.
///
/// Absent handlers are skipped. The first error stops the chain and is
/// returned to the caller.
pub fn call_all<I>(handlers: I) -> Handler
where
    I: IntoIterator<Item = Option<Handler>>,
{
    let handlers: Vec<Handler> = handlers.into_iter().flatten().collect();
    Handler::try_new(move || handlers.iter().try_for_each(Handler::call))
}

/// Props passed to, and returned from, a prop getter
#[derive(Debug, Clone, Default)]
pub struct Props {
    /// Click-like interaction handler
    pub on_click: Option<Handler>,
    /// Every other prop, passed through untouched
    pub attrs: Map<String, Value>,
}

impl Props {
    /// Empty props
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the click handler
    pub fn with_on_click(mut self, handler: Handler) -> Self {
        self.on_click = Some(handler);
        self
    }

    /// Set an attribute
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Look up an attribute
    pub fn attr(&self, name: &str) -> Option<&Value> {
        self.attrs.get(name)
    }

    /// Invoke the click handler, if any
    pub fn click(&self) -> Result<(), ToggleError> {
        match &self.on_click {
            Some(handler) => handler.call(),
            None => Ok(()),
        }
    }
}

/// Merge caller props with a toggle's own behavior.
///
/// `aria-pressed` is set from `on` first, so a caller-supplied value wins.
/// The returned click handler runs the caller's handler, then `toggle`.
pub fn toggler_props(on: bool, toggle: Handler, props: Props) -> Props {
    let Props { on_click, attrs } = props;

    let mut merged = Map::new();
    merged.insert(ARIA_PRESSED.to_string(), Value::Bool(on));
    merged.extend(attrs);

    Props {
        on_click: Some(call_all([on_click, Some(toggle)])),
        attrs: merged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    fn recorder(log: &Arc<Mutex<Vec<&'static str>>>, label: &'static str) -> Handler {
        let log = log.clone();
        Handler::new(move || log.lock().push(label))
    }

    #[test]
    fn test_call_all_order_and_skips() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let merged = call_all([
            None,
            Some(recorder(&log, "a")),
            None,
            Some(recorder(&log, "b")),
        ]);

        merged.call().unwrap();
        assert_eq!(*log.lock(), vec!["a", "b"]);
    }

    #[test]
    fn test_call_all_stops_at_first_error() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let failing = Handler::try_new(|| Err(ToggleError::unsupported("bogus")));
        let merged = call_all([
            Some(recorder(&log, "a")),
            Some(failing),
            Some(recorder(&log, "c")),
        ]);

        assert_eq!(merged.call(), Err(ToggleError::unsupported("bogus")));
        assert_eq!(*log.lock(), vec!["a"]);
    }

    #[test]
    fn test_call_all_empty() {
        assert!(call_all(Vec::<Option<Handler>>::new()).call().is_ok());
    }

    #[test]
    fn test_toggler_props_passthrough() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let props = Props::new()
            .with_on_click(recorder(&log, "external"))
            .with_attr("id", "custom-button-id")
            .with_attr("aria-label", "custom-button");

        let merged = toggler_props(true, recorder(&log, "toggle"), props);

        assert_eq!(merged.attr("id"), Some(&Value::from("custom-button-id")));
        assert_eq!(merged.attr("aria-label"), Some(&Value::from("custom-button")));
        assert_eq!(merged.attr(ARIA_PRESSED), Some(&Value::Bool(true)));

        merged.click().unwrap();
        assert_eq!(*log.lock(), vec!["external", "toggle"]);
    }

    #[test]
    fn test_toggler_props_caller_overrides_aria() {
        let props = Props::new().with_attr(ARIA_PRESSED, "mixed");
        let merged = toggler_props(false, Handler::new(|| {}), props);
        assert_eq!(merged.attr(ARIA_PRESSED), Some(&Value::from("mixed")));
    }
}
