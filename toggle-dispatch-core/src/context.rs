//! Compound consumers sharing an implicit toggle
//!
//! A parent makes a toggle the ambient one for everything composed beneath
//! it with [`provide`]. Consumers nested inside ([`when_on`], [`when_off`],
//! [`button_props`]) look it up instead of receiving it as an argument.
//! Providers nest; the innermost one wins.
//!
//! Outside any provider a consumer fails with
//! [`ToggleError::MissingContext`] naming itself.
//!
//! ```
//! use toggle_dispatch_core::context::{button_props, provide, when_off, when_on};
//! use toggle_dispatch_core::{create, Props, ToggleConfig};
//!
//! let toggle = create(ToggleConfig::new());
//! let (label, button) = provide(&toggle, || {
//!     let on = when_on(|| "The button is on")?;
//!     let off = when_off(|| "The button is off")?;
//!     Ok::<_, toggle_dispatch_core::ToggleError>((on.or(off), button_props(Props::new())?))
//! })
//! .unwrap();
//!
//! assert_eq!(label, Some("The button is off"));
//! button.click().unwrap();
//! assert!(toggle.on());
//! ```

use std::cell::RefCell;

use crate::controller::ToggleHandle;
use crate::error::ToggleError;
use crate::props::Props;

thread_local! {
    static PROVIDED: RefCell<Vec<ToggleHandle>> = const { RefCell::new(Vec::new()) };
}

/// Pops the provider frame, also when the scope unwinds
struct Frame;

impl Drop for Frame {
    fn drop(&mut self) {
        PROVIDED.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

/// Make `handle` the ambient toggle while `f` runs
pub fn provide<R>(handle: &ToggleHandle, f: impl FnOnce() -> R) -> R {
    PROVIDED.with(|stack| stack.borrow_mut().push(handle.clone()));
    let _frame = Frame;
    f()
}

/// The innermost provided toggle, if any
pub fn current() -> Option<ToggleHandle> {
    PROVIDED.with(|stack| stack.borrow().last().cloned())
}

/// Look up the ambient toggle on behalf of `consumer`
pub fn use_toggle_context(consumer: &'static str) -> Result<ToggleHandle, ToggleError> {
    current().ok_or(ToggleError::MissingContext { consumer })
}

/// Produce content only while the ambient toggle is on
pub fn when_on<T>(f: impl FnOnce() -> T) -> Result<Option<T>, ToggleError> {
    let toggle = use_toggle_context("ToggleOn")?;
    Ok(toggle.on().then(f))
}

/// Produce content only while the ambient toggle is off
pub fn when_off<T>(f: impl FnOnce() -> T) -> Result<Option<T>, ToggleError> {
    let toggle = use_toggle_context("ToggleOff")?;
    Ok((!toggle.on()).then(f))
}

/// Props for a button that flips the ambient toggle
pub fn button_props(props: Props) -> Result<Props, ToggleError> {
    let toggle = use_toggle_context("ToggleButton")?;
    Ok(toggle.toggler_props(props))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{create, ToggleConfig};

    #[test]
    fn test_missing_context() {
        assert_eq!(
            button_props(Props::new()).unwrap_err(),
            ToggleError::MissingContext {
                consumer: "ToggleButton"
            }
        );
        assert_eq!(
            when_on(|| ()).unwrap_err(),
            ToggleError::MissingContext {
                consumer: "ToggleOn"
            }
        );
        assert!(current().is_none());
    }

    #[test]
    fn test_on_off_follow_toggle() {
        let toggle = create(ToggleConfig::new().with_initial_on(true));
        provide(&toggle, || {
            assert_eq!(when_on(|| 1).unwrap(), Some(1));
            assert_eq!(when_off(|| 2).unwrap(), None);

            toggle.toggle().unwrap();
            assert_eq!(when_on(|| 1).unwrap(), None);
            assert_eq!(when_off(|| 2).unwrap(), Some(2));
        });
    }

    #[test]
    fn test_nested_providers() {
        let outer = create(ToggleConfig::new().with_initial_on(false));
        let inner = create(ToggleConfig::new().with_initial_on(true));

        provide(&outer, || {
            assert!(when_off(|| ()).unwrap().is_some());
            provide(&inner, || {
                assert!(when_on(|| ()).unwrap().is_some());
            });
            assert!(when_off(|| ()).unwrap().is_some());
        });
        assert!(current().is_none());
    }

    #[test]
    fn test_button_flips_provided_toggle() {
        let toggle = create(ToggleConfig::new());
        let props = provide(&toggle, || button_props(Props::new())).unwrap();
        props.click().unwrap();
        assert!(toggle.on());
    }
}
