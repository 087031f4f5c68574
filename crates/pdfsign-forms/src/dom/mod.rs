//! Access to the host page's DOM
//!
//! Widgets never own the page; they read and write it through `FormDom`.
//! Implementations are cheap handles (the browser adapter wraps a
//! `web_sys::Document`, `MemoryDom` wraps an `Rc`), which is why every method
//! takes `&self`.

pub mod memory;

pub use memory::MemoryDom;

use crate::error::DomError;
use crate::types::{Display, SelectOption};

pub trait FormDom {
    fn exists(&self, id: &str) -> bool;

    /// Current value of an input, or the first selected option of a select
    /// (empty when none is selected).
    fn value(&self, id: &str) -> Result<String, DomError>;

    /// On a select, selects the first option carrying `value` and deselects
    /// the rest.
    fn set_value(&self, id: &str, value: &str) -> Result<(), DomError>;

    fn is_checked(&self, id: &str) -> Result<bool, DomError>;

    /// Options of a select, in DOM order
    fn options(&self, id: &str) -> Result<Vec<SelectOption>, DomError>;

    /// Append an option to the end of a select
    fn add_option(&self, id: &str, text: &str, value: &str) -> Result<(), DomError>;

    fn set_multiple(&self, id: &str, multiple: bool) -> Result<(), DomError>;

    fn set_display(&self, id: &str, display: Display) -> Result<(), DomError>;

    /// Set the display of the element wrapping `id` (form fields are toggled
    /// through their container, not the control itself).
    fn set_parent_display(&self, id: &str, display: Display) -> Result<(), DomError>;
}

/// Layout drift must not take the form down: a missing or mistyped element
/// turns the operation into a no-op.
pub(crate) fn tolerate<T>(result: Result<T, DomError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(DomError::MissingElement(id)) => {
            tracing::debug!("skipping missing element '{}'", id);
            None
        }
        Err(e) => {
            tracing::warn!("DOM operation skipped: {}", e);
            None
        }
    }
}
