//! Form widgets for the PDF signing action
//!
//! Three widgets drive the signing form rendered by the host page:
//! - `PageSelector`: resolves which page(s) to sign, from page numbers or a
//!   named page scheme
//! - `DependentSelect`: shows/hides field groups from a select's value
//! - `CheckboxToggle`: hides a list of controls while a checkbox is ticked
//!
//! The widgets only talk to the page through `FormDom`, to the server through
//! `PageDataSource` and to the user through `Notifier`, so the same logic runs
//! in the browser (see the `pdfsign-wasm` app) and against `MemoryDom` in
//! tests.

pub mod checkbox_toggle;
pub mod component;
pub mod dependent_select;
pub mod dom;
pub mod error;
pub mod notify;
pub mod options;
pub mod page_selector;
pub mod registry;
pub mod source;
pub mod types;

pub use checkbox_toggle::{show_dependent_controls, CheckboxToggle};
pub use component::{EventBinding, EventKind, FormComponent, FormEvent};
pub use dependent_select::{apply_config, DependentSelect};
pub use dom::{FormDom, MemoryDom};
pub use error::{DomError, FetchError, FormError, Result};
pub use notify::{Notifier, RecordingNotifier};
pub use options::{
    CheckboxToggleOptions, DependentSelectOptions, EndpointConfig, PageSelectorOptions,
};
pub use page_selector::{page_spec_from_selection, PageSelector, PageSelectorIds};
pub use registry::{WidgetFactory, WidgetKind, WidgetRegistry, WidgetSpec};
pub use source::{PageCountResponse, PageDataSource, PageSchemesResponse, StaticPageSource};
pub use types::{
    DependentFieldConfig, DependentFieldRule, Display, PageSpec, SchemeOption, SelectOption,
};
