//! WASM bindings for the PDF signing form
//!
//! The widget logic lives in `pdfsign-forms`; this crate supplies the browser
//! side of it:
//! - `WebDom` reads and writes the rendered form controls
//! - `HttpPageSource` asks the repository proxy for page counts and schemes
//! - `PopupNotifier` surfaces lookup failures to the user
//! - `FormRegistry` is the single object the page script talks to
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { FormRegistry, showDependentControls } from './pkg/pdfsign_wasm.js';
//!
//! await init();
//!
//! const forms = new FormRegistry(Alfresco.constants.PROXY_URI);
//! forms.create("PDFSign.SelectPage", "page-select", {
//!     nodeRef: "workspace://SpacesStore/1234",
//!     showPageScheme: "true",
//!     allowMultiPageSelect: "false",
//! });
//! forms.create("PDFSign.DependentSelect", "position", {
//!     htmlId: "sign-form",
//!     showSelectValues: [{ name: "custom", fields: ["locationX", "locationY"] }],
//! });
//! await forms.readyAll();
//!
//! // inline onclick handler on a checkbox
//! showDependentControls("sign-form_visible", "sign-form");
//! ```

pub mod dom;
pub mod events;
pub mod logging;
pub mod notify;
pub mod registry;
pub mod transport;

use pdfsign_forms::PageSpec;
use wasm_bindgen::prelude::*;

pub use dom::WebDom;
pub use notify::PopupNotifier;
pub use registry::FormRegistry;
pub use transport::HttpPageSource;

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logging::init_logging(tracing_subscriber::filter::LevelFilter::INFO);
    tracing::info!("pdfsign-wasm {} loaded", env!("CARGO_PKG_VERSION"));
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Checkbox handler for the "show dependent controls" pattern.
///
/// Returns the checkbox state, or `undefined` when the checkbox is not on
/// the page.
#[wasm_bindgen(js_name = showDependentControls)]
pub fn show_dependent_controls(
    field_id: &str,
    field_prefix: &str,
) -> Result<Option<bool>, JsValue> {
    let dom = WebDom::new()?;
    Ok(pdfsign_forms::show_dependent_controls(&dom, field_id, field_prefix))
}

/// Pages a submitted page value refers to, for a document of
/// `page_count` pages. Returns `null` for a scheme name, which only the
/// server can resolve.
#[wasm_bindgen(js_name = resolvePages)]
pub fn resolve_pages(value: &str, page_count: u32) -> Result<JsValue, JsValue> {
    let spec = parse_spec(value);
    serde_wasm_bindgen::to_value(&spec.target_pages(page_count))
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Whether a submitted page value selects nothing
#[wasm_bindgen(js_name = isEmptyPageValue)]
pub fn is_empty_page_value(value: &str) -> bool {
    parse_spec(value).is_empty()
}

/// Change the console log level ("error", "warn", "info", "debug", "trace"
/// or "off").
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = logging::parse_level(level)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown log level '{}'", level)))?;
    logging::set_level(filter);
    Ok(())
}

fn parse_spec(value: &str) -> PageSpec {
    match value.parse::<PageSpec>() {
        Ok(spec) => spec,
        Err(never) => match never {},
    }
}
