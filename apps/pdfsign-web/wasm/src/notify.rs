//! Transient popup messages

use pdfsign_forms::Notifier;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

const MESSAGE_CLASS: &str = "pdfsign-message";
const DISPLAY_MS: i32 = 2500;

/// Shows messages through a host callback when one is given (for example the
/// page's own popup manager), otherwise as a self-removing status element.
#[derive(Debug, Clone, Default)]
pub struct PopupNotifier {
    callback: Option<js_sys::Function>,
}

impl PopupNotifier {
    pub fn new(callback: Option<js_sys::Function>) -> Self {
        Self { callback }
    }

    fn show_popup(&self, message: &str) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("No window")?;
        let document = window.document().ok_or("No document")?;
        let body = document.body().ok_or("No body")?;

        let popup = document.create_element("div")?;
        popup.set_class_name(MESSAGE_CLASS);
        popup.set_attribute("role", "status")?;
        popup.set_text_content(Some(message));
        body.append_child(&popup)?;

        let remove = Closure::once_into_js(move || popup.remove());
        window.set_timeout_with_callback_and_timeout_and_arguments_0(
            remove.unchecked_ref(),
            DISPLAY_MS,
        )?;
        Ok(())
    }
}

impl Notifier for PopupNotifier {
    fn notify(&self, message: &str) {
        tracing::info!("notify: {}", message);

        let shown = match &self.callback {
            Some(callback) => callback
                .call1(&JsValue::NULL, &JsValue::from_str(message))
                .map(|_| ()),
            None => self.show_popup(message),
        };
        if let Err(e) = shown {
            tracing::error!("could not show message '{}': {:?}", message, e);
        }
    }
}
