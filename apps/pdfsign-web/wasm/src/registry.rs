//! JavaScript-facing widget registry
//!
//! The host page creates one `FormRegistry` and registers each widget by the
//! container id its template rendered:
//!
//! ```javascript
//! const forms = new FormRegistry(Alfresco.constants.PROXY_URI,
//!     (text) => Alfresco.util.PopupManager.displayMessage({ text }));
//! forms.create("PDFSign.SelectPage", htmlId, { nodeRef, showPageScheme: "true" });
//! await forms.ready(htmlId);
//! ```

use crate::dom::WebDom;
use crate::events::bind_events;
use crate::notify::PopupNotifier;
use crate::transport::HttpPageSource;
use pdfsign_forms::{
    EndpointConfig, FormComponent, FormEvent, WidgetFactory, WidgetKind, WidgetRegistry,
    WidgetSpec,
};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Options may arrive as a JSON string or as a plain object
fn options_value(options: JsValue) -> Result<serde_json::Value, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(serde_json::Value::Null);
    }
    if let Some(json) = options.as_string() {
        return serde_json::from_str(&json)
            .map_err(|e| JsValue::from_str(&format!("Invalid options JSON: {}", e)));
    }
    serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsValue::from_str(&format!("Invalid options: {}", e)))
}

#[wasm_bindgen]
pub struct FormRegistry {
    dom: WebDom,
    factory: WidgetFactory<WebDom, HttpPageSource, PopupNotifier>,
    registry: WidgetRegistry,
}

#[wasm_bindgen]
impl FormRegistry {
    /// `proxy_uri` defaults to the Share proxy; `notify` receives user
    /// messages, falling back to a built-in popup.
    #[wasm_bindgen(constructor)]
    pub fn new(
        proxy_uri: Option<String>,
        notify: Option<js_sys::Function>,
    ) -> Result<FormRegistry, JsValue> {
        let dom = WebDom::new()?;
        let endpoints = proxy_uri.map(EndpointConfig::new).unwrap_or_default();
        let factory = WidgetFactory::new(
            dom.clone(),
            Rc::new(HttpPageSource::new(endpoints)),
            Rc::new(PopupNotifier::new(notify)),
        );

        Ok(Self {
            dom,
            factory,
            registry: WidgetRegistry::new(),
        })
    }

    /// Construct a widget and wire its DOM listeners. Nothing is fetched
    /// until `ready`.
    #[wasm_bindgen]
    pub fn create(&mut self, kind: &str, id: &str, options: JsValue) -> Result<(), JsValue> {
        let kind: WidgetKind = kind.parse().map_err(to_js)?;
        let spec = WidgetSpec::new(kind, id, options_value(options)?);
        let component = self.factory.build(&spec).map_err(to_js)?;

        self.registry
            .register(Rc::clone(&component))
            .map_err(to_js)?;
        bind_events(self.dom.document(), &component)?;
        Ok(())
    }

    /// Resolves once the widget's initial state is written and its lookups
    /// have settled.
    #[wasm_bindgen]
    pub fn ready(&self, id: &str) -> Result<js_sys::Promise, JsValue> {
        let component = self
            .registry
            .get(id)
            .ok_or_else(|| JsValue::from_str(&format!("No widget registered for '{}'", id)))?;

        Ok(future_to_promise(async move {
            component.on_ready().await;
            Ok(JsValue::UNDEFINED)
        }))
    }

    #[wasm_bindgen(js_name = readyAll)]
    pub fn ready_all(&self) -> js_sys::Promise {
        let components: Vec<Rc<dyn FormComponent>> = self
            .registry
            .ids()
            .iter()
            .filter_map(|id| self.registry.get(id))
            .collect();

        future_to_promise(async move {
            futures::future::join_all(components.iter().map(|c| c.on_ready())).await;
            Ok(JsValue::UNDEFINED)
        })
    }

    #[wasm_bindgen(js_name = dispatchChange)]
    pub fn dispatch_change(&self, id: &str, target: &str, value: &str) -> Result<(), JsValue> {
        self.registry
            .dispatch(id, &FormEvent::change(target, value))
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = dispatchClick)]
    pub fn dispatch_click(&self, id: &str, target: &str, checked: bool) -> Result<(), JsValue> {
        self.registry
            .dispatch(id, &FormEvent::click(target, checked))
            .map_err(to_js)
    }

    /// Forget a widget. Listeners already attached stay on their elements
    /// and are dropped with them.
    #[wasm_bindgen]
    pub fn remove(&mut self, id: &str) -> bool {
        self.registry.remove(id).is_some()
    }

    #[wasm_bindgen]
    pub fn ids(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.registry.ids())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    #[wasm_bindgen(getter)]
    pub fn size(&self) -> u32 {
        self.registry.len() as u32
    }
}
