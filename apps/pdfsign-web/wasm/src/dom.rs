//! `FormDom` over the live browser document

use pdfsign_forms::{Display, DomError, FormDom, SelectOption};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, HtmlInputElement, HtmlOptionElement, HtmlSelectElement,
};

#[derive(Debug, Clone)]
pub struct WebDom {
    document: Document,
}

impl WebDom {
    /// Bind to the current window's document
    ///
    /// # Errors
    /// Returns JsValue error if there is no window or document
    pub fn new() -> Result<Self, JsValue> {
        let window =
            web_sys::window().ok_or_else(|| JsValue::from_str("No window object available"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("No document object available"))?;
        Ok(Self { document })
    }

    pub fn from_document(document: Document) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn element(&self, id: &str) -> Result<Element, DomError> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| DomError::MissingElement(id.to_string()))
    }

    fn select(&self, id: &str) -> Result<HtmlSelectElement, DomError> {
        self.element(id)?
            .dyn_into::<HtmlSelectElement>()
            .map_err(|_| wrong_type(id, "select"))
    }

    fn input(&self, id: &str) -> Result<HtmlInputElement, DomError> {
        self.element(id)?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| wrong_type(id, "input"))
    }
}

fn wrong_type(id: &str, expected: &'static str) -> DomError {
    DomError::WrongElementType {
        id: id.to_string(),
        expected,
    }
}

fn js_error(e: JsValue) -> DomError {
    DomError::Js(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

fn set_element_display(element: Element, id: &str, display: Display) -> Result<(), DomError> {
    let element = element
        .dyn_into::<HtmlElement>()
        .map_err(|_| wrong_type(id, "HTML element"))?;
    element
        .style()
        .set_property("display", display.as_css())
        .map_err(js_error)
}

impl FormDom for WebDom {
    fn exists(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn value(&self, id: &str) -> Result<String, DomError> {
        let element = self.element(id)?;
        if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            return Ok(select.value());
        }
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            return Ok(input.value());
        }
        Err(wrong_type(id, "form control"))
    }

    fn set_value(&self, id: &str, value: &str) -> Result<(), DomError> {
        let element = self.element(id)?;
        if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
            return Ok(());
        }
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
            return Ok(());
        }
        Err(wrong_type(id, "form control"))
    }

    fn is_checked(&self, id: &str) -> Result<bool, DomError> {
        Ok(self.input(id)?.checked())
    }

    fn options(&self, id: &str) -> Result<Vec<SelectOption>, DomError> {
        let select = self.select(id)?;
        let options = (0..select.length())
            .filter_map(|index| select.item(index))
            .filter_map(|element| element.dyn_into::<HtmlOptionElement>().ok())
            .map(|option| SelectOption {
                text: option.text(),
                value: option.value(),
                selected: option.selected(),
            })
            .collect();
        Ok(options)
    }

    fn add_option(&self, id: &str, text: &str, value: &str) -> Result<(), DomError> {
        let select = self.select(id)?;
        let option = HtmlOptionElement::new_with_text_and_value(text, value).map_err(js_error)?;
        select
            .add_with_html_option_element(&option)
            .map_err(js_error)
    }

    fn set_multiple(&self, id: &str, multiple: bool) -> Result<(), DomError> {
        self.select(id)?.set_multiple(multiple);
        Ok(())
    }

    fn set_display(&self, id: &str, display: Display) -> Result<(), DomError> {
        set_element_display(self.element(id)?, id, display)
    }

    fn set_parent_display(&self, id: &str, display: Display) -> Result<(), DomError> {
        let parent = self
            .element(id)?
            .parent_element()
            .ok_or_else(|| DomError::MissingElement(format!("parent of {}", id)))?;
        set_element_display(parent, id, display)
    }
}
