//! DOM listeners feeding widget events

use pdfsign_forms::{EventKind, FormComponent, FormEvent};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlInputElement, HtmlSelectElement};

/// Attach a listener for every binding the widget declares.
///
/// Elements that are not rendered are skipped. Returns the number of
/// listeners attached.
pub fn bind_events(
    document: &Document,
    component: &Rc<dyn FormComponent>,
) -> Result<u32, JsValue> {
    let mut bound = 0;

    for binding in component.bindings() {
        let Some(element) = document.get_element_by_id(&binding.element_id) else {
            tracing::debug!(
                "{}: no element {} to listen on",
                component.id(),
                binding.element_id
            );
            continue;
        };

        let kind = binding.kind;
        let target = binding.element_id.clone();
        let handler_component = Rc::clone(component);
        let handler = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if let Some(form_event) = form_event(kind, &target, &event) {
                handler_component.handle_event(&form_event);
            }
        });

        element
            .add_event_listener_with_callback(kind.dom_name(), handler.as_ref().unchecked_ref())?;
        // Listeners live as long as the page
        handler.forget();
        bound += 1;
    }

    Ok(bound)
}

/// Read the state a widget needs off the element that fired
fn form_event(kind: EventKind, target: &str, event: &Event) -> Option<FormEvent> {
    let element = event.current_target()?;

    match kind {
        EventKind::Click => {
            let input = element.dyn_ref::<HtmlInputElement>()?;
            Some(FormEvent::click(target, input.checked()))
        }
        EventKind::Change => {
            let value = if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
                select.value()
            } else if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
                input.value()
            } else {
                return None;
            };
            Some(FormEvent::change(target, value))
        }
    }
}
