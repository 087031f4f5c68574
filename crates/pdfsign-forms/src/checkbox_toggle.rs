//! Checkbox-driven visibility of a list of controls.
//!
//! A ticked checkbox hides the listed controls; clearing it shows them again.
//! The checkbox state is mirrored as `"true"`/`"false"` into the hidden field
//! the form actually submits.

use crate::component::{EventBinding, FormComponent, FormEvent};
use crate::dependent_select::field_id;
use crate::dom::{tolerate, FormDom};
use crate::options::CheckboxToggleOptions;
use crate::types::Display;
use async_trait::async_trait;
use tracing::debug;

pub const COMPONENT_NAME: &str = "PDFSign.Util.ShowDependentControls";

pub fn entry_id(checkbox_field_id: &str) -> String {
    format!("{}-entry", checkbox_field_id)
}

pub fn targets_id(checkbox_field_id: &str) -> String {
    format!("{}-tohide", checkbox_field_id)
}

/// Field suffixes from the comma-delimited target list
pub fn parse_targets(list: &str) -> Vec<&str> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Mirror the checkbox and toggle its targets.
///
/// Returns the checkbox state, or `None` when the checkbox is not rendered.
pub fn show_dependent_controls<D: FormDom>(
    dom: &D,
    checkbox_field_id: &str,
    field_prefix: &str,
) -> Option<bool> {
    let checked = tolerate(dom.is_checked(&entry_id(checkbox_field_id)))?;
    tolerate(dom.set_value(checkbox_field_id, if checked { "true" } else { "false" }));

    let list = tolerate(dom.value(&targets_id(checkbox_field_id))).unwrap_or_default();
    let visibility = Display::visible(!checked);
    for name in parse_targets(&list) {
        tolerate(dom.set_parent_display(&field_id(field_prefix, name), visibility));
    }

    debug!(
        "{} is {}, controls {}",
        checkbox_field_id,
        checked,
        visibility.as_css()
    );
    Some(checked)
}

#[derive(Debug, Clone)]
pub struct CheckboxToggle<D> {
    field_id: String,
    options: CheckboxToggleOptions,
    dom: D,
}

impl<D: FormDom> CheckboxToggle<D> {
    pub fn new(checkbox_field_id: &str, options: CheckboxToggleOptions, dom: D) -> Self {
        Self {
            field_id: checkbox_field_id.to_string(),
            options,
            dom,
        }
    }

    pub fn apply(&self) -> Option<bool> {
        show_dependent_controls(&self.dom, &self.field_id, &self.options.field_prefix)
    }
}

#[async_trait(?Send)]
impl<D: FormDom> FormComponent for CheckboxToggle<D> {
    fn id(&self) -> &str {
        &self.field_id
    }

    fn component_name(&self) -> &'static str {
        COMPONENT_NAME
    }

    async fn on_ready(&self) {
        self.apply();
    }

    fn handle_event(&self, event: &FormEvent) {
        if let FormEvent::Click { target, .. } = event {
            if *target == entry_id(&self.field_id) {
                self.apply();
            }
        }
    }

    fn bindings(&self) -> Vec<EventBinding> {
        vec![EventBinding::click(entry_id(&self.field_id))]
    }
}
