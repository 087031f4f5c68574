//! Shows and hides form fields from the value of a driving select

use crate::component::{EventBinding, FormComponent, FormEvent};
use crate::dom::{tolerate, FormDom};
use crate::options::DependentSelectOptions;
use crate::types::{DependentFieldRule, Display};
use async_trait::async_trait;
use tracing::debug;

pub const COMPONENT_NAME: &str = "PDFSign.DependentSelect";

/// Id of a dependent field: `{prefix}_{suffix}`
pub fn field_id(field_prefix: &str, suffix: &str) -> String {
    format!("{}_{}", field_prefix, suffix)
}

/// Apply every rule in order: fields of a rule whose trigger equals
/// `current_value` are shown, all others hidden. Each write overwrites the
/// previous one, so a field named by several rules ends up as the last rule
/// left it.
pub fn apply_config<D: FormDom>(
    dom: &D,
    config: &[DependentFieldRule],
    current_value: &str,
    field_prefix: &str,
) {
    for rule in config {
        let visibility = Display::visible(rule.trigger_value == current_value);
        for field in &rule.fields {
            tolerate(dom.set_parent_display(&field_id(field_prefix, field), visibility));
        }
    }
}

#[derive(Debug, Clone)]
pub struct DependentSelect<D> {
    id: String,
    options: DependentSelectOptions,
    dom: D,
}

impl<D: FormDom> DependentSelect<D> {
    pub fn new(container_id: &str, options: DependentSelectOptions, dom: D) -> Self {
        Self {
            id: container_id.to_string(),
            options,
            dom,
        }
    }

    /// Apply the rules for whatever the select currently holds, so a value
    /// pre-selected by the server is respected.
    pub fn apply_current(&self) {
        match tolerate(self.dom.value(&self.id)) {
            Some(value) => self.on_change(&value),
            None => debug!("driving select {} not rendered", self.id),
        }
    }

    pub fn on_change(&self, new_value: &str) {
        debug!("{} changed to '{}'", self.id, new_value);
        apply_config(
            &self.dom,
            &self.options.config,
            new_value,
            &self.options.field_prefix,
        );
    }
}

#[async_trait(?Send)]
impl<D: FormDom> FormComponent for DependentSelect<D> {
    fn id(&self) -> &str {
        &self.id
    }

    fn component_name(&self) -> &'static str {
        COMPONENT_NAME
    }

    async fn on_ready(&self) {
        self.apply_current();
    }

    fn handle_event(&self, event: &FormEvent) {
        if let FormEvent::Change { target, value } = event {
            if *target == self.id {
                self.on_change(value);
            }
        }
    }

    fn bindings(&self) -> Vec<EventBinding> {
        vec![EventBinding::change(&self.id)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;
    use futures::executor::block_on;

    fn dom() -> MemoryDom {
        MemoryDom::new()
            .with_select("mode", &[("X", "x"), ("Y", "y")])
            .with_field("p_a")
            .with_field("p_b")
            .with_field("p_c")
    }

    fn widget(dom: &MemoryDom, config: Vec<DependentFieldRule>) -> DependentSelect<MemoryDom> {
        DependentSelect::new(
            "mode",
            DependentSelectOptions {
                config,
                field_prefix: "p".to_string(),
            },
            dom.clone(),
        )
    }

    fn visible(dom: &MemoryDom, field: &str) -> bool {
        dom.container_display_of(field)
            .map(Display::is_visible)
            .unwrap_or(false)
    }

    #[test]
    fn test_field_id() {
        assert_eq!(field_id("form_prop", "position"), "form_prop_position");
    }

    #[test]
    fn test_ready_respects_server_selection() {
        let dom = dom();
        dom.set_value("mode", "y").unwrap();
        let widget = widget(
            &dom,
            vec![
                DependentFieldRule::new("x", ["a", "b"]),
                DependentFieldRule::new("y", ["c"]),
            ],
        );

        block_on(widget.on_ready());

        assert!(!visible(&dom, "p_a"));
        assert!(!visible(&dom, "p_b"));
        assert!(visible(&dom, "p_c"));
    }

    #[test]
    fn test_last_rule_wins_for_shared_field() {
        let dom = dom();
        let widget = widget(
            &dom,
            vec![
                DependentFieldRule::new("x", ["a"]),
                DependentFieldRule::new("y", ["a"]),
            ],
        );

        widget.on_change("x");
        assert!(!visible(&dom, "p_a"));

        widget.on_change("y");
        assert!(visible(&dom, "p_a"));
    }

    #[test]
    fn test_missing_field_is_skipped() {
        let dom = dom();
        let widget = widget(&dom, vec![DependentFieldRule::new("x", ["gone", "a"])]);

        widget.on_change("x");

        assert!(visible(&dom, "p_a"));
    }

    #[test]
    fn test_missing_select_leaves_fields_alone() {
        let dom = MemoryDom::new().with_field("p_a");
        let widget = widget(&dom, vec![DependentFieldRule::new("x", ["a"])]);

        block_on(widget.on_ready());

        assert_eq!(dom.container_display_of("p_a"), Some(Display::Block));
    }

    #[test]
    fn test_change_event_for_other_element_ignored() {
        let dom = dom();
        let widget = widget(&dom, vec![DependentFieldRule::new("x", ["a"])]);

        widget.handle_event(&FormEvent::change("other", "y"));

        assert!(visible(&dom, "p_a"));
    }
}
