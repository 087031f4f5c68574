//! In-memory DOM used to drive widgets outside the browser
//!
//! Mirrors the handful of HTML behaviors the widgets rely on: a select's value
//! is its first selected option, assigning a value to a select replaces the
//! selection, and every read is logged so tests can assert which controls a
//! resolution looked at.

use super::FormDom;
use crate::error::DomError;
use crate::types::{Display, SelectOption};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone)]
enum Control {
    Input { value: String, checked: bool },
    Select { options: Vec<SelectOption>, multiple: bool },
    Container,
}

#[derive(Debug, Clone)]
struct Node {
    control: Control,
    display: Display,
    parent: Option<String>,
}

impl Node {
    fn new(control: Control) -> Self {
        Self {
            control,
            display: Display::Block,
            parent: None,
        }
    }
}

#[derive(Debug, Default)]
struct Page {
    nodes: HashMap<String, Node>,
    reads: Vec<String>,
}

/// Shared handle to an in-memory page; clones see the same elements
#[derive(Debug, Clone, Default)]
pub struct MemoryDom {
    page: Rc<RefCell<Page>>,
}

impl MemoryDom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(self, id: &str, value: &str) -> Self {
        self.insert(
            id,
            Node::new(Control::Input {
                value: value.to_string(),
                checked: false,
            }),
        );
        self
    }

    pub fn with_checkbox(self, id: &str, checked: bool) -> Self {
        self.insert(
            id,
            Node::new(Control::Input {
                value: String::new(),
                checked,
            }),
        );
        self
    }

    /// Add a select with `(text, value)` options, none selected
    pub fn with_select(self, id: &str, options: &[(&str, &str)]) -> Self {
        let options = options
            .iter()
            .map(|(text, value)| SelectOption::new(*text, *value))
            .collect();
        self.insert(
            id,
            Node::new(Control::Select {
                options,
                multiple: false,
            }),
        );
        self
    }

    pub fn with_container(self, id: &str) -> Self {
        self.insert(id, Node::new(Control::Container));
        self
    }

    /// Add a text field wrapped in its own container `{id}-container`
    pub fn with_field(self, id: &str) -> Self {
        let container = format!("{}-container", id);
        let dom = self.with_container(&container);
        let mut node = Node::new(Control::Input {
            value: String::new(),
            checked: false,
        });
        node.parent = Some(container);
        dom.insert(id, node);
        dom
    }

    pub fn remove(&self, id: &str) {
        self.page.borrow_mut().nodes.remove(id);
    }

    /// Simulate the user ticking or clearing a checkbox
    pub fn set_checked(&self, id: &str, checked: bool) {
        if let Some(Node {
            control: Control::Input { checked: c, .. },
            ..
        }) = self.page.borrow_mut().nodes.get_mut(id)
        {
            *c = checked;
        }
    }

    /// Simulate the user selecting exactly the options carrying `values`
    pub fn select_values(&self, id: &str, values: &[&str]) {
        if let Some(Node {
            control: Control::Select { options, .. },
            ..
        }) = self.page.borrow_mut().nodes.get_mut(id)
        {
            for option in options.iter_mut() {
                option.selected = values.contains(&option.value.as_str());
            }
        }
    }

    pub fn display_of(&self, id: &str) -> Option<Display> {
        self.page.borrow().nodes.get(id).map(|n| n.display)
    }

    /// Display of the container wrapping a field
    pub fn container_display_of(&self, id: &str) -> Option<Display> {
        let page = self.page.borrow();
        let parent = page.nodes.get(id)?.parent.as_ref()?;
        page.nodes.get(parent).map(|n| n.display)
    }

    pub fn value_of(&self, id: &str) -> Option<String> {
        let page = self.page.borrow();
        match &page.nodes.get(id)?.control {
            Control::Input { value, .. } => Some(value.clone()),
            Control::Select { options, .. } => Some(first_selected(options)),
            Control::Container => None,
        }
    }

    pub fn option_values(&self, id: &str) -> Vec<String> {
        self.select_options(id)
            .into_iter()
            .map(|o| o.value)
            .collect()
    }

    pub fn selected_values(&self, id: &str) -> Vec<String> {
        self.select_options(id)
            .into_iter()
            .filter(|o| o.selected)
            .map(|o| o.value)
            .collect()
    }

    pub fn is_multiple(&self, id: &str) -> bool {
        matches!(
            self.page.borrow().nodes.get(id),
            Some(Node {
                control: Control::Select { multiple: true, .. },
                ..
            })
        )
    }

    /// Ids read through `FormDom` since the last call
    pub fn take_reads(&self) -> Vec<String> {
        std::mem::take(&mut self.page.borrow_mut().reads)
    }

    fn insert(&self, id: &str, node: Node) {
        self.page.borrow_mut().nodes.insert(id.to_string(), node);
    }

    fn select_options(&self, id: &str) -> Vec<SelectOption> {
        match self.page.borrow().nodes.get(id) {
            Some(Node {
                control: Control::Select { options, .. },
                ..
            }) => options.clone(),
            _ => Vec::new(),
        }
    }

    fn record_read(&self, id: &str) {
        self.page.borrow_mut().reads.push(id.to_string());
    }

    fn with_node<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut Node) -> Result<T, DomError>,
    ) -> Result<T, DomError> {
        let mut page = self.page.borrow_mut();
        let node = page
            .nodes
            .get_mut(id)
            .ok_or_else(|| DomError::MissingElement(id.to_string()))?;
        f(node)
    }
}

fn first_selected(options: &[SelectOption]) -> String {
    options
        .iter()
        .find(|o| o.selected)
        .map(|o| o.value.clone())
        .unwrap_or_default()
}

fn wrong_type(id: &str, expected: &'static str) -> DomError {
    DomError::WrongElementType {
        id: id.to_string(),
        expected,
    }
}

impl FormDom for MemoryDom {
    fn exists(&self, id: &str) -> bool {
        self.page.borrow().nodes.contains_key(id)
    }

    fn value(&self, id: &str) -> Result<String, DomError> {
        self.record_read(id);
        self.with_node(id, |node| match &node.control {
            Control::Input { value, .. } => Ok(value.clone()),
            Control::Select { options, .. } => Ok(first_selected(options)),
            Control::Container => Err(wrong_type(id, "form control")),
        })
    }

    fn set_value(&self, id: &str, value: &str) -> Result<(), DomError> {
        self.with_node(id, |node| match &mut node.control {
            Control::Input { value: current, .. } => {
                *current = value.to_string();
                Ok(())
            }
            Control::Select { options, .. } => {
                let mut matched = false;
                for option in options.iter_mut() {
                    option.selected = !matched && option.value == value;
                    matched |= option.selected;
                }
                Ok(())
            }
            Control::Container => Err(wrong_type(id, "form control")),
        })
    }

    fn is_checked(&self, id: &str) -> Result<bool, DomError> {
        self.record_read(id);
        self.with_node(id, |node| match node.control {
            Control::Input { checked, .. } => Ok(checked),
            _ => Err(wrong_type(id, "checkbox")),
        })
    }

    fn options(&self, id: &str) -> Result<Vec<SelectOption>, DomError> {
        self.record_read(id);
        self.with_node(id, |node| match &node.control {
            Control::Select { options, .. } => Ok(options.clone()),
            _ => Err(wrong_type(id, "select")),
        })
    }

    fn add_option(&self, id: &str, text: &str, value: &str) -> Result<(), DomError> {
        self.with_node(id, |node| match &mut node.control {
            Control::Select { options, .. } => {
                options.push(SelectOption::new(text, value));
                Ok(())
            }
            _ => Err(wrong_type(id, "select")),
        })
    }

    fn set_multiple(&self, id: &str, multiple: bool) -> Result<(), DomError> {
        self.with_node(id, |node| match &mut node.control {
            Control::Select { multiple: m, .. } => {
                *m = multiple;
                Ok(())
            }
            _ => Err(wrong_type(id, "select")),
        })
    }

    fn set_display(&self, id: &str, display: Display) -> Result<(), DomError> {
        self.with_node(id, |node| {
            node.display = display;
            Ok(())
        })
    }

    fn set_parent_display(&self, id: &str, display: Display) -> Result<(), DomError> {
        let parent = self
            .with_node(id, |node| Ok(node.parent.clone()))?
            .ok_or_else(|| DomError::MissingElement(format!("parent of {}", id)))?;
        self.set_display(&parent, display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_value_is_first_selected() {
        let dom = MemoryDom::new().with_select("s", &[("A", "a"), ("B", "b"), ("C", "c")]);
        assert_eq!(dom.value("s").unwrap(), "");

        dom.select_values("s", &["c", "b"]);
        assert_eq!(dom.value("s").unwrap(), "b");
    }

    #[test]
    fn test_set_value_replaces_selection() {
        let dom = MemoryDom::new().with_select("s", &[("A", "a"), ("B", "b")]);
        dom.select_values("s", &["a", "b"]);

        dom.set_value("s", "b").unwrap();
        assert_eq!(dom.selected_values("s"), vec!["b"]);

        dom.set_value("s", "zzz").unwrap();
        assert!(dom.selected_values("s").is_empty());
    }

    #[test]
    fn test_parent_display() {
        let dom = MemoryDom::new().with_field("f");
        dom.set_parent_display("f", Display::None).unwrap();
        assert_eq!(dom.container_display_of("f"), Some(Display::None));
        assert_eq!(dom.display_of("f"), Some(Display::Block));
    }

    #[test]
    fn test_missing_element() {
        let dom = MemoryDom::new();
        assert_eq!(
            dom.value("nope"),
            Err(DomError::MissingElement("nope".to_string()))
        );
    }

    #[test]
    fn test_wrong_element_type() {
        let dom = MemoryDom::new().with_container("c");
        assert!(matches!(
            dom.is_checked("c"),
            Err(DomError::WrongElementType { .. })
        ));
    }

    #[test]
    fn test_reads_are_recorded() {
        let dom = MemoryDom::new().with_input("a", "1").with_checkbox("b", true);
        let _ = dom.value("a");
        let _ = dom.is_checked("b");
        assert_eq!(dom.take_reads(), vec!["a", "b"]);
        assert!(dom.take_reads().is_empty());
    }
}
