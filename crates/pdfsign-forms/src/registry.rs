//! Widget construction and lookup by container id
//!
//! The host page owns a `WidgetRegistry` and a `WidgetFactory`; there is no
//! process-wide widget namespace.

use crate::checkbox_toggle::{self, CheckboxToggle};
use crate::component::{FormComponent, FormEvent};
use crate::dependent_select::{self, DependentSelect};
use crate::dom::FormDom;
use crate::error::{FormError, Result};
use crate::notify::Notifier;
use crate::page_selector::{self, PageSelector};
use crate::source::PageDataSource;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::rc::Rc;
use std::str::FromStr;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum WidgetKind {
    PageSelector,
    DependentSelect,
    CheckboxToggle,
}

impl WidgetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            WidgetKind::PageSelector => "page-selector",
            WidgetKind::DependentSelect => "dependent-select",
            WidgetKind::CheckboxToggle => "checkbox-toggle",
        }
    }
}

impl FromStr for WidgetKind {
    type Err = FormError;

    /// Accepts the short names and the component names used by the form
    /// templates.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "page-selector" | page_selector::COMPONENT_NAME => Ok(WidgetKind::PageSelector),
            "dependent-select" | dependent_select::COMPONENT_NAME => {
                Ok(WidgetKind::DependentSelect)
            }
            "checkbox-toggle" | checkbox_toggle::COMPONENT_NAME => Ok(WidgetKind::CheckboxToggle),
            other => Err(FormError::UnknownWidgetKind(other.to_string())),
        }
    }
}

impl TryFrom<String> for WidgetKind {
    type Error = FormError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<WidgetKind> for String {
    fn from(kind: WidgetKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Declarative description of one widget on the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetSpec {
    pub kind: WidgetKind,
    pub id: String,
    #[serde(default)]
    pub options: serde_json::Value,
}

impl WidgetSpec {
    pub fn new(kind: WidgetKind, id: impl Into<String>, options: serde_json::Value) -> Self {
        Self {
            kind,
            id: id.into(),
            options,
        }
    }

    fn decode_options<T: serde::de::DeserializeOwned + Default>(&self) -> Result<T> {
        if self.options.is_null() {
            return Ok(T::default());
        }
        Ok(T::deserialize(&self.options)?)
    }
}

/// Builds widgets that share one set of collaborators
pub struct WidgetFactory<D, S, N> {
    dom: D,
    source: Rc<S>,
    notifier: Rc<N>,
}

impl<D, S, N> WidgetFactory<D, S, N>
where
    D: FormDom + Clone + 'static,
    S: PageDataSource + 'static,
    N: Notifier + 'static,
{
    pub fn new(dom: D, source: Rc<S>, notifier: Rc<N>) -> Self {
        Self {
            dom,
            source,
            notifier,
        }
    }

    pub fn build(&self, spec: &WidgetSpec) -> Result<Rc<dyn FormComponent>> {
        let component: Rc<dyn FormComponent> = match spec.kind {
            WidgetKind::PageSelector => Rc::new(PageSelector::new(
                &spec.id,
                spec.decode_options()?,
                self.dom.clone(),
                Rc::clone(&self.source),
                Rc::clone(&self.notifier),
            )),
            WidgetKind::DependentSelect => Rc::new(DependentSelect::new(
                &spec.id,
                spec.decode_options()?,
                self.dom.clone(),
            )),
            WidgetKind::CheckboxToggle => Rc::new(CheckboxToggle::new(
                &spec.id,
                spec.decode_options()?,
                self.dom.clone(),
            )),
        };
        debug!("built {} for {}", component.component_name(), spec.id);
        Ok(component)
    }
}

#[derive(Default)]
pub struct WidgetRegistry {
    widgets: HashMap<String, Rc<dyn FormComponent>>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, component: Rc<dyn FormComponent>) -> Result<()> {
        let id = component.id().to_string();
        if self.widgets.contains_key(&id) {
            return Err(FormError::DuplicateWidget(id));
        }
        info!("registered {} for {}", component.component_name(), id);
        self.widgets.insert(id, component);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<Rc<dyn FormComponent>> {
        self.widgets.get(id).cloned()
    }

    pub fn remove(&mut self, id: &str) -> Option<Rc<dyn FormComponent>> {
        self.widgets.remove(id)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.widgets.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn dispatch(&self, id: &str, event: &FormEvent) -> Result<()> {
        let component = self
            .widgets
            .get(id)
            .ok_or_else(|| FormError::UnknownWidget(id.to_string()))?;
        component.handle_event(event);
        Ok(())
    }

    pub async fn ready(&self, id: &str) -> Result<()> {
        let component = self
            .get(id)
            .ok_or_else(|| FormError::UnknownWidget(id.to_string()))?;
        component.on_ready().await;
        Ok(())
    }

    /// Ready every widget; widgets do not wait on each other
    pub async fn ready_all(&self) {
        let pending = self.widgets.values().map(|component| component.on_ready());
        futures::future::join_all(pending).await;
    }
}
