//! Interface shared by every form widget

use async_trait::async_trait;

/// Kind of DOM event a widget listens for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Change,
    Click,
}

impl EventKind {
    pub fn dom_name(self) -> &'static str {
        match self {
            EventKind::Change => "change",
            EventKind::Click => "click",
        }
    }
}

/// An element a widget wants to hear from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventBinding {
    pub element_id: String,
    pub kind: EventKind,
}

impl EventBinding {
    pub fn change(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            kind: EventKind::Change,
        }
    }

    pub fn click(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            kind: EventKind::Click,
        }
    }
}

/// User interaction, already reduced to the state the widgets need
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Change { target: String, value: String },
    Click { target: String, checked: bool },
}

impl FormEvent {
    pub fn change(target: impl Into<String>, value: impl Into<String>) -> Self {
        FormEvent::Change {
            target: target.into(),
            value: value.into(),
        }
    }

    pub fn click(target: impl Into<String>, checked: bool) -> Self {
        FormEvent::Click {
            target: target.into(),
            checked,
        }
    }

    pub fn target(&self) -> &str {
        match self {
            FormEvent::Change { target, .. } | FormEvent::Click { target, .. } => target,
        }
    }
}

/// A widget bound to one container id.
///
/// Construction takes the container id and options; nothing touches the page
/// until `on_ready`.
#[async_trait(?Send)]
pub trait FormComponent {
    /// Container id the widget was created with
    fn id(&self) -> &str;

    /// Name the host page templates use for this component
    fn component_name(&self) -> &'static str;

    /// Compute the initial state, fetching remote data if the widget needs it
    async fn on_ready(&self);

    /// Re-run the widget's resolution for an event. Events aimed at elements
    /// the widget does not own are ignored.
    fn handle_event(&self, event: &FormEvent);

    /// Elements whose events should be routed to `handle_event`
    fn bindings(&self) -> Vec<EventBinding>;
}
