use thiserror::Error;

/// Failure of one of the two read-only lookups (page count, page schemes)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Network(String),

    #[error("Server responded with status {0}")]
    Status(u16),

    #[error("Could not decode response: {0}")]
    Decode(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("No element with id '{0}'")]
    MissingElement(String),

    #[error("Element '{id}' is not a {expected}")]
    WrongElementType { id: String, expected: &'static str },

    #[error("DOM call failed: {0}")]
    Js(String),
}

#[derive(Error, Debug)]
pub enum FormError {
    #[error("Invalid widget options: {0}")]
    Options(#[from] serde_json::Error),

    #[error("Unknown widget kind: {0}")]
    UnknownWidgetKind(String),

    #[error("No widget registered for '{0}'")]
    UnknownWidget(String),

    #[error("A widget is already registered for '{0}'")]
    DuplicateWidget(String),

    #[error(transparent)]
    Dom(#[from] DomError),
}

pub type Result<T> = std::result::Result<T, FormError>;
