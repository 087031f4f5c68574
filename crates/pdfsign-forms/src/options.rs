//! Widget options as rendered by the host page, plus endpoint configuration
//!
//! Field names follow the option objects the form templates emit, so the
//! JSON the page already produces deserializes without a translation layer.

use crate::types::DependentFieldConfig;
use serde::{Deserialize, Deserializer, Serialize};

/// Proxy prefix the Share tier routes repository web scripts through
pub const DEFAULT_PROXY_URI: &str = "/share/proxy/alfresco/";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSelectorOptions {
    /// Opaque reference of the PDF document
    #[serde(rename = "nodeRef", alias = "documentRef", default)]
    pub document_ref: String,

    #[serde(rename = "showPageScheme", default, deserialize_with = "flag")]
    pub show_scheme_option: bool,

    #[serde(rename = "allowMultiPageSelect", default, deserialize_with = "flag")]
    pub allow_multi_select: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependentSelectOptions {
    #[serde(rename = "showSelectValues", default)]
    pub config: DependentFieldConfig,

    /// Prefix joined to each field suffix with `_`
    #[serde(rename = "htmlId", alias = "fieldPrefix", default)]
    pub field_prefix: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckboxToggleOptions {
    #[serde(rename = "htmlIdPrefix", alias = "fieldPrefix", default)]
    pub field_prefix: String,
}

/// Where the two lookups are served from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    #[serde(rename = "proxyUri", default = "default_proxy_uri")]
    pub proxy_uri: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            proxy_uri: default_proxy_uri(),
        }
    }
}

impl EndpointConfig {
    pub fn new(proxy_uri: impl Into<String>) -> Self {
        Self {
            proxy_uri: proxy_uri.into(),
        }
    }

    /// Page count lookup. `encoded_ref` must already be URI-component encoded.
    pub fn page_count_url(&self, encoded_ref: &str) -> String {
        format!("{}pdfsign/pagecount?nodeRef={}", self.base(), encoded_ref)
    }

    /// Page scheme lookup. `encoded_ref` must already be URI-component encoded.
    pub fn page_schemes_url(&self, encoded_ref: &str) -> String {
        format!("{}pdfsign/pageschemes?nodeRef={}", self.base(), encoded_ref)
    }

    fn base(&self) -> String {
        if self.proxy_uri.ends_with('/') {
            self.proxy_uri.clone()
        } else {
            format!("{}/", self.proxy_uri)
        }
    }
}

fn default_proxy_uri() -> String {
    DEFAULT_PROXY_URI.to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Bool(bool),
    Text(String),
}

/// Templates render these flags as the strings `"true"`/`"false"`; script
/// callers pass booleans. Only `true` and the exact string `"true"` enable.
fn flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawFlag>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawFlag::Bool(value)) => value,
        Some(RawFlag::Text(text)) => text == "true",
        None => false,
    })
}
