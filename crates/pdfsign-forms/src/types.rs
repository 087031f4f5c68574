//! Value types shared by the widgets
//!
//! `PageSpec` is the single string the page selector submits to the server.
//! Everything else here is a snapshot of host page state or server data.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Option value that stands for every page of the document
pub const ALL_PAGES: &str = "all";

/// Label of the generated "all pages" option
pub const ALL_PAGES_LABEL: &str = "All Pages";

/// Which page(s) a signing action applies to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSpec {
    AllPages,
    /// Selected page numbers in option order. Empty means nothing selected.
    PageList(Vec<u32>),
    SchemeName(String),
}

impl PageSpec {
    /// The value written when nothing usable is selected
    pub fn empty() -> Self {
        PageSpec::PageList(Vec::new())
    }

    /// True when the spec serializes to an empty string.
    ///
    /// The host page must reject an empty resolution before submitting.
    pub fn is_empty(&self) -> bool {
        match self {
            PageSpec::AllPages => false,
            PageSpec::PageList(pages) => pages.is_empty(),
            PageSpec::SchemeName(name) => name.is_empty(),
        }
    }

    /// Map the spec onto concrete pages of a document with `page_count` pages.
    ///
    /// Out-of-range pages fall back to the last page, the same rule the
    /// signing service applies to a bad page parameter. Duplicates produced by
    /// that fallback are dropped, first occurrence wins. Schemes are evaluated
    /// server-side, so they yield `None`.
    pub fn target_pages(&self, page_count: u32) -> Option<Vec<u32>> {
        match self {
            PageSpec::AllPages => Some((1..=page_count).collect()),
            PageSpec::PageList(pages) => {
                if page_count == 0 {
                    return Some(Vec::new());
                }
                let mut seen = BTreeSet::new();
                let targets = pages
                    .iter()
                    .map(|&page| {
                        if (1..=page_count).contains(&page) {
                            page
                        } else {
                            page_count
                        }
                    })
                    .filter(|page| seen.insert(*page))
                    .collect();
                Some(targets)
            }
            PageSpec::SchemeName(_) => None,
        }
    }
}

impl Default for PageSpec {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for PageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSpec::AllPages => f.write_str(ALL_PAGES),
            PageSpec::PageList(pages) => {
                let joined = pages
                    .iter()
                    .map(|p| p.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                f.write_str(&joined)
            }
            PageSpec::SchemeName(name) => f.write_str(name),
        }
    }
}

impl FromStr for PageSpec {
    type Err = Infallible;

    /// Parse a submitted value back into a spec.
    ///
    /// A scheme whose identifier is a comma list of page numbers cannot be
    /// told apart from a page list and parses as one.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_PAGES {
            return Ok(PageSpec::AllPages);
        }
        if s.is_empty() {
            return Ok(PageSpec::empty());
        }

        let pages: Option<Vec<u32>> = s
            .split(',')
            .map(|part| part.trim().parse::<u32>().ok().filter(|p| *p > 0))
            .collect();

        Ok(match pages {
            Some(pages) => PageSpec::PageList(pages),
            None => PageSpec::SchemeName(s.to_string()),
        })
    }
}

/// A named page scheme offered by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeOption {
    /// Display label
    pub name: String,
    /// Identifier submitted when the scheme is chosen
    pub value: String,
}

/// Snapshot of one `<option>` of a select control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub text: String,
    pub value: String,
    pub selected: bool,
}

impl SelectOption {
    pub fn new(text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: value.into(),
            selected: false,
        }
    }
}

/// CSS `display` value written by the widgets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Display {
    #[default]
    Block,
    None,
}

impl Display {
    pub fn visible(visible: bool) -> Self {
        if visible {
            Display::Block
        } else {
            Display::None
        }
    }

    pub fn is_visible(self) -> bool {
        self == Display::Block
    }

    pub fn as_css(self) -> &'static str {
        match self {
            Display::Block => "block",
            Display::None => "none",
        }
    }
}

/// One show/hide rule of a dependent select.
///
/// The host page names the trigger value `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependentFieldRule {
    #[serde(rename = "name", alias = "triggerValue")]
    pub trigger_value: String,
    /// Field name suffixes, resolved against the widget's field prefix
    #[serde(default)]
    pub fields: Vec<String>,
}

impl DependentFieldRule {
    pub fn new<I, S>(trigger_value: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            trigger_value: trigger_value.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

/// Ordered rules; when two rules touch one field the later one wins
pub type DependentFieldConfig = Vec<DependentFieldRule>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_all_pages() {
        assert_eq!(PageSpec::AllPages.to_string(), "all");
    }

    #[test]
    fn test_display_page_list() {
        assert_eq!(PageSpec::PageList(vec![2, 3, 5]).to_string(), "2,3,5");
        assert_eq!(PageSpec::empty().to_string(), "");
    }

    #[test]
    fn test_display_scheme() {
        let spec = PageSpec::SchemeName("last".to_string());
        assert_eq!(spec.to_string(), "last");
    }

    #[test]
    fn test_parse_values() {
        assert_eq!("all".parse::<PageSpec>().unwrap(), PageSpec::AllPages);
        assert_eq!("".parse::<PageSpec>().unwrap(), PageSpec::empty());
        assert_eq!(
            "4,1".parse::<PageSpec>().unwrap(),
            PageSpec::PageList(vec![4, 1])
        );
        assert_eq!(
            "first".parse::<PageSpec>().unwrap(),
            PageSpec::SchemeName("first".to_string())
        );
    }

    #[test]
    fn test_parse_zero_page_is_scheme() {
        assert_eq!(
            "0,2".parse::<PageSpec>().unwrap(),
            PageSpec::SchemeName("0,2".to_string())
        );
    }

    #[test]
    fn test_is_empty() {
        assert!(PageSpec::empty().is_empty());
        assert!(PageSpec::SchemeName(String::new()).is_empty());
        assert!(!PageSpec::AllPages.is_empty());
        assert!(!PageSpec::PageList(vec![1]).is_empty());
    }

    #[test]
    fn test_target_pages_all() {
        assert_eq!(PageSpec::AllPages.target_pages(3), Some(vec![1, 2, 3]));
        assert_eq!(PageSpec::AllPages.target_pages(0), Some(vec![]));
    }

    #[test]
    fn test_target_pages_clamps_to_last_page() {
        let spec = PageSpec::PageList(vec![2, 9, 4]);
        assert_eq!(spec.target_pages(4), Some(vec![2, 4]));
    }

    #[test]
    fn test_target_pages_scheme_is_server_side() {
        let spec = PageSpec::SchemeName("odd".to_string());
        assert_eq!(spec.target_pages(10), None);
    }

    #[test]
    fn test_display_css() {
        assert_eq!(Display::visible(true).as_css(), "block");
        assert_eq!(Display::visible(false).as_css(), "none");
    }

    #[test]
    fn test_rule_deserializes_host_shape() {
        let json = r#"{"name":"visible","fields":["position","locationX"]}"#;
        let rule: DependentFieldRule = serde_json::from_str(json).unwrap();
        assert_eq!(
            rule,
            DependentFieldRule::new("visible", ["position", "locationX"])
        );
    }
}
