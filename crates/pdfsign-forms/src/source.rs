//! The two read-only lookups behind the page selector

use crate::error::FetchError;
use crate::types::SchemeOption;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::cell::Cell;

/// Body of the page count lookup.
///
/// The server reports `-1` when it could not read the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCountResponse {
    #[serde(rename = "pageCount")]
    pub page_count: i64,
}

impl PageCountResponse {
    /// Page count with server error markers folded into zero
    pub fn pages(&self) -> u32 {
        u32::try_from(self.page_count.max(0)).unwrap_or(u32::MAX)
    }
}

/// Body of the page scheme lookup, schemes in server order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSchemesResponse {
    #[serde(default)]
    pub schemes: Vec<SchemeOption>,
}

/// Exactly one result per call; no retries, no streaming.
#[async_trait(?Send)]
pub trait PageDataSource {
    async fn page_count(&self, document_ref: &str) -> Result<PageCountResponse, FetchError>;

    async fn page_schemes(&self, document_ref: &str) -> Result<PageSchemesResponse, FetchError>;
}

/// Source that answers every call with fixed results
#[derive(Debug)]
pub struct StaticPageSource {
    page_count: Result<PageCountResponse, FetchError>,
    schemes: Result<PageSchemesResponse, FetchError>,
    count_calls: Cell<u32>,
    scheme_calls: Cell<u32>,
}

impl StaticPageSource {
    pub fn new(page_count: i64, schemes: Vec<SchemeOption>) -> Self {
        Self {
            page_count: Ok(PageCountResponse { page_count }),
            schemes: Ok(PageSchemesResponse { schemes }),
            count_calls: Cell::new(0),
            scheme_calls: Cell::new(0),
        }
    }

    pub fn failing_page_count(mut self, error: FetchError) -> Self {
        self.page_count = Err(error);
        self
    }

    pub fn failing_schemes(mut self, error: FetchError) -> Self {
        self.schemes = Err(error);
        self
    }

    pub fn page_count_calls(&self) -> u32 {
        self.count_calls.get()
    }

    pub fn scheme_calls(&self) -> u32 {
        self.scheme_calls.get()
    }
}

#[async_trait(?Send)]
impl PageDataSource for StaticPageSource {
    async fn page_count(&self, _document_ref: &str) -> Result<PageCountResponse, FetchError> {
        self.count_calls.set(self.count_calls.get() + 1);
        self.page_count.clone()
    }

    async fn page_schemes(&self, _document_ref: &str) -> Result<PageSchemesResponse, FetchError> {
        self.scheme_calls.set(self.scheme_calls.get() + 1);
        self.schemes.clone()
    }
}
