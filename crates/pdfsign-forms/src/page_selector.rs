//! Page selector widget
//!
//! Resolves which page(s) a signing action applies to. The user either picks
//! page numbers from a (multi-)select filled from the document's page count,
//! or ticks "use scheme" and picks one of the server's named page schemes.
//! The resolved `PageSpec` is written to the hidden field carrying the
//! container id.

use crate::component::{EventBinding, FormComponent, FormEvent};
use crate::dom::{tolerate, FormDom};
use crate::error::FetchError;
use crate::notify::{Notifier, PAGE_COUNT_FAILED, PAGE_SCHEMES_FAILED};
use crate::options::PageSelectorOptions;
use crate::source::{PageCountResponse, PageDataSource, PageSchemesResponse};
use crate::types::{Display, PageSpec, SelectOption, ALL_PAGES, ALL_PAGES_LABEL};
use async_trait::async_trait;
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, warn};

pub const COMPONENT_NAME: &str = "PDFSign.SelectPage";

/// Upper bound on generated page options; larger counts are truncated
pub const MAX_PAGE_OPTIONS: u32 = 10_000;

/// Ids of the elements rendered for one page selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelectorIds {
    /// Hidden field receiving the resolved value
    pub output: String,
    pub pages: String,
    pub schemes: String,
    pub use_scheme: String,
    pub page_module: String,
    pub scheme_module: String,
}

impl PageSelectorIds {
    pub fn new(container_id: &str) -> Self {
        Self {
            output: container_id.to_string(),
            pages: format!("{}-pages", container_id),
            schemes: format!("{}-schemes", container_id),
            use_scheme: format!("{}-useScheme", container_id),
            page_module: format!("{}-pageModule", container_id),
            scheme_module: format!("{}-schemeModule", container_id),
        }
    }
}

/// Build the spec for the page-number control.
///
/// `primary` is the control's value (its first selected option). Selected
/// options are taken in option order, not in the order they were clicked.
pub fn page_spec_from_selection(primary: &str, options: &[SelectOption]) -> PageSpec {
    if primary == ALL_PAGES {
        return PageSpec::AllPages;
    }

    // Only positive page numbers can form a page list; the generated options
    // never carry anything else.
    let pages = options
        .iter()
        .filter(|o| o.selected)
        .filter_map(|o| match o.value.parse::<u32>() {
            Ok(page) if page > 0 => Some(page),
            _ => {
                debug!("ignoring non-page option value '{}'", o.value);
                None
            }
        })
        .collect();

    PageSpec::PageList(pages)
}

pub struct PageSelector<D, S, N> {
    ids: PageSelectorIds,
    options: PageSelectorOptions,
    dom: D,
    source: Rc<S>,
    notifier: Rc<N>,
    /// Set once the lookups have been started; shared by clones
    loaded: Rc<Cell<bool>>,
}

impl<D: Clone, S, N> Clone for PageSelector<D, S, N> {
    fn clone(&self) -> Self {
        Self {
            ids: self.ids.clone(),
            options: self.options.clone(),
            dom: self.dom.clone(),
            source: Rc::clone(&self.source),
            notifier: Rc::clone(&self.notifier),
            loaded: Rc::clone(&self.loaded),
        }
    }
}

impl<D, S, N> PageSelector<D, S, N>
where
    D: FormDom,
    S: PageDataSource,
    N: Notifier,
{
    pub fn new(
        container_id: &str,
        options: PageSelectorOptions,
        dom: D,
        source: Rc<S>,
        notifier: Rc<N>,
    ) -> Self {
        Self {
            ids: PageSelectorIds::new(container_id),
            options,
            dom,
            source,
            notifier,
            loaded: Rc::new(Cell::new(false)),
        }
    }

    /// Prepare the controls, write the initial value, then load page count
    /// and schemes.
    ///
    /// Page data is fetched once per widget. Later calls only re-resolve.
    pub async fn ready(&self) {
        if self.loaded.replace(true) {
            debug!("{} already loaded", self.ids.output);
            self.resolve_value();
            return;
        }

        if self.options.allow_multi_select {
            tolerate(self.dom.set_multiple(&self.ids.pages, true));
        }
        if self.options.show_scheme_option {
            tolerate(self.dom.set_display(&self.ids.page_module, Display::None));
        }

        self.resolve_value();
        self.load().await;
    }

    /// Run both lookups concurrently. Each result is applied as soon as it
    /// arrives; neither waits for the other.
    pub async fn load(&self) {
        let schemes = async {
            if self.options.show_scheme_option {
                self.fetch_schemes().await;
            }
        };
        futures::future::join(self.fetch_page_count(), schemes).await;
    }

    pub async fn fetch_page_count(&self) {
        let result = self.source.page_count(&self.options.document_ref).await;
        self.apply_page_count(result);
    }

    pub async fn fetch_schemes(&self) {
        let result = self.source.page_schemes(&self.options.document_ref).await;
        self.apply_schemes(result);
    }

    /// Fill the page-number control from a page count lookup.
    ///
    /// With `N > 0` pages the control gets "All Pages" followed by `1..=N`,
    /// with page `N` selected.
    pub fn apply_page_count(&self, result: Result<PageCountResponse, FetchError>) {
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    "page count lookup failed for {}: {}",
                    self.options.document_ref, e
                );
                self.notifier.notify(PAGE_COUNT_FAILED);
                return;
            }
        };

        if !self.dom.exists(&self.ids.pages) {
            debug!("page select {} is gone, dropping page count", self.ids.pages);
            return;
        }

        if response.page_count < 0 {
            warn!(
                "server could not count pages of {} (reported {})",
                self.options.document_ref, response.page_count
            );
        }

        let mut pages = response.pages();
        if pages > MAX_PAGE_OPTIONS {
            warn!(
                "{} reports {} pages, offering only the first {}",
                self.options.document_ref, pages, MAX_PAGE_OPTIONS
            );
            pages = MAX_PAGE_OPTIONS;
        }
        if pages > 0 {
            tolerate(
                self.dom
                    .add_option(&self.ids.pages, ALL_PAGES_LABEL, ALL_PAGES),
            );
            for page in 1..=pages {
                let label = page.to_string();
                tolerate(self.dom.add_option(&self.ids.pages, &label, &label));
            }
            tolerate(self.dom.set_value(&self.ids.pages, &pages.to_string()));
        }

        self.resolve_value();
    }

    /// Fill the scheme control, keeping server order
    pub fn apply_schemes(&self, result: Result<PageSchemesResponse, FetchError>) {
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    "page scheme lookup failed for {}: {}",
                    self.options.document_ref, e
                );
                self.notifier.notify(PAGE_SCHEMES_FAILED);
                return;
            }
        };

        if !self.dom.exists(&self.ids.schemes) {
            debug!("scheme select {} is gone, dropping schemes", self.ids.schemes);
            return;
        }

        for scheme in &response.schemes {
            tolerate(
                self.dom
                    .add_option(&self.ids.schemes, &scheme.name, &scheme.value),
            );
        }

        self.resolve_value();
    }

    /// Swap between the scheme control and the page-number control
    pub fn toggle_scheme_mode(&self, use_scheme: bool) {
        tolerate(
            self.dom
                .set_display(&self.ids.scheme_module, Display::visible(use_scheme)),
        );
        tolerate(
            self.dom
                .set_display(&self.ids.page_module, Display::visible(!use_scheme)),
        );
        self.resolve_value();
    }

    /// Recompute the spec from the controls and write it to the hidden field
    pub fn resolve_value(&self) -> PageSpec {
        let spec = self.current_spec();
        tolerate(self.dom.set_value(&self.ids.output, &spec.to_string()));
        debug!("{} resolved to '{}'", self.ids.output, spec);
        spec
    }

    /// Only the active control is read.
    fn current_spec(&self) -> PageSpec {
        if self.use_scheme() {
            let value = tolerate(self.dom.value(&self.ids.schemes)).unwrap_or_default();
            return if value.is_empty() {
                PageSpec::empty()
            } else {
                PageSpec::SchemeName(value)
            };
        }

        let primary = match tolerate(self.dom.value(&self.ids.pages)) {
            Some(primary) => primary,
            None => return PageSpec::empty(),
        };
        if primary == ALL_PAGES {
            return PageSpec::AllPages;
        }

        let options = tolerate(self.dom.options(&self.ids.pages)).unwrap_or_default();
        page_spec_from_selection(&primary, &options)
    }

    fn use_scheme(&self) -> bool {
        self.dom.exists(&self.ids.use_scheme)
            && tolerate(self.dom.is_checked(&self.ids.use_scheme)).unwrap_or(false)
    }
}

#[async_trait(?Send)]
impl<D, S, N> FormComponent for PageSelector<D, S, N>
where
    D: FormDom,
    S: PageDataSource,
    N: Notifier,
{
    fn id(&self) -> &str {
        &self.ids.output
    }

    fn component_name(&self) -> &'static str {
        COMPONENT_NAME
    }

    async fn on_ready(&self) {
        self.ready().await;
    }

    fn handle_event(&self, event: &FormEvent) {
        match event {
            FormEvent::Click { target, checked } if *target == self.ids.use_scheme => {
                self.toggle_scheme_mode(*checked);
            }
            FormEvent::Change { target, .. }
                if *target == self.ids.pages || *target == self.ids.schemes =>
            {
                self.resolve_value();
            }
            _ => {}
        }
    }

    fn bindings(&self) -> Vec<EventBinding> {
        vec![
            EventBinding::click(&self.ids.use_scheme),
            EventBinding::change(&self.ids.pages),
            EventBinding::change(&self.ids.schemes),
        ]
    }
}
