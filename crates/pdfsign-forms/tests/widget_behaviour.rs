//! End-to-end widget behavior against the in-memory DOM

use async_trait::async_trait;
use futures::channel::oneshot;
use futures::executor::{block_on, LocalPool};
use futures::task::LocalSpawnExt;
use pdfsign_forms::notify::{PAGE_COUNT_FAILED, PAGE_SCHEMES_FAILED};
use pdfsign_forms::{
    apply_config, show_dependent_controls, DependentFieldRule, Display, FetchError, FormDom,
    MemoryDom, PageCountResponse, PageDataSource, PageSchemesResponse, PageSelector,
    PageSelectorOptions, PageSpec, RecordingNotifier, SchemeOption, StaticPageSource,
    WidgetFactory, WidgetKind, WidgetRegistry, WidgetSpec,
};
use serde_json::json;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

// ============================================================
// Fixtures
// ============================================================

fn page_dom() -> MemoryDom {
    MemoryDom::new()
        .with_input("sel", "")
        .with_select("sel-pages", &[])
        .with_select("sel-schemes", &[])
        .with_checkbox("sel-useScheme", false)
        .with_container("sel-pageModule")
        .with_container("sel-schemeModule")
}

fn options(show_scheme_option: bool) -> PageSelectorOptions {
    PageSelectorOptions {
        document_ref: "workspace://SpacesStore/contract".to_string(),
        show_scheme_option,
        allow_multi_select: true,
    }
}

fn schemes() -> Vec<SchemeOption> {
    ["last", "first", "all"]
        .iter()
        .map(|value| SchemeOption {
            name: format!("{} page(s)", value),
            value: value.to_string(),
        })
        .collect()
}

fn ready_selector<S: PageDataSource>(
    dom: &MemoryDom,
    source: S,
    show_scheme_option: bool,
) -> (
    PageSelector<MemoryDom, S, RecordingNotifier>,
    RecordingNotifier,
) {
    let notifier = RecordingNotifier::new();
    let widget = PageSelector::new(
        "sel",
        options(show_scheme_option),
        dom.clone(),
        Rc::new(source),
        Rc::new(notifier.clone()),
    );
    (widget, notifier)
}

/// Source whose answers are released by the test
struct GatedSource {
    count: RefCell<Option<oneshot::Receiver<Result<PageCountResponse, FetchError>>>>,
    schemes: RefCell<Option<oneshot::Receiver<Result<PageSchemesResponse, FetchError>>>>,
}

type Gates = (
    oneshot::Sender<Result<PageCountResponse, FetchError>>,
    oneshot::Sender<Result<PageSchemesResponse, FetchError>>,
);

impl GatedSource {
    fn new() -> (Self, Gates) {
        let (count_tx, count_rx) = oneshot::channel();
        let (schemes_tx, schemes_rx) = oneshot::channel();
        let source = Self {
            count: RefCell::new(Some(count_rx)),
            schemes: RefCell::new(Some(schemes_rx)),
        };
        (source, (count_tx, schemes_tx))
    }
}

#[async_trait(?Send)]
impl PageDataSource for GatedSource {
    async fn page_count(&self, _document_ref: &str) -> Result<PageCountResponse, FetchError> {
        let gate = self.count.borrow_mut().take();
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(FetchError::Network("dropped".to_string()))),
            None => Err(FetchError::Network("asked twice".to_string())),
        }
    }

    async fn page_schemes(&self, _document_ref: &str) -> Result<PageSchemesResponse, FetchError> {
        let gate = self.schemes.borrow_mut().take();
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(FetchError::Network("dropped".to_string()))),
            None => Err(FetchError::Network("asked twice".to_string())),
        }
    }
}

// ============================================================
// PageSelector
// ============================================================

#[test]
fn failed_page_count_notifies_exactly_once() {
    let dom = page_dom();
    let source =
        StaticPageSource::new(10, Vec::new()).failing_page_count(FetchError::Status(404));
    let (widget, notifier) = ready_selector(&dom, source, false);

    block_on(widget.ready());

    assert!(dom.option_values("sel-pages").is_empty());
    assert_eq!(notifier.messages(), vec![PAGE_COUNT_FAILED.to_string()]);
}

#[test]
fn both_lookups_failing_notify_independently() {
    let dom = page_dom();
    let source = StaticPageSource::new(1, Vec::new())
        .failing_page_count(FetchError::Status(500))
        .failing_schemes(FetchError::Decode("bad json".to_string()));
    let (widget, notifier) = ready_selector(&dom, source, true);

    block_on(widget.ready());

    let mut messages = notifier.messages();
    messages.sort();
    assert_eq!(
        messages,
        vec![PAGE_COUNT_FAILED.to_string(), PAGE_SCHEMES_FAILED.to_string()]
    );
}

#[test]
fn multi_select_serializes_in_option_order() {
    let dom = page_dom();
    let (widget, _) = ready_selector(&dom, StaticPageSource::new(6, Vec::new()), false);
    block_on(widget.ready());

    // clicked 5, then 2, then 3
    dom.select_values("sel-pages", &["5", "2", "3"]);

    assert_eq!(widget.resolve_value(), PageSpec::PageList(vec![2, 3, 5]));
    assert_eq!(dom.value_of("sel").as_deref(), Some("2,3,5"));
}

#[test]
fn all_sentinel_wins_over_other_selections() {
    let dom = page_dom();
    let (widget, _) = ready_selector(&dom, StaticPageSource::new(4, Vec::new()), false);
    block_on(widget.ready());

    dom.select_values("sel-pages", &["all", "2", "4"]);

    assert_eq!(widget.resolve_value(), PageSpec::AllPages);
    assert_eq!(dom.value_of("sel").as_deref(), Some("all"));
}

#[test]
fn scheme_mode_reads_only_the_scheme_control() {
    let dom = page_dom();
    let (widget, _) = ready_selector(&dom, StaticPageSource::new(3, schemes()), true);
    block_on(widget.ready());
    dom.set_value("sel-schemes", "last").unwrap();
    dom.set_checked("sel-useScheme", true);

    dom.take_reads();
    assert_eq!(
        widget.resolve_value(),
        PageSpec::SchemeName("last".to_string())
    );
    let reads = dom.take_reads();
    assert!(reads.contains(&"sel-schemes".to_string()));
    assert!(!reads.contains(&"sel-pages".to_string()));

    dom.set_checked("sel-useScheme", false);
    widget.resolve_value();
    let reads = dom.take_reads();
    assert!(reads.contains(&"sel-pages".to_string()));
    assert!(!reads.contains(&"sel-schemes".to_string()));
}

#[test]
fn scheme_named_all_is_submitted_as_all() {
    let dom = page_dom();
    let (widget, _) = ready_selector(&dom, StaticPageSource::new(3, schemes()), true);
    block_on(widget.ready());
    dom.set_value("sel-schemes", "all").unwrap();
    dom.set_checked("sel-useScheme", true);

    widget.resolve_value();

    assert_eq!(dom.value_of("sel").as_deref(), Some("all"));
}

#[test]
fn lookups_apply_in_completion_order() {
    let dom = page_dom();
    let (source, (count_gate, schemes_gate)) = GatedSource::new();
    let (widget, notifier) = ready_selector(&dom, source, true);

    let mut pool = LocalPool::new();
    let task = widget.clone();
    pool.spawner()
        .spawn_local(async move { task.ready().await })
        .unwrap();
    pool.run_until_stalled();

    // Initial state is written before any lookup completes
    assert_eq!(dom.display_of("sel-pageModule"), Some(Display::None));
    assert!(dom.option_values("sel-pages").is_empty());

    // Schemes first
    schemes_gate
        .send(Ok(PageSchemesResponse { schemes: schemes() }))
        .unwrap();
    pool.run_until_stalled();
    assert_eq!(dom.option_values("sel-schemes"), vec!["last", "first", "all"]);
    assert!(dom.option_values("sel-pages").is_empty());

    // The user can interact while the page count is still pending
    dom.set_checked("sel-useScheme", true);
    dom.set_value("sel-schemes", "first").unwrap();
    widget.toggle_scheme_mode(true);
    assert_eq!(dom.value_of("sel").as_deref(), Some("first"));

    count_gate.send(Ok(PageCountResponse { page_count: 2 })).unwrap();
    pool.run_until_stalled();
    assert_eq!(dom.option_values("sel-pages"), vec!["all", "1", "2"]);
    // still in scheme mode, so the late page count does not change the value
    assert_eq!(dom.value_of("sel").as_deref(), Some("first"));
    assert!(notifier.messages().is_empty());
}

#[test]
fn late_result_after_teardown_is_ignored() {
    let dom = page_dom();
    let (source, (count_gate, _schemes_gate)) = GatedSource::new();
    let (widget, _) = ready_selector(&dom, source, false);

    let mut pool = LocalPool::new();
    let task = widget.clone();
    pool.spawner()
        .spawn_local(async move { task.ready().await })
        .unwrap();
    pool.run_until_stalled();

    dom.remove("sel-pages");
    count_gate.send(Ok(PageCountResponse { page_count: 3 })).unwrap();
    pool.run_until_stalled();

    assert!(!dom.exists("sel-pages"));
    assert_eq!(dom.value_of("sel").as_deref(), Some(""));
}

#[test]
fn page_data_is_fetched_once_per_widget() {
    let dom = page_dom();
    let source = Rc::new(StaticPageSource::new(3, schemes()));
    let factory = WidgetFactory::new(
        dom.clone(),
        Rc::clone(&source),
        Rc::new(RecordingNotifier::new()),
    );
    let mut registry = WidgetRegistry::new();
    let spec = WidgetSpec::new(
        WidgetKind::PageSelector,
        "sel",
        json!({"nodeRef": "workspace://SpacesStore/contract", "showPageScheme": "true"}),
    );
    registry.register(factory.build(&spec).unwrap()).unwrap();

    block_on(registry.ready("sel")).unwrap();
    block_on(registry.ready_all());

    assert_eq!(dom.option_values("sel-pages"), vec!["all", "1", "2", "3"]);
    assert_eq!(dom.option_values("sel-schemes"), vec!["last", "first", "all"]);
    assert_eq!(source.page_count_calls(), 1);
    assert_eq!(source.scheme_calls(), 1);
    assert_eq!(dom.value_of("sel").as_deref(), Some("3"));
}

// ============================================================
// DependentSelect / checkbox toggle
// ============================================================

fn dependent_dom() -> MemoryDom {
    MemoryDom::new()
        .with_field("p_a")
        .with_field("p_b")
        .with_field("p_c")
}

fn visible(dom: &MemoryDom, id: &str) -> bool {
    dom.container_display_of(id) == Some(Display::Block)
}

#[test]
fn dependent_fields_follow_driving_value() {
    let dom = dependent_dom();
    let config = vec![
        DependentFieldRule::new("x", ["a", "b"]),
        DependentFieldRule::new("y", ["c"]),
    ];

    apply_config(&dom, &config, "x", "p");
    assert!(visible(&dom, "p_a"));
    assert!(visible(&dom, "p_b"));
    assert!(!visible(&dom, "p_c"));

    apply_config(&dom, &config, "y", "p");
    assert!(!visible(&dom, "p_a"));
    assert!(!visible(&dom, "p_b"));
    assert!(visible(&dom, "p_c"));
}

#[test]
fn checkbox_hides_and_mirrors_state() {
    let dom = dependent_dom()
        .with_checkbox("sig-entry", true)
        .with_input("sig", "")
        .with_input("sig-tohide", "a,b");

    show_dependent_controls(&dom, "sig", "p");
    assert_eq!(dom.value_of("sig").as_deref(), Some("true"));
    assert!(!visible(&dom, "p_a"));
    assert!(!visible(&dom, "p_b"));
    assert!(visible(&dom, "p_c"));

    dom.set_checked("sig-entry", false);
    show_dependent_controls(&dom, "sig", "p");
    assert_eq!(dom.value_of("sig").as_deref(), Some("false"));
    assert!(visible(&dom, "p_a"));
    assert!(visible(&dom, "p_b"));
}

// ============================================================
// Properties
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// N pages give N + 1 options with page N selected
    #[test]
    fn page_count_populates_n_plus_one_options(n in 1i64..200) {
        let dom = page_dom();
        let (widget, _) = ready_selector(&dom, StaticPageSource::new(n, Vec::new()), false);

        block_on(widget.ready());

        let values = dom.option_values("sel-pages");
        prop_assert_eq!(values.len() as i64, n + 1);
        prop_assert_eq!(values[0].as_str(), "all");
        prop_assert_eq!(dom.selected_values("sel-pages"), vec![n.to_string()]);
    }

    /// Resolving twice without a state change gives the same value
    #[test]
    fn resolution_is_idempotent(
        n in 1i64..40,
        picks in prop::collection::vec(1i64..40, 0..10),
        use_scheme in any::<bool>()
    ) {
        let dom = page_dom();
        let (widget, _) = ready_selector(&dom, StaticPageSource::new(n, schemes()), true);
        block_on(widget.ready());

        let picks: Vec<String> = picks.iter().map(|p| p.to_string()).collect();
        let picks: Vec<&str> = picks.iter().map(String::as_str).collect();
        dom.select_values("sel-pages", &picks);
        dom.set_checked("sel-useScheme", use_scheme);

        let first = widget.resolve_value();
        let written = dom.value_of("sel");
        let second = widget.resolve_value();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(written, dom.value_of("sel"));
    }

    /// The written value is sorted in option order whatever the click order
    #[test]
    fn selection_is_written_in_option_order(
        picks in prop::collection::btree_set(1u32..30, 1..10)
    ) {
        let dom = page_dom();
        let (widget, _) = ready_selector(&dom, StaticPageSource::new(30, Vec::new()), false);
        block_on(widget.ready());

        let mut clicked: Vec<String> = picks.iter().map(|p| p.to_string()).collect();
        clicked.reverse();
        let clicked: Vec<&str> = clicked.iter().map(String::as_str).collect();
        dom.select_values("sel-pages", &clicked);

        let spec = widget.resolve_value();
        prop_assert_eq!(spec, PageSpec::PageList(picks.into_iter().collect()));
    }

    /// The submitted string parses back into the resolved spec
    #[test]
    fn written_value_parses_back(picks in prop::collection::btree_set(1u32..20, 0..6)) {
        let dom = page_dom();
        let (widget, _) = ready_selector(&dom, StaticPageSource::new(20, Vec::new()), false);
        block_on(widget.ready());

        let values: Vec<String> = picks.iter().map(|p| p.to_string()).collect();
        let values: Vec<&str> = values.iter().map(String::as_str).collect();
        dom.select_values("sel-pages", &values);

        let spec = widget.resolve_value();
        let written = dom.value_of("sel").unwrap_or_default();
        prop_assert_eq!(written.parse::<PageSpec>().unwrap(), spec);
    }
}
