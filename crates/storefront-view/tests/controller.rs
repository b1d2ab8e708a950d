//! End-to-end tests for `CatalogController::run`.
//!
//! The document is shared behind a mutex so the test body can inspect the
//! page while the event loop owns the controller. Timing-sensitive tests run
//! on tokio's paused clock.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{json, Value};
use tokio::sync::mpsc;
use tokio::time::advance;

use storefront_client::FixtureSource;
use storefront_core::{CatalogConfig, SortOrder};
use storefront_view::{
    CatalogController, Document, HandoffStore, Hook, MemoryDocument, MemoryHandoff, Phase,
    RenderError, RunExit, UiEvent, PRODUCT_ID_KEY,
};

#[derive(Clone)]
struct SharedDocument(Arc<Mutex<MemoryDocument>>);

impl SharedDocument {
    fn new(doc: MemoryDocument) -> Self {
        Self(Arc::new(Mutex::new(doc)))
    }

    fn region(&self, hook: Hook) -> String {
        self.0
            .lock()
            .unwrap()
            .region(hook)
            .unwrap_or_default()
            .to_owned()
    }
}

impl Document for SharedDocument {
    fn has_region(&self, hook: Hook) -> bool {
        self.0.lock().unwrap().has_region(hook)
    }

    fn replace_region(&mut self, hook: Hook, html: String) -> Result<(), RenderError> {
        self.0.lock().unwrap().replace_region(hook, html)
    }
}

fn payload() -> Value {
    json!({
        "data": [
            {"id": 1, "brand": "Sony", "model": "WH-1000XM5", "price": 349},
            {"id": 2, "brand": "Bose", "model": "QC Ultra", "price": 429},
            {"id": 3, "brand": "JBL", "model": "Flip 6", "price": 129}
        ]
    })
}

fn controller<D: Document>(doc: D) -> CatalogController<FixtureSource, D> {
    CatalogController::new(
        FixtureSource::new(payload()),
        doc,
        CatalogConfig::default(),
        Arc::new(MemoryHandoff::new()),
    )
}

/// Lets the event loop catch up with everything already sent.
async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn run_loads_then_closes_with_sender() {
    let mut c = controller(MemoryDocument::listing_page());
    let (tx, rx) = mpsc::channel(4);
    drop(tx);

    assert_eq!(c.run(rx).await, RunExit::Closed);
    assert_eq!(c.phase(), Phase::Ready);
    assert_eq!(c.store().products().len(), 3);
}

#[tokio::test]
async fn run_applies_events_in_order() {
    let mut c = controller(MemoryDocument::listing_page());
    let (tx, rx) = mpsc::channel(8);
    tx.send(UiEvent::SortChanged(SortOrder::PriceAsc))
        .await
        .unwrap();
    tx.send(UiEvent::PageSelected(1)).await.unwrap();
    tx.send(UiEvent::SortChanged(SortOrder::PriceDesc))
        .await
        .unwrap();
    drop(tx);

    c.run(rx).await;

    assert_eq!(c.store().state().sort, SortOrder::PriceDesc);
    let ids: Vec<String> = c.store().view().products.into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec!["2", "1", "3"]);
}

#[tokio::test]
async fn run_stops_on_product_click() {
    let handoff = Arc::new(MemoryHandoff::new());
    let mut c = CatalogController::new(
        FixtureSource::new(payload()),
        MemoryDocument::listing_page(),
        CatalogConfig::default(),
        handoff.clone(),
    );
    let (tx, rx) = mpsc::channel(4);

    // Clicks only count once the card has been painted.
    let driver = async {
        settle().await;
        tx.send(UiEvent::ProductClicked("3".to_owned()))
            .await
            .unwrap();
    };
    let (exit, ()) = tokio::join!(c.run(rx), driver);

    assert_eq!(
        exit,
        RunExit::Navigate {
            url: "product.html?id=3".to_owned()
        }
    );
    assert_eq!(
        handoff.take(PRODUCT_ID_KEY).as_deref(),
        Some("3")
    );
}

#[tokio::test]
async fn run_fails_without_products_container() {
    let mut c = controller(MemoryDocument::with_regions([Hook::ResultCount]));
    let (_tx, rx) = mpsc::channel(4);
    assert_eq!(c.run(rx).await, RunExit::Failed);
}

#[tokio::test(start_paused = true)]
async fn search_keystrokes_collapse_into_one_filter() {
    let doc = SharedDocument::new(MemoryDocument::listing_page());
    let mut c = controller(doc.clone());
    let (tx, rx) = mpsc::channel(16);

    let driver = async {
        settle().await;
        assert!(doc.region(Hook::ResultCount).contains("of 3 products"));

        for text in ["s", "so", "son", "sony"] {
            tx.send(UiEvent::SearchInput(text.to_owned())).await.unwrap();
            advance(Duration::from_millis(100)).await;
            settle().await;
        }
        // 100ms after the last keystroke.
        assert!(doc.region(Hook::ResultCount).contains("of 3 products"));

        advance(Duration::from_millis(100)).await;
        settle().await;
        assert!(doc.region(Hook::ResultCount).contains("of 3 products"));

        advance(Duration::from_millis(150)).await;
        settle().await;
        assert_eq!(
            doc.region(Hook::ResultCount),
            "<p class=\"result-count\">1 product</p>"
        );
        drop(tx);
    };

    let (exit, ()) = tokio::join!(c.run(rx), driver);

    assert_eq!(exit, RunExit::Closed);
    assert_eq!(c.store().state().filters.search.as_deref(), Some("sony"));
    assert!(doc.region(Hook::Toolbar).contains("value=\"sony\""));
}

#[tokio::test(start_paused = true)]
async fn pending_search_is_applied_when_events_close() {
    let mut c = controller(MemoryDocument::listing_page());
    let (tx, rx) = mpsc::channel(4);
    tx.send(UiEvent::SearchInput("jbl".to_owned())).await.unwrap();
    drop(tx);

    assert_eq!(c.run(rx).await, RunExit::Closed);
    assert_eq!(c.store().view().total, 1);
}
