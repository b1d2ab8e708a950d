//! The catalog controller: fetch, normalize, load, render, and the wiring
//! from page events to store mutations.
//!
//! # Phases
//!
//! ```text
//! Idle ──mount──▶ Loading ──ok──────────▶ Ready
//!                    │    ──unusable/5xx/network──▶ Degraded (sample data)
//!                    │    ──4xx──────────▶ Errored (retry / show samples)
//! Ready, Degraded, Errored ──refresh/retry──▶ Loading
//! any ──products container missing──▶ Failed (terminal)
//! ```
//!
//! Only the first load and explicit refresh/retry intents fetch. Filter,
//! sort, page and view changes run against the loaded collection.
//!
//! At most one fetch per request key is outstanding; a repeated trigger for
//! the same key is dropped. A trigger with different server filters
//! supersedes the outstanding fetch, and any response whose token is no
//! longer current is discarded when it arrives.

mod debounce;
mod events;

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use futures::stream::{FuturesUnordered, StreamExt};
use storefront_client::{
    normalize_products, Envelope, ErrorClass, FetchError, ProductSource, RawPayload,
};
use storefront_core::{sample_products, CatalogConfig, FilterPatch, Filters, Product, QueryState};
use tokio::sync::mpsc;

use crate::dom::{Document, Hook, RenderError};
use crate::handoff::{HandoffStore, PRODUCT_ID_KEY};
use crate::messages;
use crate::render::Renderer;
use crate::store::CatalogStore;

pub use debounce::Debouncer;
pub use events::{Effect, LoadTicket, LoadTrigger, UiEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    /// Showing the sample catalog under a fallback notice.
    Degraded,
    /// Showing an error panel. Recoverable via retry or sample data.
    Errored(ErrorClass),
    /// The page cannot host the catalog. Terminal.
    Failed,
}

/// How [`CatalogController::run`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunExit {
    /// The event source closed and all outstanding work settled.
    Closed,
    Navigate { url: String },
    Failed,
}

#[derive(Debug)]
struct InFlight {
    token: u64,
    filters: Option<Filters>,
}

type Settled = (u64, Result<RawPayload, FetchError>);

pub struct CatalogController<S, D> {
    source: S,
    document: D,
    config: CatalogConfig,
    renderer: Renderer,
    store: CatalogStore,
    handoff: Arc<dyn HandoffStore>,
    phase: Phase,
    last_token: u64,
    in_flight: Option<InFlight>,
    /// Page requested by the restored URL state, re-applied after the first
    /// load (which otherwise resets to page 1).
    restored_page: Option<u32>,
    painted: HashSet<String>,
    search: Debouncer<String>,
}

impl<S: ProductSource, D: Document> CatalogController<S, D> {
    pub fn new(
        source: S,
        document: D,
        config: CatalogConfig,
        handoff: Arc<dyn HandoffStore>,
    ) -> Self {
        Self {
            renderer: Renderer::new(&config),
            store: CatalogStore::new(config.page_size),
            search: Debouncer::new(config.debounce()),
            source,
            document,
            config,
            handoff,
            phase: Phase::Idle,
            last_token: 0,
            in_flight: None,
            restored_page: None,
            painted: HashSet::new(),
        }
    }

    /// Starts from `state`, e.g. one parsed from the page URL, instead of a
    /// fresh state. The page size always comes from the configuration.
    #[must_use]
    pub fn with_state(mut self, mut state: QueryState) -> Self {
        state.page_size = self.config.page_size.max(1);
        self.restored_page = (state.page > 1).then_some(state.page);
        self.store = CatalogStore::with_state(state);
        self
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    #[must_use]
    pub fn document(&self) -> &D {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> D {
        self.document
    }

    /// Ids of the products painted by the latest render, the only ones a
    /// click is honoured for.
    #[must_use]
    pub fn painted_ids(&self) -> &HashSet<String> {
        &self.painted
    }

    /// Current query state in URL form, for the address bar.
    #[must_use]
    pub fn query_string(&self) -> String {
        self.store.state().to_query_string()
    }

    #[must_use]
    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub fn search_pending(&self) -> bool {
        self.search.is_pending()
    }

    /// Idle → Loading. Fails the controller when the page has no products
    /// container.
    pub fn mount(&mut self) -> Option<LoadTicket> {
        if !self.document.has_region(Hook::ProductsContainer) {
            self.fail(&RenderError::TargetMissing(Hook::ProductsContainer.id()));
            return None;
        }
        self.begin_load(LoadTrigger::Initial)
    }

    /// Starts a fetch, unless the trigger is a duplicate of the one in flight
    /// or is not valid in the current phase.
    pub fn begin_load(&mut self, trigger: LoadTrigger) -> Option<LoadTicket> {
        let allowed = match (self.phase, &trigger) {
            (Phase::Failed, _) => false,
            (Phase::Idle, LoadTrigger::Initial) => true,
            (Phase::Idle, _) | (_, LoadTrigger::Initial) => false,
            _ => true,
        };
        if !allowed {
            tracing::debug!(?trigger, phase = ?self.phase, "ignoring load trigger");
            return None;
        }

        let filters = trigger.server_filters().cloned();
        if let Some(current) = &self.in_flight {
            if current.filters == filters {
                tracing::debug!(
                    token = current.token,
                    ?trigger,
                    "fetch already in flight; suppressing duplicate trigger"
                );
                return None;
            }
            tracing::debug!(superseded = current.token, "superseding in-flight fetch");
        }

        self.last_token += 1;
        let token = self.last_token;
        let request = self.source.fetch_products(filters.as_ref());
        self.in_flight = Some(InFlight { token, filters });
        self.set_phase(Phase::Loading);
        self.painted.clear();

        self.renderer
            .render_fallback_notice(false, &mut self.document);
        if let Err(e) = self.renderer.render_loading(&mut self.document) {
            self.fail(&e);
            return None;
        }
        Some(LoadTicket { token, request })
    }

    /// Settles the fetch identified by `token`. Responses for anything but
    /// the latest fetch are discarded.
    pub fn finish_load(&mut self, token: u64, result: Result<RawPayload, FetchError>) {
        match &self.in_flight {
            Some(current) if current.token == token => {}
            other => {
                tracing::debug!(
                    token,
                    current = ?other.as_ref().map(|f| f.token),
                    "discarding stale response"
                );
                return;
            }
        }
        self.in_flight = None;

        match result {
            Ok(payload) => self.accept_payload(payload),
            Err(err) => {
                let class = err.class();
                tracing::warn!(error = %err, ?class, "catalog fetch failed");
                self.handle_failure(class);
            }
        }
    }

    /// Applies one page event. Returns work for the host when the event
    /// starts a fetch or leaves the page.
    pub fn handle_event(&mut self, event: UiEvent) -> Option<Effect> {
        if self.phase == Phase::Failed {
            tracing::debug!(?event, "catalog failed; ignoring event");
            return None;
        }

        match event {
            UiEvent::SearchInput(text) => self.search.schedule(text),
            UiEvent::SortChanged(sort) => self.mutate(|s| s.set_sort(sort)),
            UiEvent::ViewChanged(view) => self.mutate(|s| s.set_view(view)),
            UiEvent::PageSelected(page) => self.mutate(|s| s.set_page(page)),
            UiEvent::BrandToggled { brand, checked } => {
                let mut brands = self.store.state().filters.brands.clone();
                if checked {
                    if !brands.contains(&brand) {
                        brands.push(brand);
                    }
                } else {
                    brands.retain(|b| *b != brand);
                }
                self.filter(FilterPatch::default().with_brands(brands));
            }
            UiEvent::CategorySelected(category) => {
                self.filter(FilterPatch::default().with_category(category));
            }
            UiEvent::PriceMinChanged(min) => self.filter(FilterPatch::default().with_price_min(min)),
            UiEvent::PriceMaxChanged(max) => self.filter(FilterPatch::default().with_price_max(max)),
            UiEvent::InStockToggled(on) => {
                self.filter(FilterPatch::default().with_in_stock_only(on));
            }
            UiEvent::ClearFilters => {
                self.search.cancel();
                self.mutate(CatalogStore::reset);
            }
            UiEvent::Refresh => return self.begin_load(LoadTrigger::Refresh).map(Effect::Fetch),
            UiEvent::RefreshWith(filters) => {
                return self
                    .begin_load(LoadTrigger::Query(filters))
                    .map(Effect::Fetch);
            }
            UiEvent::Retry => return self.begin_load(LoadTrigger::Retry).map(Effect::Fetch),
            UiEvent::ShowSamples => self.show_samples(),
            UiEvent::ProductClicked(id) => return self.open_product(&id),
        }
        None
    }

    /// Applies pending search text immediately instead of waiting out the
    /// debounce delay.
    pub fn flush_search(&mut self) {
        if let Some(text) = self.search.cancel() {
            self.apply_search(text);
        }
    }

    /// Loads the sample catalog without touching the network. A fetch still
    /// in flight is abandoned and its response discarded on arrival.
    pub fn show_samples(&mut self) {
        if self.phase == Phase::Failed {
            return;
        }
        if let Some(abandoned) = self.in_flight.take() {
            tracing::debug!(token = abandoned.token, "abandoning fetch for sample data");
        }
        self.load_collection(sample_products(), Phase::Degraded);
    }

    /// Drives the controller: mounts, then handles `events` in arrival order
    /// alongside outstanding fetches and the search debounce.
    ///
    /// Returns once `events` closes and outstanding work has settled, when a
    /// product click leaves the page, or when the controller fails. Pending
    /// search text is applied immediately when `events` closes.
    pub async fn run(&mut self, mut events: mpsc::Receiver<UiEvent>) -> RunExit {
        let mut requests: FuturesUnordered<BoxFuture<'static, Settled>> = FuturesUnordered::new();
        let mut open = true;

        if let Some(ticket) = self.mount() {
            requests.push(settle(ticket));
        }

        loop {
            if self.phase == Phase::Failed {
                return RunExit::Failed;
            }
            if !open && requests.is_empty() && !self.search.is_pending() {
                return RunExit::Closed;
            }

            tokio::select! {
                event = events.recv(), if open => match event {
                    Some(event) => match self.handle_event(event) {
                        Some(Effect::Fetch(ticket)) => requests.push(settle(ticket)),
                        Some(Effect::Navigate { url }) => return RunExit::Navigate { url },
                        None => {}
                    },
                    None => {
                        open = false;
                        self.flush_search();
                    }
                },
                Some((token, result)) = requests.next(), if !requests.is_empty() => {
                    self.finish_load(token, result);
                }
                text = self.search.fired(), if self.search.is_pending() => {
                    self.apply_search(text);
                }
            }
        }
    }

    fn accept_payload(&mut self, payload: RawPayload) {
        let envelope = Envelope::classify(payload);
        if !envelope.is_recognized() {
            tracing::warn!("catalog response has no recognised product envelope");
            self.handle_failure(ErrorClass::Validation);
            return;
        }
        let batch = normalize_products(&envelope.into_items(), &self.config);
        tracing::info!(
            loaded = batch.products.len(),
            dropped = batch.dropped,
            "catalog loaded"
        );
        self.load_collection(batch.products, Phase::Ready);
    }

    fn handle_failure(&mut self, class: ErrorClass) {
        if class.triggers_fallback() && self.config.fallback_enabled {
            self.load_collection(sample_products(), Phase::Degraded);
            return;
        }

        self.set_phase(Phase::Errored(class));
        self.painted.clear();
        self.renderer
            .render_fallback_notice(false, &mut self.document);
        let copy = messages::error_copy(class);
        if let Err(e) =
            self.renderer
                .render_error(&copy, self.config.fallback_enabled, &mut self.document)
        {
            self.fail(&e);
        }
    }

    fn load_collection(&mut self, products: Vec<Product>, phase: Phase) {
        self.store.load(products);
        if let Some(page) = self.restored_page.take() {
            self.store.set_page(page);
        }
        self.set_phase(phase);
        self.paint();
    }

    fn filter(&mut self, patch: FilterPatch) {
        self.mutate(|s| s.set_filter(patch));
    }

    fn apply_search(&mut self, text: String) {
        if self.phase == Phase::Failed {
            return;
        }
        tracing::debug!(search = %text, "applying search");
        self.filter(FilterPatch::search(text));
    }

    fn mutate(&mut self, change: impl FnOnce(&mut CatalogStore)) {
        change(&mut self.store);
        if matches!(self.phase, Phase::Ready | Phase::Degraded) {
            self.paint();
        } else {
            tracing::debug!(phase = ?self.phase, "state updated; render waits for load");
        }
    }

    fn paint(&mut self) {
        let mut view = self.store.view();
        let last_page = u32::try_from(view.total_pages.max(1)).unwrap_or(u32::MAX);
        if view.state.page > last_page {
            tracing::debug!(requested = view.state.page, last_page, "clamping page");
            self.store.set_page(last_page);
            view = self.store.view();
        }

        self.renderer
            .render_fallback_notice(self.phase == Phase::Degraded, &mut self.document);
        match self.renderer.render(&view, &mut self.document) {
            Ok(pass) => self.painted = pass.product_ids.into_iter().collect(),
            Err(e) => self.fail(&e),
        }
    }

    fn open_product(&mut self, id: &str) -> Option<Effect> {
        if !self.painted.contains(id) {
            tracing::debug!(id, "click on a product outside the current render");
            return None;
        }
        let url = self.store.find(id)?.url.clone();
        self.handoff.put(PRODUCT_ID_KEY, id.to_owned());
        tracing::info!(id, url, "opening product detail");
        Some(Effect::Navigate { url })
    }

    fn fail(&mut self, err: &RenderError) {
        tracing::error!(error = %err, "catalog cannot render on this page");
        self.in_flight = None;
        self.search.cancel();
        self.painted.clear();
        self.set_phase(Phase::Failed);
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            tracing::info!(from = ?self.phase, to = ?phase, "catalog phase changed");
            self.phase = phase;
        }
    }
}

fn settle(ticket: LoadTicket) -> BoxFuture<'static, Settled> {
    let LoadTicket { token, request } = ticket;
    async move { (token, request.await) }.boxed()
}

#[cfg(test)]
#[path = "../controller_test.rs"]
mod tests;
