//! Product detail page: resolve the id, fetch the product, paint it.
//!
//! The id comes from the page URL (`id`, then `productId`) or, for in-app
//! navigation, from the handoff store. Fetch failures follow the listing
//! policy: a 404 shows "not found", other client errors show their panel,
//! and network/server/unreadable responses fall back to the sample product
//! with the same id when there is one.

use std::sync::Arc;

use storefront_client::{
    normalize_api_response, normalize_products, ErrorClass, ProductSource, RawPayload,
};
use storefront_core::{sample_products, CatalogConfig, Product};

use crate::dom::{Document, Hook};
use crate::handoff::{HandoffStore, PRODUCT_ID_KEY};
use crate::messages::{self, ErrorCopy};
use crate::render::Renderer;

/// URL parameters that may carry the product id, in priority order.
pub const ID_PARAMS: [&str; 2] = ["id", "productId"];

#[derive(Debug, Clone, PartialEq)]
pub enum DetailOutcome {
    Shown { product: Box<Product>, fallback: bool },
    NoSelection,
    NotFound,
    Errored(ErrorClass),
    /// The page has no detail container.
    Failed,
}

/// Picks the product id from decoded URL pairs, falling back to the handoff
/// store. The handoff value is consumed either way so it cannot leak into a
/// later page view.
#[must_use]
pub fn resolve_product_id(query: &[(String, String)], handoff: &dyn HandoffStore) -> Option<String> {
    let handed_off = handoff.take(PRODUCT_ID_KEY);
    let from_url = ID_PARAMS.iter().find_map(|param| {
        query
            .iter()
            .find(|(key, value)| key == param && !value.trim().is_empty())
            .map(|(_, value)| value.trim().to_owned())
    });
    from_url.or(handed_off.filter(|id| !id.trim().is_empty()))
}

pub struct DetailPage<S, D> {
    source: S,
    document: D,
    config: CatalogConfig,
    renderer: Renderer,
    handoff: Arc<dyn HandoffStore>,
}

impl<S: ProductSource, D: Document> DetailPage<S, D> {
    pub fn new(
        source: S,
        document: D,
        config: CatalogConfig,
        handoff: Arc<dyn HandoffStore>,
    ) -> Self {
        Self {
            renderer: Renderer::new(&config),
            source,
            document,
            config,
            handoff,
        }
    }

    #[must_use]
    pub fn document(&self) -> &D {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> D {
        self.document
    }

    /// Resolves, fetches and paints the product for this page view.
    pub async fn load(&mut self, query: &[(String, String)]) -> DetailOutcome {
        if !self.document.has_region(Hook::DetailContainer) {
            tracing::error!(hook = Hook::DetailContainer.id(), "detail container missing");
            return DetailOutcome::Failed;
        }

        let outcome = match resolve_product_id(query, self.handoff.as_ref()) {
            None => {
                tracing::warn!("no product id in the URL or handoff store");
                DetailOutcome::NoSelection
            }
            Some(id) => self.fetch(&id).await,
        };
        self.paint(outcome)
    }

    async fn fetch(&self, id: &str) -> DetailOutcome {
        match self.source.fetch_product_by_id(id).await {
            Ok(payload) => match self.pick_product(id, payload) {
                Some(product) => DetailOutcome::Shown {
                    product: Box::new(product),
                    fallback: false,
                },
                None => {
                    tracing::warn!(id, "product response held no usable record");
                    self.fallback(id, ErrorClass::Validation)
                }
            },
            Err(err) => {
                let class = err.class();
                tracing::warn!(id, error = %err, ?class, "product fetch failed");
                match class {
                    ErrorClass::Client { status: 404 } => DetailOutcome::NotFound,
                    class if class.triggers_fallback() => self.fallback(id, class),
                    class => DetailOutcome::Errored(class),
                }
            }
        }
    }

    /// Prefers the record whose id matches; detail endpoints that answer with
    /// a list are otherwise taken at their first usable record.
    fn pick_product(&self, id: &str, payload: RawPayload) -> Option<Product> {
        let records = normalize_api_response(payload);
        let mut products = normalize_products(&records, &self.config).products;
        match products.iter().position(|p| p.id == id) {
            Some(index) => Some(products.swap_remove(index)),
            None => products.into_iter().next(),
        }
    }

    fn fallback(&self, id: &str, class: ErrorClass) -> DetailOutcome {
        if !self.config.fallback_enabled {
            return DetailOutcome::Errored(class);
        }
        match sample_products().into_iter().find(|p| p.id == id) {
            Some(product) => DetailOutcome::Shown {
                product: Box::new(product),
                fallback: true,
            },
            None => DetailOutcome::NotFound,
        }
    }

    fn paint(&mut self, outcome: DetailOutcome) -> DetailOutcome {
        let rendered = match &outcome {
            DetailOutcome::Shown { product, fallback } => {
                self.renderer
                    .render_fallback_notice(*fallback, &mut self.document);
                self.renderer.render_detail(product, &mut self.document)
            }
            DetailOutcome::NoSelection => self.show_error(&messages::no_selection_copy()),
            DetailOutcome::NotFound => self.show_error(&messages::not_found_copy()),
            DetailOutcome::Errored(class) => self.show_error(&messages::error_copy(*class)),
            DetailOutcome::Failed => return outcome,
        };
        match rendered {
            Ok(()) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "detail page cannot render");
                DetailOutcome::Failed
            }
        }
    }

    fn show_error(&mut self, copy: &ErrorCopy) -> Result<(), crate::dom::RenderError> {
        self.renderer
            .render_fallback_notice(false, &mut self.document);
        self.renderer.render_detail_error(copy, &mut self.document)
    }
}
