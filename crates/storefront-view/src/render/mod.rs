//! Turns a [`ViewResult`] into page markup.
//!
//! The products container is the one required target. Auxiliary regions
//! (toolbar, facet sidebar, result count, pagination, fallback notice) are
//! written when present and skipped with a warning when the page lacks them.
//! Every write replaces the region wholesale.

mod cards;
mod controls;
mod detail;
mod html;

use storefront_core::{CatalogConfig, Product, ViewMode};

use crate::dom::{Document, Hook, RenderError};
use crate::messages::{self, ErrorCopy};
use crate::store::ViewResult;

pub use html::escape;

/// Ids painted by one render pass, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderPass {
    pub product_ids: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Renderer {
    currency_symbol: String,
}

impl Renderer {
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            currency_symbol: config.currency_symbol.clone(),
        }
    }

    /// Paints the listing for `view`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::TargetMissing`] when the page has no products
    /// container.
    pub fn render<D: Document + ?Sized>(
        &self,
        view: &ViewResult,
        doc: &mut D,
    ) -> Result<RenderPass, RenderError> {
        let products = if view.products.is_empty() {
            empty_state(view)
        } else {
            self.product_list(&view.products, view.state.view)
        };
        doc.replace_region(Hook::ProductsContainer, products)?;

        write_aux(doc, Hook::ResultCount, controls::result_count(view));
        write_aux(doc, Hook::Pagination, controls::pagination(view));
        write_aux(doc, Hook::Toolbar, controls::toolbar(&view.state));
        write_aux(
            doc,
            Hook::FacetSidebar,
            controls::facet_sidebar(view, &self.currency_symbol),
        );

        Ok(RenderPass {
            product_ids: view.products.iter().map(|p| p.id.clone()).collect(),
        })
    }

    /// Replaces the products container with a loading indicator and clears
    /// the counters that describe the previous result.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::TargetMissing`] when the page has no products
    /// container.
    pub fn render_loading<D: Document + ?Sized>(&self, doc: &mut D) -> Result<(), RenderError> {
        doc.replace_region(
            Hook::ProductsContainer,
            format!(
                "<div class=\"catalog-loading\" aria-busy=\"true\">{}</div>",
                messages::LOADING
            ),
        )?;
        clear_aux(doc, Hook::ResultCount);
        clear_aux(doc, Hook::Pagination);
        Ok(())
    }

    /// Error panel with a retry button and, when `offer_samples` is set, a
    /// button that loads the sample catalog instead.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::TargetMissing`] when the page has no products
    /// container.
    pub fn render_error<D: Document + ?Sized>(
        &self,
        copy: &ErrorCopy,
        offer_samples: bool,
        doc: &mut D,
    ) -> Result<(), RenderError> {
        doc.replace_region(Hook::ProductsContainer, error_panel(copy, offer_samples))?;
        clear_aux(doc, Hook::ResultCount);
        clear_aux(doc, Hook::Pagination);
        Ok(())
    }

    /// Shows or clears the banner explaining that sample data is on screen.
    pub fn render_fallback_notice<D: Document + ?Sized>(&self, shown: bool, doc: &mut D) {
        if shown {
            write_aux(
                doc,
                Hook::FallbackNotice,
                format!(
                    "<div class=\"fallback-notice\" role=\"status\">{}</div>",
                    messages::FALLBACK_NOTICE
                ),
            );
        } else {
            clear_aux(doc, Hook::FallbackNotice);
        }
    }

    /// Paints a single product into the detail container.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::TargetMissing`] when the page has no detail
    /// container.
    pub fn render_detail<D: Document + ?Sized>(
        &self,
        product: &Product,
        doc: &mut D,
    ) -> Result<(), RenderError> {
        doc.replace_region(
            Hook::DetailContainer,
            detail::product_detail(product, &self.currency_symbol),
        )
    }

    /// Detail-page counterpart of [`Renderer::render_error`]; no sample
    /// button, since a missing product has no sample equivalent.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::TargetMissing`] when the page has no detail
    /// container.
    pub fn render_detail_error<D: Document + ?Sized>(
        &self,
        copy: &ErrorCopy,
        doc: &mut D,
    ) -> Result<(), RenderError> {
        doc.replace_region(Hook::DetailContainer, error_panel(copy, false))
    }

    fn product_list(&self, products: &[Product], mode: ViewMode) -> String {
        let mut out = match mode {
            ViewMode::Grid => String::from("<div class=\"product-grid\">"),
            ViewMode::List => String::from("<ul class=\"product-list\">"),
        };
        for product in products {
            let item = match mode {
                ViewMode::Grid => cards::grid_card(product, &self.currency_symbol),
                ViewMode::List => cards::list_row(product, &self.currency_symbol),
            };
            out.push_str(&item);
        }
        out.push_str(match mode {
            ViewMode::Grid => "</div>",
            ViewMode::List => "</ul>",
        });
        out
    }
}

fn empty_state(view: &ViewResult) -> String {
    if view.state.filters.is_active() {
        format!(
            "<div class=\"catalog-empty catalog-empty--filtered\"><p>{}</p>\
             <button type=\"button\" data-action=\"clear-filters\">Clear filters</button></div>",
            messages::NO_RESULTS
        )
    } else {
        format!(
            "<div class=\"catalog-empty\"><p>{}</p></div>",
            messages::EMPTY_CATALOG
        )
    }
}

fn error_panel(copy: &ErrorCopy, offer_samples: bool) -> String {
    let mut out = format!(
        "<div class=\"catalog-error\" role=\"alert\"><h2>{}</h2><p>{}</p>\
         <button type=\"button\" data-action=\"retry\">Try again</button>",
        copy.title, copy.hint
    );
    if offer_samples {
        out.push_str("<button type=\"button\" data-action=\"show-samples\">Show sample products</button>");
    }
    out.push_str("</div>");
    out
}

fn write_aux<D: Document + ?Sized>(doc: &mut D, hook: Hook, html: String) {
    if let Err(e) = doc.replace_region(hook, html) {
        tracing::warn!(hook = hook.id(), error = %e, "skipping render step");
    }
}

/// Empties a region if the page has it, without warning when it does not.
fn clear_aux<D: Document + ?Sized>(doc: &mut D, hook: Hook) {
    if doc.has_region(hook) {
        let _ = doc.replace_region(hook, String::new());
    }
}

#[cfg(test)]
#[path = "../render_test.rs"]
mod tests;
