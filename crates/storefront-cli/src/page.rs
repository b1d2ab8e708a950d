//! `list` and `detail` command handlers.
//!
//! Both build a product source from the flags, drive the page logic to
//! completion against an in-memory document and write the result out. There
//! are no interactive events, so the listing controller's event channel is
//! closed from the start and `run` returns once the initial load settles.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use futures::future::{self, BoxFuture, FutureExt};
use tokio::sync::mpsc;

use storefront_client::{CatalogClient, FetchError, FixtureSource, ProductSource, RawPayload};
use storefront_core::{parse_query_string, CatalogConfig, Filters, QueryState};
use storefront_view::{
    CatalogController, DetailOutcome, DetailPage, MemoryDocument, MemoryHandoff, Phase, RunExit,
};

const USER_AGENT: &str = concat!("storefront/", env!("CARGO_PKG_VERSION"));

/// Where products come from and where the page goes.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Skip the API and render the built-in sample catalog
    #[arg(long, conflicts_with = "fixture")]
    pub samples: bool,
    /// Read products from a saved JSON API response instead of the API
    #[arg(long, value_name = "FILE")]
    pub fixture: Option<PathBuf>,
    /// Write the page to this file instead of stdout
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Query string from a shared catalog link, e.g. "q=sony&sort=price-asc"
    #[arg(long, value_name = "QUERY")]
    pub query: Option<String>,
    /// Free-text search over name, brand and model
    #[arg(long)]
    pub search: Option<String>,
    /// Brand to include (repeatable)
    #[arg(long = "brand", value_name = "BRAND")]
    pub brands: Vec<String>,
    #[arg(long)]
    pub category: Option<String>,
    /// Lowest price to include
    #[arg(long)]
    pub min: Option<String>,
    /// Highest price to include
    #[arg(long)]
    pub max: Option<String>,
    /// Hide products that are out of stock
    #[arg(long)]
    pub in_stock: bool,
    /// none, price-asc, price-desc, name-asc or name-desc
    #[arg(long)]
    pub sort: Option<String>,
    /// grid or list
    #[arg(long)]
    pub view: Option<String>,
    #[arg(long)]
    pub page: Option<u32>,
    /// Print the computed view as JSON instead of HTML
    #[arg(long)]
    pub json: bool,
    #[command(flatten)]
    pub source: SourceArgs,
}

impl ListArgs {
    /// Flags as URL query pairs, after any pairs from `--query` so that
    /// explicit flags win.
    pub(crate) fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self
            .query
            .as_deref()
            .map(parse_query_string)
            .unwrap_or_default();

        let mut push = |key: &str, value: &str| pairs.push((key.to_owned(), value.to_owned()));
        if let Some(search) = &self.search {
            push("q", search);
        }
        for brand in &self.brands {
            push("brand", brand);
        }
        if let Some(category) = &self.category {
            push("category", category);
        }
        if let Some(min) = &self.min {
            push("min", min);
        }
        if let Some(max) = &self.max {
            push("max", max);
        }
        if self.in_stock {
            push("stock", "1");
        }
        if let Some(sort) = &self.sort {
            push("sort", sort);
        }
        if let Some(view) = &self.view {
            push("view", view);
        }
        if let Some(page) = self.page {
            push("page", &page.to_string());
        }
        pairs
    }
}

#[derive(Debug, Args)]
pub struct DetailArgs {
    /// Product id to show
    #[arg(long)]
    pub id: Option<String>,
    /// Query string from a product link, e.g. "productId=sample-1"
    #[arg(long, value_name = "QUERY")]
    pub query: Option<String>,
    #[command(flatten)]
    pub source: SourceArgs,
}

impl DetailArgs {
    pub(crate) fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self
            .query
            .as_deref()
            .map(parse_query_string)
            .unwrap_or_default();
        if let Some(id) = &self.id {
            pairs.insert(0, ("id".to_owned(), id.clone()));
        }
        pairs
    }
}

/// Stands in for the API under `--samples`. Every request fails like an
/// unreachable host, which the page logic answers with sample data.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OfflineSource;

impl OfflineSource {
    fn reject(url: &str) -> BoxFuture<'static, Result<RawPayload, FetchError>> {
        future::ready(Err(FetchError::Unreachable {
            url: url.to_owned(),
            reason: "sample mode".to_owned(),
        }))
        .boxed()
    }
}

impl ProductSource for OfflineSource {
    fn fetch_products(
        &self,
        _filters: Option<&Filters>,
    ) -> BoxFuture<'static, Result<RawPayload, FetchError>> {
        Self::reject("offline://products")
    }

    fn fetch_product_by_id(&self, id: &str) -> BoxFuture<'static, Result<RawPayload, FetchError>> {
        Self::reject(&format!("offline://products/{id}"))
    }
}

fn build_source(config: &CatalogConfig, args: &SourceArgs) -> anyhow::Result<Arc<dyn ProductSource>> {
    if args.samples {
        return Ok(Arc::new(OfflineSource));
    }
    if let Some(path) = &args.fixture {
        let fixture = FixtureSource::from_file(path)
            .with_context(|| format!("failed to load fixture {}", path.display()))?;
        return Ok(Arc::new(fixture));
    }
    let client = CatalogClient::new(config, USER_AGENT).context("failed to build catalog client")?;
    Ok(Arc::new(client))
}

/// Renders the catalog listing for the given filters.
///
/// # Errors
///
/// Returns an error if the query flags do not parse, the source cannot be
/// built, the page cannot host the catalog, or the output cannot be written.
/// A failed fetch is not an error: the page shows samples or an error panel.
pub(crate) async fn run_list(mut config: CatalogConfig, args: &ListArgs) -> anyhow::Result<()> {
    if args.source.samples {
        config.fallback_enabled = true;
    }
    let state = QueryState::from_query_pairs(args.query_pairs(), config.page_size)
        .context("invalid catalog query")?;
    let source = build_source(&config, &args.source)?;

    let mut controller = CatalogController::new(
        source,
        MemoryDocument::listing_page(),
        config,
        Arc::new(MemoryHandoff::new()),
    )
    .with_state(state);

    let (_, events) = mpsc::channel(1);
    match controller.run(events).await {
        RunExit::Closed => {}
        RunExit::Failed => anyhow::bail!("the catalog page could not be rendered"),
        RunExit::Navigate { url } => anyhow::bail!("unexpected navigation to {url}"),
    }

    match controller.phase() {
        Phase::Errored(class) => tracing::warn!(?class, "catalog rendered with an error panel"),
        phase => tracing::info!(
            ?phase,
            shown = controller.painted_ids().len(),
            query = %controller.query_string(),
            "catalog rendered"
        ),
    }

    let body = if args.json {
        serde_json::to_string_pretty(&controller.store().view())?
    } else {
        controller.document().to_html("Catalog")
    };
    write_output(args.source.out.as_deref(), &body)
}

/// Renders one product's detail page.
///
/// # Errors
///
/// Returns an error if the source cannot be built, the page has nowhere to
/// render, or the output cannot be written. Missing or unknown products
/// render their panel and are not errors.
pub(crate) async fn run_detail(mut config: CatalogConfig, args: &DetailArgs) -> anyhow::Result<()> {
    if args.source.samples {
        config.fallback_enabled = true;
    }
    let source = build_source(&config, &args.source)?;
    let mut page = DetailPage::new(
        source,
        MemoryDocument::detail_page(),
        config,
        Arc::new(MemoryHandoff::new()),
    );

    let outcome = page.load(&args.query_pairs()).await;
    let title = match &outcome {
        DetailOutcome::Failed => anyhow::bail!("the product page could not be rendered"),
        DetailOutcome::Shown { product, fallback } => {
            tracing::info!(id = %product.id, fallback, "product rendered");
            product.name.clone()
        }
        other => {
            tracing::warn!(outcome = ?other, "product page shows an error panel");
            "Product".to_owned()
        }
    };

    write_output(args.source.out.as_deref(), &page.document().to_html(&title))
}

fn write_output(out: Option<&Path>, body: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, body)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = body.len(), "page written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(body.as_bytes())?;
            if !body.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}
