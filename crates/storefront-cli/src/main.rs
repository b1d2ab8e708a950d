mod page;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::page::{DetailArgs, ListArgs};

#[derive(Debug, Parser)]
#[command(name = "storefront")]
#[command(about = "Render storefront catalog and product pages to HTML")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render the filterable catalog listing
    List(ListArgs),
    /// Render a single product's detail page
    Detail(DetailArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let app = storefront_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(app.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = storefront_core::resolve_catalog_config(&app)?;
    tracing::debug!(env = %app.env, api = %config.base_api_url, "configuration loaded");

    match cli.command {
        Commands::List(args) => page::run_list(config, &args).await,
        Commands::Detail(args) => page::run_detail(config, &args).await,
    }
}
