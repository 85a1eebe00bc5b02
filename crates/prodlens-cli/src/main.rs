mod compare;
mod finder;
mod settings;
mod updates;
mod views;

use clap::{Parser, Subcommand};
use prodlens_client::ProductClient;
use prodlens_core::{
    load_catalog_or_default, AppConfig, LocalStore, PriceRange, ProductFilters, Settings, SortKey,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "prodlens")]
#[command(about = "Compare products, search with filters, and follow product news")]
struct Cli {
    /// Use built-in sample data instead of calling a provider
    #[arg(long, global = true, env = "PRODLENS_OFFLINE")]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare two products side by side
    Compare {
        product1: String,
        product2: String,
    },
    /// Search for products matching a query
    Find {
        query: String,
        /// Lower bound of the price range, in dollars
        #[arg(long, default_value_t = 0)]
        min_price: u64,
        /// Upper bound of the price range, in dollars
        #[arg(long, default_value_t = PriceRange::SLIDER_MAX)]
        max_price: u64,
        /// Only show products in this category (repeatable)
        #[arg(long = "category")]
        categories: Vec<String>,
        /// Only show products from this brand (repeatable)
        #[arg(long = "brand")]
        brands: Vec<String>,
        /// relevance, price-low, price-high, or rating
        #[arg(long, default_value = "relevance")]
        sort: SortKey,
    },
    /// Show recent news for a category
    Updates {
        /// Defaults to the first subscribed category
        category: Option<String>,
    },
    /// Follow a category's updates
    Subscribe { category: String },
    /// Stop following a category's updates
    Unsubscribe { category: String },
    /// List followed categories
    Subscriptions,
    /// Save the Perplexity API key used in direct mode
    SetKey { key: String },
    /// Show the finder facets and update categories
    Catalog,
}

fn build_filters(
    min_price: u64,
    max_price: u64,
    categories: &[String],
    brands: &[String],
    sort: SortKey,
) -> anyhow::Result<ProductFilters> {
    let mut filters = ProductFilters {
        price_range: PriceRange::new(min_price, max_price)?,
        sort,
        ..ProductFilters::default()
    };
    for category in categories {
        if !filters.categories.contains(category) {
            filters.toggle_category(category);
        }
    }
    for brand in brands {
        if !filters.brands.contains(brand) {
            filters.toggle_brand(brand);
        }
    }
    Ok(filters)
}

fn build_client(
    config: &AppConfig,
    settings: &Settings,
    offline: bool,
) -> anyhow::Result<ProductClient> {
    if offline {
        tracing::debug!("offline mode; using built-in sample data");
        return Ok(ProductClient::fixture());
    }
    Ok(ProductClient::from_config(
        config,
        settings.api_key.as_deref(),
    )?)
}

/// An unreadable settings file must not block commands that never touch it.
fn open_settings(path: &std::path::Path) -> anyhow::Result<(LocalStore, Settings)> {
    let store = LocalStore::open_or_empty(path)?;
    let settings = Settings::load(&store);
    Ok((store, settings))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = prodlens_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let (mut store, mut settings) = open_settings(&config.settings_path)?;
    let catalog = load_catalog_or_default(&config.catalog_path)?;
    tracing::debug!(provider = %config.provider, offline = cli.offline, "cli starting");

    match cli.command {
        Commands::Compare { product1, product2 } => {
            let client = build_client(&config, &settings, cli.offline)?;
            compare::run_compare(&client, &product1, &product2).await?;
        }
        Commands::Find {
            query,
            min_price,
            max_price,
            categories,
            brands,
            sort,
        } => {
            let filters = build_filters(min_price, max_price, &categories, &brands, sort)?;
            let client = build_client(&config, &settings, cli.offline)?;
            finder::run_find(&client, &query, &filters).await?;
        }
        Commands::Updates { category } => {
            let client = build_client(&config, &settings, cli.offline)?;
            updates::run_updates(&client, category.as_deref(), &settings, &catalog).await?;
        }
        Commands::Subscribe { category } => {
            settings::run_subscribe(&mut store, &mut settings, &catalog, &category)?;
        }
        Commands::Unsubscribe { category } => {
            settings::run_unsubscribe(&mut store, &mut settings, &category)?;
        }
        Commands::Subscriptions => settings::run_subscriptions(&settings),
        Commands::SetKey { key } => settings::run_set_key(&mut store, &mut settings, &key)?,
        Commands::Catalog => settings::run_catalog(&catalog, &settings),
    }

    Ok(())
}
