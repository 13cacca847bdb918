//! Run coordinator - main tracking loop
//!
//! Walks the configured seed URLs strictly in order. In category mode each
//! seed is expanded into product URLs which are then visited one by one with a
//! fixed pause between consecutive fetches.

use crate::config::Config;
use crate::crawler::category::{expand_category, CategorySettings};
use crate::crawler::fetcher::{HttpFetcher, PageFetcher};
use crate::crawler::processor::process_product;
use crate::record::PageRecord;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Everything a run needs, resolved from configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    /// Seed URLs in processing order
    pub urls: Vec<String>,

    /// Category expansion settings; `None` processes seeds as product pages
    pub category: Option<CategorySettings>,

    /// Pause between consecutive product fetches of one category
    pub request_delay: Duration,

    /// Where the raw HTML of the last product page goes, if anywhere
    pub debug_dump: Option<PathBuf>,
}

impl RunSettings {
    /// Resolves run settings from a validated configuration
    pub fn from_config(config: &Config) -> Self {
        let category = config
            .category
            .enable_category_mode
            .then(|| CategorySettings::from(&config.category));

        let debug_dump = config
            .output
            .debug_html_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        Self {
            urls: config.targets.urls.clone(),
            category,
            request_delay: Duration::from_millis(config.fetcher.request_delay_ms),
            debug_dump,
        }
    }
}

/// Main run coordinator
pub struct Coordinator<F> {
    settings: RunSettings,
    fetcher: F,
}

impl Coordinator<HttpFetcher> {
    /// Creates a coordinator that fetches over HTTP
    ///
    /// # Arguments
    ///
    /// * `config` - A validated configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(TrackerError)` - The HTTP client could not be built
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        let fetcher = HttpFetcher::from_config(&config.fetcher)?;
        Ok(Self::new(RunSettings::from_config(config), fetcher))
    }
}

impl<F: PageFetcher> Coordinator<F> {
    /// Creates a coordinator with an explicit fetcher
    pub fn new(settings: RunSettings, fetcher: F) -> Self {
        Self { settings, fetcher }
    }

    /// Runs all seed URLs to completion and returns the collected records
    ///
    /// Per-URL failures are logged and skipped; the returned list simply omits
    /// them.
    pub async fn run(&self) -> Vec<PageRecord> {
        let start_time = Instant::now();
        let mut records = Vec::new();

        tracing::info!(
            "Starting run over {} seed URLs (category mode: {})",
            self.settings.urls.len(),
            self.settings.category.is_some()
        );

        for seed in &self.settings.urls {
            match &self.settings.category {
                Some(category) => self.run_category(seed, category, &mut records).await,
                None => {
                    if let Some(record) = self.process(seed).await {
                        records.push(record);
                    }
                }
            }
        }

        tracing::info!(
            "Run completed: {} records in {:?}",
            records.len(),
            start_time.elapsed()
        );

        records
    }

    /// Expands one category page and processes every product it links to
    async fn run_category(
        &self,
        category_url: &str,
        category: &CategorySettings,
        records: &mut Vec<PageRecord>,
    ) {
        let product_urls = expand_category(&self.fetcher, category_url, category).await;
        let total = product_urls.len();

        for (index, product_url) in product_urls.iter().enumerate() {
            tracing::info!("Product {}/{} from {}", index + 1, total, category_url);

            if let Some(record) = self.process(product_url).await {
                records.push(record);
            }

            if index + 1 < total && !self.settings.request_delay.is_zero() {
                tokio::time::sleep(self.settings.request_delay).await;
            }
        }
    }

    async fn process(&self, url: &str) -> Option<PageRecord> {
        process_product(&self.fetcher, url, self.settings.debug_dump.as_deref()).await
    }
}

/// Runs a complete tracking pass over HTTP
///
/// # Example
///
/// ```no_run
/// use price_tracker::config::load_config;
/// use price_tracker::crawler::run_tracker;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// let records = run_tracker(&config).await?;
/// println!("{} products", records.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_tracker(config: &Config) -> crate::Result<Vec<PageRecord>> {
    let coordinator = Coordinator::from_config(config)?;
    Ok(coordinator.run().await)
}
