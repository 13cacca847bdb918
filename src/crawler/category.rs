//! Category (listing page) expansion
//!
//! Turns a listing page into a bounded, deduplicated list of absolute product
//! URLs.

use crate::config::CategoryConfig;
use crate::crawler::extractor::site_origin;
use crate::crawler::fetcher::PageFetcher;
use crate::links::resolve_href;
use crate::site::classify;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Settings for discovering product links on a category page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySettings {
    /// CSS selector for product anchors
    pub link_selector: String,

    /// Fragment every product URL must contain
    pub product_path_marker: String,

    /// Upper bound on anchors taken from one page
    pub max_products: usize,
}

impl From<&CategoryConfig> for CategorySettings {
    fn from(config: &CategoryConfig) -> Self {
        Self {
            link_selector: config.product_link_selector.clone(),
            product_path_marker: config.product_path_marker.clone(),
            max_products: config.max_products,
        }
    }
}

/// Collects product URLs from an already parsed category page
///
/// At most `max_products` anchors matching `selector` are considered, in
/// document order. Each href is made absolute, kept only if it contains the
/// product path marker, and deduplicated by exact string with first-seen
/// order preserved.
pub fn collect_product_links(
    document: &Html,
    category_url: &Url,
    selector: &Selector,
    settings: &CategorySettings,
) -> Vec<String> {
    let origin = site_origin(classify(category_url.as_str()), category_url.as_str());
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for anchor in document.select(selector).take(settings.max_products) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };

        let Some(absolute) = resolve_href(href, &origin, category_url) else {
            continue;
        };

        if !absolute.contains(&settings.product_path_marker) {
            tracing::debug!("Ignoring non-product link {}", absolute);
            continue;
        }

        if seen.insert(absolute.clone()) {
            links.push(absolute);
        }
    }

    links
}

/// Fetches a category page and returns the product URLs it links to
///
/// Failures (fetch exhausted, unusable selector or URL) are logged and yield
/// an empty list, so one bad category never aborts the run.
pub async fn expand_category<F>(
    fetcher: &F,
    category_url: &str,
    settings: &CategorySettings,
) -> Vec<String>
where
    F: PageFetcher + ?Sized,
{
    let base = match Url::parse(category_url) {
        Ok(url) => url,
        Err(e) => {
            tracing::error!("Invalid category URL {}: {}", category_url, e);
            return Vec::new();
        }
    };

    let selector = match Selector::parse(&settings.link_selector) {
        Ok(selector) => selector,
        Err(e) => {
            tracing::error!(
                "Invalid product link selector '{}': {:?}",
                settings.link_selector,
                e
            );
            return Vec::new();
        }
    };

    tracing::info!("Expanding category {}", category_url);
    let html = match fetcher.fetch(category_url).await {
        Ok(html) => html,
        Err(e) => {
            tracing::error!("Failed to fetch category {}: {}", category_url, e);
            return Vec::new();
        }
    };

    let document = Html::parse_document(&html);
    let links = collect_product_links(&document, &base, &selector, settings);
    tracing::info!(
        "Found {} product links on {}",
        links.len(),
        category_url
    );
    links
}
