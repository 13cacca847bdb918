//! Single product page processing
//!
//! fetch → parse → classify → extract → [`PageRecord`]

use crate::crawler::extractor::{extract_fields, extract_title};
use crate::crawler::fetcher::PageFetcher;
use crate::output::write_debug_dump;
use crate::record::PageRecord;
use crate::site::classify;
use chrono::Utc;
use scraper::Html;
use std::path::Path;

/// Builds a record from a fetched page body
///
/// Never fails: anything the rules cannot find is left empty. Recoverable
/// HTML syntax errors reported by the parser are logged.
pub fn build_record(url: &str, html: &str) -> PageRecord {
    let document = Html::parse_document(html);
    if !document.errors.is_empty() {
        tracing::debug!(
            "{} HTML parse errors in {} (first: {})",
            document.errors.len(),
            url,
            document.errors[0]
        );
    }

    let site = classify(url);
    let title = extract_title(&document);
    let fields = extract_fields(&document, site, url);

    PageRecord {
        url: url.to_string(),
        title,
        product_name: fields.product_name,
        price: fields.price,
        stock_status: fields.stock_status,
        image_url: fields.image_url,
        site,
        retrieved_at: Utc::now(),
    }
}

/// Fetches and extracts one product page
///
/// Returns `None` if the page could not be retrieved; the failure is logged
/// and isolated to this URL. When `debug_dump` is set, the raw body of the
/// page is written there, replacing the previous dump.
pub async fn process_product<F>(
    fetcher: &F,
    url: &str,
    debug_dump: Option<&Path>,
) -> Option<PageRecord>
where
    F: PageFetcher + ?Sized,
{
    tracing::info!("Fetching {}", url);
    let html = match fetcher.fetch(url).await {
        Ok(html) => html,
        Err(e) => {
            tracing::error!("Failed to fetch {}: {}", url, e);
            return None;
        }
    };

    if let Some(path) = debug_dump {
        if let Err(e) = write_debug_dump(path, &html) {
            tracing::warn!("Could not write debug dump {}: {}", path.display(), e);
        }
    }

    let record = build_record(url, &html);
    tracing::debug!(
        "Extracted {} [{}]: name={:?} price={:?} stock={:?}",
        record.url,
        record.site,
        record.product_name,
        record.price,
        record.stock_status
    );
    Some(record)
}
