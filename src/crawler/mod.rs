//! Retrieval and extraction pipeline
//!
//! This module contains the core tracking logic, including:
//! - HTTP fetching with retry and exponential backoff
//! - Per-site product field extraction
//! - Category page expansion into product URLs
//! - Per-URL processing and overall run coordination

mod category;
mod coordinator;
mod extractor;
mod fetcher;
mod processor;

pub use category::{collect_product_links, expand_category, CategorySettings};
pub use coordinator::{run_tracker, Coordinator, RunSettings};
pub use extractor::{extract_fields, extract_title, first_match, ProductFields};
pub use fetcher::{
    browser_headers, build_http_client, HttpFetcher, PageFetcher, RetryPolicy,
    BROWSER_USER_AGENT,
};
pub use processor::{build_record, process_product};
