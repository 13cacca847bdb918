//! Site classification and per-site extraction rules
//!
//! A URL is classified exactly once into a [`SiteId`]; the extractor then looks
//! up that site's rule table in the registry instead of re-checking the URL.

mod rules;

pub use rules::{rules_for, Extract, ExtractionRule, SiteRules};

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Known e-commerce sites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteId {
    Amazon,
    Ebay,
    Walmart,
    BestBuy,
    Unknown,
}

/// Host substrings in priority order
const SITE_PATTERNS: &[(&str, SiteId)] = &[
    ("amazon.", SiteId::Amazon),
    ("ebay.", SiteId::Ebay),
    ("walmart.", SiteId::Walmart),
    ("bestbuy.", SiteId::BestBuy),
];

impl SiteId {
    /// All known sites, in classification order
    pub const KNOWN: [SiteId; 4] = [
        SiteId::Amazon,
        SiteId::Ebay,
        SiteId::Walmart,
        SiteId::BestBuy,
    ];

    /// Label written to CSV and shown on report badges
    pub fn label(&self) -> &'static str {
        match self {
            SiteId::Amazon => "amazon",
            SiteId::Ebay => "ebay",
            SiteId::Walmart => "walmart",
            SiteId::BestBuy => "bestbuy",
            SiteId::Unknown => "unknown",
        }
    }

    /// Canonical origin used to absolutize root-relative paths
    pub fn origin(&self) -> Option<&'static str> {
        match self {
            SiteId::Amazon => Some("https://www.amazon.com"),
            SiteId::Ebay => Some("https://www.ebay.com"),
            SiteId::Walmart => Some("https://www.walmart.com"),
            SiteId::BestBuy => Some("https://www.bestbuy.com"),
            SiteId::Unknown => None,
        }
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifies a URL by the e-commerce site it belongs to
///
/// Only the host is inspected, so the result never depends on page content.
/// Unparseable URLs and hosts without a known pattern are `Unknown`.
///
/// # Examples
///
/// ```
/// use price_tracker::site::{classify, SiteId};
///
/// assert_eq!(classify("https://www.amazon.de/dp/B00TEST"), SiteId::Amazon);
/// assert_eq!(classify("https://shop.example.com/item/1"), SiteId::Unknown);
/// ```
pub fn classify(url: &str) -> SiteId {
    let host = match Url::parse(url).ok().and_then(|u| u.host_str().map(str::to_lowercase)) {
        Some(host) => host,
        None => return SiteId::Unknown,
    };

    SITE_PATTERNS
        .iter()
        .find(|(pattern, _)| host.contains(pattern))
        .map(|(_, site)| *site)
        .unwrap_or(SiteId::Unknown)
}
