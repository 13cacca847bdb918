//! Product field extraction
//!
//! Applies a site's rule cascades to a parsed page. The page title is read
//! for every site; product fields only for sites with a rule table.

use crate::links::{absolutize, origin_of};
use crate::record::UNKNOWN_STOCK;
use crate::site::{rules_for, ExtractionRule, SiteId};
use scraper::{Html, Selector};
use url::Url;

/// Site-specific fields extracted from a product page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFields {
    pub product_name: String,
    pub price: String,
    pub stock_status: String,
    pub image_url: String,
}

impl Default for ProductFields {
    fn default() -> Self {
        Self {
            product_name: String::new(),
            price: String::new(),
            stock_status: UNKNOWN_STOCK.to_string(),
            image_url: String::new(),
        }
    }
}

/// Returns the first non-empty result of an ordered rule cascade
///
/// Rules after the first hit are not evaluated.
pub fn first_match(rules: &[ExtractionRule], document: &Html) -> Option<String> {
    rules.iter().find_map(|rule| rule.apply(document))
}

/// Extracts the trimmed `<title>` text, or an empty string
pub fn extract_title(document: &Html) -> String {
    let Ok(title_selector) = Selector::parse("title") else {
        return String::new();
    };

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Extracts name, price, stock status and image URL for `site`
///
/// Missing fields are empty strings; a missing stock status is
/// [`UNKNOWN_STOCK`]. Root-relative image paths are made absolute with the
/// site's canonical origin, falling back to the origin of `url`.
///
/// # Example
///
/// ```
/// use price_tracker::crawler::extract_fields;
/// use price_tracker::site::SiteId;
/// use scraper::Html;
///
/// let html = r#"<html><body>
///     <span id="productTitle"> Desk Lamp </span>
///     <img id="landingImage" src="//m.media-amazon.com/lamp.jpg">
/// </body></html>"#;
/// let document = Html::parse_document(html);
/// let fields = extract_fields(&document, SiteId::Amazon, "https://www.amazon.com/dp/B1");
///
/// assert_eq!(fields.product_name, "Desk Lamp");
/// assert_eq!(fields.price, "");
/// assert_eq!(fields.stock_status, "unknown");
/// assert_eq!(fields.image_url, "https://m.media-amazon.com/lamp.jpg");
/// ```
pub fn extract_fields(document: &Html, site: SiteId, url: &str) -> ProductFields {
    let rules = rules_for(site);

    let image_url = first_match(rules.image, document)
        .map(|raw| absolutize(&raw, &site_origin(site, url)))
        .unwrap_or_default();

    ProductFields {
        product_name: first_match(rules.name, document).unwrap_or_default(),
        price: first_match(rules.price, document).unwrap_or_default(),
        stock_status: first_match(rules.stock, document)
            .unwrap_or_else(|| UNKNOWN_STOCK.to_string()),
        image_url,
    }
}

/// Canonical origin of a site, or the page's own origin for unknown sites
pub(crate) fn site_origin(site: SiteId, url: &str) -> String {
    match site.origin() {
        Some(origin) => origin.to_string(),
        None => Url::parse(url)
            .map(|parsed| origin_of(&parsed))
            .unwrap_or_default(),
    }
}
