//! Output record produced for each successfully processed product page

use crate::site::SiteId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stock status written when no rule matched
pub const UNKNOWN_STOCK: &str = "unknown";

/// One row of output
///
/// Created once, fully populated, and never mutated afterwards. Fields that
/// could not be extracted are empty strings, except `stock_status` which
/// falls back to [`UNKNOWN_STOCK`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PageRecord {
    pub url: String,
    pub title: String,
    pub product_name: String,
    pub price: String,
    pub stock_status: String,
    pub image_url: String,
    pub site: SiteId,
    pub retrieved_at: DateTime<Utc>,
}

impl PageRecord {
    /// CSV column names, in field order
    pub const COLUMNS: [&'static str; 8] = [
        "Url",
        "Title",
        "ProductName",
        "Price",
        "StockStatus",
        "ImageUrl",
        "Site",
        "RetrievedAt",
    ];

    /// Returns true if a price was extracted
    pub fn has_price(&self) -> bool {
        !self.price.is_empty()
    }

    /// Returns true if an image URL was extracted
    pub fn has_image(&self) -> bool {
        !self.image_url.is_empty()
    }

    /// Name to display: the product name, or the page title when none was found
    pub fn display_name(&self) -> &str {
        if self.product_name.is_empty() {
            &self.title
        } else {
            &self.product_name
        }
    }
}
