//! Selector cascades for each known site
//!
//! Every field has an ordered rule list running from the most specific,
//! most reliable selector down to broad generic fallbacks. The first rule
//! producing non-empty text wins.

use crate::site::SiteId;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use std::sync::LazyLock;

/// How a value is taken from a matched element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extract {
    /// Trimmed text content of the first match
    Text,
    /// Trimmed value of the named attribute on the first match carrying it
    Attr(&'static str),
    /// Trimmed text of the first match whose text contains the needle
    /// (case-insensitive)
    TextContaining(&'static str),
}

/// A single structural query plus the extraction step applied to its match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionRule {
    pub selector: &'static str,
    pub extract: Extract,
}

impl ExtractionRule {
    pub const fn text(selector: &'static str) -> Self {
        Self {
            selector,
            extract: Extract::Text,
        }
    }

    pub const fn attr(selector: &'static str, name: &'static str) -> Self {
        Self {
            selector,
            extract: Extract::Attr(name),
        }
    }

    pub const fn text_containing(selector: &'static str, needle: &'static str) -> Self {
        Self {
            selector,
            extract: Extract::TextContaining(needle),
        }
    }

    /// Applies the rule to a document
    ///
    /// Registered selectors come precompiled; anything else
    /// is parsed on the spot. A missing node yields `None`. A selector that
    /// does not parse is logged and also yields `None`, so one broken rule
    /// never hides the rest of the cascade.
    pub fn apply(&self, document: &Html) -> Option<String> {
        if let Some(selector) = COMPILED.get(self.selector) {
            return self.extract_with(selector, document);
        }

        match Selector::parse(self.selector) {
            Ok(selector) => self.extract_with(&selector, document),
            Err(e) => {
                tracing::warn!("Skipping malformed selector '{}': {:?}", self.selector, e);
                None
            }
        }
    }

    fn extract_with(&self, selector: &Selector, document: &Html) -> Option<String> {
        let mut matches = document.select(selector);
        let value = match self.extract {
            Extract::Text => matches.next().map(element_text),
            Extract::Attr(name) => matches
                .find_map(|element| element.value().attr(name))
                .map(|value| value.trim().to_string()),
            Extract::TextContaining(needle) => {
                let needle = needle.to_lowercase();
                matches
                    .map(element_text)
                    .find(|text| text.to_lowercase().contains(&needle))
            }
        };

        value.filter(|value| !value.is_empty())
    }
}

/// Collapses an element's text nodes into a single trimmed string
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Ordered rule cascades for every extracted field of one site
#[derive(Debug)]
pub struct SiteRules {
    pub name: &'static [ExtractionRule],
    pub price: &'static [ExtractionRule],
    pub stock: &'static [ExtractionRule],
    pub image: &'static [ExtractionRule],
}

impl SiteRules {
    /// Every rule of every field, in table order
    pub fn all(&self) -> impl Iterator<Item = &'static ExtractionRule> {
        let name: &'static [ExtractionRule] = self.name;
        name.iter()
            .chain(self.price)
            .chain(self.stock)
            .chain(self.image)
    }
}

/// Parsed selectors for every registered rule, keyed by selector text
static COMPILED: LazyLock<HashMap<&'static str, Selector>> = LazyLock::new(|| {
    [&AMAZON, &EBAY, &WALMART, &BESTBUY, &UNKNOWN]
        .into_iter()
        .flat_map(SiteRules::all)
        .filter_map(|rule| {
            Selector::parse(rule.selector)
                .ok()
                .map(|selector| (rule.selector, selector))
        })
        .collect()
});

/// Looks up the rule table for a site
pub fn rules_for(site: SiteId) -> &'static SiteRules {
    match site {
        SiteId::Amazon => &AMAZON,
        SiteId::Ebay => &EBAY,
        SiteId::Walmart => &WALMART,
        SiteId::BestBuy => &BESTBUY,
        SiteId::Unknown => &UNKNOWN,
    }
}

static AMAZON: SiteRules = SiteRules {
    name: &[
        ExtractionRule::text("#productTitle"),
        ExtractionRule::text("#title span"),
        ExtractionRule::text("h1"),
    ],
    price: &[
        ExtractionRule::text("#corePrice_feature_div .a-price .a-offscreen"),
        ExtractionRule::text("#priceblock_ourprice"),
        ExtractionRule::text("#priceblock_dealprice"),
        ExtractionRule::text(".a-price .a-offscreen"),
        ExtractionRule::text_containing("span", "$"),
    ],
    stock: &[
        ExtractionRule::text("#availability span"),
        ExtractionRule::text("#availability"),
        ExtractionRule::text("#outOfStock"),
        ExtractionRule::text_containing("span", "stock"),
    ],
    image: &[
        ExtractionRule::attr("#landingImage", "data-old-hires"),
        ExtractionRule::attr("#landingImage", "src"),
        ExtractionRule::attr("#imgBlkFront", "src"),
        ExtractionRule::attr("#main-image-container img", "src"),
        ExtractionRule::attr("meta[property='og:image']", "content"),
    ],
};

static EBAY: SiteRules = SiteRules {
    name: &[
        ExtractionRule::text("h1.x-item-title__mainTitle span"),
        ExtractionRule::text("#itemTitle"),
        ExtractionRule::text("h1"),
    ],
    price: &[
        ExtractionRule::text(".x-price-primary span"),
        ExtractionRule::text("#prcIsum"),
        ExtractionRule::text("#mm-saleDscPrc"),
        ExtractionRule::text_containing("span", "$"),
    ],
    stock: &[
        ExtractionRule::text(".x-quantity__availability"),
        ExtractionRule::text("#qtySubTxt"),
        ExtractionRule::text(".d-quantity__availability"),
        ExtractionRule::text_containing("span", "available"),
    ],
    image: &[
        ExtractionRule::attr(".ux-image-carousel-item.active img", "src"),
        ExtractionRule::attr(".ux-image-carousel-item img", "data-src"),
        ExtractionRule::attr("#icImg", "src"),
        ExtractionRule::attr("meta[property='og:image']", "content"),
    ],
};

static WALMART: SiteRules = SiteRules {
    name: &[
        ExtractionRule::text("h1[itemprop='name']"),
        ExtractionRule::text("#main-title"),
        ExtractionRule::text("h1"),
    ],
    price: &[
        ExtractionRule::text("span[itemprop='price']"),
        ExtractionRule::text("[data-testid='price-wrap'] span"),
        ExtractionRule::text_containing("span", "$"),
    ],
    stock: &[
        ExtractionRule::text("[data-testid='fulfillment-badge']"),
        ExtractionRule::text("[data-automation-id='fulfillment-badge']"),
        ExtractionRule::text_containing("span", "stock"),
    ],
    image: &[
        ExtractionRule::attr("[data-testid='hero-image'] img", "src"),
        ExtractionRule::attr("img[data-testid='hero-image']", "src"),
        ExtractionRule::attr("meta[property='og:image']", "content"),
    ],
};

static BESTBUY: SiteRules = SiteRules {
    name: &[
        ExtractionRule::text(".sku-title h1"),
        ExtractionRule::text("h1.heading-5"),
        ExtractionRule::text("h1"),
    ],
    price: &[
        ExtractionRule::text(".priceView-customer-price span"),
        ExtractionRule::text("[data-testid='customer-price'] span"),
        ExtractionRule::text_containing("span", "$"),
    ],
    stock: &[
        ExtractionRule::text(".fulfillment-add-to-cart-button button"),
        ExtractionRule::text("[data-button-state]"),
        ExtractionRule::text_containing("span", "stock"),
    ],
    image: &[
        ExtractionRule::attr("img.primary-image", "src"),
        ExtractionRule::attr(".shop-media-gallery img", "src"),
        ExtractionRule::attr("meta[property='og:image']", "content"),
    ],
};

static UNKNOWN: SiteRules = SiteRules {
    name: &[],
    price: &[],
    stock: &[],
    image: &[],
};
