use serde::Deserialize;

/// Main configuration structure for Price Tracker
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub targets: TargetsConfig,
    #[serde(default)]
    pub category: CategoryConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Seed URLs for the run
#[derive(Debug, Clone, Deserialize)]
pub struct TargetsConfig {
    /// Product pages, or category pages when category mode is on
    #[serde(default)]
    pub urls: Vec<String>,
}

/// Category (listing page) expansion settings
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryConfig {
    /// Treat seed URLs as listing pages and visit the products they link to
    #[serde(rename = "enable-category-mode", default)]
    pub enable_category_mode: bool,

    /// Maximum number of product links taken from one category page
    #[serde(rename = "max-products", default = "default_max_products")]
    pub max_products: usize,

    /// CSS selector matching product anchors on a category page
    #[serde(
        rename = "product-link-selector",
        default = "default_product_link_selector"
    )]
    pub product_link_selector: String,

    /// Path fragment every product page URL contains
    #[serde(rename = "product-path-marker", default = "default_product_path_marker")]
    pub product_path_marker: String,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            enable_category_mode: false,
            max_products: default_max_products(),
            product_link_selector: default_product_link_selector(),
            product_path_marker: default_product_path_marker(),
        }
    }
}

/// HTTP retrieval settings
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// Timeout applied to each attempt (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries after the first failed attempt
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// Backoff unit in milliseconds; attempt `n` waits `unit * 2^n`
    #[serde(rename = "backoff-unit-ms", default = "default_backoff_unit_ms")]
    pub backoff_unit_ms: u64,

    /// Pause between consecutive product fetches in category mode (milliseconds)
    #[serde(rename = "request-delay-ms", default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            backoff_unit_ms: default_backoff_unit_ms(),
            request_delay_ms: default_request_delay_ms(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the CSV file
    #[serde(rename = "csv-path", default = "default_csv_path")]
    pub csv_path: String,

    /// Path to the HTML report
    #[serde(rename = "report-path", default = "default_report_path")]
    pub report_path: String,

    /// Raw HTML of the most recently fetched product page
    #[serde(rename = "debug-html-path", default = "default_debug_html_path")]
    pub debug_html_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
            report_path: default_report_path(),
            debug_html_path: default_debug_html_path(),
        }
    }
}

fn default_max_products() -> usize {
    10
}

fn default_product_link_selector() -> String {
    "a[href*='/dp/']".to_string()
}

fn default_product_path_marker() -> String {
    "/dp/".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_backoff_unit_ms() -> u64 {
    1000
}

fn default_request_delay_ms() -> u64 {
    2000
}

fn default_csv_path() -> String {
    "output.csv".to_string()
}

fn default_report_path() -> String {
    "product-report.html".to_string()
}

fn default_debug_html_path() -> Option<String> {
    Some("last-page.html".to_string())
}
