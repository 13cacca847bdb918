use crate::config::types::{CategoryConfig, Config, FetcherConfig, OutputConfig, TargetsConfig};
use crate::{ConfigError, ConfigResult};
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
///
/// Any failure here is fatal: the run is aborted before the first fetch.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_targets(&config.targets)?;
    validate_category_config(&config.category)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the seed URL list
fn validate_targets(targets: &TargetsConfig) -> ConfigResult<()> {
    if targets.urls.is_empty() {
        return Err(ConfigError::Validation(
            "targets.urls must contain at least one URL".to_string(),
        ));
    }

    for raw in &targets.urls {
        let url = Url::parse(raw)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid target URL '{}': {}", raw, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "Target URL '{}' must use http or https",
                raw
            )));
        }
    }

    Ok(())
}

/// Validates category expansion settings
fn validate_category_config(config: &CategoryConfig) -> ConfigResult<()> {
    if config.max_products < 1 {
        return Err(ConfigError::Validation(format!(
            "max-products must be >= 1, got {}",
            config.max_products
        )));
    }

    Selector::parse(&config.product_link_selector).map_err(|e| {
        ConfigError::InvalidSelector(format!("'{}': {:?}", config.product_link_selector, e))
    })?;

    if config.product_path_marker.trim().is_empty() {
        return Err(ConfigError::Validation(
            "product-path-marker cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates fetcher settings
fn validate_fetcher_config(config: &FetcherConfig) -> ConfigResult<()> {
    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> ConfigResult<()> {
    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv-path cannot be empty".to_string(),
        ));
    }

    if config.report_path.is_empty() {
        return Err(ConfigError::Validation(
            "report-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
