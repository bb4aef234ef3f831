use crate::config::types::{Config, CrawlerConfig, ExtractorConfig, FetchConfig, OutputConfig};
use crate::model::{Source, PAGE_PLACEHOLDER, TERM_PLACEHOLDER};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_fetch_config(&config.fetch)?;
    validate_extractor_config(&config.extractor, config.has_search_sources())?;
    validate_output_config(&config.output)?;
    validate_sources(&config.source)?;
    Ok(())
}

/// Validates crawl loop configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.request_delay_ms > 60_000 {
        return Err(ConfigError::Validation(format!(
            "request_delay_ms must be <= 60000ms, got {}ms",
            config.request_delay_ms
        )));
    }

    if config.max_pages_per_source < 1 {
        return Err(ConfigError::Validation(
            "max_pages_per_source must be >= 1".to_string(),
        ));
    }

    if config.stop_after_empty_pages < 1 {
        return Err(ConfigError::Validation(
            "stop_after_empty_pages must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates HTTP fetch configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 || config.timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be between 1 and 300, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates extractor selectors and the search URL template
fn validate_extractor_config(
    config: &ExtractorConfig,
    has_search_sources: bool,
) -> Result<(), ConfigError> {
    if config.card_selectors.is_empty() {
        return Err(ConfigError::Validation(
            "card_selectors must contain at least one selector".to_string(),
        ));
    }

    for selector in &config.card_selectors {
        validate_selector(selector)?;
    }
    validate_selector(&config.name_selector)?;

    for selector in [&config.city_selector, &config.rating_selector, &config.next_page_selector]
        .into_iter()
        .flatten()
    {
        validate_selector(selector)?;
    }

    match &config.search_url {
        Some(template) => {
            if !template.contains(TERM_PLACEHOLDER) {
                return Err(ConfigError::Validation(format!(
                    "search_url must contain a {} placeholder",
                    TERM_PLACEHOLDER
                )));
            }
            let probe = template
                .replace(TERM_PLACEHOLDER, "probe")
                .replace(PAGE_PLACEHOLDER, "1");
            validate_http_url(&probe)?;
        }
        None => {
            if has_search_sources {
                return Err(ConfigError::Validation(
                    "search_url is required when search-term sources are configured".to_string(),
                ));
            }
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.export_path.is_empty() {
        return Err(ConfigError::Validation(
            "export_path cannot be empty".to_string(),
        ));
    }

    if config.progress_path.is_empty() {
        return Err(ConfigError::Validation(
            "progress_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the source list
fn validate_sources(sources: &[Source]) -> Result<(), ConfigError> {
    if sources.is_empty() {
        return Err(ConfigError::Validation(
            "at least one source must be configured".to_string(),
        ));
    }

    for source in sources {
        match source {
            Source::City { name, url } => {
                if name.trim().is_empty() {
                    return Err(ConfigError::Validation(
                        "city source name cannot be empty".to_string(),
                    ));
                }
                let probe = url.replace(PAGE_PLACEHOLDER, "1");
                validate_http_url(&probe).map_err(|_| {
                    ConfigError::InvalidUrl(format!("Invalid URL for city '{}': {}", name, url))
                })?;
            }
            Source::SearchTerm { term } => {
                if term.trim().is_empty() {
                    return Err(ConfigError::Validation(
                        "search term cannot be empty".to_string(),
                    ));
                }
            }
        }
    }

    Ok(())
}

/// Checks that a selector parses as valid CSS
fn validate_selector(selector: &str) -> Result<(), ConfigError> {
    Selector::parse(selector)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidSelector(format!("'{}': {}", selector, e)))
}

/// Checks that a string parses as an http(s) URL
fn validate_http_url(candidate: &str) -> Result<(), ConfigError> {
    let url = Url::parse(candidate)
        .map_err(|e| ConfigError::InvalidUrl(format!("'{}': {}", candidate, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "'{}' must use an http or https scheme",
            candidate
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor_config() -> ExtractorConfig {
        ExtractorConfig {
            card_selectors: vec![".hotel-card".to_string()],
            name_selector: ".name".to_string(),
            city_selector: None,
            rating_selector: None,
            next_page_selector: None,
            search_url: None,
        }
    }

    #[test]
    fn test_validate_selector() {
        assert!(validate_selector("h3.hotel-name").is_ok());
        assert!(validate_selector("[data-test-id=\"hotel-name\"]").is_ok());
        assert!(validate_selector("..broken").is_err());
    }

    #[test]
    fn test_validate_http_url() {
        assert!(validate_http_url("https://example.com/hotels").is_ok());
        assert!(validate_http_url("http://localhost:8080/").is_ok());
        assert!(validate_http_url("ftp://example.com/").is_err());
        assert!(validate_http_url("not a url").is_err());
    }

    #[test]
    fn test_crawler_config_bounds() {
        let mut config = CrawlerConfig::default();
        assert!(validate_crawler_config(&config).is_ok());

        config.request_delay_ms = 60_001;
        assert!(validate_crawler_config(&config).is_err());

        config = CrawlerConfig::default();
        config.max_pages_per_source = 0;
        assert!(validate_crawler_config(&config).is_err());

        config = CrawlerConfig::default();
        config.stop_after_empty_pages = 0;
        assert!(validate_crawler_config(&config).is_err());
    }

    #[test]
    fn test_fetch_config_bounds() {
        let mut config = FetchConfig::default();
        assert!(validate_fetch_config(&config).is_ok());

        config.user_agent = "  ".to_string();
        assert!(validate_fetch_config(&config).is_err());

        config = FetchConfig::default();
        config.timeout_secs = 0;
        assert!(validate_fetch_config(&config).is_err());
        config.timeout_secs = 301;
        assert!(validate_fetch_config(&config).is_err());
    }

    #[test]
    fn test_extractor_requires_card_selectors() {
        let mut config = extractor_config();
        config.card_selectors.clear();
        assert!(validate_extractor_config(&config, false).is_err());
    }

    #[test]
    fn test_extractor_rejects_broken_selector() {
        let mut config = extractor_config();
        config.card_selectors = vec!["..broken".to_string()];
        assert!(validate_extractor_config(&config, false).is_err());
    }

    #[test]
    fn test_search_url_required_with_search_sources() {
        let config = extractor_config();
        assert!(validate_extractor_config(&config, false).is_ok());
        assert!(validate_extractor_config(&config, true).is_err());
    }

    #[test]
    fn test_search_url_needs_term_placeholder() {
        let mut config = extractor_config();
        config.search_url = Some("https://example.com/search?page={page}".to_string());
        assert!(validate_extractor_config(&config, true).is_err());

        config.search_url = Some("https://example.com/search?q={term}".to_string());
        assert!(validate_extractor_config(&config, true).is_ok());
    }

    #[test]
    fn test_sources_must_not_be_empty() {
        assert!(validate_sources(&[]).is_err());
    }

    #[test]
    fn test_city_source_url_is_checked() {
        let sources = vec![Source::City {
            name: "Tehran".to_string(),
            url: "not a url".to_string(),
        }];
        assert!(matches!(
            validate_sources(&sources).unwrap_err(),
            ConfigError::InvalidUrl(_)
        ));

        let sources = vec![Source::City {
            name: "Tehran".to_string(),
            url: "https://example.com/tehran?page={page}".to_string(),
        }];
        assert!(validate_sources(&sources).is_ok());
    }

    #[test]
    fn test_blank_search_term_rejected() {
        let sources = vec![Source::SearchTerm {
            term: "   ".to_string(),
        }];
        assert!(validate_sources(&sources).is_err());
    }
}
