//! Runtime Configuration
//!
//! Read once at boot from `<meta>` tags and the page location.

use console_logger::LoggerConfig;
use tracing::Level;
use web_sys::Document;

pub const API_ORIGIN_META: &str = "seiyuu-api-origin";
pub const LOG_LEVEL_META: &str = "seiyuu-log-level";

const FAVORITE_PATH: &str = "/favorite/seiyuu";
const RANK_PATH: &str = "/rank/seiyuu";

/// Where the backend endpoints live
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApiConfig {
    origin: String,
}

impl ApiConfig {
    /// Empty origin means page-relative URLs
    pub fn new(origin: impl Into<String>) -> Self {
        let origin = origin.into();
        let origin = origin.trim().trim_end_matches('/').to_string();
        Self { origin }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn favorite_url(&self) -> String {
        format!("{}{}", self.origin, FAVORITE_PATH)
    }

    pub fn rank_url(&self) -> String {
        format!("{}{}", self.origin, RANK_PATH)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub log_level: Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            log_level: Level::INFO,
        }
    }
}

impl AppConfig {
    /// Resolve from raw values: meta origin wins over the location origin
    pub fn resolve(meta_origin: Option<&str>, location_origin: Option<&str>, log_level: Option<&str>) -> Self {
        let origin = meta_origin
            .filter(|o| !o.trim().is_empty())
            .or(location_origin)
            .unwrap_or("");
        let log_level = log_level
            .and_then(parse_level)
            .unwrap_or(Level::INFO);
        Self {
            api: ApiConfig::new(origin),
            log_level,
        }
    }

    pub fn from_document(doc: &Document) -> Self {
        let meta_origin = meta_content(doc, API_ORIGIN_META);
        let log_level = meta_content(doc, LOG_LEVEL_META);
        let location_origin = doc.location().and_then(|loc| loc.origin().ok());
        Self::resolve(meta_origin.as_deref(), location_origin.as_deref(), log_level.as_deref())
    }

    pub fn logger(&self) -> LoggerConfig {
        LoggerConfig {
            max_level: self.log_level,
            ..LoggerConfig::default()
        }
    }
}

/// Level names only; numeric forms fall back to the default
fn parse_level(raw: &str) -> Option<Level> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}

fn meta_content(doc: &Document, name: &str) -> Option<String> {
    doc.query_selector(&format!("meta[name=\"{}\"]", name))
        .ok()
        .flatten()
        .and_then(|el| el.get_attribute("content"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_join_origin() {
        let api = ApiConfig::new("http://host/");
        assert_eq!(api.favorite_url(), "http://host/favorite/seiyuu");
        assert_eq!(api.rank_url(), "http://host/rank/seiyuu");
    }

    #[test]
    fn test_empty_origin_gives_relative_urls() {
        let api = ApiConfig::new("");
        assert_eq!(api.favorite_url(), "/favorite/seiyuu");
    }

    #[test]
    fn test_meta_origin_overrides_location() {
        let config = AppConfig::resolve(Some("http://127.0.0.1:5000"), Some("http://host"), None);
        assert_eq!(config.api.origin(), "http://127.0.0.1:5000");

        let config = AppConfig::resolve(Some("  "), Some("http://host"), None);
        assert_eq!(config.api.origin(), "http://host");

        let config = AppConfig::resolve(None, None, None);
        assert_eq!(config.api.origin(), "");
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(AppConfig::resolve(None, None, Some("DEBUG")).log_level, Level::DEBUG);
        assert_eq!(AppConfig::resolve(None, None, Some("warn")).log_level, Level::WARN);
        assert_eq!(AppConfig::resolve(None, None, Some("loud")).log_level, Level::INFO);
        assert_eq!(AppConfig::resolve(None, None, Some(" Trace ")).log_level, Level::TRACE);
        assert_eq!(AppConfig::default().logger().max_level, Level::INFO);
    }

    #[test]
    fn test_numeric_log_level_uses_default() {
        assert_eq!(AppConfig::resolve(None, None, Some("3")).log_level, Level::INFO);
        assert_eq!(AppConfig::resolve(None, None, Some("5")).log_level, Level::INFO);
    }
}
