use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Local storage keys. Changing one orphans what visitors already have stored.
pub mod storage_keys {
    pub const THEME: &str = "cv-theme";
    pub const ANALYTICS: &str = "cv-analytics-events";
    pub const CV_VERSION: &str = "cv-last-version";
}

pub const DEFAULT_ANALYTICS_CAPACITY: usize = 100;

/// Application configuration loaded from environment variables.
/// Every variable is optional; defaults match the published page.
#[derive(Debug, Clone)]
pub struct Config {
    pub storage_path: PathBuf,
    pub download_dir: PathBuf,
    /// The embedded CV document; the page reports it missing when absent.
    pub pdf_path: PathBuf,
    pub cv_version: String,
    pub page_url: String,
    pub page_title: String,
    pub qr_image_url: Option<String>,
    pub analytics_capacity: usize,
    pub suggestion_delay: Duration,
    pub prefers_dark: bool,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage_path: PathBuf::from(".cv-page/storage.json"),
            download_dir: PathBuf::from("."),
            pdf_path: PathBuf::from("cv.pdf"),
            cv_version: "2025-01-01".to_string(),
            page_url: "https://example.com/cv".to_string(),
            page_title: "Mon CV".to_string(),
            qr_image_url: None,
            analytics_capacity: DEFAULT_ANALYTICS_CAPACITY,
            suggestion_delay: Duration::from_secs(45),
            prefers_dark: false,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        let analytics_capacity = match optional_env("CV_ANALYTICS_CAPACITY") {
            Some(raw) => raw
                .parse::<usize>()
                .context("CV_ANALYTICS_CAPACITY must be a positive integer")?,
            None => defaults.analytics_capacity,
        };
        if analytics_capacity == 0 {
            bail!("CV_ANALYTICS_CAPACITY must be at least 1");
        }

        let suggestion_delay = match optional_env("CV_SUGGESTION_DELAY_SECS") {
            Some(raw) => Duration::from_secs(
                raw.parse::<u64>()
                    .context("CV_SUGGESTION_DELAY_SECS must be a number of seconds")?,
            ),
            None => defaults.suggestion_delay,
        };

        let prefers_dark = match optional_env("CV_PREFERS_DARK") {
            Some(raw) => parse_flag(&raw)
                .with_context(|| format!("CV_PREFERS_DARK must be true or false, got '{raw}'"))?,
            None => defaults.prefers_dark,
        };

        Ok(Config {
            storage_path: optional_env("CV_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_path),
            download_dir: optional_env("CV_DOWNLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.download_dir),
            pdf_path: optional_env("CV_PDF_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.pdf_path),
            cv_version: optional_env("CV_VERSION").unwrap_or(defaults.cv_version),
            page_url: optional_env("CV_PAGE_URL").unwrap_or(defaults.page_url),
            page_title: optional_env("CV_PAGE_TITLE").unwrap_or(defaults.page_title),
            qr_image_url: optional_env("CV_QR_IMAGE_URL"),
            analytics_capacity,
            suggestion_delay,
            prefers_dark,
            rust_log: optional_env("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }
}

/// Returns the variable's value, treating unset and blank the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
