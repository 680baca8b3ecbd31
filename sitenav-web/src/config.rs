//! Per-page config embedded as JSON in `<script id="sitenav-config">`.

use anyhow::{Context, Result};
use sitenav::SiteConfig;
use sitenav::io::config::ensure_valid;
use tracing::warn;

/// Element id of the optional embedded config block.
pub const CONFIG_ELEMENT_ID: &str = "sitenav-config";

/// Parse and validate an embedded config block.
pub fn parse_page_config(text: &str) -> Result<SiteConfig> {
    let cfg: SiteConfig = serde_json::from_str(text).context("parse sitenav config json")?;
    ensure_valid(&cfg)?;
    Ok(cfg)
}

/// Config for this page: the embedded block when present and valid,
/// otherwise the built-in defaults.
pub fn page_config(text: Option<&str>) -> SiteConfig {
    let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return SiteConfig::default();
    };
    match parse_page_config(text) {
        Ok(cfg) => cfg,
        Err(err) => {
            warn!(error = %format!("{:#}", err), "ignoring embedded config");
            SiteConfig::default()
        }
    }
}
