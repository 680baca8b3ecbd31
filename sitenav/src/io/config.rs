//! Site configuration stored as TOML (default `site.toml`).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::debug;

use crate::core::config::SiteConfig;

/// Default config file name, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "site.toml";

/// Fail with every validation error, one per line.
pub fn ensure_valid(cfg: &SiteConfig) -> Result<()> {
    let errors = cfg.validate();
    if !errors.is_empty() {
        bail!("invalid site config:\n- {}", errors.join("\n- "));
    }
    Ok(())
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `SiteConfig::default()`.
pub fn load_config(path: &Path) -> Result<SiteConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "config missing, using defaults");
        let cfg = SiteConfig::default();
        ensure_valid(&cfg)?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: SiteConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    ensure_valid(&cfg).with_context(|| format!("validate {}", path.display()))?;
    debug!(path = %path.display(), sections = cfg.sections.len(), "config loaded");
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &SiteConfig) -> Result<()> {
    ensure_valid(cfg)?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sections::SectionEntry;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, SiteConfig::default());
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("nested").join("site.toml");
        let cfg = SiteConfig {
            navbar_height: 64.0,
            sections: vec![
                SectionEntry::new("top", "home"),
                SectionEntry::new("work", "projects"),
            ],
            ..SiteConfig::default()
        };
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("site.toml");
        fs::write(&path, "pulse_ms = 250\n").expect("write");
        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.pulse_ms, 250);
        assert_eq!(cfg.navbar_height, 80.0);
    }

    #[test]
    fn invalid_file_is_rejected_with_reasons() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("site.toml");
        fs::write(&path, "min_duration_ms = 900.0\nmax_duration_ms = 100.0\n").expect("write");
        let err = load_config(&path).expect_err("invalid");
        assert!(format!("{:#}", err).contains("below min_duration_ms"));
    }

    #[test]
    fn write_refuses_invalid_config() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("site.toml");
        let cfg = SiteConfig {
            sections: Vec::new(),
            ..SiteConfig::default()
        };
        assert!(write_config(&path, &cfg).is_err());
        assert!(!path.exists());
    }
}
