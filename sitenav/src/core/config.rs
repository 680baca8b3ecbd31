//! Site configuration shared by every host.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::sections::{SectionEntry, SectionMap, default_sections};

/// Tunables for the highlighter plus the section table.
///
/// Missing fields default to the portfolio layout. `navbar_height` must match
/// the stylesheet's `scroll-margin-top`; nothing checks that for you.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    /// Height of the fixed navbar in CSS pixels.
    pub navbar_height: f64,

    /// Scrolls shorter than this jump instead of animating.
    pub snap_threshold_px: f64,

    /// Animation duration per pixel of travel, before clamping.
    pub ms_per_px: f64,

    pub min_duration_ms: f64,
    pub max_duration_ms: f64,

    /// How long the pulse marker stays on a freshly activated link.
    pub pulse_ms: u32,

    /// Key highlighted when nothing better is known.
    pub home_key: String,

    /// Document names (last path segment, lower-case) treated as home.
    pub home_documents: Vec<String>,

    /// Trackable sections in document order.
    pub sections: Vec<SectionEntry>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            navbar_height: 80.0,
            snap_threshold_px: 40.0,
            ms_per_px: 0.30,
            min_duration_ms: 180.0,
            max_duration_ms: 500.0,
            pulse_ms: 400,
            home_key: "home".to_string(),
            home_documents: vec!["index.html".to_string()],
            sections: default_sections(),
        }
    }
}

impl SiteConfig {
    pub fn section_map(&self) -> SectionMap {
        SectionMap::new(self.sections.clone())
    }

    /// Check settings that serde cannot express.
    ///
    /// Returns every violation found; an empty list means the config is usable.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.navbar_height.is_finite() || self.navbar_height < 0.0 {
            errors.push("navbar_height must be a finite value >= 0".to_string());
        }
        if !self.snap_threshold_px.is_finite() || self.snap_threshold_px < 0.0 {
            errors.push("snap_threshold_px must be a finite value >= 0".to_string());
        }
        if !self.ms_per_px.is_finite() || self.ms_per_px <= 0.0 {
            errors.push("ms_per_px must be > 0".to_string());
        }
        if !self.min_duration_ms.is_finite() || self.min_duration_ms <= 0.0 {
            errors.push("min_duration_ms must be > 0".to_string());
        }
        if self.max_duration_ms.is_nan() || self.max_duration_ms < self.min_duration_ms {
            errors.push(format!(
                "max_duration_ms {} is below min_duration_ms {}",
                self.max_duration_ms, self.min_duration_ms
            ));
        }
        if self.pulse_ms == 0 {
            errors.push("pulse_ms must be > 0".to_string());
        }
        if self.home_key.trim().is_empty() {
            errors.push("home_key must not be empty".to_string());
        }
        if self.sections.is_empty() {
            errors.push("sections must not be empty".to_string());
        }

        let mut seen = HashSet::new();
        for (idx, section) in self.sections.iter().enumerate() {
            if section.id.trim().is_empty() {
                errors.push(format!("sections[{}]: id must not be empty", idx));
            } else if !seen.insert(section.id.as_str()) {
                errors.push(format!("sections[{}]: duplicate id '{}'", idx, section.id));
            }
            if section.key.trim().is_empty() {
                errors.push(format!("sections[{}]: key must not be empty", idx));
            } else if section.key != section.key.to_lowercase() {
                // Link sections are lower-cased before comparison.
                errors.push(format!(
                    "sections[{}]: key '{}' must be lower-case",
                    idx, section.key
                ));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SiteConfig::default().validate().is_empty());
    }

    #[test]
    fn validate_reports_each_violation() {
        let cfg = SiteConfig {
            navbar_height: -1.0,
            min_duration_ms: 600.0,
            max_duration_ms: 500.0,
            pulse_ms: 0,
            sections: vec![
                SectionEntry::new("about", "About"),
                SectionEntry::new("about", "about"),
            ],
            ..SiteConfig::default()
        };

        let errors = cfg.validate();
        assert!(errors.iter().any(|err| err.contains("navbar_height")));
        assert!(errors.iter().any(|err| err.contains("below min_duration_ms")));
        assert!(errors.iter().any(|err| err.contains("pulse_ms")));
        assert!(errors.iter().any(|err| err.contains("duplicate id 'about'")));
        assert!(errors.iter().any(|err| err.contains("lower-case")));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: SiteConfig = serde_json::from_str(r#"{"navbar_height": 64}"#).expect("parse");
        assert_eq!(cfg.navbar_height, 64.0);
        assert_eq!(cfg.sections, default_sections());
    }
}
