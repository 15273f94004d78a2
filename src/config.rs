use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use crate::errors::AuditError;

/// Heatmap color scale tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeatmapConfig {
    /// Count at which a cell reaches full intensity.
    #[serde(default = "default_full_intensity_count")]
    pub full_intensity_count: usize,
}

fn default_full_intensity_count() -> usize {
    10
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            full_intensity_count: default_full_intensity_count(),
        }
    }
}

/// Compliance-rate band floors for the progress view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RateBands {
    /// Rates below this are the alert band; at or above, warning.
    #[serde(default = "default_warning_floor")]
    pub warning_floor: f64,

    /// Rates at or above this are the success band.
    #[serde(default = "default_success_floor")]
    pub success_floor: f64,
}

fn default_warning_floor() -> f64 {
    50.0
}

fn default_success_floor() -> f64 {
    80.0
}

impl Default for RateBands {
    fn default() -> Self {
        Self {
            warning_floor: default_warning_floor(),
            success_floor: default_success_floor(),
        }
    }
}

fn default_window_months() -> u32 {
    6
}

/// Tool configuration, read from `auditmap.toml` when present. Every
/// field defaults to the values the dashboard shipped with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditmapConfig {
    #[serde(default)]
    pub heatmap: HeatmapConfig,

    #[serde(default)]
    pub bands: RateBands,

    /// Calendar months covered by the default reporting window.
    #[serde(default = "default_window_months")]
    pub default_window_months: u32,
}

impl Default for AuditmapConfig {
    fn default() -> Self {
        Self {
            heatmap: HeatmapConfig::default(),
            bands: RateBands::default(),
            default_window_months: default_window_months(),
        }
    }
}

impl AuditmapConfig {
    /// Load configuration from `path`. A missing file yields the
    /// defaults; an unreadable or malformed file is an error.
    pub fn load(path: &Path) -> Result<Self, AuditError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path).map_err(|e| {
            AuditError::source_unavailable(format!("failed to read {}: {e}", path.display()))
        })?;

        let config: Self = toml::from_str(&raw).map_err(|e| {
            AuditError::validation(format!("invalid config {}: {e}", path.display()))
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AuditError> {
        if self.heatmap.full_intensity_count == 0 {
            return Err(AuditError::validation(
                "heatmap.full_intensity_count must be at least 1",
            ));
        }

        let bands = &self.bands;
        if !(0.0..=100.0).contains(&bands.warning_floor)
            || !(0.0..=100.0).contains(&bands.success_floor)
        {
            return Err(AuditError::validation(
                "rate band floors must be between 0 and 100",
            ));
        }

        if bands.warning_floor > bands.success_floor {
            return Err(AuditError::validation(format!(
                "warning_floor ({}) must not exceed success_floor ({})",
                bands.warning_floor, bands.success_floor
            )));
        }

        if self.default_window_months == 0 {
            return Err(AuditError::validation(
                "default_window_months must be at least 1",
            ));
        }

        Ok(())
    }

    /// Process-wide configuration, loading `./auditmap.toml` on first
    /// access. Load failures fall back to the defaults; explicit paths
    /// go through [`AuditmapConfig::load`] and surface their errors.
    pub fn get() -> &'static AuditmapConfig {
        static CONFIG: OnceLock<AuditmapConfig> = OnceLock::new();
        CONFIG.get_or_init(|| {
            AuditmapConfig::load(Path::new("auditmap.toml")).unwrap_or_default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_shipped_constants() {
        let config = AuditmapConfig::default();
        assert_eq!(config.heatmap.full_intensity_count, 10);
        assert_eq!(config.bands.warning_floor, 50.0);
        assert_eq!(config.bands.success_floor, 80.0);
        assert_eq!(config.default_window_months, 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: AuditmapConfig = toml::from_str(
            r#"
            [bands]
            success_floor = 90.0
            "#,
        )
        .unwrap();

        assert_eq!(config.bands.success_floor, 90.0);
        assert_eq!(config.bands.warning_floor, 50.0);
        assert_eq!(config.heatmap.full_intensity_count, 10);
    }

    #[test]
    fn inverted_bands_fail_validation() {
        let config = AuditmapConfig {
            bands: RateBands {
                warning_floor: 90.0,
                success_floor: 80.0,
            },
            ..Default::default()
        };

        assert!(matches!(
            config.validate(),
            Err(AuditError::Validation { .. })
        ));
    }

    #[test]
    fn zero_intensity_scale_fails_validation() {
        let config = AuditmapConfig {
            heatmap: HeatmapConfig {
                full_intensity_count: 0,
            },
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_loads_defaults() {
        let config = AuditmapConfig::load(Path::new("does-not-exist.toml")).unwrap();
        assert_eq!(config, AuditmapConfig::default());
    }

    #[test]
    fn process_wide_config_is_stable_across_calls() {
        let first = AuditmapConfig::get();
        let second = AuditmapConfig::get();
        assert!(std::ptr::eq(first, second));
        assert!(first.validate().is_ok());
    }
}
