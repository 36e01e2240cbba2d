//! Tuning constants for the density and recommendation engine.
//!
//! Every field defaults to the value the heat-map view has always used, so an
//! absent or partial YAML file behaves exactly like the built-in constants.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Neighbour radius for density, in raw decimal degrees.
    pub density_radius_deg: f64,
    /// Points at or above this density are treated as saturated.
    pub high_density_threshold: u32,
    /// Decimal places used to bucket points into cluster seeds.
    pub seed_round_decimals: u32,
    /// Decimal places used for the explored-area coordinate fingerprint.
    pub explored_round_decimals: u32,
    pub max_seeds: usize,
    pub lookup_limit: u32,
    pub lookup_radius_km: u32,
    pub lookup_min_population: u64,
    /// Candidates closer than this to a saturated point are dropped.
    pub exclusion_radius_km: f64,
    /// Flat conversion factor from degrees to kilometres.
    pub km_per_degree: f64,
    pub max_recommendations: usize,
    /// Above this many points the density pass switches to grid buckets.
    pub grid_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            density_radius_deg: 0.4,
            high_density_threshold: 3,
            seed_round_decimals: 1,
            explored_round_decimals: 2,
            max_seeds: 5,
            lookup_limit: 20,
            lookup_radius_km: 150,
            lookup_min_population: 5000,
            exclusion_radius_km: 15.0,
            km_per_degree: 111.0,
            max_recommendations: 8,
            grid_threshold: 2000,
        }
    }
}

/// Load and validate an engine config from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_engine_config(path: &Path) -> Result<EngineConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::EngineFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_engine_config(&content)
}

/// Parse and validate an engine config from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the text is not valid YAML for [`EngineConfig`]
/// or a value is out of range.
pub fn parse_engine_config(content: &str) -> Result<EngineConfig, ConfigError> {
    let config: EngineConfig = serde_yaml::from_str(content)?;
    validate_engine_config(&config)?;
    Ok(config)
}

fn validate_engine_config(config: &EngineConfig) -> Result<(), ConfigError> {
    let positive = [
        ("density_radius_deg", config.density_radius_deg),
        ("exclusion_radius_km", config.exclusion_radius_km),
        ("km_per_degree", config.km_per_degree),
    ];
    for (name, value) in positive {
        if !value.is_finite() || value <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "{name} must be a positive number, got {value}"
            )));
        }
    }

    if config.high_density_threshold == 0 {
        return Err(ConfigError::Validation(
            "high_density_threshold must be at least 1".to_string(),
        ));
    }
    if config.max_seeds == 0 || config.max_recommendations == 0 || config.lookup_limit == 0 {
        return Err(ConfigError::Validation(
            "max_seeds, max_recommendations and lookup_limit must be non-zero".to_string(),
        ));
    }
    if config.seed_round_decimals > 6 || config.explored_round_decimals > 6 {
        return Err(ConfigError::Validation(
            "rounding precision above 6 decimals is not supported".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = parse_engine_config("{}").unwrap();
        assert_eq!(cfg, EngineConfig::default());
    }

    #[test]
    fn partial_document_overrides_only_named_fields() {
        let cfg = parse_engine_config("max_seeds: 3\nexclusion_radius_km: 20.5\n").unwrap();
        assert_eq!(cfg.max_seeds, 3);
        assert!((cfg.exclusion_radius_km - 20.5).abs() < f64::EPSILON);
        assert_eq!(cfg.lookup_limit, 20);
        assert_eq!(cfg.max_recommendations, 8);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = parse_engine_config("max_seedz: 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::EngineFileParse(_)), "got: {err:?}");
    }

    #[test]
    fn negative_radius_is_rejected() {
        let err = parse_engine_config("density_radius_deg: -0.4\n").unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(ref msg) if msg.contains("density_radius_deg")),
            "got: {err:?}"
        );
    }

    #[test]
    fn zero_seed_cap_is_rejected() {
        let err = parse_engine_config("max_seeds: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn zero_threshold_is_rejected() {
        let err = parse_engine_config("high_density_threshold: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_engine_config(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(
            matches!(err, ConfigError::EngineFileIo { ref path, .. } if path.contains("here.yaml"))
        );
    }

    #[test]
    fn defaults_serialize_to_json() {
        let value = serde_json::to_value(EngineConfig::default()).unwrap();
        assert_eq!(value["max_seeds"], 5);
        assert_eq!(value["lookup_radius_km"], 150);
        assert_eq!(value["lookup_min_population"], 5000);
    }
}
