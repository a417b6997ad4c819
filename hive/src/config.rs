//! Ledger configuration with TOML file support.

use serde::{Deserialize, Serialize};

use crate::HiveError;

/// What an admission credential authorises.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionScope {
    /// The owner signs `"join" || hive`; anyone holding the signature may join.
    #[default]
    AnyHolder,
    /// The owner signs `"join" || hive || joiner`; only that joiner may use it.
    Joiner,
}

/// Configuration applied to every hive a factory creates.
///
/// Can be loaded from a TOML file via [`HiveConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HiveConfig {
    /// Scope of admission credentials for new hives.
    #[serde(default)]
    pub admission_scope: AdmissionScope,

    /// Upper bound on beneficiaries in one proposal request.
    #[serde(default = "default_max_beneficiaries")]
    pub max_beneficiaries: usize,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_max_beneficiaries() -> usize {
    64
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl HiveConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> Result<Self, HiveError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| HiveError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, HiveError> {
        let config: Self = toml::from_str(s).map_err(|e| HiveError::Config(e.to_string()))?;
        if config.max_beneficiaries == 0 {
            return Err(HiveError::Config(
                "max_beneficiaries must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, HiveError> {
        toml::to_string_pretty(self).map_err(|e| HiveError::Config(e.to_string()))
    }
}

impl Default for HiveConfig {
    fn default() -> Self {
        Self {
            admission_scope: AdmissionScope::default(),
            max_beneficiaries: default_max_beneficiaries(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = HiveConfig::default();
        let toml_str = config.to_toml_string().expect("serializable");
        let parsed = HiveConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed.admission_scope, config.admission_scope);
        assert_eq!(parsed.max_beneficiaries, config.max_beneficiaries);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = HiveConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.admission_scope, AdmissionScope::AnyHolder);
        assert_eq!(config.max_beneficiaries, 64);
        assert_eq!(config.log_format, "human");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            admission_scope = "joiner"
            max_beneficiaries = 8
        "#;
        let config = HiveConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.admission_scope, AdmissionScope::Joiner);
        assert_eq!(config.max_beneficiaries, 8);
        assert_eq!(config.log_format, "human");
    }

    #[test]
    fn zero_beneficiary_cap_rejected() {
        let result = HiveConfig::from_toml_str("max_beneficiaries = 0");
        assert!(matches!(result, Err(HiveError::Config(_))));
    }

    #[test]
    fn unknown_scope_rejected() {
        let result = HiveConfig::from_toml_str(r#"admission_scope = "anyone""#);
        assert!(matches!(result, Err(HiveError::Config(_))));
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = HiveConfig::from_toml_file("/nonexistent/hive.toml");
        assert!(matches!(result, Err(HiveError::Config(_))));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("hive.toml");
        std::fs::write(&path, "log_format = \"json\"\nlog_level = \"debug\"\n").expect("write");
        let config = HiveConfig::from_toml_file(&path).expect("should load");
        assert_eq!(config.log_format, "json");
        assert_eq!(config.log_level, "debug");
    }
}
