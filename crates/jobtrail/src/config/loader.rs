use std::path::Path;

use log::debug;
use regex::Regex;

use crate::config::schema::{TrackerConfig, CONFIG_VERSION};
use crate::error::ConfigError;

const SCHEMA_JSON: &str = include_str!("../../../../schema/config-v1.json");

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<TrackerConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    debug!("Loading config from {}", path.display());
    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<TrackerConfig, ConfigError> {
    let json_value: serde_json::Value = serde_json::from_str(content)?;

    validate_schema(&json_value)?;

    let config: TrackerConfig = serde_json::from_value(json_value)?;

    validate_config(&config)?;

    Ok(config)
}

fn validate_schema(json_value: &serde_json::Value) -> Result<(), ConfigError> {
    let schema: serde_json::Value =
        serde_json::from_str(SCHEMA_JSON).map_err(|e| ConfigError::Validation {
            message: format!("Invalid embedded schema JSON: {}", e),
        })?;

    let validator = jsonschema::validator_for(&schema).map_err(|e| ConfigError::Validation {
        message: format!("Failed to compile JSON schema: {}", e),
    })?;

    let error_messages: Vec<String> = validator
        .iter_errors(json_value)
        .map(|e| e.to_string())
        .collect();
    if !error_messages.is_empty() {
        return Err(ConfigError::SchemaValidation {
            errors: error_messages.join("; "),
        });
    }

    Ok(())
}

pub(crate) fn validate_config(config: &TrackerConfig) -> Result<(), ConfigError> {
    if config.version != CONFIG_VERSION {
        return Err(ConfigError::Validation {
            message: format!("Unsupported config version: {}", config.version),
        });
    }

    validate_extractors("company_patterns", &config.classifier.company_patterns)?;
    validate_extractors("title_patterns", &config.classifier.title_patterns)?;

    Ok(())
}

/// Every extractor must compile and expose capture group 1.
fn validate_extractors(table: &str, patterns: &[String]) -> Result<(), ConfigError> {
    for pattern in patterns {
        let regex = Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
            table: table.to_string(),
            reason: format!("'{}': {}", pattern, e),
        })?;

        if regex.captures_len() < 2 {
            return Err(ConfigError::InvalidPattern {
                table: table.to_string(),
                reason: format!("'{}' has no capture group", pattern),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::TitleStrategy;

    #[test]
    fn test_load_minimal_config() {
        let config = load_config_from_str(r#"{ "version": "1.0" }"#).unwrap();
        assert_eq!(config.version, "1.0");
        assert!(!config.filter.include.is_empty());
        assert!(!config.classifier.company_patterns.is_empty());
    }

    #[test]
    fn test_load_config_with_tables() {
        let config_json = r#"
        {
            "version": "1.0",
            "filter": {
                "include": ["application received"],
                "blacklist": ["webinar", "newsletter"]
            },
            "classifier": {
                "offer": ["offer letter"],
                "title_patterns": ["(?i)role:\\s*(.+)$"],
                "title_strategy": "pattern_waterfall"
            }
        }
        "#;

        let config = load_config_from_str(config_json).unwrap();
        assert_eq!(config.filter.include, vec!["application received"]);
        assert_eq!(config.filter.blacklist.len(), 2);
        assert_eq!(config.classifier.offer, vec!["offer letter"]);
        assert_eq!(
            config.classifier.title_strategy,
            TitleStrategy::PatternWaterfall
        );
    }

    #[test]
    fn test_invalid_version() {
        let result = load_config_from_str(r#"{ "version": "2.0" }"#);
        assert!(matches!(result, Err(ConfigError::Validation { .. })));
    }

    #[test]
    fn test_missing_version_fails_schema() {
        let result = load_config_from_str(r#"{ "filter": {} }"#);
        assert!(matches!(result, Err(ConfigError::SchemaValidation { .. })));
    }

    #[test]
    fn test_unknown_section_fails_schema() {
        let result = load_config_from_str(r#"{ "version": "1.0", "rules": [] }"#);
        assert!(matches!(result, Err(ConfigError::SchemaValidation { .. })));
    }

    #[test]
    fn test_unknown_title_strategy_fails_schema() {
        let result = load_config_from_str(
            r#"{ "version": "1.0", "classifier": { "title_strategy": "guess" } }"#,
        );
        assert!(matches!(result, Err(ConfigError::SchemaValidation { .. })));
    }

    #[test]
    fn test_invalid_regex_pattern() {
        let result = load_config_from_str(
            r#"{ "version": "1.0", "classifier": { "company_patterns": ["at ([invalid"] } }"#,
        );
        assert!(matches!(result, Err(ConfigError::InvalidPattern { .. })));
    }

    #[test]
    fn test_missing_capture_group() {
        let result = load_config_from_str(
            r#"{ "version": "1.0", "classifier": { "title_patterns": ["position:\\s*\\w+"] } }"#,
        );
        match result {
            Err(ConfigError::InvalidPattern { table, .. }) => assert_eq!(table, "title_patterns"),
            other => panic!("expected InvalidPattern, got {:?}", other),
        }
    }

    #[test]
    fn test_builtin_tables_pass_validation() {
        validate_config(&TrackerConfig::default()).unwrap();
    }
}
