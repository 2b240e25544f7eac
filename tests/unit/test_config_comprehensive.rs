use flowdsl::core::config::{ConfigValidator, RuleLevel, RuleSettings, ValidatorConfig};
use flowdsl::core::flow::finding::codes;
use flowdsl::core::types::ErrorCategory;
use flowdsl::core::InputLimits;

/// Comprehensive unit tests for configuration functionality
#[test]
fn test_config_serialization_roundtrip() {
    let original_config = ValidatorConfig {
        rules: RuleSettings {
            cycles: RuleLevel::Warn,
            self_reference: RuleLevel::Allow,
            unreachable_steps: RuleLevel::Error,
            disabled: vec![codes::OWNERS_MISSING.to_string()],
        },
        limits: InputLimits::default()
            .with_max_steps(200)
            .with_max_nesting_depth(16),
    };

    let toml_str = toml::to_string_pretty(&original_config).unwrap();
    let deserialized: ValidatorConfig = toml::from_str(&toml_str).unwrap();

    assert_eq!(original_config, deserialized);
    assert!(toml_str.contains("cycles = \"warn\""));
}

#[test]
fn test_empty_document_uses_defaults() {
    let config: ValidatorConfig = toml::from_str("").unwrap();
    assert_eq!(config, ValidatorConfig::default());
}

#[test]
fn test_unknown_rule_level_is_rejected() {
    let result = toml::from_str::<ValidatorConfig>("[rules]\ncycles = \"sometimes\"\n");
    assert!(result.is_err());
}

#[test]
fn test_validator_accepts_defaults() {
    assert!(ConfigValidator::validate(&ValidatorConfig::default()).is_ok());
}

#[test]
fn test_validator_rejects_zero_limits() {
    let config = ValidatorConfig {
        limits: InputLimits::default().with_max_input_bytes(0),
        ..ValidatorConfig::default()
    };
    let err = ConfigValidator::validate(&config).unwrap_err();
    assert_eq!(err.category, ErrorCategory::ConfigurationError);
    assert!(err.message.contains("limits.max_input_bytes"));
}

#[test]
fn test_validator_protects_guard_codes() {
    for code in [
        codes::PARSE_ERROR,
        codes::INPUT_LIMIT_EXCEEDED,
        codes::SCHEMA_VALIDATION_ERROR,
    ] {
        let config = ValidatorConfig {
            rules: RuleSettings {
                disabled: vec![code.to_string()],
                ..RuleSettings::default()
            },
            ..ValidatorConfig::default()
        };
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert!(err.message.contains(code));
    }

    let config = ValidatorConfig {
        rules: RuleSettings {
            disabled: vec![codes::UNREACHABLE_STEP.to_string()],
            ..RuleSettings::default()
        },
        ..ValidatorConfig::default()
    };
    assert!(ConfigValidator::validate(&config).is_ok());
}

#[test]
fn test_validator_rejects_unknown_codes() {
    let config = ValidatorConfig {
        rules: RuleSettings {
            disabled: vec!["UNREACHABLE_STEPS".to_string()],
            ..RuleSettings::default()
        },
        ..ValidatorConfig::default()
    };
    let err = ConfigValidator::validate(&config).unwrap_err();
    assert_eq!(err.category, ErrorCategory::ConfigurationError);
    assert_eq!(
        err.message,
        "rules.disabled names unknown finding code UNREACHABLE_STEPS"
    );
}

#[test]
fn test_rule_level_aliases() {
    for (raw, level) in [
        ("allow", RuleLevel::Allow),
        ("off", RuleLevel::Allow),
        ("warn", RuleLevel::Warn),
        ("Warning", RuleLevel::Warn),
        ("error", RuleLevel::Error),
        ("deny", RuleLevel::Error),
    ] {
        assert_eq!(raw.parse::<RuleLevel>(), Ok(level), "{raw}");
    }
}
