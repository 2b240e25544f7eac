#![allow(clippy::result_large_err)]

use super::{RuleLevel, ValidatorConfig};
use crate::core::config::ConfigValidator;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use std::env;
use std::path::Path;
use std::str::FromStr;

/// File name looked up in the workspace root.
pub const CONFIG_FILE_NAME: &str = "flowdsl.toml";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from workspace root (workspace/flowdsl.toml)
    /// Environment variables override config file values
    /// Falls back to defaults + env vars when the file doesn't exist
    pub fn load_from_workspace(workspace_path: &Path) -> Result<ValidatorConfig, AppError> {
        let config_path = workspace_path.join(CONFIG_FILE_NAME);
        Self::load_with_overrides(&config_path)
    }

    /// Load an explicit config file, then apply env overrides and validate
    pub fn load_with_overrides(path: &Path) -> Result<ValidatorConfig, AppError> {
        let mut config = Self::load_from_file(path)?.unwrap_or_default();

        // Apply environment variable overrides
        Self::apply_env_overrides(&mut config);

        Self::validate_config(&config)?;
        Ok(config)
    }

    /// Load config from specific file path
    /// Returns Ok(None) if file doesn't exist
    pub fn load_from_file(path: &Path) -> Result<Option<ValidatorConfig>, AppError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::from(e).with_context("path", path.display().to_string()))?;

        let config: ValidatorConfig = toml::from_str(&content).map_err(|e| {
            AppError::new(
                ErrorCategory::ConfigurationError,
                format!("Failed to parse config file {}: {}", path.display(), e),
            )
        })?;

        Ok(Some(config))
    }

    /// Apply environment variable overrides to the configuration
    /// Unparseable values are ignored and the file/default value is kept
    fn apply_env_overrides(config: &mut ValidatorConfig) {
        // Rule overrides
        override_parsed::<RuleLevel>("FLOWDSL_RULES_CYCLES", &mut config.rules.cycles);
        override_parsed::<RuleLevel>(
            "FLOWDSL_RULES_SELF_REFERENCE",
            &mut config.rules.self_reference,
        );
        override_parsed::<RuleLevel>(
            "FLOWDSL_RULES_UNREACHABLE_STEPS",
            &mut config.rules.unreachable_steps,
        );

        if let Ok(disabled) = env::var("FLOWDSL_RULES_DISABLED") {
            config.rules.disabled = disabled
                .split(',')
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .map(str::to_string)
                .collect();
        }

        // Limit overrides
        let limits = &mut config.limits;
        override_parsed("FLOWDSL_LIMITS_MAX_INPUT_BYTES", &mut limits.max_input_bytes);
        override_parsed(
            "FLOWDSL_LIMITS_MAX_NESTING_DEPTH",
            &mut limits.max_nesting_depth,
        );
        override_parsed("FLOWDSL_LIMITS_MAX_STEPS", &mut limits.max_steps);
        override_parsed("FLOWDSL_LIMITS_MAX_TRIGGERS", &mut limits.max_triggers);
        override_parsed(
            "FLOWDSL_LIMITS_MAX_POLICIES_PER_STEP",
            &mut limits.max_policies_per_step,
        );
    }

    /// Get documentation for supported environment variables
    pub fn env_var_documentation() -> &'static [&'static str] {
        &[
            "FLOWDSL_RULES_CYCLES - Override cycle rule level (allow/warn/error, default: allow)",
            "FLOWDSL_RULES_SELF_REFERENCE - Override self-reference rule level (default: error)",
            "FLOWDSL_RULES_UNREACHABLE_STEPS - Override unreachable step rule level (default: warn)",
            "FLOWDSL_RULES_DISABLED - Comma-separated finding codes to suppress",
            "FLOWDSL_LIMITS_MAX_INPUT_BYTES - Override maximum document size (default: 10485760)",
            "FLOWDSL_LIMITS_MAX_NESTING_DEPTH - Override maximum nesting depth (default: 64)",
            "FLOWDSL_LIMITS_MAX_STEPS - Override maximum step count (default: 1000)",
            "FLOWDSL_LIMITS_MAX_TRIGGERS - Override maximum trigger count (default: 100)",
            "FLOWDSL_LIMITS_MAX_POLICIES_PER_STEP - Override maximum policies per step (default: 32)",
        ]
    }

    /// Validate configuration values
    pub fn validate_config(config: &ValidatorConfig) -> Result<(), AppError> {
        ConfigValidator::validate(config)
    }
}

fn override_parsed<T: FromStr>(var: &str, target: &mut T) {
    if let Ok(raw) = env::var(var) {
        if let Ok(value) = raw.trim().parse::<T>() {
            *target = value;
        }
    }
}
