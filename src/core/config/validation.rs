#![allow(clippy::result_large_err)]

use super::ValidatorConfig;
use crate::core::error::AppError;
use crate::core::flow::finding::codes;

pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate configuration rules
    pub fn validate(config: &ValidatorConfig) -> Result<(), AppError> {
        let limits = &config.limits;
        let bounds = [
            ("limits.max_input_bytes", limits.max_input_bytes),
            ("limits.max_nesting_depth", limits.max_nesting_depth),
            ("limits.max_steps", limits.max_steps),
            ("limits.max_triggers", limits.max_triggers),
            ("limits.max_policies_per_step", limits.max_policies_per_step),
        ];
        for (name, value) in bounds {
            if value == 0 {
                return Err(AppError::new(
                    crate::core::types::ErrorCategory::ConfigurationError,
                    format!("{} must be greater than zero", name),
                ));
            }
        }

        for code in &config.rules.disabled {
            if !codes::is_known(code) {
                return Err(AppError::new(
                    crate::core::types::ErrorCategory::ConfigurationError,
                    format!("rules.disabled names unknown finding code {}", code),
                ));
            }
            if !codes::is_suppressible(code) {
                return Err(AppError::new(
                    crate::core::types::ErrorCategory::ConfigurationError,
                    format!("rules.disabled cannot suppress {}", code),
                ));
            }
        }

        Ok(())
    }
}
