pub mod config;
pub mod error;
pub mod flow;
pub mod types;

pub use config::{ConfigLoader, RuleLevel, RuleSettings, ValidatorConfig};
pub use error::{AppError, DeserializationError};
pub use flow::{
    check_structure, codes, format_findings, is_valid, parse_str, parse_value, read_tree,
    validate, validate_str, Finding, Flow, FlowValidator, InputLimits, Severity,
    ValidationResult,
};
pub use types::*;
