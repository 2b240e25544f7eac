//! Flow DSL type model and validator.
//!
//! A document goes through the input guard, structural coercion into
//! [`model::Flow`], then the semantic rule registry. Every stage reports
//! [`Finding`]s; [`ValidationResult`] merges them.

pub mod finding;
pub mod limits;
pub mod model;
pub mod parser;
pub mod report;
pub mod rules;
pub mod structure;
pub mod validator;

pub use finding::{codes, Finding, Severity};
pub use limits::InputLimits;
pub use model::Flow;
pub use parser::{parse_str, parse_value, read_tree};
pub use report::{format_findings, ValidationResult};
pub use rules::{FlowRule, RuleRegistry};
pub use structure::{check_structure, StructureReport};
pub use validator::{is_valid, validate, validate_str, FlowValidator};
