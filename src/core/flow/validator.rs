//! Two-phase validation entry points.

use crate::core::config::ValidatorConfig;
use crate::core::error::DeserializationError;
use crate::core::flow::finding::Finding;
use crate::core::flow::limits::InputLimits;
use crate::core::flow::model::Flow;
use crate::core::flow::parser::read_tree;
use crate::core::flow::report::ValidationResult;
use crate::core::flow::rules::RuleRegistry;
use crate::core::flow::structure::check_structure;
use crate::core::types::InputFormat;
use serde_json::Value;
use tracing::debug;

/// Validates flow documents against the type model and the semantic rules.
///
/// Holds no per-call state, so one instance can be shared across threads.
pub struct FlowValidator {
    registry: RuleRegistry,
    limits: InputLimits,
}

impl FlowValidator {
    pub fn new() -> Self {
        Self::with_config(&ValidatorConfig::default())
    }

    pub fn with_config(config: &ValidatorConfig) -> Self {
        Self {
            registry: RuleRegistry::with_settings(config.rules.clone()),
            limits: config.limits.clone(),
        }
    }

    pub fn limits(&self) -> &InputLimits {
        &self.limits
    }

    /// Validate an already-parsed document tree.
    pub fn validate(&self, document: &Value) -> ValidationResult {
        if let Err(err) = self.limits.check_tree(document) {
            return rejected(err);
        }

        let structure = check_structure(document);
        debug!(
            phase = "structure",
            findings = structure.findings.len(),
            "structural validation finished"
        );
        match structure.flow {
            Some(flow) if structure.findings.is_empty() => self.validate_flow(&flow),
            _ => summarize(structure.findings),
        }
    }

    /// Parse `text` and validate the resulting tree.
    pub fn validate_str(&self, text: &str, format: InputFormat) -> ValidationResult {
        match read_tree(text, format, &self.limits) {
            Ok(tree) => self.validate(&tree),
            Err(err) => rejected(err),
        }
    }

    /// Run the semantic phase over a typed flow.
    pub fn validate_flow(&self, flow: &Flow) -> ValidationResult {
        let shape = flow.shape_findings();
        if !shape.is_empty() {
            return summarize(shape);
        }
        let findings = self.registry.run(flow);
        debug!(
            phase = "semantic",
            flow = %flow.metadata.name,
            findings = findings.len(),
            "semantic validation finished"
        );
        summarize(findings)
    }

    pub fn is_valid(&self, document: &Value) -> bool {
        self.validate(document).valid
    }
}

impl Default for FlowValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn rejected(err: DeserializationError) -> ValidationResult {
    debug!(error = %err, "document rejected before structural validation");
    summarize(err.into_findings())
}

fn summarize(findings: Vec<Finding>) -> ValidationResult {
    let result = ValidationResult::from_findings(findings);
    debug!(
        valid = result.valid,
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "validation complete"
    );
    result
}

/// Validate a document tree with the default configuration.
pub fn validate(document: &Value) -> ValidationResult {
    FlowValidator::new().validate(document)
}

/// Parse and validate text with the default configuration.
pub fn validate_str(text: &str, format: InputFormat) -> ValidationResult {
    FlowValidator::new().validate_str(text, format)
}

pub fn is_valid(document: &Value) -> bool {
    validate(document).valid
}
