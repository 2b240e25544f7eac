//! Semantic rules run over a structurally valid [`Flow`].
//!
//! Each rule is a pure function of the flow and the rule settings. The
//! registry runs every rule and concatenates their findings in registration
//! order, so the same document always yields the same finding sequence.

use crate::core::config::RuleSettings;
use crate::core::flow::finding::Finding;
use crate::core::flow::model::Flow;

pub mod graph;
pub mod metadata;
pub mod observability;
pub mod policies;
pub mod steps;
pub mod transports;
pub mod triggers;

pub use graph::{
    CycleRule, DuplicateStepIdsRule, SelfReferenceRule, StepReferencesRule, UnreachableStepsRule,
};
pub use metadata::MetadataRule;
pub use observability::ObservabilityRule;
pub use policies::PolicyRule;
pub use steps::StepRule;
pub use transports::TransportRule;
pub use triggers::TriggerRule;

/// Trait implemented by semantic flow rules.
pub trait FlowRule: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    fn check(&self, flow: &Flow, settings: &RuleSettings) -> Vec<Finding>;
}

/// All built-in rules, in the order their findings are reported.
pub fn built_in_rules() -> Vec<Box<dyn FlowRule>> {
    vec![
        Box::new(MetadataRule),
        Box::new(TriggerRule),
        Box::new(StepRule),
        Box::new(TransportRule),
        Box::new(PolicyRule),
        Box::new(DuplicateStepIdsRule),
        Box::new(StepReferencesRule),
        Box::new(SelfReferenceRule),
        Box::new(CycleRule),
        Box::new(UnreachableStepsRule),
        Box::new(ObservabilityRule),
    ]
}

/// Registry that runs all built-in flow rules.
pub struct RuleRegistry {
    settings: RuleSettings,
    rules: Vec<Box<dyn FlowRule>>,
}

impl RuleRegistry {
    /// Construct a registry populated with the built-in rules and default settings.
    pub fn new() -> Self {
        Self::with_settings(RuleSettings::default())
    }

    pub fn with_settings(settings: RuleSettings) -> Self {
        Self {
            settings,
            rules: built_in_rules(),
        }
    }

    pub fn settings(&self) -> &RuleSettings {
        &self.settings
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Run every registered rule against the flow.
    /// Codes listed in `settings.disabled` are dropped from the result.
    pub fn run(&self, flow: &Flow) -> Vec<Finding> {
        let mut findings = Vec::new();
        for rule in &self.rules {
            let produced = rule.check(flow, &self.settings);
            tracing::trace!(rule = rule.name(), count = produced.len(), "rule finished");
            findings.extend(produced);
        }
        findings.retain(|finding| !self.settings.is_disabled(&finding.code));
        findings
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// True when a required string is absent in practice.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
