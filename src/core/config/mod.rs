use crate::core::flow::finding::Severity;
use crate::core::flow::limits::InputLimits;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Validator configuration loaded from flowdsl.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ValidatorConfig {
    /// Graph rule levels and suppressed codes
    #[serde(default)]
    pub rules: RuleSettings,

    /// Input guard bounds
    #[serde(default)]
    pub limits: InputLimits,
}

/// Level at which a configurable rule reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleLevel {
    Allow,
    Warn,
    Error,
}

impl RuleLevel {
    /// Finding severity for this level, `None` when the rule is switched off.
    pub fn severity(self) -> Option<Severity> {
        match self {
            RuleLevel::Allow => None,
            RuleLevel::Warn => Some(Severity::Warning),
            RuleLevel::Error => Some(Severity::Error),
        }
    }
}

impl FromStr for RuleLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allow" | "off" => Ok(RuleLevel::Allow),
            "warn" | "warning" => Ok(RuleLevel::Warn),
            "error" | "deny" => Ok(RuleLevel::Error),
            other => Err(format!("unknown rule level '{}'", other)),
        }
    }
}

/// Rule configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSettings {
    /// Cycles through next/branch edges (default: allow)
    #[serde(default = "default_cycles")]
    pub cycles: RuleLevel,

    /// Steps routing to themselves via next/error (default: error)
    #[serde(default = "default_self_reference")]
    pub self_reference: RuleLevel,

    /// Steps not reachable from the first step (default: warn)
    #[serde(default = "default_unreachable_steps")]
    pub unreachable_steps: RuleLevel,

    /// Finding codes dropped from every result
    #[serde(default)]
    pub disabled: Vec<String>,
}

// Default functions
fn default_cycles() -> RuleLevel {
    RuleLevel::Allow
}

fn default_self_reference() -> RuleLevel {
    RuleLevel::Error
}

fn default_unreachable_steps() -> RuleLevel {
    RuleLevel::Warn
}

impl Default for RuleSettings {
    fn default() -> Self {
        RuleSettings {
            cycles: default_cycles(),
            self_reference: default_self_reference(),
            unreachable_steps: default_unreachable_steps(),
            disabled: Vec::new(),
        }
    }
}

impl RuleSettings {
    pub fn is_disabled(&self, code: &str) -> bool {
        self.disabled.iter().any(|c| c == code)
    }
}


pub mod loader;
pub mod validation;

pub use loader::ConfigLoader;
pub use validation::ConfigValidator;
