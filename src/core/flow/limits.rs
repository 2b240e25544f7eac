//! Input guard applied at the parser boundary.

use crate::core::error::DeserializationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

fn default_max_input_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_max_nesting_depth() -> usize {
    64
}

fn default_max_steps() -> usize {
    1000
}

fn default_max_triggers() -> usize {
    100
}

fn default_max_policies_per_step() -> usize {
    32
}

/// Bounds on document size and shape, checked before any coercion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputLimits {
    /// Maximum raw text size in bytes (default: 10MB).
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize,
    /// Maximum nesting depth of the generic tree (default: 64).
    #[serde(default = "default_max_nesting_depth")]
    pub max_nesting_depth: usize,
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
    #[serde(default = "default_max_triggers")]
    pub max_triggers: usize,
    #[serde(default = "default_max_policies_per_step")]
    pub max_policies_per_step: usize,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            max_input_bytes: default_max_input_bytes(),
            max_nesting_depth: default_max_nesting_depth(),
            max_steps: default_max_steps(),
            max_triggers: default_max_triggers(),
            max_policies_per_step: default_max_policies_per_step(),
        }
    }
}

impl InputLimits {
    pub fn with_max_input_bytes(mut self, bytes: usize) -> Self {
        self.max_input_bytes = bytes;
        self
    }

    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    pub fn with_max_steps(mut self, count: usize) -> Self {
        self.max_steps = count;
        self
    }

    /// Reject raw text larger than `max_input_bytes` before parsing it.
    pub fn check_text(&self, text: &str) -> Result<(), DeserializationError> {
        if text.len() > self.max_input_bytes {
            return Err(DeserializationError::LimitExceeded {
                message: format!(
                    "document size ({} bytes) exceeds maximum allowed ({} bytes)",
                    text.len(),
                    self.max_input_bytes
                ),
            });
        }
        Ok(())
    }

    /// Reject trees that are too deep or declare too many elements.
    pub fn check_tree(&self, tree: &Value) -> Result<(), DeserializationError> {
        // Hard stop slightly above the configured depth so hostile input
        // cannot exhaust the stack while being measured.
        let hard_limit = self.max_nesting_depth.saturating_add(8);
        match measure_depth(tree, hard_limit) {
            Some(depth) if depth <= self.max_nesting_depth => {}
            Some(depth) => {
                return Err(exceeded(format!(
                    "nesting depth ({}) exceeds maximum allowed ({})",
                    depth, self.max_nesting_depth
                )))
            }
            None => {
                return Err(exceeded(format!(
                    "nesting depth exceeds maximum allowed ({})",
                    self.max_nesting_depth
                )))
            }
        }

        let steps = tree.get("steps").and_then(Value::as_array);
        if let Some(steps) = steps {
            if steps.len() > self.max_steps {
                return Err(exceeded(format!(
                    "step count ({}) exceeds maximum allowed ({})",
                    steps.len(),
                    self.max_steps
                )));
            }
            for (idx, step) in steps.iter().enumerate() {
                let policies = step.get("policies").and_then(Value::as_array);
                if let Some(policies) = policies {
                    if policies.len() > self.max_policies_per_step {
                        return Err(exceeded(format!(
                            "steps[{}] declares {} policies, maximum allowed is {}",
                            idx,
                            policies.len(),
                            self.max_policies_per_step
                        )));
                    }
                }
            }
        }

        if let Some(triggers) = tree.get("triggers").and_then(Value::as_array) {
            if triggers.len() > self.max_triggers {
                return Err(exceeded(format!(
                    "trigger count ({}) exceeds maximum allowed ({})",
                    triggers.len(),
                    self.max_triggers
                )));
            }
        }

        Ok(())
    }
}

fn exceeded(message: String) -> DeserializationError {
    DeserializationError::LimitExceeded { message }
}

/// Depth of `value`, or `None` once `remaining` levels have been used up.
fn measure_depth(value: &Value, remaining: usize) -> Option<usize> {
    if remaining == 0 {
        return None;
    }
    let children: Box<dyn Iterator<Item = &Value> + '_> = match value {
        Value::Object(map) => Box::new(map.values()),
        Value::Array(items) => Box::new(items.iter()),
        _ => return Some(1),
    };
    let mut deepest = 0;
    for child in children {
        deepest = deepest.max(measure_depth(child, remaining - 1)?);
    }
    Some(1 + deepest)
}
