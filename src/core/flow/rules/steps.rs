use super::{is_blank, FlowRule};
use crate::core::config::RuleSettings;
use crate::core::flow::finding::{codes, Finding};
use crate::core::flow::model::{Flow, StepKind};

/// Per-variant checks for the `step` block of every step.
pub struct StepRule;

impl FlowRule for StepRule {
    fn name(&self) -> &'static str {
        "steps"
    }

    fn check(&self, flow: &Flow, _settings: &RuleSettings) -> Vec<Finding> {
        flow.steps
            .iter()
            .enumerate()
            .flat_map(|(idx, step)| check_step_kind(&format!("steps[{}].step", idx), &step.step))
            .collect()
    }
}

pub fn check_step_kind(path: &str, kind: &StepKind) -> Vec<Finding> {
    let mut out = Vec::new();
    let mut require = |value: &str, field: &str, code: &str, message: &str| {
        if is_blank(value) {
            out.push(Finding::error(format!("{}.{}", path, field), code, message));
        }
    };

    match kind {
        StepKind::Connector(connector) => {
            require(
                &connector.connector_ref,
                "connectorRef",
                codes::CONNECTOR_REF_MISSING,
                "connector step requires a connector reference",
            );
            require(
                &connector.operation,
                "operation",
                codes::CONNECTOR_OPERATION_MISSING,
                "connector step requires an operation",
            );
            if connector.timeout == Some(0) {
                out.push(zero(path, "timeout", codes::CONNECTOR_TIMEOUT_INVALID));
            }
        }
        StepKind::Map(map) => require(
            &map.expression,
            "expression",
            codes::MAP_EXPRESSION_MISSING,
            "map step requires a non-empty expression",
        ),
        StepKind::Script(script) => {
            require(
                &script.code,
                "code",
                codes::SCRIPT_CODE_MISSING,
                "script step requires non-empty code",
            );
            if script.timeout == Some(0) {
                out.push(zero(path, "timeout", codes::SCRIPT_TIMEOUT_INVALID));
            }
        }
        StepKind::Enrich(enrich) => {
            require(
                &enrich.source,
                "source",
                codes::ENRICH_SOURCE_MISSING,
                "enrich step requires a source",
            );
            require(
                &enrich.key,
                "key",
                codes::ENRICH_KEY_MISSING,
                "enrich step requires a lookup key",
            );
        }
        StepKind::Branch(branch) => {
            if branch.conditions.is_empty() {
                out.push(Finding::error(
                    format!("{}.conditions", path),
                    codes::BRANCH_CONDITIONS_MISSING,
                    "branch step requires at least one condition",
                ));
            }
            for (idx, condition) in branch.conditions.iter().enumerate() {
                let at = format!("{}.conditions[{}]", path, idx);
                if is_blank(&condition.condition) {
                    out.push(Finding::error(
                        format!("{}.condition", at),
                        codes::BRANCH_CONDITION_MISSING,
                        "branch condition expression must not be empty",
                    ));
                }
                if is_blank(&condition.target) {
                    out.push(Finding::error(
                        format!("{}.target", at),
                        codes::BRANCH_TARGET_MISSING,
                        "branch condition must name a target step",
                    ));
                }
            }
        }
        StepKind::Retry(retry) => {
            if retry.max_attempts == 0 {
                out.push(zero(path, "maxAttempts", codes::RETRY_MAX_ATTEMPTS_INVALID));
            }
        }
        StepKind::Dlq(dlq) => require(
            &dlq.reason,
            "reason",
            codes::DLQ_REASON_MISSING,
            "dlq step requires a reason",
        ),
        StepKind::Throttle(throttle) => {
            if throttle.rate.is_nan() || throttle.rate <= 0.0 {
                out.push(Finding::error(
                    format!("{}.rate", path),
                    codes::THROTTLE_RATE_INVALID,
                    format!("throttle rate must be greater than 0, got {}", throttle.rate),
                ));
            }
            if throttle.burst == Some(0) {
                out.push(zero(path, "burst", codes::THROTTLE_BURST_INVALID));
            }
        }
        StepKind::Checkpoint(checkpoint) => require(
            &checkpoint.name,
            "name",
            codes::CHECKPOINT_NAME_MISSING,
            "checkpoint step requires a name",
        ),
        StepKind::CircuitBreaker(breaker) => {
            if breaker.failure_threshold == 0 {
                out.push(zero(
                    path,
                    "failureThreshold",
                    codes::CIRCUIT_BREAKER_THRESHOLD_INVALID,
                ));
            }
            if breaker.recovery_timeout == 0 {
                out.push(zero(
                    path,
                    "recoveryTimeout",
                    codes::CIRCUIT_BREAKER_RECOVERY_TIMEOUT_INVALID,
                ));
            }
        }
    }

    out
}

/// Finding for a numeric field that must be greater than zero.
pub(crate) fn zero(path: &str, field: &str, code: &str) -> Finding {
    Finding::error(
        format!("{}.{}", path, field),
        code,
        format!("{} must be greater than 0", field),
    )
}
