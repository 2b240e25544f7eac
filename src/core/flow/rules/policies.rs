use super::steps::zero;
use super::{is_blank, FlowRule};
use crate::core::config::RuleSettings;
use crate::core::flow::finding::{codes, Finding};
use crate::core::flow::model::{Flow, Policy};

/// Per-variant checks for the policies attached to each step.
pub struct PolicyRule;

impl FlowRule for PolicyRule {
    fn name(&self) -> &'static str {
        "policies"
    }

    fn check(&self, flow: &Flow, _settings: &RuleSettings) -> Vec<Finding> {
        let mut out = Vec::new();
        for (step_idx, step) in flow.steps.iter().enumerate() {
            for (idx, policy) in step.policies.iter().enumerate() {
                out.extend(check_policy(
                    &format!("steps[{}].policies[{}]", step_idx, idx),
                    policy,
                ));
            }
        }
        out
    }
}

pub fn check_policy(path: &str, policy: &Policy) -> Vec<Finding> {
    let mut out = Vec::new();
    let missing = |field: &str, code: &str, message: &str| {
        Finding::error(format!("{}.{}", path, field), code, message)
    };

    match policy {
        Policy::Qos(qos) => {
            if qos.timeout == Some(0) {
                out.push(zero(path, "timeout", codes::QOS_TIMEOUT_INVALID));
            }
        }
        Policy::Idempotency(idempotency) => {
            if is_blank(&idempotency.key_expression) {
                out.push(missing(
                    "keyExpression",
                    codes::IDEMPOTENCY_KEY_MISSING,
                    "idempotency policy requires a key expression",
                ));
            }
            if idempotency.ttl == Some(0) {
                out.push(zero(path, "ttl", codes::IDEMPOTENCY_TTL_INVALID));
            }
        }
        Policy::Mtls(mtls) => {
            if is_blank(&mtls.cert_path) {
                out.push(missing(
                    "certPath",
                    codes::MTLS_CERT_PATH_MISSING,
                    "mtls policy requires a certificate path",
                ));
            }
            if is_blank(&mtls.key_path) {
                out.push(missing(
                    "keyPath",
                    codes::MTLS_KEY_PATH_MISSING,
                    "mtls policy requires a key path",
                ));
            }
        }
        Policy::Opa(opa) => {
            if is_blank(&opa.policy_ref) {
                out.push(missing(
                    "policyRef",
                    codes::OPA_POLICY_REF_MISSING,
                    "opa policy requires a policy reference",
                ));
            }
        }
        Policy::Secrets(secrets) => {
            if secrets.vault_paths.iter().all(|p| is_blank(p)) {
                out.push(missing(
                    "vaultPaths",
                    codes::SECRETS_VAULT_PATHS_MISSING,
                    "secrets policy requires at least one vault path",
                ));
            }
            if secrets.refresh_interval == Some(0) {
                out.push(zero(
                    path,
                    "refreshInterval",
                    codes::SECRETS_REFRESH_INTERVAL_INVALID,
                ));
            }
        }
    }

    out
}
