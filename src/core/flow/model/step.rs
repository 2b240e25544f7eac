use super::policy::Policy;
use super::transport::Transport;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One unit of processing in a flow.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub step: StepKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<Transport>,
    #[serde(default)]
    pub policies: Vec<Policy>,
    /// Successor step identifiers.
    #[serde(default)]
    pub next: Vec<String>,
    /// Step that handles failures of this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Step {
    /// Step identifiers this step routes to on the success path, in declaration order.
    pub fn successor_refs(&self) -> impl Iterator<Item = &str> {
        self.next
            .iter()
            .map(String::as_str)
            .chain(self.step.branch_targets())
    }
}

/// The action performed by a step, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StepKind {
    Connector(ConnectorStep),
    Map(MapStep),
    Script(ScriptStep),
    Enrich(EnrichStep),
    Branch(BranchStep),
    Retry(RetryStep),
    Dlq(DlqStep),
    Throttle(ThrottleStep),
    Checkpoint(CheckpointStep),
    #[serde(alias = "circuit-breaker", alias = "circuit_breaker")]
    CircuitBreaker(CircuitBreakerStep),
}

impl StepKind {
    /// Wire tag of this step variant.
    pub fn kind(&self) -> &'static str {
        match self {
            StepKind::Connector(_) => "connector",
            StepKind::Map(_) => "map",
            StepKind::Script(_) => "script",
            StepKind::Enrich(_) => "enrich",
            StepKind::Branch(_) => "branch",
            StepKind::Retry(_) => "retry",
            StepKind::Dlq(_) => "dlq",
            StepKind::Throttle(_) => "throttle",
            StepKind::Checkpoint(_) => "checkpoint",
            StepKind::CircuitBreaker(_) => "circuitBreaker",
        }
    }

    /// Non-empty branch targets (conditions first, then the default route).
    pub fn branch_targets(&self) -> impl Iterator<Item = &str> {
        let (conditions, default) = match self {
            StepKind::Branch(branch) => (branch.conditions.as_slice(), branch.default.as_deref()),
            _ => (&[][..], None),
        };
        conditions
            .iter()
            .map(|c| c.target.as_str())
            .chain(default)
            .filter(|target| !target.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorStep {
    /// Name of a connector registered outside the flow.
    pub connector_ref: String,
    pub operation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
    /// Milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapStep {
    pub expression: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptLanguage {
    #[default]
    Javascript,
    Python,
    Jsonata,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptStep {
    pub code: String,
    #[serde(default)]
    pub language: ScriptLanguage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichStep {
    pub source: String,
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default)]
    pub cache: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchStep {
    pub conditions: Vec<BranchCondition>,
    /// Route taken when no condition matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchCondition {
    pub condition: String,
    pub target: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backoff {
    Fixed,
    Linear,
    #[default]
    Exponential,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryStep {
    pub max_attempts: u32,
    #[serde(default)]
    pub backoff: Backoff,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_delay: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_delay: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DlqStep {
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThrottleStep {
    /// Messages per second.
    pub rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub burst: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckpointStep {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitBreakerStep {
    pub failure_threshold: u32,
    /// Milliseconds before a half-open trial request.
    pub recovery_timeout: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub half_open_requests: Option<u32>,
}
