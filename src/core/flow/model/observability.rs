use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

/// Tracing, sampling and metrics configuration for a flow.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Observability {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    #[serde(default)]
    pub propagation: TracePropagation,
    /// Fraction of executions traced, expected within `[0, 1]`.
    pub sample_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_sampling: Option<PayloadSampling>,
    #[serde(default = "default_enabled")]
    pub metrics: bool,
    #[serde(default = "default_enabled")]
    pub logs: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TracePropagation {
    #[default]
    W3c,
    B3,
    Jaeger,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadSampling {
    pub rate: f64,
    /// Largest captured payload in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u64>,
}
