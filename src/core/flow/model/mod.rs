//! Typed representation of a Flow DSL document.
//!
//! Every variant family is a serde internally-tagged enum keyed by `type`, so
//! coercing a generic tree into these types is the structural check.

pub mod metadata;
pub mod observability;
pub mod policy;
pub mod step;
pub mod transport;
pub mod trigger;

pub use metadata::{Compliance, DataClassification, Metadata, Owner, Rbac};
pub use observability::{Observability, PayloadSampling, TracePropagation};
pub use policy::{
    DeliveryGuarantee, IdempotencyPolicy, MtlsPolicy, OpaPolicy, Policy, Priority, QosPolicy,
    SecretsPolicy,
};
pub use step::{
    Backoff, BranchCondition, BranchStep, CheckpointStep, CircuitBreakerStep, ConnectorStep,
    DlqStep, EnrichStep, MapStep, RetryStep, ScriptLanguage, ScriptStep, Step, StepKind,
    ThrottleStep,
};
pub use transport::{
    CustomTransport, FsMode, FsTransport, GraphQlTransport, JdbcTransport, KafkaTransport,
    MqttTransport, RestMethod, RestTransport, SftpTransport, SoapTransport, Transport,
};
pub use trigger::{
    AuthKind, FileEvent, FileWatchTrigger, HttpAuth, HttpMethod, HttpTrigger, JdbcTrigger,
    KafkaTrigger, MqttTrigger, OffsetReset, RateLimit, ScheduleTrigger, SftpTrigger, Trigger,
};

use crate::core::flow::finding::Finding;
use serde::{Deserialize, Serialize};

/// Root document for a flow definition.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Flow {
    pub metadata: Metadata,
    #[serde(default)]
    pub triggers: Vec<Trigger>,
    pub steps: Vec<Step>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observability: Option<Observability>,
}

impl Flow {
    /// Shape constraints the serde derives cannot express.
    ///
    /// An empty result means the typed value conforms to the type model.
    pub fn shape_findings(&self) -> Vec<Finding> {
        let mut out = Vec::new();
        if self.steps.is_empty() {
            out.push(Finding::schema("steps", "flow must define at least one step"));
        }
        out
    }

    /// Look up a step by identifier (first match when identifiers collide).
    pub fn step(&self, id: &str) -> Option<&Step> {
        self.steps.iter().find(|step| step.id == id)
    }
}
