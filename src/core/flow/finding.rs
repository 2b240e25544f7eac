use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity attached to a validation finding.
///
/// `Critical` is reserved for failures that stop validation before the
/// document could be read at all (syntax errors, input guard violations).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Error,
    Warning,
}

impl Severity {
    /// Whether a finding at this severity makes the document invalid.
    pub fn blocks(self) -> bool {
        matches!(self, Severity::Critical | Severity::Error)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Critical => write!(f, "critical"),
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// One structural or semantic validation outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Dot/bracket path into the document, e.g. `steps[2].step.expression`.
    pub path: Option<String>,
    pub message: String,
    pub code: String,
    pub severity: Severity,
}

impl Finding {
    pub fn new(
        path: impl Into<String>,
        code: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: Some(path.into()),
            message: message.into(),
            code: code.into(),
            severity,
        }
    }

    pub fn error(path: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(path, code, Severity::Error, message)
    }

    pub fn warning(
        path: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(path, code, Severity::Warning, message)
    }

    pub fn schema(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::error(path, codes::SCHEMA_VALIDATION_ERROR, message)
    }

    /// Schema finding for a problem that concerns the document root itself.
    pub fn schema_root(message: impl Into<String>) -> Self {
        Self {
            path: None,
            message: message.into(),
            code: codes::SCHEMA_VALIDATION_ERROR.to_string(),
            severity: Severity::Error,
        }
    }

    pub fn parse_error(message: impl Into<String>) -> Self {
        Self {
            path: None,
            message: message.into(),
            code: codes::PARSE_ERROR.to_string(),
            severity: Severity::Critical,
        }
    }

    pub fn limit_exceeded(message: impl Into<String>) -> Self {
        Self {
            path: None,
            message: message.into(),
            code: codes::INPUT_LIMIT_EXCEEDED.to_string(),
            severity: Severity::Critical,
        }
    }

    pub fn is_blocking(&self) -> bool {
        self.severity.blocks()
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({})",
            self.path.as_deref().unwrap_or("<document>"),
            self.message,
            self.code
        )
    }
}

/// Machine-readable finding codes.
pub mod codes {
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const INPUT_LIMIT_EXCEEDED: &str = "INPUT_LIMIT_EXCEEDED";
    pub const SCHEMA_VALIDATION_ERROR: &str = "SCHEMA_VALIDATION_ERROR";

    pub const METADATA_NAME_MISSING: &str = "METADATA_NAME_MISSING";
    pub const METADATA_VERSION_INVALID: &str = "METADATA_VERSION_INVALID";
    pub const OWNERS_MISSING: &str = "OWNERS_MISSING";
    pub const OWNER_EMAIL_INVALID: &str = "OWNER_EMAIL_INVALID";
    pub const COMPLIANCE_DATA_RETENTION_MISSING: &str = "COMPLIANCE_DATA_RETENTION_MISSING";
    pub const HIPAA_RBAC_REQUIRED: &str = "HIPAA_RBAC_REQUIRED";

    pub const HTTP_API_KEY_MISSING: &str = "HTTP_API_KEY_MISSING";
    pub const HTTP_RATE_LIMIT_INVALID: &str = "HTTP_RATE_LIMIT_INVALID";
    pub const SCHEDULE_CRON_INVALID: &str = "SCHEDULE_CRON_INVALID";
    pub const SCHEDULE_DATE_RANGE_INVALID: &str = "SCHEDULE_DATE_RANGE_INVALID";
    pub const KAFKA_BOOTSTRAP_SERVERS_MISSING: &str = "KAFKA_BOOTSTRAP_SERVERS_MISSING";
    pub const MQTT_QOS_INVALID: &str = "MQTT_QOS_INVALID";
    pub const SFTP_AUTH_MISSING: &str = "SFTP_AUTH_MISSING";
    pub const JDBC_URL_INVALID: &str = "JDBC_URL_INVALID";
    pub const FILE_WATCH_EVENTS_MISSING: &str = "FILE_WATCH_EVENTS_MISSING";

    pub const CONNECTOR_REF_MISSING: &str = "CONNECTOR_REF_MISSING";
    pub const CONNECTOR_OPERATION_MISSING: &str = "CONNECTOR_OPERATION_MISSING";
    pub const CONNECTOR_TIMEOUT_INVALID: &str = "CONNECTOR_TIMEOUT_INVALID";
    pub const MAP_EXPRESSION_MISSING: &str = "MAP_EXPRESSION_MISSING";
    pub const SCRIPT_CODE_MISSING: &str = "SCRIPT_CODE_MISSING";
    pub const SCRIPT_TIMEOUT_INVALID: &str = "SCRIPT_TIMEOUT_INVALID";
    pub const ENRICH_SOURCE_MISSING: &str = "ENRICH_SOURCE_MISSING";
    pub const ENRICH_KEY_MISSING: &str = "ENRICH_KEY_MISSING";
    pub const BRANCH_CONDITIONS_MISSING: &str = "BRANCH_CONDITIONS_MISSING";
    pub const BRANCH_CONDITION_MISSING: &str = "BRANCH_CONDITION_MISSING";
    pub const BRANCH_TARGET_MISSING: &str = "BRANCH_TARGET_MISSING";
    pub const RETRY_MAX_ATTEMPTS_INVALID: &str = "RETRY_MAX_ATTEMPTS_INVALID";
    pub const DLQ_REASON_MISSING: &str = "DLQ_REASON_MISSING";
    pub const THROTTLE_RATE_INVALID: &str = "THROTTLE_RATE_INVALID";
    pub const THROTTLE_BURST_INVALID: &str = "THROTTLE_BURST_INVALID";
    pub const CHECKPOINT_NAME_MISSING: &str = "CHECKPOINT_NAME_MISSING";
    pub const CIRCUIT_BREAKER_THRESHOLD_INVALID: &str = "CIRCUIT_BREAKER_THRESHOLD_INVALID";
    pub const CIRCUIT_BREAKER_RECOVERY_TIMEOUT_INVALID: &str =
        "CIRCUIT_BREAKER_RECOVERY_TIMEOUT_INVALID";

    pub const REST_URL_MISSING: &str = "REST_URL_MISSING";
    pub const REST_TIMEOUT_INVALID: &str = "REST_TIMEOUT_INVALID";
    pub const SOAP_URL_MISSING: &str = "SOAP_URL_MISSING";
    pub const SOAP_ACTION_MISSING: &str = "SOAP_ACTION_MISSING";
    pub const GRAPHQL_URL_MISSING: &str = "GRAPHQL_URL_MISSING";
    pub const GRAPHQL_QUERY_MISSING: &str = "GRAPHQL_QUERY_MISSING";
    pub const JDBC_TRANSPORT_URL_INVALID: &str = "JDBC_TRANSPORT_URL_INVALID";
    pub const JDBC_QUERY_MISSING: &str = "JDBC_QUERY_MISSING";
    pub const KAFKA_TOPIC_MISSING: &str = "KAFKA_TOPIC_MISSING";
    pub const KAFKA_TRANSPORT_BOOTSTRAP_SERVERS_MISSING: &str =
        "KAFKA_TRANSPORT_BOOTSTRAP_SERVERS_MISSING";
    pub const MQTT_TOPIC_MISSING: &str = "MQTT_TOPIC_MISSING";
    pub const MQTT_BROKER_MISSING: &str = "MQTT_BROKER_MISSING";
    pub const SFTP_HOST_MISSING: &str = "SFTP_HOST_MISSING";
    pub const SFTP_PATH_MISSING: &str = "SFTP_PATH_MISSING";
    pub const FS_PATH_MISSING: &str = "FS_PATH_MISSING";
    pub const CUSTOM_TRANSPORT_NAME_MISSING: &str = "CUSTOM_TRANSPORT_NAME_MISSING";

    pub const QOS_TIMEOUT_INVALID: &str = "QOS_TIMEOUT_INVALID";
    pub const IDEMPOTENCY_KEY_MISSING: &str = "IDEMPOTENCY_KEY_MISSING";
    pub const IDEMPOTENCY_TTL_INVALID: &str = "IDEMPOTENCY_TTL_INVALID";
    pub const MTLS_CERT_PATH_MISSING: &str = "MTLS_CERT_PATH_MISSING";
    pub const MTLS_KEY_PATH_MISSING: &str = "MTLS_KEY_PATH_MISSING";
    pub const OPA_POLICY_REF_MISSING: &str = "OPA_POLICY_REF_MISSING";
    pub const SECRETS_VAULT_PATHS_MISSING: &str = "SECRETS_VAULT_PATHS_MISSING";
    pub const SECRETS_REFRESH_INTERVAL_INVALID: &str = "SECRETS_REFRESH_INTERVAL_INVALID";

    pub const STEP_ID_MISSING: &str = "STEP_ID_MISSING";
    pub const DUPLICATE_STEP_ID: &str = "DUPLICATE_STEP_ID";
    pub const INVALID_NEXT_STEP_REFERENCE: &str = "INVALID_NEXT_STEP_REFERENCE";
    pub const INVALID_ERROR_STEP_REFERENCE: &str = "INVALID_ERROR_STEP_REFERENCE";
    pub const INVALID_BRANCH_TARGET_REFERENCE: &str = "INVALID_BRANCH_TARGET_REFERENCE";
    pub const STEP_SELF_REFERENCE: &str = "STEP_SELF_REFERENCE";
    pub const STEP_GRAPH_CYCLE: &str = "STEP_GRAPH_CYCLE";
    pub const UNREACHABLE_STEP: &str = "UNREACHABLE_STEP";

    pub const OBSERVABILITY_SAMPLE_RATE_INVALID: &str = "OBSERVABILITY_SAMPLE_RATE_INVALID";
    pub const OBSERVABILITY_PAYLOAD_SAMPLE_RATE_INVALID: &str =
        "OBSERVABILITY_PAYLOAD_SAMPLE_RATE_INVALID";
    pub const OBSERVABILITY_PAYLOAD_MAX_SIZE_INVALID: &str =
        "OBSERVABILITY_PAYLOAD_MAX_SIZE_INVALID";

    use super::Severity;

    /// Every code with the severity it carries under the default configuration.
    ///
    /// `None` marks graph rules that are off until enabled in `[rules]`.
    pub const CATALOGUE: &[(&str, Option<Severity>)] = &[
        (PARSE_ERROR, Some(Severity::Critical)),
        (INPUT_LIMIT_EXCEEDED, Some(Severity::Critical)),
        (SCHEMA_VALIDATION_ERROR, Some(Severity::Error)),
        (METADATA_NAME_MISSING, Some(Severity::Error)),
        (METADATA_VERSION_INVALID, Some(Severity::Error)),
        (OWNERS_MISSING, Some(Severity::Warning)),
        (OWNER_EMAIL_INVALID, Some(Severity::Warning)),
        (COMPLIANCE_DATA_RETENTION_MISSING, Some(Severity::Warning)),
        (HIPAA_RBAC_REQUIRED, Some(Severity::Error)),
        (HTTP_API_KEY_MISSING, Some(Severity::Error)),
        (HTTP_RATE_LIMIT_INVALID, Some(Severity::Error)),
        (SCHEDULE_CRON_INVALID, Some(Severity::Error)),
        (SCHEDULE_DATE_RANGE_INVALID, Some(Severity::Error)),
        (KAFKA_BOOTSTRAP_SERVERS_MISSING, Some(Severity::Error)),
        (MQTT_QOS_INVALID, Some(Severity::Error)),
        (SFTP_AUTH_MISSING, Some(Severity::Error)),
        (JDBC_URL_INVALID, Some(Severity::Error)),
        (FILE_WATCH_EVENTS_MISSING, Some(Severity::Error)),
        (CONNECTOR_REF_MISSING, Some(Severity::Error)),
        (CONNECTOR_OPERATION_MISSING, Some(Severity::Error)),
        (CONNECTOR_TIMEOUT_INVALID, Some(Severity::Error)),
        (MAP_EXPRESSION_MISSING, Some(Severity::Error)),
        (SCRIPT_CODE_MISSING, Some(Severity::Error)),
        (SCRIPT_TIMEOUT_INVALID, Some(Severity::Error)),
        (ENRICH_SOURCE_MISSING, Some(Severity::Error)),
        (ENRICH_KEY_MISSING, Some(Severity::Error)),
        (BRANCH_CONDITIONS_MISSING, Some(Severity::Error)),
        (BRANCH_CONDITION_MISSING, Some(Severity::Error)),
        (BRANCH_TARGET_MISSING, Some(Severity::Error)),
        (RETRY_MAX_ATTEMPTS_INVALID, Some(Severity::Error)),
        (DLQ_REASON_MISSING, Some(Severity::Error)),
        (THROTTLE_RATE_INVALID, Some(Severity::Error)),
        (THROTTLE_BURST_INVALID, Some(Severity::Error)),
        (CHECKPOINT_NAME_MISSING, Some(Severity::Error)),
        (CIRCUIT_BREAKER_THRESHOLD_INVALID, Some(Severity::Error)),
        (CIRCUIT_BREAKER_RECOVERY_TIMEOUT_INVALID, Some(Severity::Error)),
        (REST_URL_MISSING, Some(Severity::Error)),
        (REST_TIMEOUT_INVALID, Some(Severity::Error)),
        (SOAP_URL_MISSING, Some(Severity::Error)),
        (SOAP_ACTION_MISSING, Some(Severity::Error)),
        (GRAPHQL_URL_MISSING, Some(Severity::Error)),
        (GRAPHQL_QUERY_MISSING, Some(Severity::Error)),
        (JDBC_TRANSPORT_URL_INVALID, Some(Severity::Error)),
        (JDBC_QUERY_MISSING, Some(Severity::Error)),
        (KAFKA_TOPIC_MISSING, Some(Severity::Error)),
        (KAFKA_TRANSPORT_BOOTSTRAP_SERVERS_MISSING, Some(Severity::Error)),
        (MQTT_TOPIC_MISSING, Some(Severity::Error)),
        (MQTT_BROKER_MISSING, Some(Severity::Error)),
        (SFTP_HOST_MISSING, Some(Severity::Error)),
        (SFTP_PATH_MISSING, Some(Severity::Error)),
        (FS_PATH_MISSING, Some(Severity::Error)),
        (CUSTOM_TRANSPORT_NAME_MISSING, Some(Severity::Error)),
        (QOS_TIMEOUT_INVALID, Some(Severity::Error)),
        (IDEMPOTENCY_KEY_MISSING, Some(Severity::Error)),
        (IDEMPOTENCY_TTL_INVALID, Some(Severity::Error)),
        (MTLS_CERT_PATH_MISSING, Some(Severity::Error)),
        (MTLS_KEY_PATH_MISSING, Some(Severity::Error)),
        (OPA_POLICY_REF_MISSING, Some(Severity::Error)),
        (SECRETS_VAULT_PATHS_MISSING, Some(Severity::Error)),
        (SECRETS_REFRESH_INTERVAL_INVALID, Some(Severity::Error)),
        (STEP_ID_MISSING, Some(Severity::Error)),
        (DUPLICATE_STEP_ID, Some(Severity::Error)),
        (INVALID_NEXT_STEP_REFERENCE, Some(Severity::Error)),
        (INVALID_ERROR_STEP_REFERENCE, Some(Severity::Error)),
        (INVALID_BRANCH_TARGET_REFERENCE, Some(Severity::Error)),
        (STEP_SELF_REFERENCE, Some(Severity::Error)),
        (STEP_GRAPH_CYCLE, None),
        (UNREACHABLE_STEP, Some(Severity::Warning)),
        (OBSERVABILITY_SAMPLE_RATE_INVALID, Some(Severity::Error)),
        (OBSERVABILITY_PAYLOAD_SAMPLE_RATE_INVALID, Some(Severity::Error)),
        (OBSERVABILITY_PAYLOAD_MAX_SIZE_INVALID, Some(Severity::Error)),
    ];

    /// Codes raised before the semantic rules run; these always surface.
    pub const UNSUPPRESSIBLE: &[&str] =
        &[PARSE_ERROR, INPUT_LIMIT_EXCEEDED, SCHEMA_VALIDATION_ERROR];

    pub fn is_known(code: &str) -> bool {
        CATALOGUE.iter().any(|&(known, _)| known == code)
    }

    pub fn is_suppressible(code: &str) -> bool {
        is_known(code) && !UNSUPPRESSIBLE.contains(&code)
    }
}
