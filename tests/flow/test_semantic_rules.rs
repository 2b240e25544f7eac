use flowdsl::core::{codes, validate, Severity, ValidationResult};
use serde_json::{json, Value};

fn minimal() -> Value {
    json!({
        "metadata": {"name": "X", "version": "1.0.0"},
        "steps": [{"id": "s1", "name": "S1", "step": {"type": "checkpoint", "name": "c"}}]
    })
}

fn with_owner(mut doc: Value) -> Value {
    doc["metadata"]["owners"] = json!([{"name": "Ops", "email": "ops@example.com"}]);
    doc
}

fn error_codes(result: &ValidationResult) -> Vec<&str> {
    result.errors.iter().map(|f| f.code.as_str()).collect()
}

fn warning_codes(result: &ValidationResult) -> Vec<&str> {
    result.warnings.iter().map(|f| f.code.as_str()).collect()
}

fn find<'r>(result: &'r ValidationResult, code: &str) -> &'r flowdsl::core::Finding {
    result
        .findings()
        .find(|f| f.code == code)
        .unwrap_or_else(|| panic!("expected {code} in {result:?}"))
}

#[test]
fn minimal_flow_is_valid_with_owner_warning() {
    let result = validate(&minimal());

    assert!(result.valid);
    assert!(result.errors.is_empty());
    assert_eq!(warning_codes(&result), vec![codes::OWNERS_MISSING]);
    assert_eq!(
        result.warnings[0].path.as_deref(),
        Some("metadata.owners")
    );
}

#[test]
fn duplicate_step_ids_invalidate_the_flow() {
    let mut doc = with_owner(minimal());
    doc["steps"] = json!([
        {"id": "step1", "name": "A", "step": {"type": "checkpoint", "name": "a"}},
        {"id": "step1", "name": "B", "step": {"type": "checkpoint", "name": "b"}}
    ]);

    let result = validate(&doc);
    assert!(!result.valid);
    assert_eq!(error_codes(&result), vec![codes::DUPLICATE_STEP_ID]);
    assert_eq!(result.errors[0].path.as_deref(), Some("steps[1].id"));
}

#[test]
fn dangling_next_reference_is_an_error() {
    let mut doc = with_owner(minimal());
    doc["steps"][0]["next"] = json!(["ghost"]);

    let result = validate(&doc);
    assert!(!result.valid);
    let finding = find(&result, codes::INVALID_NEXT_STEP_REFERENCE);
    assert_eq!(finding.path.as_deref(), Some("steps[0].next[0]"));
    assert!(finding.message.contains("ghost"));
}

#[test]
fn dangling_error_handler_is_an_error() {
    let mut doc = with_owner(minimal());
    doc["steps"][0]["error"] = json!("handler");

    let result = validate(&doc);
    assert!(!result.valid);
    assert_eq!(error_codes(&result), vec![codes::INVALID_ERROR_STEP_REFERENCE]);
    assert_eq!(result.errors[0].severity, Severity::Error);
}

#[test]
fn hipaa_without_roles_requires_rbac() {
    let mut doc = with_owner(minimal());
    doc["metadata"]["compliance"] = json!({"hipaa": true, "dataRetention": 365});
    doc["metadata"]["rbac"] = json!({"roles": []});

    let result = validate(&doc);
    assert!(!result.valid);
    assert_eq!(error_codes(&result), vec![codes::HIPAA_RBAC_REQUIRED]);
    assert!(result.warnings.is_empty());

    doc["metadata"]["rbac"] = json!({"roles": ["clinician"]});
    assert!(validate(&doc).valid);
}

#[test]
fn regulated_flows_should_declare_retention() {
    let mut doc = with_owner(minimal());
    doc["metadata"]["compliance"] = json!({"gdpr": true});

    let result = validate(&doc);
    assert!(result.valid);
    assert_eq!(
        warning_codes(&result),
        vec![codes::COMPLIANCE_DATA_RETENTION_MISSING]
    );
}

#[test]
fn out_of_range_sample_rate_is_an_error() {
    let mut doc = with_owner(minimal());
    doc["observability"] = json!({"sampleRate": 1.5});

    let result = validate(&doc);
    assert!(!result.valid);
    let finding = find(&result, codes::OBSERVABILITY_SAMPLE_RATE_INVALID);
    assert_eq!(finding.path.as_deref(), Some("observability.sampleRate"));
}

#[test]
fn metadata_identity_checks() {
    let mut doc = minimal();
    doc["metadata"] = json!({
        "name": "  ",
        "version": "v1",
        "owners": [{"name": "Ops", "email": "not-an-address"}]
    });

    let result = validate(&doc);
    assert_eq!(
        error_codes(&result),
        vec![codes::METADATA_NAME_MISSING, codes::METADATA_VERSION_INVALID]
    );
    assert_eq!(warning_codes(&result), vec![codes::OWNER_EMAIL_INVALID]);
    assert_eq!(
        find(&result, codes::OWNER_EMAIL_INVALID).path.as_deref(),
        Some("metadata.owners[0].email")
    );
}

#[test]
fn trigger_rules_cover_each_family() {
    let mut doc = with_owner(minimal());
    doc["triggers"] = json!([
        {"type": "http", "path": "/in", "auth": {"type": "apiKey"}, "rateLimit": {"requests": 0}},
        {"type": "schedule", "cron": "every minute"},
        {"type": "schedule", "cron": "0 0 * * *",
         "startDate": "2026-02-01T00:00:00Z", "endDate": "2026-01-01T00:00:00Z"},
        {"type": "kafka", "bootstrapServers": [" "], "topic": "orders"},
        {"type": "mqtt", "broker": "tcp://b", "topic": "t", "qos": 3},
        {"type": "sftp", "host": "h", "username": "u", "path": "/in"},
        {"type": "jdbc", "url": "postgres://db", "query": "select 1"},
        {"type": "fileWatch", "path": "/in", "events": []}
    ]);

    let result = validate(&doc);
    assert_eq!(
        error_codes(&result),
        vec![
            codes::HTTP_API_KEY_MISSING,
            codes::HTTP_RATE_LIMIT_INVALID,
            codes::SCHEDULE_CRON_INVALID,
            codes::SCHEDULE_DATE_RANGE_INVALID,
            codes::KAFKA_BOOTSTRAP_SERVERS_MISSING,
            codes::MQTT_QOS_INVALID,
            codes::SFTP_AUTH_MISSING,
            codes::JDBC_URL_INVALID,
            codes::FILE_WATCH_EVENTS_MISSING,
        ]
    );
    assert_eq!(
        find(&result, codes::MQTT_QOS_INVALID).path.as_deref(),
        Some("triggers[4].qos")
    );
}

#[test]
fn step_rules_report_blank_and_zero_values() {
    let mut doc = with_owner(minimal());
    doc["steps"] = json!([
        {"id": "a", "name": "A", "step": {"type": "connector", "connectorRef": "", "operation": "op", "timeout": 0}},
        {"id": "b", "name": "B", "step": {"type": "throttle", "rate": 0, "burst": 0}},
        {"id": "c", "name": "C", "step": {"type": "branch", "conditions": []}},
        {"id": "d", "name": "D", "step": {"type": "circuitBreaker", "failureThreshold": 0, "recoveryTimeout": 10}}
    ]);

    let result = validate(&doc);
    assert_eq!(
        error_codes(&result),
        vec![
            codes::CONNECTOR_REF_MISSING,
            codes::CONNECTOR_TIMEOUT_INVALID,
            codes::THROTTLE_RATE_INVALID,
            codes::THROTTLE_BURST_INVALID,
            codes::BRANCH_CONDITIONS_MISSING,
            codes::CIRCUIT_BREAKER_THRESHOLD_INVALID,
        ]
    );
}

#[test]
fn transport_and_policy_rules_run_per_step() {
    let mut doc = with_owner(minimal());
    doc["steps"][0]["transport"] = json!({"type": "kafka", "topic": "", "bootstrapServers": []});
    doc["steps"][0]["policies"] = json!([
        {"type": "qos", "timeout": 0},
        {"type": "idempotency", "keyExpression": "$.id", "ttl": 0},
        {"type": "secrets", "vaultPaths": []}
    ]);

    let result = validate(&doc);
    assert_eq!(
        error_codes(&result),
        vec![
            codes::KAFKA_TOPIC_MISSING,
            codes::KAFKA_TRANSPORT_BOOTSTRAP_SERVERS_MISSING,
            codes::QOS_TIMEOUT_INVALID,
            codes::IDEMPOTENCY_TTL_INVALID,
            codes::SECRETS_VAULT_PATHS_MISSING,
        ]
    );
    assert_eq!(
        find(&result, codes::QOS_TIMEOUT_INVALID).path.as_deref(),
        Some("steps[0].policies[0].timeout")
    );
}

#[test]
fn large_mqtt_qos_is_a_qos_finding() {
    let mut doc = with_owner(minimal());
    doc["triggers"] = json!([{"type": "mqtt", "broker": "tcp://b", "topic": "t", "qos": 300}]);
    doc["steps"][0]["transport"] = json!({"type": "mqtt", "broker": "tcp://b", "topic": "t", "qos": 300});

    let result = validate(&doc);
    assert_eq!(
        error_codes(&result),
        vec![codes::MQTT_QOS_INVALID, codes::MQTT_QOS_INVALID]
    );
    let found: Vec<_> = result.errors.iter().filter_map(|f| f.path.as_deref()).collect();
    assert_eq!(found, vec!["triggers[0].qos", "steps[0].transport.qos"]);
    assert_eq!(result.errors[0].message, "MQTT QoS must be 0, 1 or 2, got 300");
}

#[test]
fn all_rule_families_accumulate_in_one_pass() {
    let mut doc = minimal();
    doc["metadata"]["compliance"] = json!({"hipaa": true});
    doc["triggers"] = json!([{"type": "mqtt", "broker": "tcp://b", "topic": "t", "qos": 7}]);
    doc["steps"][0]["next"] = json!(["ghost"]);
    doc["observability"] = json!({"sampleRate": -0.5});

    let result = validate(&doc);
    for code in [
        codes::OWNERS_MISSING,
        codes::COMPLIANCE_DATA_RETENTION_MISSING,
        codes::HIPAA_RBAC_REQUIRED,
        codes::MQTT_QOS_INVALID,
        codes::INVALID_NEXT_STEP_REFERENCE,
        codes::OBSERVABILITY_SAMPLE_RATE_INVALID,
    ] {
        assert!(result.has_code(code), "missing {code}");
    }
}
