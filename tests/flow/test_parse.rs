use flowdsl::core::flow::model::{StepKind, Transport, Trigger};
use flowdsl::core::{
    codes, parse_str, parse_value, validate_str, DeserializationError, InputFormat, InputLimits,
    Severity,
};
use serde_json::json;

const ORDERS_YAML: &str = r#"
metadata:
  name: orders
  version: 2.1.0
  owners:
    - name: Integration Team
      email: integration@example.com
triggers:
  - type: http
    path: /orders
    method: POST
    auth:
      type: api-key
      key: ${ORDERS_KEY}
  - type: file_watch
    path: /incoming
    events: [create]
steps:
  - id: fetch
    name: Fetch order
    step:
      type: connector
      connectorRef: erp
      operation: getOrder
    transport:
      type: rest
      url: https://erp.internal/orders
    next: [guard]
  - id: guard
    name: Guard ERP
    step:
      type: circuit-breaker
      failureThreshold: 5
      recoveryTimeout: 30000
"#;

#[test]
fn yaml_document_parses_with_tag_aliases() {
    let flow = parse_str(ORDERS_YAML, InputFormat::Auto, &InputLimits::default()).unwrap();

    assert_eq!(flow.metadata.name, "orders");
    assert_eq!(flow.triggers.len(), 2);
    assert!(matches!(flow.triggers[0], Trigger::Http(_)));
    assert!(matches!(flow.triggers[1], Trigger::FileWatch(_)));
    assert!(matches!(flow.steps[0].step, StepKind::Connector(_)));
    assert!(matches!(flow.steps[0].transport, Some(Transport::Rest(_))));
    assert!(matches!(flow.steps[1].step, StepKind::CircuitBreaker(_)));
    assert_eq!(flow.steps[0].next, vec!["guard".to_string()]);
}

#[test]
fn json_and_yaml_encodings_produce_the_same_flow() {
    let from_yaml = parse_str(ORDERS_YAML, InputFormat::Yaml, &InputLimits::default()).unwrap();
    let as_json = serde_json::to_string(&from_yaml).unwrap();
    let from_json = parse_str(&as_json, InputFormat::Json, &InputLimits::default()).unwrap();
    assert_eq!(from_yaml, from_json);
}

#[test]
fn parse_value_accepts_a_pre_parsed_tree() {
    let tree = json!({
        "metadata": {"name": "X", "version": "1.0.0"},
        "steps": [{"id": "s1", "name": "S1", "step": {"type": "checkpoint", "name": "c"}}]
    });
    let flow = parse_value(&tree, &InputLimits::default()).unwrap();
    assert_eq!(flow.steps.len(), 1);
    assert_eq!(flow.steps[0].step.kind(), "checkpoint");
}

#[test]
fn syntax_error_is_distinct_from_schema_error() {
    let syntax = parse_str("metadata: [unclosed", InputFormat::Yaml, &InputLimits::default())
        .unwrap_err();
    assert!(matches!(syntax, DeserializationError::Syntax { .. }));

    let schema = parse_str("metadata: {}\n", InputFormat::Yaml, &InputLimits::default())
        .unwrap_err();
    match schema {
        DeserializationError::Schema { findings } => {
            assert!(findings
                .iter()
                .all(|f| f.code == codes::SCHEMA_VALIDATION_ERROR));
            assert!(findings
                .iter()
                .any(|f| f.path.as_deref() == Some("metadata.name")));
        }
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[test]
fn malformed_text_yields_single_critical_parse_finding() {
    let result = validate_str("{\"metadata\": {", InputFormat::Auto);

    assert!(!result.valid);
    assert_eq!(result.errors.len(), 1);
    assert!(result.warnings.is_empty());
    let finding = &result.errors[0];
    assert_eq!(finding.code, codes::PARSE_ERROR);
    assert_eq!(finding.severity, Severity::Critical);
    assert!(finding.path.is_none());
}

#[test]
fn oversized_input_is_rejected_by_the_guard() {
    let limits = InputLimits::default().with_max_input_bytes(32);
    let err = parse_str(ORDERS_YAML, InputFormat::Yaml, &limits).unwrap_err();
    assert!(matches!(err, DeserializationError::LimitExceeded { .. }));

    let findings = err.into_findings();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].code, codes::INPUT_LIMIT_EXCEEDED);
    assert_eq!(findings[0].severity, Severity::Critical);
}

#[test]
fn too_many_steps_trip_the_guard() {
    let steps: Vec<_> = (0..4)
        .map(|i| json!({"id": format!("s{i}"), "name": "S", "step": {"type": "checkpoint", "name": "c"}}))
        .collect();
    let tree = json!({"metadata": {"name": "X", "version": "1.0.0"}, "steps": steps});

    let limits = InputLimits::default().with_max_steps(3);
    let err = parse_value(&tree, &limits).unwrap_err();
    assert!(matches!(err, DeserializationError::LimitExceeded { .. }));
    assert!(parse_value(&tree, &InputLimits::default()).is_ok());
}
