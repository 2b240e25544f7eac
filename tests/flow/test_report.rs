use flowdsl::core::{format_findings, validate, validate_str, InputFormat, ValidationResult};
use insta::assert_snapshot;
use serde_json::json;

#[test]
fn valid_flow_report_lists_warnings() {
    let result = validate(&json!({
        "metadata": {"name": "X", "version": "1.0.0"},
        "steps": [{"id": "s1", "name": "S1", "step": {"type": "checkpoint", "name": "c"}}]
    }));

    assert_snapshot!(format_findings(&result), @r###"
Validation passed
Warnings:
  - metadata.owners: flow has no owners (OWNERS_MISSING)
"###);
}

#[test]
fn clean_flow_report_is_a_single_line() {
    let result = validate(&json!({
        "metadata": {
            "name": "X",
            "version": "1.0.0",
            "owners": [{"name": "Ops", "email": "ops@example.com"}]
        },
        "steps": [{"id": "s1", "name": "S1", "step": {"type": "checkpoint", "name": "c"}}]
    }));

    assert_eq!(format_findings(&result), "Validation passed");
}

#[test]
fn failed_report_lists_errors_before_warnings() {
    let result = validate(&json!({
        "metadata": {"name": "X", "version": "1.0.0"},
        "steps": [
            {"id": "a", "name": "A", "step": {"type": "checkpoint", "name": "c"}, "next": ["ghost"]},
            {"id": "a", "name": "A again", "step": {"type": "checkpoint", "name": "d"}}
        ]
    }));

    assert_snapshot!(format_findings(&result), @r###"
Validation failed with 2 error(s) and 1 warning(s)
Errors:
  - steps[1].id: duplicate step id 'a' (first declared at steps[0]) (DUPLICATE_STEP_ID)
  - steps[0].next[0]: step 'a' routes to unknown step 'ghost' (INVALID_NEXT_STEP_REFERENCE)
Warnings:
  - metadata.owners: flow has no owners (OWNERS_MISSING)
"###);
}

#[test]
fn structural_report_names_the_missing_field() {
    let result = validate(&json!({
        "metadata": {"name": "X", "version": "1.0.0"},
        "steps": [{"id": "s1", "name": "S1", "step": {"type": "map"}}]
    }));

    assert_snapshot!(format_findings(&result), @r###"
Validation failed with 1 error(s) and 0 warning(s)
Errors:
  - steps[0].step.expression: missing field `expression` (SCHEMA_VALIDATION_ERROR)
"###);
}

#[test]
fn parse_failures_render_without_a_path() {
    let result = validate_str("steps: [", InputFormat::Yaml);
    let report = format_findings(&result);
    let lines: Vec<&str> = report.lines().collect();

    assert_eq!(lines[0], "Validation failed with 1 error(s) and 0 warning(s)");
    assert_eq!(lines[1], "Errors:");
    assert!(lines[2].starts_with("  - <document>: failed to parse YAML document"));
    assert!(lines[2].ends_with("(PARSE_ERROR)"));
}

#[test]
fn result_serializes_for_machine_consumers() {
    let result = validate(&json!({
        "metadata": {"name": "X", "version": "1.0.0"},
        "steps": [{"id": "s1", "name": "S1", "step": {"type": "checkpoint", "name": "c"}}],
        "observability": {"sampleRate": 1.5}
    }));

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(
        value,
        json!({
            "valid": false,
            "errors": [{
                "path": "observability.sampleRate",
                "message": "sample rate must be between 0 and 1, got 1.5",
                "code": "OBSERVABILITY_SAMPLE_RATE_INVALID",
                "severity": "error"
            }],
            "warnings": [{
                "path": "metadata.owners",
                "message": "flow has no owners",
                "code": "OWNERS_MISSING",
                "severity": "warning"
            }]
        })
    );

    let back: ValidationResult = serde_json::from_value(value).unwrap();
    assert_eq!(back, result);
}
