use flowdsl::core::flow::rules::graph::find_cycles;
use flowdsl::core::{
    codes, parse_value, FlowValidator, InputLimits, RuleLevel, RuleSettings, Severity,
    ValidatorConfig,
};
use serde_json::{json, Value};

fn step(id: &str, next: &[&str]) -> Value {
    json!({"id": id, "name": id.to_uppercase(), "step": {"type": "map", "expression": "$"}, "next": next})
}

fn flow(steps: Vec<Value>) -> Value {
    json!({
        "metadata": {
            "name": "graph",
            "version": "1.0.0",
            "owners": [{"name": "Ops", "email": "ops@example.com"}]
        },
        "steps": steps
    })
}

fn validator(rules: RuleSettings) -> FlowValidator {
    FlowValidator::with_config(&ValidatorConfig {
        rules,
        ..ValidatorConfig::default()
    })
}

#[test]
fn cycles_are_allowed_by_default() {
    let doc = flow(vec![step("a", &["b"]), step("b", &["a"])]);
    let result = FlowValidator::new().validate(&doc);
    assert!(result.valid);
    assert!(!result.has_code(codes::STEP_GRAPH_CYCLE));
}

#[test]
fn cycle_level_controls_severity() {
    let doc = flow(vec![step("a", &["b"]), step("b", &["c"]), step("c", &["a"])]);

    let warn = validator(RuleSettings {
        cycles: RuleLevel::Warn,
        ..RuleSettings::default()
    })
    .validate(&doc);
    assert!(warn.valid);
    assert_eq!(warn.warnings.len(), 1);
    assert_eq!(warn.warnings[0].code, codes::STEP_GRAPH_CYCLE);
    assert_eq!(warn.warnings[0].path.as_deref(), Some("steps[0]"));
    assert_eq!(warn.warnings[0].message, "steps a, b, c form a cycle");

    let deny = validator(RuleSettings {
        cycles: RuleLevel::Error,
        ..RuleSettings::default()
    })
    .validate(&doc);
    assert!(!deny.valid);
    assert_eq!(deny.errors[0].severity, Severity::Error);
}

#[test]
fn find_cycles_groups_strongly_connected_steps() {
    let doc = flow(vec![
        step("a", &["b"]),
        step("b", &["a", "c"]),
        step("c", &["d"]),
        step("d", &["c"]),
        step("e", &[]),
    ]);
    let flow = parse_value(&doc, &InputLimits::default()).unwrap();
    assert_eq!(find_cycles(&flow), vec![vec![0, 1], vec![2, 3]]);
}

#[test]
fn self_reference_is_an_error_by_default() {
    let doc = flow(vec![step("a", &["a"])]);

    let result = FlowValidator::new().validate(&doc);
    assert!(!result.valid);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].code, codes::STEP_SELF_REFERENCE);
    assert_eq!(result.errors[0].path.as_deref(), Some("steps[0].next[0]"));

    let relaxed = validator(RuleSettings {
        self_reference: RuleLevel::Allow,
        ..RuleSettings::default()
    })
    .validate(&doc);
    assert!(relaxed.valid);
}

#[test]
fn steps_without_next_fall_through_to_the_following_step() {
    let doc = flow(vec![step("a", &[]), step("b", &[]), step("c", &[])]);
    let result = FlowValidator::new().validate(&doc);
    assert!(result.valid);
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
}

#[test]
fn orphaned_steps_are_reported_as_unreachable() {
    let doc = flow(vec![step("a", &["b"]), step("b", &["a"]), step("orphan", &[])]);

    let result = FlowValidator::new().validate(&doc);
    assert!(result.valid);
    assert_eq!(result.warnings.len(), 1);
    let finding = &result.warnings[0];
    assert_eq!(finding.code, codes::UNREACHABLE_STEP);
    assert_eq!(finding.path.as_deref(), Some("steps[2]"));

    let silent = validator(RuleSettings {
        unreachable_steps: RuleLevel::Allow,
        ..RuleSettings::default()
    })
    .validate(&doc);
    assert!(silent.warnings.is_empty());
}

#[test]
fn error_handlers_and_branch_targets_are_reachable() {
    let mut entry = step("entry", &[]);
    entry["step"] = json!({
        "type": "branch",
        "conditions": [{"condition": "$.priority == 'high'", "target": "fast"}],
        "default": "slow"
    });
    let mut slow = step("slow", &["done"]);
    slow["error"] = json!("handler");

    let doc = flow(vec![
        entry,
        step("done", &["done-end"]),
        step("fast", &["done"]),
        slow,
        step("handler", &["done"]),
        step("done-end", &[]),
    ]);

    let result = FlowValidator::new().validate(&doc);
    assert!(result.valid, "{:?}", result);
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
}

#[test]
fn unknown_branch_target_is_an_error() {
    let mut entry = step("entry", &[]);
    entry["step"] = json!({
        "type": "branch",
        "conditions": [{"condition": "$.ok", "target": "ghost"}],
        "default": "end"
    });
    let doc = flow(vec![entry, step("end", &[])]);

    let result = FlowValidator::new().validate(&doc);
    assert!(!result.valid);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].code, codes::INVALID_BRANCH_TARGET_REFERENCE);
    assert_eq!(
        result.errors[0].path.as_deref(),
        Some("steps[0].step.conditions[0].target")
    );
}

#[test]
fn disabled_codes_are_dropped_from_results() {
    let doc = flow(vec![step("a", &["b"]), step("b", &["a"]), step("orphan", &[])]);
    let result = validator(RuleSettings {
        disabled: vec![codes::UNREACHABLE_STEP.to_string()],
        ..RuleSettings::default()
    })
    .validate(&doc);
    assert!(result.valid);
    assert!(result.warnings.is_empty());
}

#[test]
fn branch_targeting_itself_is_a_self_reference() {
    let mut entry = step("a", &[]);
    entry["step"] = json!({
        "type": "branch",
        "conditions": [{"condition": "$.again", "target": "a"}],
        "default": "b"
    });
    let doc = flow(vec![entry, step("b", &[])]);

    let result = FlowValidator::new().validate(&doc);
    assert!(!result.valid);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].code, codes::STEP_SELF_REFERENCE);
    assert_eq!(
        result.errors[0].path.as_deref(),
        Some("steps[0].step.conditions[0].target")
    );

    let mut looping_default = step("a", &[]);
    looping_default["step"] = json!({
        "type": "branch",
        "conditions": [{"condition": "$.done", "target": "b"}],
        "default": "a"
    });
    let doc = flow(vec![looping_default, step("b", &[])]);
    let result = FlowValidator::new().validate(&doc);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].path.as_deref(), Some("steps[0].step.default"));

    let relaxed = validator(RuleSettings {
        self_reference: RuleLevel::Allow,
        ..RuleSettings::default()
    })
    .validate(&doc);
    assert!(relaxed.valid);
}
