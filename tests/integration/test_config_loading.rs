use flowdsl::core::config::loader::CONFIG_FILE_NAME;
use flowdsl::core::{
    codes, ConfigLoader, ErrorCategory, FlowValidator, RuleLevel, ValidatorConfig,
};
use serde_json::json;
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;

const FLOWDSL_VARS: &[&str] = &[
    "FLOWDSL_RULES_CYCLES",
    "FLOWDSL_RULES_SELF_REFERENCE",
    "FLOWDSL_RULES_UNREACHABLE_STEPS",
    "FLOWDSL_RULES_DISABLED",
    "FLOWDSL_LIMITS_MAX_INPUT_BYTES",
    "FLOWDSL_LIMITS_MAX_NESTING_DEPTH",
    "FLOWDSL_LIMITS_MAX_STEPS",
    "FLOWDSL_LIMITS_MAX_TRIGGERS",
    "FLOWDSL_LIMITS_MAX_POLICIES_PER_STEP",
];

fn clear_env() {
    for var in FLOWDSL_VARS {
        env::remove_var(var);
    }
}

fn cyclic_flow() -> serde_json::Value {
    json!({
        "metadata": {"name": "loop", "version": "1.0.0"},
        "steps": [
            {"id": "a", "name": "A", "step": {"type": "map", "expression": "$"}, "next": ["b"]},
            {"id": "b", "name": "B", "step": {"type": "map", "expression": "$"}, "next": ["a"]}
        ]
    })
}

#[test]
#[serial]
fn missing_workspace_file_yields_defaults() {
    clear_env();
    let workspace = TempDir::new().unwrap();

    let config = ConfigLoader::load_from_workspace(workspace.path()).unwrap();
    assert_eq!(config, ValidatorConfig::default());
}

#[test]
#[serial]
fn workspace_config_drives_the_validator() {
    clear_env();
    let workspace = TempDir::new().unwrap();
    fs::write(
        workspace.path().join(CONFIG_FILE_NAME),
        r#"
[rules]
cycles = "error"
disabled = ["OWNERS_MISSING"]
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_workspace(workspace.path()).unwrap();
    assert_eq!(config.rules.cycles, RuleLevel::Error);

    let result = FlowValidator::with_config(&config).validate(&cyclic_flow());
    assert!(!result.valid);
    assert!(result.has_code(codes::STEP_GRAPH_CYCLE));
    assert!(!result.has_code(codes::OWNERS_MISSING));
}

#[test]
#[serial]
fn explicit_path_is_loaded_with_env_overrides() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ci.toml");
    fs::write(
        &path,
        r#"
[rules]
cycles = "error"

[limits]
max_steps = 50
"#,
    )
    .unwrap();

    env::set_var("FLOWDSL_RULES_CYCLES", "warn");
    env::set_var("FLOWDSL_LIMITS_MAX_TRIGGERS", "7");

    let config = ConfigLoader::load_with_overrides(&path).unwrap();
    assert_eq!(config.rules.cycles, RuleLevel::Warn);
    assert_eq!(config.limits.max_steps, 50);
    assert_eq!(config.limits.max_triggers, 7);

    let result = FlowValidator::with_config(&config).validate(&cyclic_flow());
    assert!(result.valid);
    assert!(result.has_code(codes::STEP_GRAPH_CYCLE));

    clear_env();
}

#[test]
#[serial]
fn invalid_env_values_keep_file_values() {
    clear_env();
    let workspace = TempDir::new().unwrap();
    fs::write(
        workspace.path().join(CONFIG_FILE_NAME),
        "[rules]\nself_reference = \"warn\"\n",
    )
    .unwrap();

    env::set_var("FLOWDSL_RULES_SELF_REFERENCE", "maybe");
    env::set_var("FLOWDSL_LIMITS_MAX_POLICIES_PER_STEP", "-3");

    let config = ConfigLoader::load_from_workspace(workspace.path()).unwrap();
    assert_eq!(config.rules.self_reference, RuleLevel::Warn);
    assert_eq!(config.limits.max_policies_per_step, 32);

    clear_env();
}

#[test]
#[serial]
fn malformed_file_is_a_configuration_error() {
    clear_env();
    let workspace = TempDir::new().unwrap();
    fs::write(workspace.path().join(CONFIG_FILE_NAME), "[rules\ncycles = ").unwrap();

    let err = ConfigLoader::load_from_workspace(workspace.path()).unwrap_err();
    assert_eq!(err.category, ErrorCategory::ConfigurationError);
    assert!(err.message.contains(CONFIG_FILE_NAME));
}

#[test]
#[serial]
fn rejected_values_in_file_fail_validation() {
    clear_env();
    let workspace = TempDir::new().unwrap();
    fs::write(
        workspace.path().join(CONFIG_FILE_NAME),
        "[rules]\ndisabled = [\"INPUT_LIMIT_EXCEEDED\"]\n",
    )
    .unwrap();

    let err = ConfigLoader::load_from_workspace(workspace.path()).unwrap_err();
    assert_eq!(err.category, ErrorCategory::ConfigurationError);
    assert_eq!(
        err.message,
        "rules.disabled cannot suppress INPUT_LIMIT_EXCEEDED"
    );
}

#[test]
fn every_override_is_documented() {
    let docs = ConfigLoader::env_var_documentation();
    for var in FLOWDSL_VARS {
        assert!(
            docs.iter().any(|doc| doc.starts_with(var)),
            "{var} is not documented"
        );
    }
}
