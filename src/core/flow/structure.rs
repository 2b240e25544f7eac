//! Structural validation of an untyped document tree.
//!
//! Every list element and nested container is coerced on its own so one
//! malformed element does not hide problems in its siblings. Only when all
//! pieces coerce cleanly is the whole tree turned into a [`Flow`].

use crate::core::error::DeserializationError;
use crate::core::flow::finding::Finding;
use crate::core::flow::model::{
    BranchCondition, Compliance, Flow, HttpAuth, Metadata, Observability, Owner, PayloadSampling,
    Policy, RateLimit, Rbac, Step, StepKind, Transport, Trigger,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Outcome of the structural phase.
#[derive(Debug, Clone)]
pub struct StructureReport {
    /// Typed flow, present only when no structural finding was raised.
    pub flow: Option<Flow>,
    pub findings: Vec<Finding>,
}

impl StructureReport {
    pub fn is_valid(&self) -> bool {
        self.flow.is_some() && self.findings.is_empty()
    }

    /// Typed flow, or the structural findings wrapped as a schema error.
    pub fn into_result(self) -> Result<Flow, DeserializationError> {
        match self.flow {
            Some(flow) if self.findings.is_empty() => Ok(flow),
            _ => Err(DeserializationError::Schema {
                findings: self.findings,
            }),
        }
    }
}

/// Check `tree` against the type model and collect every shape problem.
pub fn check_structure(tree: &Value) -> StructureReport {
    let Some(root) = tree.as_object() else {
        return StructureReport {
            flow: None,
            findings: vec![Finding::schema_root(format!(
                "flow document must be a mapping, found {}",
                describe(tree)
            ))],
        };
    };

    let mut coercer = Coercer::default();

    match root.get("metadata") {
        Some(metadata) => check_metadata(&mut coercer, metadata),
        None => coercer.push(Finding::schema("metadata", "missing field `metadata`")),
    }

    if let Some(triggers) = root.get("triggers") {
        if let Some(items) = coercer.list("triggers", triggers) {
            for (idx, trigger) in items.iter().enumerate() {
                check_trigger(&mut coercer, &format!("triggers[{}]", idx), trigger);
            }
        }
    }

    match root.get("steps") {
        Some(steps) => {
            if let Some(items) = coercer.list("steps", steps) {
                for (idx, step) in items.iter().enumerate() {
                    check_step(&mut coercer, &format!("steps[{}]", idx), step);
                }
            }
        }
        None => coercer.push(Finding::schema("steps", "missing field `steps`")),
    }

    if let Some(observability) = root.get("observability").filter(|v| !v.is_null()) {
        check_observability(&mut coercer, observability);
    }

    if !coercer.findings.is_empty() {
        return StructureReport {
            flow: None,
            findings: coercer.findings,
        };
    }

    let flow = coercer.coerce::<Flow>("", tree);
    if let Some(flow) = &flow {
        coercer.findings.extend(flow.shape_findings());
    }
    let flow = if coercer.findings.is_empty() { flow } else { None };
    StructureReport {
        flow,
        findings: coercer.findings,
    }
}

fn check_metadata(coercer: &mut Coercer, metadata: &Value) {
    let Some(fields) = coercer.object("metadata", metadata) else {
        return;
    };
    let before = coercer.findings.len();

    if let Some(owners) = fields.get("owners") {
        if let Some(items) = coercer.list("metadata.owners", owners) {
            for (idx, owner) in items.iter().enumerate() {
                coercer.coerce::<Owner>(&format!("metadata.owners[{}]", idx), owner);
            }
        }
    }
    if let Some(compliance) = fields.get("compliance").filter(|v| !v.is_null()) {
        coercer.coerce::<Compliance>("metadata.compliance", compliance);
    }
    if let Some(rbac) = fields.get("rbac").filter(|v| !v.is_null()) {
        coercer.coerce::<Rbac>("metadata.rbac", rbac);
    }

    if coercer.findings.len() == before {
        coercer.coerce::<Metadata>("metadata", metadata);
    }
}

fn check_trigger(coercer: &mut Coercer, path: &str, trigger: &Value) {
    let before = coercer.findings.len();
    if trigger.get("type").and_then(Value::as_str) == Some("http") {
        if let Some(auth) = trigger.get("auth").filter(|v| !v.is_null()) {
            coercer.coerce::<HttpAuth>(&format!("{}.auth", path), auth);
        }
        if let Some(limit) = trigger.get("rateLimit").filter(|v| !v.is_null()) {
            coercer.coerce::<RateLimit>(&format!("{}.rateLimit", path), limit);
        }
    }
    if coercer.findings.len() == before {
        coercer.coerce::<Trigger>(path, trigger);
    }
}

fn check_step(coercer: &mut Coercer, path: &str, step: &Value) {
    let Some(fields) = coercer.object(path, step) else {
        return;
    };
    let before = coercer.findings.len();

    if let Some(kind) = fields.get("step") {
        check_step_kind(coercer, &format!("{}.step", path), kind);
    }
    if let Some(transport) = fields.get("transport").filter(|v| !v.is_null()) {
        coercer.coerce::<Transport>(&format!("{}.transport", path), transport);
    }
    if let Some(policies) = fields.get("policies") {
        let list_path = format!("{}.policies", path);
        if let Some(items) = coercer.list(&list_path, policies) {
            for (idx, policy) in items.iter().enumerate() {
                coercer.coerce::<Policy>(&format!("{}[{}]", list_path, idx), policy);
            }
        }
    }

    if coercer.findings.len() == before {
        coercer.coerce::<Step>(path, step);
    }
}

fn check_step_kind(coercer: &mut Coercer, path: &str, kind: &Value) {
    let before = coercer.findings.len();
    let is_branch = kind.get("type").and_then(Value::as_str) == Some("branch");
    if is_branch {
        if let Some(conditions) = kind.get("conditions") {
            let list_path = format!("{}.conditions", path);
            if let Some(items) = coercer.list(&list_path, conditions) {
                for (idx, condition) in items.iter().enumerate() {
                    coercer
                        .coerce::<BranchCondition>(&format!("{}[{}]", list_path, idx), condition);
                }
            }
        }
    }
    if coercer.findings.len() == before {
        coercer.coerce::<StepKind>(path, kind);
    }
}

fn check_observability(coercer: &mut Coercer, observability: &Value) {
    let Some(fields) = coercer.object("observability", observability) else {
        return;
    };
    let before = coercer.findings.len();
    if let Some(sampling) = fields.get("payloadSampling").filter(|v| !v.is_null()) {
        coercer.coerce::<PayloadSampling>("observability.payloadSampling", sampling);
    }
    if coercer.findings.len() == before {
        coercer.coerce::<Observability>("observability", observability);
    }
}

#[derive(Default)]
struct Coercer {
    findings: Vec<Finding>,
}

impl Coercer {
    fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    fn coerce<T: DeserializeOwned>(&mut self, path: &str, value: &Value) -> Option<T> {
        match T::deserialize(value) {
            Ok(typed) => Some(typed),
            Err(err) => {
                let message = err.to_string();
                let path = refine_path(path, value, &message);
                self.push(if path.is_empty() {
                    Finding::schema_root(message)
                } else {
                    Finding::schema(path, message)
                });
                None
            }
        }
    }

    fn list<'v>(&mut self, path: &str, value: &'v Value) -> Option<&'v Vec<Value>> {
        let items = value.as_array();
        if items.is_none() {
            self.push(Finding::schema(
                path,
                format!("expected a list, found {}", describe(value)),
            ));
        }
        items
    }

    fn object<'v>(&mut self, path: &str, value: &'v Value) -> Option<&'v Map<String, Value>> {
        let fields = value.as_object();
        if fields.is_none() {
            self.push(Finding::schema(
                path,
                format!("expected a mapping, found {}", describe(value)),
            ));
        }
        fields
    }
}

/// Narrow a container path to the offending field named in a serde message.
fn refine_path(path: &str, value: &Value, message: &str) -> String {
    let fields = value.as_object();

    if let Some(field) = backticked(message, "missing field `") {
        if fields.is_some_and(|f| !f.contains_key(field)) {
            return join(path, field);
        }
    }

    if let (Some(variant), Some(fields)) = (backticked(message, "unknown variant `"), fields) {
        let holds_variant = |key: &str| fields.get(key).and_then(Value::as_str) == Some(variant);
        if holds_variant("type") {
            return join(path, "type");
        }
        if let Some(key) = fields.keys().find(|key| holds_variant(key)) {
            return join(path, key);
        }
    }

    // "invalid type: string \"x\", expected u32" does not name the field, so
    // match the rendered value against each field; only a unique match wins.
    if let (Some(shown), Some(fields)) = (offending_value(message), fields) {
        let mut matching = fields
            .iter()
            .filter(|(_, v)| unexpected(v).as_deref() == Some(shown));
        if let (Some((key, _)), None) = (matching.next(), matching.next()) {
            return join(path, key);
        }
    }

    path.to_string()
}

fn offending_value(message: &str) -> Option<&str> {
    let rest = ["invalid type: ", "invalid value: "]
        .iter()
        .find_map(|prefix| message.strip_prefix(prefix))?;
    rest.find(", expected").map(|end| &rest[..end])
}

/// Render `value` the way serde's `Unexpected` displays it in error messages.
fn unexpected(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some("null".to_string()),
        Value::Bool(b) => Some(format!("boolean `{}`", b)),
        Value::String(s) => Some(format!("string {:?}", s)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(format!("integer `{}`", i))
            } else if let Some(u) = n.as_u64() {
                Some(format!("integer `{}`", u))
            } else {
                let f = n.as_f64()?;
                let shown = f.to_string();
                if f.is_finite() && !shown.contains('.') {
                    Some(format!("floating point `{}.0`", shown))
                } else {
                    Some(format!("floating point `{}`", shown))
                }
            }
        }
        Value::Array(_) => Some("sequence".to_string()),
        Value::Object(_) => Some("map".to_string()),
    }
}

fn backticked<'m>(message: &'m str, prefix: &str) -> Option<&'m str> {
    let rest = &message[message.find(prefix)? + prefix.len()..];
    rest.find('`').map(|end| &rest[..end])
}

fn join(path: &str, field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", path, field)
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
