//! Flow-wide checks over the step graph.
//!
//! Nodes are steps in declaration order. Edges come from `next`, branch
//! targets and (for reachability only) `error` routes plus the implicit
//! fallthrough from a step without `next` to the following list entry.

use super::{is_blank, FlowRule};
use crate::core::config::RuleSettings;
use crate::core::flow::finding::{codes, Finding, Severity};
use crate::core::flow::model::{Flow, Step, StepKind};
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet, VecDeque};

/// First declaration index of every non-blank step identifier.
fn first_index(steps: &[Step]) -> HashMap<&str, usize> {
    let mut index = HashMap::new();
    for (idx, step) in steps.iter().enumerate() {
        if !is_blank(&step.id) {
            index.entry(step.id.as_str()).or_insert(idx);
        }
    }
    index
}

fn is_shadowed(index: &HashMap<&str, usize>, idx: usize, step: &Step) -> bool {
    index.get(step.id.as_str()).is_some_and(|&first| first != idx)
}

pub struct DuplicateStepIdsRule;

impl FlowRule for DuplicateStepIdsRule {
    fn name(&self) -> &'static str {
        "duplicate-step-ids"
    }

    fn check(&self, flow: &Flow, _settings: &RuleSettings) -> Vec<Finding> {
        let index = first_index(&flow.steps);
        let mut out = Vec::new();
        for (idx, step) in flow.steps.iter().enumerate() {
            let path = format!("steps[{}].id", idx);
            if is_blank(&step.id) {
                out.push(Finding::error(
                    path,
                    codes::STEP_ID_MISSING,
                    format!("step '{}' has an empty id", step.name),
                ));
            } else if let Some(&first) = index.get(step.id.as_str()).filter(|&&f| f != idx) {
                out.push(Finding::error(
                    path,
                    codes::DUPLICATE_STEP_ID,
                    format!(
                        "duplicate step id '{}' (first declared at steps[{}])",
                        step.id, first
                    ),
                ));
            }
        }
        out
    }
}

/// `next`, `error` and branch targets must name existing steps.
pub struct StepReferencesRule;

impl FlowRule for StepReferencesRule {
    fn name(&self) -> &'static str {
        "step-references"
    }

    fn check(&self, flow: &Flow, _settings: &RuleSettings) -> Vec<Finding> {
        let index = first_index(&flow.steps);
        let known = |id: &str| index.contains_key(id);
        let mut out = Vec::new();

        for (idx, step) in flow.steps.iter().enumerate() {
            for (pos, target) in step.next.iter().enumerate() {
                if !known(target.as_str()) {
                    out.push(Finding::error(
                        format!("steps[{}].next[{}]", idx, pos),
                        codes::INVALID_NEXT_STEP_REFERENCE,
                        format!("step '{}' routes to unknown step '{}'", step.id, target),
                    ));
                }
            }

            if let Some(target) = &step.error {
                if !known(target.as_str()) {
                    out.push(Finding::error(
                        format!("steps[{}].error", idx),
                        codes::INVALID_ERROR_STEP_REFERENCE,
                        format!(
                            "step '{}' sends failures to unknown step '{}'",
                            step.id, target
                        ),
                    ));
                }
            }

            if let StepKind::Branch(branch) = &step.step {
                let routes = branch
                    .conditions
                    .iter()
                    .enumerate()
                    .map(|(pos, c)| (format!("conditions[{}].target", pos), c.target.as_str()))
                    .chain(branch.default.as_deref().map(|d| ("default".to_string(), d)));
                for (field, target) in routes {
                    // Blank targets are reported by the step rules.
                    if is_blank(target) || known(target) {
                        continue;
                    }
                    out.push(Finding::error(
                        format!("steps[{}].step.{}", idx, field),
                        codes::INVALID_BRANCH_TARGET_REFERENCE,
                        format!("branch '{}' targets unknown step '{}'", step.id, target),
                    ));
                }
            }
        }
        out
    }
}

/// A step whose `next`, `error` or branch targets name itself.
pub struct SelfReferenceRule;

impl FlowRule for SelfReferenceRule {
    fn name(&self) -> &'static str {
        "self-reference"
    }

    fn check(&self, flow: &Flow, settings: &RuleSettings) -> Vec<Finding> {
        let Some(severity) = settings.self_reference.severity() else {
            return Vec::new();
        };
        let mut out = Vec::new();
        for (idx, step) in flow.steps.iter().enumerate() {
            if is_blank(&step.id) {
                continue;
            }
            for (pos, target) in step.next.iter().enumerate() {
                if *target == step.id {
                    out.push(Finding::new(
                        format!("steps[{}].next[{}]", idx, pos),
                        codes::STEP_SELF_REFERENCE,
                        severity,
                        format!("step '{}' lists itself as a successor", step.id),
                    ));
                }
            }
            if step.error.as_deref() == Some(step.id.as_str()) {
                out.push(Finding::new(
                    format!("steps[{}].error", idx),
                    codes::STEP_SELF_REFERENCE,
                    severity,
                    format!("step '{}' handles its own failures", step.id),
                ));
            }
            if let StepKind::Branch(branch) = &step.step {
                let routes = branch
                    .conditions
                    .iter()
                    .enumerate()
                    .map(|(pos, c)| (format!("conditions[{}].target", pos), c.target.as_str()))
                    .chain(branch.default.as_deref().map(|d| ("default".to_string(), d)));
                for (field, target) in routes {
                    if target == step.id {
                        out.push(Finding::new(
                            format!("steps[{}].step.{}", idx, field),
                            codes::STEP_SELF_REFERENCE,
                            severity,
                            format!("branch '{}' targets itself", step.id),
                        ));
                    }
                }
            }
        }
        out
    }
}

/// Cycles of two or more steps through `next` and branch edges.
///
/// Single-step loops are left to [`SelfReferenceRule`].
pub struct CycleRule;

impl FlowRule for CycleRule {
    fn name(&self) -> &'static str {
        "cycles"
    }

    fn check(&self, flow: &Flow, settings: &RuleSettings) -> Vec<Finding> {
        let Some(severity) = settings.cycles.severity() else {
            return Vec::new();
        };
        find_cycles(flow)
            .into_iter()
            .map(|component| cycle_finding(flow, &component, severity))
            .collect()
    }
}

/// Step indices of every multi-step cycle, each sorted, ordered by first member.
pub fn find_cycles(flow: &Flow) -> Vec<Vec<usize>> {
    let index = first_index(&flow.steps);
    let mut graph = DiGraph::<usize, ()>::new();
    let nodes: Vec<NodeIndex> = (0..flow.steps.len()).map(|i| graph.add_node(i)).collect();

    for (idx, step) in flow.steps.iter().enumerate() {
        if is_shadowed(&index, idx, step) {
            continue;
        }
        for target in step.successor_refs() {
            if let Some(&to) = index.get(target) {
                graph.add_edge(nodes[idx], nodes[to], ());
            }
        }
    }

    let mut cycles: Vec<Vec<usize>> = tarjan_scc(&graph)
        .into_iter()
        .filter(|component| component.len() > 1)
        .map(|component| {
            let mut members: Vec<usize> = component.into_iter().map(|n| graph[n]).collect();
            members.sort_unstable();
            members
        })
        .collect();
    cycles.sort();
    cycles
}

fn cycle_finding(flow: &Flow, component: &[usize], severity: Severity) -> Finding {
    let ids: Vec<&str> = component
        .iter()
        .map(|&idx| flow.steps[idx].id.as_str())
        .collect();
    Finding::new(
        format!("steps[{}]", component[0]),
        codes::STEP_GRAPH_CYCLE,
        severity,
        format!("steps {} form a cycle", ids.join(", ")),
    )
}

/// Steps that cannot be reached from the first step.
pub struct UnreachableStepsRule;

impl FlowRule for UnreachableStepsRule {
    fn name(&self) -> &'static str {
        "unreachable-steps"
    }

    fn check(&self, flow: &Flow, settings: &RuleSettings) -> Vec<Finding> {
        let Some(severity) = settings.unreachable_steps.severity() else {
            return Vec::new();
        };
        let Some(entry) = flow.steps.first() else {
            return Vec::new();
        };

        let index = first_index(&flow.steps);
        let reachable = reachable_from_first(flow, &index);
        let mut out = Vec::new();
        for (idx, step) in flow.steps.iter().enumerate() {
            // Shadowed duplicates are already reported as DUPLICATE_STEP_ID.
            if reachable.contains(&idx) || is_shadowed(&index, idx, step) {
                continue;
            }
            out.push(Finding::new(
                format!("steps[{}]", idx),
                codes::UNREACHABLE_STEP,
                severity,
                format!(
                    "step '{}' is unreachable from the first step '{}'",
                    step.id, entry.id
                ),
            ));
        }
        out
    }
}

fn reachable_from_first(flow: &Flow, index: &HashMap<&str, usize>) -> HashSet<usize> {
    let mut reachable = HashSet::new();
    let mut queue = VecDeque::new();
    queue.push_back(0usize);

    while let Some(current) = queue.pop_front() {
        if !reachable.insert(current) {
            continue;
        }
        let step = &flow.steps[current];
        let targets = step.successor_refs().chain(step.error.as_deref());
        for target in targets {
            if let Some(&to) = index.get(target) {
                queue.push_back(to);
            }
        }
        if step.next.is_empty() && current + 1 < flow.steps.len() {
            queue.push_back(current + 1);
        }
    }

    reachable
}
