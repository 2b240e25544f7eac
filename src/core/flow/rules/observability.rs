use super::FlowRule;
use crate::core::config::RuleSettings;
use crate::core::flow::finding::{codes, Finding};
use crate::core::flow::model::{Flow, Observability};

pub struct ObservabilityRule;

impl FlowRule for ObservabilityRule {
    fn name(&self) -> &'static str {
        "observability"
    }

    fn check(&self, flow: &Flow, _settings: &RuleSettings) -> Vec<Finding> {
        flow.observability
            .as_ref()
            .map(check_observability)
            .unwrap_or_default()
    }
}

fn is_unit_rate(rate: f64) -> bool {
    (0.0..=1.0).contains(&rate)
}

pub fn check_observability(observability: &Observability) -> Vec<Finding> {
    let mut out = Vec::new();

    if !is_unit_rate(observability.sample_rate) {
        out.push(Finding::error(
            "observability.sampleRate",
            codes::OBSERVABILITY_SAMPLE_RATE_INVALID,
            format!(
                "sample rate must be between 0 and 1, got {}",
                observability.sample_rate
            ),
        ));
    }

    if let Some(sampling) = &observability.payload_sampling {
        if !is_unit_rate(sampling.rate) {
            out.push(Finding::error(
                "observability.payloadSampling.rate",
                codes::OBSERVABILITY_PAYLOAD_SAMPLE_RATE_INVALID,
                format!(
                    "payload sample rate must be between 0 and 1, got {}",
                    sampling.rate
                ),
            ));
        }
        if sampling.max_size == Some(0) {
            out.push(Finding::error(
                "observability.payloadSampling.maxSize",
                codes::OBSERVABILITY_PAYLOAD_MAX_SIZE_INVALID,
                "payload max size must be greater than 0",
            ));
        }
    }

    out
}
