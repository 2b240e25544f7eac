use super::{is_blank, FlowRule};
use crate::core::config::RuleSettings;
use crate::core::flow::finding::{codes, Finding};
use crate::core::flow::model::{Flow, Metadata};
use regex::Regex;
use std::sync::OnceLock;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex")
    })
}

/// Ownership, versioning and compliance requirements on `metadata`.
pub struct MetadataRule;

impl FlowRule for MetadataRule {
    fn name(&self) -> &'static str {
        "metadata"
    }

    fn check(&self, flow: &Flow, _settings: &RuleSettings) -> Vec<Finding> {
        check_metadata(&flow.metadata)
    }
}

pub fn check_metadata(metadata: &Metadata) -> Vec<Finding> {
    let mut out = Vec::new();

    if is_blank(&metadata.name) {
        out.push(Finding::error(
            "metadata.name",
            codes::METADATA_NAME_MISSING,
            "flow name must not be empty",
        ));
    }

    if let Err(err) = semver::Version::parse(metadata.version.trim()) {
        out.push(Finding::error(
            "metadata.version",
            codes::METADATA_VERSION_INVALID,
            format!(
                "version '{}' is not a semantic version: {}",
                metadata.version, err
            ),
        ));
    }

    if metadata.owners.is_empty() {
        out.push(Finding::warning(
            "metadata.owners",
            codes::OWNERS_MISSING,
            "flow has no owners",
        ));
    }
    for (idx, owner) in metadata.owners.iter().enumerate() {
        if !email_re().is_match(owner.email.trim()) {
            out.push(Finding::warning(
                format!("metadata.owners[{}].email", idx),
                codes::OWNER_EMAIL_INVALID,
                format!("owner '{}' has an invalid email '{}'", owner.name, owner.email),
            ));
        }
    }

    if let Some(compliance) = &metadata.compliance {
        if compliance.requires_retention() && compliance.data_retention.is_none() {
            out.push(Finding::warning(
                "metadata.compliance.dataRetention",
                codes::COMPLIANCE_DATA_RETENTION_MISSING,
                "GDPR or HIPAA flows should declare a data retention period",
            ));
        }
    }

    if metadata.is_hipaa() && metadata.roles().is_empty() {
        out.push(Finding::error(
            "metadata.rbac.roles",
            codes::HIPAA_RBAC_REQUIRED,
            "HIPAA flows must declare at least one RBAC role",
        ));
    }

    out
}
