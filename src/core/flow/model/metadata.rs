use serde::{Deserialize, Serialize};

/// Ownership, versioning and governance information for a flow.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub name: String,
    /// Semantic version of the flow definition, e.g. `1.4.0`.
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub owners: Vec<Owner>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance: Option<Compliance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rbac: Option<Rbac>,
}

impl Metadata {
    /// True when HIPAA handling is declared.
    pub fn is_hipaa(&self) -> bool {
        self.compliance.as_ref().is_some_and(|c| c.hipaa)
    }

    /// Roles declared under `rbac`, empty when the block is absent.
    pub fn roles(&self) -> &[String] {
        self.rbac.as_ref().map(|r| r.roles.as_slice()).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Regulatory regimes that apply to the data moving through the flow.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Compliance {
    #[serde(default)]
    pub gdpr: bool,
    #[serde(default)]
    pub hipaa: bool,
    #[serde(default)]
    pub soc2: bool,
    #[serde(default)]
    pub pci: bool,
    /// Retention period in days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_retention: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<DataClassification>,
}

impl Compliance {
    /// Regimes that demand an explicit retention period.
    pub fn requires_retention(&self) -> bool {
        self.gdpr || self.hipaa
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataClassification {
    Public,
    Internal,
    Confidential,
    Restricted,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rbac {
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub tenants: Vec<String>,
}
