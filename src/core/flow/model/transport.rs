use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

fn default_sftp_port() -> u16 {
    22
}

/// Wire-level mechanism a step uses to reach an external system.
///
/// The vocabulary is independent from [`super::Trigger`]: a `kafka`
/// transport produces to a topic while a `kafka` trigger consumes from one.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Transport {
    Rest(RestTransport),
    Soap(SoapTransport),
    #[serde(rename = "graphql")]
    GraphQl(GraphQlTransport),
    Jdbc(JdbcTransport),
    Kafka(KafkaTransport),
    Mqtt(MqttTransport),
    Sftp(SftpTransport),
    Fs(FsTransport),
    Custom(CustomTransport),
}

impl Transport {
    /// Wire tag of this transport variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Transport::Rest(_) => "rest",
            Transport::Soap(_) => "soap",
            Transport::GraphQl(_) => "graphql",
            Transport::Jdbc(_) => "jdbc",
            Transport::Kafka(_) => "kafka",
            Transport::Mqtt(_) => "mqtt",
            Transport::Sftp(_) => "sftp",
            Transport::Fs(_) => "fs",
            Transport::Custom(_) => "custom",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RestMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestTransport {
    pub url: String,
    #[serde(default)]
    pub method: RestMethod,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, String>,
    /// Milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoapTransport {
    pub url: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wsdl: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlTransport {
    pub url: String,
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JdbcTransport {
    pub url: String,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KafkaTransport {
    pub topic: String,
    pub bootstrap_servers: Vec<String>,
    /// Expression producing the record key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MqttTransport {
    pub broker: String,
    pub topic: String,
    #[serde(default)]
    pub qos: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SftpTransport {
    pub host: String,
    #[serde(default = "default_sftp_port")]
    pub port: u16,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FsMode {
    #[default]
    Read,
    Write,
    Append,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FsTransport {
    pub path: String,
    #[serde(default)]
    pub mode: FsMode,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomTransport {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
}
