use super::steps::zero;
use super::triggers::qos_invalid;
use super::{is_blank, FlowRule};
use crate::core::config::RuleSettings;
use crate::core::flow::finding::{codes, Finding};
use crate::core::flow::model::{Flow, Transport};

/// Per-variant checks for step transports.
pub struct TransportRule;

impl FlowRule for TransportRule {
    fn name(&self) -> &'static str {
        "transports"
    }

    fn check(&self, flow: &Flow, _settings: &RuleSettings) -> Vec<Finding> {
        let mut out = Vec::new();
        for (idx, step) in flow.steps.iter().enumerate() {
            if let Some(transport) = &step.transport {
                out.extend(check_transport(
                    &format!("steps[{}].transport", idx),
                    transport,
                ));
            }
        }
        out
    }
}

pub fn check_transport(path: &str, transport: &Transport) -> Vec<Finding> {
    let mut out = Vec::new();
    let kind = transport.kind();
    let mut require = |value: &str, field: &str, code: &str| {
        if is_blank(value) {
            out.push(Finding::error(
                format!("{}.{}", path, field),
                code,
                format!("{} transport requires {}", kind, field),
            ));
        }
    };

    match transport {
        Transport::Rest(rest) => {
            require(&rest.url, "url", codes::REST_URL_MISSING);
            if rest.timeout == Some(0) {
                out.push(zero(path, "timeout", codes::REST_TIMEOUT_INVALID));
            }
        }
        Transport::Soap(soap) => {
            require(&soap.url, "url", codes::SOAP_URL_MISSING);
            require(&soap.action, "action", codes::SOAP_ACTION_MISSING);
        }
        Transport::GraphQl(graphql) => {
            require(&graphql.url, "url", codes::GRAPHQL_URL_MISSING);
            require(&graphql.query, "query", codes::GRAPHQL_QUERY_MISSING);
        }
        Transport::Jdbc(jdbc) => {
            if !jdbc.url.trim_start().starts_with("jdbc:") {
                out.push(Finding::error(
                    format!("{}.url", path),
                    codes::JDBC_TRANSPORT_URL_INVALID,
                    format!("'{}' is not a jdbc: URL", jdbc.url),
                ));
            }
            if is_blank(&jdbc.query) {
                out.push(Finding::error(
                    format!("{}.query", path),
                    codes::JDBC_QUERY_MISSING,
                    "jdbc transport requires query",
                ));
            }
        }
        Transport::Kafka(kafka) => {
            require(&kafka.topic, "topic", codes::KAFKA_TOPIC_MISSING);
            if kafka.bootstrap_servers.iter().all(|server| is_blank(server)) {
                out.push(Finding::error(
                    format!("{}.bootstrapServers", path),
                    codes::KAFKA_TRANSPORT_BOOTSTRAP_SERVERS_MISSING,
                    "kafka transport needs at least one bootstrap server",
                ));
            }
        }
        Transport::Mqtt(mqtt) => {
            require(&mqtt.topic, "topic", codes::MQTT_TOPIC_MISSING);
            require(&mqtt.broker, "broker", codes::MQTT_BROKER_MISSING);
            if mqtt.qos > 2 {
                out.push(qos_invalid(format!("{}.qos", path), mqtt.qos));
            }
        }
        Transport::Sftp(sftp) => {
            require(&sftp.host, "host", codes::SFTP_HOST_MISSING);
            require(&sftp.path, "path", codes::SFTP_PATH_MISSING);
        }
        Transport::Fs(fs) => require(&fs.path, "path", codes::FS_PATH_MISSING),
        Transport::Custom(custom) => {
            require(&custom.name, "name", codes::CUSTOM_TRANSPORT_NAME_MISSING)
        }
    }

    out
}
