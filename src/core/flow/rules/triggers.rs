use super::{is_blank, FlowRule};
use crate::core::config::RuleSettings;
use crate::core::flow::finding::{codes, Finding};
use crate::core::flow::model::{AuthKind, Flow, Trigger};

/// Per-variant checks for every entry in `triggers`.
pub struct TriggerRule;

impl FlowRule for TriggerRule {
    fn name(&self) -> &'static str {
        "triggers"
    }

    fn check(&self, flow: &Flow, _settings: &RuleSettings) -> Vec<Finding> {
        flow.triggers
            .iter()
            .enumerate()
            .flat_map(|(idx, trigger)| check_trigger(&format!("triggers[{}]", idx), trigger))
            .collect()
    }
}

pub fn check_trigger(path: &str, trigger: &Trigger) -> Vec<Finding> {
    let mut out = Vec::new();
    let at = |field: &str| format!("{}.{}", path, field);

    match trigger {
        Trigger::Http(http) => {
            if let Some(auth) = &http.auth {
                let has_key = auth.key.as_deref().is_some_and(|key| !is_blank(key));
                if auth.kind == AuthKind::ApiKey && !has_key {
                    out.push(Finding::error(
                        at("auth.key"),
                        codes::HTTP_API_KEY_MISSING,
                        "apiKey authentication requires a non-empty key",
                    ));
                }
            }
            if let Some(limit) = &http.rate_limit {
                if limit.requests == 0 {
                    out.push(Finding::error(
                        at("rateLimit.requests"),
                        codes::HTTP_RATE_LIMIT_INVALID,
                        "rate limit must allow at least one request",
                    ));
                }
            }
        }
        Trigger::Schedule(schedule) => {
            let fields = schedule.cron.split_whitespace().count();
            if !(5..=6).contains(&fields) {
                out.push(Finding::error(
                    at("cron"),
                    codes::SCHEDULE_CRON_INVALID,
                    format!(
                        "cron expression '{}' has {} fields, expected 5 or 6",
                        schedule.cron, fields
                    ),
                ));
            }
            if let (Some(start), Some(end)) = (schedule.start_date, schedule.end_date) {
                if start >= end {
                    out.push(Finding::error(
                        at("endDate"),
                        codes::SCHEDULE_DATE_RANGE_INVALID,
                        format!(
                            "start date {} must be before end date {}",
                            start.to_rfc3339(),
                            end.to_rfc3339()
                        ),
                    ));
                }
            }
        }
        Trigger::Kafka(kafka) => {
            if kafka.bootstrap_servers.iter().all(|server| is_blank(server)) {
                out.push(Finding::error(
                    at("bootstrapServers"),
                    codes::KAFKA_BOOTSTRAP_SERVERS_MISSING,
                    "kafka trigger needs at least one bootstrap server",
                ));
            }
        }
        Trigger::Mqtt(mqtt) => {
            if mqtt.qos > 2 {
                out.push(qos_invalid(at("qos"), mqtt.qos));
            }
        }
        Trigger::Sftp(sftp) => {
            let has_password = sftp.password.as_deref().is_some_and(|p| !is_blank(p));
            let has_key = sftp.private_key.as_deref().is_some_and(|k| !is_blank(k));
            if !has_password && !has_key {
                out.push(Finding::error(
                    path,
                    codes::SFTP_AUTH_MISSING,
                    "sftp trigger needs a password or a private key",
                ));
            }
        }
        Trigger::Jdbc(jdbc) => {
            if !jdbc.url.trim_start().starts_with("jdbc:") {
                out.push(Finding::error(
                    at("url"),
                    codes::JDBC_URL_INVALID,
                    format!("'{}' is not a jdbc: URL", jdbc.url),
                ));
            }
        }
        Trigger::FileWatch(watch) => {
            if watch.events.is_empty() {
                out.push(Finding::error(
                    at("events"),
                    codes::FILE_WATCH_EVENTS_MISSING,
                    "file watch trigger needs at least one event",
                ));
            }
        }
    }

    out
}

pub(crate) fn qos_invalid(path: String, qos: u32) -> Finding {
    Finding::error(
        path,
        codes::MQTT_QOS_INVALID,
        format!("MQTT QoS must be 0, 1 or 2, got {}", qos),
    )
}
