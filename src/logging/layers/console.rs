use crate::logging::context::ExecutionContext;
use serde::Deserialize;
use std::fmt;
use std::io;
use std::str::FromStr;
use tracing::Subscriber;
use tracing_subscriber::fmt::{self as tracing_fmt, format, writer::BoxMakeWriter, MakeWriter};
use tracing_subscriber::registry::LookupSpan;

/// Console layer writing compact lines to `W`.
pub type ConsoleFmtLayer<S, W = BoxMakeWriter> =
    tracing_fmt::Layer<S, format::DefaultFields, format::Format<format::Compact>, W>;

/// Stream receiving console diagnostics.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleOutput {
    Stdout,
    #[default]
    Stderr,
    None,
}

impl ConsoleOutput {
    pub fn make_writer(self) -> BoxMakeWriter {
        match self {
            ConsoleOutput::Stdout => BoxMakeWriter::new(io::stdout),
            ConsoleOutput::Stderr => BoxMakeWriter::new(io::stderr),
            ConsoleOutput::None => BoxMakeWriter::new(io::sink),
        }
    }
}

impl fmt::Display for ConsoleOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConsoleOutput::Stdout => "stdout",
            ConsoleOutput::Stderr => "stderr",
            ConsoleOutput::None => "none",
        };
        f.write_str(name)
    }
}

impl FromStr for ConsoleOutput {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "stdout" => Ok(ConsoleOutput::Stdout),
            "stderr" => Ok(ConsoleOutput::Stderr),
            "none" => Ok(ConsoleOutput::None),
            _ => Err(format!(
                "invalid console output '{}'; expected stdout, stderr or none",
                value
            )),
        }
    }
}

/// Reports and normalized documents own stdout when the output is JSON or
/// YAML, so diagnostics are moved to stderr in that case.
pub fn select_console_output(
    context: ExecutionContext,
    configured: Option<ConsoleOutput>,
) -> ConsoleOutput {
    match (context, configured) {
        (ExecutionContext::MachineOutput, Some(ConsoleOutput::Stdout)) => ConsoleOutput::Stderr,
        (_, configured) => configured.unwrap_or_default(),
    }
}

pub fn console_layer<S, W>(writer: W) -> ConsoleFmtLayer<S, W>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + 'static,
{
    tracing_fmt::layer()
        .compact()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
}
