use crate::cli::args::OutputFormat;
use crate::cli::Command;
use std::env;

/// Execution contexts that influence how logging is routed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionContext {
    /// A developer running the CLI in a terminal.
    Interactive,
    /// Continuous integration, detected through the conventional `CI` variable.
    Ci,
    /// Output on stdout is consumed by another program (JSON or YAML).
    MachineOutput,
}

/// Derive the active execution context from a parsed CLI command plus environment.
pub fn detect_context(command: &Command) -> ExecutionContext {
    let machine = match command {
        Command::Validate(args) => args.output == OutputFormat::Json,
        Command::Normalize(_) => true,
        Command::Codes(args) => args.output == OutputFormat::Json,
    };
    if machine {
        return ExecutionContext::MachineOutput;
    }

    if ci_enabled() {
        return ExecutionContext::Ci;
    }
    ExecutionContext::Interactive
}

fn ci_enabled() -> bool {
    env::var("CI")
        .map(|value| matches!(value.trim(), "1" | "true" | "TRUE" | "True"))
        .unwrap_or(false)
}
