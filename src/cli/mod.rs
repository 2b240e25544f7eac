pub mod args;
pub mod commands;

pub use args::{CodesArgs, NormalizeArgs, ValidateArgs};
use clap::{Parser, Subcommand};

const HELP_TEMPLATE: &str = "\
{name} {version}\n\
{about-with-newline}\n\
USAGE:\n    {usage}\n\
\nOPTIONS:\n{options}\n\
COMMANDS:\n{subcommands}\n";

#[derive(Parser)]
#[command(name = "flowdsl")]
#[command(version = crate::VERSION)]
#[command(about = "Type model and validator for Flow DSL documents")]
#[command(help_template = HELP_TEMPLATE)]
#[command(
    after_long_help = "Typical flow: validate documents in CI, normalize to inspect applied defaults, list codes to configure suppression."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(
        about = "Validate one or more flow documents",
        long_about = "Validate parses each document, checks it against the type model, then runs the semantic rules. The exit status is non-zero when any document is invalid.",
        after_help = "Example:\n    flowdsl validate flows/orders.yaml --output json"
    )]
    Validate(ValidateArgs),
    #[command(
        about = "Print a flow with defaults applied",
        long_about = "Normalize validates the document and, when it is valid, prints the typed flow in canonical form.",
        after_help = "Example:\n    flowdsl normalize flows/orders.yaml --output yaml"
    )]
    Normalize(NormalizeArgs),
    #[command(
        about = "List every finding code",
        long_about = "Codes prints each finding code with the severity it carries under the default configuration.",
        after_help = "Example:\n    flowdsl codes --output json"
    )]
    Codes(CodesArgs),
}

/// Dispatch a parsed command. Returns `false` when a document failed validation.
pub fn run(args: Args) -> crate::Result<bool> {
    match args.command {
        Command::Validate(validate_args) => commands::validate(validate_args),
        Command::Normalize(normalize_args) => commands::normalize(normalize_args),
        Command::Codes(codes_args) => commands::codes(codes_args).map(|_| true),
    }
}
