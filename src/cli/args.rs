use crate::core::InputFormat;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Flow documents to validate (JSON or YAML)
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Document encoding; auto sniffs the first non-whitespace character
    #[arg(long, default_value = "auto", value_name = "FORMAT")]
    pub input_format: InputFormatArg,

    /// Emit either terminal-friendly text or machine-readable JSON
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub output: OutputFormat,

    /// Path to custom config file (default: ./flowdsl.toml)
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Flow document to normalize
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Document encoding; auto sniffs the first non-whitespace character
    #[arg(long, default_value = "auto", value_name = "FORMAT")]
    pub input_format: InputFormatArg,

    /// Encoding of the normalized document
    #[arg(long, default_value = "json", value_name = "FORMAT")]
    pub output: NormalizeFormat,

    /// Path to custom config file (default: ./flowdsl.toml)
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CodesArgs {
    /// Emit either a text table or a JSON array
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub output: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable report
    Text,
    /// JSON payload suitable for downstream tooling
    Json,
}

#[derive(Clone, Copy, clap::ValueEnum, Debug, PartialEq, Eq)]
pub enum NormalizeFormat {
    Json,
    Yaml,
}

#[derive(Clone, Copy, clap::ValueEnum, Debug, PartialEq, Eq)]
pub enum InputFormatArg {
    Auto,
    Json,
    Yaml,
}

impl From<InputFormatArg> for InputFormat {
    fn from(value: InputFormatArg) -> Self {
        match value {
            InputFormatArg::Auto => InputFormat::Auto,
            InputFormatArg::Json => InputFormat::Json,
            InputFormatArg::Yaml => InputFormat::Yaml,
        }
    }
}
