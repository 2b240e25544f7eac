use serde::{Deserialize, Serialize};

/// Error category enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    ValidationError,
    ParseError,
    ConfigurationError,
    LimitExceeded,
    IoError,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Document encoding accepted by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Sniff the first non-whitespace character: `{`/`[` means JSON, anything else YAML.
    #[default]
    Auto,
    Json,
    Yaml,
}

impl InputFormat {
    /// Resolve `Auto` against the provided text.
    pub fn resolve(self, text: &str) -> InputFormat {
        match self {
            InputFormat::Auto => {
                let first = text.trim_start().chars().next();
                if matches!(first, Some('{') | Some('[')) {
                    InputFormat::Json
                } else {
                    InputFormat::Yaml
                }
            }
            other => other,
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Auto => write!(f, "auto"),
            InputFormat::Json => write!(f, "JSON"),
            InputFormat::Yaml => write!(f, "YAML"),
        }
    }
}
