use crate::core::flow::finding::Finding;
use crate::core::types::{ErrorCategory, InputFormat};
use std::collections::BTreeMap;

/// Failure surfaced by the CLI or configuration layer.
#[derive(Debug)]
pub struct AppError {
    pub category: ErrorCategory,
    pub code: String,
    pub message: String,
    pub context: BTreeMap<String, String>,
}

impl AppError {
    pub fn new<T: Into<String>>(category: ErrorCategory, message: T) -> Self {
        AppError {
            category,
            code: default_code(category).to_string(),
            message: message.into(),
            context: BTreeMap::new(),
        }
    }

    /// Attach the path or setting the error concerns.
    pub fn with_context<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}

fn default_code(category: ErrorCategory) -> &'static str {
    match category {
        ErrorCategory::ValidationError => "VALIDATION_ERROR",
        ErrorCategory::ParseError => "PARSE_ERROR",
        ErrorCategory::ConfigurationError => "CONFIG_ERROR",
        ErrorCategory::LimitExceeded => "INPUT_LIMIT_EXCEEDED",
        ErrorCategory::IoError => "IO_ERROR",
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.category, self.message)?;
        for (key, value) in &self.context {
            write!(f, " ({}: {})", key, value)?;
        }
        Ok(())
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::new(ErrorCategory::IoError, e.to_string())
    }
}

/// Failure to turn an input document into a typed flow.
///
/// The three variants map onto the three pre-semantic tiers: malformed
/// text, an input that trips the size/depth guard, and a tree whose shape
/// does not match the type model.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DeserializationError {
    #[error("failed to parse {format} document: {message}")]
    Syntax {
        format: InputFormat,
        message: String,
    },
    #[error("input rejected: {message}")]
    LimitExceeded { message: String },
    #[error("document does not match the flow schema ({} problem(s))", .findings.len())]
    Schema { findings: Vec<Finding> },
}

impl DeserializationError {
    /// Findings describing this failure, ready to be placed in a validation result.
    pub fn into_findings(self) -> Vec<Finding> {
        match self {
            DeserializationError::Syntax { format, message } => vec![Finding::parse_error(
                format!("failed to parse {} document: {}", format, message),
            )],
            DeserializationError::LimitExceeded { message } => {
                vec![Finding::limit_exceeded(message)]
            }
            DeserializationError::Schema { findings } => findings,
        }
    }
}

impl From<DeserializationError> for AppError {
    fn from(e: DeserializationError) -> Self {
        let category = match e {
            DeserializationError::Syntax { .. } => ErrorCategory::ParseError,
            DeserializationError::LimitExceeded { .. } => ErrorCategory::LimitExceeded,
            DeserializationError::Schema { .. } => ErrorCategory::ValidationError,
        };
        AppError::new(category, e.to_string())
    }
}
