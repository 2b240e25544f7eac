//! Text and tree entry points into the type model.

use crate::core::error::DeserializationError;
use crate::core::flow::limits::InputLimits;
use crate::core::flow::model::Flow;
use crate::core::flow::structure::check_structure;
use crate::core::types::InputFormat;
use serde_json::Value;

/// Parse `text` into an untyped tree without applying any shape checks.
///
/// The size guard runs before the text is handed to a parser and the depth
/// and count guards run on the resulting tree.
pub fn read_tree(
    text: &str,
    format: InputFormat,
    limits: &InputLimits,
) -> Result<Value, DeserializationError> {
    limits.check_text(text)?;
    let format = format.resolve(text);
    let tree = match format {
        InputFormat::Json => serde_json::from_str::<Value>(text).map_err(|e| {
            DeserializationError::Syntax {
                format,
                message: e.to_string(),
            }
        })?,
        _ => serde_yaml::from_str::<Value>(text).map_err(|e| DeserializationError::Syntax {
            format,
            message: e.to_string(),
        })?,
    };
    limits.check_tree(&tree)?;
    Ok(tree)
}

/// Parse YAML or JSON text into a typed flow.
pub fn parse_str(
    text: &str,
    format: InputFormat,
    limits: &InputLimits,
) -> Result<Flow, DeserializationError> {
    let tree = read_tree(text, format, limits)?;
    check_structure(&tree).into_result()
}

/// Coerce an already-parsed tree into a typed flow.
pub fn parse_value(tree: &Value, limits: &InputLimits) -> Result<Flow, DeserializationError> {
    limits.check_tree(tree)?;
    check_structure(tree).into_result()
}
