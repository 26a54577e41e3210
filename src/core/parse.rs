use serde::de::DeserializeOwned;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Errors raised while turning model output into records
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Record {index} failed validation: {errors}")]
    InvalidRecord { index: usize, errors: ValidationErrors },
}

/// Remove a Markdown code fence wrapped around a model reply
///
/// A ```` ```json ```` fence takes precedence over a bare ```` ``` ```` fence.
/// Text without fences is only trimmed.
pub fn strip_code_fences(text: &str) -> &str {
    let body = if let Some((_, rest)) = text.split_once("```json") {
        rest.split_once("```").map_or(rest, |(inner, _)| inner)
    } else if let Some((_, rest)) = text.split_once("```") {
        rest.split_once("```").map_or(rest, |(inner, _)| inner)
    } else {
        text
    };

    body.trim()
}

/// Parse a model reply as a JSON array of validated records
pub fn parse_records<T>(text: &str) -> Result<Vec<T>, ParseError>
where
    T: DeserializeOwned + Validate,
{
    let records: Vec<T> = serde_json::from_str(strip_code_fences(text))?;

    for (index, record) in records.iter().enumerate() {
        record
            .validate()
            .map_err(|errors| ParseError::InvalidRecord { index, errors })?;
    }

    Ok(records)
}
