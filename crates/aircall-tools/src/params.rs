//! Argument extraction and validation helpers
//!
//! Every helper reports problems as [`ToolError::InvalidArguments`], which the
//! tool layer renders as `Error: Invalid parameters - <detail>`.

use crate::dates::parse_date_param;
use aircall_core::tools::{ToolCall, ToolError};
use std::str::FromStr;

fn invalid(message: impl Into<String>) -> ToolError {
    ToolError::InvalidArguments(message.into())
}

/// Required positive call id
pub fn call_id(call: &ToolCall) -> Result<i64, ToolError> {
    match call.get_typed::<i64>("call_id")? {
        Some(id) if id > 0 => Ok(id),
        Some(_) => Err(invalid("call_id must be greater than 0")),
        None => Err(invalid("call_id is required")),
    }
}

/// Optional integer within `[min, max]`, falling back to `default`
pub fn int_in_range(
    call: &ToolCall,
    key: &str,
    default: i64,
    min: i64,
    max: i64,
) -> Result<i64, ToolError> {
    let value = call.get_typed::<i64>(key)?.unwrap_or(default);
    if value < min || value > max {
        return Err(invalid(format!("{} must be between {} and {}", key, min, max)));
    }
    Ok(value)
}

/// Optional non-negative integer
pub fn non_negative(call: &ToolCall, key: &str) -> Result<Option<i64>, ToolError> {
    match call.get_typed::<i64>(key)? {
        Some(value) if value < 0 => Err(invalid(format!("{} must be greater than or equal to 0", key))),
        other => Ok(other),
    }
}

/// Optional boolean flag
pub fn flag(call: &ToolCall, key: &str) -> Result<bool, ToolError> {
    Ok(call.get_typed::<bool>(key)?.unwrap_or(false))
}

/// Optional string parsed with `FromStr`; the parse error is the message
pub fn parsed<T>(call: &ToolCall, key: &str) -> Result<Option<T>, ToolError>
where
    T: FromStr<Err = String>,
{
    call.get_typed::<String>(key)?
        .map(|s| s.parse::<T>().map_err(invalid))
        .transpose()
}

/// Optional date argument converted to a Unix timestamp
pub fn date(call: &ToolCall, key: &str) -> Result<Option<i64>, ToolError> {
    call.get_typed::<String>(key)?
        .map(|s| parse_date_param(&s).map_err(invalid))
        .transpose()
}

/// Optional list with at most `max` items
pub fn list<T>(call: &ToolCall, key: &str, max: usize) -> Result<Option<Vec<T>>, ToolError>
where
    T: serde::de::DeserializeOwned,
{
    let items = call.get_typed::<Vec<T>>(key)?;
    if let Some(items) = &items {
        if items.len() > max {
            return Err(invalid(format!("{} can contain at most {} items", key, max)));
        }
    }
    Ok(items)
}
