//! Decoding of the extraction service's response contract.
//!
//! Success: `{ "success": true, "data": [ {..}, .. ], "columns": [ "..", .. ] }`.
//! Failure: non-2xx status, or `{ "success": false, "error": ".." }`.

use serde_json::Value;
use tracing::{debug, warn};

use crate::core::{ExtractionOutput, RawRecord};

use super::error::ExtractionError;

/// Classify a complete HTTP exchange.
pub fn parse_response(status: u16, body: &str) -> Result<ExtractionOutput, ExtractionError> {
    if !(200..300).contains(&status) {
        return Err(error_from_body(Some(status), body));
    }
    parse_body(body)
}

/// Decode a 2xx body into raw rows and column order.
pub fn parse_body(body: &str) -> Result<ExtractionOutput, ExtractionError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ExtractionError::Format(format!("response is not valid JSON: {e}")))?;
    let Value::Object(payload) = value else {
        return Err(ExtractionError::Format("response is not a JSON object".to_string()));
    };

    match payload.get("success") {
        Some(Value::Bool(true)) => {}
        Some(Value::Bool(false)) => {
            let message = payload.get("error").and_then(Value::as_str);
            return Err(ExtractionError::server(None, message));
        }
        Some(_) => return Err(ExtractionError::Format("'success' is not a boolean".to_string())),
        None => {
            // A bare error payload still counts as a server-reported failure
            if let Some(message) = payload.get("error").and_then(Value::as_str) {
                return Err(ExtractionError::server(None, Some(message)));
            }
            return Err(ExtractionError::Format("response has no 'success' field".to_string()));
        }
    }

    let data = match payload.get("data") {
        Some(Value::Array(items)) => items,
        Some(_) => return Err(ExtractionError::Format("'data' is not a list".to_string())),
        None => return Err(ExtractionError::Format("response has no 'data' field".to_string())),
    };

    let mut raw_records: Vec<RawRecord> = Vec::with_capacity(data.len());
    for (idx, item) in data.iter().enumerate() {
        match item {
            Value::Object(row) => raw_records.push(row.clone()),
            _ => {
                return Err(ExtractionError::Format(format!(
                    "data[{idx}] is not an object"
                )));
            }
        }
    }

    let columns = match payload.get("columns") {
        Some(Value::Array(names)) => {
            let mut columns = Vec::with_capacity(names.len());
            for (idx, name) in names.iter().enumerate() {
                match name {
                    Value::String(s) => columns.push(s.clone()),
                    _ => {
                        return Err(ExtractionError::Format(format!(
                            "columns[{idx}] is not a string"
                        )));
                    }
                }
            }
            debug!(columns = columns.len(), "column order taken from response");
            columns
        }
        None | Some(Value::Null) => {
            let columns: Vec<String> = raw_records
                .first()
                .map(|row| row.keys().cloned().collect())
                .unwrap_or_default();
            debug!(columns = columns.len(), "column order taken from first record");
            columns
        }
        Some(_) => return Err(ExtractionError::Format("'columns' is not a list".to_string())),
    };

    if let Some(total) = payload.get("total_rows").and_then(Value::as_u64) {
        if total as usize != raw_records.len() {
            warn!(total_rows = total, received = raw_records.len(), "row count mismatch in response");
        }
    }

    Ok(ExtractionOutput { raw_records, columns })
}

/// Build the error for a non-2xx response.
///
/// A JSON `error` string is surfaced; a non-JSON body is surfaced as text.
pub fn error_from_body(status: Option<u16>, body: &str) -> ExtractionError {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => ExtractionError::server(status, value.get("error").and_then(Value::as_str)),
        Err(_) => ExtractionError::server(status, Some(body)),
    }
}
