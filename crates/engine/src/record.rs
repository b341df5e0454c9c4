//! Uploaded record model.
//!
//! Records are caller-defined JSON objects. The engine never validates their
//! shape beyond the upload payload being a list; whatever fields a record
//! carries, the predictor only ever reads numbers out of it.

use serde_json::Value;

/// One uploaded data point (offer, email creative, or campaign).
pub type Record = Value;

/// Read a numeric field from a record.
///
/// Missing or non-numeric fields count as 0, so partial records never fail.
pub fn numeric_field(record: &Record, name: &str) -> f64 {
    record.get(name).and_then(Value::as_f64).unwrap_or(0.0)
}
