//! Typed decoding of untyped call payloads.

use crate::error::CallError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Decode a call's argument map into `T`, or fail with `BadArguments`
/// carrying `message`.
///
/// The payload must be a map; unknown keys are ignored.
pub(crate) fn decode_arguments<T>(arguments: &Value, message: &str) -> Result<T, CallError>
where
    T: DeserializeOwned,
{
    if !arguments.is_object() {
        debug!(kind = value_kind(arguments), "Argument payload is not a map");
        return Err(CallError::bad_arguments(message));
    }

    T::deserialize(arguments).map_err(|err| {
        debug!(error = %err, "Argument payload rejected");
        CallError::bad_arguments(message)
    })
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "map",
    }
}
