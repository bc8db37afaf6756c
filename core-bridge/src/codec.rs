//! # JSON Method Codec
//!
//! Byte encoding for calls and replies, matching the JSON method codec used by
//! the UI shell's platform channels:
//!
//! | Message | Encoding |
//! |---|---|
//! | call | `{"method": "getRoute", "args": {...}}` |
//! | success | `[result]` |
//! | error | `[code, message, details]` |
//! | not implemented | empty payload |

use crate::error::{Result, TransportError};
use bridge_traits::{ChannelError, MethodCall, MethodResponse};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize, Deserialize)]
struct WireCall {
    method: String,
    #[serde(default)]
    args: Value,
}

/// Stateless codec; all methods are associated functions.
pub struct JsonMethodCodec;

impl JsonMethodCodec {
    pub fn encode_method_call(call: &MethodCall) -> Result<Bytes> {
        let wire = WireCall {
            method: call.method.clone(),
            args: call.arguments.clone(),
        };
        serde_json::to_vec(&wire)
            .map(Bytes::from)
            .map_err(|e| TransportError::Codec(format!("Failed to encode method call: {}", e)))
    }

    pub fn decode_method_call(message: &[u8]) -> Result<MethodCall> {
        let wire: WireCall = serde_json::from_slice(message)
            .map_err(|e| TransportError::Codec(format!("Invalid method call: {}", e)))?;
        Ok(MethodCall::new(wire.method, wire.args))
    }

    pub fn encode_response(response: &MethodResponse) -> Result<Bytes> {
        let envelope = match response {
            MethodResponse::Success(value) => Value::Array(vec![value.clone()]),
            MethodResponse::Error(error) => Value::Array(vec![
                Value::String(error.code.clone()),
                error.message.clone().map_or(Value::Null, Value::String),
                error.details.clone().unwrap_or(Value::Null),
            ]),
            MethodResponse::NotImplemented => return Ok(Bytes::new()),
        };

        serde_json::to_vec(&envelope)
            .map(Bytes::from)
            .map_err(|e| TransportError::Codec(format!("Failed to encode reply: {}", e)))
    }

    pub fn decode_response(envelope: &[u8]) -> Result<MethodResponse> {
        if envelope.is_empty() {
            return Ok(MethodResponse::NotImplemented);
        }

        let value: Value = serde_json::from_slice(envelope)
            .map_err(|e| TransportError::Codec(format!("Invalid reply envelope: {}", e)))?;

        let Value::Array(mut items) = value else {
            return Err(TransportError::Codec(
                "Reply envelope must be a JSON array".to_string(),
            ));
        };

        match items.len() {
            1 => Ok(MethodResponse::Success(items.remove(0))),
            3 => {
                let details = items.pop().filter(|v| !v.is_null());
                let message = match items.pop() {
                    Some(Value::String(message)) => Some(message),
                    Some(Value::Null) | None => None,
                    Some(other) => Some(other.to_string()),
                };
                let code = match items.pop() {
                    Some(Value::String(code)) => code,
                    _ => {
                        return Err(TransportError::Codec(
                            "Error envelope code must be a string".to_string(),
                        ))
                    }
                };
                Ok(MethodResponse::Error(ChannelError {
                    code,
                    message,
                    details,
                }))
            }
            n => Err(TransportError::Codec(format!(
                "Reply envelope has {} items, expected 1 or 3",
                n
            ))),
        }
    }
}
