//! Response classification into payloads or [`ApiError`]s.

use eventhub_types::ApiError;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Keys probed, in order, for a server-provided error message.
const MESSAGE_KEYS: [&str; 2] = ["message", "error"];

/// Decodes a 2xx body. A blank body decodes as JSON `null`.
pub(crate) fn decode_success<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> Result<T, ApiError> {
    let decoded = if is_blank(body) {
        serde_json::from_value(Value::Null)
    } else {
        serde_json::from_slice(body)
    };
    decoded.map_err(|e| ApiError::InvalidResponse { status: status.as_u16(), message: e.to_string() })
}

/// Builds the normalized error for a non-2xx response.
pub(crate) fn rejection(status: StatusCode, body: &[u8]) -> ApiError {
    let data = payload(body);
    let message = data.as_ref().and_then(server_message).unwrap_or_else(|| {
        format!("Request failed with status code {}", status.as_u16())
    });
    ApiError::ServerRejected { status: status.as_u16(), message, data }
}

/// Maps a reqwest failure to the no-response / setup split.
pub(crate) fn transport_error(err: &reqwest::Error) -> ApiError {
    if err.is_builder() {
        ApiError::setup(err.to_string())
    } else {
        ApiError::no_response()
    }
}

fn payload(body: &[u8]) -> Option<Value> {
    if is_blank(body) {
        return None;
    }
    serde_json::from_slice(body)
        .ok()
        .or_else(|| Some(Value::String(String::from_utf8_lossy(body).into_owned())))
}

fn server_message(data: &Value) -> Option<String> {
    MESSAGE_KEYS
        .iter()
        .filter_map(|key| data.get(key).and_then(Value::as_str))
        .find(|msg| !msg.trim().is_empty())
        .map(str::to_string)
}

fn is_blank(body: &[u8]) -> bool {
    body.iter().all(u8::is_ascii_whitespace)
}
