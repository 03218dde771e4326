//! Normalization of the backend's response envelope.
//!
//! The backend is inconsistent about casing (`success`/`Success`,
//! `message`/`Message`, `data`/`Data`) and sometimes returns a bare JSON
//! array or a bare object. [`decode`] folds every variant into one
//! [`Envelope`] at the network boundary so call sites never check casings.
//!
//! ```rust
//! use aquabot_core::api::envelope::decode;
//!
//! let lower = decode::<Vec<u32>>(r#"{"success": true, "data": [1, 2]}"#).unwrap();
//! let upper = decode::<Vec<u32>>(r#"{"Success": true, "Data": [1, 2]}"#).unwrap();
//! let bare = decode::<Vec<u32>>("[1, 2]").unwrap();
//! assert_eq!(lower, upper);
//! assert_eq!(lower, bare);
//! ```

use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{Map, Value};

use super::ApiErrorCode;
use crate::error::{AquaError, Result};

const SUCCESS_KEYS: &[&str] = &["success", "Success"];
const MESSAGE_KEYS: &[&str] = &["message", "Message"];
const DATA_KEYS: &[&str] = &["data", "Data"];
const CODE_KEYS: &[&str] = &["errorCode", "ErrorCode", "code", "Code"];

/// Canonical form of every backend response.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
    pub error_code: Option<ApiErrorCode>,
}

impl<T> Envelope<T> {
    /// Turns `success: false` into an [`AquaError::Api`].
    pub fn into_result(self) -> Result<Option<T>> {
        if self.success {
            Ok(self.data)
        } else {
            Err(self.into_error())
        }
    }

    /// Like [`Self::into_result`] but also requires a payload.
    pub fn require_data(self, what: &str) -> Result<T> {
        self.into_result()?
            .ok_or_else(|| AquaError::UnexpectedResponse {
                message: format!("{what} response has no data"),
            })
    }

    /// Error built from this envelope's message and code.
    pub fn into_error(self) -> AquaError {
        let message = self
            .message
            .filter(|m| !m.trim().is_empty())
            .or_else(|| self.error_code.as_ref().map(ToString::to_string))
            .unwrap_or_else(|| "Request failed".to_string());
        AquaError::Api {
            code: self.error_code,
            message,
        }
    }
}

/// Decodes a response body into the canonical envelope.
///
/// Rules:
/// - a bare array is successful data;
/// - an object is read with either casing of each envelope key;
/// - `success` defaults to "no error code present" when absent;
/// - without a `data` key, the remaining non-envelope fields of the object
///   are offered as data.
///
/// # Errors
///
/// `UnexpectedResponse` when the body is not JSON or the explicit `data`
/// field does not match `T`.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<Envelope<T>> {
    let value: Value = serde_json::from_str(body).map_err(|e| AquaError::UnexpectedResponse {
        message: format!("response is not JSON: {e}"),
    })?;

    match value {
        Value::Array(_) => Ok(Envelope {
            success: true,
            message: None,
            data: Some(from_value(value)?),
            error_code: None,
        }),
        Value::Object(mut map) => decode_object(&mut map),
        other => Err(AquaError::UnexpectedResponse {
            message: format!("unexpected JSON value: {other}"),
        }),
    }
}

fn decode_object<T: DeserializeOwned>(map: &mut Map<String, Value>) -> Result<Envelope<T>> {
    let error_code = take_first(map, CODE_KEYS)
        .and_then(|v| v.as_str().map(ApiErrorCode::from_code));
    let success = match take_first(map, SUCCESS_KEYS) {
        Some(Value::Bool(flag)) => flag,
        _ => error_code.is_none(),
    };
    let message = take_first(map, MESSAGE_KEYS).and_then(|v| match v {
        Value::String(s) => Some(s),
        Value::Null => None,
        other => Some(other.to_string()),
    });

    let data = match take_first(map, DATA_KEYS) {
        Some(Value::Null) => None,
        Some(explicit) => Some(from_value(explicit)?),
        // Bare objects and flattened payloads such as `{success, token, user}`
        None if !map.is_empty() => {
            serde_json::from_value(Value::Object(std::mem::take(map))).ok()
        }
        None => None,
    };

    Ok(Envelope {
        success,
        message,
        data,
        error_code,
    })
}

fn take_first(map: &mut Map<String, Value>, keys: &[&str]) -> Option<Value> {
    keys.iter().find_map(|key| map.remove(*key))
}

fn from_value<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| AquaError::UnexpectedResponse {
        message: format!("response data has an unexpected shape: {e}"),
    })
}

/// Payload that arrives either as a single object or as a list.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}
