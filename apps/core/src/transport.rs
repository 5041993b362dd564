use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::contract::{ExtensionHandler, HostEvent, HostResponse};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidJson,
    InvalidRequest,
    EncodeFailed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TransportResponse {
    Ok { response: HostResponse },
    Err { error: ErrorResponse },
}

pub fn handle_event(handler: &dyn ExtensionHandler, event: &HostEvent) -> TransportResponse {
    TransportResponse::Ok {
        response: handler.handle_event(event),
    }
}

/// Decodes one request line, dispatches it, and encodes the reply. Never fails: bad input
/// comes back as an `err` envelope.
pub fn handle_json(handler: &dyn ExtensionHandler, payload: &str) -> String {
    let response = match decode_event(payload) {
        Ok(event) => handle_event(handler, &event),
        Err(error) => {
            log::warn!("rejected host request: {}", error.message);
            TransportResponse::Err { error }
        }
    };
    encode(&response)
}

fn decode_event(payload: &str) -> Result<HostEvent, ErrorResponse> {
    let value: Value = serde_json::from_str(payload).map_err(|error| ErrorResponse {
        code: ErrorCode::InvalidJson,
        message: error.to_string(),
    })?;
    serde_json::from_value(value).map_err(|error| ErrorResponse {
        code: ErrorCode::InvalidRequest,
        message: error.to_string(),
    })
}

pub fn encode(response: &TransportResponse) -> String {
    serde_json::to_string(response).unwrap_or_else(|error| {
        log::error!("failed to encode transport response: {error}");
        r#"{"status":"err","error":{"code":"encode_failed","message":"unencodable response"}}"#
            .to_string()
    })
}
