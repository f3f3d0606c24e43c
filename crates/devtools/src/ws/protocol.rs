//! Wire envelopes for the control channel.
//!
//! Keep them minimal: ids, method names, and opaque `Value` payloads.
//! Typed command parameters and results are decoded by the caller.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Command id, unique within one session's lifetime.
pub type CommandId = u64;

/// Outbound command envelope.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    pub id: CommandId,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// Inbound reply to a command, carrying a result xor an error.
#[derive(Debug, Deserialize)]
pub struct Response {
    pub id: CommandId,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<ProtocolError>,
}

/// Error payload inside a failed [`Response`].
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProtocolError {
    pub code: i32,
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

/// Unsolicited notification. Carries no id and is never correlated with a
/// command.
#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// Any inbound frame: a response if it has an id, otherwise an event.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Message {
    Response(Response),
    Event(Event),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_skips_absent_params() {
        let request = Request {
            id: 3,
            method: "Target.getTargets".to_string(),
            params: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"id":3,"method":"Target.getTargets"}"#);
    }

    #[test]
    fn request_serializes_params() {
        let request = Request {
            id: 1,
            method: "Page.navigate".to_string(),
            params: Some(serde_json::json!({"url": "https://example.com"})),
        };
        let value: Value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["method"], "Page.navigate");
        assert_eq!(value["params"]["url"], "https://example.com");
    }

    #[test]
    fn frame_with_id_is_a_response() {
        let json = r#"{"id": 42, "result": {"status": "ok"}}"#;
        match serde_json::from_str::<Message>(json).unwrap() {
            Message::Response(response) => {
                assert_eq!(response.id, 42);
                assert_eq!(response.result.unwrap()["status"], "ok");
                assert!(response.error.is_none());
            }
            _ => panic!("expected response"),
        }
    }

    #[test]
    fn frame_without_id_is_an_event() {
        let json = r#"{"method": "Page.loadEventFired", "params": {"timestamp": 1.5}}"#;
        match serde_json::from_str::<Message>(json).unwrap() {
            Message::Event(event) => {
                assert_eq!(event.method, "Page.loadEventFired");
                assert_eq!(event.params.unwrap()["timestamp"], 1.5);
            }
            _ => panic!("expected event"),
        }
    }

    #[test]
    fn error_reply_decodes_verbatim() {
        let json = r#"{"id": 7, "error": {"code": -32000, "message": "boom", "data": null}}"#;
        match serde_json::from_str::<Message>(json).unwrap() {
            Message::Response(response) => {
                let error = response.error.unwrap();
                assert_eq!(error.code, -32000);
                assert_eq!(error.message, "boom");
                // JSON null decodes to an absent payload.
                assert_eq!(error.data, None);
            }
            _ => panic!("expected response"),
        }
    }
}
