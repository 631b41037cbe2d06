//! HTTP request and response bodies.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /chat`.
///
/// A missing `message` key deserialises as an empty message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChatReq {
    #[serde(default)]
    pub message: String,
}

/// Reply to `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChatRes {
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_req_missing_message_is_empty() {
        let req: ChatReq = serde_json::from_str("{}").expect("should deserialise");
        assert_eq!(req.message, "");
    }

    #[test]
    fn test_chat_res_shape() {
        let res = ChatRes {
            response: "Hello!".into(),
        };
        let json = serde_json::to_value(&res).expect("should serialise");
        assert_eq!(json, serde_json::json!({ "response": "Hello!" }));
    }
}
