use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system<S: Into<String>>(s: S) -> Self {
        Self {
            role: Role::System,
            content: s.into(),
        }
    }
    pub fn user<S: Into<String>>(s: S) -> Self {
        Self {
            role: Role::User,
            content: s.into(),
        }
    }
}

/// Normalized request knobs. `temperature` is already clamped to [0,2]
/// and `max_tokens` is >= 1 by the time this is built (see `options`).
#[derive(Clone, Debug)]
pub struct ChatOpts {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Wire body for `POST /chat/completions`. Built once per invocation.
#[derive(Clone, Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ChatRequest {
    pub fn new(msgs: &[Message], opts: &ChatOpts) -> Self {
        ChatRequest {
            model: opts.model.clone(),
            messages: msgs.to_vec(),
            temperature: opts.temperature,
            max_tokens: opts.max_tokens,
        }
    }
}

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("config: {0}")]
    Config(String),
    #[error("network: {0}")]
    Network(String),
    #[error("timeout: {0}")]
    Timeout(String),
    #[error("status {status}")]
    Status { status: u16, body: Value },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("other: {0}")]
    Other(String),
}

impl ChatError {
    /// The single human-readable message surfaced for a failed invocation.
    /// Status failures pull the API's own message out of the body when the
    /// body has one; everything else collapses into two fixed formats.
    pub fn user_message(&self) -> String {
        match self {
            ChatError::Status { status, body } => {
                format!("API Error {}: {}", status, status_body_message(body))
            }
            ChatError::Config(m)
            | ChatError::Network(m)
            | ChatError::Timeout(m)
            | ChatError::Malformed(m)
            | ChatError::Other(m)
                if !m.trim().is_empty() =>
            {
                format!("Network/Error: {}", m)
            }
            _ => "Unknown Error".to_string(),
        }
    }
}

fn status_body_message(body: &Value) -> &str {
    if let Some(m) = body
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
    {
        return m;
    }
    if let Some(s) = body.as_str() {
        return s;
    }
    "Request failed"
}

#[allow(async_fn_in_trait)]
pub trait ModelClient: Send + Sync {
    async fn send_chat(&self, msgs: &[Message], opts: &ChatOpts) -> Result<String, ChatError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_lowercase_roles() {
        let msgs = vec![Message::system("be brief"), Message::user("hi")];
        let opts = ChatOpts {
            model: "openrouter/auto".to_string(),
            temperature: 1.0,
            max_tokens: 1024,
        };
        let v = serde_json::to_value(ChatRequest::new(&msgs, &opts)).unwrap();
        assert_eq!(v["messages"][0]["role"], "system");
        assert_eq!(v["messages"][1]["role"], "user");
        assert_eq!(v["model"], "openrouter/auto");
        assert_eq!(v["max_tokens"], 1024);
        assert_eq!(v.as_object().unwrap().len(), 4);
    }

    #[test]
    fn status_message_from_error_object() {
        let e = ChatError::Status {
            status: 429,
            body: json!({"error": {"message": "rate limited"}}),
        };
        assert_eq!(e.user_message(), "API Error 429: rate limited");
    }

    #[test]
    fn status_message_from_string_body() {
        let e = ChatError::Status {
            status: 502,
            body: json!("upstream exploded"),
        };
        assert_eq!(e.user_message(), "API Error 502: upstream exploded");
    }

    #[test]
    fn status_message_generic_fallback() {
        let e = ChatError::Status {
            status: 500,
            body: json!({"detail": 42}),
        };
        assert_eq!(e.user_message(), "API Error 500: Request failed");
    }

    #[test]
    fn non_status_failures_share_one_format() {
        assert_eq!(
            ChatError::Timeout("deadline elapsed".into()).user_message(),
            "Network/Error: deadline elapsed"
        );
        assert_eq!(
            ChatError::Config("missing API key".into()).user_message(),
            "Network/Error: missing API key"
        );
    }

    #[test]
    fn empty_message_is_unknown() {
        assert_eq!(ChatError::Other(String::new()).user_message(), "Unknown Error");
        assert_eq!(ChatError::Other("  ".into()).user_message(), "Unknown Error");
    }
}
