use crate::openrouter::config::OpenRouterConfig;
use reqwest::{header, Client};
use serde_json::Value;
use snip_core::llm::{ChatError, ChatOpts, ChatRequest, Message, ModelClient};
use tracing::{debug, error, info};

#[derive(Clone)]
pub struct OpenRouterClient {
    http: Client,
    cfg: OpenRouterConfig,
}

impl OpenRouterClient {
    pub fn new(cfg: OpenRouterConfig) -> anyhow::Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", cfg.api_key.trim()))?,
        );
        // OpenRouter asks callers to identify themselves for rankings/abuse
        // handling; sent on every request.
        headers.insert("HTTP-Referer", header::HeaderValue::from_str(&cfg.referer)?);
        headers.insert("X-Title", header::HeaderValue::from_str(&cfg.title)?);
        let mut builder = Client::builder()
            .default_headers(headers)
            .use_rustls_tls()
            .timeout(cfg.timeout);
        if let Some(p) = &cfg.proxy {
            builder = builder.proxy(reqwest::Proxy::all(p)?);
        }
        let http = builder.build()?;
        Ok(Self { http, cfg })
    }
}

impl ModelClient for OpenRouterClient {
    async fn send_chat(&self, msgs: &[Message], opts: &ChatOpts) -> Result<String, ChatError> {
        let url = format!(
            "{}/chat/completions",
            self.cfg.base_url.trim_end_matches('/')
        );
        info!(target: "providers::openrouter", "send chat model={} url={}", opts.model, url);
        let body = ChatRequest::new(msgs, opts);
        let resp = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_err)?;
        let status = resp.status();
        let text = resp.text().await.map_err(map_reqwest_err)?;
        // Non-JSON bodies are kept as raw text; on a 2xx the extractor rejects
        // them as malformed, on an error status the raw text becomes the
        // classified message.
        let value: Value = serde_json::from_str(&text).unwrap_or(Value::String(text));
        if !status.is_success() {
            error!(target: "providers::openrouter", "chat non-2xx status={}", status);
            return Err(ChatError::Status {
                status: status.as_u16(),
                body: value,
            });
        }
        debug!(target: "providers::openrouter", "chat ok status={}", status);
        extract_reply(&value)
    }
}

fn map_reqwest_err(e: reqwest::Error) -> ChatError {
    if e.is_timeout() {
        ChatError::Timeout(e.to_string())
    } else if e.is_request() || e.is_connect() {
        ChatError::Network(e.to_string())
    } else {
        ChatError::Other(e.to_string())
    }
}

/// Normalize `choices[0].message.content` into a trimmed reply string.
/// Content may be a plain string or a multi-part array whose entries are
/// strings or objects carrying a string `text` field.
pub fn extract_reply(body: &Value) -> Result<String, ChatError> {
    let choices = body
        .get("choices")
        .and_then(Value::as_array)
        .ok_or_else(|| ChatError::Malformed("missing choices array".into()))?;
    let first = choices
        .first()
        .ok_or_else(|| ChatError::Malformed("no completion choices".into()))?;
    let message = first
        .get("message")
        .filter(|m| m.is_object())
        .ok_or_else(|| ChatError::Malformed("missing message object".into()))?;
    let content = message
        .get("content")
        .ok_or_else(|| ChatError::Malformed("missing message content".into()))?;

    let text = match content {
        Value::String(s) => s.trim().to_string(),
        Value::Array(parts) => parts
            .iter()
            .map(|p| match p {
                Value::String(s) => s.as_str(),
                other => other.get("text").and_then(Value::as_str).unwrap_or(""),
            })
            .collect::<String>()
            .trim()
            .to_string(),
        _ => return Err(ChatError::Malformed("content is not text".into())),
    };
    if text.is_empty() {
        return Err(ChatError::Malformed("empty completion".into()));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_string_content_trimmed() {
        let body = json!({"choices": [{"message": {"content": "  hello there \n"}}]});
        assert_eq!(extract_reply(&body).unwrap(), "hello there");
    }

    #[test]
    fn extracts_multipart_content_in_order() {
        let body = json!({"choices": [{"message": {"content": [
            "Hello ",
            {"type": "text", "text": "from "},
            {"irrelevant": true},
            {"type": "text", "text": "parts"}
        ]}}]});
        assert_eq!(extract_reply(&body).unwrap(), "Hello from parts");
    }

    #[test]
    fn extraction_is_idempotent() {
        let body = json!({"choices": [{"message": {"content": "same"}}]});
        assert_eq!(extract_reply(&body).unwrap(), extract_reply(&body).unwrap());
    }

    #[test]
    fn empty_choices_is_malformed() {
        let body = json!({"choices": []});
        let err = extract_reply(&body).unwrap_err();
        assert!(matches!(err, ChatError::Malformed(ref m) if m.contains("no completion choices")));
    }

    #[test]
    fn missing_choices_is_malformed() {
        for body in [json!({}), json!("just text"), json!({"choices": "nope"})] {
            let err = extract_reply(&body).unwrap_err();
            assert!(matches!(err, ChatError::Malformed(_)));
        }
    }

    #[test]
    fn missing_message_is_malformed() {
        let body = json!({"choices": [{"message": "flat"}]});
        let err = extract_reply(&body).unwrap_err();
        assert!(matches!(err, ChatError::Malformed(ref m) if m.contains("message object")));
    }

    #[test]
    fn non_text_content_is_malformed() {
        let body = json!({"choices": [{"message": {"content": 17}}]});
        let err = extract_reply(&body).unwrap_err();
        assert!(matches!(err, ChatError::Malformed(ref m) if m.contains("not text")));
    }

    #[test]
    fn whitespace_only_completion_is_malformed() {
        for content in [json!("   "), json!([{}]), json!([{"text": "  "}, " "])] {
            let body = json!({"choices": [{"message": {"content": content}}]});
            let err = extract_reply(&body).unwrap_err();
            assert!(matches!(err, ChatError::Malformed(ref m) if m == "empty completion"));
        }
    }
}
