use crate::llm::Message;

/// Placeholder the user prompt may use to splice the selection in.
pub const TEXT_TOKEN: &str = "{{text}}";

/// Build the ordered message list: optional system message first, exactly one
/// user message last. The selection itself is passed through verbatim (it may
/// be empty); only prompt-side strings are trimmed.
pub fn build_messages(
    input_text: &str,
    system_prompt: Option<&str>,
    user_prompt: Option<&str>,
) -> Vec<Message> {
    let mut msgs = Vec::with_capacity(2);

    if let Some(sys) = system_prompt {
        let sys = sys.trim();
        if !sys.is_empty() {
            msgs.push(Message::system(sys));
        }
    }

    let content = match user_prompt.map(str::trim).filter(|p| !p.is_empty()) {
        Some(prompt) if prompt.contains(TEXT_TOKEN) => {
            prompt.replace(TEXT_TOKEN, input_text.trim())
        }
        Some(prompt) => format!("{}\n\n{}", prompt, input_text),
        None => input_text.to_string(),
    };
    msgs.push(Message::user(content));
    msgs
}
