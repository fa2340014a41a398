use snip_core::llm::{ChatError, ChatOpts, ModelClient};
use snip_core::options::{normalize_max_tokens, normalize_temperature, RequestOptions};
use snip_core::output::{route, OutputSink};
use snip_core::prompt;
use tracing::debug;

/// One full invocation: validate the key, normalize options, assemble the
/// prompt, make the single network call, route the reply. Any failure aborts
/// with one classified error; there is no retry at any stage.
pub async fn run<C, S>(
    client: &C,
    input_text: &str,
    options: &RequestOptions,
    sink: &mut S,
) -> Result<(), ChatError>
where
    C: ModelClient,
    S: OutputSink,
{
    if options.api_key.trim().is_empty() {
        return Err(ChatError::Config("missing API key".into()));
    }

    let opts = ChatOpts {
        model: options.model.clone(),
        temperature: normalize_temperature(options.temperature.as_deref()),
        max_tokens: normalize_max_tokens(options.max_tokens.as_deref()),
    };
    let msgs = prompt::build_messages(
        input_text,
        options.system_prompt.as_deref(),
        options.user_prompt.as_deref(),
    );
    debug!(
        target: "snip",
        "request model={} messages={} temperature={} max_tokens={}",
        opts.model,
        msgs.len(),
        opts.temperature,
        opts.max_tokens
    );

    let reply = client.send_chat(&msgs, &opts).await?;
    route(options.response_handling, &reply, input_text, sink);
    Ok(())
}
