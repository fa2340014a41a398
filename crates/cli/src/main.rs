mod invoke;
mod sink;

use std::env;
use std::io::{self, Read};

use providers::openrouter::{OpenRouterClient, OpenRouterConfig};
use snip_core::llm::ChatError;
use snip_core::options::ResponseMode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        // One message per failed invocation: logged and surfaced. Logging
        // goes first but cannot mask the terminal failure.
        let msg = e.user_message();
        error!(target: "snip", "{}", msg);
        eprintln!("{}", msg);
        std::process::exit(1);
    }
}

fn run() -> Result<(), ChatError> {
    let (mode_override, input) = read_invocation().map_err(|e| ChatError::Other(e.to_string()))?;
    let cfg = OpenRouterConfig::from_env_and_file().map_err(|e| ChatError::Config(e.to_string()))?;
    let mut options = cfg.request_options();
    if let Some(mode) = mode_override {
        options.response_handling = mode;
    }
    info!(target: "snip", "invocation model={} mode={:?} input_len={}", options.model, options.response_handling, input.len());

    let client = OpenRouterClient::new(cfg).map_err(|e| ChatError::Other(e.to_string()))?;
    let mut sink = sink::StdioSink;

    let rt = tokio::runtime::Runtime::new().map_err(|e| ChatError::Other(e.to_string()))?;
    rt.block_on(invoke::run(&client, &input, &options, &mut sink))
}

/// First arg may name a response mode; everything else (or stdin when no args
/// remain) is the selection. The selection arrives trimmed, like a host
/// text-selection would.
fn read_invocation() -> io::Result<(Option<ResponseMode>, String)> {
    let mut args: Vec<String> = env::args().skip(1).collect();
    let mode = args
        .first()
        .filter(|a| matches!(a.as_str(), "append" | "replace" | "copy" | "show"))
        .map(|a| ResponseMode::parse(a));
    if mode.is_some() {
        args.remove(0);
    }
    let input = if args.is_empty() {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        args.join(" ")
    };
    Ok((mode, input.trim().to_string()))
}
