use tracing::debug;

use crate::options::ResponseMode;

/// Host-side effect targets. The pipeline never sees how these are
/// implemented; the binary maps them onto its own primitives and tests use a
/// recording sink.
pub trait OutputSink {
    fn copy_text(&mut self, text: &str);
    fn preview(&mut self, text: &str);
    fn paste(&mut self, text: &str);
}

/// Dispatch the reply to exactly one sink call. Unknown modes were already
/// folded into `Append` by `ResponseMode::parse`.
pub fn route<S: OutputSink + ?Sized>(
    mode: ResponseMode,
    reply: &str,
    original_input: &str,
    sink: &mut S,
) {
    debug!(target: "core::output", "routing reply mode={:?} len={}", mode, reply.len());
    match mode {
        ResponseMode::Copy => sink.copy_text(reply),
        ResponseMode::Show => sink.preview(reply),
        ResponseMode::Replace => sink.paste(reply),
        ResponseMode::Append => sink.paste(&format!("{}\n\n{}", original_input, reply)),
    }
}
