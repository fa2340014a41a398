use std::io::{self, Write};

use snip_core::output::OutputSink;

/// Maps the sink seams onto stdio: all output lands on stdout so the
/// surrounding shell decides what "paste" or "copy" means. Sink calls must
/// not fail, so write errors are swallowed.
pub struct StdioSink;

impl OutputSink for StdioSink {
    fn copy_text(&mut self, text: &str) {
        write_stdout(text);
    }

    fn preview(&mut self, text: &str) {
        write_stdout(text);
        if !text.ends_with('\n') {
            write_stdout("\n");
        }
    }

    fn paste(&mut self, text: &str) {
        write_stdout(text);
    }
}

fn write_stdout(text: &str) {
    let mut out = io::stdout();
    let _ = out.write_all(text.as_bytes());
    let _ = out.flush();
}
