//! Server-sent event line handling.
//!
//! Network reads do not respect line boundaries, so bytes are buffered
//! until a full `\n`-terminated line is available.

/// End-of-stream sentinel carried as `data: [DONE]`.
pub const DONE: &str = "[DONE]";

/// Accumulates raw bytes and hands out complete lines.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buf: Vec<u8>,
}

impl LineBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append bytes and drain every complete line, without the line ending.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(bytes);
        let mut lines = Vec::new();
        while let Some(pos) = self.buf.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=pos).collect();
            let text = String::from_utf8_lossy(&line[..line.len() - 1]);
            lines.push(text.trim_end_matches('\r').to_owned());
        }
        lines
    }

    /// Take whatever is left once the body has ended.
    pub fn finish(&mut self) -> Option<String> {
        if self.buf.is_empty() {
            return None;
        }
        let rest = String::from_utf8_lossy(&self.buf).trim_end().to_owned();
        self.buf.clear();
        (!rest.is_empty()).then_some(rest)
    }

    /// Take the leftover line and tell whether it is the `[DONE]` sentinel.
    ///
    /// Covers bodies whose last line has no trailing newline.
    pub fn finish_at_done(&mut self) -> bool {
        self.finish().as_deref().and_then(data_payload) == Some(DONE)
    }
}

/// The payload of a `data:` line, if `line` is one.
pub fn data_payload(line: &str) -> Option<&str> {
    line.strip_prefix("data:").map(str::trim)
}
