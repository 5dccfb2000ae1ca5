//! Decoder for chat-completion server-sent events.
//!
//! Network chunks are fed as they arrive; `data:` lines carry JSON deltas
//! whose `choices[0].delta.content` fragments are joined in arrival order.

use anyhow::Context;

const DONE_MARKER: &str = "[DONE]";

#[derive(Debug, Default)]
pub struct SseDecoder {
    pending: Vec<u8>,
    text: String,
    fragments: usize,
    done: bool,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes one network chunk. Lines split across chunks are buffered.
    pub fn feed(&mut self, chunk: &[u8]) -> anyhow::Result<()> {
        self.pending.extend_from_slice(chunk);
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            self.handle_line(&line)?;
        }
        Ok(())
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn fragment_count(&self) -> usize {
        self.fragments
    }

    /// Flushes a trailing unterminated line and returns the joined text.
    pub fn finish(mut self) -> anyhow::Result<String> {
        if !self.pending.is_empty() {
            let rest = std::mem::take(&mut self.pending);
            self.handle_line(&rest)?;
        }
        Ok(self.text)
    }

    fn handle_line(&mut self, raw: &[u8]) -> anyhow::Result<()> {
        if self.done {
            return Ok(());
        }
        let line = std::str::from_utf8(raw).context("stream line is not valid UTF-8")?;
        let line = line.trim_end_matches(|c| c == '\r' || c == '\n');

        // event:, id:, retry: and ":" comments carry nothing we need
        let Some(data) = line.strip_prefix("data:") else {
            return Ok(());
        };
        let data = data.trim_start();
        if data.is_empty() {
            return Ok(());
        }
        if data == DONE_MARKER {
            self.done = true;
            return Ok(());
        }

        let event: serde_json::Value =
            serde_json::from_str(data).context("malformed stream event")?;
        if let Some(err) = event.get("error") {
            let msg = err
                .get("message")
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| err.to_string());
            anyhow::bail!("OpenAI stream error: {}", msg);
        }
        if let Some(fragment) = event
            .pointer("/choices/0/delta/content")
            .and_then(|v| v.as_str())
        {
            self.text.push_str(fragment);
            self.fragments += 1;
        }
        Ok(())
    }
}
