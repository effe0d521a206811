//! Server-sent event decoding for streamed runs.
//!
//! The agents service names its events (`event: thread.message.delta`) and
//! puts the payload on the following `data:` line, so the decoder tracks both
//! fields instead of data-only frames. Chunks arrive at arbitrary boundaries;
//! partial lines stay buffered until the rest shows up.

use futures::stream::BoxStream;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::{IngotError, Result};
use crate::types::{MessageDeltaEvent, RunStep, ThreadMessage, ThreadRun};

/// One decoded SSE frame: event name plus joined data payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseFrame {
    pub event: String,
    pub data: String,
}

/// Incremental SSE frame decoder.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    event: String,
    data: Vec<String>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk of bytes, returning every frame it completes.
    ///
    /// The buffer stays raw bytes and conversion happens per complete line,
    /// so a UTF-8 sequence split across chunk boundaries survives intact.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseFrame> {
        self.buffer.extend_from_slice(chunk);

        let mut frames = Vec::new();
        while let Some(line_end) = self.buffer.iter().position(|&b| b == b'\n') {
            let mut line_bytes: Vec<u8> = self.buffer.drain(..=line_end).collect();
            line_bytes.pop();
            if line_bytes.last() == Some(&b'\r') {
                line_bytes.pop();
            }
            let line = String::from_utf8_lossy(&line_bytes);

            if line.is_empty() {
                if let Some(frame) = self.flush() {
                    frames.push(frame);
                }
                continue;
            }
            if line.starts_with(':') {
                continue;
            }
            if let Some(name) = field_value(&line, "event") {
                self.event = name.to_string();
            } else if let Some(data) = field_value(&line, "data") {
                self.data.push(data.to_string());
            }
        }
        frames
    }

    fn flush(&mut self) -> Option<SseFrame> {
        if self.data.is_empty() && self.event.is_empty() {
            return None;
        }
        let frame = SseFrame {
            event: std::mem::take(&mut self.event),
            data: self.data.join("\n"),
        };
        self.data.clear();
        Some(frame)
    }
}

fn field_value<'a>(line: &'a str, field: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(field)?;
    let rest = rest.strip_prefix(':')?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}

/// A typed event from a streamed run.
#[derive(Debug, Clone)]
pub enum StreamEvent {
    /// A fragment of assistant message text.
    MessageDelta(MessageDeltaEvent),
    /// A message snapshot (created, in progress, completed).
    ThreadMessage(ThreadMessage),
    /// A run snapshot. `requires_action` carries the approval request.
    ThreadRun(ThreadRun),
    /// A run step snapshot.
    RunStep(RunStep),
    /// Terminal marker. The stream ends after this.
    Done,
    /// An event this client does not consume.
    Unknown { event: String },
}

/// Map one frame to a typed event. `Ok(None)` means the frame should be
/// skipped (malformed payload for a known event name).
pub fn parse_frame(frame: &SseFrame) -> Result<Option<StreamEvent>> {
    // A bare `[DONE]` only terminates when no event name claims the frame.
    if frame.event == "done" || (frame.event.is_empty() && frame.data == "[DONE]") {
        return Ok(Some(StreamEvent::Done));
    }
    if frame.event == "error" {
        return Err(IngotError::Stream(frame.data.clone()));
    }

    let event = frame.event.as_str();
    if event == "thread.message.delta" {
        return Ok(decode(frame).map(StreamEvent::MessageDelta));
    }
    if event.starts_with("thread.message.") {
        return Ok(decode(frame).map(StreamEvent::ThreadMessage));
    }
    if event == "thread.run.step.delta" {
        // Step deltas only carry tool-call argument fragments.
        return Ok(Some(StreamEvent::Unknown {
            event: frame.event.clone(),
        }));
    }
    if event.starts_with("thread.run.step.") {
        return Ok(decode(frame).map(StreamEvent::RunStep));
    }
    if event.starts_with("thread.run.") {
        return Ok(decode(frame).map(StreamEvent::ThreadRun));
    }
    Ok(Some(StreamEvent::Unknown {
        event: frame.event.clone(),
    }))
}

fn decode<T: DeserializeOwned>(frame: &SseFrame) -> Option<T> {
    match serde_json::from_str(&frame.data) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(event = %frame.event, error = %err, "skipping undecodable event");
            None
        }
    }
}

/// Decode a streaming response body into typed run events.
///
/// Ends after the `done` marker or when the body closes. Transport errors
/// are yielded once, then the stream stops.
pub fn run_event_stream(resp: reqwest::Response) -> BoxStream<'static, Result<StreamEvent>> {
    let byte_stream = resp.bytes_stream();

    let stream = async_stream::stream! {
        let mut decoder = SseDecoder::new();
        futures::pin_mut!(byte_stream);

        'outer: while let Some(chunk_result) = byte_stream.next().await {
            let chunk = match chunk_result {
                Ok(c) => c,
                Err(e) => {
                    yield Err(IngotError::Network(e));
                    break;
                }
            };

            for frame in decoder.feed(&chunk) {
                match parse_frame(&frame) {
                    Ok(Some(StreamEvent::Done)) => {
                        yield Ok(StreamEvent::Done);
                        break 'outer;
                    }
                    Ok(Some(event)) => yield Ok(event),
                    Ok(None) => {}
                    Err(e) => {
                        yield Err(e);
                        break 'outer;
                    }
                }
            }
        }
    };

    stream.boxed()
}
