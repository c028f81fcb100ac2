// src/exec/completion.rs

//! Join of the three asynchronous completion sources.
//!
//! A run is complete once the exit status has been observed **and** both
//! output streams have been closed. The state here is only ever touched by
//! the single aggregator task that owns it, so stream events and the exit
//! notification are applied one at a time in the order they are received.

use super::result::ExecutionResult;
use super::streams::{StreamEvent, StreamKind};

/// Bytes collected from one stream.
#[derive(Debug, Default)]
struct Accumulator {
    bytes: Vec<u8>,
    closed: bool,
}

impl Accumulator {
    fn push(&mut self, chunk: &[u8]) {
        debug_assert!(!self.closed, "chunk after close");
        self.bytes.extend_from_slice(chunk);
    }

    fn freeze(self) -> Option<String> {
        if self.bytes.is_empty() {
            None
        } else {
            Some(String::from_utf8_lossy(&self.bytes).into_owned())
        }
    }
}

/// Where an execution currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Streams open, process still running.
    Running,
    /// Process exited; at least one stream still has data in flight.
    Draining,
    /// Streams closed but exit not yet observed.
    AwaitingExit,
    /// Exit observed and both streams closed.
    Completed,
}

#[derive(Debug, Default)]
pub struct Completion {
    stdout: Accumulator,
    stderr: Accumulator,
    exit_code: Option<i32>,
    cancelled: bool,
}

impl Completion {
    pub fn new() -> Self {
        Self::default()
    }

    fn stream_mut(&mut self, kind: StreamKind) -> &mut Accumulator {
        match kind {
            StreamKind::Stdout => &mut self.stdout,
            StreamKind::Stderr => &mut self.stderr,
        }
    }

    pub fn apply(&mut self, event: StreamEvent) {
        match event {
            StreamEvent::Chunk(kind, bytes) => self.stream_mut(kind).push(&bytes),
            StreamEvent::Closed(kind) => self.stream_mut(kind).closed = true,
        }
    }

    /// Every reader has hung up; nothing more can arrive on either stream.
    pub fn close_streams(&mut self) {
        self.stdout.closed = true;
        self.stderr.closed = true;
    }

    pub fn record_exit(&mut self, code: i32) {
        // Only the first exit status counts.
        self.exit_code.get_or_insert(code);
    }

    pub fn mark_cancelled(&mut self) {
        self.cancelled = true;
    }

    pub fn has_exited(&self) -> bool {
        self.exit_code.is_some()
    }

    pub fn streams_closed(&self) -> bool {
        self.stdout.closed && self.stderr.closed
    }

    pub fn phase(&self) -> Phase {
        match (self.has_exited(), self.streams_closed()) {
            (false, false) => Phase::Running,
            (true, false) => Phase::Draining,
            (false, true) => Phase::AwaitingExit,
            (true, true) => Phase::Completed,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase() == Phase::Completed
    }

    /// Freeze the accumulators into the caller-facing result.
    ///
    /// Call only once [`is_complete`](Self::is_complete) holds; an unobserved
    /// exit is reported as `-1`.
    pub fn finish(self) -> ExecutionResult {
        ExecutionResult {
            stdout: self.stdout.freeze(),
            stderr: self.stderr.freeze(),
            exit_code: self.exit_code.unwrap_or(-1),
            cancelled: self.cancelled,
        }
    }
}
