//! Best-effort mirroring of outgoing frames to a human-readable sink.

use std::io::Write;

use reqline_frame::{LineTerminator, LineWriter};

use crate::clock::Clock;
use crate::filter::DiagnosticFilter;

/// Separator between the timestamp and the frame text.
pub const DIAGNOSTIC_SEPARATOR: &str = " => ";

/// Format one diagnostic line (without terminator).
pub fn format_diagnostic_line(timestamp_millis: u64, frame: &str) -> String {
    format!("{timestamp_millis}{DIAGNOSTIC_SEPARATOR}{frame}")
}

/// What happened to a frame offered to the diagnostic sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mirror {
    Written,
    Suppressed,
    Failed,
}

/// Secondary sink receiving timestamped copies of admitted frames.
///
/// Timestamps never go backwards: a reading earlier than the last one
/// written is clamped to it.
pub struct DiagnosticSink<D> {
    writer: LineWriter<D>,
    filter: DiagnosticFilter,
    clock: Box<dyn Clock>,
    last_millis: u64,
}

impl<D: Write> DiagnosticSink<D> {
    /// Wrap `sink`. Writes never wait on it: a `WouldBlock` drops the line.
    pub fn new(
        sink: D,
        filter: DiagnosticFilter,
        clock: Box<dyn Clock>,
        terminator: LineTerminator,
    ) -> Self {
        Self {
            writer: LineWriter::with_terminator(sink, terminator).best_effort(),
            filter,
            clock,
            last_millis: 0,
        }
    }

    pub(crate) fn mirror(&mut self, frame: &str) -> Mirror {
        if !self.admits(frame) {
            return Mirror::Suppressed;
        }

        let now = self.clock.now_millis().max(self.last_millis);
        self.last_millis = now;

        match self.writer.write_line(&format_diagnostic_line(now, frame)) {
            Ok(()) => Mirror::Written,
            Err(err) => {
                tracing::warn!(error = %err, "failed mirroring request to diagnostic sink");
                Mirror::Failed
            }
        }
    }
}

impl<D> DiagnosticSink<D> {
    /// True when the filter lets `frame` through.
    pub fn admits(&self, frame: &str) -> bool {
        self.filter.admits(frame)
    }

    /// Borrow the wrapped sink.
    pub fn get_ref(&self) -> &D {
        self.writer.get_ref()
    }

    /// Consume and return the wrapped sink.
    pub fn into_inner(self) -> D {
        self.writer.into_inner()
    }
}

impl<D> std::fmt::Debug for DiagnosticSink<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticSink")
            .field("filter", &self.filter)
            .field("last_millis", &self.last_millis)
            .finish_non_exhaustive()
    }
}
