use std::io::{self, Write};

use reqline_frame::{encode_text, LineWriter};
use serde::Serialize;

use crate::clock::{Clock, SystemClock};
use crate::config::ChannelConfig;
use crate::diagnostic::{DiagnosticSink, Mirror};
use crate::error::{ChannelError, Result};
use crate::filter::DiagnosticFilter;

/// Lifecycle of a [`RequestChannel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    /// Accepting `send` calls.
    Open,
    /// Primary sink released; terminal.
    Closed,
}

/// Counters describing traffic through a channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelStats {
    /// Frames written and flushed to the primary sink.
    pub frames_sent: u64,
    /// Frames copied to the diagnostic sink.
    pub frames_mirrored: u64,
    /// Frames the diagnostic filter held back.
    pub frames_suppressed: u64,
    /// Diagnostic writes that failed and were dropped.
    pub diagnostic_failures: u64,
}

/// Serializes requests into newline-delimited frames on a primary sink.
///
/// Every successful [`send`](Self::send) leaves exactly one complete,
/// flushed line on the primary sink. The channel does no locking of its
/// own; `&mut self` keeps one writer per channel, and callers sharing it
/// across threads wrap it in a `Mutex`.
///
/// The diagnostic sink is never closed by the channel. Pass `&mut W` to
/// keep ownership of it.
pub struct RequestChannel<W, D = io::Sink> {
    primary: Option<LineWriter<W>>,
    diagnostics: Option<DiagnosticSink<D>>,
    config: ChannelConfig,
    stats: ChannelStats,
}

impl<W: Write> RequestChannel<W> {
    /// Open a channel without diagnostic mirroring.
    pub fn new(primary: W) -> Self {
        RequestChannelBuilder::new(primary).build()
    }

    /// Start building a channel with explicit options.
    pub fn builder(primary: W) -> RequestChannelBuilder<W> {
        RequestChannelBuilder::new(primary)
    }
}

impl<W: Write, D: Write> RequestChannel<W, D> {
    /// Open a channel mirroring admitted frames to `diagnostics`, using the
    /// default filter and the system clock.
    pub fn with_diagnostics(primary: W, diagnostics: D) -> Self {
        RequestChannelBuilder::new(primary)
            .diagnostic_sink(diagnostics)
            .build()
    }

    /// Serialize `request` and write it as one flushed line.
    ///
    /// Admitted frames are mirrored to the diagnostic sink first; failures
    /// there are logged and counted, never returned.
    pub fn send<R: Serialize + ?Sized>(&mut self, request: &R) -> Result<()> {
        let primary = self.primary.as_mut().ok_or(ChannelError::Closed)?;
        let text = encode_text(request).map_err(ChannelError::Serialization)?;

        if let Some(diagnostics) = self.diagnostics.as_mut() {
            match diagnostics.mirror(&text) {
                Mirror::Written => self.stats.frames_mirrored += 1,
                Mirror::Suppressed => self.stats.frames_suppressed += 1,
                Mirror::Failed => self.stats.diagnostic_failures += 1,
            }
        }

        primary.write_line(&text).map_err(ChannelError::Write)?;
        self.stats.frames_sent += 1;
        tracing::trace!(bytes = text.len(), "request frame sent");
        Ok(())
    }

    /// Flush and release the primary sink. Safe to call more than once.
    ///
    /// The diagnostic sink is left untouched.
    pub fn close(&mut self) {
        let Some(mut primary) = self.primary.take() else {
            return;
        };
        if let Err(err) = primary.flush() {
            tracing::warn!(error = %err, "failed flushing primary sink on close");
        }
        drop(primary);
        tracing::debug!(frames_sent = self.stats.frames_sent, "request channel closed");
    }

    /// Consume the channel, returning the primary sink if still open.
    pub fn into_inner(self) -> Option<W> {
        self.primary.map(LineWriter::into_inner)
    }
}

impl<W, D> RequestChannel<W, D> {
    pub fn state(&self) -> ChannelState {
        if self.primary.is_some() {
            ChannelState::Open
        } else {
            ChannelState::Closed
        }
    }

    pub fn is_closed(&self) -> bool {
        self.primary.is_none()
    }

    pub fn has_diagnostics(&self) -> bool {
        self.diagnostics.is_some()
    }

    pub fn stats(&self) -> ChannelStats {
        self.stats
    }

    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    /// Borrow the primary sink while the channel is open.
    pub fn primary_ref(&self) -> Option<&W> {
        self.primary.as_ref().map(LineWriter::get_ref)
    }

    /// Borrow the diagnostic sink, if one is attached.
    pub fn diagnostics_ref(&self) -> Option<&D> {
        self.diagnostics.as_ref().map(DiagnosticSink::get_ref)
    }
}

impl<W, D> std::fmt::Debug for RequestChannel<W, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestChannel")
            .field("state", &self.state())
            .field("diagnostics", &self.diagnostics)
            .field("config", &self.config)
            .field("stats", &self.stats)
            .finish()
    }
}

/// Builder for [`RequestChannel`].
pub struct RequestChannelBuilder<W, D = io::Sink> {
    primary: W,
    diagnostics: Option<D>,
    config: ChannelConfig,
    filter: Option<DiagnosticFilter>,
    clock: Option<Box<dyn Clock>>,
}

impl<W: Write> RequestChannelBuilder<W> {
    pub fn new(primary: W) -> Self {
        Self {
            primary,
            diagnostics: None,
            config: ChannelConfig::default(),
            filter: None,
            clock: None,
        }
    }
}

impl<W: Write, D: Write> RequestChannelBuilder<W, D> {
    /// Attach a diagnostic sink.
    pub fn diagnostic_sink<D2: Write>(self, sink: D2) -> RequestChannelBuilder<W, D2> {
        self.maybe_diagnostic_sink(Some(sink))
    }

    /// Attach a diagnostic sink when one is given.
    pub fn maybe_diagnostic_sink<D2: Write>(
        self,
        sink: Option<D2>,
    ) -> RequestChannelBuilder<W, D2> {
        RequestChannelBuilder {
            primary: self.primary,
            diagnostics: sink,
            config: self.config,
            filter: self.filter,
            clock: self.clock,
        }
    }

    /// Use `config` for framing and the default exclusion list.
    pub fn config(mut self, config: ChannelConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the filter derived from `config.excluded_calls`.
    pub fn filter(mut self, filter: DiagnosticFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Timestamp source for diagnostic lines. Defaults to [`SystemClock`].
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    pub fn build(self) -> RequestChannel<W, D> {
        let terminator = self.config.terminator;
        let diagnostics = match self.diagnostics {
            Some(sink) => {
                let filter = self
                    .filter
                    .unwrap_or_else(|| self.config.diagnostic_filter());
                let clock = self.clock.unwrap_or_else(|| Box::new(SystemClock));
                Some(DiagnosticSink::new(sink, filter, clock, terminator))
            }
            None => None,
        };

        RequestChannel {
            primary: Some(LineWriter::with_terminator(self.primary, terminator)),
            diagnostics,
            config: self.config,
            stats: ChannelStats::default(),
        }
    }
}
