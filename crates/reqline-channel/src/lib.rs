//! Write-side request channel for line-oriented JSON-RPC style servers.
//!
//! A [`RequestChannel`] serializes each request to one compact JSON line,
//! writes it to the primary sink and flushes before returning. When a
//! diagnostic sink is attached, admitted frames are mirrored to it as
//! `<epoch-millis> => <frame>` lines on a best-effort basis.

pub mod channel;
pub mod clock;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod filter;

pub use channel::{ChannelState, ChannelStats, RequestChannel, RequestChannelBuilder};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::ChannelConfig;
pub use diagnostic::{format_diagnostic_line, DiagnosticSink, DIAGNOSTIC_SEPARATOR};
pub use error::{ChannelError, Result};
pub use filter::{DiagnosticFilter, DEFAULT_EXCLUDED_CALL};
pub use reqline_frame::LineTerminator;
