//! Newline-delimited JSON framing for line-oriented request protocols.
//!
//! Every message on the wire is one line:
//! - The compact JSON text of the message, with no raw line breaks
//! - Followed by a line terminator (`\n` or `\r\n`)
//!
//! The receiving side reads the stream line by line and parses each line
//! as one message. [`LineWriter`] writes and flushes one frame per call.

pub mod codec;
pub mod error;
pub mod terminator;
pub mod writer;

pub use codec::{encode_line, encode_text};
pub use error::{FrameError, Result};
pub use terminator::{LineTerminator, ParseTerminatorError};
pub use writer::LineWriter;
