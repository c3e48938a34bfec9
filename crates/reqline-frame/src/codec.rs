use bytes::{BufMut, BytesMut};
use serde::Serialize;

use crate::error::{FrameError, Result};
use crate::terminator::LineTerminator;

/// Serialize a message to its compact single-line JSON text.
///
/// Fails with [`FrameError::EmbeddedLineBreak`] when the output contains a
/// raw `\n` or `\r`. serde_json escapes line breaks inside strings, so this
/// only triggers for values that splice in raw text (e.g. `RawValue`).
pub fn encode_text<T: Serialize + ?Sized>(message: &T) -> Result<String> {
    let text = serde_json::to_string(message)?;
    check_single_line(&text)?;
    Ok(text)
}

/// Encode a message as one terminated line into `dst`.
///
/// Wire format:
/// ```text
/// ┌──────────────────────────────┬──────────────┐
/// │ Compact JSON text            │ Terminator   │
/// │ (no raw \n or \r)            │ \n or \r\n   │
/// └──────────────────────────────┴──────────────┘
/// ```
pub fn encode_line<T: Serialize + ?Sized>(
    message: &T,
    terminator: LineTerminator,
    dst: &mut BytesMut,
) -> Result<()> {
    let text = encode_text(message)?;
    put_line(&text, terminator, dst);
    Ok(())
}

pub(crate) fn check_single_line(text: &str) -> Result<()> {
    match text.find(|c: char| c == '\n' || c == '\r') {
        Some(offset) => Err(FrameError::EmbeddedLineBreak { offset }),
        None => Ok(()),
    }
}

pub(crate) fn put_line(text: &str, terminator: LineTerminator, dst: &mut BytesMut) {
    dst.reserve(text.len() + terminator.byte_len());
    dst.put_slice(text.as_bytes());
    dst.put_slice(terminator.as_bytes());
}
