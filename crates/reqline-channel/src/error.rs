use reqline_frame::FrameError;

/// Errors surfaced by [`RequestChannel::send`](crate::RequestChannel::send).
///
/// Diagnostic sink failures never appear here.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// The request could not be turned into a single-line frame.
    /// The channel stays open.
    #[error("failed to serialize request: {0}")]
    Serialization(#[source] FrameError),

    /// The primary sink rejected the write or flush.
    /// The channel should be treated as broken and closed.
    #[error("failed to write request to primary sink: {0}")]
    Write(#[source] FrameError),

    /// The channel was closed before this call.
    #[error("request channel is closed")]
    Closed,
}

impl From<FrameError> for ChannelError {
    fn from(err: FrameError) -> Self {
        if err.is_encoding() {
            ChannelError::Serialization(err)
        } else {
            ChannelError::Write(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, ChannelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_frame_errors() {
        let encoding = ChannelError::from(FrameError::EmbeddedLineBreak { offset: 0 });
        assert!(matches!(encoding, ChannelError::Serialization(_)));

        let closed = ChannelError::from(FrameError::ConnectionClosed);
        assert!(matches!(closed, ChannelError::Write(_)));

        let io = ChannelError::from(FrameError::Io(std::io::Error::other("boom")));
        assert!(matches!(io, ChannelError::Write(_)));
    }

    #[test]
    fn messages_include_cause() {
        let err = ChannelError::Write(FrameError::ConnectionClosed);
        assert!(err.to_string().contains("connection closed"));
    }
}
