/// Errors that can occur while encoding or writing line frames.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The message could not be serialized to JSON.
    #[error("failed to serialize message: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The serialized text contains a raw line break and would split the frame.
    #[error("serialized message contains a raw line break at byte {offset}")]
    EmbeddedLineBreak { offset: usize },

    /// An I/O error occurred while writing or flushing a frame.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The sink accepted zero bytes and can no longer make progress.
    #[error("connection closed (incomplete frame)")]
    ConnectionClosed,
}

impl FrameError {
    /// True when the error came from encoding rather than from the sink.
    pub fn is_encoding(&self) -> bool {
        matches!(
            self,
            FrameError::Serialize(_) | FrameError::EmbeddedLineBreak { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;
