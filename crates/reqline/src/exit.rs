use std::fmt;
use std::io;

use reqline_channel::ChannelError;
use reqline_frame::FrameError;

// Exit code constants aligned with rsfulmen/DDR-0002 semantics.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TIMEOUT,
        io::ErrorKind::BrokenPipe | io::ErrorKind::NotFound => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        FrameError::Io(source) => io_error(context, source),
        FrameError::Serialize(_) | FrameError::EmbeddedLineBreak { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        FrameError::ConnectionClosed => CliError::new(FAILURE, format!("{context}: {err}")),
    }
}

pub fn channel_error(context: &str, err: ChannelError) -> CliError {
    match err {
        ChannelError::Serialization(err) | ChannelError::Write(err) => frame_error(context, err),
        ChannelError::Closed => CliError::new(INTERNAL, format!("{context}: {err}")),
    }
}

/// Exit code for a failed argument parse. Help and version output succeed.
pub fn clap_exit_code(err: &clap::Error) -> i32 {
    use clap::error::ErrorKind;

    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => SUCCESS,
        _ => USAGE,
    }
}

pub fn json_error(context: &str, err: serde_json::Error) -> CliError {
    if err.is_io() {
        return io_error(context, io::Error::from(err));
    }
    CliError::new(
        DATA_INVALID,
        format!(
            "{context}: {err} (line {}, column {})",
            err.line(),
            err.column()
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_serialization_to_data_invalid() {
        let err = channel_error(
            "send failed",
            ChannelError::Serialization(FrameError::EmbeddedLineBreak { offset: 3 }),
        );
        assert_eq!(err.code, DATA_INVALID);
        assert!(err.message.starts_with("send failed: "));
    }

    #[test]
    fn maps_write_io_by_kind() {
        let err = channel_error(
            "send failed",
            ChannelError::Write(FrameError::Io(io::Error::from(
                io::ErrorKind::PermissionDenied,
            ))),
        );
        assert_eq!(err.code, PERMISSION_DENIED);

        let err = channel_error(
            "send failed",
            ChannelError::Write(FrameError::Io(io::Error::from(io::ErrorKind::BrokenPipe))),
        );
        assert_eq!(err.code, FAILURE);
    }

    #[test]
    fn maps_parse_failures_to_usage() {
        use clap::error::ErrorKind;

        assert_eq!(
            clap_exit_code(&clap::Error::new(ErrorKind::UnknownArgument)),
            USAGE
        );
        assert_eq!(
            clap_exit_code(&clap::Error::new(ErrorKind::ArgumentConflict)),
            USAGE
        );
        assert_eq!(
            clap_exit_code(&clap::Error::new(ErrorKind::DisplayHelp)),
            SUCCESS
        );
    }

    #[test]
    fn maps_invalid_json_input() {
        let parse = serde_json::from_str::<serde_json::Value>("{\"id\":").unwrap_err();
        let err = json_error("invalid request", parse);
        assert_eq!(err.code, DATA_INVALID);
        assert!(err.message.contains("line 1"));
    }
}
