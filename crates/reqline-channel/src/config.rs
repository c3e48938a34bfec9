use reqline_frame::LineTerminator;
use serde::{Deserialize, Serialize};

use crate::filter::{DiagnosticFilter, DEFAULT_EXCLUDED_CALL};

/// Controls framing and diagnostic mirroring for a request channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Terminator written after every frame on both sinks.
    pub terminator: LineTerminator,
    /// Call names whose frames are not mirrored to the diagnostic sink.
    pub excluded_calls: Vec<String>,
}

impl ChannelConfig {
    /// Filter built from `excluded_calls`.
    pub fn diagnostic_filter(&self) -> DiagnosticFilter {
        DiagnosticFilter::excluding(self.excluded_calls.iter().cloned())
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            terminator: LineTerminator::platform(),
            excluded_calls: vec![DEFAULT_EXCLUDED_CALL.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_excludes_version_call() {
        let config = ChannelConfig::default();
        assert_eq!(config.excluded_calls, [DEFAULT_EXCLUDED_CALL]);
        assert!(!config
            .diagnostic_filter()
            .admits(r#"{"method":"server.getVersion"}"#));
    }

    #[test]
    fn deserializes_partial_config() {
        let config: ChannelConfig =
            serde_json::from_str(r#"{"terminator":"crlf"}"#).unwrap();
        assert_eq!(config.terminator, LineTerminator::CrLf);
        assert_eq!(config.excluded_calls, [DEFAULT_EXCLUDED_CALL]);

        let config: ChannelConfig =
            serde_json::from_str(r#"{"excluded_calls":[]}"#).unwrap();
        assert!(config.excluded_calls.is_empty());
        assert!(config
            .diagnostic_filter()
            .admits(r#"{"method":"server.getVersion"}"#));
    }
}
