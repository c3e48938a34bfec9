//! Newline-delimited request channel for driving line-oriented JSON-RPC servers.
//!
//! reqline writes one compact JSON request per line to a server's input
//! stream, flushing after every frame, and can mirror a filtered,
//! timestamped copy of the traffic to a diagnostic log.
//!
//! # Crate Structure
//!
//! - [`frame`]: Line framing and the blocking line writer
//! - [`channel`]: The request channel with diagnostic mirroring
//!
//! ```
//! use reqline::channel::RequestChannel;
//! use serde_json::json;
//!
//! let mut channel = RequestChannel::new(Vec::<u8>::new());
//! channel.send(&json!({"id": "1", "method": "server.getVersion"})).unwrap();
//! let wire = channel.into_inner().unwrap();
//! assert!(wire.starts_with(br#"{"id":"1","method":"server.getVersion"}"#));
//! ```

/// Re-export frame types.
pub mod frame {
    pub use reqline_frame::*;
}

/// Re-export channel types.
pub mod channel {
    pub use reqline_channel::*;
}
