//! Drives a pretend analysis server: requests go to stdout, the
//! diagnostic mirror goes to stderr.
//!
//! Run with: cargo run -p reqline --example analysis-session

use reqline::channel::{ChannelConfig, RequestChannel};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let stdout = std::io::stdout().lock();
    let mut stderr = std::io::stderr();

    let mut channel = RequestChannel::builder(stdout)
        .diagnostic_sink(&mut stderr)
        .config(ChannelConfig::default())
        .build();

    channel.send(&json!({"id": "0", "method": "server.getVersion"}))?;
    channel.send(&json!({
        "id": "1",
        "method": "analysis.setAnalysisRoots",
        "params": {"included": ["/workspace/app"], "excluded": []}
    }))?;
    channel.send(&json!({
        "id": "2",
        "method": "analysis.updateContent",
        "params": {"files": {"/workspace/app/main.dart": {"type": "add", "content": "void main() {\n}\n"}}}
    }))?;

    let stats = channel.stats();
    channel.close();
    eprintln!(
        "sent {} frames, mirrored {}, suppressed {}",
        stats.frames_sent, stats.frames_mirrored, stats.frames_suppressed
    );
    Ok(())
}
