use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use reqline_channel::ChannelStats;
use serde::Serialize;

/// Format of the run summary. Summaries go to stderr; stdout may be
/// carrying frames.
#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stderr() -> Self {
        if std::io::stderr().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EmitSummary<'a> {
    pub schema_id: &'a str,
    pub output: &'a str,
    pub diagnostic_log: Option<&'a str>,
    pub line_ending: String,
    pub frames_sent: u64,
    pub frames_mirrored: u64,
    pub frames_suppressed: u64,
    pub diagnostic_failures: u64,
}

impl<'a> EmitSummary<'a> {
    pub fn new(
        output: &'a str,
        diagnostic_log: Option<&'a str>,
        line_ending: String,
        stats: ChannelStats,
    ) -> Self {
        Self {
            schema_id: "https://schemas.3leaps.dev/reqline/cli/v1/emit-summary.schema.json",
            output,
            diagnostic_log,
            line_ending,
            frames_sent: stats.frames_sent,
            frames_mirrored: stats.frames_mirrored,
            frames_suppressed: stats.frames_suppressed,
            diagnostic_failures: stats.diagnostic_failures,
        }
    }
}

pub fn render_summary(summary: &EmitSummary<'_>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => {
            serde_json::to_string(summary).unwrap_or_else(|_| "{}".to_string())
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["OUTPUT", "DEBUG LOG", "SENT", "MIRRORED", "SUPPRESSED"])
                .add_row(vec![
                    summary.output.to_string(),
                    summary.diagnostic_log.unwrap_or("-").to_string(),
                    summary.frames_sent.to_string(),
                    summary.frames_mirrored.to_string(),
                    summary.frames_suppressed.to_string(),
                ]);
            table.to_string()
        }
        OutputFormat::Pretty => format!(
            "output={} debug_log={} line_ending={} sent={} mirrored={} suppressed={} diagnostic_failures={}",
            summary.output,
            summary.diagnostic_log.unwrap_or("-"),
            summary.line_ending,
            summary.frames_sent,
            summary.frames_mirrored,
            summary.frames_suppressed,
            summary.diagnostic_failures,
        ),
    }
}

pub fn print_summary(summary: &EmitSummary<'_>, format: OutputFormat) {
    eprintln!("{}", render_summary(summary, format));
}
