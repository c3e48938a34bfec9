use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use reqline_channel::{ChannelConfig, DiagnosticFilter, RequestChannel};
use serde_json::Value;

use crate::cmd::EmitArgs;
use crate::exit::{channel_error, io_error, json_error, CliResult, SUCCESS};
use crate::output::{print_summary, EmitSummary, OutputFormat};

pub fn run(args: EmitArgs, format: OutputFormat) -> CliResult<i32> {
    let mut config = ChannelConfig {
        terminator: args.line_ending,
        ..ChannelConfig::default()
    };
    if !args.exclude_calls.is_empty() {
        config.excluded_calls = args.exclude_calls.clone();
    }

    let input = open_input(args.input.as_deref())?;
    let output = open_output(args.output.as_deref())?;
    let debug_log = args
        .debug_log
        .as_deref()
        .map(open_debug_log)
        .transpose()?;

    let mut builder = RequestChannel::builder(output)
        .maybe_diagnostic_sink(debug_log)
        .config(config);
    if args.mirror_all {
        builder = builder.filter(DiagnosticFilter::mirror_all());
    }
    let mut channel = builder.build();

    let result = pump(input, &mut channel);
    let stats = channel.stats();
    channel.close();
    result?;

    tracing::info!(
        frames_sent = stats.frames_sent,
        frames_mirrored = stats.frames_mirrored,
        "emit finished"
    );

    if !args.quiet {
        let output_name = display_target(args.output.as_deref(), "stdout");
        let debug_name = args.debug_log.as_deref().map(|path| path.to_string_lossy());
        let summary = EmitSummary::new(
            &output_name,
            debug_name.as_deref(),
            args.line_ending.to_string(),
            stats,
        );
        print_summary(&summary, format);
    }

    Ok(SUCCESS)
}

/// Send every JSON document read from `input` through `channel`.
///
/// Documents may be separated by any whitespace and span several lines;
/// each one leaves as a single frame.
pub fn pump<R, W, D>(input: R, channel: &mut RequestChannel<W, D>) -> CliResult<u64>
where
    R: Read,
    W: Write,
    D: Write,
{
    let requests = serde_json::Deserializer::from_reader(input).into_iter::<Value>();
    let mut sent = 0u64;
    for request in requests {
        let request =
            request.map_err(|err| json_error(&format!("invalid request #{}", sent + 1), err))?;
        channel
            .send(&request)
            .map_err(|err| channel_error(&format!("send of request #{} failed", sent + 1), err))?;
        sent += 1;
    }
    Ok(sent)
}

fn open_input(path: Option<&Path>) -> CliResult<Box<dyn Read>> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .map_err(|err| io_error(&format!("failed opening {}", path.display()), err))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

fn open_output(path: Option<&Path>) -> CliResult<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .map_err(|err| io_error(&format!("failed creating {}", path.display()), err))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn open_debug_log(path: &Path) -> CliResult<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| io_error(&format!("failed opening debug log {}", path.display()), err))
}

fn display_target(path: Option<&Path>, fallback: &str) -> String {
    path.map(|path| path.display().to_string())
        .unwrap_or_else(|| fallback.to_string())
}
