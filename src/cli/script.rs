//! Measurement script language
//!
//! A script holds one command per line. Blank lines and lines starting with
//! `#` are ignored. Arguments after the command's positional key are
//! `name=value` pairs:
//!
//! ```text
//! add 2015-09-01T16:00:00.000Z temperature=27.1 dewPoint=16.7 precipitation=0
//! get 2015-09-01
//! put 2015-09-01T16:00:00.000Z temperature=27.1 dewPoint=16.7 precipitation=15.2
//! patch 2015-09-01T16:00:00.000Z timestamp=2015-09-01T16:00:00.000Z precipitation=12.3
//! delete 2015-09-01T16:00:00.000Z
//! stats from=2015-09-01T16:00:00.000Z to=2015-09-01T17:00:00.000Z metric=temperature stat=min stat=max
//! ```
//!
//! `put` and `patch` use the target key as the embedded request timestamp
//! unless a `timestamp=` argument supplies a different one.

use crate::app::models::Metric;
use crate::app::services::measurement_service::{MeasurementRequest, StatsRequest};
use crate::constants::SCRIPT_COMMENT_MARKER;
use crate::{Error, Result};

/// A parsed script command
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    Add(MeasurementRequest),
    Get { key: String },
    Put { key: String, request: MeasurementRequest },
    Patch { key: String, request: MeasurementRequest },
    Delete { key: String },
    Stats(StatsRequest),
}

impl ScriptCommand {
    /// Command keyword as written in scripts
    pub fn name(&self) -> &'static str {
        match self {
            ScriptCommand::Add(_) => "add",
            ScriptCommand::Get { .. } => "get",
            ScriptCommand::Put { .. } => "put",
            ScriptCommand::Patch { .. } => "patch",
            ScriptCommand::Delete { .. } => "delete",
            ScriptCommand::Stats(_) => "stats",
        }
    }
}

/// A command together with its 1-based source line
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    pub line: usize,
    pub command: ScriptCommand,
}

/// Result of parsing a whole script
#[derive(Debug, Default)]
pub struct ParsedScript {
    pub commands: Vec<ScriptLine>,
    pub errors: Vec<Error>,
}

impl ParsedScript {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse every line of a script, collecting errors instead of stopping
pub fn parse_script(text: &str) -> ParsedScript {
    let mut parsed = ParsedScript::default();

    for (index, text) in text.lines().enumerate() {
        let line = index + 1;
        match parse_line(line, text) {
            Ok(Some(command)) => parsed.commands.push(ScriptLine { line, command }),
            Ok(None) => {}
            Err(e) => parsed.errors.push(e),
        }
    }

    parsed
}

/// Parse a single script line; blank lines and comments yield `None`
pub fn parse_line(line: usize, text: &str) -> Result<Option<ScriptCommand>> {
    let text = text.trim();
    if text.is_empty() || text.starts_with(SCRIPT_COMMENT_MARKER) {
        return Ok(None);
    }

    let mut tokens = text.split_whitespace();
    let keyword = tokens.next().unwrap_or_default();
    let rest: Vec<&str> = tokens.collect();

    let command = match keyword {
        "add" => {
            let (key, args) = split_key(line, keyword, &rest)?;
            let mut request = MeasurementRequest::with_timestamp(key);
            apply_metric_args(line, &mut request, args, false)?;
            ScriptCommand::Add(request)
        }
        "get" => ScriptCommand::Get {
            key: single_key(line, keyword, &rest)?,
        },
        "put" | "patch" => {
            let (key, args) = split_key(line, keyword, &rest)?;
            let mut request = MeasurementRequest::with_timestamp(key.clone());
            apply_metric_args(line, &mut request, args, true)?;
            if keyword == "put" {
                ScriptCommand::Put { key, request }
            } else {
                ScriptCommand::Patch { key, request }
            }
        }
        "delete" => ScriptCommand::Delete {
            key: single_key(line, keyword, &rest)?,
        },
        "stats" => ScriptCommand::Stats(parse_stats_args(line, &rest)?),
        other => {
            return Err(Error::script(line, format!("unknown command '{}'", other)));
        }
    };

    Ok(Some(command))
}

fn split_key<'a>(
    line: usize,
    keyword: &str,
    rest: &'a [&'a str],
) -> Result<(String, &'a [&'a str])> {
    match rest.split_first() {
        Some((key, args)) if !key.contains('=') => Ok((key.to_string(), args)),
        _ => Err(Error::script(
            line,
            format!("'{}' requires a timestamp as its first argument", keyword),
        )),
    }
}

fn single_key(line: usize, keyword: &str, rest: &[&str]) -> Result<String> {
    match rest {
        [key] => Ok(key.to_string()),
        _ => Err(Error::script(
            line,
            format!("'{}' takes exactly one timestamp argument", keyword),
        )),
    }
}

fn split_assignment(line: usize, arg: &str) -> Result<(&str, &str)> {
    match arg.split_once('=') {
        Some((name, value)) if !name.is_empty() && !value.is_empty() => Ok((name, value)),
        _ => Err(Error::script(
            line,
            format!("expected name=value, found '{}'", arg),
        )),
    }
}

fn apply_metric_args(
    line: usize,
    request: &mut MeasurementRequest,
    args: &[&str],
    allow_timestamp: bool,
) -> Result<()> {
    for arg in args {
        let (name, value) = split_assignment(line, arg)?;

        if name == "timestamp" && allow_timestamp {
            request.timestamp = Some(value.to_string());
            continue;
        }

        // Values stay raw; numeric validation belongs to the service
        let metric = name
            .parse::<Metric>()
            .map_err(|e| Error::script(line, e.to_string()))?;
        request.set_metric(metric, value);
    }

    Ok(())
}

fn parse_stats_args(line: usize, args: &[&str]) -> Result<StatsRequest> {
    let mut request = StatsRequest::default();
    let mut from = None;
    let mut to = None;

    for arg in args {
        let (name, value) = split_assignment(line, arg)?;
        match name {
            "metric" => request.metrics.push(value.to_string()),
            "stat" => request.stats.push(value.to_string()),
            "from" | "fromDateTime" => from = Some(value.to_string()),
            "to" | "toDateTime" => to = Some(value.to_string()),
            other => {
                return Err(Error::script(
                    line,
                    format!("unknown stats argument '{}'", other),
                ));
            }
        }
    }

    request.from_date_time = from.ok_or_else(|| Error::script(line, "stats requires from="))?;
    request.to_date_time = to.ok_or_else(|| Error::script(line, "stats requires to="))?;

    Ok(request)
}
