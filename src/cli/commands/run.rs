//! Run command implementation for the weather tracker CLI
//!
//! Executes a measurement script line by line against a fresh in-memory store
//! and writes one JSON response per command to stdout.

use super::shared::{RunSummary, load_configuration, setup_logging};
use crate::app::services::measurement_service::{
    MeasurementService, Outcome, ResponseBody, ServiceResponse,
};
use crate::cli::args::{Args, RunArgs};
use crate::cli::script::{ScriptCommand, parse_line};
use crate::Error;
use crate::config::Config;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tokio::io::AsyncReadExt;
use tracing::{debug, info, warn};

/// One line of run output
#[derive(Debug, Serialize)]
pub struct ScriptOutput<'a> {
    pub line: usize,
    pub command: &'a str,
    pub status: Outcome,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<&'a ResponseBody>,
}

/// Run command entry point
pub async fn run_script(args: &Args, run_args: &RunArgs) -> Result<RunSummary> {
    let mut config = load_configuration(args)?;
    if run_args.pretty {
        config = config.with_pretty_output();
    }
    if run_args.stop_on_error {
        config = config.with_stop_on_error();
    }

    setup_logging(&config)?;
    debug!("Run arguments: {:?}", run_args);

    let script = read_script(run_args.script_path()).await?;
    let service = MeasurementService::default();

    let summary = execute_script(&service, &script, &config, &mut std::io::stdout()).await?;
    summary.print("Run Summary", config.output.colored);

    Ok(summary)
}

/// Read a script from a file, or from stdin when no path is given
pub async fn read_script(path: Option<&Path>) -> crate::Result<String> {
    match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::io(format!("Failed to read script {}", path.display()), e)),
        None => {
            let mut buffer = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buffer)
                .await
                .map_err(|e| Error::io("Failed to read script from stdin", e))?;
            Ok(buffer)
        }
    }
}

/// Execute every line of a script, writing JSON responses to `out`
pub async fn execute_script(
    service: &MeasurementService,
    script: &str,
    config: &Config,
    out: &mut impl std::io::Write,
) -> Result<RunSummary> {
    let start_time = Instant::now();
    let mut summary = RunSummary::default();

    for (index, text) in script.lines().enumerate() {
        let line = index + 1;

        let command = match parse_line(line, text) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                summary.parse_errors += 1;
                if config.script.stop_on_error {
                    return Err(e).context("Script execution stopped");
                }

                warn!("Skipping line {}: {}", line, e);
                let response = ServiceResponse::rejected(Outcome::BadRequest, &e);
                write_output(out, line, "invalid", &response, config.output.pretty)?;
                continue;
            }
        };

        summary.commands_parsed += 1;
        let response = execute(service, &command).await;
        summary.record(response.outcome);

        write_output(out, line, command.name(), &response, config.output.pretty)?;
    }

    summary.processing_time = start_time.elapsed();
    info!(
        "Executed {} commands ({} rejected, {} parse errors), store holds {} measurements",
        summary.commands_executed,
        summary.rejected(),
        summary.parse_errors,
        service.store().len().await
    );

    Ok(summary)
}

/// Dispatch a parsed command to the measurement service
pub async fn execute(service: &MeasurementService, command: &ScriptCommand) -> ServiceResponse {
    match command {
        ScriptCommand::Add(request) => service.create(request).await,
        ScriptCommand::Get { key } => service.get(key).await,
        ScriptCommand::Put { key, request } => service.replace(key, request).await,
        ScriptCommand::Patch { key, request } => service.patch(key, request).await,
        ScriptCommand::Delete { key } => service.delete(key).await,
        ScriptCommand::Stats(request) => service.stats(request).await,
    }
}

fn write_output(
    out: &mut impl std::io::Write,
    line: usize,
    command: &str,
    response: &ServiceResponse,
    pretty: bool,
) -> crate::Result<()> {
    let output = ScriptOutput {
        line,
        command,
        status: response.outcome,
        code: response.outcome.status_code(),
        body: response.body.as_ref(),
    };

    if pretty {
        serde_json::to_writer_pretty(&mut *out, &output)?;
    } else {
        serde_json::to_writer(&mut *out, &output)?;
    }

    writeln!(out).map_err(|e| Error::io("Failed to write response", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn run_to_lines(script: &str, config: &Config) -> (RunSummary, Vec<serde_json::Value>) {
        let service = MeasurementService::default();
        let mut out = Vec::new();
        let summary = execute_script(&service, script, config, &mut out)
            .await
            .unwrap();

        let lines = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        (summary, lines)
    }

    #[tokio::test]
    async fn test_feature_scenario() {
        let script = "\
# create
add 2015-09-01T16:00:00.000Z temperature=27.1 dewPoint=16.7 precipitation=0
add 2015-09-01T16:10:00.000Z temperature=27.5 dewPoint=17.1 precipitation=0
get 2015-09-01
patch 2015-09-01T16:00:00.000Z precipitation=15.2
get 2015-09-01T16:00:00.000Z
stats from=2015-09-01T16:00:00.000Z to=2015-09-01T17:00:00.000Z metric=temperature stat=min stat=max
delete 2015-09-01T16:00:00.000Z
delete 2015-09-01T16:00:00.000Z
";

        let (summary, lines) = run_to_lines(script, &Config::default()).await;

        assert_eq!(summary.commands_executed, 8);
        assert_eq!(summary.parse_errors, 0);
        assert_eq!(summary.rejected(), 1);

        let codes: Vec<u64> = lines.iter().map(|l| l["code"].as_u64().unwrap()).collect();
        assert_eq!(codes, vec![201, 201, 200, 204, 200, 200, 204, 404]);

        assert_eq!(lines[0]["line"], 2);
        assert_eq!(lines[2]["body"].as_array().unwrap().len(), 2);
        assert_eq!(lines[4]["body"][0]["precipitation"], 15.2);
        assert_eq!(lines[4]["body"][0]["temperature"], 27.1);
        assert_eq!(lines[5]["body"][0]["value"], 27.1);
        assert_eq!(lines[5]["body"][1]["value"], 27.5);
        assert_eq!(lines[7]["status"], "not_found");
    }

    #[tokio::test]
    async fn test_parse_errors_are_reported_and_skipped() {
        let script = "bogus line\nadd 2015-09-01T16:00:00.000Z\n";

        let (summary, lines) = run_to_lines(script, &Config::default()).await;

        assert_eq!(summary.parse_errors, 1);
        assert_eq!(summary.commands_executed, 1);
        assert_eq!(lines[0]["command"], "invalid");
        assert_eq!(lines[0]["code"], 400);
        assert!(lines[0]["body"]["error"].as_str().unwrap().contains("line 1"));
        assert_eq!(lines[1]["code"], 201);
    }

    #[tokio::test]
    async fn test_stop_on_error() {
        let service = MeasurementService::default();
        let config = Config::default().with_stop_on_error();
        let mut out = Vec::new();

        let result = execute_script(
            &service,
            "add 2015-09-01T16:00:00.000Z\nbogus\nadd 2015-09-01T16:10:00.000Z\n",
            &config,
            &mut out,
        )
        .await;

        assert!(result.is_err());
        assert_eq!(service.store().len().await, 1);
    }

    #[tokio::test]
    async fn test_read_script_from_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("script.txt");
        std::fs::write(&path, "get 2015-09-01\n").unwrap();

        let script = read_script(Some(path.as_path())).await.unwrap();
        assert_eq!(script, "get 2015-09-01\n");

        let missing = temp_dir.path().join("missing.txt");
        let result = read_script(Some(missing.as_path())).await;
        assert!(matches!(result, Err(Error::Io { .. })));
        assert!(result.unwrap_err().to_string().contains("missing.txt"));
    }

    /// Writer that accepts a fixed number of bytes and then fails
    struct LimitedWriter {
        remaining: usize,
    }

    impl std::io::Write for LimitedWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if self.remaining == 0 {
                return Err(std::io::Error::other("output closed"));
            }
            let written = buf.len().min(self.remaining);
            self.remaining -= written;
            Ok(written)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_output_reports_failed_json_write() {
        let response = ServiceResponse::empty(Outcome::NoContent);
        let mut out = LimitedWriter { remaining: 0 };

        let result = write_output(&mut out, 1, "delete", &response, false);
        assert!(matches!(result, Err(Error::Serialization { .. })));
    }

    #[test]
    fn test_write_output_reports_failed_newline() {
        let response = ServiceResponse::empty(Outcome::NoContent);
        let expected = serde_json::to_string(&ScriptOutput {
            line: 1,
            command: "delete",
            status: Outcome::NoContent,
            code: 204,
            body: None,
        })
        .unwrap();
        let mut out = LimitedWriter {
            remaining: expected.len(),
        };

        let result = write_output(&mut out, 1, "delete", &response, false);
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_write_output_pretty() {
        let response = ServiceResponse::empty(Outcome::NotFound);
        let mut out = Vec::new();

        write_output(&mut out, 3, "get", &response, true).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("}\n"));
        assert!(text.lines().count() > 1);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["code"], 404);
        assert!(value.get("body").is_none());
    }
}
