use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::logging::DECISION_TARGET;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse telemetry JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decision counts aggregated from `telemetry.jsonl`.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct TelemetrySummary {
    pub decisions: usize,
    pub branch_counts: BTreeMap<String, usize>,
}

pub fn summarise_telemetry(path: &Path) -> Result<TelemetrySummary, TelemetryError> {
    if !path.exists() {
        return Ok(TelemetrySummary::default());
    }

    let file = File::open(path).map_err(|source| TelemetryError::Io {
        context: "opening telemetry log",
        source,
    })?;
    let reader = BufReader::new(file);
    let mut summary = TelemetrySummary::default();

    for line in reader.lines() {
        let line = line.map_err(|source| TelemetryError::Io {
            context: "reading telemetry line",
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let payload: Value = serde_json::from_str(&line)?;
        let target = payload
            .get("target")
            .and_then(Value::as_str)
            .unwrap_or_default();
        if target != DECISION_TARGET {
            continue;
        }

        summary.decisions += 1;
        if let Some(branch) = payload
            .get("fields")
            .and_then(|fields| fields.get("branch"))
            .and_then(Value::as_str)
        {
            *summary.branch_counts.entry(branch.to_string()).or_default() += 1;
        }
    }

    Ok(summary)
}

/// Appends a branch table to an existing Markdown summary.
pub fn append_to_markdown(path: &Path, summary: &TelemetrySummary) -> Result<(), TelemetryError> {
    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|source| TelemetryError::Io {
            context: "opening summary for telemetry",
            source,
        })?;

    let mut text = format!(
        "\n## Decision branches\n\n{} engine decisions logged.\n\n| Branch | Count |\n|---|---:|\n",
        summary.decisions
    );
    for (branch, count) in &summary.branch_counts {
        text.push_str(&format!("| {branch} | {count} |\n"));
    }

    file.write_all(text.as_bytes())
        .map_err(|source| TelemetryError::Io {
            context: "writing telemetry section",
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_log_yields_empty_summary() {
        let dir = tempfile::tempdir().expect("temp dir");
        let summary = summarise_telemetry(&dir.path().join("absent.jsonl")).expect("summary");
        assert_eq!(summary, TelemetrySummary::default());
    }

    #[test]
    fn counts_decisions_by_branch() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("telemetry.jsonl");
        let lines = [
            r#"{"level":"DEBUG","fields":{"branch":"lead_trump","card":"AS"},"target":"trumpbot_bot::play"}"#,
            r#"{"level":"DEBUG","fields":{"branch":"follow_win","card":"9C"},"target":"trumpbot_bot::play"}"#,
            r#"{"level":"DEBUG","fields":{"branch":"lead_trump","card":"KS"},"target":"trumpbot_bot::play"}"#,
            r#"{"level":"INFO","fields":{"message":"hand complete"},"target":"trumpbot_bench::tournament"}"#,
            "",
        ];
        fs::write(&path, lines.join("\n")).expect("write log");

        let summary = summarise_telemetry(&path).expect("summary");
        assert_eq!(summary.decisions, 3);
        assert_eq!(summary.branch_counts.get("lead_trump"), Some(&2));
        assert_eq!(summary.branch_counts.get("follow_win"), Some(&1));
    }

    #[test]
    fn malformed_line_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("telemetry.jsonl");
        fs::write(&path, "not json\n").expect("write log");
        assert!(matches!(
            summarise_telemetry(&path),
            Err(TelemetryError::Json(_))
        ));
    }

    #[test]
    fn appends_branch_table() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("summary.md");
        fs::write(&path, "# Summary\n").expect("write summary");
        let mut summary = TelemetrySummary::default();
        summary.decisions = 2;
        summary.branch_counts.insert("follow_discard".to_string(), 2);

        append_to_markdown(&path, &summary).expect("append");
        let text = fs::read_to_string(&path).expect("read back");
        assert!(text.starts_with("# Summary\n"));
        assert!(text.contains("| follow_discard | 2 |"));
    }
}
