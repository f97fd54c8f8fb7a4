//! Contrast runtime-agent log parser.
//!
//! The agent writes a hybrid log: free-text diagnostic lines interleaved
//! with one raw JSON object per detected finding. Finding records start
//! with a literal `{"hash":` prefix; request dispatch lines carry a
//! `DEBUG - >>> [URL` token whose timestamps bound the scan duration.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::Context;
use chrono::NaiveTime;
use serde::Deserialize;

use crate::config::BenchConfig;
use crate::errors::ExtractError;
use crate::models::scan::{ScanResults, TestResult, ToolType};
use crate::parsers::{cwe, LogParser};

const FINDING_PREFIX: &str = "{\"hash\":";
const VERSION_BANNER: &str = "Agent Version:";
const VERSION_TOKEN: &str = "Version:";
const REQUEST_MARKER: &str = "DEBUG - >>> [URL";

/// Rules whose findings legitimately arrive without a request attached;
/// extraction failures on them are expected and stay quiet.
const BENIGN_FAILURES: [&str; 2] = [
    "\"ruleId\":\"crypto-bad-mac\"",
    "\"ruleId\":\"crypto-weak-randomness\"",
];

/// Parser for Contrast agent scan logs.
#[derive(Debug, Default)]
pub struct ContrastParser {
    config: BenchConfig,
}

impl ContrastParser {
    pub fn new(config: BenchConfig) -> Self {
        Self { config }
    }

    /// Parse a scan log from disk.
    ///
    /// Failing to open the file is the only error that reaches the
    /// caller; everything inside the pass recovers per line.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> anyhow::Result<ScanResults> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open scan log {}", path.display()))?;
        self.parse(&mut BufReader::new(file))
    }

    /// Pull one normalized result out of a JSON finding line.
    ///
    /// `Ok(None)` means the record was deliberately dropped: either the
    /// request uri does not belong to a benchmark test case, or its
    /// rule class is untracked.
    fn extract_finding(&self, line: &str) -> Result<Option<TestResult>, ExtractError> {
        let raw: RawFinding = serde_json::from_str(line)?;
        let cwe = cwe::cwe_lookup(&raw.rule_id);

        let uri = raw
            .request
            .and_then(|r| r.uri)
            .ok_or(ExtractError::MissingRequest)?;

        let token = self.config.test_case_name.as_str();
        if !uri.contains(token) {
            return Ok(None);
        }

        // The test number sits directly after the token in the final
        // path segment: `.../BenchmarkTest00042` -> 42.
        let start = uri.rfind('/').map_or(0, |idx| idx + 1) + token.len();
        let digits = uri
            .get(start..)
            .ok_or_else(|| ExtractError::UriTooShort { uri: uri.clone() })?;
        let number = digits.parse::<u32>().map_err(|source| ExtractError::TestNumber {
            uri: uri.clone(),
            source,
        })?;

        if cwe == 0 {
            return Ok(None);
        }
        Ok(Some(TestResult {
            number,
            cwe,
            category: raw.rule_id,
        }))
    }
}

impl LogParser for ContrastParser {
    fn parse(&self, input: &mut dyn BufRead) -> anyhow::Result<ScanResults> {
        let mut results = ScanResults::new(self.tool_name(), true, self.tool_type());

        let first_marker = self.config.first_request_marker();
        let mut first_line: Option<String> = None;
        let mut last_line: Option<String> = None;

        for line in input.lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    // lines() consumed through the newline, so the
                    // cursor still advances past the bad line.
                    tracing::error!(error = %err, "skipping unreadable log line");
                    continue;
                }
            };

            if line.starts_with(FINDING_PREFIX) {
                match self.extract_finding(&line) {
                    Ok(Some(result)) => results.add(result),
                    Ok(None) => {}
                    Err(_) if is_benign_failure(&line) => {}
                    Err(err) => {
                        tracing::error!(error = %err, record = %line, "Contrast results parse error");
                    }
                }
            } else if line.contains(VERSION_BANNER) {
                if let Some(pos) = line.find(VERSION_TOKEN) {
                    results.set_version(line[pos + VERSION_TOKEN.len()..].trim());
                }
            } else if line.contains(REQUEST_MARKER) && line.contains(&first_marker) {
                // Only the first occurrence bounds the start of the scan;
                // a concatenated log does not reset it.
                if first_line.is_none() {
                    first_line = Some(line);
                }
            } else if line.contains(REQUEST_MARKER) {
                last_line = Some(line);
            }
        }

        if let Some(duration) = calculate_time(first_line.as_deref(), last_line.as_deref()) {
            results.set_duration(duration);
        }
        Ok(results)
    }

    fn tool_name(&self) -> &str {
        "Contrast"
    }

    fn tool_type(&self) -> ToolType {
        ToolType::Iast
    }
}

/// The subset of a Contrast finding record the extractor needs.
///
/// `request` stays optional at the serde layer so the rule id is
/// classified before a missing request is reported.
#[derive(Debug, Deserialize)]
struct RawFinding {
    #[serde(rename = "ruleId")]
    rule_id: String,
    request: Option<RawRequest>,
}

#[derive(Debug, Deserialize)]
struct RawRequest {
    uri: Option<String>,
}

fn is_benign_failure(line: &str) -> bool {
    BENIGN_FAILURES.iter().any(|rule| line.contains(rule))
}

/// Elapsed scan time from the first and last request marker lines.
///
/// Field 1 of each marker line is an `HH:mm:ss,SSS` time of day. The
/// log carries no date component, so a scan crossing midnight
/// underflows.
fn calculate_time(first: Option<&str>, last: Option<&str>) -> Option<String> {
    let start = marker_time(first?)?;
    let stop = marker_time(last?)?;
    let seconds = (stop - start).num_seconds();
    Some(format!("{seconds} seconds"))
}

fn marker_time(line: &str) -> Option<NaiveTime> {
    let token = line.split(' ').nth(1)?;
    NaiveTime::parse_from_str(token, "%H:%M:%S,%3f").ok()
}
