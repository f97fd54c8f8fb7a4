//! Scan result accumulator keyed by benchmark test case.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Kind of analysis the source tool performs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToolType {
    Sast,
    Dast,
    Iast,
}

/// One normalized finding attributed to a benchmark test case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestResult {
    pub number: u32,
    pub cwe: u32,
    /// Raw rule id from the source tool, kept for traceability.
    pub category: String,
}

/// Accumulated results of one scan.
///
/// Findings are keyed by test case number; duplicates for the same test
/// number coexist, collapsing them is the aggregator's concern.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResults {
    tool: String,
    interactive: bool,
    tool_type: ToolType,
    version: Option<String>,
    duration: Option<String>,
    results: BTreeMap<u32, Vec<TestResult>>,
}

impl ScanResults {
    pub fn new(tool: impl Into<String>, interactive: bool, tool_type: ToolType) -> Self {
        Self {
            tool: tool.into(),
            interactive,
            tool_type,
            version: None,
            duration: None,
            results: BTreeMap::new(),
        }
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// Whether the tool observes the application at runtime rather than
    /// analyzing artifacts offline.
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn tool_type(&self) -> ToolType {
        self.tool_type
    }

    pub fn set_version(&mut self, version: impl Into<String>) {
        self.version = Some(version.into());
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn set_duration(&mut self, duration: impl Into<String>) {
        self.duration = Some(duration.into());
    }

    pub fn duration(&self) -> Option<&str> {
        self.duration.as_deref()
    }

    pub fn add(&mut self, result: TestResult) {
        self.results.entry(result.number).or_default().push(result);
    }

    /// Findings recorded for one test case, in insertion order.
    pub fn results_for(&self, number: u32) -> &[TestResult] {
        self.results.get(&number).map_or(&[], Vec::as_slice)
    }

    /// All recorded findings, in test-number order.
    pub fn iter(&self) -> impl Iterator<Item = &TestResult> {
        self.results.values().flatten()
    }

    /// Total number of recorded findings.
    pub fn total(&self) -> usize {
        self.results.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
