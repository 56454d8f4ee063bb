//! Machine-readable workflow results

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use elearn_harness::HarnessResult;

/// Outcome of one workflow run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowReport {
    pub name: String,
    pub success: bool,
    pub duration_ms: u64,
    pub error: Option<String>,
}

/// Outcome of everything the runner executed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub reports: Vec<WorkflowReport>,
}

impl SuiteReport {
    pub fn from_reports(reports: Vec<WorkflowReport>, duration_ms: u64) -> Self {
        let passed = reports.iter().filter(|r| r.success).count();
        Self {
            total: reports.len(),
            passed,
            failed: reports.len() - passed,
            duration_ms,
            reports,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Write the suite report as pretty JSON under the output directory.
pub fn write_report(output_dir: &Path, report: &SuiteReport) -> HarnessResult<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join("test-results.json");
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(&path, json)?;
    info!(path = %path.display(), "results written");
    Ok(path)
}
