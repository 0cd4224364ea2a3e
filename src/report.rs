//! Output artifacts: the JSON document and the spreadsheet.
//!
//! Field names in both artifacts are the camelCase keys downstream consumers
//! already read (`patientId`, `trialId`, …); the Rust structs keep snake_case
//! and serde does the renaming.

use std::fs;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;
use serde::Serialize;
use thiserror::Error;

/// File name of the JSON artifact inside the output directory.
pub const JSON_FILE_NAME: &str = "matched_trials.json";

/// Column headers of the spreadsheet, in order.
const WORKBOOK_HEADERS: [&str; 4] = ["trialId", "trialName", "eligibilityCriteriaMet", "explanation"];

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Cannot write artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cannot write workbook: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
}

/// One matched trial as it appears in both artifacts.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MatchedTrial {
    pub trial_id: String,
    pub trial_name: String,
    pub eligibility_criteria_met: Vec<String>,
    pub explanation: String,
}

/// The full run result: one patient, their eligible trials in listing order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    pub patient_id: String,
    pub eligible_trials: Vec<MatchedTrial>,
}

/// Write the pretty-printed JSON artifact; returns its path.
pub fn write_json(report: &MatchReport, out_dir: &Path) -> Result<PathBuf, ReportError> {
    let path = out_dir.join(JSON_FILE_NAME);
    let json = serde_json::to_string_pretty(report)?;
    fs::write(&path, json)?;
    tracing::info!(path = %path.display(), "Wrote JSON artifact");
    Ok(path)
}

/// Write the spreadsheet artifact (`<patientId>_matched_trials.xlsx`); returns
/// its path. The criteria list is joined into one cell.
pub fn write_workbook(report: &MatchReport, out_dir: &Path) -> Result<PathBuf, ReportError> {
    let path = out_dir.join(format!("{}_matched_trials.xlsx", report.patient_id));

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in WORKBOOK_HEADERS.iter().enumerate() {
        sheet.write(0, col as u16, *header)?;
    }
    for (row, matched) in report.eligible_trials.iter().enumerate() {
        let row = (row + 1) as u32;
        sheet.write(row, 0, &matched.trial_id)?;
        sheet.write(row, 1, &matched.trial_name)?;
        sheet.write(row, 2, matched.eligibility_criteria_met.join("; "))?;
        sheet.write(row, 3, &matched.explanation)?;
    }
    workbook.save(&path)?;

    tracing::info!(path = %path.display(), "Wrote spreadsheet artifact");
    Ok(path)
}
