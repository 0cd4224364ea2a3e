//! Matching pipeline orchestrator.
//!
//! Single entry point that drives the full run:
//! load record → fetch trials → screen → narrate each match → summarize →
//! write artifacts.
//!
//! Both external surfaces sit behind traits (`TrialSource`, `ChatClient`) so
//! the whole pipeline runs against canned listings and responses in tests.
//! Execution is strictly sequential and fail-fast: the first stage error
//! aborts the run, including the remaining narration batch.

use std::path::{Path, PathBuf};

use crate::matching::screen;
use crate::narrate::{explain_match, summarize_history, ChatClient, NarrateError};
use crate::record::{load_patient, RecordError};
use crate::registry::{RegistryError, TrialSource};
use crate::report::{write_json, write_workbook, MatchReport, MatchedTrial, ReportError};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Record loading failed: {0}")]
    Record(#[from] RecordError),

    #[error("Trial retrieval failed: {0}")]
    Registry(#[from] RegistryError),

    #[error("Narration failed: {0}")]
    Narrate(#[from] NarrateError),

    #[error("Artifact writing failed: {0}")]
    Report(#[from] ReportError),
}

/// Everything a run produced, for the binary to print and log.
#[derive(Debug)]
pub struct RunOutcome {
    pub report: MatchReport,
    /// None when the trial source returned nothing: with no trials there is
    /// nothing to review and no chat round trip is made at all.
    pub history_summary: Option<String>,
    /// How many trials the source returned before screening.
    pub trials_reviewed: usize,
    pub json_path: PathBuf,
    pub workbook_path: PathBuf,
}

/// Orchestrates one end-to-end matching run.
pub struct MatchPipeline {
    trial_source: Box<dyn TrialSource + Send + Sync>,
    chat_client: Box<dyn ChatClient + Send + Sync>,
}

impl MatchPipeline {
    pub fn new(
        trial_source: Box<dyn TrialSource + Send + Sync>,
        chat_client: Box<dyn ChatClient + Send + Sync>,
    ) -> Self {
        Self {
            trial_source,
            chat_client,
        }
    }

    /// Run the full pipeline for one patient record and one condition term.
    ///
    /// Matches are narrated and emitted in the order the trial source listed
    /// them.
    pub fn run(
        &self,
        record_path: &Path,
        condition: &str,
        out_dir: &Path,
    ) -> Result<RunOutcome, PipelineError> {
        // Stage 1: load the patient profile.
        let patient = load_patient(record_path)?;

        // Stage 2: fetch currently recruiting trials.
        let trials = self.trial_source.fetch_recruiting(condition)?;

        // Stage 3: screen, keeping listing order.
        let candidates = screen(&patient, &trials);

        // Stage 4: one explanation round trip per match, fail-fast.
        let mut eligible_trials = Vec::with_capacity(candidates.len());
        for candidate in &candidates {
            let explanation = explain_match(self.chat_client.as_ref(), &patient, candidate)?;
            eligible_trials.push(MatchedTrial {
                trial_id: candidate.trial.nct_number.clone(),
                trial_name: candidate.trial.study_title.clone(),
                eligibility_criteria_met: candidate.criteria_met.clone(),
                explanation,
            });
        }

        // Stage 5: history summary, skipped when nothing was listed.
        let history_summary = if trials.is_empty() {
            tracing::info!("Trial source listed nothing; skipping history summary");
            None
        } else {
            Some(summarize_history(self.chat_client.as_ref(), &patient)?)
        };

        // Stage 6: artifacts.
        let report = MatchReport {
            patient_id: patient.patient_id.clone(),
            eligible_trials,
        };
        let json_path = write_json(&report, out_dir)?;
        let workbook_path = write_workbook(&report, out_dir)?;

        tracing::info!(
            patient_id = %report.patient_id,
            reviewed = trials.len(),
            matched = report.eligible_trials.len(),
            "Pipeline run complete"
        );

        Ok(RunOutcome {
            report,
            history_summary,
            trials_reviewed: trials.len(),
            json_path,
            workbook_path,
        })
    }
}
