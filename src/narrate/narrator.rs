//! Narration helpers: build the prompt, dispatch it, trim the reply.

use super::client::ChatClient;
use super::prompt::{
    build_explanation_prompt, build_summary_prompt, EXPLANATION_SYSTEM_PROMPT,
    SUMMARY_SYSTEM_PROMPT,
};
use super::NarrateError;
use crate::matching::Candidate;
use crate::record::PatientProfile;

/// One-paragraph explanation of why the patient matched this trial.
pub fn explain_match(
    client: &dyn ChatClient,
    patient: &PatientProfile,
    candidate: &Candidate,
) -> Result<String, NarrateError> {
    tracing::debug!(
        nct_number = %candidate.trial.nct_number,
        "Requesting match explanation"
    );
    let prompt = build_explanation_prompt(patient, candidate);
    let reply = client.complete(EXPLANATION_SYSTEM_PROMPT, &prompt)?;
    Ok(reply.trim().to_string())
}

/// Prose summary of the patient's history.
pub fn summarize_history(
    client: &dyn ChatClient,
    patient: &PatientProfile,
) -> Result<String, NarrateError> {
    tracing::debug!(patient_id = %patient.patient_id, "Requesting history summary");
    let prompt = build_summary_prompt(patient);
    let reply = client.complete(SUMMARY_SYSTEM_PROMPT, &prompt)?;
    Ok(reply.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::CONDITION_CRITERIA_MET;
    use crate::narrate::client::MockChatClient;
    use crate::record::{Age, Gender};
    use crate::registry::TrialRecord;

    fn patient() -> PatientProfile {
        PatientProfile {
            patient_id: "P-0042".into(),
            age: Age::Known(24),
            gender: Gender::Female,
            conditions: vec!["Tamoxifen".into()],
            medications: vec!["Tamoxifen".into()],
        }
    }

    #[test]
    fn explanation_is_whitespace_trimmed() {
        let client = MockChatClient::new("  The patient takes Tamoxifen.  \n");
        let trial = TrialRecord {
            study_title: "Study".into(),
            nct_number: "NCT1".into(),
            status: "Recruiting".into(),
            conditions: "Tamoxifen protocol".into(),
        };
        let candidate = Candidate {
            trial: &trial,
            criteria_met: vec![CONDITION_CRITERIA_MET.to_string()],
        };
        let text = explain_match(&client, &patient(), &candidate).unwrap();
        assert_eq!(text, "The patient takes Tamoxifen.");
        assert_eq!(client.calls(), 1);
    }

    #[test]
    fn summary_is_whitespace_trimmed() {
        let client = MockChatClient::new("\nA 24 year old female on Tamoxifen.\n");
        let text = summarize_history(&client, &patient()).unwrap();
        assert_eq!(text, "A 24 year old female on Tamoxifen.");
    }
}
