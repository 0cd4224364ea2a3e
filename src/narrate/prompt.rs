//! Prompt texts sent to the text-generation service.
//!
//! The prompts are deterministic given the inputs; only the service's reply
//! is not.

use crate::matching::Candidate;
use crate::record::PatientProfile;

/// System role for match explanations.
pub const EXPLANATION_SYSTEM_PROMPT: &str = "You are an expert clinical trial assistant.";

/// System role for the patient-history summary.
pub const SUMMARY_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Build the user prompt asking why this patient matched this trial.
pub fn build_explanation_prompt(patient: &PatientProfile, candidate: &Candidate) -> String {
    let trial = candidate.trial;
    let patient_info = format!(
        "Patient age: {}, Gender: {}, Conditions: {}",
        patient.age,
        patient.gender,
        patient.conditions.join(", ")
    );
    let trial_info = format!(
        "Trial Name: {}, NCT Number: {}, Conditions: {}",
        trial.study_title, trial.nct_number, trial.conditions
    );
    format!(
        "Explain why this patient is matched to the trial based on the inclusion criteria met.\n\n\
         Patient Info: {patient_info}\n\n\
         Trial Info: {trial_info}\n\n\
         Inclusion Criteria Met: {}",
        candidate.criteria_met.join(", ")
    )
}

/// Build the user prompt asking for a prose summary of the patient history.
pub fn build_summary_prompt(patient: &PatientProfile) -> String {
    format!(
        "Summarize the following patient history: Patient is a {} year old {}. \
         Conditions: {}. Medications: {}.",
        patient.age,
        patient.gender,
        patient.conditions.join(", "),
        patient.medications.join(", ")
    )
}
