//! Patient-to-trial screening.
//!
//! The inclusion rule is deliberately thin: a trial is a candidate iff any of
//! the patient's condition strings occurs verbatim inside the trial's
//! free-text condition description. Case-sensitive, order-insensitive. The
//! exclusion check is a stub that admits everyone; real exclusion logic was
//! never part of this design and is not invented here.

use crate::record::PatientProfile;
use crate::registry::TrialRecord;

/// The single criterion recorded for every retained trial.
pub const CONDITION_CRITERIA_MET: &str = "Condition criteria met";

/// A trial the patient screened into, with the criteria that admitted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub trial: &'a TrialRecord,
    /// Non-empty by construction; always exactly the condition criterion.
    pub criteria_met: Vec<String>,
}

/// Inclusion criteria the patient satisfies for one trial.
///
/// First matching condition short-circuits; the result records the fact that
/// a condition matched, not which one.
pub fn inclusion_criteria_met(patient: &PatientProfile, trial: &TrialRecord) -> Vec<String> {
    if patient
        .conditions
        .iter()
        .any(|cond| trial.conditions.contains(cond.as_str()))
    {
        vec![CONDITION_CRITERIA_MET.to_string()]
    } else {
        Vec::new()
    }
}

/// Exclusion check. Always passes: no exclusion rules exist in this design.
pub fn passes_exclusion(_patient: &PatientProfile, _trial: &TrialRecord) -> bool {
    true
}

/// Screen every trial against the patient, preserving listing order.
///
/// Pure and stateless: the same inputs screen to the same candidates every
/// time.
pub fn screen<'a>(patient: &PatientProfile, trials: &'a [TrialRecord]) -> Vec<Candidate<'a>> {
    let candidates: Vec<Candidate<'a>> = trials
        .iter()
        .filter_map(|trial| {
            let criteria_met = inclusion_criteria_met(patient, trial);
            if !criteria_met.is_empty() && passes_exclusion(patient, trial) {
                Some(Candidate {
                    trial,
                    criteria_met,
                })
            } else {
                None
            }
        })
        .collect();
    tracing::info!(
        reviewed = trials.len(),
        matched = candidates.len(),
        "Screened trials against patient conditions"
    );
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Age, Gender};

    fn patient(conditions: &[&str]) -> PatientProfile {
        let conditions: Vec<String> = conditions.iter().map(|c| c.to_string()).collect();
        PatientProfile {
            patient_id: "P-0042".into(),
            age: Age::Known(24),
            gender: Gender::Female,
            medications: conditions.clone(),
            conditions,
        }
    }

    fn trial(nct: &str, conditions: &str) -> TrialRecord {
        TrialRecord {
            study_title: format!("Study {nct}"),
            nct_number: nct.into(),
            status: "Recruiting".into(),
            conditions: conditions.into(),
        }
    }

    #[test]
    fn substring_match_admits_the_trial() {
        let p = patient(&["Tamoxifen"]);
        let t = trial("NCT1", "Breast Cancer, Tamoxifen protocol");
        assert_eq!(inclusion_criteria_met(&p, &t), vec![CONDITION_CRITERIA_MET]);
    }

    #[test]
    fn no_substring_means_no_criteria() {
        let p = patient(&["Tamoxifen"]);
        let t = trial("NCT2", "Diabetes");
        assert!(inclusion_criteria_met(&p, &t).is_empty());
    }

    #[test]
    fn matching_is_case_sensitive() {
        let p = patient(&["tamoxifen"]);
        let t = trial("NCT1", "Breast Cancer, Tamoxifen protocol");
        assert!(inclusion_criteria_met(&p, &t).is_empty());
    }

    #[test]
    fn any_condition_suffices() {
        let p = patient(&["Metformin", "Tamoxifen"]);
        let t = trial("NCT1", "Tamoxifen protocol");
        assert_eq!(inclusion_criteria_met(&p, &t), vec![CONDITION_CRITERIA_MET]);
    }

    #[test]
    fn exclusion_always_passes() {
        let p = patient(&[]);
        let t = trial("NCT1", "Anything at all");
        assert!(passes_exclusion(&p, &t));
    }

    #[test]
    fn screening_keeps_listing_order() {
        let p = patient(&["Tamoxifen", "Metformin"]);
        let trials = vec![
            trial("NCT1", "Metformin response"),
            trial("NCT2", "Diabetes"),
            trial("NCT3", "Tamoxifen protocol"),
        ];
        let matched = screen(&p, &trials);
        let ids: Vec<&str> = matched.iter().map(|c| c.trial.nct_number.as_str()).collect();
        assert_eq!(ids, vec!["NCT1", "NCT3"]);
    }

    #[test]
    fn tamoxifen_scenario_matches_exactly_one_trial() {
        let p = patient(&["Tamoxifen"]);
        let trials = vec![
            trial("NCT1", "Breast Cancer, Tamoxifen protocol"),
            trial("NCT2", "Diabetes"),
        ];
        let matched = screen(&p, &trials);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].trial.nct_number, "NCT1");
        assert_eq!(matched[0].criteria_met, vec![CONDITION_CRITERIA_MET]);
    }

    #[test]
    fn patient_without_conditions_matches_nothing() {
        let p = patient(&[]);
        let trials = vec![trial("NCT1", "Breast Cancer"), trial("NCT2", "Diabetes")];
        assert!(screen(&p, &trials).is_empty());
    }

    #[test]
    fn screening_is_idempotent() {
        let p = patient(&["Tamoxifen"]);
        let trials = vec![
            trial("NCT1", "Tamoxifen protocol"),
            trial("NCT2", "Diabetes"),
        ];
        let first = screen(&p, &trials);
        let second = screen(&p, &trials);
        assert_eq!(first, second);
    }
}
