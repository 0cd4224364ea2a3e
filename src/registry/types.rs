use super::RegistryError;

/// One study row from the registry's search results table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialRecord {
    pub study_title: String,
    /// External identifier assigned to the registered trial.
    pub nct_number: String,
    /// Recruitment status as listed, free text (e.g. "Recruiting").
    pub status: String,
    /// Free-text condition description — a single string, not a list.
    pub conditions: String,
}

/// Source of currently recruiting trials for a condition term.
///
/// Behind a trait so the pipeline can run against canned listings instead of
/// a live browser session.
pub trait TrialSource {
    fn fetch_recruiting(&self, condition: &str) -> Result<Vec<TrialRecord>, RegistryError>;
}
