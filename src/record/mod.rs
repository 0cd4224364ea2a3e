pub mod cda;
pub mod types;

pub use cda::*;
pub use types::*;

use thiserror::Error;

/// Failures while loading the patient record.
///
/// Absent optional fields are not errors — they degrade to sentinels in the
/// profile. Only an unreadable or malformed document is fatal.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Cannot read record file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed record document: {0}")]
    Xml(#[from] roxmltree::Error),
}
