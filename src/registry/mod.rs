pub mod browser;
pub mod listing;
pub mod types;

pub use browser::*;
pub use listing::*;
pub use types::*;

use thiserror::Error;

/// Failures while retrieving the trial listing.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Browser session failed: {0}")]
    Browser(String),

    #[error("Invalid registry URL: {0}")]
    InvalidUrl(String),

    #[error("Listing row {row} has {found} cells, expected at least 5")]
    MalformedRow { row: usize, found: usize },
}
