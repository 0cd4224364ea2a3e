pub mod config;
pub mod matching;
pub mod narrate;
pub mod pipeline;
pub mod record;
pub mod registry;
pub mod report;
