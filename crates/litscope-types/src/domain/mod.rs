mod config;
mod history;
mod paper;
mod search;

pub use config::{ConfigUpdate, PubMedConfig};
pub use history::{MAX_HISTORY_ENTRIES, SearchHistoryEntry, format_success_rate};
pub use paper::{MAX_AUTHORS, PaperRecord, UNKNOWN_YEAR, pubmed_url};
pub use search::{SearchOutcome, SearchParams};
