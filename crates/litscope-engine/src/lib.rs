// Engine layer - filtering, ordering, pagination and frequency analysis
// Everything here is a pure function over a materialized record slice

pub mod filter;
pub mod frequency;
pub mod paginate;
pub mod query;
pub mod sort;
pub mod stats;

pub use filter::{PaperFilter, YearRange};
pub use frequency::{TermField, TermFrequency, top_journals, top_n};
pub use paginate::{Page, paginate};
pub use query::{DEFAULT_PAGE_SIZE, PAGE_SIZE_CHOICES, PaperQuery, run_query};
pub use sort::{ParseSortKeyError, SortKey, sort_records};
pub use stats::{LibraryStats, YearStrategyCount, compute_statistics, year_strategy_breakdown};
