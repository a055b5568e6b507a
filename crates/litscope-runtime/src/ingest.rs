use litscope_index::{Database, SearchAuditRecord};
use litscope_types::{PaperRecord, SearchOutcome, SearchParams};

use crate::Result;
use crate::config::ConfigManager;

/// The external literature search client.
pub trait LiteratureSearch {
    fn execute_search(&self, params: &SearchParams) -> Result<SearchOutcome>;
}

#[derive(Debug, Clone)]
pub enum IngestProgress {
    Searching {
        name: String,
    },
    Fetched {
        total_count: u64,
        fetched_count: u64,
    },
    Stored {
        papers: usize,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct IngestReport {
    pub success: bool,
    pub total_count: u64,
    pub fetched_count: u64,
    /// Records written to the store.
    pub stored: usize,
    /// Row id of the store's audit entry, when the search succeeded.
    pub audit_id: Option<i64>,
    pub error: Option<String>,
}

/// Runs one search and records its outcome in the store and the config history.
pub struct IngestService<'a, S: LiteratureSearch> {
    db: &'a Database,
    config: &'a mut ConfigManager,
    search: &'a S,
}

impl<'a, S: LiteratureSearch> IngestService<'a, S> {
    pub fn new(db: &'a Database, config: &'a mut ConfigManager, search: &'a S) -> Self {
        Self { db, config, search }
    }

    /// A search that fails, or whose client errors, is still added to the
    /// config history but leaves the store untouched. Only storage and
    /// persistence failures are returned as errors.
    pub fn run<F>(&mut self, params: &SearchParams, mut on_progress: F) -> Result<IngestReport>
    where
        F: FnMut(IngestProgress),
    {
        on_progress(IngestProgress::Searching {
            name: params.name.clone(),
        });

        let outcome = match self.search.execute_search(params) {
            Ok(outcome) => outcome,
            Err(err) => SearchOutcome::failed(err.to_string()),
        };

        if !outcome.success {
            let error = outcome
                .error
                .clone()
                .unwrap_or_else(|| "search reported failure".to_string());
            tracing::warn!("Search '{}' failed: {}", params.name, error);
            on_progress(IngestProgress::Failed {
                error: error.clone(),
            });

            self.config.record_search(
                params.clone(),
                outcome.total_count,
                outcome.fetched_count,
            )?;

            return Ok(IngestReport {
                success: false,
                total_count: outcome.total_count,
                fetched_count: outcome.fetched_count,
                stored: 0,
                audit_id: None,
                error: Some(error),
            });
        }

        on_progress(IngestProgress::Fetched {
            total_count: outcome.total_count,
            fetched_count: outcome.fetched_count,
        });

        let papers: Vec<PaperRecord> = outcome
            .papers
            .into_iter()
            .map(|mut paper| {
                paper.normalize();
                paper
            })
            .collect();
        let stored = self.db.insert_many(&papers)?;

        let audit = SearchAuditRecord::new(
            params.name.clone(),
            params.query.clone(),
            to_i64(outcome.total_count),
            to_i64(outcome.fetched_count),
            chrono::Local::now().to_rfc3339(),
        );
        let audit_id = self.db.record_search(&audit)?;

        self.config
            .record_search(params.clone(), outcome.total_count, outcome.fetched_count)?;

        tracing::info!(
            "Search '{}' stored {} of {} results",
            params.name,
            stored,
            outcome.total_count
        );
        on_progress(IngestProgress::Stored { papers: stored });

        Ok(IngestReport {
            success: true,
            total_count: outcome.total_count,
            fetched_count: outcome.fetched_count,
            stored,
            audit_id: Some(audit_id),
            error: None,
        })
    }
}

fn to_i64(count: u64) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}
