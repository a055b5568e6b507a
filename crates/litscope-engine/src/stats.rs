use litscope_types::PaperRecord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Library-wide counts, recomputed on every call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryStats {
    pub total_papers: usize,
    /// Papers per known year; empty and `"Unknown"` years are excluded.
    pub by_year: BTreeMap<String, usize>,
    pub by_strategy: BTreeMap<String, usize>,
    pub with_abstract: usize,
    /// Distinct non-empty journal names.
    pub unique_journals: usize,
}

impl LibraryStats {
    /// Smallest and largest numeric year in `by_year`.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let mut years = self.by_year.keys().filter_map(|y| y.parse::<i32>().ok());
        let first = years.next()?;
        Some(years.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y))))
    }

    pub fn strategies(&self) -> Vec<&str> {
        self.by_strategy.keys().map(String::as_str).collect()
    }

    /// Share of papers with an abstract, in percent.
    pub fn abstract_coverage(&self) -> f64 {
        if self.total_papers == 0 {
            0.0
        } else {
            self.with_abstract as f64 / self.total_papers as f64 * 100.0
        }
    }
}

pub fn compute_statistics(papers: &[PaperRecord]) -> LibraryStats {
    let mut by_year = BTreeMap::new();
    let mut by_strategy = BTreeMap::new();
    let mut journals = BTreeSet::new();
    let mut with_abstract = 0;

    for paper in papers {
        if let Some(year) = paper.known_year() {
            *by_year.entry(year.to_string()).or_insert(0) += 1;
        }

        *by_strategy
            .entry(paper.search_strategy.clone())
            .or_insert(0) += 1;

        if paper.has_abstract {
            with_abstract += 1;
        }

        if !paper.journal.is_empty() {
            journals.insert(paper.journal.as_str());
        }
    }

    LibraryStats {
        total_papers: papers.len(),
        by_year,
        by_strategy,
        with_abstract,
        unique_journals: journals.len(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearStrategyCount {
    pub year: String,
    pub strategy: String,
    pub count: usize,
}

/// Papers per `(year, strategy)`, ordered by year then strategy.
///
/// Unknown years are excluded, matching `by_year`.
pub fn year_strategy_breakdown(papers: &[PaperRecord]) -> Vec<YearStrategyCount> {
    let mut counts: BTreeMap<(&str, &str), usize> = BTreeMap::new();

    for paper in papers {
        if let Some(year) = paper.known_year() {
            *counts
                .entry((year, paper.search_strategy.as_str()))
                .or_insert(0) += 1;
        }
    }

    counts
        .into_iter()
        .map(|((year, strategy), count)| YearStrategyCount {
            year: year.to_string(),
            strategy: strategy.to_string(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use litscope_testing::fixtures::{PaperBuilder, sample_corpus};

    #[test]
    fn test_empty_input() {
        let stats = compute_statistics(&[]);

        assert_eq!(stats, LibraryStats::default());
        assert_eq!(stats.year_span(), None);
        assert_eq!(stats.abstract_coverage(), 0.0);
        assert!(year_strategy_breakdown(&[]).is_empty());
    }

    #[test]
    fn test_sample_corpus_counts() {
        let stats = compute_statistics(&sample_corpus());

        assert_eq!(stats.total_papers, 6);
        assert_eq!(stats.with_abstract, 4);
        assert_eq!(stats.unique_journals, 3);
        assert_eq!(stats.by_strategy["BMAL1 AND Alzheimer"], 4);
        assert_eq!(stats.by_strategy["BMAL1 AND astrocyte"], 2);
        assert_eq!(
            stats.strategies(),
            vec!["BMAL1 AND Alzheimer", "BMAL1 AND astrocyte"]
        );
        assert_eq!(stats.year_span(), Some((2020, 2021)));
    }

    #[test]
    fn test_empty_year_is_not_counted() {
        let papers = vec![
            PaperBuilder::new("1").year("").build(),
            PaperBuilder::new("2").year("1999").build(),
        ];
        let stats = compute_statistics(&papers);

        assert_eq!(stats.by_year.len(), 1);
        assert_eq!(stats.by_year["1999"], 1);
    }

    #[test]
    fn test_breakdown_orders_by_year_then_strategy() {
        let breakdown = year_strategy_breakdown(&sample_corpus());
        let rows: Vec<(&str, &str, usize)> = breakdown
            .iter()
            .map(|r| (r.year.as_str(), r.strategy.as_str(), r.count))
            .collect();

        assert_eq!(
            rows,
            vec![
                ("2020", "BMAL1 AND Alzheimer", 2),
                ("2020", "BMAL1 AND astrocyte", 1),
                ("2021", "BMAL1 AND Alzheimer", 1),
                ("2021", "BMAL1 AND astrocyte", 1),
            ]
        );
    }
}
