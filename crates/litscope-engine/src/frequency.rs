use litscope_types::PaperRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Multi-valued record field to count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermField {
    Keywords,
    MeshTerms,
}

impl TermField {
    fn terms<'a>(&self, paper: &'a PaperRecord) -> &'a [String] {
        match self {
            TermField::Keywords => &paper.keywords,
            TermField::MeshTerms => &paper.mesh_terms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermFrequency {
    pub term: String,
    pub count: usize,
}

/// Most frequent entries of `field` across `papers`, at most `n`.
///
/// Terms are compared exactly (no case folding). Descending count; ties keep
/// first-occurrence order of the flattened term sequence.
pub fn top_n(papers: &[PaperRecord], field: TermField, n: usize) -> Vec<TermFrequency> {
    rank(
        papers
            .iter()
            .flat_map(|p| field.terms(p).iter().map(String::as_str)),
        n,
    )
}

/// Most frequent non-empty journal names, ranked like [`top_n`].
pub fn top_journals(papers: &[PaperRecord], n: usize) -> Vec<TermFrequency> {
    rank(
        papers
            .iter()
            .map(|p| p.journal.as_str())
            .filter(|j| !j.is_empty()),
        n,
    )
}

fn rank<'a>(terms: impl Iterator<Item = &'a str>, n: usize) -> Vec<TermFrequency> {
    // term -> (count, first position)
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();

    for (position, term) in terms.enumerate() {
        counts.entry(term).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> = counts
        .into_iter()
        .map(|(term, (count, first))| (term, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked
        .into_iter()
        .take(n)
        .map(|(term, count, _)| TermFrequency {
            term: term.to_string(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use litscope_testing::fixtures::{PaperBuilder, sample_corpus};

    fn terms(freqs: &[TermFrequency]) -> Vec<(&str, usize)> {
        freqs.iter().map(|f| (f.term.as_str(), f.count)).collect()
    }

    #[test]
    fn test_ties_keep_first_occurrence() {
        let papers = vec![
            PaperBuilder::new("1").keywords(&["sleep", "tau"]).build(),
            PaperBuilder::new("2").keywords(&["amyloid", "tau"]).build(),
            PaperBuilder::new("3").keywords(&["amyloid", "sleep"]).build(),
        ];

        let top = top_n(&papers, TermField::Keywords, 10);
        assert_eq!(
            terms(&top),
            vec![("sleep", 2), ("tau", 2), ("amyloid", 2)]
        );
    }

    #[test]
    fn test_top_n_truncates() {
        let top = top_n(&sample_corpus(), TermField::Keywords, 1);
        assert_eq!(terms(&top), vec![("circadian", 3)]);

        assert!(top_n(&sample_corpus(), TermField::Keywords, 0).is_empty());
    }

    #[test]
    fn test_terms_are_case_sensitive() {
        let top = top_n(&sample_corpus(), TermField::Keywords, 50);
        let circadian_rhythm = top.iter().find(|f| f.term == "Circadian Rhythm");
        assert_eq!(circadian_rhythm.map(|f| f.count), Some(1));
    }

    #[test]
    fn test_mesh_terms() {
        let top = top_n(&sample_corpus(), TermField::MeshTerms, 2);
        assert_eq!(
            terms(&top),
            vec![("ARNTL Transcription Factors", 2), ("Alzheimer Disease", 2)]
        );
    }

    #[test]
    fn test_top_journals_skip_empty() {
        let top = top_journals(&sample_corpus(), 10);
        assert_eq!(
            terms(&top),
            vec![("Neuron", 2), ("Cell", 2), ("Nature Neuroscience", 1)]
        );
    }
}
