//! Fixtures for sample paper records.
//!
//! Provides utilities to:
//! - Build individual records field by field
//! - Generate numbered records for pagination tests
//! - Produce a small, realistic corpus with known statistics

use litscope_types::{PaperRecord, UNKNOWN_YEAR};

/// Fixed fetch timestamp so records compare equal across runs.
pub const FIXTURE_FETCH_DATE: &str = "2025-11-10T10:00:00";

/// Fluent builder for [`PaperRecord`].
pub struct PaperBuilder {
    paper: PaperRecord,
}

impl PaperBuilder {
    pub fn new(pmid: impl Into<String>) -> Self {
        let pmid = pmid.into();
        let mut paper = PaperRecord::new(pmid.clone(), format!("Paper {}", pmid));
        paper.fetch_date = FIXTURE_FETCH_DATE.to_string();
        Self { paper }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.paper.title = title.to_string();
        self
    }

    /// Sets the abstract and marks the record as having one.
    pub fn abstract_text(mut self, text: &str) -> Self {
        self.paper.abstract_text = Some(text.to_string());
        self.paper.has_abstract = true;
        self
    }

    pub fn journal(mut self, journal: &str) -> Self {
        self.paper.journal = journal.to_string();
        self
    }

    /// Sets `pub_year` and a matching `pub_date`.
    pub fn year(mut self, year: &str) -> Self {
        self.paper.pub_year = year.to_string();
        self.paper.pub_date = year.to_string();
        self
    }

    pub fn authors(mut self, authors: &[&str]) -> Self {
        self.paper.authors = to_strings(authors);
        self
    }

    pub fn keywords(mut self, keywords: &[&str]) -> Self {
        self.paper.keywords = to_strings(keywords);
        self
    }

    pub fn mesh_terms(mut self, terms: &[&str]) -> Self {
        self.paper.mesh_terms = to_strings(terms);
        self
    }

    pub fn doi(mut self, doi: &str) -> Self {
        self.paper.doi = Some(doi.to_string());
        self
    }

    pub fn strategy(mut self, strategy: &str) -> Self {
        self.paper.search_strategy = strategy.to_string();
        self
    }

    pub fn build(self) -> PaperRecord {
        self.paper
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// `count` records with pmids `1..=count`, all in one strategy.
pub fn numbered_papers(count: usize) -> Vec<PaperRecord> {
    (1..=count)
        .map(|i| {
            PaperBuilder::new(i.to_string())
                .title(&format!("Numbered paper {:03}", i))
                .year("2022")
                .strategy("numbered")
                .build()
        })
        .collect()
}

/// Six records across two strategies.
///
/// Years: 2020 x3, 2021 x2, Unknown x1. Four have abstracts, three distinct
/// non-empty journals, keyword `circadian` appears three times.
pub fn sample_corpus() -> Vec<PaperRecord> {
    vec![
        PaperBuilder::new("30000001")
            .title("BMAL1 controls circadian clearance of amyloid")
            .abstract_text("Glymphatic flow peaks during sleep.")
            .journal("Neuron")
            .year("2020")
            .authors(&["Kress GJ", "Liao F", "Musiek ES"])
            .keywords(&["circadian", "amyloid", "glymphatic"])
            .mesh_terms(&["ARNTL Transcription Factors", "Alzheimer Disease"])
            .strategy("BMAL1 AND Alzheimer")
            .build(),
        PaperBuilder::new("30000002")
            .title("Astrocyte clocks and the blood-brain barrier")
            .abstract_text("Astrocytic BMAL1 deletion alters BBB permeability.")
            .journal("Nature Neuroscience")
            .year("2020")
            .keywords(&["astrocyte", "circadian"])
            .mesh_terms(&["Astrocytes", "Blood-Brain Barrier"])
            .strategy("BMAL1 AND astrocyte")
            .build(),
        PaperBuilder::new("30000003")
            .title("Sleep fragmentation in aging")
            .journal("Neuron")
            .year("2020")
            .keywords(&["sleep", "aging"])
            .mesh_terms(&["Alzheimer Disease"])
            .strategy("BMAL1 AND Alzheimer")
            .build(),
        PaperBuilder::new("30000004")
            .title("Core clock transcription factors")
            .abstract_text("A review of CLOCK and BMAL1 heterodimers.")
            .journal("Cell")
            .year("2021")
            .keywords(&["Circadian Rhythm", "transcription"])
            .mesh_terms(&["ARNTL Transcription Factors", "CLOCK Proteins"])
            .strategy("BMAL1 AND astrocyte")
            .build(),
        PaperBuilder::new("30000005")
            .title("Tau pathology follows the light cycle")
            .abstract_text("Tau release is circadian-gated in mice.")
            .year("2021")
            .keywords(&["tau", "circadian"])
            .strategy("BMAL1 AND Alzheimer")
            .build(),
        PaperBuilder::new("30000006")
            .title("Undated conference abstract")
            .journal("Cell")
            .year(UNKNOWN_YEAR)
            .strategy("BMAL1 AND Alzheimer")
            .build(),
    ]
}
