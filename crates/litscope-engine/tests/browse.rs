//! End-to-end browse and analysis scenarios over materialized records

use litscope_engine::{
    PaperFilter, PaperQuery, SortKey, TermField, YearRange, compute_statistics, paginate,
    run_query, top_journals, top_n,
};
use litscope_testing::assertions::{assert_all_papers, assert_pmids};
use litscope_testing::fixtures::{PaperBuilder, numbered_papers, sample_corpus};
use litscope_types::PaperRecord;

#[test]
fn test_statistics_snapshot() {
    let stats = compute_statistics(&sample_corpus());

    insta::assert_json_snapshot!(stats, @r#"
    {
      "total_papers": 6,
      "by_year": {
        "2020": 3,
        "2021": 2
      },
      "by_strategy": {
        "BMAL1 AND Alzheimer": 4,
        "BMAL1 AND astrocyte": 2
      },
      "with_abstract": 4,
      "unique_journals": 3
    }
    "#);
}

#[test]
fn test_browse_45_records_in_pages_of_20() {
    let papers = numbered_papers(45);

    let sizes: Vec<usize> = (1..=3)
        .map(|n| paginate(&papers, 20, n).items.len())
        .collect();
    assert_eq!(sizes, vec![20, 20, 5]);

    let last = run_query(&papers, &PaperQuery::new().page(3));
    assert_eq!(last.total_pages, 3);
    assert_pmids(&last.items, &["41", "42", "43", "44", "45"]).unwrap();
}

#[test]
fn test_keyword_filter_ignores_case() {
    let papers = vec![
        PaperBuilder::new("1").title("BMAL1 knockout").build(),
        PaperBuilder::new("2").title("Unrelated").build(),
    ];

    let lower = PaperFilter::new().keyword("bmal1").apply(&papers);
    let upper = PaperFilter::new().keyword("BMAL1").apply(&papers);

    assert_eq!(lower, upper);
    assert_pmids(&lower, &["1"]).unwrap();
}

#[test]
fn test_full_year_range_excludes_unknown() {
    let corpus = sample_corpus();
    let filtered = PaperFilter::new()
        .year_range(YearRange::new(1900, 2100))
        .apply(&corpus);

    assert_eq!(filtered.len(), corpus.len() - 1);
    assert_all_papers(&filtered, "has a known year", |p| p.known_year().is_some()).unwrap();
}

#[test]
fn test_sorted_query_pages_are_disjoint() {
    let corpus = sample_corpus();
    let query = PaperQuery::new().sort(SortKey::TitleAsc).page_size(4);

    let first = run_query(&corpus, &query.clone().page(1));
    let second = run_query(&corpus, &query.page(2));

    assert_eq!(first.items.len() + second.items.len(), corpus.len());
    assert!(
        first
            .items
            .iter()
            .all(|p| !second.items.iter().any(|q| q.pmid == p.pmid))
    );

    let titles: Vec<&str> = first
        .items
        .iter()
        .chain(second.items.iter())
        .map(|p| p.title.as_str())
        .collect();
    let mut sorted = titles.clone();
    sorted.sort();
    assert_eq!(titles, sorted);
}

#[test]
fn test_top_n_is_bounded_and_descending() {
    let corpus = sample_corpus();
    let total_occurrences: usize = corpus.iter().map(|p| p.keywords.len()).sum();

    for n in [0, 1, 3, 100] {
        let top = top_n(&corpus, TermField::Keywords, n);

        assert!(top.len() <= n);
        assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
        assert!(top.iter().map(|f| f.count).sum::<usize>() <= total_occurrences);
    }
}

#[test]
fn test_empty_library_analysis() {
    let empty: Vec<PaperRecord> = Vec::new();

    assert_eq!(compute_statistics(&empty).total_papers, 0);
    assert!(top_n(&empty, TermField::MeshTerms, 10).is_empty());
    assert!(top_journals(&empty, 10).is_empty());

    let page = run_query(&empty, &PaperQuery::new());
    assert_eq!(page.total_pages, 1);
    assert!(page.items.is_empty());
}
