//! Waterfall properties of the tiered query planner.
//!
//! Run with: cargo test -p ewe-literature --test tiered_search

use ewe_literature::{MockSource, QueryPlanner, SearchTier};
use std::sync::Arc;

fn quiet(_: &str) {}

/// Build a source where each tier returns the given ids (empty = no hits).
fn source_for(core: &str, hits: [&[&str]; 3]) -> Arc<MockSource> {
    let mut source = MockSource::new();
    for (tier, ids) in SearchTier::ALL.iter().zip(hits) {
        source = source.with_search(tier.build_term(core), ids);
    }
    Arc::new(source)
}

#[tokio::test]
async fn tier_two_runs_iff_tier_one_is_empty() {
    let query = "moringa leaves";

    for tier_one in [&[][..], &["1"][..]] {
        let source = source_for(query, [tier_one, &["2"], &["3"]]);
        let planner = QueryPlanner::new(source.clone());
        planner.search(query, &quiet).await;

        let ran_tier_two = source
            .searches()
            .contains(&SearchTier::National.build_term(query));
        assert_eq!(ran_tier_two, tier_one.is_empty());
    }
}

#[tokio::test]
async fn tier_three_runs_iff_tiers_one_and_two_are_empty() {
    let query = "scent leaf";
    let cases: [([&[&str]; 2], bool); 4] = [
        ([&[], &[]], true),
        ([&["1"], &[]], false),
        ([&[], &["2"]], false),
        ([&["1"], &["2"]], false),
    ];

    for ([first, second], expect_regional) in cases {
        let source = source_for(query, [first, second, &["3"]]);
        let planner = QueryPlanner::new(source.clone());
        let outcome = planner.search(query, &quiet).await;

        let ran_regional = source
            .searches()
            .contains(&SearchTier::Regional.build_term(query));
        assert_eq!(ran_regional, expect_regional);
        if expect_regional {
            assert_eq!(outcome.tier, Some(SearchTier::Regional));
            assert_eq!(outcome.ids, vec!["3"]);
        }
    }
}

#[tokio::test]
async fn exhausting_all_tiers_is_a_valid_empty_outcome() {
    let source = source_for("garden egg", [&[], &[], &[]]);
    let planner = QueryPlanner::new(source.clone());

    let outcome = planner.search("garden egg", &quiet).await;

    assert!(outcome.ids.is_empty());
    assert_eq!(outcome.tier, None);
    assert_eq!(outcome.attempts.len(), 3);
    assert_eq!(source.searches().len(), 3);
}

#[tokio::test]
async fn core_query_drops_stop_words_before_searching() {
    let core = "jute leaf";
    let source = source_for(core, [&["42"], &[], &[]]);
    let planner = QueryPlanner::new(source.clone());

    let outcome = planner
        .search("what is the local name for jute leaf in nigeria", &quiet)
        .await;

    assert_eq!(outcome.core_query, core);
    assert_eq!(outcome.ids, vec!["42"]);
    assert_eq!(source.searches()[0], SearchTier::Strict.build_term(core));
}
