#![cfg(test)]
use parkr_common::config::RankerConfig;
use parkr_common::parking::spot::CandidateSpot;
use parkr_core::ranker::RecommendationRanker;

use crate::util::{DOWNTOWN, city_lots, engine_with};

#[test]
fn ranks_city_lots_best_first() {
    let ranker = RecommendationRanker::new(RankerConfig::default()).unwrap();
    let spots: Vec<CandidateSpot> = city_lots().iter().map(CandidateSpot::from).collect();
    let ranked = ranker.rank(&spots, DOWNTOWN);

    assert_eq!(ranked.len(), 3);
    for pair in ranked.windows(2) {
        assert!(pair[0].scores.final_score >= pair[1].scores.final_score);
    }
    // Cheapest in the set scores 1, dearest 0.
    let by_id = |id| ranked.iter().find(|r| r.spot_id == id).unwrap();
    assert_eq!(by_id(2).scores.price, 1.0);
    assert_eq!(by_id(1).scores.price, 0.0);
}

#[test]
fn tight_radius_filters_far_lots() {
    let ranker = RecommendationRanker::new(RankerConfig::with_max_distance(0.1)).unwrap();
    let ranked = ranker.rank_registry(engine_with(city_lots()).registry(), DOWNTOWN);
    let ids: Vec<u32> = ranked.iter().map(|r| r.spot_id).collect();
    assert_eq!(ids, vec![1]);
}

#[tokio::test]
async fn recommendations_do_not_reserve() {
    let engine = engine_with(city_lots());
    let before = engine.lots();
    let ranker = RecommendationRanker::new(RankerConfig::default()).unwrap();
    ranker.rank_registry(engine.registry(), DOWNTOWN);
    assert_eq!(engine.lots(), before);
}
