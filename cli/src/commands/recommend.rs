use anyhow::Context;
use colored::*;
use parkr_common::config::RankerConfig;
use parkr_common::geo::Coordinates;
use parkr_common::parking::lot::Lot;
use parkr_common::parking::spot::{CandidateSpot, Recommendation};
use parkr_core::ranker::RecommendationRanker;

use crate::terminal::{colors, format, print};

pub fn recommend(lots: &[Lot], user: Coordinates, config: RankerConfig, json: bool) -> anyhow::Result<()> {
    let ranker = RecommendationRanker::new(config).context("invalid ranking configuration")?;
    let max_distance_km = ranker.config().max_distance_km;
    let spots: Vec<CandidateSpot> = lots.iter().map(CandidateSpot::from).collect();
    let ranked: Vec<Recommendation> = ranker.rank(&spots, user);

    if json {
        print::print(&serde_json::to_string_pretty(&ranked)?);
        return Ok(());
    }

    if ranked.is_empty() {
        print::no_results(&format!("no lots within {max_distance_km} km"));
        return Ok(());
    }

    print::header("recommendations");
    for (idx, rec) in ranked.iter().enumerate() {
        print::tree_head(idx, &rec.name);
        print::as_tree_one_level(format::recommendation_details(rec));
    }
    print::fat_separator();
    let summary = format!(
        "{} of {} lots within {} km",
        ranked.len().to_string().bold().green(),
        lots.len(),
        max_distance_km.to_string().bold().yellow()
    );
    print::centerln(&summary.color(colors::TEXT_DEFAULT).to_string());
    Ok(())
}
