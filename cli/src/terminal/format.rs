use crate::terminal::colors;
use colored::*;
use parkr_common::parking::assignment::Assignment;
use parkr_common::parking::lot::{LotStatus, TrafficLevel};
use parkr_common::parking::spot::Recommendation;

pub type Detail = (String, ColoredString);

const BAR_WIDTH: usize = 20;

pub fn score_color(score: f64) -> Color {
    match score {
        s if s >= 0.7 => colors::SCORE_HIGH,
        s if s >= 0.4 => colors::SCORE_MID,
        _ => colors::SCORE_LOW,
    }
}

pub fn traffic_to_colored(level: TrafficLevel) -> ColoredString {
    let color = match level {
        TrafficLevel::VeryLow | TrafficLevel::Low => colors::SCORE_HIGH,
        TrafficLevel::Medium => colors::SCORE_MID,
        TrafficLevel::High | TrafficLevel::VeryHigh => colors::SCORE_LOW,
        TrafficLevel::Unknown => colors::SEPARATOR,
    };
    level.as_str().color(color)
}

/// `[#####---------------] 25.0%`
pub fn occupancy_bar(occupancy_rate: f64) -> ColoredString {
    let filled = ((occupancy_rate / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    let bar = format!(
        "[{}{}] {:.1}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        occupancy_rate
    );
    bar.color(score_color(1.0 - occupancy_rate / 100.0))
}

pub fn lot_status_details(status: &LotStatus) -> Vec<Detail> {
    vec![
        (
            "Slots".into(),
            format!("{}/{} free", status.available_slots, status.total_slots).color(colors::TEXT_DEFAULT),
        ),
        ("Occupancy".into(), occupancy_bar(status.occupancy_rate)),
        (
            "Price".into(),
            format!("${:.2}/h", status.price_per_hour).color(colors::ACCENT),
        ),
        ("Traffic".into(), traffic_to_colored(status.traffic_level)),
        ("Rating".into(), format!("{:.1}", status.rating).color(colors::TEXT_DEFAULT)),
    ]
}

pub fn recommendation_details(rec: &Recommendation) -> Vec<Detail> {
    let s = &rec.scores;
    vec![
        (
            "Score".into(),
            format!("{:.3}", s.final_score).color(score_color(s.final_score)).bold(),
        ),
        (
            "Distance".into(),
            format!("{:.2} km", rec.distance_km).color(colors::TEXT_DEFAULT),
        ),
        (
            "Slots".into(),
            format!("{}/{} free", rec.available_slots, rec.total_slots).color(colors::TEXT_DEFAULT),
        ),
        (
            "Price".into(),
            format!("${:.2}/h", rec.price_per_hour).color(colors::ACCENT),
        ),
        ("Traffic".into(), traffic_to_colored(rec.traffic_level)),
        (
            "Confidence".into(),
            format!("{:.1}%", rec.confidence).color(score_color(rec.confidence / 100.0)),
        ),
        (
            "Breakdown".into(),
            format!(
                "avail {:.3} / dist {:.3} / traffic {:.3} / price {:.3}",
                s.availability, s.distance, s.traffic, s.price
            )
            .color(colors::SEPARATOR),
        ),
    ]
}

pub fn assignment_details(a: &Assignment) -> Vec<Detail> {
    vec![
        ("Slot".into(), a.assigned_slot.as_str().color(colors::ACCENT).bold()),
        ("Token".into(), a.token.as_str().color(colors::PRIMARY)),
        (
            "Distance".into(),
            format!("{:.2} km", a.distance_km).color(colors::TEXT_DEFAULT),
        ),
        ("Duration".into(), a.duration_label().color(colors::TEXT_DEFAULT)),
        (
            "Est. cost".into(),
            format!("${:.2}", a.estimated_cost).color(colors::ACCENT),
        ),
        (
            "Confidence".into(),
            format!("{:.1}%", a.confidence_score).color(score_color(a.confidence_score / 100.0)),
        ),
    ]
}
