use std::collections::HashSet;

use chrono::NaiveDateTime;

use crate::war::PlayerWarResult;

/// Star count at which a row earns the "EXCELLENT" badge.
pub const EXCELLENT_STARS: u32 = 6;
pub const WAR_ID_PREVIEW_CHARS: usize = 8;
pub const JUST_FETCHED_LABEL: &str = "Just fetched";

/// Headline numbers for the dashboard, computed over the results in server order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WarSummary {
    pub total_results: usize,
    pub unique_wars: usize,
    pub total_stars: u64,
    /// Mean stars per row, rounded to one decimal.
    pub average_stars: f64,
}

impl WarSummary {
    pub fn from_results(results: &[PlayerWarResult]) -> Self {
        let total_results = results.len();
        let total_stars = results
            .iter()
            .map(|r| u64::from(r.stars))
            .fold(0, u64::saturating_add);
        let unique_wars = results
            .iter()
            .map(|r| r.war_id.as_str())
            .collect::<HashSet<_>>()
            .len();
        let average_stars = if total_results == 0 {
            0.0
        } else {
            (total_stars as f64 / total_results as f64 * 10.0).round() / 10.0
        };

        Self {
            total_results,
            unique_wars,
            total_stars,
            average_stars,
        }
    }
}

pub fn avatar_initial(player_name: &str) -> String {
    player_name
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}

pub fn war_id_preview(war_id: &str) -> String {
    let head: String = war_id.chars().take(WAR_ID_PREVIEW_CHARS).collect();
    format!("{head}...")
}

pub fn is_excellent(stars: u32) -> bool {
    stars >= EXCELLENT_STARS
}

/// `Jan 5, 2025, 03:04 PM`, or a placeholder for rows without server time.
pub fn format_recorded_at(created_at: Option<NaiveDateTime>) -> String {
    match created_at {
        Some(ts) => ts.format("%b %-d, %Y, %I:%M %p").to_string(),
        None => JUST_FETCHED_LABEL.to_string(),
    }
}
