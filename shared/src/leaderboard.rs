use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RecordError;

/// Per-player star total across every recorded war, as aggregated by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clan_name: Option<String>,
    pub player_name: String,
    pub total_stars: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankMarker {
    Gold,
    Silver,
    Bronze,
    /// 1-based rank for everything past the podium.
    Numeric(usize),
}

impl RankMarker {
    pub fn for_index(index: usize) -> Self {
        match index {
            0 => RankMarker::Gold,
            1 => RankMarker::Silver,
            2 => RankMarker::Bronze,
            _ => RankMarker::Numeric(index + 1),
        }
    }

    pub fn is_podium(self) -> bool {
        !matches!(self, RankMarker::Numeric(_))
    }
}

impl fmt::Display for RankMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankMarker::Gold => f.write_str("\u{1F947}"),
            RankMarker::Silver => f.write_str("\u{1F948}"),
            RankMarker::Bronze => f.write_str("\u{1F949}"),
            RankMarker::Numeric(rank) => write!(f, "{rank}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    pub marker: RankMarker,
    pub player_name: String,
    pub clan_name: Option<String>,
    pub total_stars: u64,
    /// Share of the first entry's total, in `[0, 1]`.
    pub progress: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeaderboardSummary {
    pub player_count: usize,
    pub total_stars: u64,
    pub top_score: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedLeaderboard {
    pub entries: Vec<RankedEntry>,
    pub summary: LeaderboardSummary,
}

impl RankedLeaderboard {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn progress_ratio(total_stars: u64, top_score: u64) -> f64 {
    if top_score == 0 {
        return 0.0;
    }
    (total_stars as f64 / top_score as f64).clamp(0.0, 1.0)
}

/// Assigns markers and progress in received order. The received order is authoritative.
pub fn rank(entries: Vec<LeaderboardEntry>) -> RankedLeaderboard {
    let top_score = entries.first().map_or(0, |entry| entry.total_stars);
    let summary = LeaderboardSummary {
        player_count: entries.len(),
        total_stars: entries
            .iter()
            .map(|entry| entry.total_stars)
            .fold(0, u64::saturating_add),
        top_score,
    };

    let entries = entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| RankedEntry {
            marker: RankMarker::for_index(index),
            progress: progress_ratio(entry.total_stars, top_score),
            player_name: entry.player_name,
            clan_name: entry.clan_name,
            total_stars: entry.total_stars,
        })
        .collect();

    RankedLeaderboard { entries, summary }
}

/// First index whose total is greater than its predecessor's.
pub fn first_ordering_violation(entries: &[LeaderboardEntry]) -> Option<usize> {
    entries
        .windows(2)
        .position(|pair| pair[1].total_stars > pair[0].total_stars)
        .map(|pos| pos + 1)
}

pub fn decode_leaderboard(body: &[u8]) -> Result<Vec<LeaderboardEntry>, RecordError> {
    serde_json::from_slice(body).map_err(|e| RecordError::Undecodable(e.to_string()))
}
