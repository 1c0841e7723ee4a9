//! Plain-text rendering of the dashboard and leaderboard views.

use std::fmt::Write;

use clash_tracker_shared::summary::{
    avatar_initial, format_recorded_at, is_excellent, war_id_preview,
};
use clash_tracker_shared::{PlayerWarResult, RankedLeaderboard, WarSummary};

pub const PROGRESS_WIDTH: usize = 20;
pub const EMPTY_DASHBOARD_TITLE: &str = "No War Data Found";
pub const EMPTY_DASHBOARD_HINT: &str = "Fetch some war data to see results here";
pub const EMPTY_LEADERBOARD_TITLE: &str = "No Leaderboard Data";
pub const EMPTY_LEADERBOARD_HINT: &str = "Fetch some war data to see the leaderboard";

pub fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = (ratio.clamp(0.0, 1.0) * width as f64).round() as usize;
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(width - filled));
    bar
}

pub fn dashboard(results: &[PlayerWarResult]) -> String {
    let mut out = String::new();
    if results.is_empty() {
        let _ = writeln!(out, "{EMPTY_DASHBOARD_TITLE}");
        let _ = write!(out, "{EMPTY_DASHBOARD_HINT}");
        return out;
    }

    let summary = WarSummary::from_results(results);
    let _ = writeln!(
        out,
        "Results: {}  Wars: {}  Stars: {}  Avg: {:.1}",
        summary.total_results, summary.unique_wars, summary.total_stars, summary.average_stars
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<3} {:<20} {:<20} {:<11} {:<7} {}",
        "", "PLAYER", "CLAN", "WAR", "STARS", "RECORDED"
    );
    for result in results {
        let stars = if is_excellent(result.stars) {
            format!("{} ★", result.stars)
        } else {
            result.stars.to_string()
        };
        let _ = writeln!(
            out,
            "{:<3} {:<20} {:<20} {:<11} {:<7} {}",
            avatar_initial(&result.player_name),
            result.player_name,
            result.clan_name,
            war_id_preview(&result.war_id),
            stars,
            format_recorded_at(result.created_at)
        );
    }
    out.truncate(out.trim_end().len());
    out
}

pub fn leaderboard(board: &RankedLeaderboard) -> String {
    let mut out = String::new();
    if board.is_empty() {
        let _ = writeln!(out, "{EMPTY_LEADERBOARD_TITLE}");
        let _ = write!(out, "{EMPTY_LEADERBOARD_HINT}");
        return out;
    }

    let _ = writeln!(
        out,
        "Players: {}  Total Stars: {}  Top Score: {}",
        board.summary.player_count, board.summary.total_stars, board.summary.top_score
    );
    let _ = writeln!(out);
    for entry in &board.entries {
        let clan = entry
            .clan_name
            .as_deref()
            .map(|clan| format!(" ({clan})"))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{:>4}  {:<24} {:>6}  {}",
            entry.marker.to_string(),
            format!("{}{clan}", entry.player_name),
            entry.total_stars,
            progress_bar(entry.progress, PROGRESS_WIDTH)
        );
    }
    out.truncate(out.trim_end().len());
    out
}

#[cfg(test)]
mod tests {
    use clash_tracker_shared::{LeaderboardEntry, PlayerWarResult, rank};

    use super::{EMPTY_DASHBOARD_TITLE, EMPTY_LEADERBOARD_TITLE, dashboard, leaderboard, progress_bar};

    fn result(player: &str, war: &str, stars: u32) -> PlayerWarResult {
        PlayerWarResult {
            id: None,
            clan_name: "Night Owls".to_string(),
            player_name: player.to_string(),
            war_id: war.to_string(),
            stars,
            created_at: None,
        }
    }

    fn entry(player: &str, total: u64) -> LeaderboardEntry {
        LeaderboardEntry {
            clan_name: None,
            player_name: player.to_string(),
            total_stars: total,
        }
    }

    #[test]
    fn progress_bar_is_proportional_and_clamped() {
        assert_eq!(progress_bar(0.5, 4), "██░░");
        assert_eq!(progress_bar(0.0, 3), "░░░");
        assert_eq!(progress_bar(1.7, 3), "███");
        assert_eq!(progress_bar(-1.0, 2), "░░");
    }

    #[test]
    fn empty_dashboard_shows_placeholder() {
        assert!(dashboard(&[]).starts_with(EMPTY_DASHBOARD_TITLE));
    }

    #[test]
    fn dashboard_lists_rows_in_given_order_with_summary() {
        let text = dashboard(&[
            result("zed", "war-aaaaaaaaaa", 2),
            result("amy", "war-bbbbbbbbbb", 6),
        ]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Results: 2  Wars: 2  Stars: 8  Avg: 4.0");
        assert!(lines[3].starts_with("Z   zed"));
        assert!(lines[3].contains("war-aaaa..."));
        assert!(lines[3].ends_with("Just fetched"));
        assert!(lines[4].starts_with("A   amy"));
        assert!(lines[4].contains("6 ★"));
    }

    #[test]
    fn empty_leaderboard_shows_placeholder() {
        assert!(leaderboard(&rank(Vec::new())).starts_with(EMPTY_LEADERBOARD_TITLE));
    }

    #[test]
    fn leaderboard_marks_podium_and_scales_bars() {
        let text = leaderboard(&rank(vec![
            entry("A", 10),
            entry("B", 5),
            entry("C", 5),
            entry("D", 0),
        ]));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Players: 4  Total Stars: 20  Top Score: 10");
        assert!(lines[2].contains('\u{1F947}'));
        assert!(lines[2].ends_with(&"█".repeat(20)));
        assert!(lines[3].contains('\u{1F948}'));
        assert!(lines[3].ends_with(&format!("{}{}", "█".repeat(10), "░".repeat(10))));
        assert!(lines[4].contains('\u{1F949}'));
        assert!(lines[5].trim_start().starts_with("4 "));
        assert!(lines[5].ends_with(&"░".repeat(20)));
    }
}
