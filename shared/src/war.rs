use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::RecordError;

/// Marker the backend puts in `playerName` and `warId` when the clan is not at war.
pub const NO_WAR_MARKER: &str = "NO_WAR";

/// One player's contribution to one war.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerWarResult {
    /// Absent for rows that were just fetched and not yet persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub clan_name: String,
    pub player_name: String,
    pub war_id: String,
    pub stars: u32,
    /// Absent until the backend assigns server time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

impl PlayerWarResult {
    pub fn is_just_fetched(&self) -> bool {
        self.id.is_none() && self.created_at.is_none()
    }
}

/// Wire shape of a war result, every field optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlayerWarResult {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub clan_name: Option<String>,
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub war_id: Option<String>,
    #[serde(default)]
    pub stars: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl RawPlayerWarResult {
    pub fn is_no_war_sentinel(&self) -> bool {
        self.player_name.as_deref() == Some(NO_WAR_MARKER)
            && self.war_id.as_deref() == Some(NO_WAR_MARKER)
    }
}

/// Maps a raw record into the display model.
pub fn normalize(raw: RawPlayerWarResult) -> Result<PlayerWarResult, RecordError> {
    let player_name = raw
        .player_name
        .filter(|name| !name.is_empty())
        .ok_or(RecordError::MissingField("playerName"))?;
    let war_id = raw.war_id.ok_or(RecordError::MissingField("warId"))?;
    let stars = raw.stars.ok_or(RecordError::MissingField("stars"))?;
    let clan_name = raw.clan_name.ok_or(RecordError::MissingField("clanName"))?;
    let stars = u32::try_from(stars).map_err(|_| RecordError::NegativeStars(stars))?;

    Ok(PlayerWarResult {
        id: raw.id,
        clan_name,
        player_name,
        war_id,
        stars,
        created_at: raw.created_at.as_deref().and_then(parse_timestamp),
    })
}

/// Accepts RFC 3339 or the backend's naive local date-time. Anything else is "not assigned".
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

/// Decodes a `/results` or `/fetch-currentwar` body, dropping no-war sentinel rows.
pub fn decode_results(body: &[u8]) -> Result<Vec<PlayerWarResult>, RecordError> {
    let raw: Vec<RawPlayerWarResult> =
        serde_json::from_slice(body).map_err(|e| RecordError::Undecodable(e.to_string()))?;
    raw.into_iter()
        .filter(|record| !record.is_no_war_sentinel())
        .map(normalize)
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::{RawPlayerWarResult, decode_results, normalize, parse_timestamp};
    use crate::error::RecordError;

    fn raw(player: &str, war: &str, stars: i64) -> RawPlayerWarResult {
        RawPlayerWarResult {
            clan_name: Some("Night Owls".to_string()),
            player_name: Some(player.to_string()),
            war_id: Some(war.to_string()),
            stars: Some(stars),
            ..Default::default()
        }
    }

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 5)
            .and_then(|d| d.and_hms_opt(h, m, s))
            .expect("valid date")
    }

    #[test]
    fn normalize_passes_fields_through_and_keeps_absent_optionals_absent() {
        let result = normalize(raw("Alice", "war-1", 5)).expect("complete record");
        assert_eq!(result.player_name, "Alice");
        assert_eq!(result.clan_name, "Night Owls");
        assert_eq!(result.war_id, "war-1");
        assert_eq!(result.stars, 5);
        assert_eq!(result.id, None);
        assert_eq!(result.created_at, None);
        assert!(result.is_just_fetched());
    }

    #[test]
    fn normalize_keeps_assigned_id_and_timestamp() {
        let mut record = raw("Bob", "war-2", 3);
        record.id = Some(42);
        record.created_at = Some("2025-01-05T15:04:00.123456".to_string());
        let result = normalize(record).expect("complete record");
        assert_eq!(result.id, Some(42));
        assert_eq!(
            result.created_at.map(|t| t.format("%H:%M:%S").to_string()),
            Some("15:04:00".to_string())
        );
        assert!(!result.is_just_fetched());
    }

    #[test]
    fn normalize_reports_first_missing_required_field() {
        let mut no_player = raw("x", "w", 1);
        no_player.player_name = None;
        assert_eq!(
            normalize(no_player),
            Err(RecordError::MissingField("playerName"))
        );

        let mut empty_player = raw("", "w", 1);
        empty_player.player_name = Some(String::new());
        assert_eq!(
            normalize(empty_player),
            Err(RecordError::MissingField("playerName"))
        );

        let mut no_war = raw("x", "w", 1);
        no_war.war_id = None;
        assert_eq!(normalize(no_war), Err(RecordError::MissingField("warId")));

        let mut no_stars = raw("x", "w", 1);
        no_stars.stars = None;
        assert_eq!(normalize(no_stars), Err(RecordError::MissingField("stars")));

        let mut no_clan = raw("x", "w", 1);
        no_clan.clan_name = None;
        assert_eq!(
            normalize(no_clan),
            Err(RecordError::MissingField("clanName"))
        );
    }

    #[test]
    fn normalize_rejects_negative_stars() {
        assert_eq!(
            normalize(raw("x", "w", -2)),
            Err(RecordError::NegativeStars(-2))
        );
    }

    #[test]
    fn parse_timestamp_accepts_rfc3339_and_naive_forms() {
        assert_eq!(parse_timestamp("2025-01-05T15:04:05Z"), Some(at(15, 4, 5)));
        assert_eq!(
            parse_timestamp("2025-01-05T17:04:05+02:00"),
            Some(at(15, 4, 5))
        );
        assert_eq!(parse_timestamp("2025-01-05T15:04:05"), Some(at(15, 4, 5)));
        assert_eq!(parse_timestamp("2025-01-05 15:04:05"), Some(at(15, 4, 5)));
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn unparsable_timestamp_is_treated_as_absent() {
        let mut record = raw("x", "w", 1);
        record.created_at = Some("not a date".to_string());
        let result = normalize(record).expect("record stays valid");
        assert_eq!(result.created_at, None);
    }

    #[test]
    fn decode_results_reads_camel_case_payload_in_server_order() {
        let body = br#"[
            {"id": 7, "clanName": "Owls", "playerName": "Zed", "warId": "war-9", "stars": 6, "createdAt": "2025-01-05T15:04:05"},
            {"clanName": "Owls", "playerName": "Amy", "warId": "war-9", "stars": 2}
        ]"#;
        let results = decode_results(body).expect("valid payload");
        let names: Vec<_> = results.iter().map(|r| r.player_name.as_str()).collect();
        assert_eq!(names, vec!["Zed", "Amy"]);
        assert_eq!(results[0].id, Some(7));
        assert_eq!(results[1].created_at, None);
    }

    #[test]
    fn decode_results_drops_no_war_sentinel() {
        let body = br#"[{"clanName": "Owls", "playerName": "NO_WAR", "warId": "NO_WAR", "stars": -1}]"#;
        assert_eq!(decode_results(body), Ok(Vec::new()));
    }

    #[test]
    fn decode_results_fails_on_wrong_shape() {
        assert!(matches!(
            decode_results(br#"{"error": "boom"}"#),
            Err(RecordError::Undecodable(_))
        ));
        assert_eq!(
            decode_results(br#"[{"clanName": "Owls", "warId": "w", "stars": 1}]"#),
            Err(RecordError::MissingField("playerName"))
        );
    }
}
