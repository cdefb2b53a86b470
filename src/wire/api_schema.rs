use serde::{Deserialize, Serialize};

/// Localized name as returned inline on roster spots (`{"default": "..."}`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WireName {
    pub default: String,
}

/// `rosterSpots[]` entries on the play-by-play payload: the roster C3 uses to
/// resolve `api_id` references in `plays[]` to name/position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RosterSpot {
    pub team_id: i64,
    pub player_id: i64,
    pub first_name: WireName,
    pub last_name: WireName,
    pub sweater_number: i32,
    pub position_code: String,
    #[serde(default)]
    pub headshot: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PeriodDescriptor {
    pub number: i32,
    pub period_type: String,
}

/// One flat optional-field bag covering shot/goal/penalty/hit/faceoff/giveaway
/// detail fields, matching the shape `api-web.nhle.com` actually serves.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayEventDetails {
    pub event_owner_team_id: Option<i64>,
    pub x_coord: Option<f64>,
    pub y_coord: Option<f64>,
    pub zone_code: Option<String>,

    // faceoff
    pub winning_player_id: Option<i64>,
    pub losing_player_id: Option<i64>,

    // hit
    pub hitting_player_id: Option<i64>,
    pub hittee_player_id: Option<i64>,

    // giveaway / takeaway
    pub player_id: Option<i64>,

    // shot-on-goal / missed-shot / blocked-shot
    pub shooting_player_id: Option<i64>,
    pub blocking_player_id: Option<i64>,
    pub goalie_in_net_id: Option<i64>,
    pub shot_type: Option<String>,
    pub reason: Option<String>,
    pub away_sog: Option<i32>,
    pub home_sog: Option<i32>,

    // goal
    pub scoring_player_id: Option<i64>,
    pub scoring_player_total: Option<i32>,
    pub assist1_player_id: Option<i64>,
    pub assist2_player_id: Option<i64>,

    // penalty
    pub committed_by_player_id: Option<i64>,
    pub drawn_by_player_id: Option<i64>,
    pub served_by_player_id: Option<i64>,
    pub type_code: Option<String>,
    pub duration: Option<i32>,
    pub desc_key: Option<String>,
    pub secondary_reason: Option<String>,
}

/// One entry of `plays[]` on the play-by-play payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayEvent {
    pub event_id: i64,
    pub period_descriptor: PeriodDescriptor,
    pub time_in_period: String,
    pub time_remaining: String,
    #[serde(default)]
    pub situation_code: Option<String>,
    #[serde(default)]
    pub home_team_defending_side: Option<String>,
    pub type_code: i32,
    pub type_desc_key: String,
    pub sort_order: i64,
    #[serde(default)]
    pub details: PlayEventDetails,
}

/// The full `GET gamecenter/{game_id}/play-by-play` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayByPlayResponse {
    pub id: i64,
    pub season: i64,
    pub game_type: i32,
    #[serde(default)]
    pub game_date: Option<String>,
    pub away_team: WireTeam,
    pub home_team: WireTeam,
    #[serde(default)]
    pub plays: Vec<PlayEvent>,
    #[serde(default)]
    pub roster_spots: Vec<RosterSpot>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WireTeam {
    pub id: i64,
    pub abbrev: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_goal_event() {
        let json = r#"{
            "eventId": 331,
            "periodDescriptor": {"number": 3, "periodType": "REG"},
            "timeInPeriod": "18:45",
            "timeRemaining": "01:15",
            "typeCode": 505,
            "typeDescKey": "goal",
            "sortOrder": 870,
            "details": {
                "eventOwnerTeamId": 18,
                "xCoord": -96.0,
                "yCoord": 11.0,
                "zoneCode": "O",
                "scoringPlayerId": 8471233,
                "assist1PlayerId": 8475171,
                "goalieInNetId": null,
                "shotType": "wrist"
            }
        }"#;
        let event: PlayEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.type_desc_key, "goal");
        assert_eq!(event.details.scoring_player_id, Some(8471233));
        assert_eq!(event.details.goalie_in_net_id, None);
    }

    #[test]
    fn deserializes_roster_spot() {
        let json = r#"{
            "teamId": 18,
            "playerId": 8475172,
            "firstName": {"default": "Pekka"},
            "lastName": {"default": "Rinne"},
            "sweaterNumber": 35,
            "positionCode": "G"
        }"#;
        let spot: RosterSpot = serde_json::from_str(json).unwrap();
        assert_eq!(spot.last_name.default, "Rinne");
        assert_eq!(spot.position_code, "G");
    }

    #[test]
    fn missing_details_defaults_to_empty_bag() {
        let json = r#"{
            "eventId": 1,
            "periodDescriptor": {"number": 1, "periodType": "REG"},
            "timeInPeriod": "00:00",
            "timeRemaining": "20:00",
            "typeCode": 520,
            "typeDescKey": "period-start",
            "sortOrder": 1
        }"#;
        let event: PlayEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.details, PlayEventDetails::default());
    }
}
