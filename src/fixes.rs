//! The fix registry (C2, §4.2): four keyed maps of small per-game, per-record
//! patches applied at the point the associated parser emits the record. A
//! fix referencing a record that doesn't exist in a given game is a no-op —
//! callers look the patch up by key and apply it only if found.

use crate::ids::GameId;

/// An override for one player slot in an API event patch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerOverride {
    pub api_id: Option<i64>,
    pub name: Option<String>,
    pub eh_id: Option<String>,
    pub role: Option<String>,
    /// Clear the slot entirely, the equivalent of the source's `del event[...]`.
    pub clear: bool,
}

/// The mutable patch target for `api_events_fix`: the partially-built event
/// a C3 parser holds before player resolution finalizes it.
#[derive(Debug, Clone, Default)]
pub struct ApiEventPatch {
    pub player_1: Option<PlayerOverride>,
    pub player_2: Option<PlayerOverride>,
    pub player_3: Option<PlayerOverride>,
    pub swap_player_1_and_2: bool,
    /// Drop the event entirely (§9: known hard-coded per-game event drops).
    pub drop: bool,
}

/// Look up and apply the API event fix for `(game_id, event_idx)`, if any.
pub fn apply_api_events_fix(game_id: GameId, event_idx: i64, patch: &mut ApiEventPatch) {
    match (game_id.as_i64(), event_idx) {
        (2010021176, 213) => {
            patch.player_3 = Some(PlayerOverride {
                api_id: Some(8467396),
                role: Some("DRAWN BY".into()),
                ..Default::default()
            });
        }
        (2011020069, 660) => {
            patch.player_1 = Some(PlayerOverride { api_id: Some(8473473), ..Default::default() });
        }
        (2012020341, 656) => {
            patch.player_1 = Some(PlayerOverride {
                api_id: None,
                name: Some("BENCH".into()),
                eh_id: Some("BENCH".into()),
                ..Default::default()
            });
        }
        (2012020671, 680) => {
            patch.player_2 = Some(PlayerOverride {
                api_id: Some(8470192),
                role: Some("SERVED BY".into()),
                ..Default::default()
            });
        }
        (2013020445, 617) => {
            patch.swap_player_1_and_2 = true;
        }
        // Known hard-coded per-game event drops (§9): retained as data here,
        // not as a special case in the reconciler.
        (2022020194, 134) => {
            patch.drop = true;
        }
        (2022020673, 208) => {
            patch.drop = true;
        }
        _ => {}
    }
}

/// The mutable patch target for `html_events_fix`: the raw scraped row
/// before regex extraction, matching the source's `(period, time,
/// description)` fields exactly so repairs stay textual.
#[derive(Debug, Clone)]
pub struct HtmlEventRow {
    pub period: i32,
    pub time: String,
    pub description: String,
}

const BROKEN_TIME_CODE: &str = "-16:0-120:00";
const BROKEN_TIME_REPLACEMENT: &str = "5:000:00";

/// Games where the raw time column contains the broken `"-16:0-120:00"`
/// code the source repairs unconditionally (§4.6 "repair time codes").
const BROKEN_TIME_GAMES: &[i64] = &[2013020083, 2013020274, 2013020644, 2014021118, 2015020904];

pub fn apply_html_events_fix(game_id: GameId, event_idx: i64, row: &mut HtmlEventRow) {
    let gid = game_id.as_i64();

    if BROKEN_TIME_GAMES.contains(&gid) {
        row.time = row.time.replace(BROKEN_TIME_CODE, BROKEN_TIME_REPLACEMENT);
    }

    match (gid, event_idx) {
        (2011020553, 294) => {
            row.description = "FLA #21 BARCH (10 MIN)".into();
        }
        (2012020660, 150) => {
            row.description = "NJD BENCH PS-HOOKING ON BREAKAWAY(0 MIN) NJD SERVED BY: #2 ZIDLICKY DRAWN BY: FLA #42 HOWDEN".into();
        }
        (2013020971, 1) => {
            row.period = 1;
            row.time = "0:0020:00".into();
        }
        (2014020600, 328) => {
            row.description = "CAR # BLOCKED BY BUF #6 WEBER, WRIST, DEF. ZONE".into();
        }
        (2014020672, 297) => {
            row.description = "NYR #22 HIT PIT #16 SUTTER, DEF. ZONE".into();
        }
        (2015020193, 196) => {
            row.description = "FLA #27 BJUGSTAD, WRIST, OFF. ZONE, 16 FT.".into();
        }
        _ => {}
    }

    if gid == 2012020018 {
        for (bad, good) in [("EDM #9", "VAN #9"), ("VAN #93", "EDM #93"), ("VAN #94", "EDM #94")] {
            row.description = row.description.replace(bad, good);
        }
    }
}

/// The mutable patch target for `html_rosters_fix`, keyed by `player_name`.
#[derive(Debug, Clone)]
pub struct HtmlRosterRow {
    pub player_name: String,
    pub status: String,
}

/// Players the source reclassifies as scratches for `2019020665` despite
/// appearing in the active table.
const GAME_2019020665_SCRATCHES: &[&str] = &[
    "ROSS JOHNSTON",
    "SEBASTIAN AHO",
    "CONNOR CARRICK",
    "JESPER BRATT",
    "JACK HUGHES",
];

pub fn apply_html_rosters_fix(game_id: GameId, row: &mut HtmlRosterRow) {
    if game_id.as_i64() == 2019020665 && GAME_2019020665_SCRATCHES.contains(&row.player_name.as_str()) {
        row.status = "SCRATCH".into();
    }
}

/// The mutable patch target for `rosters_fix`, keyed by `team_jersey`
/// (applied after C3+C5 rosters are merged).
#[derive(Debug, Clone, Default)]
pub struct RosterFixPatch {
    pub api_id: Option<i64>,
    pub headshot_url: Option<String>,
}

pub fn apply_rosters_fix(game_id: GameId, team_jersey: &str, patch: &mut RosterFixPatch) {
    match (game_id.as_i64(), team_jersey) {
        (2015020508, "ANA5") => {
            patch.api_id = Some(8473560);
            patch.headshot_url = Some("https://assets.nhle.com/mugs/nhl/20152016/ANA/8473560.png".into());
        }
        (2015021197, "LAK13") => {
            patch.api_id = Some(8475160);
            patch.headshot_url = Some("https://assets.nhle.com/mugs/nhl/20152016/LAK/8475160.png".into());
        }
        _ => {}
    }
}
