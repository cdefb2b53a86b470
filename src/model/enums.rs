//! Small domain enums for the canonical data model (§3), styled after the
//! teacher's `types/enums` pattern: a dedicated parse error, `code()`/`name()`
//! const helpers, `Display`, and `FromStr`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
#[error("unknown position: {0}")]
pub struct ParsePositionError(pub String);

/// `position ∈ {C, L, R, D, G}` (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "C")]
    Center,
    #[serde(rename = "L")]
    Left,
    #[serde(rename = "R")]
    Right,
    #[serde(rename = "D")]
    Defense,
    #[serde(rename = "G")]
    Goalie,
}

impl Position {
    pub const fn code(&self) -> &'static str {
        match self {
            Position::Center => "C",
            Position::Left => "L",
            Position::Right => "R",
            Position::Defense => "D",
            Position::Goalie => "G",
        }
    }

    pub const fn is_forward(&self) -> bool {
        matches!(self, Position::Center | Position::Left | Position::Right)
    }

    pub const fn is_defense(&self) -> bool {
        matches!(self, Position::Defense)
    }

    pub const fn is_goalie(&self) -> bool {
        matches!(self, Position::Goalie)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "C" => Ok(Position::Center),
            "L" | "LW" => Ok(Position::Left),
            "R" | "RW" => Ok(Position::Right),
            "D" => Ok(Position::Defense),
            "G" => Ok(Position::Goalie),
            _ => Err(ParsePositionError(s.to_string())),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("unknown team venue: {0}")]
pub struct ParseTeamVenueError(pub String);

/// `team_venue ∈ {HOME, AWAY}` (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamVenue {
    Home,
    Away,
}

impl TeamVenue {
    pub const fn code(&self) -> &'static str {
        match self {
            TeamVenue::Home => "HOME",
            TeamVenue::Away => "AWAY",
        }
    }

    pub const fn opposite(&self) -> TeamVenue {
        match self {
            TeamVenue::Home => TeamVenue::Away,
            TeamVenue::Away => TeamVenue::Home,
        }
    }
}

impl fmt::Display for TeamVenue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for TeamVenue {
    type Err = ParseTeamVenueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HOME" => Ok(TeamVenue::Home),
            "AWAY" => Ok(TeamVenue::Away),
            _ => Err(ParseTeamVenueError(s.to_string())),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("unknown player status: {0}")]
pub struct ParsePlayerStatusError(pub String);

/// `status ∈ {ACTIVE, SCRATCH}` (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerStatus {
    Active,
    Scratch,
}

impl PlayerStatus {
    pub const fn code(&self) -> &'static str {
        match self {
            PlayerStatus::Active => "ACTIVE",
            PlayerStatus::Scratch => "SCRATCH",
        }
    }
}

impl fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for PlayerStatus {
    type Err = ParsePlayerStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(PlayerStatus::Active),
            "SCRATCH" => Ok(PlayerStatus::Scratch),
            _ => Err(ParsePlayerStatusError(s.to_string())),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("unknown session: {0}")]
pub struct ParseSessionError(pub String);

/// `session ∈ {PR, R, P}` (§3), with the integer `game_type` codes from §6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Session {
    #[serde(rename = "PR")]
    Preseason,
    #[serde(rename = "R")]
    Regular,
    #[serde(rename = "P")]
    Playoffs,
}

impl Session {
    pub const fn code(&self) -> &'static str {
        match self {
            Session::Preseason => "PR",
            Session::Regular => "R",
            Session::Playoffs => "P",
        }
    }

    pub const fn from_game_type(game_type: i32) -> Option<Self> {
        match game_type {
            1 => Some(Session::Preseason),
            2 => Some(Session::Regular),
            3 => Some(Session::Playoffs),
            _ => None,
        }
    }

    pub const fn game_type(&self) -> i32 {
        match self {
            Session::Preseason => 1,
            Session::Regular => 2,
            Session::Playoffs => 3,
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Session {
    type Err = ParseSessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PR" => Ok(Session::Preseason),
            "R" => Ok(Session::Regular),
            "P" => Ok(Session::Playoffs),
            _ => Err(ParseSessionError(s.to_string())),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("unknown zone: {0}")]
pub struct ParseZoneError(pub String);

/// `zone ∈ {OFF, NEU, DEF}` (§3). Always the shooter's zone for blocked
/// shots per the resolved open question in §9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    #[serde(rename = "OFF")]
    Offensive,
    #[serde(rename = "NEU")]
    Neutral,
    #[serde(rename = "DEF")]
    Defensive,
}

impl Zone {
    pub const fn code(&self) -> &'static str {
        match self {
            Zone::Offensive => "OFF",
            Zone::Neutral => "NEU",
            Zone::Defensive => "DEF",
        }
    }

    /// Flip OFF<->DEF, leaving NEU unchanged; used when translating a zone
    /// from one team's perspective to the other's.
    pub const fn flipped(&self) -> Zone {
        match self {
            Zone::Offensive => Zone::Defensive,
            Zone::Defensive => Zone::Offensive,
            Zone::Neutral => Zone::Neutral,
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Zone {
    type Err = ParseZoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OFF" | "O" => Ok(Zone::Offensive),
            "NEU" | "N" => Ok(Zone::Neutral),
            "DEF" | "D" => Ok(Zone::Defensive),
            _ => Err(ParseZoneError(s.to_string())),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("unknown event tag: {0}")]
pub struct ParseEventTagError(pub String);

/// The normalized event vocabulary (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTag {
    Fac,
    Hit,
    Give,
    Take,
    Shot,
    Miss,
    Block,
    Goal,
    Penl,
    Delpen,
    Stop,
    Change,
    Pstr,
    Pend,
    Gend,
    Soc,
    Eistr,
    Eiend,
    Anthem,
    Pgstr,
    Pgend,
    Chl,
}

impl EventTag {
    pub const fn code(&self) -> &'static str {
        match self {
            EventTag::Fac => "FAC",
            EventTag::Hit => "HIT",
            EventTag::Give => "GIVE",
            EventTag::Take => "TAKE",
            EventTag::Shot => "SHOT",
            EventTag::Miss => "MISS",
            EventTag::Block => "BLOCK",
            EventTag::Goal => "GOAL",
            EventTag::Penl => "PENL",
            EventTag::Delpen => "DELPEN",
            EventTag::Stop => "STOP",
            EventTag::Change => "CHANGE",
            EventTag::Pstr => "PSTR",
            EventTag::Pend => "PEND",
            EventTag::Gend => "GEND",
            EventTag::Soc => "SOC",
            EventTag::Eistr => "EISTR",
            EventTag::Eiend => "EIEND",
            EventTag::Anthem => "ANTHEM",
            EventTag::Pgstr => "PGSTR",
            EventTag::Pgend => "PGEND",
            EventTag::Chl => "CHL",
        }
    }

    /// `sort_value` used to order same-(period, period_seconds) events (§4.8).
    pub const fn sort_value(&self) -> i32 {
        match self {
            EventTag::Goal => 5,
            EventTag::Pstr => 7,
            EventTag::Change => 8,
            EventTag::Fac => 12,
            EventTag::Pend => 13,
            EventTag::Gend => 15,
            EventTag::Hit => 10,
            EventTag::Give => 10,
            EventTag::Take => 10,
            EventTag::Shot => 10,
            EventTag::Miss => 10,
            EventTag::Block => 10,
            EventTag::Penl => 9,
            EventTag::Delpen => 9,
            EventTag::Stop => 11,
            EventTag::Soc => 14,
            EventTag::Eistr => 1,
            EventTag::Eiend => 2,
            EventTag::Anthem => 3,
            EventTag::Pgstr => 4,
            EventTag::Pgend => 6,
            EventTag::Chl => 10,
        }
    }

    /// Whether this tag contributes to Corsi (all shot attempts).
    pub const fn is_corsi(&self) -> bool {
        matches!(self, EventTag::Shot | EventTag::Miss | EventTag::Block)
    }

    /// Whether this tag contributes to Fenwick (unblocked shot attempts).
    pub const fn is_fenwick(&self) -> bool {
        matches!(self, EventTag::Shot | EventTag::Miss)
    }
}

impl fmt::Display for EventTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for EventTag {
    type Err = ParseEventTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FAC" => Ok(EventTag::Fac),
            "HIT" => Ok(EventTag::Hit),
            "GIVE" => Ok(EventTag::Give),
            "TAKE" => Ok(EventTag::Take),
            "SHOT" => Ok(EventTag::Shot),
            "MISS" => Ok(EventTag::Miss),
            "BLOCK" => Ok(EventTag::Block),
            "GOAL" => Ok(EventTag::Goal),
            "PENL" => Ok(EventTag::Penl),
            "DELPEN" => Ok(EventTag::Delpen),
            "STOP" => Ok(EventTag::Stop),
            "CHANGE" => Ok(EventTag::Change),
            "PSTR" => Ok(EventTag::Pstr),
            "PEND" => Ok(EventTag::Pend),
            "GEND" => Ok(EventTag::Gend),
            "SOC" => Ok(EventTag::Soc),
            "EISTR" => Ok(EventTag::Eistr),
            "EIEND" => Ok(EventTag::Eiend),
            "ANTHEM" => Ok(EventTag::Anthem),
            "PGSTR" => Ok(EventTag::Pgstr),
            "PGEND" => Ok(EventTag::Pgend),
            "CHL" => Ok(EventTag::Chl),
            _ => Err(ParseEventTagError(s.to_string())),
        }
    }
}

/// `shot_type ∈ {WRIST, SNAP, SLAP, BACKHAND, DEFLECTED, TIP-IN, WRAP-AROUND,
/// POKE, BAT, BETWEEN LEGS}` (§3). A handful of codes contain spaces/hyphens,
/// so this stores the canonical label directly rather than deriving it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShotType {
    Wrist,
    Snap,
    Slap,
    Backhand,
    Deflected,
    TipIn,
    WrapAround,
    Poke,
    Bat,
    BetweenLegs,
}

impl ShotType {
    pub const fn code(&self) -> &'static str {
        match self {
            ShotType::Wrist => "WRIST",
            ShotType::Snap => "SNAP",
            ShotType::Slap => "SLAP",
            ShotType::Backhand => "BACKHAND",
            ShotType::Deflected => "DEFLECTED",
            ShotType::TipIn => "TIP-IN",
            ShotType::WrapAround => "WRAP-AROUND",
            ShotType::Poke => "POKE",
            ShotType::Bat => "BAT",
            ShotType::BetweenLegs => "BETWEEN LEGS",
        }
    }

    /// Shot types excluded from the "wrong side" mirror-fix heuristic in C9
    /// step 5 (close-in shot types whose long recorded distance is itself
    /// the anomaly, not a coordinate sign error).
    pub const fn excluded_from_distance_fix(&self) -> bool {
        matches!(
            self,
            ShotType::TipIn
                | ShotType::WrapAround
                | ShotType::Deflected
                | ShotType::Bat
                | ShotType::BetweenLegs
                | ShotType::Poke
        )
    }
}

impl fmt::Display for ShotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for ShotType {
    type Err = ParseEventTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "WRIST" => Ok(ShotType::Wrist),
            "SNAP" => Ok(ShotType::Snap),
            "SLAP" => Ok(ShotType::Slap),
            "BACKHAND" => Ok(ShotType::Backhand),
            "DEFLECTED" | "TIP" => Ok(ShotType::Deflected),
            "TIP-IN" => Ok(ShotType::TipIn),
            "WRAP-AROUND" | "WRAP" => Ok(ShotType::WrapAround),
            "POKE" => Ok(ShotType::Poke),
            "BAT" => Ok(ShotType::Bat),
            "BETWEEN LEGS" => Ok(ShotType::BetweenLegs),
            other => Err(ParseEventTagError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_round_trips() {
        for p in [
            Position::Center,
            Position::Left,
            Position::Right,
            Position::Defense,
            Position::Goalie,
        ] {
            assert_eq!(p.code().parse::<Position>().unwrap(), p);
        }
    }

    #[test]
    fn position_forward_classification() {
        assert!(Position::Center.is_forward());
        assert!(Position::Left.is_forward());
        assert!(!Position::Defense.is_forward());
        assert!(!Position::Goalie.is_forward());
    }

    #[test]
    fn session_game_type_round_trips() {
        assert_eq!(Session::from_game_type(2), Some(Session::Regular));
        assert_eq!(Session::Regular.game_type(), 2);
        assert_eq!(Session::from_game_type(9), None);
    }

    #[test]
    fn zone_flip_preserves_neutral() {
        assert_eq!(Zone::Offensive.flipped(), Zone::Defensive);
        assert_eq!(Zone::Defensive.flipped(), Zone::Offensive);
        assert_eq!(Zone::Neutral.flipped(), Zone::Neutral);
    }

    #[test]
    fn event_tag_sort_values_order_goal_before_faceoff() {
        assert!(EventTag::Goal.sort_value() < EventTag::Fac.sort_value());
        assert!(EventTag::Pstr.sort_value() < EventTag::Fac.sort_value());
    }

    #[test]
    fn shot_type_parses_hyphenated_codes() {
        assert_eq!("TIP-IN".parse::<ShotType>().unwrap(), ShotType::TipIn);
        assert_eq!("WRAP-AROUND".parse::<ShotType>().unwrap(), ShotType::WrapAround);
        assert!(ShotType::TipIn.excluded_from_distance_fix());
        assert!(!ShotType::Wrist.excluded_from_distance_fix());
    }

    #[test]
    fn corsi_fenwick_classification() {
        assert!(EventTag::Block.is_corsi());
        assert!(!EventTag::Block.is_fenwick());
        assert!(EventTag::Shot.is_fenwick());
    }
}
