//! End-to-end wiring: shifts -> changes -> on-ice reconstruction ->
//! aggregation, checked against the aggregator laws and the universal
//! invariants (game_seconds, strength_state, score_diff, danger flags).

use nhl_pbp::{
    aggregate_game, build_changes, reconstruct, sort_changes, sort_timeline, Event, EventPlayer,
    EventTag, GameId, OnIceSet, PbpRow, PenaltyDetail, PlayerRole, PlayerRoleTagged, PlayerStatus,
    Position, Roster, RosterEntry, Session, Shift, ShotDetail, TeamJersey, TeamVenue, Zone,
};

const GAME: GameId = GameId::new(9000000001);

fn roster() -> Roster {
    let player = |team: &str, jersey: i32, eh_id: &str, position: Position, venue: TeamVenue| RosterEntry {
        game_id: GAME,
        team: team.to_string(),
        jersey,
        player_name: eh_id.replace('.', " "),
        eh_id: eh_id.to_string(),
        api_id: None,
        position,
        team_venue: venue,
        starter: true,
        status: PlayerStatus::Active,
    };
    Roster {
        entries: vec![
            player("HOM", 9, "HOM.F", Position::Center, TeamVenue::Home),
            player("HOM", 30, "HOM.G", Position::Goalie, TeamVenue::Home),
            player("AWY", 9, "AWY.F", Position::Center, TeamVenue::Away),
            player("AWY", 30, "AWY.G", Position::Goalie, TeamVenue::Away),
        ],
    }
}

fn full_period_shift(team: &str, jersey: i32, goalie: bool, venue: TeamVenue) -> Shift {
    Shift {
        game_id: GAME,
        team_jersey: TeamJersey::new(team, jersey),
        period: 1,
        shift_count: 1,
        start_time_seconds: 0,
        end_time_seconds: 1200,
        goalie,
        team_venue: venue,
    }
}

fn resolved(eh_id: &str, position: Position, role: PlayerRole) -> Option<EventPlayer> {
    Some(EventPlayer::Resolved {
        name: eh_id.replace('.', " "),
        eh_id: eh_id.to_string(),
        api_id: None,
        position: Some(position),
        role: PlayerRoleTagged(role),
    })
}

fn base_event(period_seconds: i64, tag: EventTag, event_team: &str, opp_team: &str, zone: Zone) -> Event {
    Event {
        game_id: GAME,
        event_idx: period_seconds,
        event_idx_api: None,
        event: tag,
        version: 1,
        event_team: Some(event_team.to_string()),
        opp_team: Some(opp_team.to_string()),
        period: 1,
        period_seconds,
        game_seconds: period_seconds,
        coords_x: None,
        coords_y: None,
        zone: Some(zone),
        player_1: None,
        player_2: None,
        player_3: None,
        opp_goalie: None,
        shot: None,
        penalty: None,
        event_team_on_ice: OnIceSet::default(),
        opp_team_on_ice: OnIceSet::default(),
        strength_state: None,
        score_state: None,
        score_diff: None,
        home_score: 0,
        away_score: 0,
        event_length: 0,
        indicators: Default::default(),
    }
}

fn build_pbp_rows() -> Vec<PbpRow> {
    let roster = roster();
    let shifts = vec![
        full_period_shift("HOM", 9, false, TeamVenue::Home),
        full_period_shift("HOM", 30, true, TeamVenue::Home),
        full_period_shift("AWY", 9, false, TeamVenue::Away),
        full_period_shift("AWY", 30, true, TeamVenue::Away),
    ];

    let mut changes = build_changes(GAME, "HOM", false, |_| false, &roster, &shifts);
    changes.extend(build_changes(GAME, "AWY", true, |_| false, &roster, &shifts));
    sort_changes(&mut changes);

    let mut fac = base_event(5, EventTag::Fac, "HOM", "AWY", Zone::Neutral);
    fac.player_1 = resolved("HOM.F", Position::Center, PlayerRole::Winner);
    fac.player_2 = resolved("AWY.F", Position::Center, PlayerRole::Loser);

    let mut shot = base_event(10, EventTag::Shot, "HOM", "AWY", Zone::Offensive);
    shot.coords_x = Some(70.0);
    shot.coords_y = Some(-5.0);
    shot.shot = Some(ShotDetail { pbp_distance: Some(20.0), ..Default::default() });
    shot.player_1 = resolved("HOM.F", Position::Center, PlayerRole::Shooter);

    let mut block = base_event(20, EventTag::Block, "AWY", "HOM", Zone::Offensive);
    block.player_1 = resolved("AWY.F", Position::Center, PlayerRole::Blocker);
    block.player_2 = resolved("HOM.F", Position::Center, PlayerRole::Shooter);

    let mut goal = base_event(30, EventTag::Goal, "HOM", "AWY", Zone::Offensive);
    goal.shot = Some(ShotDetail::default());
    goal.player_1 = resolved("HOM.F", Position::Center, PlayerRole::GoalScorer);
    let _ = PenaltyDetail::default(); // no penalties in this fixture

    let mut rows: Vec<PbpRow> = changes.into_iter().map(PbpRow::Change).collect();
    rows.push(PbpRow::Event(fac));
    rows.push(PbpRow::Event(shot));
    rows.push(PbpRow::Event(block));
    rows.push(PbpRow::Event(goal));

    sort_timeline(&mut rows, Session::Regular);
    reconstruct(&mut rows, &roster, Session::Regular);
    rows
}

#[test]
fn changes_balance_across_the_period() {
    let rows = build_pbp_rows();
    for team in ["HOM", "AWY"] {
        let total_on: usize = rows
            .iter()
            .filter_map(|r| match r {
                PbpRow::Change(c) if c.team == team => Some(c.change_on_count()),
                _ => None,
            })
            .sum();
        let total_off: usize = rows
            .iter()
            .filter_map(|r| match r {
                PbpRow::Change(c) if c.team == team => Some(c.change_off_count()),
                _ => None,
            })
            .sum();
        assert_eq!(total_on, total_off, "{team} roster does not balance");
    }
}

#[test]
fn goal_updates_home_score_and_score_diff() {
    let rows = build_pbp_rows();
    let goal = rows
        .iter()
        .find_map(|r| match r {
            PbpRow::Event(e) if e.event == EventTag::Goal => Some(e),
            _ => None,
        })
        .unwrap();
    assert_eq!(goal.home_score, 1);
    assert_eq!(goal.away_score, 0);
    assert_eq!(goal.score_diff, Some(1));
}

#[test]
fn on_ice_sets_are_populated_from_changes() {
    let rows = build_pbp_rows();
    let shot = rows
        .iter()
        .find_map(|r| match r {
            PbpRow::Event(e) if e.event == EventTag::Shot => Some(e),
            _ => None,
        })
        .unwrap();
    assert_eq!(shot.strength_state.as_deref(), Some("1v1"));
    assert!(shot.event_team_on_ice.forwards.iter().any(|s| s.eh_id == "HOM.F"));
    assert!(shot.opp_team_on_ice.forwards.iter().any(|s| s.eh_id == "AWY.F"));
}

#[test]
fn danger_flags_are_mutually_exclusive() {
    let rows = build_pbp_rows();
    let shot = rows
        .iter()
        .find_map(|r| match r {
            PbpRow::Event(e) if e.event == EventTag::Shot => Some(e),
            _ => None,
        })
        .unwrap();
    let detail = shot.shot.as_ref().unwrap();
    assert!(!(detail.danger && detail.high_danger));
}

#[test]
fn aggregator_laws_hold_for_every_player_row() {
    let rows = build_pbp_rows();
    let result = aggregate_game(&rows);

    for oi in &result.oi {
        assert_eq!(oi.cf, oi.sf + oi.msf + oi.bsf, "cf law broken for {}", oi.eh_id);
        assert_eq!(oi.ff, oi.sf + oi.msf, "ff law broken for {}", oi.eh_id);
        assert_eq!(oi.ozf + oi.nzf + oi.dzf, oi.fow, "faceoff zone split broken for {}", oi.eh_id);
    }

    let hom_team_total_gf: i32 = result.team_stats.iter().filter(|t| t.team == "HOM").map(|t| t.oi.gf).sum();
    assert_eq!(hom_team_total_gf, 1);
}

#[test]
fn shooter_credited_with_blocked_attempt_and_blocker_with_ibs() {
    let rows = build_pbp_rows();
    let result = aggregate_game(&rows);

    let shooter = result.ind.iter().find(|r| r.eh_id == "HOM.F").unwrap();
    assert_eq!(shooter.icf, 2); // one shot on net, one blocked attempt
    assert_eq!(shooter.isf, 1);
    assert_eq!(shooter.g, 1);

    let blocker = result.ind.iter().find(|r| r.eh_id == "AWY.F").unwrap();
    assert_eq!(blocker.ibs, 1);
}
