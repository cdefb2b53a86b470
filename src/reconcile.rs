//! Event reconciler (C8, §4.8): match each HTML event to at most one API
//! event within the same bucket and merge fields.

use std::collections::HashMap;

use crate::model::enums::EventTag;
use crate::model::event::{Event, EventPlayer};

fn eh_id_of(player: &Option<EventPlayer>) -> String {
    player.as_ref().map(|p| p.eh_id().to_string()).unwrap_or_default()
}

fn is_non_team_tag(tag: EventTag) -> bool {
    matches!(
        tag,
        EventTag::Stop
            | EventTag::Pstr
            | EventTag::Pend
            | EventTag::Gend
            | EventTag::Soc
            | EventTag::Eistr
            | EventTag::Eiend
            | EventTag::Anthem
            | EventTag::Pgstr
            | EventTag::Pgend
    )
}

fn is_unresolved_blocker(event: &Event) -> bool {
    matches!(event.event, EventTag::Block) && matches!(event.player_1, Some(EventPlayer::Sentinel { .. }) | None)
}

/// Keys for an event under each of the match strategies in §4.8's table.
/// Multiple strategies are computed per event; which one applies is decided
/// by event class, not by key shape, so these are plain tuples rather than
/// a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum MatchKey {
    NonTeamOrBareChl(EventTag, i32, i64, i32),
    ChlWithTeam(EventTag, i32, i64, i32, String),
    Penl(EventTag, String, String, String, String, i32, i64),
    BlockTeammate(EventTag, String, i32, i64, i32),
    FacFallback(EventTag, i32, i64, i32),
    Default(EventTag, String, String, i32, i64, i32),
}

fn match_key(event: &Event) -> MatchKey {
    let team = event.event_team.clone().unwrap_or_default();
    match event.event {
        tag if is_non_team_tag(tag) => {
            MatchKey::NonTeamOrBareChl(tag, event.period, event.period_seconds, event.version)
        }
        EventTag::Chl if event.event_team.is_none() => {
            MatchKey::NonTeamOrBareChl(EventTag::Chl, event.period, event.period_seconds, event.version)
        }
        EventTag::Chl => MatchKey::ChlWithTeam(EventTag::Chl, event.period, event.period_seconds, event.version, team),
        EventTag::Penl => MatchKey::Penl(
            EventTag::Penl,
            team,
            eh_id_of(&event.player_1),
            eh_id_of(&event.player_2),
            eh_id_of(&event.player_3),
            event.period,
            event.period_seconds,
        ),
        EventTag::Block if is_unresolved_blocker(event) => {
            MatchKey::BlockTeammate(EventTag::Block, team, event.period, event.period_seconds, event.version)
        }
        tag => MatchKey::Default(tag, team, eh_id_of(&event.player_1), event.period, event.period_seconds, event.version),
    }
}

fn fac_fallback_key(event: &Event) -> MatchKey {
    MatchKey::FacFallback(EventTag::Fac, event.period, event.period_seconds, event.version)
}

/// Merge API-only fields into an HTML event on a unique match: `event_idx_api`,
/// coordinates, player `api_id`s/roles, and the `player_1` override for the
/// TEAMMATE-block case (§4.8).
fn merge(html_event: &mut Event, api_event: &Event) {
    html_event.event_idx_api = api_event.event_idx_api;
    if html_event.coords_x.is_none() {
        html_event.coords_x = api_event.coords_x;
    }
    if html_event.coords_y.is_none() {
        html_event.coords_y = api_event.coords_y;
    }

    if is_unresolved_blocker(html_event) {
        if let Some(resolved) = &api_event.player_1 {
            html_event.player_1 = Some(resolved.clone());
        }
    }

    merge_player_api_id(&mut html_event.player_1, &api_event.player_1);
    merge_player_api_id(&mut html_event.player_2, &api_event.player_2);
    merge_player_api_id(&mut html_event.player_3, &api_event.player_3);
}

fn merge_player_api_id(html_player: &mut Option<EventPlayer>, api_player: &Option<EventPlayer>) {
    let (Some(EventPlayer::Resolved { api_id, role, .. }), Some(EventPlayer::Resolved { api_id: new_id, role: new_role, .. })) =
        (html_player.as_mut(), api_player.as_ref())
    else {
        return;
    };
    *api_id = *new_id;
    *role = *new_role;
}

/// Build an index from every match-key strategy to candidate API events,
/// so a single pass can serve all of §4.8's branches.
struct ApiIndex {
    by_key: HashMap<MatchKey, Vec<usize>>,
}

impl ApiIndex {
    fn build(api_events: &[Event]) -> Self {
        let mut by_key: HashMap<MatchKey, Vec<usize>> = HashMap::new();
        for (idx, event) in api_events.iter().enumerate() {
            by_key.entry(match_key(event)).or_default().push(idx);
            by_key.entry(fac_fallback_key(event)).or_default().push(idx);
        }
        Self { by_key }
    }

    fn first_match<'a>(&self, key: &MatchKey, api_events: &'a [Event]) -> Option<&'a Event> {
        self.by_key.get(key).and_then(|idxs| idxs.first()).map(|&i| &api_events[i])
    }
}

/// Reconcile HTML events against API events (§4.8): on a unique match, merge
/// API-only fields into the HTML event; on no match, keep the HTML event
/// unchanged. FAC events that fail their primary key fall back to the
/// coarser `(event, period, period_seconds, version)` key.
pub fn reconcile(mut html_events: Vec<Event>, api_events: Vec<Event>) -> Vec<Event> {
    let index = ApiIndex::build(&api_events);

    for event in html_events.iter_mut() {
        let key = match_key(event);
        let found = index.first_match(&key, &api_events);
        let found = found.or_else(|| {
            if event.event == EventTag::Fac {
                index.first_match(&fac_fallback_key(event), &api_events)
            } else {
                None
            }
        });
        if let Some(api_event) = found {
            merge(event, api_event);
        }
    }

    html_events
}
