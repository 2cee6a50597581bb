//! Classic slate derivation: each game set offering a "Classic" game style,
//! joined with its classic draft groups and placed on the local clock.

use crate::constants::{CLASSIC, NFL_CLASSIC_GAME_TYPE_ID};
use crate::documents::{DraftGroupDocument, GameSetDocument, GetContestsDocument, SlateDocument};
use crate::error::DkResult;
use crate::teams::TeamLookup;
use chrono::{DateTime, Datelike, Timelike, Weekday};
use chrono_tz::Tz;
use log::{debug, warn};
use std::ops::RangeInclusive;

/// Local hours a main slate's first and last kickoff fall in.
const MAIN_SLATE_HOURS: RangeInclusive<u32> = 13..=16;

/// Slates for every classic game set that can be placed on the clock. A game
/// set whose window or teams cannot be derived is logged and left out.
pub fn classic_slates(
    doc: &GetContestsDocument,
    tz: Tz,
    teams: &impl TeamLookup,
) -> Vec<SlateDocument> {
    let mut slates = Vec::new();
    for game_set in doc.game_sets.iter().filter(|gs| gs.has_game_style(CLASSIC)) {
        if game_set.competitions.is_empty() {
            warn!("classic game set {} has no competitions; skipping", game_set.game_set_key);
            continue;
        }
        match build_slate(game_set, &doc.draft_groups, tz, teams) {
            Ok(slate) => slates.push(slate),
            Err(e) => warn!("classic game set {}: {e}; skipping", game_set.game_set_key),
        }
    }
    slates
}

/// Sunday afternoon: both ends of the window on a Sunday, kickoff hours 13
/// through 16 local.
pub fn is_main_slate_window(starts: &DateTime<Tz>, ends: &DateTime<Tz>) -> bool {
    [starts, ends]
        .iter()
        .all(|t| t.weekday() == Weekday::Sun && MAIN_SLATE_HOURS.contains(&t.hour()))
}

fn build_slate(
    game_set: &GameSetDocument,
    draft_groups: &[DraftGroupDocument],
    tz: Tz,
    teams: &impl TeamLookup,
) -> DkResult<SlateDocument> {
    let groups: Vec<&DraftGroupDocument> = draft_groups
        .iter()
        .filter(|g| {
            g.game_set_key.as_deref() == Some(game_set.game_set_key.as_str())
                && g.game_type_id == Some(NFL_CLASSIC_GAME_TYPE_ID)
        })
        .collect();
    if groups.is_empty() {
        warn!("classic game set {} has no classic draft group", game_set.game_set_key);
    }

    let (slate_starts, slate_ends) = game_set.slate_window(tz)?;
    let is_main_slate = is_main_slate_window(&slate_starts, &slate_ends);
    debug!(
        "slate {}: {} games, {} - {}{}",
        game_set.game_set_key,
        game_set.n_games(),
        slate_starts,
        slate_ends,
        if is_main_slate { " (main)" } else { "" }
    );

    Ok(SlateDocument {
        sport: groups.iter().find_map(|g| g.sport.clone()),
        n_games: game_set.n_games(),
        game_set_key: game_set.game_set_key.clone(),
        draft_group_ids: groups.iter().map(|g| g.draft_group_id).collect(),
        slate_starts,
        slate_ends,
        teams: game_set.slate_teams(teams)?,
        player_salaries: None,
        is_main_slate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::{DEFAULT_TIMEZONE, parse_local};

    fn local(s: &str) -> DateTime<Tz> {
        parse_local(s, DEFAULT_TIMEZONE).unwrap()
    }

    #[test]
    fn sunday_afternoon_is_main() {
        assert!(is_main_slate_window(
            &local("2021-09-12T17:00:00Z"),
            &local("2021-09-12T20:25:00Z")
        ));
    }

    #[test]
    fn night_and_weekday_windows_are_not_main() {
        // Sunday night into Monday night.
        assert!(!is_main_slate_window(
            &local("2021-09-13T00:20:00Z"),
            &local("2021-09-14T00:15:00Z")
        ));
        // Thursday night.
        assert!(!is_main_slate_window(
            &local("2021-09-10T00:20:00Z"),
            &local("2021-09-10T00:20:00Z")
        ));
        // Sunday early window that runs into the night game.
        assert!(!is_main_slate_window(
            &local("2021-09-12T17:00:00Z"),
            &local("2021-09-13T00:20:00Z")
        ));
    }

    #[test]
    fn underivable_game_sets_are_skipped() {
        let classic = serde_json::json!([{"name": "Classic"}]);
        let doc: GetContestsDocument = serde_json::from_value(serde_json::json!({
            "game_sets": [
                {
                    "game_set_key": "PRO_BOWL",
                    "game_styles": classic,
                    "competitions": [{"description": "AFC @ NFC", "start_date": "2022-02-06T20:00:00Z"}]
                },
                {
                    "game_set_key": "NO_KICKOFF",
                    "game_styles": classic,
                    "competitions": [{"description": "BAL @ LV"}]
                },
                {
                    "game_set_key": "MAIN",
                    "game_styles": classic,
                    "competitions": [{"description": "PHI @ ATL", "start_date": "2021-09-12T17:00:00Z"}]
                }
            ],
            "draft_groups": [{"draft_group_id": 53019, "game_set_key": "MAIN", "game_type_id": 1}]
        }))
        .unwrap();

        let slates = classic_slates(&doc, DEFAULT_TIMEZONE, &crate::teams::NflTeams);
        assert_eq!(slates.len(), 1);
        assert_eq!(slates[0].game_set_key, "MAIN");
        assert_eq!(slates[0].draft_group_ids, vec![53019]);
        assert!(slates[0].is_main_slate);
    }

    #[test]
    fn london_morning_start_is_not_main() {
        assert!(!is_main_slate_window(
            &local("2021-10-10T13:30:00Z"),
            &local("2021-10-10T20:25:00Z")
        ));
    }
}
