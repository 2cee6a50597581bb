//! Object model for the lobby (`getcontests`) and draftables payloads.
//!
//! Field names are the operator's keys after snake-casing, so the short
//! contest keys (`n`, `a`, `dg`, ...) survive as-is. Every record keeps
//! unrecognised keys in a flattened `extra` map while it is being built; the
//! parser rejects them in strict mode and clears them otherwise.

use crate::error::{DkError, DkResult};
use crate::teams::TeamLookup;
use crate::time::parse_timestamp;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A record the parser can build from a normalized JSON object.
pub trait Document: DeserializeOwned {
    const NAME: &'static str;

    fn extra(&self) -> &Map<String, Value>;
    fn extra_mut(&mut self) -> &mut Map<String, Value>;
}

macro_rules! impl_document {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl Document for $ty {
                const NAME: &'static str = stringify!($ty);

                fn extra(&self) -> &Map<String, Value> {
                    &self.extra
                }

                fn extra_mut(&mut self) -> &mut Map<String, Value> {
                    &mut self.extra
                }
            }
        )+
    };
}

impl_document!(
    AttributesDocument,
    DraftStatsDocument,
    TournamentDocument,
    CompetitionDocument,
    GameStyleDocument,
    GameSetDocument,
    GameTypeDocument,
    ContestDocument,
    DraftGroupDocument,
    GetContestsDocument,
    PlayerDocument,
    DraftablesDocument,
);

/// A typed attribute of a player, such as a draft-stat value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributesDocument {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub type_id: Option<i64>,
    pub id: Option<i64>,
    pub name: Option<String>,
    pub value: Option<String>,
    pub filterable: Option<bool>,
    pub sort_value: Option<String>,
    pub prompt: Option<String>,
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

/// Definition of a stat referenced by [`AttributesDocument::id`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftStatsDocument {
    pub id: i64,
    pub abbr: String,
    pub name: String,
    pub order: i64,
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

/// The lobby's long-form contest record. Only linked to [`ContestDocument`]
/// through the shared draft group id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentDocument {
    pub tournament_key: String,
    pub name: String,
    pub draft_group_id: i64,
    pub is_visible: Option<bool>,
    pub sort_order: Option<i64>,
    pub status: Option<i64>,
    pub entrants: Option<i64>,
    pub contest_attributes: Option<Value>,
    pub maximum_entries: Option<i64>,
    pub maximum_entries_per_user: Option<i64>,
    pub entry_fee: Option<f64>,
    pub accepted_tickets: Option<Value>,
    pub total_payouts: Option<f64>,
    pub payout_descriptions: Option<Value>,
    pub fpp_award: Option<i64>,
    pub payout_summaries: Option<Value>,
    pub sport_id: Option<i64>,
    pub crown_amount: Option<i64>,
    pub ticket_only_entry: Option<bool>,
    pub start_time: Option<String>,
    pub start_time_type: Option<Value>,
    pub game_set_key: Option<String>,
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

/// One game inside a game set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompetitionDocument {
    pub game_id: Option<i64>,
    pub away_team_id: Option<i64>,
    pub home_team_id: Option<i64>,
    pub home_team_score: Option<i64>,
    pub away_team_score: Option<i64>,
    pub home_team_city: Option<String>,
    pub away_team_city: Option<String>,
    pub home_team_name: Option<String>,
    pub away_team_name: Option<String>,
    pub start_date: Option<String>,
    pub location: Option<String>,
    pub last_play: Option<Value>,
    pub team_with_possession: Option<i64>,
    pub time_remaining_status: Option<String>,
    pub sport: Option<String>,
    pub status: Option<String>,
    /// `"AWAY @ HOME"` in the operator's abbreviations.
    pub description: Option<String>,
    pub full_description: Option<String>,
    pub exceptional_messages: Option<Value>,
    pub series_type: Option<i64>,
    pub number_of_games_in_series: Option<i64>,
    pub series_info: Option<Value>,
    pub home_team_competition_ordinal: Option<i64>,
    pub away_team_competition_ordinal: Option<i64>,
    pub home_team_competition_count: Option<i64>,
    pub away_team_competition_count: Option<i64>,
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

impl CompetitionDocument {
    /// Standardized `[away, home]` codes taken from the description.
    pub fn team_codes(&self, teams: &impl TeamLookup) -> DkResult<Vec<String>> {
        let description = self.description.as_deref().ok_or_else(|| {
            DkError::InconsistentData(format!("competition {:?} has no description", self.game_id))
        })?;
        let mut sides = description.split('@').map(str::trim);
        match (sides.next(), sides.next(), sides.next()) {
            (Some(away), Some(home), None) if !away.is_empty() && !home.is_empty() => Ok(vec![
                teams.standardize_team_code(away)?,
                teams.standardize_team_code(home)?,
            ]),
            _ => Err(DkError::InconsistentData(format!(
                "competition description `{description}` is not `AWAY @ HOME`"
            ))),
        }
    }

    /// Standardized `[away, home]` full names built from city and nickname.
    pub fn team_names(&self, teams: &impl TeamLookup) -> DkResult<Vec<String>> {
        let full_name = |city: &Option<String>, name: &Option<String>| {
            let joined = [city.as_deref(), name.as_deref()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" ");
            if joined.is_empty() {
                Err(DkError::InconsistentData(format!(
                    "competition {:?} is missing a team name",
                    self.game_id
                )))
            } else {
                Ok(joined)
            }
        };
        let away = full_name(&self.away_team_city, &self.away_team_name)?;
        let home = full_name(&self.home_team_city, &self.home_team_name)?;
        Ok(vec![
            teams.standardize_team_name(&away)?,
            teams.standardize_team_name(&home)?,
        ])
    }

    pub fn starts_at(&self) -> DkResult<DateTime<Utc>> {
        let raw = self.start_date.as_deref().ok_or_else(|| {
            DkError::InconsistentData(format!("competition {:?} has no start date", self.game_id))
        })?;
        parse_timestamp(raw)
    }
}

/// Contest format metadata ("Classic", "Showdown Captain Mode", ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStyleDocument {
    pub game_id: Option<i64>,
    pub game_style_id: Option<i64>,
    pub sport_id: Option<i64>,
    pub sort_order: Option<i64>,
    pub name: Option<String>,
    pub abbreviation: Option<String>,
    pub description: Option<String>,
    pub is_enabled: Option<bool>,
    pub attributes: Option<Value>,
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

/// A slate: games that share one scheduling window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSetDocument {
    pub game_set_key: String,
    #[serde(default)]
    pub competitions: Vec<CompetitionDocument>,
    #[serde(default)]
    pub game_styles: Vec<GameStyleDocument>,
    pub contest_start_time_suffix: Option<Value>,
    pub sort_order: Option<i64>,
    pub min_start_time: Option<String>,
    pub tag: Option<String>,
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

impl GameSetDocument {
    pub fn n_games(&self) -> usize {
        self.competitions.len()
    }

    pub fn has_game_style(&self, name: &str) -> bool {
        self.game_styles.iter().any(|gs| gs.name.as_deref() == Some(name))
    }

    /// Earliest and latest competition start, in `tz`.
    pub fn slate_window(&self, tz: Tz) -> DkResult<(DateTime<Tz>, DateTime<Tz>)> {
        let starts = self
            .competitions
            .iter()
            .map(CompetitionDocument::starts_at)
            .collect::<DkResult<Vec<_>>>()?;
        match (starts.iter().min(), starts.iter().max()) {
            (Some(first), Some(last)) => Ok((first.with_timezone(&tz), last.with_timezone(&tz))),
            _ => Err(DkError::NotFound(format!(
                "game set {} has no competitions",
                self.game_set_key
            ))),
        }
    }

    pub fn slate_starts(&self, tz: Tz) -> DkResult<DateTime<Tz>> {
        self.slate_window(tz).map(|(start, _)| start)
    }

    pub fn slate_ends(&self, tz: Tz) -> DkResult<DateTime<Tz>> {
        self.slate_window(tz).map(|(_, end)| end)
    }

    /// Every team code on the slate, first appearance wins.
    pub fn slate_teams(&self, teams: &impl TeamLookup) -> DkResult<Vec<String>> {
        let mut out: Vec<String> = Vec::with_capacity(self.competitions.len() * 2);
        for competition in &self.competitions {
            for code in competition.team_codes(teams)? {
                if !out.contains(&code) {
                    out.push(code);
                }
            }
        }
        Ok(out)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameTypeDocument {
    pub game_type_id: i64,
    pub sport_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub tag: Option<String>,
    pub draft_type: Option<String>,
    /// Sent as a single object by the lobby; the parser also accepts a list.
    #[serde(default)]
    pub game_style: Vec<GameStyleDocument>,
    pub is_season_long: Option<bool>,
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

/// One lobby contest, keyed with the operator's short names.
///
/// The documented keys have accessors below; the rest are carried through
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContestDocument {
    pub uc: Option<i64>,
    pub ec: Option<i64>,
    pub mec: Option<i64>,
    pub fpp: Option<i64>,
    pub s: Option<i64>,
    /// Display name.
    pub n: Option<String>,
    pub attr: Option<Value>,
    pub nt: Option<i64>,
    /// Maximum entrants.
    pub m: Option<i64>,
    /// Entry fee.
    pub a: Option<f64>,
    pub po: Option<f64>,
    pub pd: Option<Value>,
    pub tix: Option<bool>,
    /// Start-time descriptor such as `"Sun 1:00PM"`.
    pub sdstring: Option<String>,
    /// Start timestamp, ISO-8601 or `/Date(ms)/`.
    pub sd: Option<String>,
    pub id: Option<i64>,
    pub tmpl: Option<i64>,
    pub pt: Option<i64>,
    pub so: Option<i64>,
    pub fwt: Option<bool>,
    pub is_owner: Option<bool>,
    pub start_time_type: Option<i64>,
    /// Draft group id; must match an entry in the same response's draft groups.
    pub dg: Option<i64>,
    pub ulc: Option<i64>,
    pub cs: Option<i64>,
    /// Game-type tag such as `"Classic"`.
    pub game_type: Option<String>,
    pub ssd: Option<Value>,
    pub dgpo: Option<f64>,
    pub cso: Option<i64>,
    pub ir: Option<i64>,
    pub rl: Option<bool>,
    pub rlc: Option<i64>,
    pub rll: Option<i64>,
    pub sa: Option<bool>,
    pub free_with_crowns: Option<bool>,
    pub crown_amount: Option<i64>,
    pub is_bonus_finalized: Option<bool>,
    pub is_snake_draft: Option<bool>,
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

impl ContestDocument {
    pub fn name(&self) -> &str {
        self.n.as_deref().unwrap_or_default()
    }

    pub fn entry_fee(&self) -> Option<f64> {
        self.a
    }

    pub fn max_entrants(&self) -> Option<i64> {
        self.m
    }

    pub fn draft_group_id(&self) -> Option<i64> {
        self.dg
    }

    pub fn start_descriptor(&self) -> &str {
        self.sdstring.as_deref().unwrap_or_default()
    }

    pub fn start_time(&self) -> DkResult<DateTime<Utc>> {
        let raw = self.sd.as_deref().ok_or_else(|| {
            DkError::InconsistentData(format!("contest {:?} has no start date", self.id))
        })?;
        parse_timestamp(raw)
    }

    pub fn is_classic(&self) -> bool {
        self.game_type.as_deref() == Some(crate::constants::CLASSIC)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftGroupDocument {
    pub draft_group_id: i64,
    pub contest_type_id: Option<i64>,
    pub start_date: Option<String>,
    pub start_date_est: Option<String>,
    pub sort_order: Option<i64>,
    pub draft_group_tag: Option<String>,
    pub game_type_id: Option<i64>,
    pub game_type: Option<Value>,
    pub sport_sort_order: Option<i64>,
    pub sport: Option<String>,
    pub game_count: Option<i64>,
    pub contest_start_time_suffix: Option<Value>,
    pub contest_start_time_type: Option<i64>,
    pub games: Option<Value>,
    pub draft_group_series_id: Option<i64>,
    pub game_set_key: Option<String>,
    pub allow_ugc: Option<bool>,
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

/// Root of the `getcontests` lobby response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetContestsDocument {
    #[serde(default)]
    pub contests: Vec<ContestDocument>,
    #[serde(default)]
    pub tournaments: Vec<TournamentDocument>,
    #[serde(default)]
    pub draft_groups: Vec<DraftGroupDocument>,
    #[serde(default)]
    pub game_sets: Vec<GameSetDocument>,
    #[serde(default)]
    pub game_types: Vec<GameTypeDocument>,
    #[serde(default)]
    pub user_prizes: Vec<Value>,
    pub marketing_offers: Option<Value>,
    pub direct_challenge_modal: Option<Value>,
    pub deposit_transaction: Option<Value>,
    pub show_raf_link: Option<Value>,
    pub prize_redemption_model: Option<Value>,
    pub prize_redemption_pop: Option<Value>,
    pub use_raptor_head_to_head: Option<Value>,
    pub use_jsweb_lobby_modals: Option<Value>,
    pub show_game_style_filter: Option<Value>,
    pub sport_menu_items: Option<Value>,
    pub user_geo_location: Option<Value>,
    pub show_ads: Option<Value>,
    pub is_vip: Option<Value>,
    pub ads_enabled: Option<Value>,
    /// Derived once by the parser; see [`crate::slates`].
    #[serde(skip)]
    pub classic_slates: Vec<SlateDocument>,
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

/// One draftable entry: a player at a roster slot with that slot's salary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerDocument {
    pub draftable_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub display_name: String,
    pub short_name: String,
    pub player_id: i64,
    pub player_dk_id: i64,
    pub team_id: i64,
    pub team_abbreviation: String,
    pub position: String,
    pub roster_slot_id: i64,
    pub salary: i64,
    pub status: String,
    pub is_swappable: Option<bool>,
    pub is_disabled: Option<bool>,
    pub news_status: Option<String>,
    pub player_image50: Option<String>,
    pub player_image160: Option<String>,
    pub alt_player_image50: Option<String>,
    pub alt_player_image160: Option<String>,
    #[serde(default)]
    pub draft_stat_attributes: Vec<AttributesDocument>,
    #[serde(default)]
    pub player_attributes: Vec<AttributesDocument>,
    pub team_league_season_attributes: Option<Value>,
    pub player_game_attributes: Option<Value>,
    pub draft_alerts: Option<Value>,
    pub player_game_hash: Option<String>,
    pub competition: Option<Value>,
    pub competitions: Option<Value>,
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

/// Identity and salary slice of a [`PlayerDocument`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerSalaryDocument {
    pub draftable_id: i64,
    pub player_id: i64,
    pub player_dk_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub display_name: String,
    pub position: String,
    pub team_abbreviation: String,
    pub roster_slot_id: i64,
    pub salary: i64,
}

impl From<&PlayerDocument> for PlayerSalaryDocument {
    fn from(p: &PlayerDocument) -> Self {
        Self {
            draftable_id: p.draftable_id,
            player_id: p.player_id,
            player_dk_id: p.player_dk_id,
            first_name: p.first_name.clone(),
            last_name: p.last_name.clone(),
            display_name: p.display_name.clone(),
            position: p.position.clone(),
            team_abbreviation: p.team_abbreviation.clone(),
            roster_slot_id: p.roster_slot_id,
            salary: p.salary,
        }
    }
}

/// Root of the draftables response for one draft group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftablesDocument {
    #[serde(default)]
    pub draftables: Vec<PlayerDocument>,
    #[serde(default)]
    pub competitions: Vec<Value>,
    #[serde(default)]
    pub teams_without_competitions: Vec<Value>,
    #[serde(default)]
    pub draft_alerts: Vec<Value>,
    #[serde(default)]
    pub draft_stats: Vec<DraftStatsDocument>,
    #[serde(default)]
    pub player_game_attributes: Vec<Value>,
    pub error_status: Option<Value>,
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

/// A classic game set joined with its draft groups.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlateDocument {
    pub sport: Option<String>,
    pub n_games: usize,
    pub game_set_key: String,
    pub draft_group_ids: Vec<i64>,
    pub slate_starts: DateTime<Tz>,
    pub slate_ends: DateTime<Tz>,
    pub teams: Vec<String>,
    pub player_salaries: Option<Vec<PlayerSalaryDocument>>,
    pub is_main_slate: bool,
}

impl SlateDocument {
    pub fn with_player_salaries(mut self, salaries: Vec<PlayerSalaryDocument>) -> Self {
        self.player_salaries = Some(salaries);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::teams::NflTeams;
    use chrono::{Datelike, NaiveDate, Timelike};

    fn competition(description: &str, start: &str) -> CompetitionDocument {
        CompetitionDocument {
            description: Some(description.into()),
            start_date: Some(start.into()),
            ..Default::default()
        }
    }

    #[test]
    fn competition_team_codes_are_away_then_home() {
        let c = competition("PHI @ ATL", "2021-09-12T17:00:00.0000000Z");
        assert_eq!(c.team_codes(&NflTeams).unwrap(), vec!["PHI", "ATL"]);
    }

    #[test]
    fn competition_team_codes_reject_bad_descriptions() {
        for bad in ["PHI vs ATL", "PHI @ ", "A @ B @ C"] {
            let c = competition(bad, "2021-09-12T17:00:00Z");
            assert!(matches!(c.team_codes(&NflTeams), Err(DkError::InconsistentData(_))));
        }
        let c = CompetitionDocument::default();
        assert!(c.team_codes(&NflTeams).is_err());
    }

    #[test]
    fn competition_team_names_join_city_and_nickname() {
        let c = CompetitionDocument {
            away_team_city: Some("Philadelphia".into()),
            away_team_name: Some("Eagles".into()),
            home_team_city: Some("Atlanta".into()),
            home_team_name: Some("Falcons".into()),
            ..Default::default()
        };
        assert_eq!(
            c.team_names(&NflTeams).unwrap(),
            vec!["Philadelphia Eagles", "Atlanta Falcons"]
        );
    }

    #[test]
    fn game_set_window_and_teams() {
        let gs = GameSetDocument {
            game_set_key: "K".into(),
            competitions: vec![
                competition("CLE @ KC", "2021-09-12T20:25:00.0000000Z"),
                competition("PHI @ ATL", "2021-09-12T17:00:00.0000000Z"),
                competition("PHI @ ATL", "2021-09-12T17:00:00.0000000Z"),
            ],
            game_styles: vec![],
            contest_start_time_suffix: None,
            sort_order: None,
            min_start_time: None,
            tag: None,
            extra: Map::new(),
        };
        let tz = crate::time::DEFAULT_TIMEZONE;
        let (start, end) = gs.slate_window(tz).unwrap();
        assert_eq!(start.date_naive(), NaiveDate::from_ymd_opt(2021, 9, 12).unwrap());
        assert_eq!(start.hour(), 13);
        assert_eq!(end.hour(), 16);
        assert_eq!(end.weekday(), chrono::Weekday::Sun);
        assert_eq!(gs.n_games(), 3);
        assert_eq!(gs.slate_teams(&NflTeams).unwrap(), vec!["CLE", "KC", "PHI", "ATL"]);
    }

    #[test]
    fn empty_game_set_has_no_window() {
        let gs = GameSetDocument {
            game_set_key: "EMPTY".into(),
            competitions: vec![],
            game_styles: vec![],
            contest_start_time_suffix: None,
            sort_order: None,
            min_start_time: None,
            tag: None,
            extra: Map::new(),
        };
        assert!(matches!(
            gs.slate_starts(crate::time::DEFAULT_TIMEZONE),
            Err(DkError::NotFound(_))
        ));
    }

    #[test]
    fn contest_accessors_read_short_keys() {
        let c = ContestDocument {
            n: Some("NFL $3M Millionaire Maker".into()),
            a: Some(20.0),
            m: Some(176_470),
            dg: Some(53019),
            sdstring: Some("Sun 1:00PM".into()),
            sd: Some("/Date(1631466000000)/".into()),
            game_type: Some("Classic".into()),
            ..Default::default()
        };
        assert_eq!(c.name(), "NFL $3M Millionaire Maker");
        assert_eq!(c.entry_fee(), Some(20.0));
        assert_eq!(c.max_entrants(), Some(176_470));
        assert_eq!(c.draft_group_id(), Some(53019));
        assert_eq!(c.start_descriptor(), "Sun 1:00PM");
        assert_eq!(c.start_time().unwrap().hour(), 17);
        assert!(c.is_classic());
    }
}
