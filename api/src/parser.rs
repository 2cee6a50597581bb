use crate::documents::{
    AttributesDocument, CompetitionDocument, ContestDocument, Document, DraftGroupDocument,
    DraftStatsDocument, DraftablesDocument, GameSetDocument, GameStyleDocument, GameTypeDocument,
    GetContestsDocument, PlayerDocument, TournamentDocument,
};
use crate::error::{DkError, DkResult};
use crate::slates;
use crate::teams::{NflTeams, TeamLookup};
use crate::time::{DEFAULT_TIMEZONE, parse_timezone};
use crate::util::normalize_keys;
use chrono_tz::Tz;
use log::{debug, warn};
use serde::de::Error as _;
use serde_json::{Map, Value};

const STRICT_ENV: &str = "DKSALARIES_STRICT";
const TIMEZONE_ENV: &str = "DKSALARIES_TZ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Reject keys a document does not declare instead of dropping them.
    pub strict: bool,
    /// Zone slate windows are expressed in.
    pub timezone: Tz,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { strict: false, timezone: DEFAULT_TIMEZONE }
    }
}

impl ParserConfig {
    /// Defaults overridden by `DKSALARIES_STRICT` and `DKSALARIES_TZ`.
    pub fn from_env() -> DkResult<Self> {
        let mut config = Self::default();
        if let Ok(value) = std::env::var(STRICT_ENV) {
            config.strict = matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        if let Ok(name) = std::env::var(TIMEZONE_ENV)
            && !name.trim().is_empty()
        {
            config.timezone = parse_timezone(&name)?;
        }
        Ok(config)
    }
}

/// Builds typed documents from raw operator JSON.
///
/// Each object has its null members dropped and its keys snake-cased before
/// it is structured; collections known to hold sub-documents are pulled out
/// and built the same way, then attached to the parent.
#[derive(Debug, Clone, Default)]
pub struct Parser<L = NflTeams> {
    config: ParserConfig,
    teams: L,
}

impl Parser<NflTeams> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self { config, teams: NflTeams }
    }
}

impl<L: TeamLookup> Parser<L> {
    pub fn with_lookup(config: ParserConfig, teams: L) -> Self {
        Self { config, teams }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn teams(&self) -> &L {
        &self.teams
    }

    /// Build the root document of a `getcontests` response, including its
    /// classic slates.
    pub fn get_contests(&self, raw: Value) -> DkResult<GetContestsDocument> {
        let mut map = normalize_keys(into_object::<GetContestsDocument>(raw)?);

        let contests = self.build_list::<ContestDocument>(&mut map, "contests")?;
        let tournaments = self.build_list::<TournamentDocument>(&mut map, "tournaments")?;
        let draft_groups = self.build_list::<DraftGroupDocument>(&mut map, "draft_groups")?;
        let game_sets = take_list::<GetContestsDocument>(&mut map, "game_sets")?
            .into_iter()
            .map(|raw| self.game_set(raw))
            .collect::<DkResult<Vec<_>>>()?;
        let game_types = take_list::<GetContestsDocument>(&mut map, "game_types")?
            .into_iter()
            .map(|raw| self.game_type(raw))
            .collect::<DkResult<Vec<_>>>()?;

        let mut doc: GetContestsDocument = self.structure(map)?;
        doc.contests = contests;
        doc.tournaments = tournaments;
        doc.draft_groups = draft_groups;
        doc.game_sets = game_sets;
        doc.game_types = game_types;

        self.check_draft_group_refs(&doc)?;
        doc.classic_slates = slates::classic_slates(&doc, self.config.timezone, &self.teams);

        debug!(
            "parsed getcontests: {} contests, {} draft groups, {} game sets, {} classic slates",
            doc.contests.len(),
            doc.draft_groups.len(),
            doc.game_sets.len(),
            doc.classic_slates.len()
        );
        Ok(doc)
    }

    /// Build the root document of a draftables response.
    pub fn draftables(&self, raw: Value) -> DkResult<DraftablesDocument> {
        let mut map = normalize_keys(into_object::<DraftablesDocument>(raw)?);
        let players = take_list::<DraftablesDocument>(&mut map, "draftables")?
            .into_iter()
            .map(|raw| self.player(raw))
            .collect::<DkResult<Vec<_>>>()?;
        let draft_stats = self.build_list::<DraftStatsDocument>(&mut map, "draft_stats")?;

        let mut doc: DraftablesDocument = self.structure(map)?;
        doc.draftables = players;
        doc.draft_stats = draft_stats;

        debug!("parsed draftables: {} players", doc.draftables.len());
        Ok(doc)
    }

    /// Build a document that has no nested sub-documents.
    pub fn build<T: Document>(&self, raw: Value) -> DkResult<T> {
        let map = normalize_keys(into_object::<T>(raw)?);
        self.structure(map)
    }

    fn game_set(&self, raw: Value) -> DkResult<GameSetDocument> {
        let mut map = normalize_keys(into_object::<GameSetDocument>(raw)?);
        let competitions = self.build_list::<CompetitionDocument>(&mut map, "competitions")?;
        let game_styles = self.build_list::<GameStyleDocument>(&mut map, "game_styles")?;

        let mut game_set: GameSetDocument = self.structure(map)?;
        game_set.competitions = competitions;
        game_set.game_styles = game_styles;
        Ok(game_set)
    }

    fn game_type(&self, raw: Value) -> DkResult<GameTypeDocument> {
        let mut map = normalize_keys(into_object::<GameTypeDocument>(raw)?);
        let game_style = self.build_list::<GameStyleDocument>(&mut map, "game_style")?;

        let mut game_type: GameTypeDocument = self.structure(map)?;
        game_type.game_style = game_style;
        Ok(game_type)
    }

    fn player(&self, raw: Value) -> DkResult<PlayerDocument> {
        let mut map = normalize_keys(into_object::<PlayerDocument>(raw)?);
        let draft_stat_attributes =
            self.build_list::<AttributesDocument>(&mut map, "draft_stat_attributes")?;
        let player_attributes = self.build_list::<AttributesDocument>(&mut map, "player_attributes")?;

        let mut player: PlayerDocument = self.structure(map)?;
        player.draft_stat_attributes = draft_stat_attributes;
        player.player_attributes = player_attributes;
        Ok(player)
    }

    fn build_list<T: Document>(&self, map: &mut Map<String, Value>, key: &str) -> DkResult<Vec<T>> {
        take_list::<T>(map, key)?
            .into_iter()
            .map(|raw| self.build(raw))
            .collect()
    }

    fn structure<T: Document>(&self, map: Map<String, Value>) -> DkResult<T> {
        let mut doc: T = serde_json::from_value(Value::Object(map))
            .map_err(|source| DkError::Malformed { document: T::NAME, source })?;

        if let Some(key) = doc.extra().keys().next() {
            if self.config.strict {
                return Err(DkError::SchemaMismatch { document: T::NAME, key: key.clone() });
            }
            debug!("{}: ignoring unknown keys {:?}", T::NAME, doc.extra().keys().collect::<Vec<_>>());
            doc.extra_mut().clear();
        }
        Ok(doc)
    }

    fn check_draft_group_refs(&self, doc: &GetContestsDocument) -> DkResult<()> {
        for contest in &doc.contests {
            let Some(dg) = contest.dg else { continue };
            if doc.draft_groups.iter().any(|g| g.draft_group_id == dg) {
                continue;
            }
            let message = format!("contest {:?} references missing draft group {dg}", contest.id);
            if self.config.strict {
                return Err(DkError::InconsistentData(message));
            }
            warn!("{message}");
        }
        Ok(())
    }
}

fn into_object<T: Document>(raw: Value) -> DkResult<Map<String, Value>> {
    match raw {
        Value::Object(map) => Ok(map),
        other => Err(DkError::Malformed {
            document: T::NAME,
            source: serde_json::Error::custom(format!("expected a JSON object, found {other}")),
        }),
    }
}

/// Remove `key` and return its elements. A lone object counts as a list of
/// one; a missing key as an empty list.
fn take_list<T: Document>(map: &mut Map<String, Value>, key: &str) -> DkResult<Vec<Value>> {
    match map.remove(key) {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items),
        Some(item @ Value::Object(_)) => Ok(vec![item]),
        Some(other) => Err(DkError::Malformed {
            document: T::NAME,
            source: serde_json::Error::custom(format!("`{key}` should be a list, found {other}")),
        }),
    }
}
