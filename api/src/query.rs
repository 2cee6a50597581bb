//! Lookups over parsed documents: contest filters, the Millionaire Maker and
//! main-slate resolution, draft-group selections and the salary projection.

use crate::constants::{CLASSIC, FEATURED_TAG};
use crate::documents::{
    ContestDocument, DraftGroupDocument, DraftablesDocument, GameSetDocument, GetContestsDocument,
    PlayerDocument, PlayerSalaryDocument, SlateDocument,
};
use crate::error::{DkError, DkResult};
use log::debug;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;

pub const MILLY_START: &str = "Sun 1:00PM";
pub const MILLY_NAME: &str = "Million";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Eq,
    /// Substring for strings, membership for lists, key presence for objects.
    Like,
    Lte,
    Gte,
}

impl FromStr for Comparator {
    type Err = DkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eq" | "==" => Ok(Comparator::Eq),
            "like" | "contains" => Ok(Comparator::Like),
            "lte" | "<=" => Ok(Comparator::Lte),
            "gte" | ">=" => Ok(Comparator::Gte),
            other => Err(DkError::InvalidFilter(format!("unknown comparator `{other}`"))),
        }
    }
}

/// One `field comparator value` test against a contest.
#[derive(Debug, Clone, PartialEq)]
pub struct ContestFilter {
    pub field: String,
    pub comparator: Comparator,
    pub value: Value,
}

impl ContestFilter {
    pub fn new(field: impl Into<String>, comparator: Comparator, value: impl Into<Value>) -> Self {
        Self { field: field.into(), comparator, value: value.into() }
    }

    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, Comparator::Eq, value)
    }

    pub fn contains(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, Comparator::Like, value)
    }

    pub fn at_most(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, Comparator::Lte, value)
    }

    pub fn at_least(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, Comparator::Gte, value)
    }

    /// Null and absent fields never match.
    pub fn matches(&self, field: &Value) -> bool {
        match (self.comparator, field, &self.value) {
            (_, Value::Null, _) => false,
            (Comparator::Eq, Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
            (Comparator::Eq, a, b) => a == b,
            (Comparator::Like, Value::String(hay), Value::String(needle)) => hay.contains(needle.as_str()),
            (Comparator::Like, Value::Array(items), needle) => items.contains(needle),
            (Comparator::Like, Value::Object(map), Value::String(key)) => map.contains_key(key),
            (Comparator::Like, ..) => false,
            (Comparator::Lte, a, b) => compare(a, b).is_some_and(|o| o != Ordering::Greater),
            (Comparator::Gte, a, b) => compare(a, b).is_some_and(|o| o != Ordering::Less),
        }
    }
}

fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// What [`GetContestsDocument::find_milly`] does when several contests match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MillyPolicy {
    /// Fail unless every match sits on the same game set, then take the first.
    #[default]
    Unique,
    First,
    /// Lowest entry fee among the matches.
    Cheapest,
}

impl FromStr for MillyPolicy {
    type Err = DkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unique" => Ok(MillyPolicy::Unique),
            "first" => Ok(MillyPolicy::First),
            "cheapest" => Ok(MillyPolicy::Cheapest),
            other => Err(DkError::InvalidFilter(format!("unknown policy `{other}`"))),
        }
    }
}

fn contest_fields(contest: &ContestDocument) -> Map<String, Value> {
    match serde_json::to_value(contest) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

impl GetContestsDocument {
    /// Contests passing every filter, in order. Searches `contests` when
    /// given, otherwise this document's own contests.
    pub fn find_contest<'a>(
        &'a self,
        filters: &[ContestFilter],
        contests: Option<&'a [ContestDocument]>,
    ) -> DkResult<Vec<&'a ContestDocument>> {
        let known = contest_fields(&ContestDocument::default());
        if let Some(bad) = filters.iter().find(|f| !known.contains_key(&f.field)) {
            return Err(DkError::FieldNotFound(bad.field.clone()));
        }

        let contests = contests.unwrap_or(self.contests.as_slice());
        let found: Vec<&ContestDocument> = contests
            .iter()
            .filter(|contest| {
                let fields = contest_fields(contest);
                filters
                    .iter()
                    .all(|f| f.matches(fields.get(&f.field).unwrap_or(&Value::Null)))
            })
            .collect();
        debug!("find_contest: {} of {} contests matched", found.len(), contests.len());
        Ok(found)
    }

    /// The Sunday 1:00PM classic Millionaire Maker.
    pub fn find_milly<'a>(
        &'a self,
        policy: MillyPolicy,
        contests: Option<&'a [ContestDocument]>,
    ) -> DkResult<&'a ContestDocument> {
        let filters = [
            ContestFilter::equals("sdstring", MILLY_START),
            ContestFilter::equals("game_type", CLASSIC),
            ContestFilter::contains("n", MILLY_NAME),
        ];
        let matches = self.find_contest(&filters, contests)?;

        match (matches.as_slice(), policy) {
            ([], _) => Err(DkError::NotFound("Millionaire Maker contest".into())),
            ([only], _) => Ok(*only),
            ([first, ..], MillyPolicy::First) => Ok(*first),
            (all, MillyPolicy::Cheapest) => all
                .iter()
                .min_by(|a, b| {
                    let fee = |c: &ContestDocument| c.a.unwrap_or(f64::INFINITY);
                    fee(**a).total_cmp(&fee(**b))
                })
                .copied()
                .ok_or_else(|| DkError::NotFound("Millionaire Maker contest".into())),
            ([first, rest @ ..], MillyPolicy::Unique) => {
                let key = self.game_set_key_of(first);
                if key.is_some() && rest.iter().all(|c| self.game_set_key_of(c) == key) {
                    Ok(*first)
                } else {
                    Err(DkError::AmbiguousResult { what: "find_milly", count: matches.len() })
                }
            }
        }
    }

    /// `(draft_group_id, game_set_key)` of the Millionaire Maker's slate.
    pub fn find_main_slate(&self, policy: MillyPolicy) -> DkResult<(i64, String)> {
        let milly = self.find_milly(policy, None)?;
        let dg = milly.dg.ok_or_else(|| {
            DkError::InconsistentData(format!("contest {:?} has no draft group", milly.id))
        })?;
        let group = self.draft_group(dg).ok_or_else(|| {
            DkError::InconsistentData(format!("draft group {dg} is not in the response"))
        })?;
        let key = group.game_set_key.clone().ok_or_else(|| {
            DkError::InconsistentData(format!("draft group {dg} has no game set key"))
        })?;
        debug!("main slate: draft group {dg}, game set {key}");
        Ok((dg, key))
    }

    /// The classic slate flagged as the Sunday afternoon main slate.
    pub fn main_slate(&self) -> Option<&SlateDocument> {
        self.classic_slates.iter().find(|s| s.is_main_slate)
    }

    pub fn slate(&self, game_set_key: &str) -> Option<&SlateDocument> {
        self.classic_slates.iter().find(|s| s.game_set_key == game_set_key)
    }

    pub fn draft_group(&self, draft_group_id: i64) -> Option<&DraftGroupDocument> {
        self.draft_groups.iter().find(|g| g.draft_group_id == draft_group_id)
    }

    pub fn game_set(&self, game_set_key: &str) -> Option<&GameSetDocument> {
        self.game_sets.iter().find(|gs| gs.game_set_key == game_set_key)
    }

    pub fn classic_contests(&self) -> Vec<&ContestDocument> {
        self.contests.iter().filter(|c| c.is_classic()).collect()
    }

    /// Draft groups whose game set is tagged "Featured".
    pub fn featured_draft_groups(&self) -> Vec<i64> {
        let keys: HashSet<&str> = self
            .game_sets
            .iter()
            .filter(|gs| gs.tag.as_deref() == Some(FEATURED_TAG))
            .map(|gs| gs.game_set_key.as_str())
            .collect();
        self.draft_groups
            .iter()
            .filter(|g| g.game_set_key.as_deref().is_some_and(|k| keys.contains(k)))
            .map(|g| g.draft_group_id)
            .collect()
    }

    /// Draft groups for `sport` with the given game-type id.
    pub fn salary_draft_groups(&self, sport: &str, game_type_id: i64) -> Vec<&DraftGroupDocument> {
        self.draft_groups
            .iter()
            .filter(|g| g.sport.as_deref() == Some(sport) && g.game_type_id == Some(game_type_id))
            .collect()
    }

    fn game_set_key_of(&self, contest: &ContestDocument) -> Option<&str> {
        contest
            .dg
            .and_then(|dg| self.draft_group(dg))
            .and_then(|g| g.game_set_key.as_deref())
    }
}

impl DraftablesDocument {
    pub fn find_player_by_name(&self, name: &str) -> Vec<&PlayerDocument> {
        self.draftables.iter().filter(|p| p.display_name == name).collect()
    }

    pub fn find_player_by_position(&self, position: &str) -> Vec<&PlayerDocument> {
        self.draftables.iter().filter(|p| p.position == position).collect()
    }

    pub fn find_player_by_team(&self, team: &str) -> Vec<&PlayerDocument> {
        self.draftables
            .iter()
            .filter(|p| p.team_abbreviation == team)
            .collect()
    }

    pub fn player_salaries(&self) -> Vec<PlayerSalaryDocument> {
        salaries_of(&self.draftables)
    }

    /// Salaries keyed by draftable id.
    pub fn player_pool(&self) -> BTreeMap<i64, PlayerSalaryDocument> {
        self.draftables
            .iter()
            .map(|p| (p.draftable_id, PlayerSalaryDocument::from(p)))
            .collect()
    }
}

/// Project players to their salary records, one for one and in order.
pub fn salaries_of<'a>(players: impl IntoIterator<Item = &'a PlayerDocument>) -> Vec<PlayerSalaryDocument> {
    players.into_iter().map(PlayerSalaryDocument::from).collect()
}

/// Keep the first record for each `(player_id, player_dk_id)`.
pub fn dedup_salaries(salaries: Vec<PlayerSalaryDocument>) -> Vec<PlayerSalaryDocument> {
    let mut seen = HashSet::new();
    salaries
        .into_iter()
        .filter(|s| seen.insert((s.player_id, s.player_dk_id)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn contest(id: i64, name: &str, fee: f64, dg: i64) -> ContestDocument {
        ContestDocument {
            id: Some(id),
            n: Some(name.into()),
            a: Some(fee),
            dg: Some(dg),
            sdstring: Some(MILLY_START.into()),
            game_type: Some(CLASSIC.into()),
            ..Default::default()
        }
    }

    fn group(id: i64, key: &str) -> DraftGroupDocument {
        serde_json::from_value(json!({"draft_group_id": id, "game_set_key": key})).unwrap()
    }

    fn lobby(contests: Vec<ContestDocument>, groups: Vec<DraftGroupDocument>) -> GetContestsDocument {
        GetContestsDocument { contests, draft_groups: groups, ..Default::default() }
    }

    #[test]
    fn comparators_parse() {
        assert_eq!("like".parse::<Comparator>().unwrap(), Comparator::Like);
        assert_eq!(">=".parse::<Comparator>().unwrap(), Comparator::Gte);
        assert!("between".parse::<Comparator>().is_err());
    }

    #[test]
    fn filter_semantics() {
        assert!(ContestFilter::equals("a", 20).matches(&json!(20.0)));
        assert!(ContestFilter::contains("n", "Million").matches(&json!("NFL $3M Millionaire Maker")));
        assert!(!ContestFilter::contains("n", "million").matches(&json!("NFL $3M Millionaire Maker")));
        assert!(ContestFilter::at_most("a", 20).matches(&json!(3)));
        assert!(!ContestFilter::at_least("a", 20).matches(&json!(3)));
        assert!(ContestFilter::at_least("sdstring", "Sun").matches(&json!("Sun 1:00PM")));
        assert!(!ContestFilter::equals("n", "x").matches(&Value::Null));
        assert!(!ContestFilter::at_most("a", "20").matches(&json!(3)));
        assert!(ContestFilter::contains("attr", "IsGuaranteed").matches(&json!({"IsGuaranteed": "true"})));
    }

    #[test]
    fn find_contest_applies_all_filters_in_order() {
        let doc = lobby(
            vec![
                contest(1, "NFL $3M Millionaire Maker", 20.0, 10),
                contest(2, "NFL $100K Flea Flicker", 3.0, 10),
                contest(3, "NFL $1M Mini-Millionaire", 3.0, 10),
            ],
            vec![group(10, "K")],
        );
        let found = doc
            .find_contest(&[ContestFilter::contains("n", "Million"), ContestFilter::at_most("a", 5)], None)
            .unwrap();
        assert_eq!(found.iter().map(|c| c.id).collect::<Vec<_>>(), vec![Some(3)]);
    }

    #[test]
    fn find_contest_rejects_unknown_fields() {
        let doc = lobby(vec![], vec![]);
        let err = doc.find_contest(&[ContestFilter::equals("nope", 1)], None).unwrap_err();
        assert!(matches!(err, DkError::FieldNotFound(f) if f == "nope"));
    }

    #[test]
    fn find_contest_searches_a_supplied_subset() {
        let doc = lobby(
            vec![contest(1, "NFL $3M Millionaire Maker", 20.0, 10), contest(2, "Other", 1.0, 10)],
            vec![group(10, "K")],
        );
        let subset = &doc.contests[1..];
        let found = doc.find_contest(&[ContestFilter::contains("n", "Million")], Some(subset)).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn milly_policies() {
        let doc = lobby(
            vec![
                contest(1, "NFL $3M Millionaire Maker", 20.0, 10),
                contest(2, "NFL $1M Mini-Millionaire", 3.0, 11),
            ],
            vec![group(10, "MAIN"), group(11, "OTHER")],
        );
        assert!(matches!(
            doc.find_milly(MillyPolicy::Unique, None),
            Err(DkError::AmbiguousResult { count: 2, .. })
        ));
        assert_eq!(doc.find_milly(MillyPolicy::First, None).unwrap().id, Some(1));
        assert_eq!(doc.find_milly(MillyPolicy::Cheapest, None).unwrap().id, Some(2));
    }

    #[test]
    fn unique_policy_tolerates_matches_on_one_game_set() {
        let doc = lobby(
            vec![
                contest(1, "NFL $3M Millionaire Maker", 20.0, 10),
                contest(2, "NFL $1M Mini-Millionaire", 3.0, 12),
            ],
            vec![group(10, "MAIN"), group(12, "MAIN")],
        );
        assert_eq!(doc.find_milly(MillyPolicy::Unique, None).unwrap().id, Some(1));
    }

    #[test]
    fn missing_milly_and_dangling_draft_group() {
        let empty = lobby(vec![], vec![]);
        assert!(matches!(empty.find_milly(MillyPolicy::Unique, None), Err(DkError::NotFound(_))));

        let dangling = lobby(vec![contest(1, "NFL $3M Millionaire Maker", 20.0, 99)], vec![]);
        assert!(matches!(
            dangling.find_main_slate(MillyPolicy::Unique),
            Err(DkError::InconsistentData(_))
        ));
    }

    #[test]
    fn featured_and_salary_draft_groups() {
        let mut doc: GetContestsDocument = serde_json::from_value(json!({
            "game_sets": [
                {"game_set_key": "A", "tag": "Featured"},
                {"game_set_key": "B", "tag": ""}
            ],
            "draft_groups": [
                {"draft_group_id": 1, "game_set_key": "A", "sport": "NFL", "game_type_id": 1},
                {"draft_group_id": 2, "game_set_key": "B", "sport": "NFL", "game_type_id": 96},
                {"draft_group_id": 3, "game_set_key": "A", "sport": "NFL", "game_type_id": 96}
            ]
        }))
        .unwrap();
        doc.contests.push(contest(1, "x", 1.0, 1));
        assert_eq!(doc.featured_draft_groups(), vec![1, 3]);
        let classic: Vec<i64> = doc
            .salary_draft_groups("NFL", 1)
            .iter()
            .map(|g| g.draft_group_id)
            .collect();
        assert_eq!(classic, vec![1]);
        assert_eq!(doc.classic_contests().len(), 1);
    }

    #[test]
    fn dedup_keeps_first_per_player() {
        let salary = |draftable_id, player_id, salary| PlayerSalaryDocument {
            draftable_id,
            player_id,
            player_dk_id: player_id * 10,
            first_name: "A".into(),
            last_name: "B".into(),
            display_name: "A B".into(),
            position: "QB".into(),
            team_abbreviation: "PHI".into(),
            roster_slot_id: 66,
            salary,
        };
        let out = dedup_salaries(vec![salary(1, 7, 6000), salary(2, 7, 6000), salary(3, 8, 5000)]);
        assert_eq!(out.iter().map(|s| s.draftable_id).collect::<Vec<_>>(), vec![1, 3]);
    }
}
