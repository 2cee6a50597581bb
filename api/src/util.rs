use serde_json::{Map, Value};

/// Convert a camel-case key to snake case.
///
/// A separator goes in front of every uppercase ASCII letter that follows a
/// lowercase letter or a digit, then the whole string is lowercased:
/// `GameSetKey` becomes `game_set_key`, `playerImage50` becomes
/// `player_image50`, and `AllowUGC` becomes `allow_ugc`. Already snake-cased
/// input comes back unchanged.
pub fn camel_to_snake(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut prev: Option<char> = None;
    for c in s.chars() {
        if c.is_ascii_uppercase()
            && prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit())
        {
            out.push('_');
        }
        out.push(c);
        prev = Some(c);
    }
    out.to_lowercase()
}

/// Drop null members and snake-case the remaining top-level keys.
///
/// Nested values are left alone; the parser recurses only into the
/// collections it knows hold sub-documents.
pub fn normalize_keys(raw: Map<String, Value>) -> Map<String, Value> {
    raw.into_iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| (camel_to_snake(&k), v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn converts_pascal_and_camel_case() {
        assert_eq!(camel_to_snake("GameSetKey"), "game_set_key");
        assert_eq!(camel_to_snake("draftableId"), "draftable_id");
        assert_eq!(camel_to_snake("playerDkId"), "player_dk_id");
        assert_eq!(camel_to_snake("isOwner"), "is_owner");
    }

    #[test]
    fn is_idempotent() {
        for key in ["game_set_key", "sdstring", "dg", "player_image160", ""] {
            assert_eq!(camel_to_snake(key), key);
            assert_eq!(camel_to_snake(&camel_to_snake(key)), camel_to_snake(key));
        }
        let once = camel_to_snake("TeamLeagueSeasonAttributes");
        assert_eq!(camel_to_snake(&once), once);
    }

    #[test]
    fn keeps_digits_and_acronyms_together() {
        assert_eq!(camel_to_snake("playerImage50"), "player_image50");
        assert_eq!(camel_to_snake("altPlayerImage160"), "alt_player_image160");
        assert_eq!(camel_to_snake("AllowUGC"), "allow_ugc");
        assert_eq!(camel_to_snake("UseJSWebLobbyModals"), "use_jsweb_lobby_modals");
        assert_eq!(camel_to_snake("top10Count"), "top10_count");
        assert_eq!(camel_to_snake("v2Api"), "v2_api");
    }

    #[test]
    fn normalize_drops_nulls_only_at_top_level() {
        let raw = json!({
            "GameSetKey": "ABC",
            "Tag": null,
            "ContestStartTimeSuffix": {"innerKey": null}
        });
        let Value::Object(map) = raw else { unreachable!() };
        let out = normalize_keys(map);
        assert_eq!(out.len(), 2);
        assert_eq!(out["game_set_key"], "ABC");
        assert_eq!(out["contest_start_time_suffix"], json!({"innerKey": null}));
    }
}
