//! Operator ids that show up unexplained in the lobby payloads.

/// Game-type id of NFL classic salary-cap contests.
pub const NFL_CLASSIC_GAME_TYPE_ID: i64 = 1;
pub const CLASSIC: &str = "Classic";
pub const FEATURED_TAG: &str = "Featured";

pub const NFL_GAME_TYPES: &[(i64, &str)] = &[
    (1, "Classic"),
    (96, "Showdown Captain Mode"),
    (159, "Madden Showdown Captain Mode"),
    (192, "Snake Showdown"),
    (145, "Best Ball"),
    (189, "Snake"),
];

pub const MLB_GAME_TYPES: &[(i64, &str)] = &[
    (2, "Classic"),
    (114, "Showdown Captain Mode"),
    (45, "Tiers"),
    (179, "Snake Showdown"),
    (178, "Snake"),
];

pub const SPORTS: &[(i64, &str)] = &[
    (1, "Football"),
    (2, "Baseball"),
    (3, "Hockey"),
    (4, "Basketball"),
    (5, "College Football"),
    (6, "College Basketball"),
    (9, "Mixed Martial Arts"),
    (10, "Nascar"),
    (11, "League of Legends"),
    (12, "Soccer"),
    (13, "Golf"),
    (14, "Canadian Football"),
    (15, "EuroLeague Basketball"),
    (16, "Tennis"),
    (18, "XFL"),
    (19, "Counter Strike: Global Offensive"),
    (20, "Rocket League"),
    (21, "Miscellaneous"),
    (22, "Call Of Duty"),
    (23, "Australian Football League"),
    (24, "iRacing"),
    (25, "Defense of the Ancient 2"),
    (26, "Valorant"),
];

pub fn sport_name(sport_id: i64) -> Option<&'static str> {
    SPORTS.iter().find(|(id, _)| *id == sport_id).map(|(_, n)| *n)
}

/// Game-type id for `name` in the given sport's table (`NFL` or `MLB`).
pub fn game_type_id(sport: &str, name: &str) -> Option<i64> {
    let table = match sport.to_ascii_uppercase().as_str() {
        "NFL" => NFL_GAME_TYPES,
        "MLB" => MLB_GAME_TYPES,
        _ => return None,
    };
    table.iter().find(|(_, n)| *n == name).map(|(id, _)| *id)
}
