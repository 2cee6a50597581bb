//! Scrape, parse and query DraftKings contest lobbies and salary pools.
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use dk_api::{MillyPolicy, Parser, Scraper};
//!
//! let scraper = Scraper::new();
//! let parser = Parser::new();
//! let lobby = parser.get_contests(scraper.contests("NFL").await?)?;
//! let (draft_group_id, _game_set_key) = lobby.find_main_slate(MillyPolicy::Unique)?;
//! let pool = parser.draftables(scraper.draftables(draft_group_id).await?)?;
//! let salaries = pool.player_salaries();
//! # let _ = salaries;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod constants;
pub mod documents;
pub mod error;
pub mod parser;
pub mod query;
pub mod slates;
pub mod teams;
pub mod time;
pub mod util;

pub use client::{ApiError, Scraper};
pub use documents::{
    AttributesDocument, CompetitionDocument, ContestDocument, DraftGroupDocument,
    DraftStatsDocument, DraftablesDocument, GameSetDocument, GameStyleDocument, GameTypeDocument,
    GetContestsDocument, PlayerDocument, PlayerSalaryDocument, SlateDocument, TournamentDocument,
};
pub use error::{DkError, DkResult};
pub use parser::{Parser, ParserConfig};
pub use query::{Comparator, ContestFilter, MillyPolicy, dedup_salaries, salaries_of};
pub use teams::{NflTeams, RawTeams, TeamLookup};
pub use util::camel_to_snake;
