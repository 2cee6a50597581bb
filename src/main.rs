mod loader;
mod output;
mod settings;

use crate::loader::Loader;
use crate::output::OutputFormat;
use crate::settings::Settings;
use anyhow::Context as _;
use clap::Parser as _;
use dk_api::{MillyPolicy, NflTeams, Parser, RawTeams, TeamLookup, dedup_salaries};
use log::{debug, info, warn};
use std::io;
use std::path::PathBuf;

/// Find the DraftKings main slate and print its salary pool.
#[derive(clap::Parser, Debug)]
#[command(author, version, about, after_help = ENV_HELP)]
pub struct Args {
    /// Sport code used in the lobby request.
    #[arg(long, default_value = "NFL")]
    pub sport: String,

    /// Fail on keys the object model does not know.
    #[arg(long)]
    pub strict: bool,

    /// IANA zone slate windows are reported in.
    #[arg(long)]
    pub tz: Option<String>,

    /// What to do when several Millionaire Maker contests match.
    #[arg(long, default_value = "unique")]
    pub policy: MillyPolicy,

    #[arg(long, value_enum, default_value_t = OutputFormat::Tsv)]
    pub format: OutputFormat,

    /// Read the lobby from a saved `getcontests` response.
    #[arg(long, value_name = "PATH")]
    pub contests_file: Option<PathBuf>,

    /// Read the player pool from a saved draftables response.
    #[arg(long, value_name = "PATH")]
    pub draftables_file: Option<PathBuf>,

    /// More logging; repeat for more.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

const ENV_HELP: &str = "Environment:
  DKSALARIES_STRICT   1/true/yes turns on strict parsing
  DKSALARIES_TZ       IANA zone for slate windows (default America/New_York)
  RUST_LOG            env_logger filter, overrides -v";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    better_panic::install();

    let args = Args::parse();
    init_logger(args.verbose);
    debug!("{args:?}");

    let settings = Settings::load(&args)?;
    if settings.sport == "NFL" {
        run(&settings, Parser::with_lookup(settings.parser, NflTeams)).await
    } else {
        run(&settings, Parser::with_lookup(settings.parser, RawTeams)).await
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

async fn run<L: TeamLookup>(settings: &Settings, parser: Parser<L>) -> anyhow::Result<()> {
    let loader = Loader::new(settings);

    let lobby = parser
        .get_contests(loader.contests().await?)
        .context("failed to parse the contest lobby")?;
    let (draft_group_id, game_set_key) = lobby
        .find_main_slate(settings.policy)
        .context("failed to resolve the main slate")?;

    match lobby.slate(&game_set_key) {
        Some(slate) => info!(
            "main slate {game_set_key}: draft group {draft_group_id}, {} games, {} - {}",
            slate.n_games, slate.slate_starts, slate.slate_ends
        ),
        None => warn!("game set {game_set_key} of draft group {draft_group_id} is not a classic slate"),
    }

    let pool = parser
        .draftables(loader.draftables(draft_group_id).await?)
        .with_context(|| format!("failed to parse draftables for draft group {draft_group_id}"))?;
    let all = pool.player_salaries();
    let total = all.len();
    let salaries = dedup_salaries(all);
    info!("{} players ({} draftables)", salaries.len(), total);

    let stdout = io::stdout();
    output::write(&mut stdout.lock(), settings.format, &salaries)
}
