use crate::settings::Settings;
use anyhow::Context as _;
use dk_api::Scraper;
use log::debug;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Raw lobby and draftables JSON, from saved files when given, otherwise
/// from the network.
pub struct Loader {
    client: Scraper,
    sport: String,
    contests_file: Option<PathBuf>,
    draftables_file: Option<PathBuf>,
}

impl Loader {
    pub fn new(settings: &Settings) -> Self {
        Self {
            client: Scraper::new(),
            sport: settings.sport.clone(),
            contests_file: settings.contests_file.clone(),
            draftables_file: settings.draftables_file.clone(),
        }
    }

    pub async fn contests(&self) -> anyhow::Result<Value> {
        if let Some(path) = &self.contests_file {
            return read_json(path);
        }
        debug!("fetching {} lobby", self.sport);
        self.client
            .contests(&self.sport)
            .await
            .with_context(|| format!("failed to fetch the {} lobby", self.sport))
    }

    pub async fn draftables(&self, draft_group_id: i64) -> anyhow::Result<Value> {
        if let Some(path) = &self.draftables_file {
            return read_json(path);
        }
        debug!("fetching draftables for draft group {draft_group_id}");
        self.client
            .draftables(draft_group_id)
            .await
            .with_context(|| format!("failed to fetch draftables for draft group {draft_group_id}"))
    }
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    debug!("reading {}", path.display());
    let raw = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not valid JSON", path.display()))
}
