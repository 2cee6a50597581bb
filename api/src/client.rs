use log::debug;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const LOBBY_URL: &str = "https://www.draftkings.com";
const API_URL: &str = "https://api.draftkings.com";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64)";

const DEFAULT_HEADERS: &[(&str, &str)] = &[
    ("connection", "keep-alive"),
    ("dnt", "1"),
    ("accept", "*/*"),
    ("origin", "https://www.draftkings.com"),
    ("sec-fetch-site", "same-site"),
    ("sec-fetch-mode", "cors"),
    ("sec-fetch-dest", "empty"),
    ("referer", "https://www.draftkings.com/"),
    ("accept-language", "en-US,en;q=0.9"),
];

/// Fetches raw lobby and draftables JSON from DraftKings.
#[derive(Debug, Clone)]
pub struct Scraper {
    client: Client,
    timeout: Duration,
    lobby_url: String,
    api_url: String,
}

impl Default for Scraper {
    fn default() -> Self {
        Self::with_base_urls(LOBBY_URL, API_URL)
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Network(e, _) | ApiError::Api(e, _) | ApiError::Parsing(e, _) => Some(e),
        }
    }
}

impl Scraper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the lobby and API endpoints somewhere else (a mock server, a
    /// proxy). Trailing slashes are ignored.
    pub fn with_base_urls(lobby_url: &str, api_url: &str) -> Self {
        Self {
            client: Client::builder()
                .user_agent(USER_AGENT)
                .default_headers(default_headers())
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_secs(10),
            lobby_url: lobby_url.trim_end_matches('/').to_owned(),
            api_url: api_url.trim_end_matches('/').to_owned(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The lobby's contest listing for one sport.
    pub async fn contests(&self, sport: &str) -> ApiResult<Value> {
        let url = format!("{}/lobby/getcontests", self.lobby_url);
        self.get_json(&url, &[("sport", sport)], &[]).await
    }

    /// The player pool of one draft group.
    pub async fn draftables(&self, draft_group_id: i64) -> ApiResult<Value> {
        let url = format!(
            "{}/draftgroups/v1/draftgroups/{draft_group_id}/draftables",
            self.api_url
        );
        self.get_json(&url, &[("format", "json")], &[]).await
    }

    pub async fn get_json(
        &self,
        url: &str,
        params: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> ApiResult<Value> {
        debug!("GET {url} {params:?}");
        let mut request = self.client.get(url).query(params).timeout(self.timeout);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<Value>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => Err(ApiError::Api(e, url.to_owned())),
        }
    }
}

fn default_headers() -> HeaderMap {
    DEFAULT_HEADERS
        .iter()
        .map(|&(name, value)| {
            (
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            )
        })
        .collect()
}
