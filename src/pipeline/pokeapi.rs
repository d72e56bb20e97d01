//! PokéAPI Integration
//!
//! Fetches the first `limit` Pokémon from PokéAPI:
//!
//! 1. `GET {base_url}/pokemon?limit={limit}` → list of `{name, url}`
//! 2. `GET {url}` for each entry → `RawRecord`
//!
//! Requests run one after another. The first failure aborts the fetch; there
//! is no retry and no pagination.
//!
//! ## Usage
//!
//! ```no_run
//! use pokeflow::pipeline::{pokeapi::PokeApiClient, Fetcher};
//! use std::time::Duration;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PokeApiClient::new("https://pokeapi.co/api/v2", 10, Duration::from_secs(10))?;
//! let raw = client.fetch().await?;
//! # Ok(())
//! # }
//! ```

use super::types::RawRecord;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Source of raw records for one pipeline run
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self) -> Result<Vec<RawRecord>, FetchError>;
}

#[derive(Debug)]
pub enum FetchError {
    /// Transport, timeout or body decode failure
    Http(reqwest::Error),
    /// Upstream answered with a non-success status
    Status { url: String, status: StatusCode },
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Http(err)
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Http(e) => write!(f, "PokeAPI request failed: {}", e),
            FetchError::Status { url, status } => {
                write!(f, "PokeAPI error: {} returned {}", url, status)
            }
        }
    }
}

impl std::error::Error for FetchError {}

/// `GET /pokemon?limit=N` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonPage {
    pub count: Option<i64>,
    pub results: Vec<NamedResource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

pub struct PokeApiClient {
    client: reqwest::Client,
    base_url: String,
    limit: u32,
}

impl PokeApiClient {
    pub fn new(base_url: &str, limit: u32, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            limit,
        })
    }

    pub fn list_url(&self) -> String {
        format!("{}/pokemon?limit={}", self.base_url, self.limit)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl Fetcher for PokeApiClient {
    async fn fetch(&self) -> Result<Vec<RawRecord>, FetchError> {
        let list_url = self.list_url();
        log::info!("🌐 Fetching catalog: {}", list_url);

        let page: PokemonPage = self.get_json(&list_url).await?;
        log::debug!("Catalog lists {} entries", page.results.len());

        let mut records = Vec::with_capacity(page.results.len());
        for resource in &page.results {
            let raw: RawRecord = self.get_json(&resource.url).await?;
            log::debug!("Fetched {} (id={})", raw.name, raw.id);
            records.push(raw);
        }

        log::info!("✅ Fetched {} pokemon", records.len());
        Ok(records)
    }
}
