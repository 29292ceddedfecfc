use crate::{Error, Result};
use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use steno_types::{SessionIndex, StatementBatch};

/// Remote provider of session documents
///
/// Responsibilities:
/// - Resolve the per-date index (statement count)
/// - Resolve one numbered page of statements
pub trait SessionSource {
    fn fetch_index(&self, date: NaiveDate) -> Result<SessionIndex>;

    fn fetch_batch(&self, date: NaiveDate, batch: u64) -> Result<StatementBatch>;
}

pub fn index_url(base_url: &str, date: NaiveDate) -> String {
    format!("{}/{}/index.json", base_url.trim_end_matches('/'), date.format("%Y-%m-%d"))
}

pub fn batch_url(base_url: &str, date: NaiveDate, batch: u64) -> String {
    format!(
        "{}/{}/steno/{}.json",
        base_url.trim_end_matches('/'),
        date.format("%Y-%m-%d"),
        batch
    )
}

/// Unauthenticated GETs against the session API
pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("steno/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::debug!(url, "GET");

        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.json()?)
    }
}

impl SessionSource for HttpSource {
    fn fetch_index(&self, date: NaiveDate) -> Result<SessionIndex> {
        self.get_json(&index_url(&self.base_url, date))
    }

    fn fetch_batch(&self, date: NaiveDate, batch: u64) -> Result<StatementBatch> {
        self.get_json(&batch_url(&self.base_url, date, batch))
    }
}
