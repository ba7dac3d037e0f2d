//! HTTP client for the Radio Record catalog API.

use serde::Deserialize;
use tracing::debug;

use crate::config::ApiConfig;
use crate::protocol::{Station, Track};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("catalog returned HTTP {0}")]
    Status(u16),
    #[error("malformed catalog response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct StationsResponse {
    result: StationsResult,
}

#[derive(Debug, Deserialize)]
struct StationsResult {
    #[serde(default)]
    stations: Vec<Station>,
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    result: HistoryResult,
}

#[derive(Debug, Deserialize)]
struct HistoryResult {
    #[serde(default)]
    history: Vec<Track>,
}

pub fn parse_stations(body: &str) -> Result<Vec<Station>, CatalogError> {
    let resp: StationsResponse = serde_json::from_str(body)?;
    Ok(resp.result.stations)
}

/// The most recent history entry, or `None` if the station reports none.
pub fn parse_history(body: &str) -> Result<Option<Track>, CatalogError> {
    let resp: HistoryResponse = serde_json::from_str(body)?;
    Ok(resp.result.history.into_iter().next())
}

#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(config: &ApiConfig) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_stations(&self) -> Result<Vec<Station>, CatalogError> {
        let body = self.get(&format!("{}/stations/", self.base_url)).await?;
        let stations = parse_stations(&body)?;
        debug!("catalog: fetched {} stations", stations.len());
        Ok(stations)
    }

    pub async fn fetch_now_playing(&self, station_id: i64) -> Result<Option<Track>, CatalogError> {
        let url = format!("{}/station/history/?id={}", self.base_url, station_id);
        let body = self.get(&url).await?;
        parse_history(&body)
    }

    async fn get(&self, url: &str) -> Result<String, CatalogError> {
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }
        Ok(resp.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stations_envelope() {
        let body = r#"{"result":{"stations":[
            {"id":1,"title":"Record","tooltip":"Main","genre":[{"id":1,"name":"Dance"}]},
            {"id":2,"title":"Techno","tooltip":"","genre":[]}
        ],"genre":[{"id":1,"name":"Dance"}]}}"#;
        let stations = parse_stations(body).unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].genres[0].name, "Dance");
        assert_eq!(stations[1].title, "Techno");
    }

    #[test]
    fn empty_history_is_no_track() {
        let body = r#"{"result":{"history":[]}}"#;
        assert_eq!(parse_history(body).unwrap(), None);
    }

    #[test]
    fn history_takes_first_entry() {
        let body = r#"{"result":{"history":[
            {"id":10,"artist":"A","song":"First"},
            {"id":9,"artist":"B","song":"Older"}
        ]}}"#;
        let track = parse_history(body).unwrap().unwrap();
        assert_eq!(track.song, "First");
    }

    #[test]
    fn malformed_body_is_decode_error() {
        assert!(matches!(
            parse_stations("<html>"),
            Err(CatalogError::Decode(_))
        ));
    }
}
