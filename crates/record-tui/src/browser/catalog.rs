//! Catalog cache — the last fetched station list and its genre tabs.

use std::collections::HashSet;

use record_proto::protocol::Station;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    stations: Vec<Station>,
    genres: Vec<String>,
}

impl Catalog {
    pub fn from_stations(stations: Vec<Station>) -> Self {
        let mut catalog = Self::default();
        catalog.load(stations);
        catalog
    }

    /// Replace the whole station set and re-derive the genre tabs.
    pub fn load(&mut self, stations: Vec<Station>) {
        self.genres = derive_genres(&stations);
        self.stations = stations;
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn station(&self, idx: usize) -> Option<&Station> {
        self.stations.get(idx)
    }

    /// Genre tab names, excluding the implicit "All" tab.
    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Catalog position of the station with this id.
    pub fn position_of(&self, station_id: i64) -> Option<usize> {
        self.stations.iter().position(|s| s.id == station_id)
    }
}

/// Distinct genre names in first-seen order across the catalog. Genres are
/// keyed by name, so tags sharing a name but not an id collapse into one tab.
pub fn derive_genres(stations: &[Station]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut genres = Vec::new();
    for genre in stations.iter().flat_map(|s| s.genres.iter()) {
        if seen.insert(genre.name.as_str()) {
            genres.push(genre.name.clone());
        }
    }
    genres
}
