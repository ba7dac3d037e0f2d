//! Visibility filter — which catalog stations the list shows, and in what order.

use record_proto::protocol::Station;
use serde::{Deserialize, Serialize};

/// The active tab: the synthetic "All" tab or one genre by name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TabSelector {
    #[default]
    All,
    Genre(String),
}

impl TabSelector {
    /// Index into the genre list, `None` for All (or a genre no longer listed).
    pub fn position(&self, genres: &[String]) -> Option<usize> {
        match self {
            Self::All => None,
            Self::Genre(name) => genres.iter().position(|g| g == name),
        }
    }

    /// Advance one tab. Past the last genre wraps to All.
    pub fn next(&self, genres: &[String]) -> Self {
        let next = match self.position(genres) {
            None => 0,
            Some(p) => p + 1,
        };
        genres
            .get(next)
            .map_or(Self::All, |g| Self::Genre(g.clone()))
    }

    /// Retreat one tab. Before All wraps to the last genre.
    pub fn prev(&self, genres: &[String]) -> Self {
        match self.position(genres) {
            None => genres.last().map_or(Self::All, |g| Self::Genre(g.clone())),
            Some(0) => Self::All,
            Some(p) => Self::Genre(genres[p - 1].clone()),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

/// Whether a station belongs in the list for this tab / favorites setting.
pub fn passes(
    station: &Station,
    tab: &TabSelector,
    favorites_only: bool,
    is_favorite: impl Fn(i64) -> bool,
) -> bool {
    if favorites_only && !is_favorite(station.id) {
        return false;
    }
    match tab {
        TabSelector::All => true,
        TabSelector::Genre(name) => station.has_genre(name),
    }
}

/// Visible index list for the current filters.
///
/// The All tab with the favorites filter off pins favorites to the top, each
/// group in catalog order. Every other combination is a plain catalog-order
/// filter.
pub fn rebuild(
    stations: &[Station],
    tab: &TabSelector,
    favorites_only: bool,
    is_favorite: impl Fn(i64) -> bool,
) -> Vec<usize> {
    if tab.is_all() && !favorites_only {
        let (mut pinned, rest): (Vec<usize>, Vec<usize>) =
            (0..stations.len()).partition(|&i| is_favorite(stations[i].id));
        pinned.extend(rest);
        return pinned;
    }

    stations
        .iter()
        .enumerate()
        .filter(|(_, s)| passes(s, tab, favorites_only, &is_favorite))
        .map(|(i, _)| i)
        .collect()
}
