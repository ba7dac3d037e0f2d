//! Station browser — the catalog, what is visible, where the cursor is, and
//! how keys move between modes.
//!
//! The whole browser is one value, [`BrowserState`]. The App owns it and
//! feeds it through [`Dispatcher::handle`] for every input; rendering only
//! reads it.

pub mod catalog;
pub mod cursor;
pub mod dispatch;
pub mod filter;
pub mod search;

#[cfg(test)]
mod tests;

use record_proto::prefs::PreferenceStore;
use record_proto::protocol::{Station, Track};
use serde::{Deserialize, Serialize};

pub use catalog::Catalog;
pub use cursor::Cursor;
pub use dispatch::{Dispatcher, Event, Key, Mode, Transition};
pub use filter::TabSelector;
pub use search::Search;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogStatus {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrowserState {
    pub catalog: Catalog,
    pub status: CatalogStatus,
    pub tab: TabSelector,
    pub favorites_only: bool,
    /// Catalog indices in display order.
    pub visible: Vec<usize>,
    pub cursor: Cursor,
    pub search: Search,
    pub mode: Mode,
    /// Catalog index of the playing station, independent of the cursor.
    pub selection: Option<usize>,
    pub now_playing: Option<Track>,
}

impl BrowserState {
    /// Catalog index under the cursor.
    pub fn current_index(&self) -> Option<usize> {
        self.cursor.station(&self.visible)
    }

    pub fn current_station(&self) -> Option<&Station> {
        self.current_index().and_then(|idx| self.catalog.station(idx))
    }

    pub fn selected_station(&self) -> Option<&Station> {
        self.selection.and_then(|idx| self.catalog.station(idx))
    }

    /// Recompute the visible list from the filters, then bring the cursor and
    /// any search matches back in line with it.
    pub fn rebuild_visible(&mut self, prefs: &dyn PreferenceStore) {
        self.visible = filter::rebuild(
            self.catalog.stations(),
            &self.tab,
            self.favorites_only,
            |id| prefs.is_favorite(id),
        );
        self.cursor.snap_after_rebuild(self.visible.len());
        self.search.refresh(self.catalog.stations(), &self.visible);
    }

    /// Label for the active tab.
    pub fn tab_label(&self) -> &str {
        match &self.tab {
            TabSelector::All => "All",
            TabSelector::Genre(name) => name,
        }
    }
}
