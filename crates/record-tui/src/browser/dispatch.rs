//! Input dispatcher — the mode state machine.
//!
//! Every input is an [`Event`]. [`Dispatcher::handle`] takes the current
//! [`BrowserState`] by value, applies the event for the active [`Mode`], and
//! returns the next state together with the side effects the App must run.
//! Nothing in here performs I/O apart from favorite toggles, which go
//! straight to the [`PreferenceStore`].

use record_proto::prefs::PreferenceStore;
use record_proto::protocol::{Station, StreamQuality, Track};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{BrowserState, CatalogStatus, TabSelector};
use crate::action::Action;

// ── Inputs ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Normal,
    SearchEntry,
    HelpOverlay,
}

/// Terminal-independent key identity. The App translates raw terminal events
/// into these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A single printable character, shifted or not.
    Char(char),
    Enter,
    Esc,
    Backspace,
    Up,
    Down,
    Home,
    End,
    Tab,
    BackTab,
    /// Ctrl+C.
    Interrupt,
    /// Anything else, including modifier chords.
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Key(Key),
    /// Result of the one catalog fetch at startup.
    CatalogLoaded(Result<Vec<Station>, String>),
    /// Result of a now-playing fetch. A failed fetch arrives as `track: None`.
    NowPlayingLoaded {
        station_id: i64,
        track: Option<Track>,
    },
    /// The player could not start the stream requested for `station_id`.
    PlaybackFailed { station_id: i64 },
    /// Periodic refresh timer.
    Tick,
}

/// Next state plus the effects to execute, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: BrowserState,
    pub actions: Vec<Action>,
}

// ── Dispatcher ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Dispatcher {
    quality: StreamQuality,
    volume_step: i32,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(StreamQuality::default(), 5)
    }
}

impl Dispatcher {
    pub fn new(quality: StreamQuality, volume_step: u8) -> Self {
        Self {
            quality,
            volume_step: i32::from(volume_step),
        }
    }

    pub fn handle(
        &self,
        mut state: BrowserState,
        event: Event,
        prefs: &mut dyn PreferenceStore,
    ) -> Transition {
        let mut actions = Vec::new();
        match event {
            Event::Key(key) => match state.mode {
                Mode::HelpOverlay => state.mode = Mode::Normal,
                Mode::SearchEntry => search_key(&mut state, key),
                Mode::Normal => self.normal_key(&mut state, key, prefs, &mut actions),
            },
            Event::CatalogLoaded(Ok(stations)) => catalog_loaded(&mut state, stations, prefs),
            Event::CatalogLoaded(Err(message)) => {
                warn!("browser: catalog load failed: {}", message);
                state.status = CatalogStatus::Failed(message);
            }
            Event::NowPlayingLoaded { station_id, track } => {
                if state.selected_station().map(|s| s.id) == Some(station_id) {
                    state.now_playing = track;
                } else {
                    debug!("browser: dropping stale now-playing for station {}", station_id);
                }
            }
            Event::PlaybackFailed { station_id } => {
                if state.selected_station().map(|s| s.id) == Some(station_id) {
                    state.selection = None;
                    state.now_playing = None;
                }
            }
            Event::Tick => {
                if let Some(station) = state.selected_station() {
                    actions.push(Action::FetchNowPlaying {
                        station_id: station.id,
                    });
                }
            }
        }
        Transition { state, actions }
    }

    fn normal_key(
        &self,
        state: &mut BrowserState,
        key: Key,
        prefs: &mut dyn PreferenceStore,
        actions: &mut Vec<Action>,
    ) {
        let len = state.visible.len();
        match key {
            Key::Char('q') | Key::Interrupt => actions.push(Action::Quit),
            Key::Char('/') => {
                state.mode = Mode::SearchEntry;
                state.search.begin_entry();
            }
            Key::Char('?') => state.mode = Mode::HelpOverlay,
            Key::Esc => state.search.clear(),
            Key::Char('n') => {
                if let Some(pos) = state.search.next_match(&state.visible) {
                    state.cursor.set(pos);
                }
            }
            Key::Char('N') => {
                if let Some(pos) = state.search.prev_match(&state.visible) {
                    state.cursor.set(pos);
                }
            }
            Key::Up | Key::Char('k') => state.cursor.up(),
            Key::Down | Key::Char('j') => state.cursor.down(len),
            Key::Home | Key::Char('g') => state.cursor.first(),
            Key::End | Key::Char('G') => state.cursor.last(len),
            Key::Enter | Key::Char(' ') => {
                if let Some(idx) = state.cursor.station(&state.visible) {
                    self.play(state, idx, actions);
                }
            }
            Key::Char('s') => {
                state.selection = None;
                state.now_playing = None;
                actions.push(Action::Stop);
            }
            Key::Char('+') | Key::Char('=') => actions.push(Action::AdjustVolume(self.volume_step)),
            Key::Char('-') | Key::Char('_') => {
                actions.push(Action::AdjustVolume(-self.volume_step))
            }
            Key::Tab => {
                state.tab = state.tab.next(state.catalog.genres());
                state.rebuild_visible(&*prefs);
                state.search.clear();
                debug!("browser: tab {}, {} visible", state.tab_label(), state.visible.len());
            }
            Key::BackTab => {
                state.tab = state.tab.prev(state.catalog.genres());
                state.rebuild_visible(&*prefs);
                state.search.clear();
                debug!("browser: tab {}, {} visible", state.tab_label(), state.visible.len());
            }
            Key::Char('f') => toggle_favorite(state, prefs),
            Key::Char('F') => {
                state.favorites_only = !state.favorites_only;
                state.rebuild_visible(&*prefs);
                state.search.clear();
            }
            Key::Char('0') => {
                state.tab = TabSelector::All;
                state.favorites_only = false;
                state.rebuild_visible(&*prefs);
                state.search.clear();
            }
            Key::Char(digit @ '1'..='9') => {
                let slot = digit as usize - '1' as usize;
                let target = prefs
                    .favorites()
                    .get(slot)
                    .and_then(|&id| state.catalog.position_of(id));
                if let Some(idx) = target {
                    self.play(state, idx, actions);
                }
            }
            _ => {}
        }
    }

    fn play(&self, state: &mut BrowserState, station_idx: usize, actions: &mut Vec<Action>) {
        let Some(station) = state.catalog.station(station_idx) else {
            return;
        };
        let Some(url) = station.stream_url(self.quality) else {
            warn!("browser: station {} ({}) has no stream", station.id, station.title);
            return;
        };
        info!("browser: play {} ({})", station.title, self.quality.label());
        let station_id = station.id;
        actions.push(Action::Play {
            station_id,
            url: url.to_string(),
        });
        actions.push(Action::FetchNowPlaying { station_id });
        state.selection = Some(station_idx);
        state.now_playing = None;
    }
}

// ── Handlers ──────────────────────────────────────────────────────────────────

fn search_key(state: &mut BrowserState, key: Key) {
    let jump = match key {
        Key::Enter => {
            state.mode = Mode::Normal;
            state.search.commit();
            None
        }
        Key::Esc => {
            state.mode = Mode::Normal;
            state.search.clear();
            None
        }
        Key::Backspace => state
            .search
            .pop_char(state.catalog.stations(), &state.visible),
        Key::Char(ch) => state
            .search
            .push_char(ch, state.catalog.stations(), &state.visible),
        _ => None,
    };
    if let Some(pos) = jump {
        state.cursor.set(pos);
    }
}

fn toggle_favorite(state: &mut BrowserState, prefs: &mut dyn PreferenceStore) {
    let Some(station_id) = state.current_station().map(|s| s.id) else {
        return;
    };
    prefs.toggle_favorite(station_id);
    // genre tabs keep catalog order, so only these two views change shape
    if state.favorites_only || state.tab.is_all() {
        state.rebuild_visible(&*prefs);
    }
}

fn catalog_loaded(state: &mut BrowserState, stations: Vec<Station>, prefs: &dyn PreferenceStore) {
    info!("browser: catalog ready with {} stations", stations.len());
    let selected_id = state.selected_station().map(|s| s.id);
    state.catalog.load(stations);
    state.status = CatalogStatus::Ready;
    state.selection = selected_id.and_then(|id| state.catalog.position_of(id));
    if state.selection.is_none() {
        state.now_playing = None;
    }
    if state.tab.position(state.catalog.genres()).is_none() {
        state.tab = TabSelector::All;
    }
    state.rebuild_visible(prefs);
}
