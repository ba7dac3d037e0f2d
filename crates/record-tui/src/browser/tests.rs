//! Browser scenarios driven through the dispatcher, key by key.

use record_proto::prefs::{PreferenceStore, Preferences};
use record_proto::protocol::{Genre, Station, Track};

use super::*;
use crate::action::Action;

fn station(id: i64, title: &str, tooltip: &str, genre: &str) -> Station {
    Station {
        id,
        title: title.to_string(),
        tooltip: tooltip.to_string(),
        stream_320: format!("https://stream.example/{id}_320"),
        genres: vec![Genre {
            id: 0,
            name: genre.to_string(),
        }],
        ..Station::default()
    }
}

/// Catalog positions 0..5 carry ids 1, 3, 5, 7, 9.
fn fixture() -> Vec<Station> {
    vec![
        station(1, "Record", "Main channel", "Dance"),
        station(3, "Techno", "Four on the floor", "Techno"),
        station(5, "Rock", "Guitars", "Rock"),
        station(7, "Chill-Out", "Slow mornings", "Dance"),
        station(9, "Trancemission", "Trance all night", "Techno"),
    ]
}

fn track(song: &str) -> Track {
    Track {
        artist: "Artist".into(),
        song: song.into(),
        ..Track::default()
    }
}

struct Harness {
    dispatcher: Dispatcher,
    state: BrowserState,
    prefs: Preferences,
}

impl Harness {
    fn loaded(favorites: Vec<i64>) -> Self {
        let mut h = Self {
            dispatcher: Dispatcher::default(),
            state: BrowserState::default(),
            prefs: Preferences::in_memory(favorites),
        };
        h.send(Event::CatalogLoaded(Ok(fixture())));
        h
    }

    fn send(&mut self, event: Event) -> Vec<Action> {
        let state = std::mem::take(&mut self.state);
        let transition = self.dispatcher.handle(state, event, &mut self.prefs);
        self.state = transition.state;
        transition.actions
    }

    fn press(&mut self, key: Key) -> Vec<Action> {
        self.send(Event::Key(key))
    }

    fn typed(&mut self, text: &str) {
        for ch in text.chars() {
            self.press(Key::Char(ch));
        }
    }

    fn visible_ids(&self) -> Vec<i64> {
        self.state
            .visible
            .iter()
            .filter_map(|&idx| self.state.catalog.station(idx))
            .map(|s| s.id)
            .collect()
    }
}

#[test]
fn load_pins_favorites_on_all_tab() {
    let h = Harness::loaded(vec![7, 3]);
    assert_eq!(h.state.status, CatalogStatus::Ready);
    assert_eq!(h.visible_ids(), vec![3, 7, 1, 5, 9]);
    assert_eq!(h.state.catalog.genres(), &["Dance", "Techno", "Rock"]);
}

#[test]
fn failed_load_still_accepts_quit() {
    let mut h = Harness {
        dispatcher: Dispatcher::default(),
        state: BrowserState::default(),
        prefs: Preferences::in_memory(Vec::new()),
    };
    h.send(Event::CatalogLoaded(Err("connection refused".into())));
    assert_eq!(
        h.state.status,
        CatalogStatus::Failed("connection refused".into())
    );
    assert_eq!(h.press(Key::Char('q')), vec![Action::Quit]);
}

#[test]
fn search_jumps_commits_and_cycles() {
    let mut h = Harness::loaded(Vec::new());
    h.press(Key::Down);
    h.press(Key::Down);

    h.press(Key::Char('/'));
    assert_eq!(h.state.mode, Mode::SearchEntry);
    h.typed("in");
    assert_eq!(h.state.search.matches(), &[0, 3]);
    assert_eq!(h.state.cursor.position(), 0);

    h.press(Key::Enter);
    assert_eq!(h.state.mode, Mode::Normal);
    assert!(h.state.search.query().is_empty());
    assert_eq!(h.state.search.matches(), &[0, 3]);

    h.press(Key::Char('n'));
    assert_eq!(h.state.cursor.position(), 3);
    h.press(Key::Char('n'));
    assert_eq!(h.state.cursor.position(), 0);
    h.press(Key::Char('N'));
    assert_eq!(h.state.cursor.position(), 3);
}

#[test]
fn escape_in_entry_abandons_search() {
    let mut h = Harness::loaded(Vec::new());
    h.press(Key::Char('/'));
    h.typed("rock");
    assert_eq!(h.state.cursor.position(), 2);

    h.press(Key::Esc);
    assert_eq!(h.state.mode, Mode::Normal);
    assert!(h.state.search.matches().is_empty());
    assert_eq!(h.state.cursor.position(), 2);
}

#[test]
fn entry_mode_takes_navigation_letters_literally() {
    let mut h = Harness::loaded(Vec::new());
    h.press(Key::Char('/'));
    h.typed("jkq");
    h.press(Key::Interrupt);
    assert_eq!(h.state.mode, Mode::SearchEntry);
    assert_eq!(h.state.search.query(), "jkq");

    h.press(Key::Backspace);
    assert_eq!(h.state.search.query(), "jk");
}

#[test]
fn search_only_sees_visible_stations() {
    let mut h = Harness::loaded(vec![1, 3, 5]);
    h.press(Key::Char('F'));
    assert_eq!(h.visible_ids(), vec![1, 3, 5]);

    h.press(Key::Char('/'));
    h.typed("Chill-Out");
    assert!(h.state.search.matches().is_empty());
}

#[test]
fn help_overlay_swallows_next_key() {
    let mut h = Harness::loaded(Vec::new());
    h.press(Key::Char('?'));
    assert_eq!(h.state.mode, Mode::HelpOverlay);

    assert!(h.press(Key::Char('q')).is_empty());
    assert_eq!(h.state.mode, Mode::Normal);
}

#[test]
fn shrinking_rebuild_sends_cursor_home() {
    let mut h = Harness::loaded(vec![1, 3, 5]);
    h.press(Key::Char('G'));
    assert_eq!(h.state.cursor.position(), 4);

    h.press(Key::Char('F'));
    assert_eq!(h.state.visible.len(), 3);
    assert_eq!(h.state.cursor.position(), 0);
}

#[test]
fn enter_plays_and_schedules_now_playing() {
    let mut h = Harness::loaded(Vec::new());
    h.press(Key::Down);
    let actions = h.press(Key::Enter);
    assert_eq!(
        actions,
        vec![
            Action::Play {
                station_id: 3,
                url: "https://stream.example/3_320".into()
            },
            Action::FetchNowPlaying { station_id: 3 },
        ]
    );
    assert_eq!(h.state.selection, Some(1));
}

#[test]
fn station_without_stream_is_not_played() {
    let mut h = Harness::loaded(Vec::new());
    let mut silent = fixture();
    silent[0].stream_320.clear();
    h.send(Event::CatalogLoaded(Ok(silent)));

    assert!(h.press(Key::Char(' ')).is_empty());
    assert_eq!(h.state.selection, None);
}

#[test]
fn stop_then_late_fetch_leaves_nothing_playing() {
    let mut h = Harness::loaded(Vec::new());
    h.press(Key::Enter);
    assert_eq!(h.press(Key::Char('s')), vec![Action::Stop]);

    h.send(Event::NowPlayingLoaded {
        station_id: 1,
        track: Some(track("Late")),
    });
    assert_eq!(h.state.selection, None);
    assert_eq!(h.state.now_playing, None);
}

#[test]
fn fetch_for_previous_station_is_discarded() {
    let mut h = Harness::loaded(Vec::new());
    h.press(Key::Enter);
    h.press(Key::Down);
    h.press(Key::Enter);

    h.send(Event::NowPlayingLoaded {
        station_id: 1,
        track: Some(track("Old")),
    });
    assert_eq!(h.state.now_playing, None);

    h.send(Event::NowPlayingLoaded {
        station_id: 3,
        track: Some(track("Current")),
    });
    assert_eq!(h.state.now_playing.map(|t| t.song), Some("Current".to_string()));
}

#[test]
fn digit_quick_selects_favorite_without_moving_cursor() {
    let mut h = Harness::loaded(vec![7, 3, 9]);
    let actions = h.press(Key::Char('2'));
    assert_eq!(
        actions.first(),
        Some(&Action::Play {
            station_id: 3,
            url: "https://stream.example/3_320".into()
        })
    );
    assert_eq!(h.state.selected_station().map(|s| s.id), Some(3));
    assert_eq!(h.state.cursor.position(), 0);
}

#[test]
fn digit_without_favorite_in_slot_does_nothing() {
    let mut h = Harness::loaded(vec![7, 42]);
    assert!(h.press(Key::Char('5')).is_empty());
    // favorite id not in the catalog
    assert!(h.press(Key::Char('2')).is_empty());
    assert_eq!(h.state.selection, None);
}

#[test]
fn favoriting_on_all_tab_repins() {
    let mut h = Harness::loaded(Vec::new());
    h.press(Key::Down);
    h.press(Key::Down);
    h.press(Key::Char('f'));
    assert_eq!(h.prefs.favorites(), &[5]);
    assert_eq!(h.visible_ids(), vec![5, 1, 3, 7, 9]);
}

#[test]
fn favoriting_on_genre_tab_keeps_order() {
    let mut h = Harness::loaded(Vec::new());
    h.press(Key::Tab);
    assert_eq!(h.state.tab, TabSelector::Genre("Dance".into()));
    assert_eq!(h.visible_ids(), vec![1, 7]);

    h.press(Key::Down);
    h.press(Key::Char('f'));
    assert!(h.prefs.is_favorite(7));
    assert_eq!(h.visible_ids(), vec![1, 7]);
}

#[test]
fn unfavoriting_in_favorites_view_drops_row() {
    let mut h = Harness::loaded(vec![1, 3]);
    h.press(Key::Char('F'));
    h.press(Key::Char('f'));
    assert_eq!(h.visible_ids(), vec![3]);
}

#[test]
fn tab_keys_cycle_and_clear_search() {
    let mut h = Harness::loaded(Vec::new());
    h.press(Key::Char('/'));
    h.typed("o");
    h.press(Key::Enter);
    assert!(!h.state.search.matches().is_empty());

    h.press(Key::Tab);
    assert!(h.state.search.matches().is_empty());
    h.press(Key::Tab);
    assert_eq!(h.state.tab, TabSelector::Genre("Techno".into()));
    assert_eq!(h.visible_ids(), vec![3, 9]);

    h.press(Key::Tab);
    h.press(Key::Tab);
    assert_eq!(h.state.tab, TabSelector::All);
    h.press(Key::BackTab);
    assert_eq!(h.state.tab, TabSelector::Genre("Rock".into()));
}

#[test]
fn zero_resets_filters() {
    let mut h = Harness::loaded(vec![9]);
    h.press(Key::Tab);
    h.press(Key::Char('F'));
    assert!(h.state.visible.is_empty());

    h.press(Key::Char('0'));
    assert_eq!(h.state.tab, TabSelector::All);
    assert!(!h.state.favorites_only);
    assert_eq!(h.visible_ids(), vec![9, 1, 3, 5, 7]);
}

#[test]
fn volume_keys_step_both_ways() {
    let mut h = Harness::loaded(Vec::new());
    assert_eq!(h.press(Key::Char('+')), vec![Action::AdjustVolume(5)]);
    assert_eq!(h.press(Key::Char('=')), vec![Action::AdjustVolume(5)]);
    assert_eq!(h.press(Key::Char('-')), vec![Action::AdjustVolume(-5)]);
    assert_eq!(h.press(Key::Char('_')), vec![Action::AdjustVolume(-5)]);
}

#[test]
fn tick_refreshes_only_while_playing() {
    let mut h = Harness::loaded(Vec::new());
    assert!(h.send(Event::Tick).is_empty());

    h.press(Key::Enter);
    assert_eq!(
        h.send(Event::Tick),
        vec![Action::FetchNowPlaying { station_id: 1 }]
    );
}

#[test]
fn reload_keeps_playing_station_by_id() {
    let mut h = Harness::loaded(Vec::new());
    h.press(Key::Char('G'));
    h.press(Key::Enter);
    assert_eq!(h.state.selection, Some(4));

    let mut reordered = fixture();
    reordered.reverse();
    h.send(Event::CatalogLoaded(Ok(reordered)));
    assert_eq!(h.state.selected_station().map(|s| s.id), Some(9));
    assert_eq!(h.state.selection, Some(0));
}

#[test]
fn favoriting_after_committed_search_keeps_matches_in_visible_order() {
    let mut h = Harness::loaded(Vec::new());
    h.press(Key::Char('/'));
    h.typed("in");
    h.press(Key::Enter);
    // "Main channel" and "Slow mornings"
    assert_eq!(h.state.search.matches(), &[0, 3]);

    h.press(Key::End);
    h.press(Key::Up);
    h.press(Key::Char('f'));
    assert_eq!(h.visible_ids(), vec![7, 1, 3, 5, 9]);
    assert_eq!(h.state.search.matches(), &[3, 0]);

    h.press(Key::Char('n'));
    assert_eq!(h.state.cursor.position(), 0);
    h.press(Key::Char('n'));
    assert_eq!(h.state.cursor.position(), 1);
    h.press(Key::Char('N'));
    assert_eq!(h.state.cursor.position(), 0);
}

#[test]
fn failed_playback_clears_selection() {
    let mut h = Harness::loaded(Vec::new());
    h.press(Key::Enter);
    h.send(Event::NowPlayingLoaded {
        station_id: 1,
        track: Some(track("Intro")),
    });

    h.send(Event::PlaybackFailed { station_id: 3 });
    assert_eq!(h.state.selection, Some(0));

    h.send(Event::PlaybackFailed { station_id: 1 });
    assert_eq!(h.state.selection, None);
    assert_eq!(h.state.now_playing, None);
    assert!(h.send(Event::Tick).is_empty());
}
