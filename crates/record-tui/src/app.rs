//! App — the event loop around the station browser.
//!
//! Architecture:
//! - `App` owns the `BrowserState`, the preferences and the player.
//! - A `tokio::mpsc` channel carries `AppMessage`s in from the terminal
//!   reader and from background fetch tasks; one message is applied at a time.
//! - Every input goes through `Dispatcher::handle`, which returns the next
//!   state plus `Action`s. The App performs those actions.
//! - A periodic tick refreshes now-playing for the selected station.

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
    Frame, Terminal,
};
use record_proto::catalog::CatalogClient;
use record_proto::config::Config;
use record_proto::prefs::{PreferenceStore, Preferences};
use record_proto::protocol::{Station, Track};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::{
    action::Action,
    browser::{self, BrowserState, CatalogStatus, Dispatcher, Key, Mode, Transition},
    components::{header, help_overlay, now_playing, splash, station_list::StationList, tabs},
    mpv::Player,
    theme::C_BG,
    widgets::{status_bar, toast::ToastManager},
};

/// Messages into the main loop.
#[derive(Debug)]
pub enum AppMessage {
    /// Raw terminal event.
    Event(Event),
    StationsLoaded(Result<Vec<Station>, String>),
    NowPlaying {
        station_id: i64,
        track: Result<Option<Track>, String>,
    },
}

pub struct App {
    state: BrowserState,
    dispatcher: Dispatcher,
    prefs: Preferences,
    player: Box<dyn Player>,
    client: Arc<CatalogClient>,
    tx: mpsc::Sender<AppMessage>,
    rx: Option<mpsc::Receiver<AppMessage>>,
    toast: ToastManager,
    station_list: StationList,
    now_playing_at: Option<DateTime<Local>>,
    poll_interval: Duration,
    log_path: PathBuf,
    should_quit: bool,
}

impl App {
    pub fn new(
        config: &Config,
        prefs: Preferences,
        player: Box<dyn Player>,
        client: CatalogClient,
    ) -> Self {
        let (tx, rx) = mpsc::channel(256);
        Self {
            state: BrowserState::default(),
            dispatcher: Dispatcher::new(config.playback.quality, config.playback.volume_step),
            prefs,
            player,
            client: Arc::new(client),
            tx,
            rx: Some(rx),
            toast: ToastManager::new(),
            station_list: StationList::new(),
            now_playing_at: None,
            poll_interval: config.polling.now_playing_interval(),
            log_path: config.paths.log_file.clone(),
            should_quit: false,
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        debug!("run(): terminal ready, size={:?}", terminal.size());

        let result = self.event_loop(&mut terminal).await;

        // ── Teardown ──────────────────────────────────────────────────────────
        self.shutdown();
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> anyhow::Result<()> {
        let mut rx = self
            .rx
            .take()
            .ok_or_else(|| anyhow::anyhow!("event loop already started"))?;

        // ── Background task: keyboard events ──────────────────────────────────
        let event_tx = self.tx.clone();
        // exits within one poll interval once the receiver is dropped
        tokio::task::spawn_blocking(move || {
            while !event_tx.is_closed() {
                match event::poll(Duration::from_millis(250)).and_then(|ready| {
                    if ready {
                        event::read().map(Some)
                    } else {
                        Ok(None)
                    }
                }) {
                    Ok(Some(ev)) => {
                        if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => {
                        warn!("terminal event read failed: {}", e);
                        break;
                    }
                }
            }
        });

        self.toast.spinner("loading stations…");
        self.spawn_catalog_fetch();

        // ── Periodic timers ───────────────────────────────────────────────────
        let mut poll = tokio::time::interval(self.poll_interval);
        poll.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut toast_tick = tokio::time::interval(Duration::from_millis(100));
        toast_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    needs_redraw = self.handle_message(msg);
                }
                _ = poll.tick() => {
                    self.browse(browser::Event::Tick);
                }
                _ = toast_tick.tick() => {
                    needs_redraw = self.toast.tick();
                }
            }
        }
        Ok(())
    }

    /// Stop playback and persist the final volume.
    fn shutdown(&mut self) {
        self.player.stop();
        self.prefs.set_volume(i32::from(self.player.volume()));
        match self.prefs.save() {
            Ok(()) => info!("preferences saved"),
            Err(e) => error!("failed to save preferences: {:#}", e),
        }
    }

    // ── Message handler ───────────────────────────────────────────────────────

    /// Returns `true` if the message changed anything on screen.
    fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(Event::Key(key)) => {
                if key.kind == KeyEventKind::Release {
                    return false;
                }
                self.browse(browser::Event::Key(translate_key(key)));
            }
            AppMessage::Event(Event::Resize(..)) => {}
            AppMessage::Event(_) => return false,

            AppMessage::StationsLoaded(result) => {
                self.toast.dismiss_spinner();
                let failed = result.is_err();
                self.browse(browser::Event::CatalogLoaded(result));
                if failed {
                    self.toast.error("could not load stations");
                } else {
                    self.toast
                        .success(format!("{} stations", self.state.catalog.len()));
                }
            }

            AppMessage::NowPlaying { station_id, track } => {
                // a failed lookup reads as "no track"
                let track = track.unwrap_or_else(|e| {
                    warn!("now playing for {} failed: {}", station_id, e);
                    None
                });
                let current = track.is_some();
                self.browse(browser::Event::NowPlayingLoaded { station_id, track });
                if current && self.state.selected_station().map(|s| s.id) == Some(station_id) {
                    self.now_playing_at = Some(Local::now());
                }
            }
        }
        true
    }

    /// Run one browser transition and perform its actions.
    fn browse(&mut self, event: browser::Event) {
        let state = std::mem::take(&mut self.state);
        let Transition { state, actions } = self.dispatcher.handle(state, event, &mut self.prefs);
        self.state = state;

        if let Some(e) = self.prefs.take_save_error() {
            self.toast.warning(format!("favorites not saved: {}", e));
        }
        for action in actions {
            self.apply_action(action);
        }
    }

    fn apply_action(&mut self, action: Action) {
        debug!("apply_action: {:?}", action);
        match action {
            // ── Playback ──────────────────────────────────────────────────────
            Action::Play { station_id, url } => {
                self.now_playing_at = None;
                match self.player.play(&url) {
                    Ok(()) => {
                        let title = self
                            .state
                            .catalog
                            .position_of(station_id)
                            .and_then(|idx| self.state.catalog.station(idx))
                            .map(|s| s.title.clone())
                            .unwrap_or_default();
                        self.toast.info(format!("▶ {}", title));
                    }
                    Err(e) => {
                        error!("playback failed for {}: {:#}", url, e);
                        self.toast.error(format!("playback failed: {:#}", e));
                        self.browse(browser::Event::PlaybackFailed { station_id });
                    }
                }
            }
            Action::Stop => {
                self.player.stop();
                self.now_playing_at = None;
                self.toast.info("stopped");
            }
            Action::AdjustVolume(delta) => {
                let volume = i32::from(self.player.volume()) + delta;
                self.player.set_volume(volume);
                self.prefs.set_volume(volume);
            }

            // ── Network ───────────────────────────────────────────────────────
            Action::FetchNowPlaying { station_id } => self.spawn_now_playing_fetch(station_id),

            // ── Lifecycle ─────────────────────────────────────────────────────
            Action::Quit => {
                info!("quit requested");
                self.should_quit = true;
            }
        }
    }

    fn spawn_catalog_fetch(&self) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.fetch_stations().await.map_err(|e| e.to_string());
            let _ = tx.send(AppMessage::StationsLoaded(result)).await;
        });
    }

    fn spawn_now_playing_fetch(&self, station_id: i64) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let track = client
                .fetch_now_playing(station_id)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(AppMessage::NowPlaying { station_id, track }).await;
        });
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(C_BG)), area);

        match &self.state.status {
            CatalogStatus::Loading => splash::draw_loading(frame, area, self.client.base_url()),
            CatalogStatus::Failed(message) => {
                splash::draw_failed(frame, area, message, &self.log_path.display().to_string())
            }
            CatalogStatus::Ready => self.draw_browser(frame, area),
        }

        self.toast.draw(frame, area);
    }

    fn draw_browser(&mut self, frame: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(now_playing::HEIGHT),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        let playing = self.player.is_playing();
        header::draw(frame, rows[0], &self.state, self.player.volume(), playing);
        tabs::draw(frame, rows[1], &self.state);
        self.station_list.draw(frame, rows[2], &self.state, &self.prefs);
        now_playing::draw(frame, rows[3], &self.state, self.now_playing_at);
        status_bar::draw_position_line(frame, rows[4], &self.state);
        status_bar::draw_keys_bar(frame, rows[5], &self.state);

        if self.state.mode == Mode::HelpOverlay {
            help_overlay::draw(frame, area);
        }
    }
}

/// Terminal key to browser key. Modifier chords other than Shift and
/// Ctrl+C become `Key::Other`.
pub fn translate_key(key: KeyEvent) -> Key {
    let chord = key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Key::Interrupt,
        KeyCode::Char(_) if chord => Key::Other,
        KeyCode::Char(ch) => Key::Char(ch),
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        _ => Key::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use record_proto::config::ApiConfig;
    use record_proto::protocol::Genre;

    #[derive(Default)]
    struct Recorded {
        played: Vec<String>,
        stops: usize,
        volume: u8,
        fail: bool,
    }

    #[derive(Clone, Default)]
    struct RecordingPlayer(Arc<Mutex<Recorded>>);

    impl Player for RecordingPlayer {
        fn play(&self, url: &str) -> anyhow::Result<()> {
            let mut r = self.0.lock().unwrap();
            if r.fail {
                anyhow::bail!("no audio device");
            }
            r.played.push(url.to_string());
            Ok(())
        }

        fn stop(&self) {
            self.0.lock().unwrap().stops += 1;
        }

        fn set_volume(&self, volume: i32) {
            self.0.lock().unwrap().volume = volume.clamp(0, 100) as u8;
        }

        fn volume(&self) -> u8 {
            self.0.lock().unwrap().volume
        }

        fn is_playing(&self) -> bool {
            !self.0.lock().unwrap().played.is_empty()
        }
    }

    fn stations() -> Vec<Station> {
        vec![
            Station {
                id: 10,
                title: "Record".into(),
                stream_320: "https://stream.example/rr_320".into(),
                genres: vec![Genre {
                    id: 1,
                    name: "Dance".into(),
                }],
                ..Station::default()
            },
            Station {
                id: 20,
                title: "Techno".into(),
                stream_128: "https://stream.example/tm_128".into(),
                ..Station::default()
            },
        ]
    }

    fn app_with(player: RecordingPlayer, prefs: Preferences) -> App {
        player.set_volume(80);
        // nothing listens here; fetches fail fast and come back as warnings
        let client = CatalogClient::new(&ApiConfig {
            base_url: "http://127.0.0.1:9".into(),
            ..ApiConfig::default()
        })
        .unwrap();
        App::new(&Config::default(), prefs, Box::new(player), client)
    }

    fn key(code: KeyCode) -> AppMessage {
        AppMessage::Event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    #[tokio::test]
    async fn loaded_catalog_is_browsable() {
        let mut app = app_with(RecordingPlayer::default(), Preferences::in_memory(vec![]));
        assert!(app.handle_message(AppMessage::StationsLoaded(Ok(stations()))));
        assert_eq!(app.state.status, CatalogStatus::Ready);
        assert_eq!(app.state.visible, vec![0, 1]);
        assert_eq!(app.toast.messages(), vec!["2 stations"]);
    }

    #[tokio::test]
    async fn failed_catalog_shows_error() {
        let mut app = app_with(RecordingPlayer::default(), Preferences::in_memory(vec![]));
        app.handle_message(AppMessage::StationsLoaded(Err("timed out".into())));
        assert_eq!(app.state.status, CatalogStatus::Failed("timed out".into()));
        assert_eq!(app.toast.messages(), vec!["could not load stations"]);
    }

    #[tokio::test]
    async fn enter_plays_through_player_with_fallback_stream() {
        let player = RecordingPlayer::default();
        let mut app = app_with(player.clone(), Preferences::in_memory(vec![]));
        app.handle_message(AppMessage::StationsLoaded(Ok(stations())));

        app.handle_message(key(KeyCode::Down));
        app.handle_message(key(KeyCode::Enter));
        assert_eq!(
            player.0.lock().unwrap().played,
            vec!["https://stream.example/tm_128".to_string()]
        );
        assert_eq!(app.state.selection, Some(1));
    }

    #[tokio::test]
    async fn playback_failure_becomes_toast() {
        let player = RecordingPlayer::default();
        player.0.lock().unwrap().fail = true;
        let mut app = app_with(player, Preferences::in_memory(vec![]));
        app.handle_message(AppMessage::StationsLoaded(Ok(stations())));

        app.handle_message(key(KeyCode::Enter));
        assert!(app
            .toast
            .messages()
            .iter()
            .any(|m| m.contains("no audio device")));
        assert_eq!(app.state.selection, None);
        let tick = app
            .dispatcher
            .handle(app.state.clone(), browser::Event::Tick, &mut app.prefs);
        assert!(tick.actions.is_empty());
    }

    #[tokio::test]
    async fn volume_keys_reach_player_and_prefs() {
        let player = RecordingPlayer::default();
        let mut app = app_with(player.clone(), Preferences::in_memory(vec![]));
        app.handle_message(AppMessage::StationsLoaded(Ok(stations())));

        app.handle_message(key(KeyCode::Char('+')));
        app.handle_message(key(KeyCode::Char('+')));
        app.handle_message(key(KeyCode::Char('-')));
        assert_eq!(player.volume(), 85);
        assert_eq!(app.prefs.volume(), 85);
    }

    #[tokio::test]
    async fn now_playing_applies_for_selection_only() {
        let mut app = app_with(RecordingPlayer::default(), Preferences::in_memory(vec![]));
        app.handle_message(AppMessage::StationsLoaded(Ok(stations())));
        app.handle_message(key(KeyCode::Enter));

        let track = Track {
            artist: "A".into(),
            song: "S".into(),
            ..Track::default()
        };
        app.handle_message(AppMessage::NowPlaying {
            station_id: 20,
            track: Ok(Some(track.clone())),
        });
        assert_eq!(app.state.now_playing, None);
        assert!(app.now_playing_at.is_none());

        app.handle_message(AppMessage::NowPlaying {
            station_id: 10,
            track: Ok(Some(track.clone())),
        });
        assert_eq!(app.state.now_playing, Some(track));
        assert!(app.now_playing_at.is_some());
    }

    #[tokio::test]
    async fn failed_now_playing_clears_track() {
        let mut app = app_with(RecordingPlayer::default(), Preferences::in_memory(vec![]));
        app.handle_message(AppMessage::StationsLoaded(Ok(stations())));
        app.handle_message(key(KeyCode::Enter));
        app.state.now_playing = Some(Track::default());

        app.handle_message(AppMessage::NowPlaying {
            station_id: 10,
            track: Err("503".into()),
        });
        assert_eq!(app.state.now_playing, None);
        assert_eq!(app.toast.messages(), vec!["▶ Record", "2 stations"]);
    }

    #[tokio::test]
    async fn quit_stops_player_and_saves_volume() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        let player = RecordingPlayer::default();
        let mut app = app_with(player.clone(), Preferences::load(&path));
        app.handle_message(AppMessage::StationsLoaded(Ok(stations())));

        app.handle_message(key(KeyCode::Char('-')));
        app.handle_message(key(KeyCode::Char('q')));
        assert!(app.should_quit);

        app.shutdown();
        assert_eq!(player.0.lock().unwrap().stops, 1);
        assert_eq!(Preferences::load(&path).volume(), 75);
    }

    #[tokio::test]
    async fn favorite_save_failure_becomes_toast() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let prefs = Preferences::load(&blocker.join("preferences.json"));
        let mut app = app_with(RecordingPlayer::default(), prefs);
        app.handle_message(AppMessage::StationsLoaded(Ok(stations())));

        app.handle_message(key(KeyCode::Char('f')));
        assert!(app.prefs.is_favorite(10));
        assert!(app
            .toast
            .messages()
            .iter()
            .any(|m| m.starts_with("favorites not saved")));
    }

    #[test]
    fn key_translation() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(translate_key(ctrl_c), Key::Interrupt);

        let ctrl_f = KeyEvent::new(KeyCode::Char('f'), KeyModifiers::CONTROL);
        assert_eq!(translate_key(ctrl_f), Key::Other);

        let shifted = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(translate_key(shifted), Key::Char('G'));

        let back = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(translate_key(back), Key::BackTab);
    }
}
