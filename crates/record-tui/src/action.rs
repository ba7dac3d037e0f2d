//! Action enum — side effects the browser asks the App to perform.
//!
//! The browser state machine never touches the player or the network itself.
//! It returns `Action`s; the App executes them and feeds results back in as
//! browser events.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ── Playback ─────────────────────────────────────────────────────────────
    /// Start the stream, replacing whatever is playing.
    Play { station_id: i64, url: String },
    Stop,
    /// Relative volume change in percentage points.
    AdjustVolume(i32),

    // ── Network ──────────────────────────────────────────────────────────────
    /// Fetch the current track for a station; the result comes back as
    /// `browser::Event::NowPlayingLoaded`.
    FetchNowPlaying { station_id: i64 },

    // ── Lifecycle ────────────────────────────────────────────────────────────
    Quit,
}
