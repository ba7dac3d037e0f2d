//! mpv playback.
//!
//! One mpv child per stream: `play` kills the previous child and spawns a
//! new one pointed at the stream URL. Volume changes while playing go over
//! mpv's JSON IPC socket from a detached task so the UI never waits on it.
//!
//! Platform notes:
//! - Unix:    Unix domain socket in the temp dir
//! - Windows: Named pipe  \\.\pipe\<name>

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use anyhow::Context;
use record_proto::platform;
use record_proto::prefs::MAX_VOLUME;
use serde_json::json;
use tokio::io::AsyncWriteExt;
use tokio::process::Child;
use tracing::{debug, info, warn};

#[cfg(unix)]
use tokio::net::UnixStream;

#[cfg(windows)]
use tokio::net::windows::named_pipe::ClientOptions;

const IPC_TIMEOUT: Duration = Duration::from_millis(500);

/// What the App needs from an audio backend.
pub trait Player: Send {
    /// Start `url`, replacing anything already playing.
    fn play(&self, url: &str) -> anyhow::Result<()>;
    fn stop(&self);
    /// Set the absolute volume, clamped to 0..=100.
    fn set_volume(&self, volume: i32);
    fn volume(&self) -> u8;
    fn is_playing(&self) -> bool;
}

pub fn clamp_volume(volume: i32) -> u8 {
    volume.clamp(0, i32::from(MAX_VOLUME)) as u8
}

/// IPC line that sets mpv's volume property.
pub fn volume_command(volume: u8) -> String {
    format!("{}\n", json!({ "command": ["set_property", "volume", volume] }))
}

struct Inner {
    child: Option<Child>,
    volume: u8,
}

pub struct MpvPlayer {
    binary: PathBuf,
    socket_name: String,
    stderr_log: PathBuf,
    inner: Mutex<Inner>,
}

impl MpvPlayer {
    pub fn new(binary: PathBuf, volume: u8) -> Self {
        Self {
            binary,
            socket_name: platform::mpv_socket_name(),
            stderr_log: platform::data_dir().join("mpv-stderr.log"),
            inner: Mutex::new(Inner {
                child: None,
                volume: volume.min(MAX_VOLUME),
            }),
        }
    }

    /// Locate mpv beside the executable or on PATH.
    pub fn discover(volume: u8) -> anyhow::Result<Self> {
        let binary = platform::find_mpv_binary()
            .ok_or_else(|| anyhow::anyhow!("{}", platform::mpv_install_hint()))?;
        info!("mpv: using {}", binary.display());
        Ok(Self::new(binary, volume))
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // a poisoned lock still holds consistent state
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn stderr_sink(&self) -> Stdio {
        if let Some(dir) = self.stderr_log.parent() {
            let _ = std::fs::create_dir_all(dir);
        }
        match std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.stderr_log)
        {
            Ok(file) => file.into(),
            Err(e) => {
                warn!("mpv: cannot open {:?}: {}", self.stderr_log, e);
                Stdio::null()
            }
        }
    }

    fn send_ipc(&self, payload: String) {
        let path = platform::mpv_socket_path(&self.socket_name);
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            debug!("mpv: no runtime, skipping IPC");
            return;
        };
        handle.spawn(async move {
            match tokio::time::timeout(IPC_TIMEOUT, write_ipc(&path, payload.as_bytes())).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => debug!("mpv: ipc write to {} failed: {}", path, e),
                Err(_) => debug!("mpv: ipc write to {} timed out", path),
            }
        });
    }
}

impl Player for MpvPlayer {
    fn play(&self, url: &str) -> anyhow::Result<()> {
        let mut inner = self.lock();
        if let Some(old) = inner.child.take() {
            reap(old);
        }

        let child = tokio::process::Command::new(&self.binary)
            .arg("--no-video")
            .arg("--quiet")
            .arg("--no-terminal")
            .arg(format!("--volume={}", inner.volume))
            .arg(platform::mpv_socket_arg(&self.socket_name))
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(self.stderr_sink())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to start {}", self.binary.display()))?;
        info!("mpv: playing {} (pid {:?})", url, child.id());
        inner.child = Some(child);
        Ok(())
    }

    fn stop(&self) {
        if let Some(child) = self.lock().child.take() {
            info!("mpv: stop");
            reap(child);
        }
    }

    fn set_volume(&self, volume: i32) {
        let volume = clamp_volume(volume);
        let playing = {
            let mut inner = self.lock();
            inner.volume = volume;
            inner.child.is_some()
        };
        debug!("mpv: volume {}", volume);
        if playing {
            self.send_ipc(volume_command(volume));
        }
    }

    fn volume(&self) -> u8 {
        self.lock().volume
    }

    fn is_playing(&self) -> bool {
        let mut inner = self.lock();
        match inner.child.as_mut().map(|c| c.try_wait()) {
            Some(Ok(None)) => true,
            Some(Ok(Some(status))) => {
                warn!("mpv: exited on its own with {}", status);
                inner.child = None;
                false
            }
            Some(Err(e)) => {
                warn!("mpv: cannot poll child: {}", e);
                false
            }
            None => false,
        }
    }
}

impl Drop for MpvPlayer {
    fn drop(&mut self) {
        if let Some(mut child) = self.lock().child.take() {
            let _ = child.start_kill();
        }
        #[cfg(unix)]
        let _ = std::fs::remove_file(platform::mpv_socket_path(&self.socket_name));
    }
}

/// Kill a child and collect its exit status off the calling thread.
fn reap(mut child: Child) {
    if let Err(e) = child.start_kill() {
        debug!("mpv: kill failed: {}", e);
    }
    if let Ok(handle) = tokio::runtime::Handle::try_current() {
        handle.spawn(async move {
            let _ = child.wait().await;
        });
    }
}

#[cfg(unix)]
async fn write_ipc(path: &str, payload: &[u8]) -> std::io::Result<()> {
    let mut stream = UnixStream::connect(path).await?;
    stream.write_all(payload).await
}

#[cfg(windows)]
async fn write_ipc(path: &str, payload: &[u8]) -> std::io::Result<()> {
    let mut pipe = ClientOptions::new().open(path)?;
    pipe.write_all(payload).await
}
