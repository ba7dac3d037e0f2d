use std::path::PathBuf;

const APP_DIR: &str = "record-radio";

/// Per-process IPC socket so two running instances never share an mpv.
#[cfg(unix)]
pub fn mpv_socket_name() -> String {
    format!(
        "{}/record-radio-mpv-{}.sock",
        std::env::temp_dir().display(),
        std::process::id()
    )
}

#[cfg(windows)]
pub fn mpv_socket_name() -> String {
    format!("record-radio-mpv-{}", std::process::id())
}

#[cfg(unix)]
pub fn mpv_socket_path(name: &str) -> String {
    name.to_string()
}

#[cfg(windows)]
pub fn mpv_socket_path(name: &str) -> String {
    format!(r"\\.\pipe\{}", name)
}

pub fn mpv_socket_arg(name: &str) -> String {
    format!("--input-ipc-server={}", mpv_socket_path(name))
}

pub fn data_dir() -> PathBuf {
    // Same XDG-style layout on macOS as on Linux
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".local")
            .join("share")
            .join(APP_DIR)
    }
    #[cfg(windows)]
    {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}

pub fn config_dir() -> PathBuf {
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join(APP_DIR)
    }

    #[cfg(windows)]
    {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}

#[cfg(unix)]
pub fn mpv_binary_name() -> &'static str {
    "mpv"
}

#[cfg(windows)]
pub fn mpv_binary_name() -> &'static str {
    "mpv.exe"
}

fn find_beside_exe(name: &str) -> Option<PathBuf> {
    let current_exe = std::env::current_exe().ok()?;
    let dir = current_exe.parent()?;
    let p = dir.join(name);
    if p.exists() {
        return Some(p);
    }
    let p = dir.join("external").join(name);
    p.exists().then_some(p)
}

fn find_on_path(name: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(name))
        .find(|p| p.is_file())
}

/// Find the mpv binary: beside the current executable first, then PATH.
pub fn find_mpv_binary() -> Option<PathBuf> {
    let name = mpv_binary_name();
    find_beside_exe(name).or_else(|| find_on_path(name))
}

/// Platform-specific hint printed when mpv cannot be found.
pub fn mpv_install_hint() -> &'static str {
    "mpv not found. Install it:\n  macOS:   brew install mpv\n  Linux:   sudo apt install mpv\n  Windows: winget install mpv"
}
