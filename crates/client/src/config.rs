//! Client configuration from environment variables.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Settings owned by the terminal front end.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    /// Directory for `client.log`.
    pub log_dir: PathBuf,
    /// How long a key counts as held after its last press or repeat.
    pub key_hold: Duration,
    /// Draw a crosshair at the screen center.
    pub crosshair: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            key_hold: Duration::from_millis(250),
            crosshair: true,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `RAYCAST_LOG_DIR` - Directory for the log file (default: platform cache dir)
    /// - `RAYCAST_KEY_HOLD_MS` - Held-key decay in milliseconds (default: 250)
    /// - `RAYCAST_CROSSHAIR` - Draw the crosshair (default: true)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("RAYCAST_LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(ms) = read_env::<u64>("RAYCAST_KEY_HOLD_MS") {
            config.key_hold = Duration::from_millis(ms.max(1));
        }
        if let Some(crosshair) = read_env::<bool>("RAYCAST_CROSSHAIR") {
            config.crosshair = crosshair;
        }

        config
    }
}

/// Platform cache directory, or `./logs` when none is known.
fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "raycast")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
