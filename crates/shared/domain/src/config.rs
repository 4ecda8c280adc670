use crate::tier::Tier;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Top-level application configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LecternConfigInner {
    pub storage: StorageConfig,
    pub catalog: CatalogConfig,
    pub session: SessionConfig,
    pub player: PlayerConfig,
    pub release: ReleaseConfig,
    pub log: LogConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct LecternConfig {
    #[serde(flatten, default)]
    inner: Arc<LecternConfigInner>,
}

impl Deref for LecternConfig {
    type Target = LecternConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for LecternConfig {
    fn deref_mut(&mut self) -> &mut LecternConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One file per key under `data_dir`.
    #[default]
    File,
    /// Process-local; nothing survives exit.
    Memory,
}

/// Where persisted session and progress state lives.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub data_dir: PathBuf,
}

/// Course content source. `None` uses the catalog embedded in the binary.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub path: Option<PathBuf>,
}

/// Secret phrase to tier table. Keys are normalized when the session store is built.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub secrets: BTreeMap<String, Tier>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Prefix of every embed URL; the media id and `/v4/embed.html` are appended.
    pub embed_base: String,
    pub preview_interval_secs: u64,
    /// Seconds kept clear at the end of a video when picking a preview start offset.
    pub preview_tail_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    pub tick_millis: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub console: bool,
    /// Rolling log files are written here when set.
    pub dir: Option<PathBuf>,
    pub format: LogFormat,
}

impl PlayerConfig {
    #[must_use]
    pub const fn preview_interval(&self) -> Duration {
        Duration::from_secs(self.preview_interval_secs)
    }
}

impl ReleaseConfig {
    #[must_use]
    pub const fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }
}

// --- Default ---

impl Default for StorageConfig {
    fn default() -> Self {
        Self { backend: StorageBackend::File, data_dir: PathBuf::from(".lectern") }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        let secrets = [
            ("teamsilver", Tier::Silver),
            ("iamgold", Tier::Gold),
            ("iamsupreme", Tier::Diamond),
        ];
        Self { secrets: secrets.into_iter().map(|(s, t)| (s.to_owned(), t)).collect() }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            embed_base: "https://player.lectern.local/players".to_owned(),
            preview_interval_secs: 5,
            preview_tail_secs: 10,
        }
    }
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self { tick_millis: 1000 }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), console: false, dir: None, format: LogFormat::Text }
    }
}
