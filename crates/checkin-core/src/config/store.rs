use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for read connection pooling
///
/// The pool holds read-only connections used by stats polling, lookups and
/// exports so they never wait on the writer connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadPoolConfig {
    /// Whether pooling is enabled (default: true)
    ///
    /// When disabled a single read-only connection is still opened.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Number of read-only connections (default: 4)
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,

    /// Timeout in milliseconds when acquiring a pooled connection (default: 5000)
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_ms: u64,
}

impl Default for ReadPoolConfig {
    fn default() -> Self {
        Self::enabled(default_pool_size())
    }
}

impl ReadPoolConfig {
    /// Create a new enabled read pool configuration
    pub fn enabled(pool_size: usize) -> Self {
        Self {
            enabled: true,
            pool_size,
            acquire_timeout_ms: default_acquire_timeout(),
        }
    }

    /// Single-connection configuration
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            pool_size: 1,
            acquire_timeout_ms: default_acquire_timeout(),
        }
    }

    /// Set the acquire timeout
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.acquire_timeout_ms = timeout_ms;
        self
    }
}

/// Configuration for the check-in store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the SQLite database file
    pub path: PathBuf,

    /// Enable WAL mode
    /// Default: true
    #[serde(default = "default_true")]
    pub wal_mode: bool,

    /// SQLite synchronous mode
    #[serde(default)]
    pub synchronous: SynchronousMode,

    /// How long a write waits for the database lock before failing, in ms.
    ///
    /// Applies to SQLite's busy handler (other terminals holding the lock)
    /// and to the in-process writer connection lock.
    /// Default: 5000
    #[serde(default = "default_busy_timeout")]
    pub busy_timeout_ms: u64,

    /// SQLite cache size (in pages, negative = KB)
    /// Default: -64000 (64MB)
    #[serde(default = "default_cache_size")]
    pub cache_size: i32,

    #[serde(default)]
    pub read_pool: ReadPoolConfig,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SynchronousMode {
    /// Full fsync (safest, slowest)
    Full,
    /// fsync at critical moments (good balance)
    #[default]
    Normal,
    /// No fsync (fastest, least safe)
    Off,
}

impl SynchronousMode {
    /// Value for `PRAGMA synchronous`
    pub fn pragma_value(self) -> &'static str {
        match self {
            SynchronousMode::Full => "FULL",
            SynchronousMode::Normal => "NORMAL",
            SynchronousMode::Off => "OFF",
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_pool_size() -> usize {
    4
}

fn default_acquire_timeout() -> u64 {
    5000
}

fn default_busy_timeout() -> u64 {
    5000
}

fn default_cache_size() -> i32 {
    -64000 // 64MB
}

impl StoreConfig {
    /// File name used when a store is opened from a data directory
    pub const DEFAULT_FILE_NAME: &'static str = "entry.db";

    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            wal_mode: true,
            synchronous: SynchronousMode::default(),
            busy_timeout_ms: default_busy_timeout(),
            cache_size: default_cache_size(),
            read_pool: ReadPoolConfig::default(),
        }
    }

    /// Config for `entry.db` inside `dir`
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self::new(dir.as_ref().join(Self::DEFAULT_FILE_NAME))
    }

    pub fn with_synchronous(mut self, synchronous: SynchronousMode) -> Self {
        self.synchronous = synchronous;
        self
    }

    pub fn with_wal_mode(mut self, wal_mode: bool) -> Self {
        self.wal_mode = wal_mode;
        self
    }

    pub fn with_busy_timeout_ms(mut self, busy_timeout_ms: u64) -> Self {
        self.busy_timeout_ms = busy_timeout_ms;
        self
    }

    pub fn with_read_pool(mut self, config: ReadPoolConfig) -> Self {
        self.read_pool = config;
        self
    }

    /// Directory containing the database file
    pub fn data_folder(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}
