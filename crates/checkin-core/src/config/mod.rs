pub mod export;
pub mod scan;
pub mod store;

pub use export::{ExportColumn, ExportOptions};
pub use scan::ScanConfig;
pub use store::{ReadPoolConfig, StoreConfig, SynchronousMode};

use serde::{Deserialize, Serialize};

/// Everything a terminal needs at startup, loadable from one file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminalConfig {
    pub store: StoreConfig,

    #[serde(default)]
    pub scan: ScanConfig,
}
