//! Storage Config

use std::path::PathBuf;

use clap::Args;
use trolley::persistence::{DEFAULT_STORAGE_KEY, file::FileStorage};

/// Cart storage settings.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Directory holding persisted carts
    #[arg(long, global = true, env = "TROLLEY_STATE_DIR", default_value = ".trolley")]
    pub state_dir: PathBuf,

    /// Key the cart is stored under; one key per profile
    #[arg(long, global = true, env = "TROLLEY_STORAGE_KEY", default_value = DEFAULT_STORAGE_KEY)]
    pub storage_key: String,
}

impl StorageConfig {
    /// File storage rooted at the state directory.
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(&self.state_dir)
    }
}
