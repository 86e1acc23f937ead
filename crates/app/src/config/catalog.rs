//! Catalog Config

use std::path::PathBuf;

use clap::Args;

/// Product catalog settings.
#[derive(Debug, Args)]
pub struct CatalogConfig {
    /// YAML catalog used to look up products when adding items
    #[arg(long, global = true, env = "TROLLEY_CATALOG", default_value = "catalog.yml")]
    pub catalog: PathBuf,
}
