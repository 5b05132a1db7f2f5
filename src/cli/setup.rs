use crate::core::config::AppConfig;
use crate::core::report::write_with_parents;
use anyhow::{Result, bail};
use std::path::Path;
use tracing::info;

const EXAMPLE_CONFIG: &str = include_str!("../../docs/example_config.yaml");

/// Writes the example configuration to the platform config location.
pub fn setup() -> Result<()> {
    setup_at_path(AppConfig::default_config_path()?)
}

/// Writes the example configuration to `path`. An existing file is left untouched.
pub fn setup_at_path<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        bail!("Configuration file already exists at {}", path.display());
    }
    write_with_parents(path, EXAMPLE_CONFIG, "config file")?;
    info!("Created default configuration at {}", path.display());
    Ok(())
}
