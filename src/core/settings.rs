use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::{fs, path::Path};
use tracing::debug;

/// Currencies and stocks the user wants to see on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserSettings {
    #[serde(default)]
    pub user_currencies: BTreeSet<String>,
    #[serde(default)]
    pub user_stocks: BTreeSet<String>,
}

impl UserSettings {
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        let settings: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;
        debug!(
            currencies = ?settings.user_currencies,
            stocks = ?settings.user_stocks,
            "Loaded user settings"
        );
        Ok(settings)
    }
}
