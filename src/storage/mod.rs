//! Whole-state persistence: the ledger, profile, and config travel together
//! as one versioned JSON blob, written atomically on every change.

use std::{env, fs, path::Path, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::errors::GigFinError;
use crate::ledger::{Ledger, UserProfile};

const DEFAULT_DIR_NAME: &str = ".gigfin_core";
const STATE_FILE: &str = "state.json";
const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Everything the application persists, as one opaque load/save pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default)]
    pub ledger: Ledger,
    #[serde(default)]
    pub profile: UserProfile,
    #[serde(default)]
    pub config: AppConfig,
    #[serde(default = "AppState::schema_version_default")]
    pub schema_version: u8,
}

impl AppState {
    pub fn new(ledger: Ledger, profile: UserProfile, config: AppConfig) -> Self {
        Self {
            ledger,
            profile,
            config,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Ledger::new(), UserProfile::default(), AppConfig::default())
    }
}

/// Returns the application data directory, defaulting to `~/.gigfin_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("GIGFIN_HOME") {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Canonical path of the persisted state blob.
pub fn state_file() -> PathBuf {
    app_data_dir().join(STATE_FILE)
}

/// Writes the state atomically by staging to a temporary file first.
pub fn save_state(state: &AppState, path: &Path) -> Result<(), GigFinError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(state)?;
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    tracing::debug!(path = %path.display(), "state saved");
    Ok(())
}

/// Loads a state blob from disk, returning structured errors on failure.
pub fn load_state(path: &Path) -> Result<AppState, GigFinError> {
    if !path.exists() {
        return Err(GigFinError::Storage(format!(
            "state file `{}` not found",
            path.display()
        )));
    }
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Loads the state, falling back to defaults when nothing was saved yet.
pub fn load_or_default(path: &Path) -> Result<AppState, GigFinError> {
    if path.exists() {
        load_state(path)
    } else {
        Ok(AppState::default())
    }
}
