//! Where tally keeps its database.
//!
//! Settings are layered, later sources winning:
//!
//! 1. built-in default: `<data dir>/tally/tally.db` (`~/.local/share/tally/tally.db` on Linux)
//! 2. `<config dir>/tally/config.toml` (`~/.config/tally/config.toml` on Linux)
//! 3. the file given with `--config`
//! 4. `TALLY_DATABASE_PATH` in the environment
//!
//! A config file only needs the one key:
//!
//! ```toml
//! database_path = "/home/me/notes/tally.db"
//! ```

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Environment variable prefix; `TALLY_DATABASE_PATH` sets `database_path`.
const ENV_PREFIX: &str = "TALLY_";

/// Resolved settings for one run of the binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// SQLite file holding the records. Its parent directory is created on open.
    pub database_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("tally.db"),
        }
    }
}

impl Config {
    /// Resolves the layered configuration, with `config_path` from `--config`.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(user_file) = user_config_file() {
            figment = figment.merge(Toml::file(user_file));
        }
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX)).extract()
    }
}

/// `<config dir>/tally/config.toml`, read on every run when present.
fn user_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tally").join("config.toml"))
}

/// `<data dir>/tally`, home of the default database.
fn data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("tally"))
}
