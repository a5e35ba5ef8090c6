use std::{env, path::PathBuf, str::FromStr};

use config::{Config as config_config, File as config_file};
use serde::{Deserialize, Serialize};

use crate::logging;

const CONFIG_PATH: &str = "app.json";

const STOCKMON_SYMBOLS: &str = "STOCKMON_SYMBOLS";
const STOCKMON_USE_COLORS: &str = "STOCKMON_USE_COLORS";
const STOCKMON_REFRESH_IN_SECONDS: &str = "STOCKMON_REFRESH_IN_SECONDS";

const DEFAULT_REFRESH_IN_SECONDS: u64 = 60;

/// Options read once per tick, so edits to `app.json` or the environment take
/// effect without a restart.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Monitor {
    /// Ticker symbols to track, in display-priority order (first is most
    /// prominent).
    #[serde(default)]
    pub stock_symbols: Vec<String>,
    /// Color items by change direction.
    #[serde(default)]
    pub use_colors: bool,
    #[serde(default = "default_refresh_in_seconds")]
    pub refresh_in_seconds: u64,
}

fn default_refresh_in_seconds() -> u64 {
    DEFAULT_REFRESH_IN_SECONDS
}

impl Default for Monitor {
    fn default() -> Self {
        Monitor {
            stock_symbols: Vec::new(),
            use_colors: false,
            refresh_in_seconds: DEFAULT_REFRESH_IN_SECONDS,
        }
    }
}

impl Monitor {
    /// Reads the current configuration. A load failure is logged and degrades
    /// to the defaults; it never aborts a tick.
    pub fn load() -> Self {
        match Self::get() {
            Ok(monitor) => monitor,
            Err(why) => {
                logging::error_file_async(format!(
                    "Failed to read the config because {:?}",
                    why
                ));
                Default::default()
            }
        }
    }

    fn get() -> Result<Self, config::ConfigError> {
        let config_path = config_path();
        if config_path.exists() {
            let monitor: Monitor = config_config::builder()
                .add_source(config_file::from(config_path))
                .build()?
                .try_deserialize()?;
            return Ok(monitor.override_with_env());
        }

        Ok(Monitor::default().override_with_env())
    }

    /// Environment values win over the ones in `app.json`.
    fn override_with_env(mut self) -> Self {
        if let Ok(symbols) = env::var(STOCKMON_SYMBOLS) {
            self.stock_symbols = split_symbols(&symbols);
        }

        if let Ok(use_colors) = env::var(STOCKMON_USE_COLORS) {
            self.use_colors = bool::from_str(&use_colors).unwrap_or(false);
        }

        if let Ok(seconds) = env::var(STOCKMON_REFRESH_IN_SECONDS) {
            self.refresh_in_seconds =
                u64::from_str(&seconds).unwrap_or(DEFAULT_REFRESH_IN_SECONDS);
        }

        self
    }
}

fn split_symbols(symbols: &str) -> Vec<String> {
    symbols
        .split(',')
        .map(str::trim)
        .filter(|symbol| !symbol.is_empty())
        .map(String::from)
        .collect()
}

/// Path of the optional configuration file.
fn config_path() -> PathBuf {
    PathBuf::from(CONFIG_PATH)
}
