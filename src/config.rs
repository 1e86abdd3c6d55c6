use chrono::Weekday;
use serde::Deserialize;
use serde_with::DeserializeFromStr;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Error, ErrorKind, Result};
use crate::labels::Locale;
use crate::render::Theme;

const CONFIG_PATH_ENV_VAR: &str = "CALGRID_CONFIG_FILE";

pub(crate) fn find_configfile_locations() -> io::Result<Vec<PathBuf>> {
    let home = dirs::home_dir().ok_or_else(|| {
        io::Error::new(io::ErrorKind::Other, "Unable to find home directory")
    })?;

    let config_xdg = dirs::config_dir()
        .unwrap_or_else(|| home.join(".config"))
        .join("calgrid")
        .join("config.toml");

    let home_config = home.join(".calgrid.toml");

    let mut locations = vec![config_xdg, home_config];

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.insert(0, PathBuf::from(path));
    }

    Ok(locations)
}

#[derive(Clone, Copy, Debug, DeserializeFromStr, PartialEq)]
pub struct WeekStart(pub Weekday);

impl Default for WeekStart {
    fn default() -> Self {
        WeekStart(Weekday::Sun)
    }
}

impl FromStr for WeekStart {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.parse::<Weekday>().map(WeekStart).map_err(|_| {
            Error::new(
                ErrorKind::ConfigParse,
                &format!("'{}' is not a weekday", s),
            )
        })
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locale: Locale,
    pub week_start: WeekStart,
    pub tick_rate_ms: u64,
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            locale: Locale::default(),
            week_start: WeekStart::default(),
            tick_rate_ms: 1000,
            theme: Theme::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        content.parse()
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

/// Loads `path` if given, otherwise the first existing file of the default
/// locations. Without any config file the defaults are used.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::load(path).map_err(|e| {
            let msg = match &e.message {
                Some(msg) => format!("{} ({})", msg, path.display()),
                None => path.display().to_string(),
            };
            e.with_msg(&msg)
        });
    }

    let locations = match find_configfile_locations() {
        Ok(locations) => locations,
        Err(e) => {
            log::warn!("{}, using default configuration", e);
            return Ok(Config::default());
        }
    };

    match locations.iter().find(|p| p.is_file()) {
        Some(path) => {
            log::info!("Loading configuration from {}", path.display());
            Config::load(path)
        }
        None => {
            log::info!("No configuration file found, using defaults");
            Ok(Config::default())
        }
    }
}
