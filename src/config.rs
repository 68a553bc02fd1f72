//! Persisted settings.
//!
//! `ConfigStore` is a flat key/value file (TOML). `Settings` is the typed
//! view the app works with. A missing or corrupt file is never fatal: the
//! store starts empty and every setting takes its default.

use std::path::{Path, PathBuf};

use toml::{Table, Value};

use crate::error::ConfigError;
use crate::zone::{StarObservation, WorldType};

pub const KEY_MASK: &str = "habzone";
pub const KEY_ABBREVIATE: &str = "habzone_abbreviate";
pub const KEY_VERBOSE: &str = "habzone_verbose";
pub const KEY_LAST_SYSTEM: &str = "habzone_last_system";
pub const KEY_LAST_RADIUS: &str = "habzone_last_radius";
pub const KEY_LAST_TEMPERATURE: &str = "habzone_last_temperature";
pub const KEY_JOURNAL_DIR: &str = "journaldir";

/// Stored mask meaning "nothing chosen yet": show Earth-Like only.
pub const SETTING_DEFAULT: u32 = 0x0002;
/// EDSM lookup enabled.
pub const SETTING_EDSM: u32 = 0x1000;
/// Stored mask meaning "the user turned everything off".
pub const SETTING_NONE: u32 = 0xffff;

/// Key/value settings file.
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    path: Option<PathBuf>,
    values: Table,
}

impl ConfigStore {
    /// Not backed by a file; `save` is a no-op.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load `path`, falling back to an empty store on any error.
    pub fn open(path: &Path) -> Self {
        match Self::load(path) {
            Ok(store) => store,
            Err(e) => {
                log::warn!("Using default settings: {}", e);
                Self {
                    path: Some(path.to_path_buf()),
                    values: Table::new(),
                }
            }
        }
    }

    /// Load `path`. A file that does not exist yet is an empty store.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let values = match std::fs::read_to_string(path) {
            Ok(text) => toml::from_str::<Table>(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Table::new(),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Ok(Self {
            path: Some(path.to_path_buf()),
            values,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Integers, or strings holding one.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.values.get(key)? {
            Value::Integer(i) => Some(*i),
            Value::Boolean(b) => Some(*b as i64),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn get_str(&self, key: &str) -> Option<String> {
        match self.values.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Integer(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            _ => None,
        }
    }

    pub fn set_int(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), Value::Integer(value));
    }

    pub fn set_str(&mut self, key: &str, value: &str) {
        self.values
            .insert(key.to_string(), Value::String(value.to_string()));
    }

    pub fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let io_err = |source| ConfigError::Io {
            path: path.clone(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let text = toml::to_string(&self.values)?;
        std::fs::write(path, text).map_err(io_err)
    }
}

/// Which rows are shown, plus the EDSM lookup bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayMask(pub u32);

impl DisplayMask {
    /// Interpret a stored mask value.
    pub fn from_stored(stored: i64) -> Self {
        match u32::try_from(stored) {
            Ok(0) | Err(_) => Self(SETTING_DEFAULT),
            Ok(SETTING_NONE) => Self(0),
            Ok(bits) => Self(bits),
        }
    }

    /// Value to store. An empty mask is written as `SETTING_NONE` so that
    /// it is not mistaken for "never configured".
    pub fn to_stored(self) -> i64 {
        if self.0 == 0 {
            SETTING_NONE as i64
        } else {
            self.0 as i64
        }
    }

    pub fn shows(self, world: WorldType) -> bool {
        self.0 & world.display_bit() != 0
    }

    pub fn edsm(self) -> bool {
        self.0 & SETTING_EDSM != 0
    }

    pub fn any_rows(self) -> bool {
        WorldType::ALL.iter().any(|w| self.shows(*w))
    }

    pub fn with(self, bit: u32, on: bool) -> Self {
        if on {
            Self(self.0 | bit)
        } else {
            Self(self.0 & !bit)
        }
    }
}

impl Default for DisplayMask {
    fn default() -> Self {
        Self(SETTING_DEFAULT)
    }
}

/// Typed settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub mask: DisplayMask,
    pub abbreviate: bool,
    pub verbose: bool,
    pub journal_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mask: DisplayMask::default(),
            abbreviate: false,
            verbose: false,
            journal_dir: default_journal_dir(),
        }
    }
}

impl Settings {
    pub fn read(store: &ConfigStore) -> Self {
        let defaults = Self::default();
        Self {
            mask: DisplayMask::from_stored(store.get_int(KEY_MASK).unwrap_or(0)),
            abbreviate: store.get_int(KEY_ABBREVIATE).unwrap_or(0) != 0,
            verbose: store.get_int(KEY_VERBOSE).unwrap_or(0) != 0,
            journal_dir: store
                .get_str(KEY_JOURNAL_DIR)
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.journal_dir),
        }
    }

    pub fn write(&self, store: &mut ConfigStore) {
        store.set_int(KEY_MASK, self.mask.to_stored());
        store.set_int(KEY_ABBREVIATE, self.abbreviate as i64);
        store.set_int(KEY_VERBOSE, self.verbose as i64);
        store.set_str(KEY_JOURNAL_DIR, &self.journal_dir.to_string_lossy());
    }

    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }
}

/// Last arrival-star scan, kept so the panel can be restored on restart.
#[derive(Debug, Clone, PartialEq)]
pub struct LastObservation {
    pub system: Option<String>,
    pub observation: StarObservation,
}

impl LastObservation {
    pub fn read(store: &ConfigStore) -> Option<Self> {
        let radius = store.get_str(KEY_LAST_RADIUS)?.trim().parse::<f64>().ok()?;
        let temperature = store
            .get_str(KEY_LAST_TEMPERATURE)?
            .trim()
            .parse::<f64>()
            .ok()?;
        if !(radius > 0.0 && temperature > 0.0) {
            return None;
        }
        Some(Self {
            system: store.get_str(KEY_LAST_SYSTEM).filter(|s| !s.is_empty()),
            observation: StarObservation::new(radius, temperature),
        })
    }

    pub fn write(&self, store: &mut ConfigStore) {
        match &self.system {
            Some(system) => store.set_str(KEY_LAST_SYSTEM, system),
            None => store.remove(KEY_LAST_SYSTEM),
        }
        store.set_str(KEY_LAST_RADIUS, &self.observation.radius_meters.to_string());
        store.set_str(
            KEY_LAST_TEMPERATURE,
            &self.observation.surface_temperature_kelvin.to_string(),
        );
    }

    pub fn clear(store: &mut ConfigStore) {
        store.remove(KEY_LAST_RADIUS);
        store.remove(KEY_LAST_TEMPERATURE);
    }
}

/// `HABZONE_CONFIG`, else `habzone.toml` under the platform config dir.
pub fn default_config_path() -> PathBuf {
    if let Some(path) = std::env::var_os("HABZONE_CONFIG") {
        return PathBuf::from(path);
    }
    let base = if cfg!(windows) {
        std::env::var_os("APPDATA").map(PathBuf::from)
    } else {
        std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
    };
    base.unwrap_or_else(|| PathBuf::from("."))
        .join("habzone")
        .join("habzone.toml")
}

/// Where the game writes its journals.
pub fn default_journal_dir() -> PathBuf {
    let saved_games = Path::new("Saved Games")
        .join("Frontier Developments")
        .join("Elite Dangerous");
    if cfg!(windows) {
        let profile = std::env::var_os("USERPROFILE").map(PathBuf::from);
        return profile.unwrap_or_default().join(saved_games);
    }
    // Steam Proton prefix.
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_default()
        .join(".local/share/Steam/steamapps/compatdata/359320/pfx/drive_c/users/steamuser")
        .join(saved_games)
}
