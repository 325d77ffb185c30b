//! User preference storage.
//!
//! Preferences are plain string key/value pairs (view modes, page size).
//! The file-backed store keeps them in `preferences.toml` in the platform
//! configuration directory:
//! - macOS: ~/Library/Application Support/org.labfon.Labfon/
//! - Windows: %APPDATA%/labfon/Labfon/config/
//! - Linux: ~/.config/labfon/

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use directories::ProjectDirs;

use crate::error::PreferenceError;

const APP_QUALIFIER: &str = "org";
const APP_ORG: &str = "labfon";
const APP_NAME: &str = "Labfon";
const PREFERENCES_FILENAME: &str = "preferences.toml";

/// Key/value store read at renderer construction and written on every
/// user-initiated change.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// Volatile store, for tests and one-shot runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: BTreeMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Cloneable handle that lets several sections write through one store.
#[derive(Clone)]
pub struct SharedPreferences {
    inner: Rc<RefCell<Box<dyn PreferenceStore>>>,
}

impl SharedPreferences {
    pub fn new(store: impl PreferenceStore + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Box::new(store))),
        }
    }
}

impl PreferenceStore for SharedPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.inner.borrow_mut().set(key, value)
    }
}

/// Default location of the preferences file.
///
/// Returns `None` if the platform-specific directory cannot be determined.
pub fn preferences_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(PREFERENCES_FILENAME))
}

/// Preferences persisted to a TOML file.
#[derive(Debug, Clone)]
pub struct TomlPreferenceStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl TomlPreferenceStore {
    /// Opens the store at the default location.
    pub fn open_default() -> Result<Self, PreferenceError> {
        let path = preferences_path().ok_or(PreferenceError::NoConfigDir)?;
        Ok(Self::open(path))
    }

    /// Opens the store at `path`. A missing or unreadable file yields an
    /// empty store; the file is created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = load_values(&path);
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| PreferenceError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let content = toml::to_string_pretty(&self.values)?;
        fs::write(&self.path, content).map_err(|source| PreferenceError::Write {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!("Saved preferences to {:?}", self.path);
        Ok(())
    }
}

impl PreferenceStore for TomlPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        if self.values.get(key).is_some_and(|current| current == value) {
            return Ok(());
        }
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }
}

fn load_values(path: &Path) -> BTreeMap<String, String> {
    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(values) => {
                tracing::info!("Loaded preferences from {:?}", path);
                values
            }
            Err(e) => {
                tracing::warn!("Failed to parse preferences file: {}, using defaults", e);
                BTreeMap::new()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No preferences file found at {:?}, using defaults", path);
            BTreeMap::new()
        }
        Err(e) => {
            tracing::warn!("Failed to read preferences file: {}, using defaults", e);
            BTreeMap::new()
        }
    }
}
