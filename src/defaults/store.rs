use std::collections::{BTreeMap, BTreeSet};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::{DEFAULTS_FILE_NAME, config_dir};
use crate::defaults::error::DefaultsError;

type StoredValues = BTreeMap<String, String>;

/// Key holding the default project name
pub const KEY_PROJECT: &str = "project";

/// Keys accepted by [`Defaults::open_default`]
pub const DEFAULT_KEYS: &[&str] = &[KEY_PROJECT];

/// Persisted key/value defaults backed by a flat JSON object file.
///
/// The whole file is read into memory on open and rewritten on every
/// [`Defaults::set`]. Keys outside the allowed set are not readable or
/// writable through the store but are written back unchanged. There is no
/// file locking: two processes writing the same file concurrently can lose
/// updates.
#[derive(Debug, Clone)]
pub struct Defaults {
    folder_path: PathBuf,
    file_name: String,
    full_path: PathBuf,
    allowed_keys: BTreeSet<String>,
    values: StoredValues,
    preserved: StoredValues,
}

impl Defaults {
    /// Open (creating if needed) the defaults file at `folder_path/file_name`.
    ///
    /// Always returns a usable store. When the file cannot be created or read,
    /// or holds invalid JSON, the store starts empty and the error is returned
    /// next to it.
    pub fn open<I, K>(
        folder_path: impl Into<PathBuf>,
        file_name: &str,
        allowed_keys: I,
    ) -> (Self, Option<DefaultsError>)
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let folder_path = folder_path.into();
        let full_path = folder_path.join(file_name);
        info!("Opening defaults at {:?}", full_path);

        let mut defaults = Self {
            folder_path,
            file_name: file_name.to_string(),
            full_path,
            allowed_keys: allowed_keys.into_iter().map(Into::into).collect(),
            values: BTreeMap::new(),
            preserved: BTreeMap::new(),
        };

        match defaults.load() {
            Ok((values, preserved)) => {
                defaults.values = values;
                defaults.preserved = preserved;
                (defaults, None)
            }
            Err(e) => {
                warn!("Continuing with empty defaults: {}", e);
                (defaults, Some(e))
            }
        }
    }

    /// Open `<config dir>/defaults.json` with [`DEFAULT_KEYS`].
    pub fn open_default() -> (Self, Option<DefaultsError>) {
        Self::open(config_dir(), DEFAULTS_FILE_NAME, DEFAULT_KEYS.iter().copied())
    }

    pub fn folder_path(&self) -> &Path {
        &self.folder_path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    pub fn is_allowed(&self, key: &str) -> bool {
        self.allowed_keys.contains(key)
    }

    /// Set `key` to `value` and rewrite the backing file.
    ///
    /// Unsupported keys are rejected before anything changes. If the write
    /// fails the in-memory value is already updated, so an error here means
    /// the value may not be durable.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), DefaultsError> {
        if !self.is_allowed(key) {
            return Err(DefaultsError::UnsupportedKey {
                key: key.to_string(),
                fallback: String::new(),
            });
        }

        self.values.insert(key.to_string(), value.to_string());

        let mut stored = self.preserved.clone();
        stored.extend(self.values.iter().map(|(k, v)| (k.clone(), v.clone())));
        let out = serde_json::to_vec(&stored).map_err(DefaultsError::Serialize)?;
        std::fs::write(&self.full_path, out).map_err(|source| DefaultsError::Io {
            path: self.full_path.clone(),
            source,
        })?;

        debug!("Saved default {}={:?} to {:?}", key, value, self.full_path);
        Ok(())
    }

    /// Get the value stored for `key`.
    ///
    /// An allowed key that was never set yields an empty string, not
    /// `fallback`. The fallback is only handed back, inside
    /// [`DefaultsError::UnsupportedKey`], when the key is not allowed.
    pub fn get(&self, key: &str, fallback: &str) -> Result<String, DefaultsError> {
        if !self.is_allowed(key) {
            return Err(DefaultsError::UnsupportedKey {
                key: key.to_string(),
                fallback: fallback.to_string(),
            });
        }

        Ok(self.values.get(key).cloned().unwrap_or_default())
    }

    /// Like [`Defaults::get`], discarding the error and returning the fallback
    /// it carries.
    pub fn get_or(&self, key: &str, fallback: &str) -> String {
        match self.get(key, fallback) {
            Ok(value) => value,
            Err(DefaultsError::UnsupportedKey { fallback, .. }) => fallback,
            Err(_) => fallback.to_string(),
        }
    }

    /// Read the file, splitting allowed keys from the ones kept only for
    /// write-back.
    fn load(&self) -> Result<(StoredValues, StoredValues), DefaultsError> {
        self.ensure_file()?;

        let content =
            std::fs::read_to_string(&self.full_path).map_err(|source| DefaultsError::Io {
                path: self.full_path.clone(),
                source,
            })?;

        if content.trim().is_empty() {
            return Ok(Default::default());
        }

        let stored: BTreeMap<String, String> =
            serde_json::from_str(&content).map_err(|source| DefaultsError::Format {
                path: self.full_path.clone(),
                source,
            })?;

        let (values, preserved): (StoredValues, StoredValues) =
            stored.into_iter().partition(|(key, _)| self.is_allowed(key));
        for key in preserved.keys() {
            warn!("Keeping unsupported key '{}' in {:?}", key, self.full_path);
        }

        Ok((values, preserved))
    }

    fn ensure_file(&self) -> Result<(), DefaultsError> {
        let io_err = |source: std::io::Error| DefaultsError::Io {
            path: self.full_path.clone(),
            source,
        };

        match std::fs::metadata(&self.full_path) {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Creating defaults file {:?}", self.full_path);
                std::fs::create_dir_all(&self.folder_path).map_err(io_err)?;
                std::fs::File::create(&self.full_path).map_err(io_err)?;
                Ok(())
            }
            Err(e) => Err(io_err(e)),
        }
    }
}
