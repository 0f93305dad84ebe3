// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! RON-backed options persistence.
//!
//! Two files are involved: the shipped defaults (`options-default.ron`, next
//! to the executable) and the user's changes (`options-changes.ron`, in the
//! user directory). Loading overlays the changes onto the defaults field by
//! field, and saving writes only the fields that differ from the defaults.
//! Fields missing from both files take their built-in values.

use ron::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tessera_core::config::{Options, OptionsStore};
use thiserror::Error;

/// Errors raised while reading or writing options files.
#[derive(Debug, Error)]
pub enum OptionsError {
    /// Reading or writing a file failed.
    #[error("I/O error on '{path}': {source}")]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
    /// A file did not contain valid RON.
    #[error("could not parse options file '{path}': {source}")]
    Parse {
        /// The file involved.
        path: PathBuf,
        /// The parser error, with position.
        #[source]
        source: ron::error::SpannedError,
    },
    /// A file was valid RON but its values do not fit the options.
    #[error("invalid values in options file '{path}': {source}")]
    Invalid {
        /// The file involved.
        path: PathBuf,
        /// The conversion error.
        #[source]
        source: ron::Error,
    },
    /// The options could not be turned into RON.
    #[error("could not serialize options: {0}")]
    Serialize(#[from] ron::Error),
}

/// Loads and saves [`Options`] as RON files.
#[derive(Debug, Clone)]
pub struct RonOptionsStore {
    defaults_path: PathBuf,
    changes_path: PathBuf,
}

impl RonOptionsStore {
    /// A store reading defaults from `base_dir` and changes from `user_dir`.
    pub fn new(base_dir: &Path, user_dir: &Path) -> Self {
        Self {
            defaults_path: base_dir.join(Options::DEFAULT_FILENAME),
            changes_path: user_dir.join(Options::CHANGES_FILENAME),
        }
    }

    /// Path of the shipped defaults.
    pub fn defaults_path(&self) -> &Path {
        &self.defaults_path
    }

    /// Path of the user's changes.
    pub fn changes_path(&self) -> &Path {
        &self.changes_path
    }

    /// Reads the defaults file, then overlays the changes file on top of it.
    /// A missing changes file is created empty. The result is sanitized.
    pub fn load(&self) -> Result<Options, OptionsError> {
        let defaults = self.defaults_value()?;
        let options = match read_value(&self.changes_path)? {
            Some(changes) => {
                log::info!("Loaded option changes from '{}'.", self.changes_path.display());
                from_value(overlay(defaults, changes), &self.changes_path)?
            }
            None => {
                let options = from_value(defaults, &self.defaults_path)?;
                self.write(&options)?;
                log::info!("Created '{}'.", self.changes_path.display());
                options
            }
        };
        Ok(options.sanitized())
    }

    /// Writes the fields of `options` that differ from the defaults to the
    /// changes file, creating its directory if needed.
    pub fn write(&self, options: &Options) -> Result<(), OptionsError> {
        let defaults = self.defaults_value()?;
        let changes = difference(&to_value(options)?, &defaults)
            .unwrap_or_else(|| Value::Map(Map::new()));

        if let Some(parent) = self.changes_path.parent() {
            fs::create_dir_all(parent).map_err(|source| OptionsError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let text = ron::ser::to_string_pretty(&changes, ron::ser::PrettyConfig::default())?;
        fs::write(&self.changes_path, text).map_err(|source| OptionsError::Io {
            path: self.changes_path.clone(),
            source,
        })
    }

    /// Built-in defaults with the defaults file laid over them.
    fn defaults_value(&self) -> Result<Value, OptionsError> {
        let built_in = to_value(&Options::default())?;
        match read_value(&self.defaults_path)? {
            Some(shipped) => {
                log::debug!("Read default options from '{}'.", self.defaults_path.display());
                Ok(overlay(built_in, shipped))
            }
            None => {
                log::warn!(
                    "No default options file at '{}'; using built-in defaults.",
                    self.defaults_path.display()
                );
                Ok(built_in)
            }
        }
    }
}

impl OptionsStore for RonOptionsStore {
    fn save(&self, options: &Options) -> anyhow::Result<()> {
        self.write(options)?;
        Ok(())
    }
}

fn read_value(path: &Path) -> Result<Option<Value>, OptionsError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(OptionsError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    ron::from_str(&text)
        .map(Some)
        .map_err(|source| OptionsError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

fn to_value(options: &Options) -> Result<Value, OptionsError> {
    let text = ron::to_string(options)?;
    ron::from_str(&text).map_err(|err| OptionsError::Serialize(err.code))
}

fn from_value(value: Value, path: &Path) -> Result<Options, OptionsError> {
    value.into_rust().map_err(|source| OptionsError::Invalid {
        path: path.to_path_buf(),
        source,
    })
}

/// Lays `top` over `base`. Maps merge key by key; anything else replaces.
fn overlay(base: Value, top: Value) -> Value {
    match (base, top) {
        (Value::Map(mut base), Value::Map(top)) => {
            for (key, value) in top.iter() {
                let merged = match base.remove(key) {
                    Some(existing) => overlay(existing, value.clone()),
                    None => value.clone(),
                };
                base.insert(key.clone(), merged);
            }
            Value::Map(base)
        }
        (_, top) => top,
    }
}

/// The parts of `current` that differ from `base`, or `None` if nothing does.
fn difference(current: &Value, base: &Value) -> Option<Value> {
    match (current, base) {
        (Value::Map(current), Value::Map(base)) => {
            let mut changed = Map::new();
            for (key, value) in current.iter() {
                let delta = match base.iter().find(|(base_key, _)| *base_key == key) {
                    Some((_, base_value)) => difference(value, base_value),
                    None => Some(value.clone()),
                };
                if let Some(delta) = delta {
                    changed.insert(key.clone(), delta);
                }
            }
            (!changed.is_empty()).then_some(Value::Map(changed))
        }
        _ if current == base => None,
        _ => Some(current.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &Path) -> RonOptionsStore {
        RonOptionsStore::new(&dir.join("base"), &dir.join("user"))
    }

    fn write_defaults(store: &RonOptionsStore, text: &str) {
        fs::create_dir_all(store.defaults_path().parent().unwrap()).unwrap();
        fs::write(store.defaults_path(), text).unwrap();
    }

    fn write_changes(store: &RonOptionsStore, text: &str) {
        fs::create_dir_all(store.changes_path().parent().unwrap()).unwrap();
        fs::write(store.changes_path(), text).unwrap();
    }

    #[test]
    fn missing_files_fall_back_to_built_in_defaults_and_create_changes() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        let options = store.load().unwrap();

        assert_eq!(options, Options::default());
        assert!(store.changes_path().exists());
    }

    #[test]
    fn defaults_file_is_used_when_there_are_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        write_defaults(&store, "(graphics: (target_fps: 30, modern_interface: true))");

        let options = store.load().unwrap();

        assert_eq!(options.graphics.target_fps, 30);
        assert!(options.graphics.modern_interface);
        assert_eq!(options.graphics.min_fps, 15, "Missing fields use built-in defaults");
    }

    #[test]
    fn partial_changes_keep_the_shipped_defaults_for_other_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        write_defaults(&store, "(graphics: (modern_interface: true, min_fps: 25))");
        write_changes(&store, "(graphics: (target_fps: 144))");

        let options = store.load().unwrap();

        assert_eq!(options.graphics.target_fps, 144);
        assert!(options.graphics.modern_interface);
        assert_eq!(options.graphics.min_fps, 25);
        assert_eq!(options.audio, Options::default().audio);
    }

    #[test]
    fn changes_take_precedence_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        write_defaults(&store, "(graphics: (target_fps: 30))");

        let mut changed = Options::default();
        changed.graphics.target_fps = 144;
        changed.input.screenshot_key = "F12".to_string();
        store.save(&changed).unwrap();

        let options = store.load().unwrap();
        assert_eq!(options.graphics.target_fps, 144);
        assert_eq!(options.input.screenshot_key, "F12");
    }

    #[test]
    fn saving_writes_only_fields_that_differ_from_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        write_defaults(&store, "(graphics: (min_fps: 25))");

        let mut options = store.load().unwrap();
        options.graphics.target_fps = 144;
        store.save(&options).unwrap();

        let text = fs::read_to_string(store.changes_path()).unwrap();
        assert!(text.contains("target_fps"));
        assert!(!text.contains("min_fps"));
        assert!(!text.contains("audio"));
    }

    #[test]
    fn later_edits_to_the_defaults_file_still_apply() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        write_defaults(&store, "(graphics: (min_fps: 25))");
        store.load().unwrap();

        write_defaults(&store, "(graphics: (min_fps: 30))");
        let options = store.load().unwrap();

        assert_eq!(options.graphics.min_fps, 30);
    }

    #[test]
    fn loaded_values_are_sanitized() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        write_changes(&store, "(graphics: (target_fps: 0, min_fps: 0))");

        let options = store.load().unwrap();
        assert_eq!(options.graphics.target_fps, 1);
        assert_eq!(options.graphics.min_fps, 1);
    }

    #[test]
    fn malformed_files_report_their_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        write_changes(&store, "(graphics: oops");

        let err = store.load().unwrap_err();
        assert!(matches!(err, OptionsError::Parse { .. }));
        assert!(err.to_string().contains(Options::CHANGES_FILENAME));
    }
}
