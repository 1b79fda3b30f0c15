//! JSON files on disk behind the engine's loader and storage traits.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use trail_game::{DataLoader, GameState, GameStorage, Graveyard, HighScoreTable, TrailPolicy};

const HIGH_SCORES_FILE: &str = "top_ten.json";
const GRAVEYARD_FILE: &str = "tombstones.json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StorageError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StorageError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| StorageError::Json {
            path: path.to_path_buf(),
            source,
        })
}

/// Read a shared table, starting fresh when the file is damaged.
fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StorageError> {
    match read_json(path) {
        Err(err @ StorageError::Json { .. }) => {
            log::warn!("ignoring damaged file: {err}");
            Ok(None)
        }
        other => other,
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let io_err = |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let payload = serde_json::to_vec_pretty(value).map_err(|source| StorageError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    // Write beside the target, then rename over it.
    let staging = path.with_extension("json.tmp");
    fs::write(&staging, payload).map_err(io_err)?;
    fs::rename(&staging, path).map_err(io_err)
}

/// Saves, the top ten and the graveyard as JSON files in one directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn save_path(&self, save_name: &str) -> PathBuf {
        self.root.join(format!("{save_name}.save.json"))
    }
}

impl GameStorage for FileStorage {
    type Error = StorageError;

    fn save_game(&self, save_name: &str, game_state: &GameState) -> Result<(), Self::Error> {
        let path = self.save_path(save_name);
        log::debug!("saving journey to {}", path.display());
        write_json(&path, game_state)
    }

    fn load_game(&self, save_name: &str) -> Result<Option<GameState>, Self::Error> {
        read_json(&self.save_path(save_name))
    }

    fn delete_save(&self, save_name: &str) -> Result<(), Self::Error> {
        let path = self.save_path(save_name);
        match fs::remove_file(&path) {
            Err(err) if err.kind() != ErrorKind::NotFound => {
                Err(StorageError::Io { path, source: err })
            }
            _ => Ok(()),
        }
    }

    fn load_high_scores(&self) -> Result<Option<HighScoreTable>, Self::Error> {
        read_table(&self.root.join(HIGH_SCORES_FILE))
    }

    fn save_high_scores(&self, table: &HighScoreTable) -> Result<(), Self::Error> {
        write_json(&self.root.join(HIGH_SCORES_FILE), table)
    }

    fn load_graveyard(&self) -> Result<Option<Graveyard>, Self::Error> {
        read_table(&self.root.join(GRAVEYARD_FILE))
    }

    fn save_graveyard(&self, graveyard: &Graveyard) -> Result<(), Self::Error> {
        write_json(&self.root.join(GRAVEYARD_FILE), graveyard)
    }
}

/// Loads an optional policy override file.
#[derive(Debug, Clone, Default)]
pub struct FileLoader {
    policy: Option<PathBuf>,
}

impl FileLoader {
    pub const fn new(policy: Option<PathBuf>) -> Self {
        Self { policy }
    }
}

impl DataLoader for FileLoader {
    type Error = StorageError;

    fn load_policy(&self) -> Result<Option<TrailPolicy>, Self::Error> {
        let Some(path) = &self.policy else {
            return Ok(None);
        };
        match read_json(path)? {
            Some(policy) => Ok(Some(policy)),
            None => Err(StorageError::Io {
                path: path.clone(),
                source: std::io::Error::from(ErrorKind::NotFound),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trail_game::{Profession, SimulationContext, Tombstone};

    fn temp_root(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "westward-storage-{label}-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ))
    }

    #[test]
    fn missing_files_load_as_none() {
        let storage = FileStorage::new(temp_root("missing"));
        assert!(storage.load_game("journey").unwrap().is_none());
        assert!(storage.load_high_scores().unwrap().is_none());
        assert!(storage.load_graveyard().unwrap().is_none());
        storage.delete_save("journey").unwrap();
    }

    #[test]
    fn saves_round_trip_and_delete() {
        let root = temp_root("saves");
        let storage = FileStorage::new(&root);
        let mut ctx = SimulationContext::new(4, TrailPolicy::default());
        ctx.new_game("Ezra", Profession::Farmer, ["Mary"], 5);
        storage.save_game("journey", &ctx.state).unwrap();
        let loaded = storage.load_game("journey").unwrap().expect("saved");
        assert_eq!(loaded, ctx.state);
        storage.delete_save("journey").unwrap();
        assert!(storage.load_game("journey").unwrap().is_none());
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn damaged_tables_start_fresh_but_damaged_saves_fail() {
        let root = temp_root("damaged");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join(GRAVEYARD_FILE), "{ nope").unwrap();
        fs::write(root.join("journey.save.json"), "[1, 2").unwrap();
        let storage = FileStorage::new(&root);
        assert!(storage.load_graveyard().unwrap().is_none());
        assert!(matches!(
            storage.load_game("journey"),
            Err(StorageError::Json { .. })
        ));

        let mut graveyard = Graveyard::default();
        graveyard.add(Tombstone::new(120, "Abe", "Rest easy"));
        storage.save_graveyard(&graveyard).unwrap();
        assert_eq!(storage.load_graveyard().unwrap(), Some(graveyard));
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn policy_override_is_optional_but_must_exist_when_named() {
        assert!(FileLoader::default().load_policy().unwrap().is_none());
        let missing = FileLoader::new(Some(temp_root("policy").join("policy.json")));
        assert!(matches!(missing.load_policy(), Err(StorageError::Io { .. })));

        let root = temp_root("policy-ok");
        fs::create_dir_all(&root).unwrap();
        let path = root.join("policy.json");
        fs::write(&path, r#"{ "party_size": 3 }"#).unwrap();
        let policy = FileLoader::new(Some(path)).load_policy().unwrap().expect("policy");
        assert_eq!(policy.party_size, 3);
        let _ = fs::remove_dir_all(root);
    }
}
