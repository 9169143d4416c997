//! Weight persistence keyed by user and deck content.
//!
//! A weight vector is stored as whitespace-separated integers under a
//! `WeightKey`. The key embeds a content fingerprint of the deck, so an
//! edited deck never picks up weights that belong to another version of it,
//! and re-importing an unchanged deck resumes where the user left off.

use std::collections::HashMap;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::{EngineError, Result};
use crate::types::{Deck, Weights};
use crate::weights::initial_weights;

/// Bump to invalidate every previously stored weight file.
pub const STATE_VERSION: u32 = 1;

/// Identity of one persisted weight vector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WeightKey {
    pub user_id: String,
    pub fingerprint: String,
    pub version: u32,
}

impl WeightKey {
    /// Derive the key for `user_id` studying `deck`.
    pub fn new(user_id: &str, deck: &Deck) -> Result<Self> {
        validate_user_id(user_id)?;
        Ok(Self {
            user_id: user_id.to_string(),
            fingerprint: deck.fingerprint(),
            version: STATE_VERSION,
        })
    }

    /// Format: `{user_id}_v{version}_{fingerprint}.dat`
    pub fn file_name(&self) -> String {
        format!("{}_v{}_{}.dat", self.user_id, self.version, self.fingerprint)
    }
}

impl fmt::Display for WeightKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/v{}/{}", self.user_id, self.version, self.fingerprint)
    }
}

/// User ids end up in file names, so only `[A-Za-z0-9_-]+` is accepted.
pub fn validate_user_id(user_id: &str) -> Result<()> {
    let valid = !user_id.is_empty()
        && user_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(EngineError::InvalidUserId(user_id.to_string()))
    }
}

pub fn encode_weights(weights: &[i64]) -> String {
    weights
        .iter()
        .map(|w| w.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse stored weights, requiring exactly `expected_len` integers.
pub fn decode_weights(key: &WeightKey, raw: &str, expected_len: usize) -> Result<Weights> {
    let corrupt = |reason: String| EngineError::CorruptState {
        key: key.to_string(),
        reason,
    };

    let weights = raw
        .split_whitespace()
        .map(|token| {
            token
                .parse::<i64>()
                .map_err(|_| corrupt(format!("not an integer: {:?}", token)))
        })
        .collect::<Result<Weights>>()?;

    if weights.len() != expected_len {
        return Err(corrupt(format!(
            "expected {} weights, found {}",
            expected_len,
            weights.len()
        )));
    }
    Ok(weights)
}

/// Storage backend for weight vectors.
pub trait WeightStore: Send + Sync {
    /// Raw stored contents, or `None` if nothing was saved under `key`.
    fn read_raw(&self, key: &WeightKey) -> Result<Option<String>>;

    /// Replace whatever is stored under `key`.
    fn write_raw(&self, key: &WeightKey, contents: &str) -> Result<()>;

    /// Stored weights for this user and deck, or all ones if there are none.
    fn load(&self, user_id: &str, deck: &Deck) -> Result<Weights> {
        let key = WeightKey::new(user_id, deck)?;
        match self.read_raw(&key)? {
            Some(raw) => decode_weights(&key, &raw, deck.len()),
            None => Ok(initial_weights(deck.len())),
        }
    }

    /// Like `load`, but corrupt state is logged and replaced by all ones.
    ///
    /// The flag is `true` when stored weights were discarded.
    fn load_or_reset(&self, user_id: &str, deck: &Deck) -> Result<(Weights, bool)> {
        match self.load(user_id, deck) {
            Ok(weights) => Ok((weights, false)),
            Err(EngineError::CorruptState { key, reason }) => {
                tracing::warn!(%key, %reason, "discarding corrupt weight state");
                Ok((initial_weights(deck.len()), true))
            }
            Err(e) => Err(e),
        }
    }

    fn save(&self, user_id: &str, deck: &Deck, weights: &[i64]) -> Result<()> {
        if weights.len() != deck.len() {
            return Err(EngineError::WeightLengthMismatch {
                expected: deck.len(),
                found: weights.len(),
            });
        }
        let key = WeightKey::new(user_id, deck)?;
        self.write_raw(&key, &encode_weights(weights))
    }
}

/// One `.dat` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileWeightStore {
    dir: PathBuf,
}

impl FileWeightStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn path_for(&self, key: &WeightKey) -> PathBuf {
        self.dir.join(key.file_name())
    }
}

impl WeightStore for FileWeightStore {
    fn read_raw(&self, key: &WeightKey) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes to a sibling `.tmp` file and renames it over the target, so an
    /// interrupted save leaves the previous contents intact.
    fn write_raw(&self, key: &WeightKey, contents: &str) -> Result<()> {
        let path = self.path_for(key);
        let tmp_path = path.with_extension("dat.tmp");

        let written =
            write_synced(&tmp_path, contents).and_then(|()| fs::rename(&tmp_path, &path));
        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&tmp_path) {
                if cleanup.kind() != ErrorKind::NotFound {
                    tracing::warn!(
                        path = %tmp_path.display(),
                        error = %cleanup,
                        "failed to remove temp file"
                    );
                }
            }
            return Err(e.into());
        }
        tracing::debug!(path = %path.display(), "saved weights");
        Ok(())
    }
}

fn write_synced(path: &Path, contents: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

/// Process-local store, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryWeightStore {
    entries: Mutex<HashMap<WeightKey, String>>,
}

impl MemoryWeightStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WeightStore for MemoryWeightStore {
    fn read_raw(&self, key: &WeightKey) -> Result<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn write_raw(&self, key: &WeightKey, contents: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.clone(), contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Item;
    use pretty_assertions::assert_eq;

    fn deck() -> Deck {
        Deck::new(vec![
            Item::new("2+2?", "4", "math"),
            Item::new("3+3?", "6", "math"),
            Item::new("cat?", "gato", "es"),
        ])
        .unwrap()
    }

    fn other_deck() -> Deck {
        Deck::new(vec![
            Item::new("dog?", "perro", "es"),
            Item::new("cat?", "gato", "es"),
            Item::new("bird?", "pájaro", "es"),
        ])
        .unwrap()
    }

    #[test]
    fn key_is_pure_function_of_user_and_deck() {
        let a = WeightKey::new("42", &deck()).unwrap();
        let b = WeightKey::new("42", &deck()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.version, STATE_VERSION);
        assert!(a.file_name().starts_with("42_v1_"));
        assert!(a.file_name().ends_with(".dat"));

        assert_ne!(a, WeightKey::new("43", &deck()).unwrap());
        assert_ne!(a, WeightKey::new("42", &other_deck()).unwrap());
    }

    #[test]
    fn key_rejects_path_like_user_ids() {
        for user in ["", "../etc", "a/b", "a b", "ü"] {
            assert!(matches!(
                WeightKey::new(user, &deck()),
                Err(EngineError::InvalidUserId(_))
            ));
        }
    }

    #[test]
    fn encode_is_space_separated() {
        assert_eq!(encode_weights(&[1, -2, 30]), "1 -2 30");
        assert_eq!(encode_weights(&[]), "");
    }

    #[test]
    fn decode_tolerates_any_whitespace() {
        let key = WeightKey::new("u", &deck()).unwrap();
        assert_eq!(decode_weights(&key, " 1\n-2\t3 \n", 3).unwrap(), vec![1, -2, 3]);
    }

    #[test]
    fn decode_rejects_wrong_length() {
        let key = WeightKey::new("u", &deck()).unwrap();
        assert!(matches!(
            decode_weights(&key, "1 1", 3),
            Err(EngineError::CorruptState { .. })
        ));
        assert!(matches!(
            decode_weights(&key, "1 1 1 1", 3),
            Err(EngineError::CorruptState { .. })
        ));
    }

    #[test]
    fn decode_rejects_non_integers() {
        let key = WeightKey::new("u", &deck()).unwrap();
        let result = decode_weights(&key, "1 1.5 1", 3);
        match result {
            Err(EngineError::CorruptState { reason, .. }) => assert!(reason.contains("1.5")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn fresh_user_gets_all_ones() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileWeightStore::new(dir.path()).unwrap();
        assert_eq!(store.load("7", &deck()).unwrap(), vec![1, 1, 1]);
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileWeightStore::new(dir.path()).unwrap();

        store.save("7", &deck(), &[3, -1, 0]).unwrap();
        assert_eq!(store.load("7", &deck()).unwrap(), vec![3, -1, 0]);

        store.save("7", &deck(), &[2, -1, 0]).unwrap();
        assert_eq!(store.load("7", &deck()).unwrap(), vec![2, -1, 0]);

        let key = WeightKey::new("7", &deck()).unwrap();
        let raw = fs::read_to_string(store.path_for(&key)).unwrap();
        assert_eq!(raw, "2 -1 0");
    }

    #[test]
    fn save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileWeightStore::new(dir.path()).unwrap();
        store.save("7", &deck(), &[1, 1, 1]).unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 1);
        assert!(names[0].ends_with(".dat"));
    }

    #[test]
    fn failed_save_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileWeightStore::new(dir.path()).unwrap();
        let key = WeightKey::new("7", &deck()).unwrap();

        // A non-empty directory at the target path makes the rename fail.
        let target = store.path_for(&key);
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "x").unwrap();

        assert!(matches!(
            store.save("7", &deck(), &[1, 1, 1]),
            Err(EngineError::Io(_))
        ));
        assert!(!target.with_extension("dat.tmp").exists());
        assert!(target.join("keep").exists());
    }

    #[test]
    fn users_and_decks_are_isolated() {
        let store = MemoryWeightStore::new();
        store.save("1", &deck(), &[5, 5, 5]).unwrap();

        assert_eq!(store.load("2", &deck()).unwrap(), vec![1, 1, 1]);
        assert_eq!(store.load("1", &other_deck()).unwrap(), vec![1, 1, 1]);
        assert_eq!(store.load("1", &deck()).unwrap(), vec![5, 5, 5]);
    }

    #[test]
    fn save_rejects_misaligned_weights() {
        let store = MemoryWeightStore::new();
        assert!(matches!(
            store.save("1", &deck(), &[1, 1]),
            Err(EngineError::WeightLengthMismatch {
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn corrupt_state_is_reported_then_reset() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileWeightStore::new(dir.path()).unwrap();
        let key = WeightKey::new("7", &deck()).unwrap();
        fs::write(store.path_for(&key), "1 2").unwrap();

        assert!(matches!(
            store.load("7", &deck()),
            Err(EngineError::CorruptState { .. })
        ));

        let (weights, reset) = store.load_or_reset("7", &deck()).unwrap();
        assert_eq!(weights, vec![1, 1, 1]);
        assert!(reset);
    }

    #[test]
    fn load_or_reset_keeps_valid_state() {
        let store = MemoryWeightStore::new();
        store.save("1", &deck(), &[0, 2, 1]).unwrap();
        let (weights, reset) = store.load_or_reset("1", &deck()).unwrap();
        assert_eq!(weights, vec![0, 2, 1]);
        assert!(!reset);
    }

    #[test]
    fn load_or_reset_still_reports_bad_user() {
        let store = MemoryWeightStore::new();
        assert!(matches!(
            store.load_or_reset("no/slashes", &deck()),
            Err(EngineError::InvalidUserId(_))
        ));
    }
}
