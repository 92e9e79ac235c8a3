use crate::error::StorageError;
use crate::locale::Locale;
use crate::ports::Storage;
use crate::types::Workout;
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// In-process store; contents vanish with the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Key-value store kept as one JSON object file.
///
/// Every `set` rewrites the whole file through a temp file in the same
/// directory, so readers never see a half-written store.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&text)?)
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, items)?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = match self.read_all() {
            Ok(items) => items,
            Err(StorageError::Json(e)) => {
                tracing::warn!(path = %self.path.display(), err = %e, "store file is corrupt; starting over");
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items)
    }
}

pub fn encode_workouts(workouts: &[Workout]) -> Result<String, StorageError> {
    Ok(serde_json::to_string(workouts)?)
}

/// Reads a stored workout list.
///
/// A blob that is not a JSON array yields no workouts. Malformed entries
/// are skipped, and of several entries sharing an id only the first is kept.
pub fn decode_workouts(blob: &str, locale: Locale) -> Vec<Workout> {
    let entries = match serde_json::from_str::<JsonValue>(blob) {
        Ok(JsonValue::Array(entries)) => entries,
        Ok(JsonValue::Null) => return Vec::new(),
        Ok(other) => {
            tracing::warn!(found = %json_kind(&other), "stored workouts are not a list; ignoring");
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(err = %e, "stored workouts are not valid JSON; ignoring");
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.into_iter().enumerate() {
        let workout = match serde_json::from_value::<Workout>(entry) {
            Ok(w) => w.restored(locale),
            Err(e) => {
                tracing::warn!(idx, err = %e, "skipping malformed stored workout");
                continue;
            }
        };
        if !seen.insert(workout.id().clone()) {
            tracing::warn!(idx, id = %workout.id(), "skipping stored workout with duplicate id");
            continue;
        }
        out.push(workout);
    }
    out
}

const fn json_kind(v: &JsonValue) -> &'static str {
    match v {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
