// Local key/value storage backing the session token.
//
// The whole store is a single JSON object on disk. Every mutation rewrites the
// file atomically while holding a sidecar lock, so a crash never leaves a
// half-written token behind.
use anyhow::{Context, Result};
use fs2::FileExt;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed key/value store (string keys, JSON values).
#[derive(Debug, Clone)]
pub struct KeyValueStore {
    path: PathBuf,
}

impl KeyValueStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the string stored under `key`, if any.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        Self::with_lock(&self.path, || {
            let map = self.read_map()?;
            Ok(map.get(key).and_then(|v| v.as_str()).map(str::to_string))
        })
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        Self::with_lock(&self.path, || {
            let mut map = self.read_map()?;
            map.insert(key.to_string(), Value::String(value.to_string()));
            self.write_map(&map)
        })
    }

    /// Removes `key`. Removing an absent key is not an error.
    pub fn remove(&self, key: &str) -> Result<()> {
        Self::with_lock(&self.path, || {
            let mut map = self.read_map()?;
            if map.remove(key).is_some() {
                self.write_map(&map)?;
            }
            Ok(())
        })
    }

    // Caller must hold the lock.
    fn read_map(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read storage file '{}'", self.path.display()))?;
        if json.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&json) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(anyhow::anyhow!(
                "Storage file '{}' is not a JSON object",
                self.path.display()
            )),
            Err(e) => Err(anyhow::anyhow!(
                "Failed to parse storage file '{}': {}",
                self.path.display(),
                e
            )),
        }
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<()> {
        let json = serde_json::to_string_pretty(map)?;
        Self::atomic_write(&self.path, json)
    }

    /// Helper to get a sidecar lock file path
    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.to_path_buf();
        if let Some(ext) = lock_path.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".lock");
            lock_path.set_extension(new_ext);
        } else {
            lock_path.set_extension("lock");
        }
        lock_path
    }

    /// Runs `f` while holding an exclusive advisory lock on `file_path`'s sidecar.
    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        if let Some(parent) = file_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn temp_store(name: &str) -> (PathBuf, KeyValueStore) {
        let dir = std::env::temp_dir().join(format!("plancraft_kv_{}_{}", name, uuid::Uuid::new_v4()));
        let _ = fs::create_dir_all(&dir);
        let store = KeyValueStore::new(dir.join("storage.json"));
        (dir, store)
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let (dir, store) = temp_store("missing");
        assert_eq!(store.get("token").unwrap(), None);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_set_get_remove() {
        let (dir, store) = temp_store("crud");
        store.set("token", "abc").unwrap();
        store.set("other", "keep").unwrap();
        assert_eq!(store.get("token").unwrap().as_deref(), Some("abc"));

        store.remove("token").unwrap();
        assert_eq!(store.get("token").unwrap(), None);
        assert_eq!(store.get("other").unwrap().as_deref(), Some("keep"));

        // Removing twice is fine
        store.remove("token").unwrap();
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let (dir, store) = temp_store("corrupt");
        fs::write(store.path(), "[1, 2").unwrap();
        assert!(store.get("token").is_err());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_locking_concurrency() {
        let (dir, _) = temp_store("lock");
        let file_path = dir.join("lock_test.txt");
        let path_ref = Arc::new(file_path.clone());

        let _ = fs::write(&file_path, "0");

        let mut handles = vec![];
        for _ in 0..10 {
            let p = path_ref.clone();
            handles.push(thread::spawn(move || {
                KeyValueStore::with_lock(&p, || {
                    let content = fs::read_to_string(&*p).unwrap();
                    let num: i32 = content.parse().unwrap();
                    std::thread::sleep(std::time::Duration::from_millis(10));
                    fs::write(&*p, (num + 1).to_string()).unwrap();
                    Ok(())
                })
                .unwrap();
            }));
        }

        for h in handles {
            h.join().unwrap();
        }

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "10");
        let _ = fs::remove_dir_all(dir);
    }
}
