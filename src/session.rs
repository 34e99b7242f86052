// File: ./src/session.rs
//! Session token persistence.
//!
//! The auth token is the only piece of state shared between screens. It is
//! owned by a `SessionStore` that is injected into whoever needs it (the API
//! client's bearer layer, the auth flow, the TUI) instead of living in a
//! global.
use crate::context::AppContext;
use crate::storage::KeyValueStore;
use anyhow::Result;
use std::sync::Mutex;

/// Storage key the token is persisted under.
pub const TOKEN_KEY: &str = "token";

pub trait SessionStore: Send + Sync + std::fmt::Debug {
    /// Returns the persisted token, if any.
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, token: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Persists the token in the local key/value file.
///
/// The file is read once; later loads are served from memory, so the bearer
/// layer does not take the file lock on every request. Saves and clears write
/// through to the file before updating the cached value.
#[derive(Debug)]
pub struct FileSessionStore {
    storage: KeyValueStore,
    cached: Mutex<Option<Option<String>>>,
}

impl FileSessionStore {
    pub fn new(ctx: &dyn AppContext) -> Result<Self> {
        Ok(Self::with_storage(KeyValueStore::new(ctx.get_storage_path()?)))
    }

    pub fn with_storage(storage: KeyValueStore) -> Self {
        Self {
            storage,
            cached: Mutex::new(None),
        }
    }

    fn cache(&self) -> Result<std::sync::MutexGuard<'_, Option<Option<String>>>> {
        self.cached
            .lock()
            .map_err(|_| anyhow::anyhow!("Session lock poisoned"))
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<String>> {
        let mut cached = self.cache()?;
        if let Some(token) = cached.as_ref() {
            return Ok(token.clone());
        }
        let token = self.storage.get(TOKEN_KEY)?;
        *cached = Some(token.clone());
        Ok(token)
    }

    fn save(&self, token: &str) -> Result<()> {
        let mut cached = self.cache()?;
        self.storage.set(TOKEN_KEY, token)?;
        *cached = Some(Some(token.to_string()));
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut cached = self.cache()?;
        self.storage.remove(TOKEN_KEY)?;
        *cached = Some(None);
        Ok(())
    }
}

/// In-process store, used by tests and one-shot commands.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<String>> {
        let guard = self
            .token
            .lock()
            .map_err(|_| anyhow::anyhow!("Session lock poisoned"))?;
        Ok(guard.clone())
    }

    fn save(&self, token: &str) -> Result<()> {
        let mut guard = self
            .token
            .lock()
            .map_err(|_| anyhow::anyhow!("Session lock poisoned"))?;
        *guard = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut guard = self
            .token
            .lock()
            .map_err(|_| anyhow::anyhow!("Session lock poisoned"))?;
        *guard = None;
        Ok(())
    }
}
