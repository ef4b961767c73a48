//! Durable session-token storage.
//!
//! The token lives under [`TOKEN_KEY`] in a small JSON document. Stores are read
//! on every call rather than cached, so a token written by another process or
//! another client sharing the store takes effect on the next request.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Key under which the bearer token is persisted.
pub const TOKEN_KEY: &str = "auth_token";

static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

pub trait TokenStore: Send + Sync + fmt::Debug {
    /// The currently stored token, if any.
    fn load(&self) -> Option<String>;

    fn save(&self, token: &str) -> io::Result<()>;

    fn clear(&self) -> io::Result<()>;
}

// ── File store ────────────────────────────────────────────────────────────────

/// Token store backed by a JSON file, shared by every process pointing at it.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> io::Result<BTreeMap<String, String>> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e),
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(entries)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        // Write-then-rename so a concurrent reader never sees a torn file.
        // Each writer gets its own temp name; the last rename wins.
        let seq = TMP_SEQ.fetch_add(1, Ordering::Relaxed);
        let tmp = self.path.with_extension(format!("tmp.{}.{seq}", std::process::id()));
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        match self.read_entries() {
            Ok(mut entries) => entries.remove(TOKEN_KEY).filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "Unreadable session file: {e}");
                None
            }
        }
    }

    fn save(&self, token: &str) -> io::Result<()> {
        // A corrupt file is replaced rather than blocking login.
        let mut entries = self.read_entries().unwrap_or_default();
        entries.insert(TOKEN_KEY.to_owned(), token.to_owned());
        self.write_entries(&entries)
    }

    fn clear(&self) -> io::Result<()> {
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(_) => BTreeMap::new(),
        };
        if entries.remove(TOKEN_KEY).is_none() && !self.path.exists() {
            return Ok(());
        }
        self.write_entries(&entries)
    }
}

// ── In-memory store ───────────────────────────────────────────────────────────

/// Process-local store. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self { slot: Arc::new(Mutex::new(Some(token.into()))) }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn save(&self, token: &str) -> io::Result<()> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(token.to_owned());
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("vitrine-token-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir.join("nested").join("session.json")
    }

    #[test]
    fn file_store_round_trip() {
        let path = scratch_path("round-trip");
        let store = FileTokenStore::new(&path);
        assert_eq!(store.load(), None);

        store.save("abc").unwrap();
        assert_eq!(store.load().as_deref(), Some("abc"));

        let raw: BTreeMap<String, String> =
            serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw.get(TOKEN_KEY).map(String::as_str), Some("abc"));

        store.clear().unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn file_store_sees_writes_from_another_handle() {
        let path = scratch_path("shared");
        let a = FileTokenStore::new(&path);
        let b = FileTokenStore::new(&path);
        a.save("first").unwrap();
        b.save("second").unwrap();
        assert_eq!(a.load().as_deref(), Some("second"));
    }

    #[test]
    fn clearing_a_missing_file_is_fine() {
        let store = FileTokenStore::new(scratch_path("missing"));
        store.clear().unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn corrupt_file_reads_as_empty_and_is_replaced() {
        let path = scratch_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"not json").unwrap();
        let store = FileTokenStore::new(&path);
        assert_eq!(store.load(), None);
        store.save("fresh").unwrap();
        assert_eq!(store.load().as_deref(), Some("fresh"));
    }

    #[test]
    fn concurrent_saves_leave_one_whole_token() {
        let path = scratch_path("concurrent");
        let tokens: Vec<String> = (0..8).map(|i| format!("token-{i}")).collect();

        std::thread::scope(|s| {
            for token in &tokens {
                let store = FileTokenStore::new(&path);
                s.spawn(move || {
                    for _ in 0..20 {
                        store.save(token).unwrap();
                    }
                });
            }
        });

        let saved = FileTokenStore::new(&path).load().unwrap();
        assert!(tokens.contains(&saved));
        let leftovers: Vec<_> = fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .filter(|name| name != "session.json")
            .collect();
        assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
    }

    #[test]
    fn memory_store_clones_share_slot() {
        let a = MemoryTokenStore::new();
        let b = a.clone();
        a.save("t").unwrap();
        assert_eq!(b.load().as_deref(), Some("t"));
        b.clear().unwrap();
        assert_eq!(a.load(), None);
    }
}
