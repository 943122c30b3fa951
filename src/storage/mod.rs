use std::fs;
use std::path::PathBuf;

pub use leaderboard::{Entry, Leaderboard};

use crate::error::Result;

pub mod leaderboard;

/// Store key of the leaderboard JSON document
pub const LEADERBOARD_KEY: &str = "snake.leaderboard.v1";
/// Store key of the user settings JSON document
pub const SETTINGS_KEY: &str = "snake.settings.v1";

/// Key-value string store holding one JSON document per key.
/// The analog of the browser's local storage.
pub trait KvStore {
    /// None for a missing or unreadable key; the caller is expected
    /// to fall back to defaults
    fn read(&self, key: &str) -> Option<String>;

    fn write(&mut self, key: &str, value: &str) -> Result;

    fn remove(&mut self, key: &str) -> Result;
}

/// Store backed by one file per key in the platform user-data
/// directory (as reported by ggez)
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for DirStore {
    fn read(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path(key)).ok()
    }

    fn write(&mut self, key: &str, value: &str) -> Result {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
pub mod mem {
    use super::*;
    use std::collections::HashMap;

    /// In-memory store for tests
    #[derive(Default)]
    pub struct MemStore(pub HashMap<String, String>);

    impl KvStore for MemStore {
        fn read(&self, key: &str) -> Option<String> {
            self.0.get(key).cloned()
        }

        fn write(&mut self, key: &str, value: &str) -> Result {
            self.0.insert(key.to_owned(), value.to_owned());
            Ok(())
        }

        fn remove(&mut self, key: &str) -> Result {
            self.0.remove(key);
            Ok(())
        }
    }
}
