use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

/// In-memory filename to base64 payload map shared by the media server and
/// the desktop bridge. Entries live until [`MediaCache::clear`] or process
/// exit.
#[derive(Debug, Default)]
pub(crate) struct MediaCache {
    entries: RwLock<HashMap<String, String>>,
}

impl MediaCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, String>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, String>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn get(&self, filename: &str) -> Option<String> {
        self.read().get(filename).cloned()
    }

    pub(crate) fn put(&self, filename: &str, payload: String) {
        self.write().insert(filename.to_string(), payload);
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, filename: &str) -> bool {
        self.read().contains_key(filename)
    }

    pub(crate) fn len(&self) -> usize {
        self.read().len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub(crate) fn clear(&self) -> bool {
        let previous = std::mem::take(&mut *self.write());
        tracing::info!(entries = previous.len(), "media cache cleared");
        true
    }
}
