use std::sync::{Arc, Mutex, PoisonError};

use crate::media_cache::MediaCache;

/// Managed state behind the desktop bridge commands.
#[derive(Debug)]
pub(crate) struct MediaBridgeState {
    pub(crate) cache: Arc<MediaCache>,
    pub(crate) media_server_url: String,
}

impl MediaBridgeState {
    pub(crate) fn new(cache: Arc<MediaCache>, media_server_url: String) -> Self {
        Self {
            cache,
            media_server_url,
        }
    }

    pub(crate) fn clear_media_cache(&self) -> bool {
        self.cache.clear()
    }

    pub(crate) fn media_server_url(&self) -> String {
        self.media_server_url.clone()
    }
}

/// Holds the live main window, if any. Released on `Destroyed` so reopen
/// knows to build a fresh one.
pub(crate) struct WindowSlot<W> {
    window: Mutex<Option<W>>,
}

pub(crate) type MainWindowSlot = WindowSlot<tauri::WebviewWindow>;

impl<W> Default for WindowSlot<W> {
    fn default() -> Self {
        Self {
            window: Mutex::new(None),
        }
    }
}

impl<W> WindowSlot<W> {
    pub(crate) fn store(&self, window: W) {
        *self.window.lock().unwrap_or_else(PoisonError::into_inner) = Some(window);
    }

    pub(crate) fn release(&self) -> bool {
        self.window
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some()
    }

    pub(crate) fn is_occupied(&self) -> bool {
        self.window
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
