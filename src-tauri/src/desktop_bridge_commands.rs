use tauri::{AppHandle, Manager};

use crate::MediaBridgeState;

#[tauri::command]
pub(crate) fn clear_media_cache(app_handle: AppHandle) -> bool {
    let state = app_handle.state::<MediaBridgeState>();
    state.clear_media_cache()
}

#[tauri::command]
pub(crate) fn get_media_server_url(app_handle: AppHandle) -> String {
    let state = app_handle.state::<MediaBridgeState>();
    state.media_server_url()
}
