use std::path::PathBuf;

use tauri::{AppHandle, Manager, WebviewUrl, WebviewWindow, WebviewWindowBuilder};

use crate::{
    app_config::AppConfig, MainWindowSlot, MAIN_WINDOW_HEIGHT, MAIN_WINDOW_LABEL,
    MAIN_WINDOW_TITLE, MAIN_WINDOW_WIDTH, PACKAGED_ENTRY_PAGE,
};

pub(crate) fn main_window_url(config: &AppConfig) -> WebviewUrl {
    if config.run_mode.is_development() {
        WebviewUrl::External(config.dev_server_url.clone())
    } else {
        WebviewUrl::App(PathBuf::from(PACKAGED_ENTRY_PAGE))
    }
}

pub(crate) fn create_main_window(app_handle: &AppHandle, config: &AppConfig) -> Result<(), String> {
    if let Some(existing) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) {
        tracing::debug!("main window already exists, focusing it");
        return existing
            .set_focus()
            .map_err(|error| format!("Failed to focus existing main window: {error}"));
    }

    let window = WebviewWindowBuilder::new(app_handle, MAIN_WINDOW_LABEL, main_window_url(config))
        .title(MAIN_WINDOW_TITLE)
        .inner_size(MAIN_WINDOW_WIDTH, MAIN_WINDOW_HEIGHT)
        .build()
        .map_err(|error| format!("Failed to create main window: {error}"))?;

    if config.run_mode.is_development() {
        open_devtools(&window);
    }

    app_handle.state::<MainWindowSlot>().store(window);
    tracing::info!(run_mode = config.run_mode.as_str(), "main window created");
    Ok(())
}

#[cfg(debug_assertions)]
fn open_devtools(window: &WebviewWindow) {
    window.open_devtools();
}

#[cfg(not(debug_assertions))]
fn open_devtools(_window: &WebviewWindow) {
    tracing::debug!("devtools are only available in debug builds");
}
