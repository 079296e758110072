use tauri::{AppHandle, ExitRequestApi, Manager};

use crate::{app_config::AppConfig, main_window, MainWindowSlot, MAIN_WINDOW_LABEL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AllWindowsClosedDecision {
    Exit,
    KeepRunning,
}

/// macOS apps stay alive in the dock after their last window closes.
pub(crate) fn decide_all_windows_closed(target_os: &str) -> AllWindowsClosedDecision {
    if target_os == "macos" {
        AllWindowsClosedDecision::KeepRunning
    } else {
        AllWindowsClosedDecision::Exit
    }
}

pub(crate) fn should_recreate_main_window(main_window_present: bool) -> bool {
    !main_window_present
}

pub(crate) fn handle_main_window_destroyed(app_handle: &AppHandle) {
    if app_handle.state::<MainWindowSlot>().release() {
        tracing::info!("main window closed, released window reference");
    }
}

/// `code` is `None` when the exit was triggered by the last window closing
/// rather than an explicit `exit` call.
pub(crate) fn handle_exit_requested(api: &ExitRequestApi, code: Option<i32>) {
    if code.is_some() {
        return;
    }

    match decide_all_windows_closed(std::env::consts::OS) {
        AllWindowsClosedDecision::KeepRunning => {
            tracing::info!("all windows closed, keeping app alive");
            api.prevent_exit();
        }
        AllWindowsClosedDecision::Exit => {
            tracing::info!("all windows closed, exiting desktop process");
        }
    }
}

#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
pub(crate) fn handle_reopen(app_handle: &AppHandle) {
    let main_window_present = app_handle.state::<MainWindowSlot>().is_occupied()
        || app_handle.get_webview_window(MAIN_WINDOW_LABEL).is_some();
    if !should_recreate_main_window(main_window_present) {
        return;
    }

    let config = app_handle.state::<AppConfig>();
    if let Err(error) = main_window::create_main_window(app_handle, &config) {
        tracing::error!("failed to recreate main window on reopen: {error}");
    }
}
