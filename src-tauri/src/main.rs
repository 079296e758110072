#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod anki_connect;
mod app_config;
mod app_constants;
mod app_runtime;
mod app_types;
mod content_type;
mod desktop_bridge_commands;
mod logging;
mod main_window;
mod media_cache;
mod media_server;
mod run_mode;
mod window_actions;

pub(crate) use app_constants::*;
pub(crate) use app_types::{MainWindowSlot, MediaBridgeState};

fn main() {
    app_runtime::run();
}
