use std::sync::Arc;

use tauri::{Manager, RunEvent, WindowEvent};

use crate::{
    anki_connect::AnkiConnectClient,
    app_config::AppConfig,
    logging, main_window,
    media_cache::MediaCache,
    media_server::{self, MediaProxyState},
    window_actions, MainWindowSlot, MediaBridgeState, DESKTOP_LOG_FILE, MAIN_WINDOW_LABEL,
};

pub(crate) fn run() {
    let log_path =
        logging::resolve_desktop_log_path(logging::default_data_root_dir(), DESKTOP_LOG_FILE);
    logging::init_logging(log_path.as_deref());

    let config = AppConfig::from_env();
    tracing::info!(
        run_mode = config.run_mode.as_str(),
        anki_connect_url = %config.anki_connect_url,
        media_server_url = %config.media_server_url(),
        "desktop process starting"
    );

    let cache = Arc::new(MediaCache::new());

    tauri::Builder::default()
        .manage(config.clone())
        .manage(MediaBridgeState::new(
            cache.clone(),
            config.media_server_url(),
        ))
        .manage(MainWindowSlot::default())
        .invoke_handler(tauri::generate_handler![
            crate::desktop_bridge_commands::clear_media_cache,
            crate::desktop_bridge_commands::get_media_server_url,
        ])
        .on_window_event(|window, event| {
            if window.label() != MAIN_WINDOW_LABEL {
                return;
            }

            if let WindowEvent::Destroyed = event {
                window_actions::handle_main_window_destroyed(window.app_handle());
            }
        })
        .setup(move |app| {
            let app_handle = app.handle().clone();
            if let Err(error) = main_window::create_main_window(&app_handle, &config) {
                tracing::error!("{error}");
            }

            match AnkiConnectClient::new(config.anki_connect_url.clone()) {
                Ok(client) => media_server::spawn_media_server(
                    config.media_server_address(),
                    MediaProxyState::new(cache, Arc::new(client)),
                ),
                Err(error) => {
                    tracing::error!("media server not started: {error}");
                }
            }

            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| match event {
            RunEvent::ExitRequested { api, code, .. } => {
                window_actions::handle_exit_requested(&api, code);
            }
            #[cfg(target_os = "macos")]
            RunEvent::Reopen { .. } => {
                window_actions::handle_reopen(app_handle);
            }
            RunEvent::Exit => {
                tracing::info!(app = %app_handle.package_info().name, "desktop process exiting");
            }
            _ => {}
        });
}
