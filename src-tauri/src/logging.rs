use std::{
    fs::{self, File, OpenOptions},
    io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{DEFAULT_LOG_FILTER, DESKTOP_DATA_DIR};

pub(crate) fn default_data_root_dir() -> Option<PathBuf> {
    home::home_dir().map(|home| home.join(DESKTOP_DATA_DIR))
}

pub(crate) fn resolve_desktop_log_path(root_dir: Option<PathBuf>, file_name: &str) -> Option<PathBuf> {
    root_dir.map(|root| root.join("logs").join(file_name))
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Installs the global subscriber: stderr always, plus an append-only file
/// when `log_path` can be opened. Safe to call more than once; later calls
/// are ignored.
pub(crate) fn init_logging(log_path: Option<&Path>) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let file_layer = log_path.and_then(|path| match open_log_file(path) {
        Ok(file) => Some(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        ),
        Err(error) => {
            eprintln!("failed to open desktop log {}: {error}", path.display());
            None
        }
    });

    let initialized = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .try_init();

    match initialized {
        Ok(()) => {
            if let Some(path) = log_path {
                tracing::info!(path = %path.display(), "logging initialized");
            }
        }
        Err(error) => eprintln!("failed to initialize logging: {error}"),
    }
}
