pub(crate) const MAIN_WINDOW_LABEL: &str = "main";
pub(crate) const MAIN_WINDOW_TITLE: &str = "Anki Media Desktop";
pub(crate) const MAIN_WINDOW_WIDTH: f64 = 1200.0;
pub(crate) const MAIN_WINDOW_HEIGHT: f64 = 800.0;
pub(crate) const PACKAGED_ENTRY_PAGE: &str = "index.html";

pub(crate) const DEFAULT_DEV_SERVER_URL: &str = "http://localhost:5173/";
pub(crate) const DEFAULT_ANKI_CONNECT_URL: &str = "http://localhost:8765/";
pub(crate) const DEFAULT_MEDIA_SERVER_PORT: u16 = 8766;

pub(crate) const ANKI_CONNECT_URL_ENV: &str = "ANKI_CONNECT_URL";
pub(crate) const MEDIA_SERVER_PORT_ENV: &str = "ANKI_DESKTOP_MEDIA_PORT";
pub(crate) const DEV_SERVER_URL_ENV: &str = "ANKI_DESKTOP_DEV_URL";
pub(crate) const RUN_MODE_ENV: &str = "ANKI_DESKTOP_IS_DEV";

pub(crate) const ANKI_CONNECT_API_VERSION: u32 = 6;
pub(crate) const RETRIEVE_MEDIA_FILE_ACTION: &str = "retrieveMediaFile";

pub(crate) const MEDIA_ROUTE_PREFIX: &str = "/media";
pub(crate) const MEDIA_CACHE_CONTROL: &str = "public, max-age=86400";

pub(crate) const DESKTOP_DATA_DIR: &str = ".anki-media-desktop";
pub(crate) const DESKTOP_LOG_FILE: &str = "desktop.log";
pub(crate) const DEFAULT_LOG_FILTER: &str = "info";
