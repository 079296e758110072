use std::{
    env,
    net::{Ipv4Addr, SocketAddr},
};

use url::Url;

use crate::{
    run_mode::RunMode, ANKI_CONNECT_URL_ENV, DEFAULT_ANKI_CONNECT_URL, DEFAULT_DEV_SERVER_URL,
    DEFAULT_MEDIA_SERVER_PORT, DEV_SERVER_URL_ENV, MEDIA_SERVER_PORT_ENV, RUN_MODE_ENV,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AppConfig {
    pub(crate) anki_connect_url: Url,
    pub(crate) media_server_port: u16,
    pub(crate) dev_server_url: Url,
    pub(crate) run_mode: RunMode,
}

impl AppConfig {
    pub(crate) fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok(), cfg!(debug_assertions))
    }

    fn from_lookup<F>(lookup: F, debug_build: bool) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            anki_connect_url: normalize_http_url(
                lookup(ANKI_CONNECT_URL_ENV).as_deref(),
                DEFAULT_ANKI_CONNECT_URL,
            ),
            media_server_port: normalize_port(
                lookup(MEDIA_SERVER_PORT_ENV).as_deref(),
                DEFAULT_MEDIA_SERVER_PORT,
            ),
            dev_server_url: normalize_http_url(
                lookup(DEV_SERVER_URL_ENV).as_deref(),
                DEFAULT_DEV_SERVER_URL,
            ),
            run_mode: RunMode::resolve(lookup(RUN_MODE_ENV).as_deref(), debug_build),
        }
    }

    pub(crate) fn media_server_address(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::LOCALHOST, self.media_server_port))
    }

    pub(crate) fn media_server_url(&self) -> String {
        format!("http://localhost:{}", self.media_server_port)
    }
}

fn parse_http_url(raw: &str) -> Option<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let parsed = Url::parse(trimmed).ok()?;
    match parsed.scheme() {
        "http" | "https" => Some(parsed),
        _ => None,
    }
}

pub(crate) fn normalize_http_url(raw: Option<&str>, default_url: &'static str) -> Url {
    if let Some(raw) = raw {
        if let Some(parsed) = parse_http_url(raw) {
            return parsed;
        }
        tracing::warn!("ignoring invalid URL '{raw}', falling back to {default_url}");
    }

    // Defaults are constants covered by tests below.
    parse_http_url(default_url).expect("default URL constants are valid http URLs")
}

pub(crate) fn normalize_port(raw: Option<&str>, default_port: u16) -> u16 {
    let Some(raw) = raw else {
        return default_port;
    };

    match raw.trim().parse::<u16>() {
        Ok(port) if port != 0 => port,
        _ => {
            tracing::warn!("ignoring invalid port '{raw}', falling back to {default_port}");
            default_port
        }
    }
}
