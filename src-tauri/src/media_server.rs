use std::{io, net::SocketAddr, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tokio::net::TcpListener;

use crate::{
    anki_connect::{MediaLookup, MediaSource, MediaSourceError},
    content_type::{content_type_for_fetched_filename, content_type_for_filename},
    media_cache::MediaCache,
    MEDIA_CACHE_CONTROL, MEDIA_ROUTE_PREFIX,
};

#[derive(Clone)]
pub(crate) struct MediaProxyState {
    pub(crate) cache: Arc<MediaCache>,
    pub(crate) source: Arc<dyn MediaSource>,
}

impl MediaProxyState {
    pub(crate) fn new(cache: Arc<MediaCache>, source: Arc<dyn MediaSource>) -> Self {
        Self { cache, source }
    }
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum MediaProxyError {
    #[error("no filename specified")]
    MissingFilename,
    #[error("file not found: {filename}")]
    NotFound { filename: String },
    #[error(transparent)]
    Source(#[from] MediaSourceError),
    #[error("media payload is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),
}

impl IntoResponse for MediaProxyError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::MissingFilename => (
                StatusCode::BAD_REQUEST,
                "Bad Request: No filename specified".to_string(),
            ),
            Self::NotFound { filename } => {
                (StatusCode::NOT_FOUND, format!("File not found: {filename}"))
            }
            Self::Source(_) | Self::Decode(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error".to_string(),
            ),
        };

        (status, body).into_response()
    }
}

pub(crate) fn media_router(state: MediaProxyState) -> Router {
    Router::new()
        .route(MEDIA_ROUTE_PREFIX, any(missing_filename))
        .route(&format!("{MEDIA_ROUTE_PREFIX}/"), any(missing_filename))
        .route(&format!("{MEDIA_ROUTE_PREFIX}/{{*filename}}"), any(serve_media))
        .fallback(unknown_route)
        .with_state(state)
}

async fn missing_filename() -> MediaProxyError {
    tracing::warn!("media request without a filename");
    MediaProxyError::MissingFilename
}

async fn unknown_route() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}

async fn serve_media(
    State(state): State<MediaProxyState>,
    Path(filename): Path<String>,
) -> Result<Response, MediaProxyError> {
    if filename.is_empty() {
        return Err(MediaProxyError::MissingFilename);
    }

    tracing::info!(%filename, "media server request");
    let result = respond_with_media(&state, &filename).await;
    if let Err(error @ (MediaProxyError::Source(_) | MediaProxyError::Decode(_))) = &result {
        tracing::error!(%filename, "error retrieving media file: {error}");
    }
    result
}

async fn respond_with_media(
    state: &MediaProxyState,
    filename: &str,
) -> Result<Response, MediaProxyError> {
    if let Some(payload) = state.cache.get(filename) {
        let bytes = STANDARD.decode(payload)?;
        return Ok(media_response(bytes, content_type_for_filename(filename)));
    }

    let payload = match state.source.retrieve_media_file(filename).await? {
        MediaLookup::Found(payload) => payload,
        MediaLookup::Missing(reason) => {
            tracing::warn!(%filename, %reason, "AnkiConnect error");
            return Err(MediaProxyError::NotFound {
                filename: filename.to_string(),
            });
        }
    };

    let bytes = STANDARD.decode(&payload)?;
    state.cache.put(filename, payload);
    tracing::debug!(%filename, cached_entries = state.cache.len(), "cached media file");
    Ok(media_response(
        bytes,
        content_type_for_fetched_filename(filename),
    ))
}

fn media_response(bytes: Vec<u8>, content_type: &'static str) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, MEDIA_CACHE_CONTROL),
        ],
        bytes,
    )
        .into_response()
}

pub(crate) async fn serve_on_listener(listener: TcpListener, state: MediaProxyState) -> io::Result<()> {
    axum::serve(listener, media_router(state)).await
}

pub(crate) async fn run_media_server(address: SocketAddr, state: MediaProxyState) -> io::Result<()> {
    let listener = TcpListener::bind(address).await?;
    tracing::info!("media server running at http://{}/", listener.local_addr()?);
    serve_on_listener(listener, state).await
}

/// Starts the proxy on the Tauri async runtime. Bind and serve failures are
/// logged and the app keeps running without a listener.
pub(crate) fn spawn_media_server(address: SocketAddr, state: MediaProxyState) {
    tauri::async_runtime::spawn(async move {
        if let Err(error) = run_media_server(address, state).await {
            tracing::error!(%address, "media server error: {error}");
        }
    });
}
