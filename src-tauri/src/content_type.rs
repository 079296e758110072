const OCTET_STREAM: &str = "application/octet-stream";

pub(crate) fn content_type_for_filename(filename: &str) -> &'static str {
    let Some((_, extension)) = filename.rsplit_once('.') else {
        return OCTET_STREAM;
    };

    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        _ => OCTET_STREAM,
    }
}

/// Content type for a payload that was just fetched from AnkiConnect.
///
/// Identical to [`content_type_for_filename`] except that `.avif` files are
/// labelled `image/avif`. Cache hits go through the plain table.
pub(crate) fn content_type_for_fetched_filename(filename: &str) -> &'static str {
    if filename.ends_with(".avif") {
        return "image/avif";
    }
    content_type_for_filename(filename)
}
