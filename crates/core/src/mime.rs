//! MIME type detection from transport metadata and URL extensions.
//!
//! The detector never fails: when neither the content-type header nor the
//! URL extension gives an answer it degrades to `application/octet-stream`.
//! Downstream normalization does not trust this value for correctness, only
//! for diagnostics and the model payload.

/// Well-known extensions, a superset of what upload clients typically send.
const EXTENSION_TABLE: &[(&str, &str)] = &[
    // Audio
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("m4a", "audio/mp4"),
    ("mp4", "audio/mp4"),
    ("webm", "audio/webm"),
    ("ogg", "audio/ogg"),
    ("oga", "audio/ogg"),
    ("opus", "audio/opus"),
    ("aac", "audio/aac"),
    ("flac", "audio/flac"),
    ("amr", "audio/amr"),
    ("3gp", "audio/3gpp"),
    // Images
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("heic", "image/heic"),
    ("heif", "image/heif"),
    ("bmp", "image/bmp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    // Text
    ("txt", "text/plain"),
    ("json", "application/json"),
    ("pdf", "application/pdf"),
];

/// Generic binary type returned when nothing else matches.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Detects a canonical MIME type for a remote file.
///
/// Resolution order, first match wins:
/// 1. The content-type header, with parameters stripped.
/// 2. The URL path extension, looked up in the extension table.
/// 3. `application/octet-stream`.
pub fn detect_mime_type(url: &str, content_type: Option<&str>) -> String {
    if let Some(header) = content_type {
        let mime = mime_from_header(header);
        if !mime.is_empty() {
            return mime;
        }
    }

    if let Some(ext) = extension_from_url(url) {
        if let Some((_, mime)) = EXTENSION_TABLE.iter().find(|(e, _)| *e == ext) {
            return (*mime).to_string();
        }
    }

    OCTET_STREAM.to_string()
}

/// Strips parameters (anything after `;`) from a content-type header value.
fn mime_from_header(header: &str) -> String {
    header
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Extracts the lowercased file extension from a URL path, ignoring query
/// string and fragment.
fn extension_from_url(url: &str) -> Option<String> {
    let path = url
        .split(['?', '#'])
        .next()
        .unwrap_or(url);
    let segment = path.rsplit('/').next().unwrap_or(path);
    let (stem, ext) = segment.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_takes_precedence() {
        let mime = detect_mime_type("https://cdn.example.com/rec.mp3", Some("audio/ogg"));
        assert_eq!(mime, "audio/ogg");
    }

    #[test]
    fn test_header_parameters_stripped() {
        let mime = detect_mime_type(
            "https://cdn.example.com/scan",
            Some("image/png; charset=binary"),
        );
        assert_eq!(mime, "image/png");
    }

    #[test]
    fn test_empty_header_falls_through_to_extension() {
        let mime = detect_mime_type("https://cdn.example.com/rec.flac", Some("  "));
        assert_eq!(mime, "audio/flac");
    }

    #[test]
    fn test_extension_lookup() {
        assert_eq!(
            detect_mime_type("https://cdn.example.com/a/b/voice.m4a", None),
            "audio/mp4"
        );
        assert_eq!(
            detect_mime_type("https://cdn.example.com/scan.HEIC", None),
            "image/heic"
        );
        assert_eq!(
            detect_mime_type("https://cdn.example.com/rec.ogg", None),
            "audio/ogg"
        );
        assert_eq!(
            detect_mime_type("https://cdn.example.com/scan.webp", None),
            "image/webp"
        );
    }

    #[test]
    fn test_extension_ignores_query_string() {
        let mime = detect_mime_type("https://cdn.example.com/rec.wav?token=abc.def", None);
        assert_eq!(mime, "audio/wav");
    }

    #[test]
    fn test_extensionless_url_degrades_to_octet_stream() {
        assert_eq!(detect_mime_type("https://cdn.example.com/blob", None), OCTET_STREAM);
    }

    #[test]
    fn test_unknown_extension_degrades_to_octet_stream() {
        assert_eq!(
            detect_mime_type("https://cdn.example.com/file.xyzzy", None),
            OCTET_STREAM
        );
    }

    #[test]
    fn test_dotfile_has_no_extension() {
        assert_eq!(detect_mime_type("https://cdn.example.com/.hidden", None), OCTET_STREAM);
    }

    #[test]
    fn test_detector_is_idempotent() {
        let url = "https://cdn.example.com/rec.mp3";
        let first = detect_mime_type(url, Some("audio/mpeg; q=1"));
        let second = detect_mime_type(url, Some("audio/mpeg; q=1"));
        assert_eq!(first, second);
    }
}
