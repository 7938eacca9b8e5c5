/// MIME type guessing from file names.
use std::path::Path;

/// Key used when no MIME type can be guessed.
pub const UNDEFINED_MIMETYPE: &str = "undefined";

/// Guess the MIME type of `path` from its file name alone.
///
/// The file is never opened. Unknown or missing extensions yield
/// [`UNDEFINED_MIMETYPE`].
pub fn classify_by_mimetype(path: &Path) -> &'static str {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(UNDEFINED_MIMETYPE)
}
