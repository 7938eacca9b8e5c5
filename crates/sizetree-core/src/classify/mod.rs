/// Classifier: pure functions mapping a file to its category, extension
/// key and guessed MIME type.
pub mod category;
pub mod mime;

pub use category::{classify_by_category, extension_key, Category};
pub use mime::{classify_by_mimetype, UNDEFINED_MIMETYPE};
