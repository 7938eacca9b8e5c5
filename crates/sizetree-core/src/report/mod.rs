/// Rendering of scan results: the indented text report, a JSON view of the
/// tree and a CSV export of the flat size table.
pub mod csv;
pub mod json;
pub mod text;

pub use self::csv::{export_csv, write_csv};
pub use json::{render_json, write_json};
pub use text::{render_text, write_text};
