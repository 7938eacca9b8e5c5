/// SizeTree CLI: argument parsing, interactive prompts and the run loop
/// that drives `sizetree-core` and prints its reports.
pub mod app;
pub mod args;
pub mod prompt;

pub use app::{run, run_with};
pub use args::Args;
