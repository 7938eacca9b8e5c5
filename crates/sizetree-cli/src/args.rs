use clap::{ArgAction, Parser, ValueEnum};
use sizetree_core::config::{parse_max_depth, DEFAULT_WIDTH};
use sizetree_core::model::SortMode;
use sizetree_core::scanner::DEFAULT_ERROR_LOG;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum SortArg {
    #[default]
    Name,
    Size,
}

impl From<SortArg> for SortMode {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => SortMode::Name,
            SortArg::Size => SortMode::Size,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum FormatArg {
    #[default]
    Text,
    Json,
}

/// Top-level CLI arguments parsed via clap.
#[derive(Parser, Debug)]
#[command(
    name = "sizetree",
    version,
    about = "Disk usage by directory, as a sorted tree with optional breakdowns by file category, extension and MIME type"
)]
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// Directory to measure. Asked for interactively when omitted.
    pub path: Option<String>,

    /// Directory levels below PATH that get their own entry. Asked for
    /// interactively when omitted.
    #[arg(short = 'l', long, allow_hyphen_values = true, value_parser = parse_depth)]
    pub max_depth: Option<usize>,

    /// Order children by name or by size.
    #[arg(short, long, value_enum, default_value_t = SortArg::Name)]
    pub sort: SortArg,

    /// Reverse the sort (names Z→A, sizes smallest first).
    #[arg(short, long)]
    pub reverse: bool,

    /// Print bytes per file category under each directory.
    #[arg(short, long)]
    pub detail: bool,

    /// Print bytes per file extension under each directory.
    #[arg(short = 'e', long)]
    pub detail_ext: bool,

    /// Print bytes per MIME type under each directory.
    #[arg(short = 'm', long)]
    pub detail_mimetype: bool,

    /// Output format for the report.
    #[arg(short, long, value_enum, default_value_t = FormatArg::Text)]
    pub format: FormatArg,

    /// Also write the flat `path,size,depth` table to this CSV file.
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Where scan failures are traced.
    #[arg(long, value_name = "FILE", default_value = DEFAULT_ERROR_LOG)]
    pub error_log: PathBuf,

    /// Report width in columns.
    #[arg(short, long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// More log output on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Maximum tracing level for the configured verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

fn parse_depth(s: &str) -> Result<usize, String> {
    parse_max_depth(s).map_err(|e| e.to_string())
}
