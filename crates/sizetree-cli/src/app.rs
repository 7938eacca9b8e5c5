/// The `sizetree` run loop: resolve inputs, scan, print, export.
use crate::args::{Args, FormatArg};
use crate::prompt::{prompt_max_depth, prompt_root};
use anyhow::{Context, Result};
use sizetree_core::config::{normalize_root, DetailFlags, ScanConfig};
use sizetree_core::model::SortMode;
use sizetree_core::report::{export_csv, write_json, write_text};
use sizetree_core::scan;
use std::io::{self, BufRead, Write};
use tracing::info;

/// Run against the process's stdin, stdout and stderr.
pub fn run(args: Args) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();
    run_with(args, &mut stdin.lock(), &mut stdout.lock(), &mut stderr.lock())
}

/// Run with explicit streams. Only the report goes to `out`; prompts and
/// the errors notice go to `err` so a JSON report stays parseable.
pub fn run_with<R: BufRead, W: Write, E: Write>(
    args: Args,
    input: &mut R,
    out: &mut W,
    err: &mut E,
) -> Result<()> {
    let config = build_config(&args, input, err)?;
    info!("Configuration: {config:?}");

    let report = scan(&config).context("scan failed")?;

    match args.format {
        FormatArg::Text => write_text(&report.tree, config.detail, config.width, out)?,
        FormatArg::Json => write_json(&report.tree, out)?,
    }

    if let Some(csv_path) = &args.csv {
        export_csv(&report.table, csv_path)
            .with_context(|| format!("failed to write {}", csv_path.display()))?;
        info!("Size table written to {}", csv_path.display());
    }

    out.flush()?;

    if report.has_errors() {
        writeln!(
            err,
            "\nErrors occurred during the scan, see {}",
            args.error_log.display()
        )?;
        err.flush()?;
    }
    Ok(())
}

/// Merge flags and prompt answers into a validated-later [`ScanConfig`].
fn build_config<R: BufRead, W: Write>(
    args: &Args,
    input: &mut R,
    prompts: &mut W,
) -> Result<ScanConfig> {
    let root = match &args.path {
        Some(path) => normalize_root(path)?,
        None => prompt_root(input, prompts)?,
    };
    let max_depth = match args.max_depth {
        Some(depth) => depth,
        None => prompt_max_depth(input, prompts)?,
    };

    let mut config = ScanConfig::new(root, max_depth);
    let sort = SortMode::from(args.sort);
    config.sort = sort;
    config.direction = if args.reverse {
        sort.natural_direction().reversed()
    } else {
        sort.natural_direction()
    };
    config.detail = DetailFlags {
        category: args.detail,
        extension: args.detail_ext,
        mimetype: args.detail_mimetype,
    };
    config.error_log = Some(args.error_log.clone());
    config.width = args.width;
    Ok(config)
}
