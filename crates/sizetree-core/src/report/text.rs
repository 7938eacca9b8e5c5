/// Fixed-width text report.
///
/// ```text
/// ----------------------------------------------------------------------
/// data
/// 30 B
/// doc:10 B, video:20 B
/// ----------------------------------------------------------------------
///    sub
///    20 B
/// ----------------------------------------------------------------------
/// ```
///
/// Every node prints its name, its size and the requested detail lines,
/// indented three columns per level and wrapped to the report width, then
/// a full-width rule.
use crate::config::DetailFlags;
use crate::model::size::format_size;
use crate::model::{ClassificationBreakdown, SizeTree};
use std::io::{self, Write};
use textwrap::Options;

const INDENT_STEP: usize = 3;

/// Shown in place of the empty extension key.
const NO_EXTENSION: &str = "(no extension)";

/// Render the whole tree, in its current child order, into a string.
pub fn render_text(tree: &SizeTree, detail: DetailFlags, width: usize) -> String {
    let mut out = Vec::new();
    write_text(tree, detail, width, &mut out).expect("writing into a Vec cannot fail");
    String::from_utf8_lossy(&out).into_owned()
}

pub fn write_text<W: Write>(
    tree: &SizeTree,
    detail: DetailFlags,
    width: usize,
    out: &mut W,
) -> io::Result<()> {
    let width = width.max(1);
    let rule = "-".repeat(width);
    writeln!(out, "{rule}")?;

    for (idx, level) in tree.preorder() {
        let node = tree.node(idx);
        // Deep levels stop indenting at half the width so text still fits.
        let indent = " ".repeat((level * INDENT_STEP).min(width / 2));

        for line in wrap(&node.name, &indent, width) {
            writeln!(out, "{line}")?;
        }
        writeln!(out, "{indent}{}", format_size(node.size))?;

        for line in detail_lines(&node.detail, detail) {
            for wrapped in wrap(&line, &indent, width) {
                writeln!(out, "{wrapped}")?;
            }
        }
        writeln!(out, "{rule}")?;
    }
    Ok(())
}

/// One joined `label:size` line per enabled tally that has non-zero bytes.
fn detail_lines(breakdown: &ClassificationBreakdown, flags: DetailFlags) -> Vec<String> {
    let mut lines = Vec::new();

    if flags.category {
        let mut pairs: Vec<(&str, u64)> = breakdown
            .category
            .iter()
            .map(|(category, &bytes)| (category.label(), bytes))
            .collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        lines.extend(join_pairs(pairs));
    }
    if flags.extension {
        let pairs = breakdown.extension.iter().map(|(ext, &bytes)| {
            let label = if ext.is_empty() { NO_EXTENSION } else { ext.as_str() };
            (label, bytes)
        });
        lines.extend(join_pairs(pairs));
    }
    if flags.mimetype {
        let pairs = breakdown
            .mimetype
            .iter()
            .map(|(mimetype, &bytes)| (mimetype.as_str(), bytes));
        lines.extend(join_pairs(pairs));
    }

    lines
}

fn join_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, u64)>) -> Option<String> {
    let parts: Vec<String> = pairs
        .into_iter()
        .filter(|&(_, bytes)| bytes > 0)
        .map(|(label, bytes)| format!("{label}:{}", format_size(bytes)))
        .collect();
    (!parts.is_empty()).then(|| parts.join(", "))
}

fn wrap(text: &str, indent: &str, width: usize) -> Vec<String> {
    let options = Options::new(width)
        .initial_indent(indent)
        .subsequent_indent(indent);
    textwrap::wrap(text, options)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}
