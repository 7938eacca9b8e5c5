/// Interactive fallbacks for inputs not given on the command line.
use anyhow::{bail, Context, Result};
use sizetree_core::config::{normalize_root, parse_max_depth};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Ask a question and read one line back, without the line ending.
fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> Result<String> {
    write!(out, "{question}")?;
    out.flush()?;
    let mut line = String::new();
    let read = input.read_line(&mut line).context("failed to read input")?;
    if read == 0 {
        bail!("input closed before an answer to {:?} was given", question.trim_end());
    }
    Ok(line)
}

pub fn prompt_root<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<PathBuf> {
    let answer = ask(input, out, "Directory path: ")?;
    Ok(normalize_root(&answer)?)
}

pub fn prompt_max_depth<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<usize> {
    let answer = ask(input, out, "Maximum depth: ")?;
    Ok(parse_max_depth(&answer)?)
}
