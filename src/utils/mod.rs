//! Reading numeric columns into series for the command line tool.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use qplot::plots::Series;

/// Read one series per file.
pub fn read_series(file_paths: &[String]) -> Result<Vec<Series>> {
    file_paths.iter().map(|p| read_single_series(p)).collect()
}

/// Read a whitespace separated table and turn it into a series named
/// after the file stem.
pub fn read_single_series(file_path: &str) -> Result<Series> {
    let path = Path::new(file_path);

    if !path.exists() {
        bail!("Data file '{}' does not exist", file_path);
    }

    if !path.is_file() {
        bail!("'{}' is not a file", file_path);
    }

    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file '{}'", file_path))?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_path.to_string());

    parse_series(&name, &text).with_context(|| format!("Invalid data in '{}'", file_path))
}

/// One value per line gives `y` against its index; two or more give `x y`
/// (extra columns are ignored). Blank lines and `#` comments are skipped.
pub fn parse_series(name: &str, text: &str) -> Result<Series> {
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    let mut single_column = None;

    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let values = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|v| !v.is_empty())
            .map(|v| v.parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("line {}: not a number", lineno + 1))?;

        let single = values.len() == 1;
        match single_column {
            None => single_column = Some(single),
            Some(prev) if prev != single => {
                bail!("line {}: column count changed", lineno + 1)
            }
            Some(_) => {}
        }

        if single {
            xs.push(ys.len() as f64);
            ys.push(values[0]);
        } else {
            xs.push(values[0]);
            ys.push(values[1]);
        }
    }

    Ok(Series::new(name, xs, ys))
}
