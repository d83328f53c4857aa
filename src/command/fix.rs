use std::io::Write;
use std::path::Path;

use anyhow::Result;

use crate::authors::AuthorsTable;
use crate::command::Outcome;

/// Rewrite `path` with entries in case-insensitive username order.
/// An empty table leaves the file untouched.
pub fn run(
    table: &AuthorsTable,
    path: &Path,
    name: &str,
    out: &mut impl Write,
) -> Result<Outcome> {
    if table.is_empty() {
        writeln!(out, "{} is empty", name)?;
        return Ok(Outcome::Empty);
    }
    table.sorted().write(path)?;
    writeln!(out, "{} sorted successfully", name)?;
    Ok(Outcome::Fixed)
}
