use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::record::{yaml_str, AuthorRecord};
use super::{AuthorsError, AuthorsTable};

/// Written at the top of the file on every rewrite.
pub const HEADER: &str = "\
# yaml-language-server: $schema=./.github/authors_schema.json
# Authors mapping: GitHub username -> Author details
# This file maps author GitHub usernames (used in registry.yaml) to their full details
# for display on the website.

";

impl AuthorsTable {
    /// The file contents for this table, in its current order.
    ///
    /// ```text
    /// <username>:
    ///   <field>: <value>
    /// ```
    ///
    /// Fails when an entry is not a flat mapping of scalar fields, before
    /// anything is written.
    pub fn to_yaml(&self) -> Result<String, AuthorsError> {
        let mut s = String::from(HEADER);
        for (username, value) in self.iter() {
            let record = AuthorRecord::from_value(username, value)?;
            s.push_str(&format!("{}:\n", yaml_str(username)));
            for (field, value) in record.fields() {
                s.push_str(&format!("  {}: {}\n", yaml_str(field), value));
            }
        }
        Ok(s)
    }

    /// Overwrites `path`. No backup is kept.
    pub fn write(&self, path: &Path) -> Result<()> {
        let contents = self.to_yaml()?;
        fs::write(path, contents)
            .with_context(|| format!("{}: Failed to write file", path.display()))?;
        info!(path = %path.display(), n = self.len(), "Wrote authors");
        Ok(())
    }
}
