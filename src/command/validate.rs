use std::fmt;
use std::io::Write;

use anyhow::Result;
use tracing::debug;

use crate::authors::AuthorsTable;
use crate::command::Outcome;

/// Check the loaded order and report. Nothing is written to disk.
pub fn run(table: &AuthorsTable, name: &str, out: &mut impl Write) -> Result<Outcome> {
    if table.is_empty() {
        writeln!(out, "{} is empty", name)?;
        return Ok(Outcome::Empty);
    }
    if table.is_sorted() {
        writeln!(out, "{} is sorted correctly", name)?;
        return Ok(Outcome::Sorted);
    }

    let diff = OrderDiff {
        name,
        current: table.usernames(),
        expected: table.sorted_usernames(),
    };
    debug!(n = diff.mismatches().count(), "Out of place entries");
    writeln!(out, "{}", diff)?;
    writeln!(out, "\nRun with --fix to sort automatically")?;
    Ok(Outcome::Unsorted)
}

/// Position-by-position comparison of the loaded order against the sorted one.
/// One moved entry shifts everything between its old and new position, and each
/// of those positions is listed.
pub struct OrderDiff<'a> {
    pub name: &'a str,
    pub current: Vec<&'a str>,
    pub expected: Vec<&'a str>,
}

impl<'a> OrderDiff<'a> {
    /// (position, got, expected) for every position that differs.
    pub fn mismatches(&self) -> impl Iterator<Item = (usize, &'a str, &'a str)> + '_ {
        self.current
            .iter()
            .zip(self.expected.iter())
            .enumerate()
            .filter(|(_, (got, want))| got != want)
            .map(|(i, (got, want))| (i, *got, *want))
    }
}

impl fmt::Display for OrderDiff<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} is not sorted alphabetically (case-insensitive).", self.name)?;
        writeln!(f, "\nCurrent order:")?;
        for k in &self.current {
            writeln!(f, "  {}", k)?;
        }
        writeln!(f, "\nExpected order:")?;
        for k in &self.expected {
            writeln!(f, "  {}", k)?;
        }
        write!(f, "\nOut of place entries:")?;
        for (i, got, want) in self.mismatches() {
            write!(f, "\n  Position {}: got '{}', expected '{}'", i, got, want)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn validate(yaml: &str) -> Result<(Outcome, String)> {
        let table = AuthorsTable::from_yaml(yaml)?;
        let mut out = Vec::new();
        let outcome = run(&table, "authors.yaml", &mut out)?;
        Ok((outcome, String::from_utf8(out)?))
    }

    #[test]
    fn test_sorted() -> Result<()> {
        let (outcome, out) = validate("alice:\n  name: A\nBob:\n  name: B\n")?;
        assert_eq!(outcome, Outcome::Sorted);
        assert_eq!(out, "authors.yaml is sorted correctly\n");
        Ok(())
    }

    #[test]
    fn test_sorted_with_nested_fields() -> Result<()> {
        let (outcome, out) =
            validate("alice:\n  name: A\n  links: [x, y]\nbob: Bob B\ncarol:\n  social: {gh: c}\n")?;
        assert_eq!(outcome, Outcome::Sorted);
        assert_eq!(out, "authors.yaml is sorted correctly\n");
        Ok(())
    }

    #[test]
    fn test_empty() -> Result<()> {
        let (outcome, out) = validate("")?;
        assert_eq!(outcome, Outcome::Empty);
        assert!(outcome.is_success());
        assert_eq!(out, "authors.yaml is empty\n");
        Ok(())
    }

    #[test]
    fn test_unsorted_report() -> Result<()> {
        let (outcome, out) = validate("Zoe:\n  name: Z\namy:\n  name: A\nBob:\n  name: B\n")?;
        assert_eq!(outcome, Outcome::Unsorted);
        assert!(!outcome.is_success());
        let expected = "\
authors.yaml is not sorted alphabetically (case-insensitive).

Current order:
  Zoe
  amy
  Bob

Expected order:
  amy
  Bob
  Zoe

Out of place entries:
  Position 0: got 'Zoe', expected 'amy'
  Position 1: got 'amy', expected 'Bob'
  Position 2: got 'Bob', expected 'Zoe'

Run with --fix to sort automatically
";
        assert_eq!(out, expected);
        Ok(())
    }

    #[test]
    fn test_lists_every_mismatch() {
        // One entry moved from the end to the front shifts every position.
        let diff = OrderDiff {
            name: "authors.yaml",
            current: vec!["e", "a", "b", "c", "d"],
            expected: vec!["a", "b", "c", "d", "e"],
        };
        let positions: Vec<usize> = diff.mismatches().map(|(i, _, _)| i).collect();
        assert_eq!(positions, vec![0, 1, 2, 3, 4]);

        let diff = OrderDiff {
            name: "authors.yaml",
            current: vec!["a", "c", "b", "d"],
            expected: vec!["a", "b", "c", "d"],
        };
        let mismatches: Vec<_> = diff.mismatches().collect();
        assert_eq!(mismatches, vec![(1, "c", "b"), (2, "b", "c")]);
    }
}
