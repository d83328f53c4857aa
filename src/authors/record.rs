use std::fmt;

use indexmap::IndexMap;
use serde_yaml::{Number, Value};

use super::{kind, string_key, AuthorsError};

/// A single field value. Kept as the kind it was loaded as so that writing
/// it back does not turn `true` into `'true'` or `1.0` into `1`.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

/// One author's fields, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthorRecord {
    fields: IndexMap<String, Scalar>,
}

impl AuthorRecord {
    /// A bare `username:` with no fields is an empty record.
    pub(super) fn from_value(username: &str, value: &Value) -> Result<Self, AuthorsError> {
        let mapping = match value {
            Value::Null => return Ok(Self::default()),
            Value::Mapping(m) => m,
            other => {
                return Err(AuthorsError::NotAMapping {
                    context: format!("author `{}`", username),
                    found: kind(other),
                })
            }
        };
        let mut fields = IndexMap::with_capacity(mapping.len());
        for (key, value) in mapping {
            let field = string_key(key)?;
            let scalar = match value {
                Value::Null => Scalar::Null,
                Value::Bool(b) => Scalar::Bool(*b),
                Value::Number(n) => Scalar::Number(n.clone()),
                Value::String(s) => Scalar::String(s.clone()),
                other => {
                    return Err(AuthorsError::NonScalarField {
                        username: username.to_string(),
                        field,
                        found: kind(other),
                    })
                }
            };
            fields.insert(field, scalar);
        }
        Ok(Self { fields })
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl fmt::Display for Scalar {
    /// Renders as a YAML scalar that loads back to the same value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("~"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::String(s) => f.write_str(&yaml_str(s)),
        }
    }
}

/// Plain when the text reads back as the same string, quoted otherwise.
/// e.g. `octocat` stays as is, `true` becomes `'true'`, `a: b` becomes `'a: b'`.
pub fn yaml_str(s: &str) -> String {
    if is_plain(s) {
        return s.to_string();
    }
    if s.chars().any(needs_escape) {
        double_quoted(s)
    } else {
        format!("'{}'", s.replace('\'', "''"))
    }
}

fn is_plain(s: &str) -> bool {
    if s.is_empty() || s.chars().any(needs_escape) {
        return false;
    }
    match serde_yaml::from_str::<Value>(s) {
        Ok(Value::String(parsed)) => parsed == s,
        _ => false,
    }
}

/// Characters a YAML reader treats as line breaks or drops, besides the C0/C1 controls.
fn needs_escape(c: char) -> bool {
    c.is_control() || matches!(c, '\u{2028}' | '\u{2029}' | '\u{feff}')
}

fn double_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if needs_escape(c) => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
