use std::fmt::Write as _;

use thiserror::Error;

/// One step into a JSON document: an object key or an array index.
/// Paths run root-to-leaf; the empty path is the document root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Segment::Key(key.to_string())
    }
}

impl From<String> for Segment {
    fn from(key: String) -> Self {
        Segment::Key(key)
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Segment::Index(index)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("expected '[' at \"{0}\"")]
    ExpectedBracket(String),
    #[error("unclosed '[' at \"{0}\"")]
    UnclosedBracket(String),
    #[error("invalid array index \"{0}\"")]
    BadIndex(String),
}

/// Render a path as its display locator, e.g. `$["users"][2]["name"]`.
/// String segments are double-quoted, indices are bare integers.
pub fn format_path(path: &[Segment]) -> String {
    let mut out = String::from("$");
    for seg in path {
        match seg {
            Segment::Key(key) => {
                write!(&mut out, "[\"{}\"]", key).ok();
            }
            Segment::Index(index) => {
                write!(&mut out, "[{}]", index).ok();
            }
        }
    }
    out
}

/// Parse the locator notation back into segments. Accepts the output of
/// [`format_path`] with or without the leading `$`. Keys containing `"` or
/// `]` are outside the notation's grammar.
pub fn parse_path(input: &str) -> Result<Vec<Segment>, PathError> {
    let mut rest = input.trim();
    rest = rest.strip_prefix('$').unwrap_or(rest);
    let mut out = Vec::new();
    while !rest.is_empty() {
        let inner = rest
            .strip_prefix('[')
            .ok_or_else(|| PathError::ExpectedBracket(rest.to_string()))?;
        let end = inner
            .find(']')
            .ok_or_else(|| PathError::UnclosedBracket(rest.to_string()))?;
        let token = &inner[..end];
        if let Some(key) = token.strip_prefix('"').and_then(|t| t.strip_suffix('"')) {
            out.push(Segment::Key(key.to_string()));
        } else {
            let index: usize = token
                .parse()
                .map_err(|_| PathError::BadIndex(token.to_string()))?;
            out.push(Segment::Index(index));
        }
        rest = &inner[end + 1..];
    }
    Ok(out)
}
