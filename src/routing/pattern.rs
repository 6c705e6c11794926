//! Route pattern compilation and matching.
//!
//! # Responsibilities
//! - Tokenize pattern strings into literal and parameter segments
//! - Match a location path against a compiled pattern
//! - Extract route parameters positionally
//!
//! # Design Decisions
//! - Classification happens once at registration (tagged segments),
//!   not per dispatch
//! - A parameter segment matches any single non-empty path segment
//! - Segment counts must match exactly; no wildcard/catch-all support
//! - Matching is case-sensitive

use std::collections::BTreeMap;

use thiserror::Error;

/// Errors raised when compiling a pattern string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern is empty")]
    Empty,

    #[error("pattern {0:?} must start with '/'")]
    MissingLeadingSlash(String),

    #[error("pattern {0:?} contains an empty segment")]
    EmptySegment(String),

    #[error("pattern {0:?} contains a parameter with no name")]
    UnnamedParam(String),
}

/// One segment of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must match the path segment exactly.
    Literal(String),

    /// Matches any single non-empty path segment; the matched value is
    /// recorded under this name (sigil already stripped).
    Param(String),
}

/// A compiled route pattern.
///
/// The root pattern `/` compiles to zero segments and matches only `/`.
#[derive(Debug, Clone)]
pub struct Pattern {
    raw: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Compile a pattern string like `/user-profile/:userId`.
    pub fn compile(raw: &str) -> Result<Self, PatternError> {
        if raw.is_empty() {
            return Err(PatternError::Empty);
        }
        if !raw.starts_with('/') {
            return Err(PatternError::MissingLeadingSlash(raw.to_string()));
        }

        let mut segments = Vec::new();
        if raw != "/" {
            for part in raw[1..].split('/') {
                if part.is_empty() {
                    return Err(PatternError::EmptySegment(raw.to_string()));
                }
                if let Some(name) = part.strip_prefix(':') {
                    if name.is_empty() {
                        return Err(PatternError::UnnamedParam(raw.to_string()));
                    }
                    segments.push(Segment::Param(name.to_string()));
                } else {
                    segments.push(Segment::Literal(part.to_string()));
                }
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The pattern string as registered.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// True if the pattern contains no parameter segments.
    pub fn is_static(&self) -> bool {
        self.segments
            .iter()
            .all(|s| matches!(s, Segment::Literal(_)))
    }

    /// Match a location path against this pattern.
    ///
    /// Returns the extracted parameters on a match, `None` otherwise.
    pub fn matches(&self, path: &str) -> Option<RouteParams> {
        let parts = split_path(path)?;
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) => {
                    if literal.as_str() != part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    params.insert(name.clone(), part.to_string());
                }
            }
        }

        Some(RouteParams(params))
    }
}

/// Split a location path into non-empty segments.
///
/// Returns `None` for malformed paths (no leading slash, empty segment),
/// which simply never match any pattern.
fn split_path(path: &str) -> Option<Vec<&str>> {
    if !path.starts_with('/') {
        return None;
    }
    if path == "/" {
        return Some(Vec::new());
    }
    let parts: Vec<&str> = path[1..].split('/').collect();
    if parts.iter().any(|p| p.is_empty()) {
        return None;
    }
    Some(parts)
}

/// Parameters extracted from a matched location.
///
/// Recomputed on every match and handed to the view factory by value;
/// the router does not retain them after dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams(BTreeMap<String, String>);

impl RouteParams {
    /// Look up a parameter by name (without the `:` sigil).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate parameters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for RouteParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
