//! Route pattern compiler and matcher.
//!
//! A pattern string is compiled once, at registration time, into a
//! [`PathPattern`]; matching a request path against it is then a single
//! left-to-right walk with no backtracking.
//!
//! # Pattern syntax
//!
//! | token | meaning |
//! |---|---|
//! | `*` (whole pattern) | matches any path; binds the full path string to the implicit `matchAll` parameter |
//! | `literal` | must equal the corresponding path segment exactly |
//! | `:name` | binds exactly one path segment to `name` |
//! | `:name+` | binds one-or-more remaining segments (joined by `/`) to `name`; greedy, bounded by the mandatory segments after it |
//! | `(...)` | the wrapped segment suffix is optional as a whole; when absent, its parameters bind absent |
//! | trailing `/` | requires a trailing slash in the path (permits one, for wildcard-terminated patterns) |
//!
//! The empty pattern matches only the empty path. At most one `:name+`
//! wildcard may appear per pattern, counting group contents.

use gantry_core::{PathParams, PatternError};

/// One `/`-delimited unit of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Must equal the path segment verbatim.
    Literal(String),
    /// Binds exactly one path segment.
    Named(String),
    /// Binds one-or-more remaining path segments, joined by `/`.
    Wildcard(String),
    /// An optional run of segments; bound absent when the path ends first.
    Optional(Vec<PathSegment>),
}

#[derive(Debug, Clone)]
enum PatternKind {
    MatchAll,
    Segments {
        absolute: bool,
        segments: Vec<PathSegment>,
        trailing_slash: bool,
    },
}

/// A compiled route pattern.
#[derive(Debug, Clone)]
pub struct PathPattern {
    raw: String,
    kind: PatternKind,
}

/// A successful pattern match: the ordered parameter bindings and, for
/// wildcard-terminated patterns, the match-all remainder (the full original
/// path string, slashes and encoding preserved).
#[derive(Debug)]
pub struct PatternMatch {
    /// Extracted parameter bindings, in pattern order.
    pub params: PathParams,
    /// The full original path, when the pattern captures a match-all.
    pub match_all: Option<String>,
}

impl PathPattern {
    /// Compile a pattern string.
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        if pattern == "*" {
            return Ok(Self {
                raw: pattern.to_owned(),
                kind: PatternKind::MatchAll,
            });
        }

        let absolute = pattern.starts_with('/');
        let body = if absolute { &pattern[1..] } else { pattern };
        let trailing_slash = body.ends_with('/');
        let body = if trailing_slash {
            &body[..body.len() - 1]
        } else {
            body
        };

        let mut segments = Vec::new();
        if !body.is_empty() {
            for part in split_top_level(body, pattern)? {
                parse_part(part, pattern, &mut segments)?;
            }
        }

        if wildcard_count(&segments) > 1 {
            return Err(PatternError::CompetingWildcards(pattern.to_owned()));
        }

        Ok(Self {
            raw: pattern.to_owned(),
            kind: PatternKind::Segments {
                absolute,
                segments,
                trailing_slash,
            },
        })
    }

    /// The pattern string this was compiled from.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Whether this is the `*` catch-all pattern.
    pub fn is_match_all(&self) -> bool {
        matches!(self.kind, PatternKind::MatchAll)
    }

    /// Match a request path. `None` means the path does not structurally
    /// match this pattern.
    pub fn matches(&self, path: &str) -> Option<PatternMatch> {
        match &self.kind {
            PatternKind::MatchAll => Some(PatternMatch {
                params: PathParams::default(),
                match_all: Some(path.to_owned()),
            }),
            PatternKind::Segments {
                absolute,
                segments,
                trailing_slash,
            } => {
                let (path_absolute, path_segments, path_trailing) = split_path(path);
                if path_absolute != *absolute {
                    return None;
                }

                let wildcard_terminated = ends_in_wildcard(segments);
                if *trailing_slash {
                    if !path_trailing && !wildcard_terminated {
                        return None;
                    }
                } else if path_trailing {
                    return None;
                }

                let mut params = PathParams::default();
                let view: Vec<&PathSegment> = segments.iter().collect();
                if !match_segments(&view, &path_segments, &mut params) {
                    return None;
                }

                let match_all = wildcard_terminated.then(|| path.to_owned());
                Some(PatternMatch { params, match_all })
            }
        }
    }
}

/// Split a request path into (absolute, segments, trailing-slash). The
/// empty leading segment of an absolute path and the empty trailing
/// segment of a `/`-terminated path become flags rather than segments.
fn split_path(path: &str) -> (bool, Vec<&str>, bool) {
    let absolute = path.starts_with('/');
    let body = if absolute { &path[1..] } else { path };
    let trailing = body.ends_with('/');
    let body = if trailing { &body[..body.len() - 1] } else { body };
    let segments = if body.is_empty() {
        Vec::new()
    } else {
        body.split('/').collect()
    };
    (absolute, segments, trailing)
}

/// Split a pattern body on `/` at parenthesis depth zero, so group
/// contents stay attached to their part.
fn split_top_level<'a>(body: &'a str, raw: &str) -> Result<Vec<&'a str>, PatternError> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (idx, c) in body.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| PatternError::UnbalancedGroup(raw.to_owned()))?;
            }
            '/' if depth == 0 => {
                parts.push(&body[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(PatternError::UnbalancedGroup(raw.to_owned()));
    }
    parts.push(&body[start..]);
    Ok(parts)
}

/// Parse one top-level part, which is either a plain segment or a segment
/// immediately followed by an optional group, e.g. `:module(/:path+)`.
fn parse_part(
    part: &str,
    raw: &str,
    segments: &mut Vec<PathSegment>,
) -> Result<(), PatternError> {
    match part.find('(') {
        None => {
            segments.push(parse_simple(part));
            Ok(())
        }
        Some(idx) => {
            if !part.ends_with(')') {
                return Err(PatternError::UnbalancedGroup(raw.to_owned()));
            }
            let head = &part[..idx];
            let inner = &part[idx + 1..part.len() - 1];
            if !head.is_empty() {
                segments.push(parse_simple(head));
            }
            segments.push(PathSegment::Optional(parse_group(inner, raw)?));
            Ok(())
        }
    }
}

fn parse_group(inner: &str, raw: &str) -> Result<Vec<PathSegment>, PatternError> {
    let inner = inner.strip_prefix('/').unwrap_or(inner);
    let mut segments = Vec::new();
    for part in split_top_level(inner, raw)? {
        if part.is_empty() {
            continue;
        }
        parse_part(part, raw, &mut segments)?;
    }
    Ok(segments)
}

fn parse_simple(part: &str) -> PathSegment {
    match part.strip_prefix(':') {
        Some(name) => match name.strip_suffix('+') {
            Some(name) => PathSegment::Wildcard(name.to_owned()),
            None => PathSegment::Named(name.to_owned()),
        },
        None => PathSegment::Literal(part.to_owned()),
    }
}

fn wildcard_count(segments: &[PathSegment]) -> usize {
    segments
        .iter()
        .map(|segment| match segment {
            PathSegment::Wildcard(_) => 1,
            PathSegment::Optional(group) => wildcard_count(group),
            _ => 0,
        })
        .sum()
}

fn ends_in_wildcard(segments: &[PathSegment]) -> bool {
    match segments.last() {
        Some(PathSegment::Wildcard(_)) => true,
        Some(PathSegment::Optional(group)) => ends_in_wildcard(group),
        _ => false,
    }
}

/// Mandatory path segments the remaining pattern still requires; segments
/// inside optional groups are not mandatory. Bounds wildcard greediness.
fn required_tail(segments: &[&PathSegment]) -> usize {
    segments
        .iter()
        .map(|segment| match segment {
            PathSegment::Optional(_) => 0,
            _ => 1,
        })
        .sum()
}

fn match_segments(segments: &[&PathSegment], path: &[&str], params: &mut PathParams) -> bool {
    let Some((first, rest)) = segments.split_first() else {
        return path.is_empty();
    };
    match first {
        PathSegment::Literal(literal) => match path.split_first() {
            Some((head, tail)) if *head == literal.as_str() => {
                match_segments(rest, tail, params)
            }
            _ => false,
        },
        PathSegment::Named(name) => match path.split_first() {
            Some((head, tail)) => {
                params.push(name.clone(), Some((*head).to_owned()));
                match_segments(rest, tail, params)
            }
            None => false,
        },
        PathSegment::Wildcard(name) => {
            let required = required_tail(rest);
            if path.len() < required + 1 {
                return false;
            }
            let take = path.len() - required;
            params.push(name.clone(), Some(path[..take].join("/")));
            match_segments(rest, &path[take..], params)
        }
        PathSegment::Optional(group) => {
            if path.is_empty() {
                bind_absent(group, params);
                match_segments(rest, path, params)
            } else {
                let mut view: Vec<&PathSegment> = group.iter().collect();
                view.extend_from_slice(rest);
                match_segments(&view, path, params)
            }
        }
    }
}

/// Bind every parameter inside an unvisited optional group to absent.
fn bind_absent(group: &[PathSegment], params: &mut PathParams) {
    for segment in group {
        match segment {
            PathSegment::Named(name) | PathSegment::Wildcard(name) => {
                params.push(name.clone(), None);
            }
            PathSegment::Optional(nested) => bind_absent(nested, params),
            PathSegment::Literal(_) => {}
        }
    }
}
