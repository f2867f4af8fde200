use std::collections::HashSet;
use std::ops::Range;
use std::sync::Arc;

use super::constraint::Constraint;
use crate::error::PatternError;

/// Kind of a special pattern segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// `:name`
    Param,
    /// `:name?` (with or without a constraint)
    OptionalParam,
    /// `*name`
    CatchAll,
    /// `:name(expr)`
    RegexParam,
}

/// One wildcard segment found in a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WildcardSegment {
    /// Segment kind
    pub kind: SegmentKind,
    /// Bytes occupied in the source pattern, markers included
    pub range: Range<usize>,
    /// Bound parameter name
    pub name: Arc<str>,
    /// Attached constraint, if any
    pub constraint: Option<Constraint>,
}

impl WildcardSegment {
    /// `true` for `:name?` segments.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.kind == SegmentKind::OptionalParam
    }
}

/// Element of a concrete (optional-free) pattern, ready for tree insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    /// Literal text matched byte for byte
    Static(String),
    /// One path segment, optionally constrained
    Param {
        /// Bound name
        name: Arc<str>,
        /// Constraint the captured text must satisfy
        constraint: Option<Constraint>,
    },
    /// Remainder of the path
    CatchAll {
        /// Bound name
        name: Arc<str>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(Range<usize>),
    Wildcard(usize),
}

/// Parsed route pattern: literal runs interleaved with wildcard descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPattern {
    source: String,
    tokens: Vec<Token>,
    wildcards: Vec<WildcardSegment>,
}

impl CompiledPattern {
    /// Pattern text as compiled.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Wildcard descriptors, left to right.
    #[must_use]
    pub fn wildcards(&self) -> &[WildcardSegment] {
        &self.wildcards
    }

    /// Literal runs between wildcards, left to right.
    pub fn literals(&self) -> impl Iterator<Item = &str> + '_ {
        self.tokens.iter().filter_map(|t| match t {
            Token::Literal(range) => Some(&self.source[range.clone()]),
            Token::Wildcard(_) => None,
        })
    }

    /// `true` when at least one `:name?` segment is present.
    #[must_use]
    pub fn has_optional(&self) -> bool {
        self.wildcards.iter().any(WildcardSegment::is_optional)
    }

    /// `true` when the pattern ends in `*name`.
    #[must_use]
    pub fn ends_with_catch_all(&self) -> bool {
        self.wildcards
            .last()
            .is_some_and(|w| w.kind == SegmentKind::CatchAll)
    }

    /// Insertion pieces. Optional markers are ignored, so call this on expansions.
    #[must_use]
    pub fn pieces(&self) -> Vec<Piece> {
        self.tokens
            .iter()
            .map(|token| match token {
                Token::Literal(range) => Piece::Static(self.source[range.clone()].to_owned()),
                Token::Wildcard(i) => {
                    let w = &self.wildcards[*i];
                    match w.kind {
                        SegmentKind::CatchAll => Piece::CatchAll {
                            name: Arc::clone(&w.name),
                        },
                        _ => Piece::Param {
                            name: Arc::clone(&w.name),
                            constraint: w.constraint.clone(),
                        },
                    }
                }
            })
            .collect()
    }
}

/// Parse and validate a route pattern.
///
/// ```rust
/// use brrtrouter_radix::pattern::{compile, SegmentKind};
///
/// let p = compile("/files/:kind([a-z]+)/*path").unwrap();
/// let kinds: Vec<_> = p.wildcards().iter().map(|w| w.kind).collect();
/// assert_eq!(kinds, [SegmentKind::RegexParam, SegmentKind::CatchAll]);
/// ```
pub fn compile(pattern: &str) -> Result<CompiledPattern, PatternError> {
    let bytes = pattern.as_bytes();
    let mut tokens = Vec::new();
    let mut wildcards: Vec<WildcardSegment> = Vec::new();
    let mut names: HashSet<Arc<str>> = HashSet::new();
    let mut catch_all_end: Option<usize> = None;

    let mut literal_start = 0;
    let mut i = 0;
    while i < bytes.len() {
        let sigil = bytes[i];
        if sigil != b':' && sigil != b'*' {
            i += 1;
            continue;
        }

        if literal_start < i {
            tokens.push(Token::Literal(literal_start..i));
        }

        let segment = if sigil == b':' {
            parse_param(pattern, i)?
        } else {
            if catch_all_end.is_some() {
                return Err(PatternError::DuplicateCatchAll {
                    pattern: pattern.to_owned(),
                });
            }
            let name_end = parse_name(pattern, i)?;
            if i == 0 || bytes[i - 1] != b'/' {
                return Err(PatternError::CatchAllNotAtSegmentStart {
                    pattern: pattern.to_owned(),
                    name: pattern[i + 1..name_end].to_owned(),
                });
            }
            catch_all_end = Some(name_end);
            WildcardSegment {
                kind: SegmentKind::CatchAll,
                range: i..name_end,
                name: Arc::from(&pattern[i + 1..name_end]),
                constraint: None,
            }
        };

        if !names.insert(Arc::clone(&segment.name)) {
            return Err(PatternError::DuplicateParamName {
                pattern: pattern.to_owned(),
                name: segment.name.to_string(),
            });
        }

        i = segment.range.end;
        literal_start = i;
        tokens.push(Token::Wildcard(wildcards.len()));
        wildcards.push(segment);
    }

    if literal_start < bytes.len() {
        tokens.push(Token::Literal(literal_start..bytes.len()));
    }

    if let Some(end) = catch_all_end {
        if end != bytes.len() {
            return Err(PatternError::CatchAllNotLast {
                pattern: pattern.to_owned(),
            });
        }
    }

    Ok(CompiledPattern {
        source: pattern.to_owned(),
        tokens,
        wildcards,
    })
}

/// Parse `:name`, `:name(expr)`, `:name?` or `:name(expr)?` starting at `start`.
fn parse_param(pattern: &str, start: usize) -> Result<WildcardSegment, PatternError> {
    let bytes = pattern.as_bytes();
    let name_end = parse_name(pattern, start)?;
    let name: Arc<str> = Arc::from(&pattern[start + 1..name_end]);
    let mut end = name_end;

    let mut constraint = None;
    if bytes.get(end) == Some(&b'(') {
        let close = find_constraint_end(bytes, end).ok_or_else(|| {
            PatternError::UnterminatedConstraint {
                pattern: pattern.to_owned(),
                name: name.to_string(),
            }
        })?;
        let source = &pattern[end + 1..close];
        let invalid = |message: String| PatternError::InvalidConstraint {
            pattern: pattern.to_owned(),
            constraint: source.to_owned(),
            message,
        };
        if source.is_empty() {
            return Err(invalid("constraint is empty".to_owned()));
        }
        if source.contains('/') {
            return Err(invalid("a parameter never captures '/'".to_owned()));
        }
        constraint = Some(Constraint::compile(source).map_err(|e| invalid(e.to_string()))?);
        end = close + 1;
    }

    let optional = bytes.get(end) == Some(&b'?');
    if optional {
        end += 1;
    }

    if end < bytes.len() && bytes[end] != b'/' {
        return Err(PatternError::ParamNotAtSegmentEnd {
            pattern: pattern.to_owned(),
            name: name.to_string(),
        });
    }

    let kind = match (optional, constraint.is_some()) {
        (true, _) => SegmentKind::OptionalParam,
        (false, true) => SegmentKind::RegexParam,
        (false, false) => SegmentKind::Param,
    };

    Ok(WildcardSegment {
        kind,
        range: start..end,
        name,
        constraint,
    })
}

/// Validate the name after the sigil at `sigil`; returns the byte after it.
fn parse_name(pattern: &str, sigil: usize) -> Result<usize, PatternError> {
    let bytes = pattern.as_bytes();
    let start = sigil + 1;
    let end = bytes[start..]
        .iter()
        .position(|b| !(b.is_ascii_alphanumeric() || *b == b'_'))
        .map_or(bytes.len(), |n| start + n);

    if start == end {
        return Err(PatternError::EmptyParamName {
            pattern: pattern.to_owned(),
            position: sigil,
        });
    }
    if !bytes[start].is_ascii_alphabetic() {
        return Err(PatternError::InvalidParamName {
            pattern: pattern.to_owned(),
            position: sigil,
        });
    }
    Ok(end)
}

/// Index of the `)` closing the `(` at `open`, honouring nesting and `\` escapes.
fn find_constraint_end(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}
