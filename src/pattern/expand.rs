use super::parser::{compile, CompiledPattern, Piece};
use crate::error::PatternError;

/// One concrete pattern to insert into the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcretePattern {
    /// Rendered pattern with optional markers removed
    pub path: String,
    /// Insertion pieces for `path`
    pub pieces: Vec<Piece>,
}

impl CompiledPattern {
    /// Concrete patterns implied by this pattern.
    ///
    /// Without optional segments this is the pattern itself. With them, every
    /// segment truncation from the first optional segment up to the full pattern is
    /// produced, each both without and with a trailing `/`:
    ///
    /// ```rust
    /// use brrtrouter_radix::pattern::compile;
    ///
    /// let paths: Vec<String> = compile("/users/:id/:tab?")
    ///     .unwrap()
    ///     .expand()
    ///     .unwrap()
    ///     .into_iter()
    ///     .map(|c| c.path)
    ///     .collect();
    /// assert_eq!(paths, ["/users/:id", "/users/:id/", "/users/:id/:tab", "/users/:id/:tab/"]);
    /// ```
    pub fn expand(&self) -> Result<Vec<ConcretePattern>, PatternError> {
        if !self.has_optional() {
            return Ok(vec![ConcretePattern {
                path: self.source().to_owned(),
                pieces: self.pieces(),
            }]);
        }

        let mut paths: Vec<String> = Vec::new();
        let mut push = |candidate: String| {
            if !candidate.is_empty() && !paths.contains(&candidate) {
                paths.push(candidate);
            }
        };

        let source = self.source();
        let bytes = source.as_bytes();
        let starts_mid_segment = |start: usize| start > 0 && bytes[start - 1] != b'/';
        let first_optional = self
            .wildcards()
            .iter()
            .find(|w| w.is_optional())
            .map_or(source.len(), |w| w.range.start);
        // truncations start at the `/` opening the first optional segment, or at
        // the optional itself when literal text precedes it in its segment
        let from = if starts_mid_segment(first_optional) {
            first_optional
        } else {
            source[..first_optional].rfind('/').unwrap_or(0)
        };

        let mut cuts: Vec<(usize, bool)> = source
            .match_indices('/')
            .map(|(i, _)| (i, true))
            .chain(
                self.wildcards()
                    .iter()
                    .filter(|w| w.is_optional() && starts_mid_segment(w.range.start))
                    .map(|w| (w.range.start, false)),
            )
            .filter(|(i, _)| *i >= from)
            .collect();
        cuts.sort_unstable();

        for (cut, at_slash) in cuts {
            let without = self.render(cut);
            let with_slash = if at_slash {
                self.render(cut + 1)
            } else {
                format!("{without}/")
            };
            push(without);
            push(with_slash);
        }
        push(self.render(source.len()));
        if !source.ends_with('/') && !self.ends_with_catch_all() {
            let mut with_slash = self.render(source.len());
            with_slash.push('/');
            push(with_slash);
        }

        paths
            .into_iter()
            .map(|path| -> Result<ConcretePattern, PatternError> {
                let pieces = compile(&path)?.pieces();
                Ok(ConcretePattern { path, pieces })
            })
            .collect()
    }

    /// `source[..end]` with the optional markers inside it removed.
    fn render(&self, end: usize) -> String {
        let source = self.source();
        let mut out = String::with_capacity(end);
        let mut copied = 0;
        for w in self.wildcards().iter().filter(|w| w.is_optional()) {
            let marker = w.range.end - 1;
            if marker >= end {
                break;
            }
            out.push_str(&source[copied..marker]);
            copied = marker + 1;
        }
        out.push_str(&source[copied..end]);
        out
    }
}
