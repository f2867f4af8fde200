use smallvec::SmallVec;
use std::borrow::Cow;

use super::pool::acquire_buffer;

/// Segment-start offsets kept inline; deeper paths spill to the heap.
const INLINE_SEGMENTS: usize = 16;

/// Return the canonical form of `path`.
///
/// Already-canonical input is returned borrowed without allocating.
#[must_use]
pub fn clean_path(path: &str) -> Cow<'_, str> {
    if path.is_empty() {
        return Cow::Borrowed("/");
    }
    if is_clean(path) {
        return Cow::Borrowed(path);
    }

    let mut buf = acquire_buffer();
    Cow::Owned(buf.clean(path).to_owned())
}

/// `true` when `clean_path(path) == path`.
#[must_use]
pub fn is_clean(path: &str) -> bool {
    let Some(rest) = path.strip_prefix('/') else {
        return false;
    };

    let mut segments = rest.split('/').peekable();
    while let Some(segment) = segments.next() {
        match segment {
            "." | ".." => return false,
            // only the final segment may be empty (trailing slash)
            "" if segments.peek().is_some() => return false,
            _ => {}
        }
    }
    true
}

/// Reusable scratch space for cleaning non-canonical paths.
///
/// Holds the output bytes plus a stack of segment-start offsets so `..` can drop
/// the previous segment without rescanning from the start.
#[derive(Debug, Default)]
pub struct CleanPathBuffer {
    buf: String,
    starts: SmallVec<[usize; INLINE_SEGMENTS]>,
}

impl CleanPathBuffer {
    /// Empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer pre-sized for paths up to `capacity` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity),
            starts: SmallVec::new(),
        }
    }

    /// Clean `path` into this buffer and return a view of the result.
    ///
    /// The previous contents are discarded first.
    pub fn clean<'b>(&'b mut self, path: &str) -> &'b str {
        self.reset();

        let mut trailing = false;
        for segment in path.split('/') {
            match segment {
                "" | "." => trailing = true,
                ".." => {
                    trailing = false;
                    if let Some(start) = self.starts.pop() {
                        self.buf.truncate(start);
                    }
                }
                _ => {
                    trailing = false;
                    self.starts.push(self.buf.len());
                    self.buf.push('/');
                    self.buf.push_str(segment);
                }
            }
        }

        if self.buf.is_empty() || trailing {
            self.buf.push('/');
        }
        &self.buf
    }

    /// Clear contents, keeping the allocation.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.starts.clear();
    }

    /// Bytes currently reserved by the output buffer.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Release the allocation if it has grown beyond `limit` bytes.
    pub(crate) fn shrink_to(&mut self, limit: usize) {
        if self.buf.capacity() > limit {
            self.buf = String::with_capacity(limit);
        }
        if self.starts.spilled() {
            self.starts = SmallVec::new();
        }
    }
}
