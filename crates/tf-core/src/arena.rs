use std::borrow::Cow;
use std::ops::Range;

/// Half-open byte range `[start, end)` into a [`StringArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub const EMPTY: Span = Span { start: 0, end: 0 };

    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Append-only text storage owned by a single state.
///
/// Every piece of text a state needs is pushed here exactly once; records keep
/// only [`Span`]s into it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringArena {
    bytes: Vec<u8>,
}

impl StringArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn push(&mut self, bytes: &[u8]) -> Span {
        let start = self.bytes.len();
        self.bytes.extend_from_slice(bytes);
        Span::new(start, self.bytes.len())
    }

    pub fn push_str(&mut self, text: &str) -> Span {
        self.push(text.as_bytes())
    }

    pub fn contains(&self, span: Span) -> bool {
        span.start <= span.end && span.end <= self.bytes.len()
    }

    pub fn get(&self, span: Span) -> Option<&[u8]> {
        if !self.contains(span) {
            return None;
        }
        Some(&self.bytes[span.range()])
    }

    /// Text behind `span`; invalid UTF-8 is replaced and out-of-bounds spans read as empty.
    pub fn text(&self, span: Span) -> Cow<'_, str> {
        match self.get(span) {
            Some(bytes) => String::from_utf8_lossy(bytes),
            None => Cow::Borrowed(""),
        }
    }
}
