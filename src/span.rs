/// A byte offset range into a configuration source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Span for diagnostics not tied to any source text.
    pub fn dummy() -> Self {
        Self { start: 0, end: 0 }
    }

    /// Span of `part`, which must be a subslice of `source`.
    pub fn within(source: &str, part: &str) -> Self {
        let start = part.as_ptr() as usize - source.as_ptr() as usize;
        Self::new(start as u32, (start + part.len()) as u32)
    }
}

/// A value annotated with the span it was read from.
#[derive(Clone, Debug)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}
