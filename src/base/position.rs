/// Line tracking for comments and topics
///
/// Lines are 1-based: topic line numbers and auto-topic merging report them
/// as a reader of the source file would count them.
/// An inclusive range of source lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineSpan {
    pub start: usize,
    pub end: usize,
}

impl LineSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Span starting at `start` and covering `count` lines (at least one)
    pub fn from_count(start: usize, count: usize) -> Self {
        Self {
            start,
            end: start + count.saturating_sub(1),
        }
    }

    /// Number of lines covered
    pub fn len(&self) -> usize {
        self.end + 1 - self.start
    }

    /// A span always covers at least one line
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Check if a line falls within this span
    pub fn contains(&self, line: usize) -> bool {
        line >= self.start && line <= self.end
    }

    /// Source line of the `index`th line inside the span
    pub fn line_at(&self, index: usize) -> usize {
        self.start + index
    }
}
