//! Text spans, selections and line queries over an immutable snapshot

/// A half-open byte range `start..end` in a text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} after end {end}");
        Self { start, end }
    }

    /// Create a span from a start offset and a length
    pub fn from_len(start: usize, len: usize) -> Self {
        Self::new(start, start + len)
    }

    /// An empty span at `offset`
    pub fn empty(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `offset` lies in `start..end`
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Whether `offset` lies strictly between `start` and `end`
    pub fn strictly_contains(&self, offset: usize) -> bool {
        self.start < offset && offset < self.end
    }
}

/// How a selection covers the text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// A single contiguous range
    #[default]
    Stream,
    /// A rectangular, multi-line block
    Block,
}

/// The user's selection in the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
    pub mode: SelectionMode,
}

impl Selection {
    pub fn stream(start: usize, end: usize) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
            mode: SelectionMode::Stream,
        }
    }

    pub fn block(start: usize, end: usize) -> Self {
        Self {
            mode: SelectionMode::Block,
            ..Self::stream(start, end)
        }
    }

    /// An empty selection, i.e. just a caret
    pub fn caret(offset: usize) -> Self {
        Self::stream(offset, offset)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }
}

/// Which end of a selected span holds the caret
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretPosition {
    Start,
    End,
}

/// A selection to establish after an edit has been committed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectSpan {
    pub start: usize,
    pub length: usize,
    pub caret: CaretPosition,
}

impl SelectSpan {
    pub fn new(start: usize, length: usize, caret: CaretPosition) -> Self {
        Self {
            start,
            length,
            caret,
        }
    }

    pub fn span(&self) -> Span {
        Span::from_len(self.start, self.length)
    }

    /// Offset of the caret once the span is selected
    pub fn caret_offset(&self) -> usize {
        match self.caret {
            CaretPosition::Start => self.start,
            CaretPosition::End => self.start + self.length,
        }
    }
}

/// A line of a [`TextSnapshot`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    /// Zero-based line number
    pub number: usize,
    /// Offset of the first character
    pub start: usize,
    /// Offset just before the line break
    pub end: usize,
    /// Offset just after the line break
    pub end_including_line_break: usize,
}

impl Line {
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    pub fn has_line_break(&self) -> bool {
        self.end != self.end_including_line_break
    }
}

/// Line-indexed view over an immutable text
///
/// Recognises `\r\n`, `\n` and lone `\r` as line breaks. A text ending with a
/// line break has a final empty line.
#[derive(Debug, Clone)]
pub struct TextSnapshot<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> TextSnapshot<'a> {
    pub fn new(text: &'a str) -> Self {
        let bytes = text.as_bytes();
        let mut line_starts = vec![0];
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                    i += 2;
                    line_starts.push(i);
                }
                b'\r' | b'\n' => {
                    i += 1;
                    line_starts.push(i);
                }
                _ => i += 1,
            }
        }
        Self { text, line_starts }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Get a line by its zero-based number
    pub fn line(&self, number: usize) -> Option<Line> {
        let start = *self.line_starts.get(number)?;
        let end_including_line_break = self
            .line_starts
            .get(number + 1)
            .copied()
            .unwrap_or(self.text.len());
        let line_text = &self.text[start..end_including_line_break];
        let break_len = if line_text.ends_with("\r\n") {
            2
        } else if line_text.ends_with('\n') || line_text.ends_with('\r') {
            1
        } else {
            0
        };
        Some(Line {
            number,
            start,
            end: end_including_line_break - break_len,
            end_including_line_break,
        })
    }

    /// Get the line containing `position`; positions past the end map to the last line
    pub fn line_from_position(&self, position: usize) -> Line {
        let position = position.min(self.text.len());
        let number = match self.line_starts.binary_search(&position) {
            Ok(n) => n,
            Err(n) => n - 1,
        };
        // line_starts is never empty and line_starts[number] <= position
        self.line(number).unwrap_or(Line {
            number: 0,
            start: 0,
            end: 0,
            end_including_line_break: 0,
        })
    }

    /// The text of `line`, without its line break
    pub fn line_text(&self, line: Line) -> &'a str {
        &self.text[line.start..line.end]
    }

    /// The run of spaces and tabs at the start of `line`
    pub fn leading_whitespace(&self, line: Line) -> &'a str {
        let text = self.line_text(line);
        let trimmed = text.trim_start_matches(|c: char| c == ' ' || c == '\t');
        &text[..text.len() - trimmed.len()]
    }

    /// The line break that terminates `line`, or `None` for the last line of a
    /// text that does not end with a line break
    pub fn line_break_text(&self, line: Line) -> Option<&'a str> {
        if line.has_line_break() {
            Some(&self.text[line.end..line.end_including_line_break])
        } else {
            None
        }
    }
}
