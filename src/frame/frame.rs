//! `Frame`: one full snapshot of content to display.

/// A rendered (or synced) frame.
///
/// Holds both the newline-terminated output text and the lines it splits
/// into, so the two can never disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// The frame text with its implicit trailing newline.
    output: String,
    /// The content lines, i.e. the text split on `'\n'`.
    lines: Vec<String>,
}

impl Frame {
    /// Build a frame from its text.
    ///
    /// The text is treated as if terminated by a newline; a frame always has
    /// at least one line.
    pub fn new(text: &str) -> Self {
        let mut output = String::with_capacity(text.len() + 1);
        output.push_str(text);
        output.push('\n');

        Self {
            output,
            lines: text.split('\n').map(str::to_owned).collect(),
        }
    }

    /// The empty state: no output, no lines.
    pub const fn empty() -> Self {
        Self {
            output: String::new(),
            lines: Vec::new(),
        }
    }

    /// Check whether this frame holds nothing (the region is blank).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The terminated output text.
    #[inline]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// The content lines.
    #[inline]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of content lines.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Check whether this frame would produce exactly `text` again.
    ///
    /// Compares without allocating the terminated form of `text`.
    pub fn matches(&self, text: &str) -> bool {
        self.output.len() == text.len() + 1
            && self.output.ends_with('\n')
            && self.output.starts_with(text)
    }
}
