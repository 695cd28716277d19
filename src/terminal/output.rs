//! `OutputBuffer`: Single-syscall output buffer for ANSI sequences.
//!
//! The escape sequences come from crossterm commands rendered with
//! [`Command::write_ansi`], so the buffer never touches the terminal
//! until [`OutputBuffer::flush_to`] is called.

use crossterm::cursor::{Hide, MoveToColumn, MoveToNextLine, MoveUp, Show};
use crossterm::terminal::{Clear, ClearType};
use crossterm::Command;
use std::io::Write;

/// Out-of-band marker written after every repaint.
///
/// This is an empty DCS string, which terminals consume without drawing
/// anything. Observers of captured output split on it to find frame
/// boundaries.
pub const FRAME_DELIMITER: &str = "\x1bPfrm\x1b\\";

/// Pre-allocated buffer for building ANSI escape sequences.
///
/// All output is accumulated here, then flushed in a single `write()` syscall
/// to prevent terminal flickering.
#[derive(Debug, Clone)]
pub struct OutputBuffer {
    data: String,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: String::with_capacity(capacity),
        }
    }

    /// Create a buffer sized for a typical terminal (4KB).
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.data
    }

    /// Get the buffer contents as bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_bytes()
    }

    /// Get the buffer length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Write a string verbatim.
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.data.push_str(s);
    }

    /// Write a line of content followed by a newline.
    #[inline]
    pub fn write_line(&mut self, line: &str) {
        self.data.push_str(line);
        self.data.push('\n');
    }

    /// Erase the current line.
    #[inline]
    pub fn erase_line(&mut self) {
        self.command(Clear(ClearType::CurrentLine));
    }

    /// Erase `count` lines, starting with the current one and moving up.
    ///
    /// The cursor ends at column 0 of the topmost erased line. Erasing zero
    /// lines writes nothing.
    pub fn erase_lines(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        for i in 0..count {
            self.erase_line();
            if i + 1 < count {
                self.command(MoveUp(1));
            }
        }
        self.command(MoveToColumn(0));
    }

    /// Move the cursor up `rows` rows. Zero rows writes nothing.
    pub fn cursor_up(&mut self, rows: usize) {
        // CSI 0 A means "up one", so zero must stay silent.
        let mut remaining = rows;
        while remaining > 0 {
            let step = u16::try_from(remaining).unwrap_or(u16::MAX);
            self.command(MoveUp(step));
            remaining -= usize::from(step);
        }
    }

    /// Move the cursor to column 0 of the next line.
    #[inline]
    pub fn cursor_next_line(&mut self) {
        self.command(MoveToNextLine(1));
    }

    /// Hide cursor.
    #[inline]
    pub fn cursor_hide(&mut self) {
        self.command(Hide);
    }

    /// Show cursor.
    #[inline]
    pub fn cursor_show(&mut self) {
        self.command(Show);
    }

    /// Append the frame delimiter.
    #[inline]
    pub fn frame_delimiter(&mut self) {
        self.data.push_str(FRAME_DELIMITER);
    }

    #[inline]
    fn command(&mut self, command: impl Command) {
        // Writing into a String cannot fail.
        let _ = command.write_ansi(&mut self.data);
    }

    /// Flush to a writer in a single syscall.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(self.data.as_bytes())?;
        writer.flush()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}
