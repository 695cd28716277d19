//! Diffing Engine: Generate minimal ANSI sequences from frame changes.
//!
//! This module implements the core in-place update logic:
//! 1. Compare the previous and next frames line by line
//! 2. Reposition the cursor at the top of the region
//! 3. Skip unchanged lines with a cursor move, rewrite changed ones
//! 4. Erase trailing lines when the frame shrank
//!
//! Region geometry: after a frame of `P` lines is drawn, its lines occupy
//! rows `0..P` of the region and the cursor rests at column 0 of row `P`.
//! Every path below leaves the cursor in that position for the next frame.

use super::Frame;
use crate::terminal::OutputBuffer;

/// Result of a diff operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffResult {
    /// Whether the whole frame was written verbatim (nothing to diff against).
    pub full_repaint: bool,
    /// Number of lines written (erased and rewritten, or newly added).
    pub lines_written: usize,
    /// Number of unchanged lines skipped with a cursor move.
    pub lines_skipped: usize,
    /// Number of surplus trailing lines erased.
    pub lines_erased: usize,
}

/// Render the difference between two frames into an output buffer.
///
/// This is the core diffing function. When `previous` is empty the frame is
/// written verbatim; otherwise the cursor is moved back to the top of the
/// region and only lines that differ are rewritten. Lines are compared by
/// exact string equality. A line past the end of `previous` never matches.
///
/// The frame delimiter is appended in both cases.
///
/// # Arguments
///
/// * `previous` - The frame currently on screen
/// * `next` - The frame to transition to
/// * `output` - Buffer to write ANSI sequences to
///
/// # Returns
///
/// Statistics about the diff operation.
pub fn render_diff(previous: &Frame, next: &Frame, output: &mut OutputBuffer) -> DiffResult {
    if previous.is_empty() {
        return render_full(next, output);
    }

    let mut result = DiffResult::default();
    let previous_line_count = previous.line_count();
    let line_count = next.line_count();

    if line_count < previous_line_count {
        // Step off the blank cursor row, erase the surplus, then climb to the top.
        let surplus = previous_line_count - line_count;
        output.cursor_up(1);
        output.erase_lines(surplus);
        output.cursor_up(line_count);
        result.lines_erased = surplus;
    } else {
        output.cursor_up(previous_line_count);
    }

    let previous_lines = previous.lines();
    for (i, line) in next.lines().iter().enumerate() {
        if previous_lines.get(i) == Some(line) {
            output.cursor_next_line();
            result.lines_skipped += 1;
        } else {
            output.erase_line();
            output.write_line(line);
            result.lines_written += 1;
        }
    }

    output.frame_delimiter();
    result
}

/// Generate a full repaint (no diffing).
///
/// This is used for the first frame, or when the region is known to be blank.
pub fn render_full(frame: &Frame, output: &mut OutputBuffer) -> DiffResult {
    output.write_str(frame.output());
    output.frame_delimiter();

    DiffResult {
        full_repaint: true,
        lines_written: frame.line_count(),
        ..DiffResult::default()
    }
}
