//! Frame Renderer: In-place updates of a terminal region.
//!
//! The renderer remembers the last frame it drew and, on each new frame,
//! rewrites only the lines that changed. Everything one operation emits is
//! batched into a single write to the sink.

mod config;

pub use config::RendererConfig;

use crate::error::Result;
use crate::frame::diff::render_diff;
use crate::frame::Frame;
use crate::terminal::OutputBuffer;
use std::io::{self, Stdout, Write};

/// Render statistics for debugging/profiling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Total frames drawn (fast or incremental path).
    pub frames: u64,
    /// Frames skipped because they matched the frame on screen.
    pub frames_skipped: u64,
    /// Total lines written across all frames.
    pub lines_written: u64,
    /// Total unchanged lines skipped across all frames.
    pub lines_skipped: u64,
    /// Total surplus lines erased when frames shrank.
    pub lines_erased: u64,
    /// Total bytes written to the sink.
    pub bytes_written: u64,
}

/// Rewrites the terminal region holding its previous frame.
///
/// The renderer assumes it is the only writer to that region between calls.
/// If something else writes there, call [`sync`](Self::sync) or
/// [`clear`](Self::clear) before the next render.
///
/// ```rust,ignore
/// use liveframe::FrameRenderer;
///
/// let mut renderer = FrameRenderer::stdout();
/// for pct in 0..=100 {
///     renderer.render(&format!("Downloading\n{pct:>3}%"))?;
/// }
/// renderer.done()?;
/// ```
#[derive(Debug)]
pub struct FrameRenderer<W: Write> {
    /// Output sink.
    writer: W,
    /// Configuration.
    config: RendererConfig,
    /// The frame currently on screen (empty when the region is blank).
    previous: Frame,
    /// Whether we have hidden the cursor and not yet restored it.
    cursor_hidden: bool,
    /// Pre-allocated output buffer.
    output: OutputBuffer,
    /// Render statistics.
    stats: RenderStats,
}

impl FrameRenderer<Stdout> {
    /// Create a renderer writing to stdout with default configuration.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> FrameRenderer<W> {
    /// Create a new renderer with default configuration.
    pub fn new(writer: W) -> Self {
        Self::with_config(writer, RendererConfig::default())
    }

    /// Create a new renderer with custom configuration.
    pub fn with_config(writer: W, config: RendererConfig) -> Self {
        Self {
            writer,
            config,
            previous: Frame::empty(),
            cursor_hidden: false,
            output: OutputBuffer::new(),
            stats: RenderStats::default(),
        }
    }

    /// Draw `frame`, replacing the previous one in place.
    ///
    /// A frame identical to the one on screen writes nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails. The new frame is recorded as
    /// on screen regardless; call [`sync`](Self::sync) or
    /// [`clear`](Self::clear) before rendering again.
    pub fn render(&mut self, frame: &str) -> Result<()> {
        if self.previous.matches(frame) {
            self.stats.frames_skipped += 1;
            log::trace!("frame unchanged, skipping");
            return Ok(());
        }

        let next = Frame::new(frame);
        self.output.clear();

        if !self.config.show_cursor && !self.cursor_hidden {
            self.output.cursor_hide();
            self.cursor_hidden = true;
        }

        let result = render_diff(&self.previous, &next, &mut self.output);
        log::trace!(
            "rendered {} -> {} lines (full: {}, written: {}, skipped: {}, erased: {})",
            self.previous.line_count(),
            next.line_count(),
            result.full_repaint,
            result.lines_written,
            result.lines_skipped,
            result.lines_erased,
        );

        self.stats.frames += 1;
        self.stats.lines_written += result.lines_written as u64;
        self.stats.lines_skipped += result.lines_skipped as u64;
        self.stats.lines_erased += result.lines_erased as u64;

        self.previous = next;
        self.flush()
    }

    /// Erase the region and forget the previous frame.
    ///
    /// Cursor visibility is left as is. Rendering afterwards starts from a
    /// blank region.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails. The state is reset regardless.
    pub fn clear(&mut self) -> Result<()> {
        self.output.clear();
        if !self.previous.is_empty() {
            // The region spans every line plus the row holding the cursor.
            self.output.erase_lines(self.previous.line_count() + 1);
        }
        log::debug!("clearing {} lines", self.previous.line_count());

        self.previous = Frame::empty();
        self.flush()
    }

    /// Finish with the region, leaving the last frame on screen.
    ///
    /// Forgets the previous frame and, unless `show_cursor` is set, shows the
    /// cursor again. A later render starts a fresh region below.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails. The state is reset regardless.
    pub fn done(&mut self) -> Result<()> {
        self.output.clear();
        self.previous = Frame::empty();

        if !self.config.show_cursor {
            self.output.cursor_show();
            self.cursor_hidden = false;
        }
        log::debug!("done with region");

        self.flush()
    }

    /// Record `frame` as already on screen without writing anything.
    ///
    /// Use this after something else drew the frame, so the next render
    /// diffs against it instead of repainting.
    pub fn sync(&mut self, frame: &str) {
        log::debug!("syncing to frame of {} bytes", frame.len());
        self.previous = Frame::new(frame);
    }

    /// Lines of the frame currently on screen (empty when blank).
    pub fn previous_lines(&self) -> &[String] {
        self.previous.lines()
    }

    /// Output of the frame currently on screen, with its trailing newline.
    pub fn previous_output(&self) -> &str {
        self.previous.output()
    }

    /// Whether this renderer has hidden the cursor and not yet restored it.
    pub const fn is_cursor_hidden(&self) -> bool {
        self.cursor_hidden
    }

    /// Get the configuration.
    pub const fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Get the render statistics.
    pub const fn stats(&self) -> &RenderStats {
        &self.stats
    }

    /// Get a reference to the sink.
    pub const fn writer(&self) -> &W {
        &self.writer
    }

    /// Consume the renderer, returning the sink.
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Flush the batch to the sink in a single write.
    fn flush(&mut self) -> Result<()> {
        if self.output.is_empty() {
            return Ok(());
        }
        self.output.flush_to(&mut self.writer)?;
        self.stats.bytes_written += self.output.len() as u64;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::FRAME_DELIMITER;

    const ROWS: u16 = 24;
    const COLS: u16 = 40;

    /// Sink that keeps every `write` call separately.
    #[derive(Debug, Default)]
    struct RecordingSink {
        writes: Vec<String>,
    }

    impl Write for RecordingSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.writes.push(String::from_utf8_lossy(buf).into_owned());
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Sink that rejects every write.
    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn recording() -> FrameRenderer<RecordingSink> {
        FrameRenderer::new(RecordingSink::default())
    }

    /// Replay captured output on an emulated screen below a prompt line.
    fn screen(bytes: &[u8]) -> vt100::Parser {
        screen_sized(ROWS, &["$ prompt"], bytes)
    }

    /// Replay captured output on a `rows`-high screen after `prompt` lines.
    fn screen_sized(rows: u16, prompt: &[&str], bytes: &[u8]) -> vt100::Parser {
        let mut parser = vt100::Parser::new(rows, COLS, 0);
        for line in prompt {
            parser.process(format!("{line}\r\n").as_bytes());
        }
        // A tty turns '\n' into "\r\n" on output. vt100 ignores CNL, so
        // spell it as cursor down plus carriage return.
        let translated = String::from_utf8_lossy(bytes)
            .replace('\n', "\r\n")
            .replace(&next_line(), "\x1b[1B\r");
        parser.process(translated.as_bytes());
        parser
    }

    fn rows(parser: &vt100::Parser) -> Vec<String> {
        parser
            .screen()
            .rows(0, COLS)
            .map(|row| row.trim_end().to_owned())
            .collect()
    }

    fn next_line() -> String {
        let mut output = OutputBuffer::new();
        output.cursor_next_line();
        output.as_str().to_owned()
    }

    #[test]
    fn test_renders_and_updates_output() {
        let mut renderer = recording();

        renderer.render("Hello").unwrap();
        assert_eq!(renderer.writer().writes.len(), 1);
        assert!(renderer.writer().writes[0].contains("Hello\n"));
        assert!(renderer.writer().writes[0].ends_with(FRAME_DELIMITER));

        renderer.render("World").unwrap();
        assert_eq!(renderer.writer().writes.len(), 2);
        assert!(renderer.writer().writes[1].contains("World"));
    }

    #[test]
    fn test_skips_identical_output() {
        let mut renderer = recording();

        renderer.render("Hello").unwrap();
        renderer.render("Hello").unwrap();

        assert_eq!(renderer.writer().writes.len(), 1);
        assert_eq!(renderer.stats().frames, 1);
        assert_eq!(renderer.stats().frames_skipped, 1);
    }

    #[test]
    fn test_incremental_render_is_surgical() {
        let mut renderer = recording();

        renderer.render("Line 1\nLine 2\nLine 3").unwrap();
        renderer.render("Line 1\nUpdated\nLine 3").unwrap();

        let second = &renderer.writer().writes[1];
        assert!(second.contains(&next_line()));
        assert!(second.contains("Updated"));
        assert!(!second.contains("Line 1"));
        assert!(!second.contains("Line 3"));
    }

    #[test]
    fn test_incremental_render_on_screen() {
        let mut renderer = FrameRenderer::new(Vec::new());

        renderer.render("A\nB\nC").unwrap();
        renderer.render("A\nX\nC").unwrap();

        let parser = screen(renderer.writer());
        assert_eq!(rows(&parser)[..5], ["$ prompt", "A", "X", "C", ""]);
        assert_eq!(parser.screen().cursor_position(), (4, 0));
    }

    #[test]
    fn test_shrink_erases_surplus_lines() {
        let mut renderer = FrameRenderer::new(Vec::new());

        renderer.render("A\nB\nC").unwrap();
        renderer.render("A").unwrap();

        assert_eq!(renderer.previous_lines().len(), 1);
        assert_eq!(renderer.stats().lines_erased, 2);

        let parser = screen(renderer.writer());
        assert_eq!(rows(&parser)[..4], ["$ prompt", "A", "", ""]);
        assert_eq!(parser.screen().cursor_position(), (2, 0));
    }

    #[test]
    fn test_grow_writes_new_lines() {
        let mut renderer = FrameRenderer::new(Vec::new());

        renderer.render("A").unwrap();
        renderer.render("A\nB\nC").unwrap();

        assert_eq!(renderer.previous_lines(), ["A", "B", "C"]);

        let parser = screen(renderer.writer());
        assert_eq!(rows(&parser)[..5], ["$ prompt", "A", "B", "C", ""]);
        assert_eq!(parser.screen().cursor_position(), (4, 0));
    }

    #[test]
    fn test_frame_sequence_keeps_region_in_place() {
        let frames = ["a\nb\nc", "a", "x\ny", "x\ny\nz\nw", "", "q\n\nr", "q\n\nr\n"];
        let mut renderer = FrameRenderer::new(Vec::new());
        let mut tallest = 0;

        for frame in frames {
            renderer.render(frame).unwrap();
            let lines: Vec<&str> = frame.split('\n').collect();
            tallest = tallest.max(lines.len());

            let parser = screen(renderer.writer());
            let rows = rows(&parser);
            assert_eq!(rows[0], "$ prompt", "frame {frame:?}");
            assert_eq!(rows[1..=lines.len()], lines[..], "frame {frame:?}");
            for row in &rows[lines.len() + 1..=tallest + 1] {
                assert_eq!(row, "", "frame {frame:?}");
            }
            let expected_row = u16::try_from(lines.len() + 1).unwrap();
            assert_eq!(parser.screen().cursor_position(), (expected_row, 0));
        }
    }

    #[test]
    fn test_region_scrolled_to_bottom_stays_in_place() {
        const SHORT_ROWS: u16 = 6;
        let frames = ["a\nb\nc", "a\nb\nc\nd\ne", "x", "x\ny\nz\nw\nv", "1\n2", ""];
        let mut renderer = FrameRenderer::new(Vec::new());

        for frame in frames {
            renderer.render(frame).unwrap();
            let lines: Vec<&str> = frame.split('\n').collect();

            let parser = screen_sized(SHORT_ROWS, &["p1", "p2", "p3"], renderer.writer());
            let rows = rows(&parser);
            let (cursor_row, cursor_col) = parser.screen().cursor_position();
            let cursor_row = usize::from(cursor_row);

            assert_eq!(cursor_col, 0, "frame {frame:?}");
            assert!(cursor_row >= lines.len(), "frame {frame:?}: {rows:?}");
            assert_eq!(rows[cursor_row - lines.len()..cursor_row], lines[..], "frame {frame:?}");
            for row in &rows[cursor_row..] {
                assert_eq!(row, "", "frame {frame:?}: {rows:?}");
            }
        }
    }

    #[test]
    fn test_clear_blanks_region() {
        let mut renderer = FrameRenderer::new(Vec::new());

        renderer.render("A\nB").unwrap();
        renderer.clear().unwrap();

        assert!(renderer.previous_lines().is_empty());
        assert_eq!(renderer.previous_output(), "");

        let parser = screen(renderer.writer());
        assert_eq!(rows(&parser)[..4], ["$ prompt", "", "", ""]);
        assert_eq!(parser.screen().cursor_position(), (1, 0));

        renderer.render("Z").unwrap();
        let parser = screen(renderer.writer());
        assert_eq!(rows(&parser)[..3], ["$ prompt", "Z", ""]);
    }

    #[test]
    fn test_clear_without_frame_writes_nothing() {
        let mut renderer = recording();
        renderer.clear().unwrap();
        assert!(renderer.writer().writes.is_empty());
    }

    #[test]
    fn test_clear_keeps_cursor_hidden() {
        let mut renderer = recording();

        renderer.render("X").unwrap();
        renderer.clear().unwrap();

        assert!(renderer.is_cursor_hidden());
        assert!(!renderer.writer().writes[1].contains("\x1b[?25h"));
    }

    #[test]
    fn test_done_leaves_frame_visible() {
        let mut renderer = FrameRenderer::new(Vec::new());

        renderer.render("X").unwrap();
        renderer.done().unwrap();

        assert!(renderer.previous_lines().is_empty());
        assert_eq!(renderer.previous_output(), "");

        let parser = screen(renderer.writer());
        assert_eq!(rows(&parser)[..3], ["$ prompt", "X", ""]);
        assert!(!parser.screen().hide_cursor());
    }

    #[test]
    fn test_render_after_done_starts_new_region() {
        let mut renderer = FrameRenderer::new(Vec::new());

        renderer.render("X").unwrap();
        renderer.done().unwrap();
        renderer.render("Y").unwrap();

        let parser = screen(renderer.writer());
        assert_eq!(rows(&parser)[..4], ["$ prompt", "X", "Y", ""]);
        assert!(parser.screen().hide_cursor());
    }

    #[test]
    fn test_sync_has_no_side_effect() {
        let mut renderer = recording();

        renderer.sync("X");
        renderer.render("X").unwrap();

        assert!(renderer.writer().writes.is_empty());
        assert_eq!(renderer.previous_lines(), ["X"]);
    }

    #[test]
    fn test_sync_makes_next_render_incremental() {
        let mut renderer = recording();

        renderer.sync("A\nB");
        renderer.render("A\nC").unwrap();

        let write = &renderer.writer().writes[0];
        assert!(write.contains("\x1b[2A"));
        assert!(write.contains("C\n"));
        assert!(!write.contains("A\n"));
    }

    #[test]
    fn test_round_trip_lines() {
        let mut renderer = recording();

        for frame in ["one", "one\ntwo", "", "\n\n", "tail\n"] {
            renderer.render(frame).unwrap();
            let expected: Vec<&str> = frame.split('\n').collect();
            assert_eq!(renderer.previous_lines(), &expected[..]);
            assert_eq!(renderer.previous_output(), format!("{frame}\n"));
        }
    }

    #[test]
    fn test_cursor_hidden_once_and_restored() {
        let mut renderer = recording();

        renderer.render("a").unwrap();
        renderer.render("b").unwrap();
        assert!(renderer.is_cursor_hidden());
        renderer.done().unwrap();
        assert!(!renderer.is_cursor_hidden());

        let writes = &renderer.writer().writes;
        assert_eq!(writes.len(), 3);
        assert!(writes[0].starts_with("\x1b[?25l"));
        assert!(!writes[1].contains("\x1b[?25l"));
        assert_eq!(writes[2], "\x1b[?25h");
    }

    #[test]
    fn test_show_cursor_leaves_visibility_alone() {
        let config = RendererConfig::with_cursor();
        let mut renderer = FrameRenderer::with_config(RecordingSink::default(), config);

        renderer.render("a").unwrap();
        renderer.done().unwrap();

        assert!(renderer.config().show_cursor);
        assert!(!renderer.is_cursor_hidden());
        let writes = &renderer.writer().writes;
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0], format!("a\n{FRAME_DELIMITER}"));
    }

    #[test]
    fn test_sink_failure_still_commits_frame() {
        let mut renderer = FrameRenderer::new(BrokenSink);

        let err = renderer.render("lost").unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
        assert_eq!(renderer.previous_lines(), ["lost"]);
        assert!(renderer.is_cursor_hidden());
    }

    #[test]
    fn test_bytes_written_tracks_sink() {
        let mut renderer = FrameRenderer::new(Vec::new());

        renderer.render("a\nb").unwrap();
        renderer.render("a\nc").unwrap();
        renderer.clear().unwrap();

        let bytes_written = renderer.stats().bytes_written;
        assert_eq!(bytes_written, renderer.into_writer().len() as u64);
    }
}
