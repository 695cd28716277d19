//! Renderer configuration.

/// Configuration for the [`FrameRenderer`](super::FrameRenderer).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RendererConfig {
    /// Leave cursor visibility alone.
    ///
    /// When `false` (the default) the cursor is hidden on the first render
    /// and shown again by `done`.
    pub show_cursor: bool,
}

impl RendererConfig {
    /// Configuration that never hides the cursor.
    pub const fn with_cursor() -> Self {
        Self { show_cursor: true }
    }
}
