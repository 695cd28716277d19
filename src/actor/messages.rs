//! Message types for actor communication.
//!
//! These enums define the protocol between producers and the render thread.

/// Commands sent to the render thread.
///
/// Each variant mirrors one [`FrameRenderer`](crate::FrameRenderer)
/// operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCommand {
    /// Draw a frame in place of the previous one.
    Render(String),

    /// Erase the region and forget the previous frame.
    Clear,

    /// Leave the last frame on screen and restore the cursor.
    Done,

    /// Record a frame as already on screen without drawing it.
    Sync(String),

    /// Shutdown the render thread.
    Shutdown,
}
