//! Error type shared by the renderer and the render actor.

use std::io;

/// Errors produced while driving a terminal region.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The output sink failed to accept a write.
    #[error("terminal write failed: {0}")]
    Io(#[from] io::Error),

    /// The render thread is no longer receiving commands.
    #[error("render thread disconnected")]
    Disconnected,

    /// The render thread panicked before it could be joined.
    #[error("render thread panicked")]
    ThreadPanicked,
}

/// Convenience alias for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
