//! # Liveframe
//!
//! In-place terminal updates for live command-line output.
//!
//! Liveframe redraws a region of the terminal frame after frame (progress
//! bars, spinners, live trees) without scrolling new output into the
//! scrollback. Each frame is a complete multi-line string; only the lines
//! that differ from the previous frame are rewritten.
//!
//! ## Core Concepts
//!
//! - **Line diffing**: Unchanged lines are skipped with a cursor move
//! - **Single write**: Each operation is batched into one write to the sink
//! - **Fast path**: The first frame is written verbatim, nothing to diff
//! - **Actor model**: An optional render thread serializes many producers
//!
//! ## Example
//!
//! ```rust,ignore
//! use liveframe::FrameRenderer;
//!
//! let mut renderer = FrameRenderer::stdout();
//! renderer.render("Fetching\n[=====     ]")?;
//! renderer.render("Fetching\n[==========]")?;
//! renderer.done()?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod error;
pub mod frame;
pub mod renderer;
pub mod terminal;

// Re-exports for convenience
pub use actor::{RenderCommand, RendererActor};
pub use error::{Error, Result};
pub use frame::Frame;
pub use renderer::{FrameRenderer, RenderStats, RendererConfig};
pub use terminal::{OutputBuffer, FRAME_DELIMITER};
