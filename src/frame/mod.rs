//! Frame module: Core data structures for in-place frame rendering.
//!
//! This module contains:
//! - [`Frame`]: A frame's terminated output text and its lines
//! - [`diff`]: Diffing engine for generating minimal ANSI sequences

#[allow(clippy::module_inception)]
mod frame;
pub mod diff;

pub use frame::Frame;
