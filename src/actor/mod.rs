//! Actor Model: A dedicated render thread for shared terminal regions.
//!
//! A [`FrameRenderer`](crate::FrameRenderer) assumes it is the only writer
//! to its region. When several threads produce frames, hand the renderer to
//! a [`RendererActor`] and send it [`RenderCommand`]s instead.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │  Producer A  │ ──┐
//! └──────────────┘   │  RenderCommand   ┌──────────────┐   bytes   ┌──────────┐
//!                    ├───────────────▶  │Render Thread │ ───────▶  │ Terminal │
//! ┌──────────────┐   │                  └──────────────┘           └──────────┘
//! │  Producer B  │ ──┘
//! └──────────────┘
//! ```

mod messages;
mod renderer;

pub use messages::RenderCommand;
pub use renderer::RendererActor;
