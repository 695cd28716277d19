//! Renderer Actor: Dedicated thread for rendering to the terminal.
//!
//! This actor owns a [`FrameRenderer`] and its sink. It receives render
//! commands from any number of producers and performs the diffing and
//! output flushing on its own thread.

use super::messages::RenderCommand;
use crate::error::{Error, Result};
use crate::renderer::{FrameRenderer, RenderStats};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::io::Write;
use std::thread::{self, JoinHandle};

/// Number of commands that may queue before producers block.
const COMMAND_CAPACITY: usize = 16;

/// Renderer actor that handles terminal output.
///
/// Dropping the actor shuts the render thread down and waits for it.
#[derive(Debug)]
pub struct RendererActor {
    /// Command sender.
    sender: Sender<RenderCommand>,
    /// Handle to the render thread.
    handle: Option<JoinHandle<Result<RenderStats>>>,
}

impl RendererActor {
    /// Spawn the renderer actor thread, moving `renderer` onto it.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the thread.
    pub fn spawn<W>(renderer: FrameRenderer<W>) -> Result<Self>
    where
        W: Write + Send + 'static,
    {
        let (sender, receiver) = bounded::<RenderCommand>(COMMAND_CAPACITY);

        let handle = thread::Builder::new()
            .name("liveframe-render".to_string())
            .spawn(move || {
                let mut renderer = renderer;
                match Self::run_loop(&receiver, &mut renderer) {
                    Ok(()) => Ok(renderer.stats().clone()),
                    Err(e) => {
                        log::error!("render thread stopped: {e}");
                        Err(e)
                    }
                }
            })?;
        log::debug!("render thread spawned");

        Ok(Self {
            sender,
            handle: Some(handle),
        })
    }

    /// Queue a frame to draw.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Disconnected`] if the render thread has stopped.
    pub fn render(&self, frame: impl Into<String>) -> Result<()> {
        self.send(RenderCommand::Render(frame.into()))
    }

    /// Queue a clear of the region.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Disconnected`] if the render thread has stopped.
    pub fn clear(&self) -> Result<()> {
        self.send(RenderCommand::Clear)
    }

    /// Queue a `done`, leaving the last frame on screen.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Disconnected`] if the render thread has stopped.
    pub fn done(&self) -> Result<()> {
        self.send(RenderCommand::Done)
    }

    /// Queue a sync to a frame already on screen.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Disconnected`] if the render thread has stopped.
    pub fn sync(&self, frame: impl Into<String>) -> Result<()> {
        self.send(RenderCommand::Sync(frame.into()))
    }

    /// Get a sender for producers on other threads.
    pub fn sender(&self) -> Sender<RenderCommand> {
        self.sender.clone()
    }

    /// Stop the render thread after it drains queued commands.
    ///
    /// # Errors
    ///
    /// Returns the sink error that stopped the thread, if any, or
    /// [`Error::ThreadPanicked`] if the thread panicked.
    pub fn shutdown(mut self) -> Result<RenderStats> {
        // The thread may already be gone after a sink error; join reports it.
        let _ = self.sender.send(RenderCommand::Shutdown);
        match self.handle.take() {
            Some(handle) => handle.join().map_err(|_| Error::ThreadPanicked)?,
            None => Err(Error::Disconnected),
        }
    }

    fn send(&self, command: RenderCommand) -> Result<()> {
        self.sender.send(command).map_err(|_| Error::Disconnected)
    }

    /// Main render loop.
    ///
    /// Runs until `Shutdown` arrives or every sender is dropped. Frames
    /// queued back to back collapse into the newest one.
    fn run_loop<W: Write>(
        receiver: &Receiver<RenderCommand>,
        renderer: &mut FrameRenderer<W>,
    ) -> Result<()> {
        let mut pending = None;

        loop {
            let command = match pending.take() {
                Some(command) => command,
                None => match receiver.recv() {
                    Ok(command) => command,
                    Err(_) => break,
                },
            };

            match command {
                RenderCommand::Render(mut frame) => {
                    while let Ok(next) = receiver.try_recv() {
                        if let RenderCommand::Render(newer) = next {
                            log::trace!("coalescing queued frame");
                            frame = newer;
                        } else {
                            pending = Some(next);
                            break;
                        }
                    }
                    renderer.render(&frame)?;
                }
                RenderCommand::Clear => renderer.clear()?,
                RenderCommand::Done => renderer.done()?,
                RenderCommand::Sync(frame) => renderer.sync(&frame),
                RenderCommand::Shutdown => break,
            }
        }

        log::debug!("render thread shutting down");
        Ok(())
    }
}

impl Drop for RendererActor {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.sender.send(RenderCommand::Shutdown);
            let _ = handle.join();
        }
    }
}
