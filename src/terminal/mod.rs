//! Terminal module: escape-sequence generation and batched output.

mod output;

pub use output::{OutputBuffer, FRAME_DELIMITER};
