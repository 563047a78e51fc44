//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur during rendering.
///
/// Empty or mismatched data is not an error: it renders as an in-image
/// message. Only canvas and encoder failures end up here.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Canvas dimensions are zero or overflow the pixel buffer.
    #[error("Invalid canvas size: {width}x{height}")]
    InvalidSize {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// Scene and canvas sizes differ.
    #[error("Scene is {scene_width}x{scene_height} but canvas is {canvas_width}x{canvas_height}")]
    SizeMismatch {
        /// Scene width.
        scene_width: u32,
        /// Scene height.
        scene_height: u32,
        /// Canvas width.
        canvas_width: u32,
        /// Canvas height.
        canvas_height: u32,
    },

    /// Drawing a shape onto the canvas failed.
    #[error("Draw failed: {0}")]
    Draw(String),

    /// PNG encoding failed.
    #[error("Encoding failed: {0}")]
    Encode(String),
}
