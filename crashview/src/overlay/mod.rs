//! Frame-synchronized rendering of detection boxes.
//!
//! The [`Renderer`] owns a [`Surface`] and repaints it for a playback time: only
//! boxes within the visibility [`Window`] of that time are drawn. The [`Overlay`]
//! mounts a renderer onto a video and viewport, repainting on `resize`,
//! `loadedmetadata`, and `timeupdate` events until it is dropped.

mod canvas;
mod component;
mod playback;
mod renderer;
mod style;
mod surface;
mod window;

pub use canvas::*;
pub use component::*;
pub use playback::*;
pub use renderer::*;
pub use style::*;
pub use surface::*;
pub use window::*;
