//! # crashview: accident detection overlays
//!
//! `crashview` renders the output of an external accident-detection backend
//! on top of a playing video. The backend does all of the inference; this crate
//! decides *what* to draw and *when*, independent of the host that draws it.
//!
//! ## Overview
//!
//! - **Model**: Detection boxes, timeline markers, and the backend's analysis result.
//! - **Overlay**: A renderer that repaints a drawing surface whenever playback time changes.
//! - **Event**: Listener registration with guaranteed removal, for hosts without a DOM.
//! - **Timeline**: Marker positions along the video's duration bar.
//! - **Dashboard**: The page state for one uploaded video, plus the alert and report.
//! - **Upload**: The request/response contract shared by the native and browser clients.
//!
mod error;
mod fixed;
mod model;

pub mod dashboard;
pub mod event;
pub mod overlay;
pub mod timeline;
pub mod upload;

pub use dashboard::{Alert, Dashboard, Report};
pub use error::*;
pub use fixed::to_fixed;
pub use model::*;
pub use overlay::{Canvas, Overlay, Renderer, Surface, Window};
pub use timeline::TimelineStrip;
