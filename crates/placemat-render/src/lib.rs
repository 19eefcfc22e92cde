//! Scene building and the rendering backend boundary.
//!
//! A [`Scene`] is the ordered list of boxes to draw, each with its resolved
//! style. Backends implement [`SlideBackend`] and receive the scene one box
//! at a time through [`Scene::render`].

mod backend;
mod scene;

pub use backend::{RecordingBackend, SlideBackend};
pub use scene::{build_scene, DrawBox, Scene};
