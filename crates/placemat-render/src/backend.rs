//! Rendering backend boundary.

use placemat_core::ExportError;

use crate::scene::{DrawBox, Scene};

/// A surface that accepts draw commands.
///
/// `begin` is called once before any box, with the whole scene for slide
/// size and metadata; `draw_box` is called for every box in draw order.
pub trait SlideBackend {
    fn begin(&mut self, scene: &Scene) -> Result<(), ExportError>;

    fn draw_box(&mut self, command: &DrawBox, font_family: &str) -> Result<(), ExportError>;
}

/// Backend that records what it is asked to draw.
#[derive(Debug, Default, Clone)]
pub struct RecordingBackend {
    pub title: Option<String>,
    pub boxes: Vec<DrawBox>,
}

impl SlideBackend for RecordingBackend {
    fn begin(&mut self, scene: &Scene) -> Result<(), ExportError> {
        self.title = Some(scene.title.clone());
        self.boxes.clear();
        Ok(())
    }

    fn draw_box(&mut self, command: &DrawBox, _font_family: &str) -> Result<(), ExportError> {
        self.boxes.push(command.clone());
        Ok(())
    }
}
