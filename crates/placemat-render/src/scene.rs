//! Scene building from a computed layout and a resolved theme.

use placemat_core::{BoxStyle, DescriptionError, ExportError, Rect, ResolvedTheme};
use placemat_layout::{BoxKind, Layout};
use tracing::{debug, debug_span};

use crate::backend::SlideBackend;

/// One box to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawBox {
    pub rect: Rect,
    pub text: String,
    pub style: BoxStyle,
    pub kind: BoxKind,
}

/// Everything needed to draw a single slide.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Slide size in inches
    pub width: f64,
    pub height: f64,
    /// Typeface for every box
    pub font_family: String,
    /// Document title
    pub title: String,
    commands: Vec<DrawBox>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(width: f64, height: f64, font_family: impl Into<String>) -> Self {
        Self {
            width,
            height,
            font_family: font_family.into(),
            title: String::new(),
            commands: Vec::new(),
        }
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Append a box.
    pub fn push(&mut self, command: DrawBox) {
        self.commands.push(command);
    }

    /// Boxes in draw order.
    pub fn commands(&self) -> &[DrawBox] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Replay the scene into a backend.
    pub fn render<B: SlideBackend + ?Sized>(&self, backend: &mut B) -> Result<(), ExportError> {
        backend.begin(self)?;
        for command in &self.commands {
            backend.draw_box(command, &self.font_family)?;
        }
        Ok(())
    }
}

/// Build a renderable scene from a layout and its theme.
pub fn build_scene(layout: &Layout, theme: &ResolvedTheme) -> Result<Scene, DescriptionError> {
    let _span = debug_span!("build_scene", boxes = layout.len()).entered();

    let mut scene = Scene::new(layout.slide.width, layout.slide.height, theme.font_family.clone());
    for placed in &layout.boxes {
        let style = theme.style(&placed.style)?;
        scene.push(DrawBox {
            rect: placed.rect,
            text: placed.text.clone(),
            style: *style,
            kind: placed.kind,
        });
    }

    debug!(commands = scene.len(), "scene built");
    Ok(scene)
}
