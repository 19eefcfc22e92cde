//! Styling configuration.
//!
//! A [`Theme`] is the raw form read from a placemat description: a palette
//! of named colors and a set of named box styles whose colors may refer to
//! palette entries. [`Theme::resolve`] turns it into an immutable
//! [`ResolvedTheme`] that scene building consumes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::DescriptionError;
use crate::types::Color;

/// Horizontal text alignment inside a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Raw styling configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Typeface for every run of text
    pub font_family: String,
    /// Spacing between grid cells (inches)
    pub cell_gap: f64,
    /// Upper bound on grid cell height (inches)
    pub max_cell_height: f64,
    /// Named colors
    pub palette: IndexMap<String, Color>,
    /// Named box styles
    pub styles: IndexMap<String, StyleSpec>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            cell_gap: 0.05,
            max_cell_height: 0.45,
            palette: IndexMap::new(),
            styles: IndexMap::new(),
        }
    }
}

/// A box style as written in a description. Colors are `#RRGGBB` literals or
/// palette names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSpec {
    pub fill: Option<String>,
    pub font_color: String,
    pub bold: bool,
    /// Font size in points
    pub font_size: f64,
    pub outline: Option<OutlineSpec>,
    pub align: TextAlign,
    /// Rotate text to read bottom to top
    pub vertical_text: bool,
    /// Inner text margin on every side, in points
    pub text_inset: f64,
}

impl Default for StyleSpec {
    fn default() -> Self {
        Self {
            fill: None,
            font_color: "#000000".to_string(),
            bold: false,
            font_size: 8.0,
            outline: None,
            align: TextAlign::Center,
            vertical_text: false,
            text_inset: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineSpec {
    pub color: String,
    /// Line width in points
    #[serde(default = "default_outline_width")]
    pub width: f64,
}

fn default_outline_width() -> f64 {
    0.75
}

/// A box border.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outline {
    pub color: Color,
    /// Line width in points
    pub width: f64,
}

/// Fully resolved styling for a single box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxStyle {
    pub fill: Option<Color>,
    pub font_color: Color,
    pub bold: bool,
    pub font_size: f64,
    pub outline: Option<Outline>,
    pub align: TextAlign,
    pub vertical_text: bool,
    pub text_inset: f64,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            fill: None,
            font_color: Color::BLACK,
            bold: false,
            font_size: 8.0,
            outline: None,
            align: TextAlign::Center,
            vertical_text: false,
            text_inset: 1.0,
        }
    }
}

/// Immutable styling configuration with every color reference resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTheme {
    pub font_family: String,
    pub cell_gap: f64,
    pub max_cell_height: f64,
    styles: IndexMap<String, BoxStyle>,
}

impl ResolvedTheme {
    /// Look up a style by name.
    pub fn style(&self, name: &str) -> Result<&BoxStyle, DescriptionError> {
        self.styles
            .get(name)
            .ok_or_else(|| DescriptionError::UnknownStyle { name: name.to_string() })
    }

    /// Style names in declaration order.
    pub fn style_names(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }
}

impl Theme {
    /// Resolve palette references and validate every style.
    pub fn resolve(&self) -> Result<ResolvedTheme, DescriptionError> {
        let styles = self
            .styles
            .iter()
            .map(|(name, spec)| {
                self.resolve_style(name, spec)
                    .map(|style| (name.clone(), style))
            })
            .collect::<Result<IndexMap<_, _>, _>>()?;

        Ok(ResolvedTheme {
            font_family: self.font_family.clone(),
            cell_gap: self.cell_gap,
            max_cell_height: self.max_cell_height,
            styles,
        })
    }

    fn resolve_style(&self, name: &str, spec: &StyleSpec) -> Result<BoxStyle, DescriptionError> {
        if !(spec.font_size.is_finite() && spec.font_size > 0.0) {
            return Err(DescriptionError::InvalidStyle {
                style: name.to_string(),
                reason: format!("font size must be positive, got {}", spec.font_size),
            });
        }
        if !(spec.text_inset.is_finite() && spec.text_inset >= 0.0) {
            return Err(DescriptionError::InvalidStyle {
                style: name.to_string(),
                reason: format!("text inset must be non-negative, got {}", spec.text_inset),
            });
        }

        let fill = spec
            .fill
            .as_deref()
            .map(|reference| self.resolve_color(name, reference))
            .transpose()?;
        let font_color = self.resolve_color(name, &spec.font_color)?;

        let outline = match &spec.outline {
            Some(outline) => {
                if !(outline.width.is_finite() && outline.width > 0.0) {
                    return Err(DescriptionError::InvalidStyle {
                        style: name.to_string(),
                        reason: format!("outline width must be positive, got {}", outline.width),
                    });
                }
                Some(Outline {
                    color: self.resolve_color(name, &outline.color)?,
                    width: outline.width,
                })
            }
            None => None,
        };

        Ok(BoxStyle {
            fill,
            font_color,
            bold: spec.bold,
            font_size: spec.font_size,
            outline,
            align: spec.align,
            vertical_text: spec.vertical_text,
            text_inset: spec.text_inset,
        })
    }

    fn resolve_color(&self, style: &str, reference: &str) -> Result<Color, DescriptionError> {
        if reference.starts_with('#') {
            return Color::from_hex(reference).ok_or_else(|| DescriptionError::InvalidColor {
                value: reference.to_string(),
            });
        }
        self.palette
            .get(reference)
            .copied()
            .ok_or_else(|| DescriptionError::UnknownColor {
                style: style.to_string(),
                name: reference.to_string(),
            })
    }
}
