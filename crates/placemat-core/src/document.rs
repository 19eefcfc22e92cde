//! Declarative placemat description.
//!
//! A placemat is a tree of regions. The root receives the whole slide;
//! rows and columns split their region into tracks, insets shrink it, layers
//! hand the same region to every child, and the leaves (boxes, grids and
//! sections) are what ends up drawn.

use serde::{Deserialize, Serialize};

use crate::errors::DescriptionError;
use crate::theme::{ResolvedTheme, Theme};
use crate::types::{Padding, Rect};

/// A complete placemat description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placemat {
    /// Document title, written to the output's metadata
    #[serde(default)]
    pub title: String,
    pub slide: SlideSize,
    #[serde(default)]
    pub theme: Theme,
    pub root: LayoutNode,
}

impl Placemat {
    /// Parse a description from JSON.
    pub fn from_json(source: &str) -> Result<Self, DescriptionError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Resolve and validate the theme.
    pub fn resolve_theme(&self) -> Result<ResolvedTheme, DescriptionError> {
        self.theme.resolve()
    }

    /// The region handed to the root node.
    pub fn slide_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.slide.width, self.slide.height)
    }
}

/// Slide dimensions in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlideSize {
    pub width: f64,
    pub height: f64,
}

/// A node of the layout tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutNode {
    /// A single box filling the region
    #[serde(rename = "box")]
    Label(LabelNode),
    /// Labels tiled into the region
    Grid(GridNode),
    /// Header strip with a grid below it
    Section(SectionNode),
    /// Split left to right
    Row(SplitNode),
    /// Split top to bottom
    Column(SplitNode),
    /// Shrink the region
    Inset(InsetNode),
    /// Give every child the same region
    Layers(LayersNode),
    /// Draw nothing
    Spacer,
}

impl LayoutNode {
    pub fn label(text: impl Into<String>, style: impl Into<String>) -> Self {
        LayoutNode::Label(LabelNode {
            text: text.into(),
            style: style.into(),
        })
    }

    pub fn grid<S: Into<String>>(
        labels: impl IntoIterator<Item = S>,
        columns: usize,
        cell_style: impl Into<String>,
    ) -> Self {
        LayoutNode::Grid(GridNode {
            labels: labels.into_iter().map(Into::into).collect(),
            columns,
            cell_style: cell_style.into(),
            cell_gap: None,
            max_cell_height: None,
        })
    }

    pub fn row(gap: f64, children: Vec<Track>) -> Self {
        LayoutNode::Row(SplitNode { gap, children })
    }

    pub fn column(gap: f64, children: Vec<Track>) -> Self {
        LayoutNode::Column(SplitNode { gap, children })
    }

    pub fn inset(padding: Padding, child: LayoutNode) -> Self {
        LayoutNode::Inset(InsetNode {
            padding,
            child: Box::new(child),
        })
    }

    pub fn layers(children: Vec<LayoutNode>) -> Self {
        LayoutNode::Layers(LayersNode { children })
    }

    /// Short description used in error paths and logs.
    pub fn describe(&self) -> String {
        match self {
            LayoutNode::Label(node) => format!("box {:?}", node.text),
            LayoutNode::Grid(node) => format!("grid[{}]", node.labels.len()),
            LayoutNode::Section(node) => format!("section {:?}", node.title),
            LayoutNode::Row(_) => "row".to_string(),
            LayoutNode::Column(_) => "column".to_string(),
            LayoutNode::Inset(_) => "inset".to_string(),
            LayoutNode::Layers(_) => "layers".to_string(),
            LayoutNode::Spacer => "spacer".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelNode {
    pub text: String,
    pub style: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridNode {
    pub labels: Vec<String>,
    #[serde(default = "default_columns")]
    pub columns: usize,
    pub cell_style: String,
    /// Overrides the theme's cell gap
    #[serde(default)]
    pub cell_gap: Option<f64>,
    /// Overrides the theme's max cell height
    #[serde(default)]
    pub max_cell_height: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionNode {
    pub title: String,
    pub header_style: String,
    #[serde(default = "default_header_height")]
    pub header_height: f64,
    /// Space between the header and the first row of cells
    #[serde(default = "default_header_gap")]
    pub header_gap: f64,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default = "default_columns")]
    pub columns: usize,
    pub cell_style: String,
    #[serde(default)]
    pub cell_gap: Option<f64>,
    #[serde(default)]
    pub max_cell_height: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitNode {
    #[serde(default)]
    pub gap: f64,
    pub children: Vec<Track>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsetNode {
    pub padding: Padding,
    pub child: Box<LayoutNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayersNode {
    pub children: Vec<LayoutNode>,
}

/// One slot of a row or column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub size: TrackSize,
    pub node: LayoutNode,
}

impl Track {
    pub fn fixed(length: f64, node: LayoutNode) -> Self {
        Self { size: TrackSize::Fixed(length), node }
    }

    pub fn span(units: u32, node: LayoutNode) -> Self {
        Self { size: TrackSize::Span(units), node }
    }
}

/// Track sizing along the split axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackSize {
    /// Fixed length in inches
    Fixed(f64),
    /// Share of the remaining length, measured in unit columns
    Span(u32),
}

impl Default for TrackSize {
    fn default() -> Self {
        TrackSize::Span(1)
    }
}

fn default_columns() -> usize {
    1
}

fn default_header_height() -> f64 {
    0.35
}

fn default_header_gap() -> f64 {
    0.05
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r##"{
        "title": "Portfolio",
        "slide": { "width": 10, "height": 5 },
        "theme": {
            "palette": { "blue": "#003399" },
            "styles": {
                "header": { "fill": "blue", "font_color": "#FFFFFF", "bold": true },
                "cell": { "fill": "#FFFFFF", "outline": { "color": "blue", "width": 1.0 } }
            }
        },
        "root": {
            "kind": "row",
            "gap": 0.1,
            "children": [
                { "size": { "fixed": 2.0 }, "node": { "kind": "box", "text": "Security", "style": "header" } },
                { "node": {
                    "kind": "section",
                    "title": "Data",
                    "header_style": "header",
                    "cell_style": "cell",
                    "columns": 2,
                    "labels": ["A", "B", "C"]
                } },
                { "size": { "span": 2 }, "node": { "kind": "spacer" } }
            ]
        }
    }"##;

    #[test]
    fn test_parse_description() {
        let placemat = Placemat::from_json(SOURCE).unwrap();
        assert_eq!(placemat.title, "Portfolio");
        assert_eq!(placemat.slide_rect(), Rect::new(0.0, 0.0, 10.0, 5.0));
        assert_eq!(placemat.theme.font_family, "Arial");

        let LayoutNode::Row(row) = &placemat.root else {
            panic!("expected row root");
        };
        assert_eq!(row.children.len(), 3);
        assert_eq!(row.children[0].size, TrackSize::Fixed(2.0));
        assert_eq!(row.children[1].size, TrackSize::Span(1));
        assert_eq!(row.children[2].size, TrackSize::Span(2));
        assert_eq!(row.children[2].node, LayoutNode::Spacer);

        let LayoutNode::Section(section) = &row.children[1].node else {
            panic!("expected section");
        };
        assert_eq!(section.header_height, 0.35);
        assert_eq!(section.header_gap, 0.05);
        assert_eq!(section.columns, 2);
        assert_eq!(section.cell_gap, None);
    }

    #[test]
    fn test_resolve_theme_from_description() {
        let placemat = Placemat::from_json(SOURCE).unwrap();
        let theme = placemat.resolve_theme().unwrap();
        assert!(theme.style("cell").unwrap().outline.is_some());
    }

    #[test]
    fn test_malformed_description() {
        let result = Placemat::from_json(r#"{"slide": {"width": 1}}"#);
        assert!(matches!(result, Err(DescriptionError::Json(_))));
    }

    #[test]
    fn test_unknown_node_kind() {
        let source = r#"{"slide": {"width": 1, "height": 1}, "root": {"kind": "circle"}}"#;
        assert!(Placemat::from_json(source).is_err());
    }

    #[test]
    fn test_describe() {
        assert_eq!(LayoutNode::label("CE", "banner").describe(), "box \"CE\"");
        assert_eq!(LayoutNode::grid(["a", "b"], 1, "cell").describe(), "grid[2]");
    }
}
