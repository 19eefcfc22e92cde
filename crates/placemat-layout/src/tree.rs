//! Layout tree interpretation.
//!
//! Walks a [`Placemat`] description from the root region down, splitting
//! regions for rows and columns and tiling grids, and collects every box
//! that must be drawn in document order.

use placemat_core::{
    Axis, GridNode, LayoutError, LayoutNode, Placemat, Rect, SectionNode, SplitNode, TrackSize,
};
use tracing::{debug, debug_span};

use crate::grid::GridLayout;
use crate::tracks;

/// What a placed box represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxKind {
    /// A standalone box
    Label,
    /// The header strip of a section
    Header,
    /// One grid cell
    Cell { row: usize, column: usize },
}

/// A box with its final position, text and style name.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBox {
    pub rect: Rect,
    pub text: String,
    pub style: String,
    pub kind: BoxKind,
}

/// The computed layout of a whole slide.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    /// The slide region
    pub slide: Rect,
    /// Boxes in draw order
    pub boxes: Vec<PlacedBox>,
}

impl Layout {
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Bounding box of everything placed, or `None` for an empty layout.
    pub fn content_bounds(&self) -> Option<Rect> {
        self.boxes
            .iter()
            .map(|placed| placed.rect)
            .reduce(|acc, rect| acc.union(&rect))
    }

    /// Find the first box with the given text.
    pub fn find(&self, text: &str) -> Option<&PlacedBox> {
        self.boxes.iter().find(|placed| placed.text == text)
    }
}

/// Grid spacing used when a grid or section does not override it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    pub cell_gap: f64,
    pub max_cell_height: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            cell_gap: 0.05,
            max_cell_height: 0.45,
        }
    }
}

/// Compute the layout of a placemat using the grid defaults of its theme.
pub fn compute_layout(placemat: &Placemat) -> Result<Layout, LayoutError> {
    let options = LayoutOptions {
        cell_gap: placemat.theme.cell_gap,
        max_cell_height: placemat.theme.max_cell_height,
    };
    compute_layout_with_options(placemat, &options)
}

/// Compute the layout of a placemat with explicit grid defaults.
pub fn compute_layout_with_options(
    placemat: &Placemat,
    options: &LayoutOptions,
) -> Result<Layout, LayoutError> {
    let _span = debug_span!("compute_layout", title = %placemat.title).entered();

    let slide = placemat.slide_rect();
    if !slide.has_area() {
        return Err(LayoutError::invalid(format!(
            "slide must have positive size, got {slide}"
        )));
    }

    let mut builder = LayoutBuilder {
        options,
        boxes: Vec::new(),
        path: Vec::new(),
    };
    builder.place(&placemat.root, slide, "root".to_string())?;

    debug!(boxes = builder.boxes.len(), "layout complete");
    Ok(Layout {
        slide,
        boxes: builder.boxes,
    })
}

struct LayoutBuilder<'a> {
    options: &'a LayoutOptions,
    boxes: Vec<PlacedBox>,
    path: Vec<String>,
}

impl<'a> LayoutBuilder<'a> {
    fn place(&mut self, node: &LayoutNode, region: Rect, segment: String) -> Result<(), LayoutError> {
        self.path.push(segment);
        let result = self.place_node(node, region);
        self.path.pop();
        result
    }

    fn fail(&self, err: LayoutError) -> LayoutError {
        err.at(&self.path.join("/"))
    }

    fn require_area(&self, region: Rect) -> Result<(), LayoutError> {
        if region.has_area() {
            Ok(())
        } else {
            Err(self.fail(LayoutError::invalid(format!(
                "region must have positive size, got {region}"
            ))))
        }
    }

    fn place_node(&mut self, node: &LayoutNode, region: Rect) -> Result<(), LayoutError> {
        match node {
            LayoutNode::Label(label) => {
                self.require_area(region)?;
                self.boxes.push(PlacedBox {
                    rect: region,
                    text: label.text.clone(),
                    style: label.style.clone(),
                    kind: BoxKind::Label,
                });
                Ok(())
            }
            LayoutNode::Grid(grid) => self.place_grid(grid, region),
            LayoutNode::Section(section) => self.place_section(section, region),
            LayoutNode::Row(split) => self.place_split(split, Axis::Horizontal, region),
            LayoutNode::Column(split) => self.place_split(split, Axis::Vertical, region),
            LayoutNode::Inset(inset) => {
                let inner = region.inset(&inset.padding);
                self.require_area(inner)?;
                self.place(&inset.child, inner, inset.child.describe())
            }
            LayoutNode::Layers(layers) => {
                for (i, child) in layers.children.iter().enumerate() {
                    self.place(child, region, format!("{i}:{}", child.describe()))?;
                }
                Ok(())
            }
            LayoutNode::Spacer => Ok(()),
        }
    }

    fn place_split(&mut self, split: &SplitNode, axis: Axis, region: Rect) -> Result<(), LayoutError> {
        let sizes: Vec<TrackSize> = split.children.iter().map(|track| track.size).collect();
        let regions =
            tracks::split(region, axis, &sizes, split.gap).map_err(|err| self.fail(err))?;

        for (i, (track, child_region)) in split.children.iter().zip(regions).enumerate() {
            self.place(&track.node, child_region, format!("{i}:{}", track.node.describe()))?;
        }
        Ok(())
    }

    fn grid_layout(&self, columns: usize, cell_gap: Option<f64>, max_cell_height: Option<f64>) -> GridLayout {
        GridLayout::new(columns)
            .with_gap(cell_gap.unwrap_or(self.options.cell_gap))
            .with_max_cell_height(max_cell_height.unwrap_or(self.options.max_cell_height))
    }

    fn place_cells(
        &mut self,
        grid: GridLayout,
        region: Rect,
        labels: &[String],
        style: &str,
    ) -> Result<(), LayoutError> {
        let Some(metrics) = grid.measure(region, labels.len()).map_err(|err| self.fail(err))? else {
            return Ok(());
        };
        debug!(
            path = %self.path.join("/"),
            cells = labels.len(),
            rows = metrics.rows,
            columns = metrics.columns,
            clamped = metrics.clamped,
            "grid placed"
        );

        let placements = grid.place(region, &metrics, labels);
        self.boxes.extend(placements.into_iter().map(|cell| PlacedBox {
            rect: cell.rect,
            text: cell.label.to_string(),
            style: style.to_string(),
            kind: BoxKind::Cell {
                row: cell.row,
                column: cell.column,
            },
        }));
        Ok(())
    }

    fn place_grid(&mut self, grid: &GridNode, region: Rect) -> Result<(), LayoutError> {
        let layout = self.grid_layout(grid.columns, grid.cell_gap, grid.max_cell_height);
        self.place_cells(layout, region, &grid.labels, &grid.cell_style)
    }

    fn place_section(&mut self, section: &SectionNode, region: Rect) -> Result<(), LayoutError> {
        self.require_area(region)?;

        let header_height = section.header_height;
        if !(header_height > 0.0 && header_height <= region.height) {
            return Err(self.fail(LayoutError::invalid(format!(
                "header height {header_height} does not fit in region height {}",
                region.height
            ))));
        }
        if !(section.header_gap.is_finite() && section.header_gap >= 0.0) {
            return Err(self.fail(LayoutError::invalid(format!(
                "header gap must be non-negative, got {}",
                section.header_gap
            ))));
        }

        let grid = self.grid_layout(section.columns, section.cell_gap, section.max_cell_height);
        grid.validate_arguments().map_err(|err| self.fail(err))?;

        self.boxes.push(PlacedBox {
            rect: Rect::new(region.x, region.y, region.width, header_height),
            text: section.title.clone(),
            style: section.header_style.clone(),
            kind: BoxKind::Header,
        });

        if section.labels.is_empty() {
            return Ok(());
        }

        let offset = header_height + section.header_gap;
        let body = Rect::new(region.x, region.y + offset, region.width, region.height - offset);
        self.place_cells(grid, body, &section.labels, &section.cell_style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use placemat_core::{Padding, SlideSize, Theme, Track};

    fn placemat(width: f64, height: f64, root: LayoutNode) -> Placemat {
        Placemat {
            title: "Test".to_string(),
            slide: SlideSize { width, height },
            theme: Theme::default(),
            root,
        }
    }

    fn section(title: &str, labels: &[&str], columns: usize) -> LayoutNode {
        LayoutNode::Section(SectionNode {
            title: title.to_string(),
            header_style: "header".to_string(),
            header_height: 0.5,
            header_gap: 0.5,
            labels: labels.iter().map(|s| s.to_string()).collect(),
            columns,
            cell_style: "cell".to_string(),
            cell_gap: Some(0.0),
            max_cell_height: Some(10.0),
        })
    }

    #[test]
    fn test_single_box_fills_slide() {
        let layout = compute_layout(&placemat(4.0, 3.0, LayoutNode::label("Hello", "title"))).unwrap();
        assert_eq!(layout.len(), 1);
        assert_eq!(layout.boxes[0].rect, Rect::new(0.0, 0.0, 4.0, 3.0));
        assert_eq!(layout.boxes[0].kind, BoxKind::Label);
        assert_eq!(layout.boxes[0].style, "title");
    }

    #[test]
    fn test_section_header_and_cells() {
        let layout = compute_layout(&placemat(4.0, 5.0, section("Data", &["A", "B", "C", "D"], 2)))
            .unwrap();

        assert_eq!(layout.len(), 5);
        let header = &layout.boxes[0];
        assert_eq!(header.kind, BoxKind::Header);
        assert_eq!(header.rect, Rect::new(0.0, 0.0, 4.0, 0.5));

        // Body is 4 x 4 starting at y = 1
        let d = layout.find("D").unwrap();
        assert_eq!(d.kind, BoxKind::Cell { row: 1, column: 1 });
        assert_eq!(d.rect, Rect::new(2.0, 3.0, 2.0, 2.0));
        assert_eq!(d.style, "cell");
    }

    #[test]
    fn test_empty_section_emits_header_only() {
        let layout = compute_layout(&placemat(4.0, 1.0, section("Empty", &[], 3))).unwrap();
        assert_eq!(layout.len(), 1);
        assert_eq!(layout.boxes[0].kind, BoxKind::Header);
    }

    #[test]
    fn test_row_of_sections_uses_theme_defaults() {
        let root = LayoutNode::row(
            0.1,
            vec![
                Track::span(1, LayoutNode::grid(["a", "b"], 1, "cell")),
                Track::span(1, LayoutNode::grid(["c"], 1, "cell")),
            ],
        );
        let layout = compute_layout(&placemat(2.1, 4.0, root)).unwrap();

        let a = layout.find("a").unwrap();
        let b = layout.find("b").unwrap();
        let c = layout.find("c").unwrap();
        assert!((a.rect.width - 1.0).abs() < 1e-9);
        // Default max cell height of 0.45 applies
        assert!((a.rect.height - 0.45).abs() < 1e-9);
        assert!((b.rect.y - 0.5).abs() < 1e-9);
        assert!((c.rect.x - 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_inset_and_layers() {
        let root = LayoutNode::layers(vec![
            LayoutNode::inset(Padding::uniform(1.0), LayoutNode::label("inner", "s")),
            LayoutNode::label("outer", "s"),
            LayoutNode::Spacer,
        ]);
        let layout = compute_layout(&placemat(4.0, 3.0, root)).unwrap();
        assert_eq!(layout.len(), 2);
        assert_eq!(layout.find("inner").unwrap().rect, Rect::new(1.0, 1.0, 2.0, 1.0));
        assert_eq!(layout.find("outer").unwrap().rect, Rect::new(0.0, 0.0, 4.0, 3.0));
        assert_eq!(layout.content_bounds(), Some(Rect::new(0.0, 0.0, 4.0, 3.0)));
    }

    #[test]
    fn test_draw_order_is_document_order() {
        let root = LayoutNode::column(
            0.0,
            vec![
                Track::fixed(1.0, LayoutNode::label("first", "s")),
                Track::span(1, LayoutNode::grid(["second", "third"], 2, "s")),
                Track::fixed(1.0, LayoutNode::label("fourth", "s")),
            ],
        );
        let layout = compute_layout(&placemat(2.0, 4.0, root)).unwrap();
        let texts: Vec<&str> = layout.boxes.iter().map(|b| b.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third", "fourth"]);
    }

    #[test]
    fn test_error_carries_node_path() {
        let root = LayoutNode::row(
            0.0,
            vec![
                Track::span(1, LayoutNode::Spacer),
                Track::span(1, LayoutNode::grid(["x"], 0, "cell")),
            ],
        );
        let err = compute_layout(&placemat(2.0, 1.0, root)).unwrap_err();
        let LayoutError::InvalidArgument { reason } = err;
        assert!(reason.starts_with("root/1:grid[1]: "), "{reason}");
    }

    #[test]
    fn test_empty_section_still_checks_grid_arguments() {
        let result = compute_layout(&placemat(4.0, 1.0, section("Empty", &[], 0)));
        let Err(LayoutError::InvalidArgument { reason }) = result else {
            panic!("zero-column section accepted");
        };
        assert!(reason.starts_with("root: "), "{reason}");

        let result = compute_layout(&placemat(4.0, 1.0, LayoutNode::grid(Vec::<String>::new(), 0, "cell")));
        assert!(result.is_err());
    }

    #[test]
    fn test_inset_collapsing_region_fails() {
        let root = LayoutNode::inset(Padding::uniform(2.0), LayoutNode::label("x", "s"));
        assert!(compute_layout(&placemat(4.0, 3.0, root)).is_err());
    }

    #[test]
    fn test_header_taller_than_region_fails() {
        let layout = compute_layout(&placemat(4.0, 0.25, section("Tall", &["a"], 1)));
        assert!(layout.is_err());
    }

    #[test]
    fn test_invalid_slide() {
        assert!(compute_layout(&placemat(0.0, 3.0, LayoutNode::Spacer)).is_err());
    }

    #[test]
    fn test_empty_layout() {
        let layout = compute_layout(&placemat(1.0, 1.0, LayoutNode::Spacer)).unwrap();
        assert!(layout.is_empty());
        assert_eq!(layout.content_bounds(), None);
    }
}
