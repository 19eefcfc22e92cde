//! Uniform grid layout.
//!
//! Tiles an ordered list of labels into a bounding rectangle, row-major,
//! with every cell the same size. Cell height is capped so that short lists
//! do not produce oversized boxes; the leftover height is left empty.

use glam::DVec2;
use placemat_core::{LayoutError, Rect};

/// Grid layout configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    /// Number of columns (at least 1)
    pub columns: usize,
    /// Gap between cells, both axes
    pub gap: f64,
    /// Upper bound on cell height
    pub max_cell_height: f64,
}

/// Derived grid dimensions for a given container and item count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    pub rows: usize,
    pub columns: usize,
    pub cell_width: f64,
    pub cell_height: f64,
    /// Whether the height was capped by `max_cell_height`
    pub clamped: bool,
}

/// One labeled cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement<'a> {
    pub rect: Rect,
    pub label: &'a str,
    pub row: usize,
    pub column: usize,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::new(1)
    }
}

impl GridLayout {
    /// Create a grid with `columns` columns, no gap and no height cap.
    pub fn new(columns: usize) -> Self {
        Self {
            columns,
            gap: 0.0,
            max_cell_height: f64::INFINITY,
        }
    }

    /// Set the gap between cells.
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Set the cell height cap.
    pub fn with_max_cell_height(mut self, max_cell_height: f64) -> Self {
        self.max_cell_height = max_cell_height;
        self
    }

    /// Check the column count, gap and height cap, independent of any
    /// container.
    pub fn validate_arguments(&self) -> Result<(), LayoutError> {
        if self.columns < 1 {
            return Err(LayoutError::invalid("grid needs at least 1 column"));
        }
        if !(self.gap.is_finite() && self.gap >= 0.0) {
            return Err(LayoutError::invalid(format!(
                "grid gap must be non-negative, got {}",
                self.gap
            )));
        }
        if !(self.max_cell_height > 0.0) {
            return Err(LayoutError::invalid(format!(
                "max cell height must be positive, got {}",
                self.max_cell_height
            )));
        }
        Ok(())
    }

    fn validate(&self, container: &Rect) -> Result<(), LayoutError> {
        self.validate_arguments()?;
        if !container.has_area() {
            return Err(LayoutError::invalid(format!(
                "grid bounds must have positive size, got {container}"
            )));
        }
        Ok(())
    }

    /// Compute rows and cell size for `count` items.
    ///
    /// Returns `None` for an empty grid.
    pub fn measure(&self, container: Rect, count: usize) -> Result<Option<GridMetrics>, LayoutError> {
        self.validate(&container)?;
        if count == 0 {
            return Ok(None);
        }

        let columns = self.columns;
        let rows = count.div_ceil(columns);

        let cell_width = (container.width - self.gap * (columns - 1) as f64) / columns as f64;
        let fill_height = (container.height - self.gap * (rows - 1) as f64) / rows as f64;

        if !(cell_width > 0.0) {
            return Err(LayoutError::invalid(format!(
                "{columns} columns with gap {} do not fit in width {}",
                self.gap, container.width
            )));
        }
        if !(fill_height > 0.0) {
            return Err(LayoutError::invalid(format!(
                "{rows} rows with gap {} do not fit in height {}",
                self.gap, container.height
            )));
        }

        let clamped = fill_height > self.max_cell_height;
        let cell_height = if clamped { self.max_cell_height } else { fill_height };

        Ok(Some(GridMetrics {
            rows,
            columns,
            cell_width,
            cell_height,
            clamped,
        }))
    }

    /// Place every label into its cell, in reading order.
    pub fn layout<'a, S: AsRef<str>>(
        &self,
        container: Rect,
        labels: &'a [S],
    ) -> Result<Vec<Placement<'a>>, LayoutError> {
        match self.measure(container, labels.len())? {
            Some(metrics) => Ok(self.place(container, &metrics, labels)),
            None => Ok(Vec::new()),
        }
    }

    /// Place labels using metrics already returned by [`measure`](Self::measure)
    /// for the same container and label count.
    pub fn place<'a, S: AsRef<str>>(
        &self,
        container: Rect,
        metrics: &GridMetrics,
        labels: &'a [S],
    ) -> Vec<Placement<'a>> {
        let size = DVec2::new(metrics.cell_width, metrics.cell_height);
        let pitch = size + DVec2::splat(self.gap);
        let origin = container.origin();

        labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let row = i / metrics.columns;
                let column = i % metrics.columns;
                let offset = DVec2::new(column as f64, row as f64) * pitch;
                Placement {
                    rect: Rect::from_vecs(origin + offset, size),
                    label: label.as_ref(),
                    row,
                    column,
                }
            })
            .collect()
    }
}

/// Tile `labels` into `bounds` with `columns` columns.
///
/// Shorthand for `GridLayout::new(columns).with_gap(gap)
/// .with_max_cell_height(max_cell_height).layout(bounds, labels)`.
pub fn layout<'a, S: AsRef<str>>(
    bounds: Rect,
    labels: &'a [S],
    columns: usize,
    gap: f64,
    max_cell_height: f64,
) -> Result<Vec<Placement<'a>>, LayoutError> {
    GridLayout::new(columns)
        .with_gap(gap)
        .with_max_cell_height(max_cell_height)
        .layout(bounds, labels)
}
