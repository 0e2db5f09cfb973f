//! Grid layout builder for navigation tests.

use crate::{
    engine::Engine,
    error::Result,
    geom::Rect,
    key::FocusKey,
    node::FocusableSpec,
};

/// A rectangular grid of equally sized cells, registered under an optional
/// parent. Cells are keyed `{prefix}_{column}_{row}`.
#[derive(Debug, Clone)]
pub struct Grid {
    /// Key prefix for cells.
    prefix: String,
    /// Number of columns.
    columns: usize,
    /// Number of rows.
    rows: usize,
    /// Cell width and height.
    size: f64,
    /// Space between cells.
    gap: f64,
    /// Top-left corner of the grid.
    origin: (f64, f64),
    /// Parent key for every cell.
    parent: Option<String>,
}

impl Grid {
    /// A grid of `columns` by `rows` 100-unit cells with 50-unit gaps.
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            prefix: "cell".into(),
            columns,
            rows,
            size: 100.0,
            gap: 50.0,
            origin: (0.0, 0.0),
            parent: None,
        }
    }

    /// Set the key prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the cell size.
    pub fn size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// Set the gap between cells.
    pub fn gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Offset the whole grid.
    pub fn origin(mut self, x: f64, y: f64) -> Self {
        self.origin = (x, y);
        self
    }

    /// Register cells under this parent.
    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Key of the cell at `(column, row)`.
    pub fn key(&self, column: usize, row: usize) -> String {
        format!("{}_{column}_{row}", self.prefix)
    }

    /// Rect of the cell at `(column, row)`.
    pub fn rect(&self, column: usize, row: usize) -> Rect {
        let pitch = self.size + self.gap;
        Rect::new(
            self.origin.0 + column as f64 * pitch,
            self.origin.1 + row as f64 * pitch,
            self.size,
            self.size,
        )
    }

    /// The bounding rect of all cells.
    pub fn bounds(&self) -> Rect {
        let pitch = self.size + self.gap;
        Rect::new(
            self.origin.0,
            self.origin.1,
            (self.columns as f64 * pitch - self.gap).max(0.0),
            (self.rows as f64 * pitch - self.gap).max(0.0),
        )
    }

    /// Register every cell, row by row.
    pub fn build(&self, engine: &mut Engine) -> Result<Vec<FocusKey>> {
        let mut keys = Vec::with_capacity(self.columns * self.rows);
        for row in 0..self.rows {
            for column in 0..self.columns {
                let mut spec =
                    FocusableSpec::keyed(self.key(column, row)).rect(self.rect(column, row));
                if let Some(p) = &self.parent {
                    spec = spec.parent(p.clone());
                }
                keys.push(engine.add(spec)?);
            }
        }
        Ok(keys)
    }
}
