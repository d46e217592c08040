//! Brick grid
//!
//! A fixed columns × rows array of bricks, stored column-major so iteration
//! order matches collision order. Screen rectangles are derived from the
//! column/row index by [`BrickGrid::layout`] and shared by rendering and
//! collision.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::BRICK_COLOR;

/// Brick status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickStatus {
    Alive,
    Destroyed,
}

/// A single grid cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub column: usize,
    pub row: usize,
    pub status: BrickStatus,
    /// RGB color
    pub color: u32,
    /// Screen rectangle, written by `layout`
    pub rect: Rect,
}

impl Brick {
    pub fn is_alive(&self) -> bool {
        self.status == BrickStatus::Alive
    }
}

/// Parameters that map a cell index to a screen rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub cell_width: f32,
    pub cell_height: f32,
    pub padding: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl GridLayout {
    /// Rectangle of the cell at (column, row)
    pub fn cell_rect(&self, column: usize, row: usize) -> Rect {
        Rect::new(
            self.offset_x + column as f32 * (self.cell_width + self.padding),
            self.offset_y + row as f32 * (self.cell_height + self.padding),
            self.cell_width,
            self.cell_height,
        )
    }

    /// Right and bottom screen edges of a full grid
    pub fn extent(&self, columns: usize, rows: usize) -> (f32, f32) {
        let last = self.cell_rect(columns.saturating_sub(1), rows.saturating_sub(1));
        (last.right(), last.bottom())
    }
}

/// Brick grid for one level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrickGrid {
    columns: usize,
    rows: usize,
    /// Column-major: index = column * rows + row
    cells: Vec<Brick>,
}

impl BrickGrid {
    /// Every cell alive, default color, zero rectangle
    pub fn new(columns: usize, rows: usize) -> Self {
        Self::with_color(columns, rows, BRICK_COLOR)
    }

    pub fn with_color(columns: usize, rows: usize, color: u32) -> Self {
        let mut cells = Vec::with_capacity(columns * rows);
        for column in 0..columns {
            for row in 0..rows {
                cells.push(Brick {
                    column,
                    row,
                    status: BrickStatus::Alive,
                    color,
                    rect: Rect::default(),
                });
            }
        }
        Self {
            columns,
            rows,
            cells,
        }
    }

    /// Compute the rectangle of every alive cell
    pub fn layout(&mut self, layout: &GridLayout) {
        for brick in self.cells.iter_mut().filter(|b| b.is_alive()) {
            brick.rect = layout.cell_rect(brick.column, brick.row);
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Total cell count (columns × rows)
    pub fn total(&self) -> usize {
        self.cells.len()
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<&Brick> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.cells.get(column * self.rows + row)
    }

    pub fn status(&self, column: usize, row: usize) -> Option<BrickStatus> {
        self.cell(column, row).map(|b| b.status)
    }

    /// Mark a cell destroyed. Returns false if it was already destroyed or
    /// out of range; destroyed cells never come back.
    pub fn destroy(&mut self, column: usize, row: usize) -> bool {
        if column >= self.columns || row >= self.rows {
            return false;
        }
        let brick = &mut self.cells[column * self.rows + row];
        if !brick.is_alive() {
            return false;
        }
        brick.status = BrickStatus::Destroyed;
        true
    }

    /// Cells in collision order (column-major, then row)
    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.cells.iter()
    }

    pub fn iter_alive(&self) -> impl Iterator<Item = &Brick> {
        self.cells.iter().filter(|b| b.is_alive())
    }

    pub fn alive_count(&self) -> usize {
        self.iter_alive().count()
    }

    pub fn destroyed_count(&self) -> usize {
        self.total() - self.alive_count()
    }

    pub fn is_cleared(&self) -> bool {
        self.alive_count() == 0
    }

    /// Center of a cell's rectangle
    pub fn center(&self, column: usize, row: usize) -> Option<Vec2> {
        self.cell(column, row).map(|b| b.rect.center())
    }
}
