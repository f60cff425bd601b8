use crate::foundation::error::{TextfxError, TextfxResult};

pub use kurbo::Point;

/// Stable identifier handed out by the canvas collaborator, one per character.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct CharacterId(pub u32);

/// Cell position on the terminal grid.
///
/// Rows grow downward, columns grow to the right. Negative values are valid and describe
/// positions outside the visible canvas (e.g. spawn points above the text).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Coord {
    pub row: i32,
    pub column: i32,
}

impl Coord {
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Destructure as `(column, row)` for x/y ordered APIs.
    pub const fn column_row(self) -> (i32, i32) {
        (self.column, self.row)
    }

    pub const fn row_column(self) -> (i32, i32) {
        (self.row, self.column)
    }

    /// Continuous position with `x = column`, `y = row`.
    pub fn to_point(self) -> Point {
        Point::new(f64::from(self.column), f64::from(self.row))
    }

    /// Nearest cell to a continuous position.
    pub fn from_point(p: Point) -> Self {
        Self {
            row: p.y.round() as i32,
            column: p.x.round() as i32,
        }
    }

    pub fn offset(self, d_row: i32, d_column: i32) -> Self {
        Self {
            row: self.row + d_row,
            column: self.column + d_column,
        }
    }
}

impl From<(i32, i32)> for Coord {
    /// Interprets the tuple as `(row, column)`.
    fn from((row, column): (i32, i32)) -> Self {
        Self { row, column }
    }
}

/// Inclusive cell rectangle.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct BoundingBox {
    pub min_row: i32,
    pub max_row: i32,
    pub min_column: i32,
    pub max_column: i32,
}

impl BoundingBox {
    /// Create a validated box with `min <= max` on both axes.
    pub fn new(min_row: i32, max_row: i32, min_column: i32, max_column: i32) -> TextfxResult<Self> {
        if min_row > max_row || min_column > max_column {
            return Err(TextfxError::validation(format!(
                "bounding box must have min <= max \
                 (rows {min_row}..={max_row}, columns {min_column}..={max_column})"
            )));
        }
        Ok(Self {
            min_row,
            max_row,
            min_column,
            max_column,
        })
    }

    /// Smallest box enclosing every coordinate, or `None` for an empty input.
    pub fn enclosing(coords: impl IntoIterator<Item = Coord>) -> Option<Self> {
        let mut it = coords.into_iter();
        let first = it.next()?;
        let mut bb = Self {
            min_row: first.row,
            max_row: first.row,
            min_column: first.column,
            max_column: first.column,
        };
        for c in it {
            bb.min_row = bb.min_row.min(c.row);
            bb.max_row = bb.max_row.max(c.row);
            bb.min_column = bb.min_column.min(c.column);
            bb.max_column = bb.max_column.max(c.column);
        }
        Some(bb)
    }

    pub fn height(self) -> u32 {
        self.max_row.abs_diff(self.min_row) + 1
    }

    pub fn width(self) -> u32 {
        self.max_column.abs_diff(self.min_column) + 1
    }

    /// Geometric center; may fall between cells.
    pub fn center(self) -> Point {
        Point::new(
            (f64::from(self.min_column) + f64::from(self.max_column)) / 2.0,
            (f64::from(self.min_row) + f64::from(self.max_row)) / 2.0,
        )
    }

    pub fn contains(self, c: Coord) -> bool {
        (self.min_row..=self.max_row).contains(&c.row)
            && (self.min_column..=self.max_column).contains(&c.column)
    }

    /// All cells in row-major order.
    pub fn coords(self) -> impl Iterator<Item = Coord> {
        (self.min_row..=self.max_row).flat_map(move |row| {
            (self.min_column..=self.max_column).map(move |column| Coord { row, column })
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
