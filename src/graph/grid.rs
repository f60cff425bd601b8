use crate::foundation::core::{BoundingBox, Coord};
use crate::foundation::error::{TextfxError, TextfxResult};
use smallvec::SmallVec;
use std::collections::HashSet;

/// Cell graph with 4-neighbour connectivity.
///
/// Nodes are kept in row-major order so iteration (and every deterministic algorithm built on
/// it) is stable across runs.
#[derive(Clone, Debug)]
pub struct Grid {
    nodes: Vec<Coord>,
    members: HashSet<Coord>,
}

impl Grid {
    /// Every cell of `bounds`.
    pub fn from_bounds(bounds: BoundingBox) -> TextfxResult<Self> {
        Self::from_coords(bounds.coords())
    }

    /// Only the given cells, e.g. the positions occupied by text. Duplicates are ignored.
    pub fn from_coords(coords: impl IntoIterator<Item = Coord>) -> TextfxResult<Self> {
        let members: HashSet<Coord> = coords.into_iter().collect();
        if members.is_empty() {
            return Err(TextfxError::validation("grid must contain at least one cell"));
        }
        let mut nodes: Vec<Coord> = members.iter().copied().collect();
        nodes.sort_unstable();
        Ok(Self { nodes, members })
    }

    pub fn nodes(&self) -> &[Coord] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false` for a constructed grid.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, c: Coord) -> bool {
        self.members.contains(&c)
    }

    /// In-grid neighbours of `c` in up, right, down, left order.
    pub fn neighbours(&self, c: Coord) -> SmallVec<[Coord; 4]> {
        [c.offset(-1, 0), c.offset(0, 1), c.offset(1, 0), c.offset(0, -1)]
            .into_iter()
            .filter(|n| self.members.contains(n))
            .collect()
    }

    pub fn bounds(&self) -> BoundingBox {
        let first = self.nodes[0];
        self.nodes.iter().fold(
            BoundingBox {
                min_row: first.row,
                max_row: first.row,
                min_column: first.column,
                max_column: first.column,
            },
            |bb, c| BoundingBox {
                min_row: bb.min_row.min(c.row),
                max_row: bb.max_row.max(c.row),
                min_column: bb.min_column.min(c.column),
                max_column: bb.max_column.max(c.column),
            },
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/grid.rs"]
mod tests;
