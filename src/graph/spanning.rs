//! Spanning-tree and search orders over a [`Grid`].
//!
//! Every algorithm yields one [`Link`] per node. The resulting link order is what effects
//! consume, e.g. as the sequence fed to a [`crate::animation::easer::SequenceEaser`].
//! Grids that are not connected are covered as a forest: when the frontier runs dry a new
//! root is drawn from the remaining nodes and reported with `from: None`.

use crate::foundation::core::Coord;
use crate::foundation::error::{TextfxError, TextfxResult};
use crate::graph::grid::Grid;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

/// Connection made by a spanning algorithm. Roots have no `from`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Link {
    pub from: Option<Coord>,
    pub to: Coord,
}

pub trait SpanningAlgorithm {
    /// Connect the next node, or `None` once every node is linked.
    fn step(&mut self) -> Option<Link>;

    /// Links produced so far, in order.
    fn link_order(&self) -> &[Link];

    fn is_complete(&self) -> bool;

    /// Step until done and return the full link order.
    fn run(&mut self) -> &[Link] {
        while self.step().is_some() {}
        self.link_order()
    }
}

/// Bookkeeping shared by every algorithm: visited set, root selection and output.
#[derive(Debug)]
struct Forest {
    grid: Grid,
    start: Option<Coord>,
    visited: HashSet<Coord>,
    order: Vec<Link>,
    rng: StdRng,
}

impl Forest {
    fn new(grid: &Grid, start: Option<Coord>, seed: u64) -> TextfxResult<Self> {
        if let Some(s) = start
            && !grid.contains(s)
        {
            return Err(TextfxError::validation(format!(
                "start node ({}, {}) is not part of the grid",
                s.row, s.column
            )));
        }
        Ok(Self {
            grid: grid.clone(),
            start,
            visited: HashSet::with_capacity(grid.len()),
            order: Vec::with_capacity(grid.len()),
            rng: StdRng::seed_from_u64(seed),
        })
    }

    fn is_complete(&self) -> bool {
        self.visited.len() == self.grid.len()
    }

    /// Pick the next root: the explicit start first, then a random unvisited node.
    fn next_root(&mut self) -> Option<Coord> {
        if let Some(s) = self.start.take() {
            return Some(s);
        }
        let remaining: Vec<Coord> = self
            .grid
            .nodes()
            .iter()
            .copied()
            .filter(|c| !self.visited.contains(c))
            .collect();
        remaining.choose(&mut self.rng).copied()
    }

    fn link(&mut self, from: Option<Coord>, to: Coord) -> Link {
        self.visited.insert(to);
        let link = Link { from, to };
        self.order.push(link);
        link
    }

    fn unvisited_neighbours(&self, c: Coord) -> impl Iterator<Item = Coord> + '_ {
        self.grid
            .neighbours(c)
            .into_iter()
            .filter(move |n| !self.visited.contains(n))
    }
}

/// Prim's algorithm with uniformly random frontier edges.
#[derive(Debug)]
pub struct PrimsSimple {
    forest: Forest,
    frontier: Vec<(Coord, Coord)>,
}

impl PrimsSimple {
    pub fn new(grid: &Grid, start: Option<Coord>, seed: u64) -> TextfxResult<Self> {
        Ok(Self {
            forest: Forest::new(grid, start, seed)?,
            frontier: Vec::new(),
        })
    }

    fn expand(&mut self, from: Coord) {
        let edges: Vec<(Coord, Coord)> = self
            .forest
            .unvisited_neighbours(from)
            .map(|n| (from, n))
            .collect();
        self.frontier.extend(edges);
    }
}

impl SpanningAlgorithm for PrimsSimple {
    fn step(&mut self) -> Option<Link> {
        if self.forest.is_complete() {
            return None;
        }
        while !self.frontier.is_empty() {
            let i = self.forest.rng.random_range(0..self.frontier.len());
            let (from, to) = self.frontier.swap_remove(i);
            if self.forest.visited.contains(&to) {
                continue;
            }
            let link = self.forest.link(Some(from), to);
            self.expand(to);
            return Some(link);
        }
        let root = self.forest.next_root()?;
        let link = self.forest.link(None, root);
        self.expand(root);
        Some(link)
    }

    fn link_order(&self) -> &[Link] {
        &self.forest.order
    }

    fn is_complete(&self) -> bool {
        self.forest.is_complete()
    }
}

/// Prim's algorithm over random node weights: the lightest frontier node is always next.
#[derive(Debug)]
pub struct PrimsWeighted {
    forest: Forest,
    weights: HashMap<Coord, u32>,
    frontier: BinaryHeap<Reverse<(u32, Coord, Coord)>>,
}

impl PrimsWeighted {
    pub fn new(grid: &Grid, start: Option<Coord>, seed: u64) -> TextfxResult<Self> {
        let mut forest = Forest::new(grid, start, seed)?;
        let weights = grid
            .nodes()
            .iter()
            .map(|&c| (c, forest.rng.random_range(0..=u32::from(u16::MAX))))
            .collect();
        Ok(Self {
            forest,
            weights,
            frontier: BinaryHeap::new(),
        })
    }

    /// Weight assigned to `c`, if it belongs to the grid.
    pub fn weight(&self, c: Coord) -> Option<u32> {
        self.weights.get(&c).copied()
    }

    fn expand(&mut self, from: Coord) {
        let next: Vec<Coord> = self.forest.unvisited_neighbours(from).collect();
        for n in next {
            let w = self.weights.get(&n).copied().unwrap_or(u32::MAX);
            self.frontier.push(Reverse((w, n, from)));
        }
    }
}

impl SpanningAlgorithm for PrimsWeighted {
    fn step(&mut self) -> Option<Link> {
        if self.forest.is_complete() {
            return None;
        }
        while let Some(Reverse((_, to, from))) = self.frontier.pop() {
            if self.forest.visited.contains(&to) {
                continue;
            }
            let link = self.forest.link(Some(from), to);
            self.expand(to);
            return Some(link);
        }
        let root = self.forest.next_root()?;
        let link = self.forest.link(None, root);
        self.expand(root);
        Some(link)
    }

    fn link_order(&self) -> &[Link] {
        &self.forest.order
    }

    fn is_complete(&self) -> bool {
        self.forest.is_complete()
    }
}

/// Depth-first maze carving: walk to a random unvisited neighbour, backtrack at dead ends.
#[derive(Debug)]
pub struct RecursiveBacktracker {
    forest: Forest,
    stack: Vec<Coord>,
}

impl RecursiveBacktracker {
    pub fn new(grid: &Grid, start: Option<Coord>, seed: u64) -> TextfxResult<Self> {
        Ok(Self {
            forest: Forest::new(grid, start, seed)?,
            stack: Vec::new(),
        })
    }
}

impl SpanningAlgorithm for RecursiveBacktracker {
    fn step(&mut self) -> Option<Link> {
        if self.forest.is_complete() {
            return None;
        }
        while let Some(&top) = self.stack.last() {
            let options: Vec<Coord> = self.forest.unvisited_neighbours(top).collect();
            match options.choose(&mut self.forest.rng).copied() {
                Some(next) => {
                    self.stack.push(next);
                    return Some(self.forest.link(Some(top), next));
                }
                None => {
                    self.stack.pop();
                }
            }
        }
        let root = self.forest.next_root()?;
        self.stack.push(root);
        Some(self.forest.link(None, root))
    }

    fn link_order(&self) -> &[Link] {
        &self.forest.order
    }

    fn is_complete(&self) -> bool {
        self.forest.is_complete()
    }
}

/// Breadth-first search. Only root selection is randomized; expansion follows the grid's
/// fixed neighbour order.
#[derive(Debug)]
pub struct BreadthFirst {
    forest: Forest,
    queue: VecDeque<(Coord, Coord)>,
}

impl BreadthFirst {
    pub fn new(grid: &Grid, start: Option<Coord>, seed: u64) -> TextfxResult<Self> {
        Ok(Self {
            forest: Forest::new(grid, start, seed)?,
            queue: VecDeque::new(),
        })
    }

    fn enqueue(&mut self, from: Coord) {
        let next: Vec<Coord> = self.forest.unvisited_neighbours(from).collect();
        self.queue.extend(next.into_iter().map(|n| (from, n)));
    }
}

impl SpanningAlgorithm for BreadthFirst {
    fn step(&mut self) -> Option<Link> {
        if self.forest.is_complete() {
            return None;
        }
        while let Some((from, to)) = self.queue.pop_front() {
            if self.forest.visited.contains(&to) {
                continue;
            }
            let link = self.forest.link(Some(from), to);
            self.enqueue(to);
            return Some(link);
        }
        let root = self.forest.next_root()?;
        let link = self.forest.link(None, root);
        self.enqueue(root);
        Some(link)
    }

    fn link_order(&self) -> &[Link] {
        &self.forest.order
    }

    fn is_complete(&self) -> bool {
        self.forest.is_complete()
    }
}

/// Run `algo` to completion and return only the visited node order.
#[tracing::instrument(level = "debug", skip(algo))]
pub fn node_order(algo: &mut dyn SpanningAlgorithm) -> Vec<Coord> {
    let order: Vec<Coord> = algo.run().iter().map(|l| l.to).collect();
    tracing::debug!(nodes = order.len(), "spanning order built");
    order
}

#[cfg(test)]
#[path = "../../tests/unit/graph/spanning.rs"]
mod tests;
