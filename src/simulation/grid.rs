use crate::simulation::cell::Cell;

/// How neighbour lookups leave the grid edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgeWrap {
    /// Torus: -1 wraps to the last index and `len` wraps to 0 on both axes
    #[default]
    Toroidal,
    /// Torus with the historical off-by-one: on the row axis `len` wraps to 1
    LegacyOffByOne,
}

/// Fixed-size grid of cells, stored row-major.
///
/// Cells are addressed as (x, y) with x in `0..cols` and y in `0..rows`.
/// Dimensions never change after creation.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    edge_wrap: EdgeWrap,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell dead
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "Grid must have at least one cell");
        Self {
            rows,
            cols,
            edge_wrap: EdgeWrap::default(),
            cells: vec![Cell::default(); rows * cols],
        }
    }

    pub fn with_edge_wrap(mut self, edge_wrap: EdgeWrap) -> Self {
        self.edge_wrap = edge_wrap;
        self
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub const fn cols(&self) -> usize {
        self.cols
    }

    pub const fn edge_wrap(&self) -> EdgeWrap {
        self.edge_wrap
    }

    const fn index(&self, x: usize, y: usize) -> usize {
        y * self.cols + x
    }

    /// Set both states of a cell; out-of-bounds positions are ignored
    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        if x < self.cols && y < self.rows {
            let idx = self.index(x, y);
            self.cells[idx] = Cell::new(alive);
        }
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.alive).count()
    }

    /// Iterate over all cells with their positions, row by row
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, &Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, cell)| (idx % self.cols, idx / self.cols, cell))
    }

    /// Count live neighbours among the 8 surrounding cells, wrapping at the edges
    pub fn neighbor_count(&self, x: usize, y: usize) -> u8 {
        (-1..=1isize)
            .flat_map(|dy| (-1..=1isize).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .filter(|&(dx, dy)| {
                let nx = wrap(x as isize + dx, self.cols, 0);
                let ny = match self.edge_wrap {
                    EdgeWrap::Toroidal => wrap(y as isize + dy, self.rows, 0),
                    EdgeWrap::LegacyOffByOne => wrap(y as isize + dy, self.rows, 1),
                };
                self.cells[self.index(nx, ny)].alive
            })
            .count() as u8
    }

    /// Advance one generation.
    ///
    /// Every next state is computed from the current states before any of
    /// them is committed, so the neighbour counts all see the same generation.
    pub fn advance(&mut self) {
        for idx in 0..self.cells.len() {
            let neighbors = self.neighbor_count(idx % self.cols, idx / self.cols);
            let cell = &mut self.cells[idx];
            cell.alive_next = cell.evolve(neighbors);
        }

        self.cells.iter_mut().for_each(Cell::commit);
    }
}

/// Map a coordinate at most one step outside `0..len` back inside.
/// `past_end` is where `len` lands.
fn wrap(coord: isize, len: usize, past_end: usize) -> usize {
    let len_i = len as isize;
    if coord < 0 {
        len - 1
    } else if coord >= len_i {
        past_end % len
    } else {
        coord as usize
    }
}
