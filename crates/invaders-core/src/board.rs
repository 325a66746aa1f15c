/// Grid of invader cells, `true` while the invader is alive.
///
/// Cells only ever go from alive to dead; [`Board::reset`] is the sole way
/// back to a full grid and is used when a new game starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    columns: usize,
    cells: Vec<bool>,
}

impl Board {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![true; rows * columns],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    fn index(&self, row: usize, column: usize) -> Option<usize> {
        (row < self.rows && column < self.columns).then(|| row * self.columns + column)
    }

    /// Out-of-range cells read as dead.
    #[inline]
    pub fn is_alive(&self, row: usize, column: usize) -> bool {
        self.index(row, column)
            .map(|i| self.cells[i])
            .unwrap_or(false)
    }

    /// Kill a cell. Returns true if it was alive; dead or out-of-range cells
    /// are left untouched.
    pub fn mark_hit(&mut self, row: usize, column: usize) -> bool {
        match self.index(row, column) {
            Some(i) if self.cells[i] => {
                self.cells[i] = false;
                true
            }
            _ => false,
        }
    }

    pub fn is_all_dead(&self) -> bool {
        self.cells.iter().all(|alive| !alive)
    }

    pub fn dead_count(&self) -> usize {
        self.cells.iter().filter(|alive| !**alive).count()
    }

    pub fn alive_count(&self) -> usize {
        self.cells.len() - self.dead_count()
    }

    /// First live row in `column`, searching from the bottom row upward.
    pub fn lowest_alive_row(&self, column: usize) -> Option<usize> {
        (0..self.rows).rev().find(|&r| self.is_alive(r, column))
    }

    /// Bottom-most row that still holds any live cell.
    pub fn lowest_alive_row_index(&self) -> Option<usize> {
        (0..self.rows)
            .rev()
            .find(|&r| (0..self.columns).any(|c| self.is_alive(r, c)))
    }

    pub fn row(&self, row: usize) -> &[bool] {
        let start = (row.min(self.rows)) * self.columns;
        let end = ((row + 1).min(self.rows)) * self.columns;
        &self.cells[start..end.max(start)]
    }

    /// Iterate `(row, column)` of every live cell in row-major order.
    pub fn alive_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(move |(i, _)| (i / columns, i % columns))
    }

    pub fn reset(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = true);
    }
}
