//! The toroidal grid and its wraparound geometry.

use std::fmt;

/// Unique identifier for a contest participant.
pub type OwnerId = u8;

/// The owner id the engine assigns to the local agent.
pub const ME: OwnerId = 0;

/// A location on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Loc {
    /// Row index.
    pub row: u16,
    /// Column index.
    pub col: u16,
}

impl Loc {
    /// Create a new location.
    #[must_use]
    pub const fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four orthogonal movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Decreasing row.
    North,
    /// Increasing column.
    East,
    /// Increasing row.
    South,
    /// Decreasing column.
    West,
}

impl Direction {
    /// All directions in protocol order (n, e, s, w).
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Row/column delta of a single step in this direction.
    #[must_use]
    pub const fn delta(self) -> (i64, i64) {
        match self {
            Self::North => (-1, 0),
            Self::East => (0, 1),
            Self::South => (1, 0),
            Self::West => (0, -1),
        }
    }

    /// The single-letter wire form of this direction.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::North => 'n',
            Self::East => 'e',
            Self::South => 's',
            Self::West => 'w',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Contents of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// Open land.
    Land,
    /// Land where a unit died this turn.
    Dead,
    /// Impassable water.
    Water,
    /// A food resource.
    Food,
    /// A live unit and its owner.
    Unit(OwnerId),
}

impl Cell {
    /// Check if the cell can ever be entered (everything but water).
    #[must_use]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Water)
    }

    /// Check if the cell is free to move onto this turn.
    ///
    /// Water, food and live units block movement; a dead marker does not.
    #[must_use]
    pub const fn is_unoccupied(self) -> bool {
        matches!(self, Self::Land | Self::Dead)
    }
}

/// Add a signed offset to a coordinate and reduce into `[0, size)`.
pub(super) fn wrap_add(coord: u16, delta: i64, size: u16) -> u16 {
    let wrapped = (i64::from(coord) + delta).rem_euclid(i64::from(size));
    // rem_euclid lands in [0, size) and size is a u16
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        wrapped as u16
    }
}

/// The toroidal game grid.
///
/// Every coordinate is reduced modulo the grid dimensions before indexing,
/// so the grid has no edges and all geometry queries are total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Number of rows.
    rows: u16,
    /// Number of columns.
    cols: u16,
    /// Cells stored in row-major order.
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new grid filled with land.
    ///
    /// Returns `None` if either dimension is zero.
    #[must_use]
    pub fn new(rows: u16, cols: u16) -> Option<Self> {
        if rows == 0 || cols == 0 {
            return None;
        }

        let size = usize::from(rows) * usize::from(cols);
        let cells = vec![Cell::Land; size];

        Some(Self { rows, cols, cells })
    }

    /// Get the number of rows.
    #[must_use]
    pub const fn rows(&self) -> u16 {
        self.rows
    }

    /// Get the number of columns.
    #[must_use]
    pub const fn cols(&self) -> u16 {
        self.cols
    }

    /// Reduce a location modulo the grid dimensions.
    #[must_use]
    pub const fn wrap(&self, loc: Loc) -> Loc {
        Loc::new(loc.row % self.rows, loc.col % self.cols)
    }

    /// Convert a location to an index into the cell array, wrapping first.
    pub(super) fn index(&self, loc: Loc) -> usize {
        let loc = self.wrap(loc);
        usize::from(loc.row) * usize::from(self.cols) + usize::from(loc.col)
    }

    /// Get the cell at the given location.
    #[must_use]
    pub fn get(&self, loc: Loc) -> Cell {
        self.cells[self.index(loc)]
    }

    /// Set the cell at the given location.
    pub fn set(&mut self, loc: Loc, cell: Cell) {
        let idx = self.index(loc);
        self.cells[idx] = cell;
    }

    /// Calculate the location one step away in the given direction,
    /// wrapping around the edges.
    #[must_use]
    pub fn destination(&self, loc: Loc, direction: Direction) -> Loc {
        let (d_row, d_col) = direction.delta();
        Loc::new(
            wrap_add(loc.row % self.rows, d_row, self.rows),
            wrap_add(loc.col % self.cols, d_col, self.cols),
        )
    }

    /// Check if the location can ever be entered (not water).
    #[must_use]
    pub fn passable(&self, loc: Loc) -> bool {
        self.get(loc).is_passable()
    }

    /// Check if the location is free to move onto this turn.
    #[must_use]
    pub fn unoccupied(&self, loc: Loc) -> bool {
        self.get(loc).is_unoccupied()
    }

    /// Manhattan distance between two locations on the torus.
    ///
    /// Per axis this is the shorter of the forward and wraparound spans,
    /// which makes it the minimum number of orthogonal steps ignoring water.
    #[must_use]
    pub fn distance(&self, a: Loc, b: Loc) -> u32 {
        let a = self.wrap(a);
        let b = self.wrap(b);
        let d_row = a.row.abs_diff(b.row);
        let d_col = a.col.abs_diff(b.col);
        u32::from(d_row.min(self.rows - d_row)) + u32::from(d_col.min(self.cols - d_col))
    }

    /// Determine the fastest directions from `from` toward `to`.
    ///
    /// Returns a fixed-size array and count to avoid heap allocation; valid
    /// directions are in indices `0..count`. Each axis contributes at most
    /// one direction when one way around is strictly shorter, and both when
    /// the two ways are exactly equal (the caller may pick either). An axis
    /// on which the locations agree contributes none.
    #[must_use]
    pub fn directions(&self, from: Loc, to: Loc) -> ([Direction; 4], u8) {
        let from = self.wrap(from);
        let to = self.wrap(to);
        let mut result = [Direction::North; 4];
        let mut count = 0u8;

        let push = |result: &mut [Direction; 4], count: &mut u8, d: Direction| {
            result[usize::from(*count)] = d;
            *count += 1;
        };

        let half_rows = self.rows / 2;
        if from.row < to.row {
            let span = to.row - from.row;
            if span >= half_rows {
                push(&mut result, &mut count, Direction::North);
            }
            if span <= half_rows {
                push(&mut result, &mut count, Direction::South);
            }
        } else if to.row < from.row {
            let span = from.row - to.row;
            if span >= half_rows {
                push(&mut result, &mut count, Direction::South);
            }
            if span <= half_rows {
                push(&mut result, &mut count, Direction::North);
            }
        }

        let half_cols = self.cols / 2;
        if from.col < to.col {
            let span = to.col - from.col;
            if span >= half_cols {
                push(&mut result, &mut count, Direction::West);
            }
            if span <= half_cols {
                push(&mut result, &mut count, Direction::East);
            }
        } else if to.col < from.col {
            let span = from.col - to.col;
            if span >= half_cols {
                push(&mut result, &mut count, Direction::East);
            }
            if span <= half_cols {
                push(&mut result, &mut count, Direction::West);
            }
        }

        (result, count)
    }

    /// Iterate over all locations and cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Loc, Cell)> + '_ {
        let cols = usize::from(self.cols);
        self.cells.iter().enumerate().map(move |(idx, &cell)| {
            #[allow(clippy::cast_possible_truncation)]
            let loc = Loc::new((idx / cols) as u16, (idx % cols) as u16);
            (loc, cell)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_wraps_all_edges() {
        let grid = Grid::new(4, 6).unwrap();
        assert_eq!(
            grid.destination(Loc::new(0, 0), Direction::North),
            Loc::new(3, 0)
        );
        assert_eq!(
            grid.destination(Loc::new(3, 5), Direction::South),
            Loc::new(0, 5)
        );
        assert_eq!(
            grid.destination(Loc::new(2, 5), Direction::East),
            Loc::new(2, 0)
        );
        assert_eq!(
            grid.destination(Loc::new(2, 0), Direction::West),
            Loc::new(2, 5)
        );
    }

    #[test]
    fn test_destination_accepts_out_of_range_input() {
        let grid = Grid::new(4, 6).unwrap();
        // inputs beyond the bounds reduce before stepping
        assert_eq!(
            grid.destination(Loc::new(4, 6), Direction::East),
            Loc::new(0, 1)
        );
    }

    #[test]
    fn test_four_step_loop_returns_home() {
        let grid = Grid::new(5, 5).unwrap();
        let start = Loc::new(0, 0);
        let mut loc = start;
        for direction in Direction::ALL {
            loc = grid.destination(loc, direction);
        }
        assert_eq!(loc, start);
    }

    #[test]
    fn test_passable_and_unoccupied() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set(Loc::new(0, 0), Cell::Water);
        grid.set(Loc::new(0, 1), Cell::Food);
        grid.set(Loc::new(0, 2), Cell::Unit(1));
        grid.set(Loc::new(1, 0), Cell::Dead);

        assert!(!grid.passable(Loc::new(0, 0)));
        assert!(grid.passable(Loc::new(0, 1)));
        assert!(grid.passable(Loc::new(1, 0)));

        assert!(!grid.unoccupied(Loc::new(0, 0)));
        assert!(!grid.unoccupied(Loc::new(0, 1)));
        assert!(!grid.unoccupied(Loc::new(0, 2)));
        assert!(grid.unoccupied(Loc::new(1, 0)));
        assert!(grid.unoccupied(Loc::new(2, 2)));
    }

    #[test]
    fn test_distance_prefers_wraparound() {
        let grid = Grid::new(10, 10).unwrap();
        assert_eq!(grid.distance(Loc::new(0, 0), Loc::new(9, 0)), 1);
        assert_eq!(grid.distance(Loc::new(0, 0), Loc::new(0, 9)), 1);
        assert_eq!(grid.distance(Loc::new(1, 1), Loc::new(4, 5)), 7);
        assert_eq!(grid.distance(Loc::new(2, 2), Loc::new(2, 2)), 0);
    }

    #[test]
    fn test_directions_direct_path() {
        let grid = Grid::new(10, 10).unwrap();
        let (dirs, count) = grid.directions(Loc::new(1, 1), Loc::new(3, 4));
        assert_eq!(&dirs[..usize::from(count)], [Direction::South, Direction::East]);
    }

    #[test]
    fn test_directions_wraparound_path() {
        let grid = Grid::new(10, 10).unwrap();
        let (dirs, count) = grid.directions(Loc::new(0, 0), Loc::new(9, 9));
        assert_eq!(&dirs[..usize::from(count)], [Direction::North, Direction::West]);
    }

    #[test]
    fn test_directions_tie_yields_both() {
        let grid = Grid::new(10, 10).unwrap();
        // row span of exactly rows/2 is the same length both ways
        let (dirs, count) = grid.directions(Loc::new(0, 3), Loc::new(5, 3));
        assert_eq!(&dirs[..usize::from(count)], [Direction::North, Direction::South]);
    }

    #[test]
    fn test_directions_same_location_is_empty() {
        let grid = Grid::new(10, 10).unwrap();
        let (_, count) = grid.directions(Loc::new(4, 4), Loc::new(4, 4));
        assert_eq!(count, 0);
    }
}
