//! Grid geometry: cells, vertices, edge-variable numbering and adjacency queries.

use std::collections::HashMap;
use thiserror::Error;

/// Sentinel used by [`Cell::hint`] to mean "no constraint on this cell".
pub const NO_HINT: i8 = -1;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board must have at least one row and one column, got {rows}x{columns}")]
    EmptyGrid { rows: usize, columns: usize },
    #[error("row {row} has {actual} hints, expected {expected} to match {columns} columns")]
    RowLengthMismatch {
        row: usize,
        expected: usize,
        actual: usize,
        columns: usize,
    },
    #[error("hint {hint} at cell ({row}, {column}) is out of range; expected -1..=3")]
    InvalidHint { row: usize, column: usize, hint: i32 },
}

/// A vertex position, addressed by `(row, column)`, `0 <= row <= rows`, `0 <= col <= columns`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub fn new(row: usize, col: usize) -> Self {
        Pos { row, col }
    }
}

/// A grid cell with an optional hint and its four incident edge-variable ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cell {
    pub hint: i8,
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl Cell {
    pub fn edges(&self) -> [u32; 4] {
        [self.top, self.bottom, self.left, self.right]
    }
}

/// A grid vertex with its (up to four) incident edge-variable ids. A missing
/// incident edge (vertex lies on the grid boundary) is stored as sentinel `0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vertex {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl Vertex {
    pub fn edges(&self) -> [u32; 4] {
        [self.top, self.right, self.bottom, self.left]
    }
}

/// `id` of the horizontal edge at vertex row `i`, column `j` (`0 <= i <= rows`, `0 <= j < columns`).
fn horiz_id(i: usize, j: usize, columns: usize) -> u32 {
    (i * columns + j + 1) as u32
}

/// `id` of the vertical edge at vertex row `i`, column `j` (`0 <= i < rows`, `0 <= j <= columns`).
fn vert_id(i: usize, j: usize, rows: usize, columns: usize) -> u32 {
    ((rows + 1) * columns + j * rows + i + 1) as u32
}

/// A rectangular Slitherlink board: cell hints, vertex geometry, edge numbering
/// and the adjacency map decoded from the most recent accepted model.
#[derive(Debug, Clone)]
pub struct Board {
    pub rows: usize,
    pub columns: usize,
    cells: Vec<Vec<Cell>>,
    vertices: Vec<Vec<Vertex>>,
    pub solved: bool,
    pub graph: HashMap<Pos, Vec<Pos>>,
}

impl Board {
    /// Construct a board from row-major hints, validating dimensions and hint range.
    pub fn new(rows: usize, columns: usize, hints: Vec<Vec<i8>>) -> Result<Board, BoardError> {
        if rows == 0 || columns == 0 {
            return Err(BoardError::EmptyGrid { rows, columns });
        }
        if hints.len() != rows {
            return Err(BoardError::RowLengthMismatch {
                row: 0,
                expected: rows,
                actual: hints.len(),
                columns,
            });
        }

        let mut cells = Vec::with_capacity(rows);
        for (i, row) in hints.into_iter().enumerate() {
            if row.len() != columns {
                return Err(BoardError::RowLengthMismatch {
                    row: i,
                    expected: columns,
                    actual: row.len(),
                    columns,
                });
            }
            let mut cell_row = Vec::with_capacity(columns);
            for (j, hint) in row.into_iter().enumerate() {
                if !(-1..=3).contains(&hint) {
                    return Err(BoardError::InvalidHint {
                        row: i,
                        column: j,
                        hint: hint as i32,
                    });
                }
                cell_row.push(Cell {
                    hint,
                    ..Cell::default()
                });
            }
            cells.push(cell_row);
        }

        let vertices = vec![vec![Vertex::default(); columns + 1]; rows + 1];

        let mut board = Board {
            rows,
            columns,
            cells,
            vertices,
            solved: false,
            graph: HashMap::new(),
        };
        board.assign_edges();
        Ok(board)
    }

    /// Deterministically populates every cell's and vertex's four edge-id slots.
    /// Pure function of `rows, columns`; boundary-missing vertex edges get sentinel `0`.
    pub fn assign_edges(&mut self) {
        let (rows, columns) = (self.rows, self.columns);

        for i in 0..rows {
            for j in 0..columns {
                let cell = &mut self.cells[i][j];
                cell.top = horiz_id(i, j, columns);
                cell.bottom = horiz_id(i + 1, j, columns);
                cell.left = vert_id(i, j, rows, columns);
                cell.right = vert_id(i, j + 1, rows, columns);
            }
        }

        for i in 0..=rows {
            for j in 0..=columns {
                let vertex = &mut self.vertices[i][j];
                vertex.top = if i > 0 {
                    vert_id(i - 1, j, rows, columns)
                } else {
                    0
                };
                vertex.bottom = if i < rows {
                    vert_id(i, j, rows, columns)
                } else {
                    0
                };
                vertex.left = if j > 0 {
                    horiz_id(i, j - 1, columns)
                } else {
                    0
                };
                vertex.right = if j < columns {
                    horiz_id(i, j, columns)
                } else {
                    0
                };
            }
        }
    }

    /// Number of edge variables: `V = rows*(columns+1) + columns*(rows+1)`.
    pub fn num_edge_vars(&self) -> u32 {
        (self.rows * (self.columns + 1) + self.columns * (self.rows + 1)) as u32
    }

    pub fn cell(&self, i: usize, j: usize) -> &Cell {
        &self.cells[i][j]
    }

    pub fn vertex(&self, i: usize, j: usize) -> &Vertex {
        &self.vertices[i][j]
    }

    /// The id of the edge connecting two grid-adjacent vertex positions, or
    /// `None` if `a` and `b` are not orthogonally adjacent within the grid.
    pub fn edge_between(&self, a: Pos, b: Pos) -> Option<u32> {
        if a.row == b.row {
            let (lo, hi) = (a.col.min(b.col), a.col.max(b.col));
            if hi != lo + 1 || a.row > self.rows || hi > self.columns {
                return None;
            }
            Some(horiz_id(a.row, lo, self.columns))
        } else if a.col == b.col {
            let (lo, hi) = (a.row.min(b.row), a.row.max(b.row));
            if hi != lo + 1 || a.col > self.columns || hi > self.rows {
                return None;
            }
            Some(vert_id(lo, a.col, self.rows, self.columns))
        } else {
            None
        }
    }

    /// Structural copy with an independent adjacency map.
    pub fn deep_copy(&self) -> Board {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_hints() -> Vec<Vec<i8>> {
        vec![
            vec![-1, 2, 0, 2, -1],
            vec![-1, -1, 2, -1, -1],
            vec![-1, 2, 3, 2, -1],
            vec![-1, -1, 1, -1, -1],
            vec![3, -1, 3, 3, -1],
        ]
    }

    #[test]
    fn rejects_empty_grid() {
        assert_eq!(
            Board::new(0, 5, vec![]).unwrap_err(),
            BoardError::EmptyGrid { rows: 0, columns: 5 }
        );
    }

    #[test]
    fn rejects_out_of_range_hint() {
        let err = Board::new(1, 1, vec![vec![4]]).unwrap_err();
        assert_eq!(
            err,
            BoardError::InvalidHint {
                row: 0,
                column: 0,
                hint: 4
            }
        );
    }

    #[test]
    fn rejects_row_length_mismatch() {
        let err = Board::new(2, 2, vec![vec![-1, -1], vec![-1]]).unwrap_err();
        assert_eq!(
            err,
            BoardError::RowLengthMismatch {
                row: 1,
                expected: 2,
                actual: 1,
                columns: 2
            }
        );
    }

    #[test]
    fn numbering_matches_invariant_1() {
        let board = Board::new(5, 5, sample_hints()).unwrap();
        for i in 0..board.rows {
            for j in 0..board.columns - 1 {
                assert_eq!(board.cell(i, j).right, board.cell(i, j + 1).left);
            }
        }
        for i in 0..board.rows - 1 {
            for j in 0..board.columns {
                assert_eq!(board.cell(i, j).bottom, board.cell(i + 1, j).top);
            }
        }
    }

    #[test]
    fn edge_ids_cover_1_to_v_with_no_duplicates() {
        let board = Board::new(3, 4, vec![vec![-1; 4]; 3]).unwrap();
        let mut seen = std::collections::HashSet::new();
        for i in 0..board.rows {
            for j in 0..board.columns {
                for e in board.cell(i, j).edges() {
                    seen.insert(e);
                }
            }
        }
        assert_eq!(seen.len() as u32, board.num_edge_vars());
        assert_eq!(*seen.iter().min().unwrap(), 1);
        assert_eq!(*seen.iter().max().unwrap(), board.num_edge_vars());
    }

    #[test]
    fn vertex_sentinel_on_boundary() {
        let board = Board::new(2, 2, vec![vec![-1; 2]; 2]).unwrap();
        assert_eq!(board.vertex(0, 0).top, 0);
        assert_eq!(board.vertex(0, 0).left, 0);
        assert_eq!(board.vertex(2, 2).bottom, 0);
        assert_eq!(board.vertex(2, 2).right, 0);
        // an interior-ish vertex on a 2x2 board still has two sentinels on corners
        assert_ne!(board.vertex(1, 1).top, 0);
    }

    #[test]
    fn edge_between_matches_cell_fields() {
        let board = Board::new(2, 2, vec![vec![-1; 2]; 2]).unwrap();
        let cell = board.cell(0, 0);
        assert_eq!(
            board.edge_between(Pos::new(0, 0), Pos::new(0, 1)),
            Some(cell.top)
        );
        assert_eq!(
            board.edge_between(Pos::new(0, 0), Pos::new(1, 0)),
            Some(cell.left)
        );
    }

    #[test]
    fn deep_copy_is_independent() {
        let mut board = Board::new(2, 2, vec![vec![-1; 2]; 2]).unwrap();
        let copy = board.deep_copy();
        board.graph.insert(Pos::new(0, 0), vec![Pos::new(0, 1)]);
        assert!(copy.graph.is_empty());
        assert_eq!(board.rows, copy.rows);
        assert_eq!(board.columns, copy.columns);
    }
}
