//! CNF encoding of cell-hint cardinality constraints, vertex degree-parity
//! constraints, and corner rules. Produces only clauses that are *sound*:
//! every encoded clause is implied by "the true edges form a single simple
//! cycle respecting the cell hints."

use crate::board::{Board, NO_HINT};

pub type Literal = i64;
pub type Clause = Vec<Literal>;

/// `k=0`: none of the four edges is in the loop.
fn zero(e: [u32; 4]) -> Vec<Clause> {
    e.iter().map(|&x| vec![-(x as Literal)]).collect()
}

/// `k=1`: exactly one of the four edges is in the loop.
fn one(e: [u32; 4]) -> Vec<Clause> {
    let mut clauses = Vec::with_capacity(7);
    for i in 0..4 {
        for j in (i + 1)..4 {
            clauses.push(vec![-(e[i] as Literal), -(e[j] as Literal)]);
        }
    }
    clauses.push(e.iter().map(|&x| x as Literal).collect());
    clauses
}

/// `k=2`: exactly two of the four edges are in the loop.
fn two(e: [u32; 4]) -> Vec<Clause> {
    let mut clauses = Vec::with_capacity(8);
    for i in 0..4 {
        let mut positive: Vec<Literal> = Vec::with_capacity(3);
        let mut negative: Vec<Literal> = Vec::with_capacity(3);
        for (k, &x) in e.iter().enumerate() {
            if k == i {
                continue;
            }
            positive.push(x as Literal);
            negative.push(-(x as Literal));
        }
        clauses.push(positive);
        clauses.push(negative);
    }
    clauses
}

/// `k=3`: exactly three of the four edges are in the loop.
fn three(e: [u32; 4]) -> Vec<Clause> {
    let mut clauses = Vec::with_capacity(7);
    for i in 0..4 {
        for j in (i + 1)..4 {
            clauses.push(vec![e[i] as Literal, e[j] as Literal]);
        }
    }
    clauses.push(e.iter().map(|&x| -(x as Literal)).collect());
    clauses
}

/// "0 or 2 of 4" parity pattern used for vertex degree constraints. A slot
/// whose variable is the boundary sentinel `0` is treated as the constant
/// `false`: positive occurrences are dropped from their clause, negative
/// occurrences trivially satisfy (and drop) their clause.
fn zero_or_two(e: [u32; 4]) -> Vec<Clause> {
    const PATTERNS: [[i8; 4]; 8] = [
        [-1, -1, -1, 0],
        [-1, -1, 0, -1],
        [-1, 0, -1, -1],
        [0, -1, -1, -1],
        [-1, 1, 1, 1],
        [1, -1, 1, 1],
        [1, 1, -1, 1],
        [1, 1, 1, -1],
    ];

    let mut clauses = Vec::with_capacity(8);
    'pattern: for pattern in PATTERNS {
        let mut clause = Vec::with_capacity(3);
        for (slot, &sign) in pattern.iter().enumerate() {
            if sign == 0 {
                continue;
            }
            let var = e[slot];
            if var == 0 {
                if sign < 0 {
                    continue 'pattern;
                }
                continue;
            }
            clause.push(sign as Literal * var as Literal);
        }
        clauses.push(clause);
    }
    clauses
}

/// Heuristic bias for an unhinted cell: forbid all four of its edges being
/// true at once. Sound, not definitional — a fully-surrounded cell's own
/// perimeter would be a 4-cycle disconnected from the rest of the loop,
/// which invariant 4 already forbids; this clause just lets the SAT search
/// prune that shape before the validator would otherwise catch it (§4.2a,
/// §9 open question 3).
fn no_hint_bias(e: [u32; 4]) -> Clause {
    e.iter().map(|&x| -(x as Literal)).collect()
}

/// The cardinality clauses for a single cell's hint, in isolation from every
/// other clause family (vertex/corner). `hint` must be in `{-1,0,1,2,3}`.
pub fn hint_clauses(hint: i8, e: [u32; 4]) -> Vec<Clause> {
    match hint {
        0 => zero(e),
        1 => one(e),
        2 => two(e),
        3 => three(e),
        NO_HINT => vec![no_hint_bias(e)],
        _ => Vec::new(),
    }
}

/// Per-cell cardinality clauses from each cell's hint (§4.2a).
fn cell_hint_clauses(board: &Board) -> Vec<Clause> {
    let mut clauses = Vec::new();
    for i in 0..board.rows {
        for j in 0..board.columns {
            let cell = board.cell(i, j);
            let e = [cell.top, cell.bottom, cell.left, cell.right];
            clauses.extend(hint_clauses(cell.hint, e));
        }
    }
    clauses
}

/// Per-vertex degree-parity clauses: every vertex has zero or two incident
/// true edges (§4.2b).
fn vertex_degree_clauses(board: &Board) -> Vec<Clause> {
    let mut clauses = Vec::new();
    for i in 0..=board.rows {
        for j in 0..=board.columns {
            let vertex = board.vertex(i, j);
            clauses.extend(zero_or_two(vertex.edges()));
        }
    }
    clauses
}

/// Corner clauses (§4.2c): a corner hint of 1 forces its two corner-adjacent
/// edges false, a hint of 3 forces them true; a hint of 2 (heuristic, sound
/// because a 2-corner with both corner edges absent must route the loop
/// through the next cell inward) forces the two "away" edges true.
fn corner_clauses(board: &Board) -> Vec<Clause> {
    let (rows, columns) = (board.rows, board.columns);
    let mut clauses = Vec::new();

    let corners = [
        (board.cell(0, 0).top, board.cell(0, 0).left, board.cell(0, 0).hint),
        (
            board.cell(0, columns - 1).top,
            board.cell(0, columns - 1).right,
            board.cell(0, columns - 1).hint,
        ),
        (
            board.cell(rows - 1, 0).bottom,
            board.cell(rows - 1, 0).left,
            board.cell(rows - 1, 0).hint,
        ),
        (
            board.cell(rows - 1, columns - 1).bottom,
            board.cell(rows - 1, columns - 1).right,
            board.cell(rows - 1, columns - 1).hint,
        ),
    ];

    for &(a, b, hint) in &corners {
        match hint {
            1 => {
                clauses.push(vec![-(a as Literal)]);
                clauses.push(vec![-(b as Literal)]);
            }
            3 => {
                clauses.push(vec![a as Literal]);
                clauses.push(vec![b as Literal]);
            }
            _ => {}
        }
    }

    // Heuristic "away lines" for a corner hint of 2: needs a cell one step
    // inward along each axis, so only applies once the grid is wide/tall
    // enough to have one.
    if columns >= 2 && rows >= 2 {
        if board.cell(0, 0).hint == 2 {
            clauses.push(vec![board.cell(0, 1).top as Literal]);
            clauses.push(vec![board.cell(1, 0).left as Literal]);
        }
        if board.cell(0, columns - 1).hint == 2 {
            clauses.push(vec![board.cell(0, columns - 2).top as Literal]);
            clauses.push(vec![board.cell(1, columns - 1).right as Literal]);
        }
        if board.cell(rows - 1, 0).hint == 2 {
            clauses.push(vec![board.cell(rows - 1, 1).bottom as Literal]);
            clauses.push(vec![board.cell(rows - 2, 0).left as Literal]);
        }
        if board.cell(rows - 1, columns - 1).hint == 2 {
            clauses.push(vec![board.cell(rows - 1, columns - 2).bottom as Literal]);
            clauses.push(vec![board.cell(rows - 2, columns - 1).right as Literal]);
        }
    }

    clauses
}

/// The full set of local (non-global) clauses: cell hints, vertex parity,
/// corner rules. Does not include the heuristic clauses from `heuristics.rs`
/// or any blocking clause discovered during validation.
pub fn encode(board: &Board) -> Vec<Clause> {
    let mut clauses = cell_hint_clauses(board);
    clauses.extend(vertex_degree_clauses(board));
    clauses.extend(corner_clauses(board));
    clauses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn zero_forces_all_edges_false() {
        let clauses = zero([1, 2, 3, 4]);
        assert_eq!(clauses, vec![vec![-1], vec![-2], vec![-3], vec![-4]]);
    }

    #[test]
    fn one_has_six_pairs_and_an_or() {
        let clauses = one([1, 2, 3, 4]);
        assert_eq!(clauses.len(), 7);
        assert!(clauses.contains(&vec![1, 2, 3, 4]));
        assert!(clauses.contains(&vec![-1, -2]));
    }

    #[test]
    fn three_has_six_pairs_and_an_all_negative() {
        let clauses = three([1, 2, 3, 4]);
        assert_eq!(clauses.len(), 7);
        assert!(clauses.contains(&vec![1, 2]));
        assert!(clauses.contains(&vec![-1, -2, -3, -4]));
    }

    #[test]
    fn two_has_four_positive_and_four_negative_triples() {
        let clauses = two([1, 2, 3, 4]);
        assert_eq!(clauses.len(), 8);
        assert!(clauses.contains(&vec![2, 3, 4]));
        assert!(clauses.contains(&vec![-2, -3, -4]));
    }

    #[test]
    fn zero_or_two_drops_sentinel_slots() {
        // Corner vertex: only bottom (e=7) and right (e=9) exist; top/left are sentinel.
        let clauses = zero_or_two([0, 9, 7, 0]);
        // every clause mentioning only sentinel-derived literals must have vanished
        // or been trimmed down to the live variables 7 and 9.
        for clause in &clauses {
            for &lit in clause {
                assert!(lit.unsigned_abs() == 7 || lit.unsigned_abs() == 9);
            }
        }
        // the "both true" and "both false" options must remain encodable
        assert!(clauses.iter().any(|c| c.contains(&7) && c.contains(&9)));
    }

    #[test]
    fn hint_zero_cell_forbids_all_four_edges() {
        let board = Board::new(1, 1, vec![vec![0]]).unwrap();
        let clauses = encode(&board);
        let cell = board.cell(0, 0);
        for e in cell.edges() {
            assert!(clauses.contains(&vec![-(e as Literal)]));
        }
    }

    #[test]
    fn no_hint_cell_forbids_all_four_edges_at_once() {
        let board = Board::new(1, 1, vec![vec![-1]]).unwrap();
        let clauses = encode(&board);
        let cell = board.cell(0, 0);
        let expected: Clause = cell.edges().iter().map(|&e| -(e as Literal)).collect();
        assert!(clauses.contains(&expected));
    }

    #[test]
    fn corner_hint_one_forces_corner_edges_false() {
        let board = Board::new(2, 2, vec![vec![1, -1], vec![-1, -1]]).unwrap();
        let clauses = corner_clauses(&board);
        let cell = board.cell(0, 0);
        assert!(clauses.contains(&vec![-(cell.top as Literal)]));
        assert!(clauses.contains(&vec![-(cell.left as Literal)]));
    }
}
