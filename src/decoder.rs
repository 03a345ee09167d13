//! Turns a SAT model back into the board's adjacency graph: vertex ->
//! neighbouring vertices connected by a true edge.

use std::collections::HashMap;

use crate::board::{Board, Pos};
use crate::encoder::Literal;

/// Decode a model into an adjacency map. Deterministic: cells are walked in
/// row-major order, so two calls with the same positive-literal set always
/// produce identical neighbour orderings.
pub fn decode(board: &Board, model: &[Literal]) -> HashMap<Pos, Vec<Pos>> {
    let mut graph: HashMap<Pos, Vec<Pos>> = HashMap::new();
    let positive: std::collections::HashSet<Literal> =
        model.iter().copied().filter(|&lit| lit > 0).collect();

    let mut add_edge = |a: Pos, b: Pos| {
        graph.entry(a).or_default().push(b);
        graph.entry(b).or_default().push(a);
    };

    for i in 0..board.rows {
        for j in 0..board.columns {
            let cell = board.cell(i, j);
            if positive.contains(&(cell.top as Literal)) {
                add_edge(Pos::new(i, j), Pos::new(i, j + 1));
            }
            if positive.contains(&(cell.bottom as Literal)) {
                add_edge(Pos::new(i + 1, j), Pos::new(i + 1, j + 1));
            }
            if positive.contains(&(cell.left as Literal)) {
                add_edge(Pos::new(i, j), Pos::new(i + 1, j));
            }
            if positive.contains(&(cell.right as Literal)) {
                add_edge(Pos::new(i, j + 1), Pos::new(i + 1, j + 1));
            }
        }
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn decodes_a_single_square_loop() {
        // 1x1 hint-3 board: all four edges true is the only way to get a 3.
        let board = Board::new(1, 1, vec![vec![3]]).unwrap();
        let cell = board.cell(0, 0);
        let model: Vec<Literal> = vec![
            cell.top as Literal,
            cell.bottom as Literal,
            cell.left as Literal,
            cell.right as Literal,
        ];
        let graph = decode(&board, &model);
        assert_eq!(graph.len(), 4);
        for neighbours in graph.values() {
            assert_eq!(neighbours.len(), 2);
        }
    }

    #[test]
    fn is_idempotent_for_the_same_positive_literal_set() {
        let board = Board::new(1, 1, vec![vec![3]]).unwrap();
        let cell = board.cell(0, 0);
        let model_a: Vec<Literal> = vec![
            cell.top as Literal,
            cell.bottom as Literal,
            cell.left as Literal,
            cell.right as Literal,
        ];
        let mut model_b = model_a.clone();
        model_b.reverse();
        let graph_a = decode(&board, &model_a);
        let graph_b = decode(&board, &model_b);
        let mut keys_a: Vec<_> = graph_a.keys().copied().collect();
        let mut keys_b: Vec<_> = graph_b.keys().copied().collect();
        keys_a.sort();
        keys_b.sort();
        assert_eq!(keys_a, keys_b);
        for key in keys_a {
            assert_eq!(graph_a[&key], graph_b[&key]);
        }
    }

    #[test]
    fn ignores_negative_literals() {
        let board = Board::new(1, 1, vec![vec![-1]]).unwrap();
        let cell = board.cell(0, 0);
        let model: Vec<Literal> = vec![
            -(cell.top as Literal),
            -(cell.bottom as Literal),
            -(cell.left as Literal),
            -(cell.right as Literal),
        ];
        let graph = decode(&board, &model);
        assert!(graph.is_empty());
    }
}
