//! The global property the SAT encoding cannot express directly: the true
//! edges must form exactly one simple cycle. Rejections come with blocking
//! clauses (no-goods) that rule out the rejected shape without ruling out
//! any other model.

use std::collections::{HashMap, HashSet};

use crate::board::{Board, Pos};
use crate::encoder::{Clause, Literal};

pub enum Validation {
    Accepted,
    Rejected { blocking_clauses: Vec<Clause> },
}

/// A cell whose all four edges are true is "surrounded": the loop would
/// close in on itself immediately around that cell, which can never be part
/// of a single simple cycle spanning the whole board. This is checked ahead
/// of component extraction as a fast, independent backstop — it does not
/// rely on the encoder's "no fully-surrounded unhinted cell" heuristic clause
/// still being present.
fn surrounded_cell(board: &Board, positive: &HashSet<Literal>) -> Option<Clause> {
    for i in 0..board.rows {
        for j in 0..board.columns {
            let cell = board.cell(i, j);
            let edges = cell.edges();
            if edges.iter().all(|&e| positive.contains(&(e as Literal))) {
                return Some(edges.iter().map(|&e| -(e as Literal)).collect());
            }
        }
    }
    None
}

/// Depth-first walk of one connected component starting at `start`.
fn dfs(graph: &HashMap<Pos, Vec<Pos>>, start: Pos) -> HashSet<Pos> {
    let mut visited = HashSet::new();
    visited.insert(start);
    let mut stack = vec![start];
    while let Some(node) = stack.pop() {
        if let Some(neighbours) = graph.get(&node) {
            for &next in neighbours {
                if visited.insert(next) {
                    stack.push(next);
                }
            }
        }
    }
    visited
}

/// Splits the true-edge graph into its connected components, covering every
/// vertex with non-zero degree exactly once.
fn extract_components(graph: &HashMap<Pos, Vec<Pos>>) -> Vec<HashSet<Pos>> {
    let mut nodes: Vec<Pos> = graph
        .iter()
        .filter(|(_, neighbours)| !neighbours.is_empty())
        .map(|(&pos, _)| pos)
        .collect();
    nodes.sort();

    let mut seen = HashSet::new();
    let mut components = Vec::new();
    for node in nodes {
        if seen.contains(&node) {
            continue;
        }
        let component = dfs(graph, node);
        seen.extend(component.iter().copied());
        components.push(component);
    }
    components
}

/// Collects the id of every true edge whose both endpoints lie within
/// `component`, i.e. every edge that is part of this sub-cycle.
fn component_edges(board: &Board, graph: &HashMap<Pos, Vec<Pos>>, component: &HashSet<Pos>) -> HashSet<Literal> {
    let mut edges = HashSet::new();
    for &node in component {
        if let Some(neighbours) = graph.get(&node) {
            for &neighbour in neighbours {
                if let Some(id) = board.edge_between(node, neighbour) {
                    edges.insert(id as Literal);
                }
            }
        }
    }
    edges
}

/// Accept iff the true-edge graph is a single connected component spanning
/// every vertex with non-zero degree. Otherwise produce one blocking clause
/// per discovered component (not just the first), each forbidding that exact
/// set of true edges from recurring together.
pub fn validate(
    board: &Board,
    graph: &HashMap<Pos, Vec<Pos>>,
    positive: &HashSet<Literal>,
) -> Validation {
    if let Some(clause) = surrounded_cell(board, positive) {
        return Validation::Rejected {
            blocking_clauses: vec![clause],
        };
    }

    let components = extract_components(graph);
    if components.len() == 1 {
        return Validation::Accepted;
    }

    let blocking_clauses = components
        .iter()
        .map(|component| {
            component_edges(board, graph, component)
                .into_iter()
                .map(|lit| -lit)
                .collect::<Clause>()
        })
        .filter(|clause: &Clause| !clause.is_empty())
        .collect();

    Validation::Rejected { blocking_clauses }
}
