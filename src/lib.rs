/// A Slitherlink solving engine built on incremental SAT search.
///
/// A puzzle's per-cell and per-vertex constraints are encoded directly into
/// CNF, but the rule that the loop must be a single simple cycle spanning
/// the whole board is global and does not encode compactly. This crate
/// solves that with counterexample-guided refinement: ask the SAT solver
/// for any model satisfying the local constraints, decode it into an edge
/// graph, check the global loop property, and if it fails add a blocking
/// clause ruling out that exact shape before asking again.
pub mod board;
pub mod decoder;
pub mod driver;
pub mod encoder;
pub mod heuristics;
pub mod render;
pub mod repository;
pub mod sat;
pub mod validator;
