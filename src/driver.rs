//! The CEGAR search driver: prime a SAT solver with local constraints only,
//! pull a model, decode and validate it against the global single-loop
//! property, add blocking clauses on rejection, repeat.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use thiserror::Error;

use crate::board::{Board, BoardError, Pos};
use crate::decoder;
use crate::encoder::{self, Literal};
use crate::heuristics;
use crate::sat::{BackendError, SatBackend, VarisatBackend};
use crate::validator::{self, Validation};

/// Running counters for the current solve, refreshed after every SAT call.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    pub acum_time: Duration,
    pub clauses: usize,
    pub variables: usize,
    pub retried: usize,
}

#[derive(Debug, Error)]
pub enum SolveError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Invoked once per pulled model, in registration order, before validation.
/// Receives a read-only view of the board with `graph` set to the
/// currently-proposed (possibly invalid) edge set.
pub type Subscriber<'a> = Box<dyn FnMut(&Board, &Statistics) + 'a>;

/// Runs the CEGAR loop to completion on an already-constructed board.
///
/// Sets `board.solved` and `board.graph` on return. `Ok(())` is returned both
/// when a solution is found and when the search is exhausted (UNSAT) or
/// cancelled — those are expected outcomes, not failures; only a SAT backend
/// malfunction surfaces as `Err`.
pub fn solve<'a>(
    board: &mut Board,
    cancel: Option<Arc<AtomicBool>>,
    mut subscribers: Vec<Subscriber<'a>>,
) -> Result<(), SolveError> {
    info!(
        "solving {}x{} board ({} edge variables)",
        board.rows,
        board.columns,
        board.num_edge_vars()
    );

    let mut clauses = encoder::encode(board);
    clauses.extend(heuristics::encode(board));
    debug!("primed solver with {} local clauses", clauses.len());

    let mut backend = VarisatBackend::new(&clauses);
    let mut stats = Statistics::default();
    let mut decode_cache: HashMap<Vec<Literal>, HashMap<Pos, Vec<Pos>>> = HashMap::new();

    loop {
        if let Some(flag) = &cancel {
            if flag.load(Ordering::SeqCst) {
                debug!("cancelled after {} retries", stats.retried);
                board.solved = false;
                return Ok(());
            }
        }

        let model = match backend.next_model()? {
            Some(model) => model,
            None => {
                info!("search exhausted (unsat) after {} retries", stats.retried);
                board.solved = false;
                return Ok(());
            }
        };

        stats.retried += 1;
        stats.clauses = backend.nof_clauses();
        stats.variables = backend.nof_vars();
        stats.acum_time = backend.time();

        let mut positive_key: Vec<Literal> = model.iter().copied().filter(|&lit| lit > 0).collect();
        positive_key.sort_unstable();

        let graph = decode_cache
            .entry(positive_key.clone())
            .or_insert_with(|| decoder::decode(board, &model))
            .clone();

        if !subscribers.is_empty() {
            board.graph = graph.clone();
            for subscriber in subscribers.iter_mut() {
                subscriber(board, &stats);
            }
        }

        let positive_set: std::collections::HashSet<Literal> = positive_key.into_iter().collect();
        match validator::validate(board, &graph, &positive_set) {
            Validation::Accepted => {
                info!("solution found after {} retries", stats.retried);
                board.graph = graph;
                board.solved = true;
                return Ok(());
            }
            Validation::Rejected { blocking_clauses } => {
                debug!(
                    "retry {} rejected with {} blocking clause(s)",
                    stats.retried,
                    blocking_clauses.len()
                );
                for clause in blocking_clauses {
                    backend.add_clause(&clause);
                }
            }
        }
    }
}

/// Convenience entry point that also constructs the board, surfacing both
/// bad-board and backend errors through the same `SolveError`.
pub fn solve_new_board<'a>(
    rows: usize,
    columns: usize,
    hints: Vec<Vec<i8>>,
    cancel: Option<Arc<AtomicBool>>,
    subscribers: Vec<Subscriber<'a>>,
) -> Result<Board, SolveError> {
    let mut board = Board::new(rows, columns, hints)?;
    solve(&mut board, cancel, subscribers)?;
    Ok(board)
}
