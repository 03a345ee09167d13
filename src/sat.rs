//! The SAT backend boundary. `varisat` has no native "enumerate all models"
//! call, so incremental enumeration is simulated the same way the teacher's
//! `SolutionIterator` does it: after each returned model, add its negation
//! as a blocking clause so the next `solve()` is forced to find a different
//! one.

use std::time::{Duration, Instant};

use thiserror::Error;
use varisat::{ExtendFormula, Lit, Solver};

use crate::encoder::{Clause, Literal};

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("SAT backend reported an internal solver failure: {0}")]
    Internal(String),
}

/// Abstraction over the CDCL solver so the driver does not depend on
/// `varisat` directly.
pub trait SatBackend {
    fn add_clause(&mut self, clause: &[Literal]);
    /// Pull the next model, blocking it from being returned again. `Ok(None)`
    /// means the formula (with all clauses added so far) is UNSAT.
    fn next_model(&mut self) -> Result<Option<Vec<Literal>>, BackendError>;
    fn nof_clauses(&self) -> usize;
    fn nof_vars(&self) -> usize;
    fn time(&self) -> Duration;
}

pub struct VarisatBackend<'a> {
    solver: Solver<'a>,
    nof_clauses: usize,
    nof_vars: usize,
    elapsed: Duration,
}

impl<'a> VarisatBackend<'a> {
    pub fn new(clauses: &[Clause]) -> Self {
        let mut backend = VarisatBackend {
            solver: Solver::new(),
            nof_clauses: 0,
            nof_vars: 0,
            elapsed: Duration::ZERO,
        };
        for clause in clauses {
            backend.add_clause(clause);
        }
        backend
    }

    fn to_varisat(clause: &[Literal]) -> Vec<Lit> {
        clause
            .iter()
            .map(|&lit| Lit::from_dimacs(lit as isize))
            .collect()
    }
}

impl<'a> SatBackend for VarisatBackend<'a> {
    fn add_clause(&mut self, clause: &[Literal]) {
        for &lit in clause {
            self.nof_vars = self.nof_vars.max(lit.unsigned_abs() as usize);
        }
        let lits = Self::to_varisat(clause);
        self.solver.add_clause(&lits);
        self.nof_clauses += 1;
    }

    fn next_model(&mut self) -> Result<Option<Vec<Literal>>, BackendError> {
        let start = Instant::now();
        let is_sat = self
            .solver
            .solve()
            .map_err(|err| BackendError::Internal(err.to_string()))?;
        self.elapsed += start.elapsed();

        if !is_sat {
            return Ok(None);
        }

        let model = self
            .solver
            .model()
            .expect("solve() returned true but model() was None");

        let literals: Vec<Literal> = model
            .iter()
            .map(|&lit| {
                let dimacs = lit.var().to_dimacs() as Literal;
                if lit.is_positive() {
                    dimacs
                } else {
                    -dimacs
                }
            })
            .collect();

        let blocking: Vec<Lit> = model.iter().map(|&lit| !lit).collect();
        self.solver.add_clause(&blocking);
        self.nof_clauses += 1;

        Ok(Some(literals))
    }

    fn nof_clauses(&self) -> usize {
        self.nof_clauses
    }

    fn nof_vars(&self) -> usize {
        self.nof_vars
    }

    fn time(&self) -> Duration {
        self.elapsed
    }
}

/// Lazily pulls models from a backend, stopping at the first UNSAT result.
pub struct ModelIter<'b, B: SatBackend> {
    backend: &'b mut B,
    exhausted: bool,
}

impl<'b, B: SatBackend> Iterator for ModelIter<'b, B> {
    type Item = Result<Vec<Literal>, BackendError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        match self.backend.next_model() {
            Ok(Some(model)) => Some(Ok(model)),
            Ok(None) => {
                self.exhausted = true;
                None
            }
            Err(err) => {
                self.exhausted = true;
                Some(Err(err))
            }
        }
    }
}

pub fn enum_models<B: SatBackend>(backend: &mut B) -> ModelIter<'_, B> {
    ModelIter {
        backend,
        exhausted: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsat_formula_yields_no_model() {
        let clauses: Vec<Clause> = vec![vec![1], vec![-1]];
        let mut backend = VarisatBackend::new(&clauses);
        assert!(backend.next_model().unwrap().is_none());
    }

    #[test]
    fn contradictory_unit_clauses_are_unsat() {
        let clauses: Vec<Clause> = vec![vec![2], vec![-2]];
        let mut backend = VarisatBackend::new(&clauses);
        assert!(backend.next_model().unwrap().is_none());
    }

    #[test]
    fn blocking_clause_forces_distinct_models() {
        let clauses: Vec<Clause> = vec![vec![1, 2]]; // at least one of two vars true
        let mut backend = VarisatBackend::new(&clauses);
        let first = backend.next_model().unwrap().expect("sat");
        let second = backend.next_model().unwrap();
        if let Some(second) = second {
            assert_ne!(first, second);
        }
    }
}
