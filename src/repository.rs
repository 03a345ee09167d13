//! Loads puzzle corpora from the whitespace-separated text format: one
//! puzzle per line, `rows columns` followed by `rows*columns` hints in
//! row-major order, `-1` standing in for "no hint".

use std::fs;
use std::path::Path;

use log::warn;
use thiserror::Error;

use crate::board::{Board, BoardError};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("failed to read puzzle file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: missing rows/columns dimensions")]
    MissingDimensions { line: usize },
    #[error("line {line}: non-integer token {token:?}")]
    InvalidToken { line: usize, token: String },
    #[error("line {line}: expected {expected} hint values for a {rows}x{columns} board, found {actual}")]
    HintCountMismatch {
        line: usize,
        rows: usize,
        columns: usize,
        expected: usize,
        actual: usize,
    },
    #[error("line {line}: {source}")]
    Board {
        line: usize,
        #[source]
        source: BoardError,
    },
}

/// Loads every well-formed puzzle line from `path`. A malformed individual
/// line is logged at `warn` and skipped rather than aborting the whole load;
/// only an I/O failure reading the file itself is fatal.
pub fn load_puzzles<P: AsRef<Path>>(path: P) -> Result<Vec<Board>, RepositoryError> {
    let path_ref = path.as_ref();
    let text = fs::read_to_string(path_ref).map_err(|source| RepositoryError::Io {
        path: path_ref.display().to_string(),
        source,
    })?;

    let mut boards = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match parse_line(trimmed, line_no) {
            Ok(board) => boards.push(board),
            Err(err) => warn!("skipping puzzle line {line_no}: {err}"),
        }
    }

    Ok(boards)
}

fn parse_line(line: &str, line_no: usize) -> Result<Board, RepositoryError> {
    let mut tokens = line.split_whitespace();

    let rows = parse_usize(&mut tokens, line_no)?;
    let columns = parse_usize(&mut tokens, line_no)?;

    let mut flat = Vec::with_capacity(rows * columns);
    for token in tokens {
        let value: i32 = token
            .parse()
            .map_err(|_| RepositoryError::InvalidToken {
                line: line_no,
                token: token.to_string(),
            })?;
        flat.push(value as i8);
    }

    let expected = rows * columns;
    if flat.len() != expected {
        return Err(RepositoryError::HintCountMismatch {
            line: line_no,
            rows,
            columns,
            expected,
            actual: flat.len(),
        });
    }

    let hints: Vec<Vec<i8>> = flat.chunks(columns).map(|chunk| chunk.to_vec()).collect();
    Board::new(rows, columns, hints).map_err(|source| RepositoryError::Board {
        line: line_no,
        source,
    })
}

fn parse_usize(
    tokens: &mut std::str::SplitWhitespace,
    line_no: usize,
) -> Result<usize, RepositoryError> {
    let token = tokens
        .next()
        .ok_or(RepositoryError::MissingDimensions { line: line_no })?;
    token.parse().map_err(|_| RepositoryError::InvalidToken {
        line: line_no,
        token: token.to_string(),
    })
}
