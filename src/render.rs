//! ASCII rendering of a solved board, used by the CLI.

use crate::board::{Board, Pos};

fn has_edge(board: &Board, a: Pos, b: Pos) -> bool {
    board
        .graph
        .get(&a)
        .map(|neighbours| neighbours.contains(&b))
        .unwrap_or(false)
}

/// Renders the board as a grid of `+`, `-`, `|` for vertices/edges, with each
/// cell's hint (or `.` for no hint) in its centre.
pub fn render(board: &Board) -> String {
    let mut out = String::new();

    for i in 0..=board.rows {
        for j in 0..board.columns {
            out.push('+');
            let horizontal = has_edge(board, Pos::new(i, j), Pos::new(i, j + 1));
            out.push_str(if horizontal { "---" } else { "   " });
        }
        out.push('+');
        out.push('\n');

        if i < board.rows {
            for j in 0..=board.columns {
                let vertical = has_edge(board, Pos::new(i, j), Pos::new(i + 1, j));
                out.push(if vertical { '|' } else { ' ' });
                if j < board.columns {
                    let hint = board.cell(i, j).hint;
                    let glyph = if hint < 0 {
                        '.'
                    } else {
                        (b'0' + hint as u8) as char
                    };
                    out.push(' ');
                    out.push(glyph);
                    out.push(' ');
                }
            }
            out.push('\n');
        }
    }

    out
}
