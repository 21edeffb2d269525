//! Plain-text rendering of the board.

use crate::models::{Arrow, Phase};

use super::grid::BoardView;

pub const DEFAULT_CELL_WIDTH: usize = 24;
const LABEL_WIDTH: usize = 11;

const ARROW_START: char = 'o';
const ARROW_THROUGH: char = '|';
const ARROW_END_DOWN: char = 'v';
const ARROW_END_UP: char = '^';

/// Render the board as a text table.
///
/// Each cell starts with one glyph per arrow in its month (slot order),
/// followed by the cell's activities:
///
/// ```text
/// Phases      | September    | October
/// ------------+--------------+-------------
/// Empathize   | Stakeholde…  |
/// Define      |              | o Problem S…
/// Ideate      |              | v Brainstor…
/// ```
pub fn render_board(board: &BoardView, cell_width: usize) -> String {
    let cell_width = cell_width.max(1);
    let mut output = String::new();

    let mut header = pad("Phases", LABEL_WIDTH);
    for month in &board.months {
        header.push_str(" | ");
        header.push_str(&pad(&month.label, cell_width));
    }
    push_line(&mut output, &header);

    let mut rule = "-".repeat(LABEL_WIDTH);
    for _ in &board.months {
        rule.push_str("-+-");
        rule.push_str(&"-".repeat(cell_width));
    }
    push_line(&mut output, &rule);

    for row in &board.phases {
        let mut line = pad(row.phase.as_str(), LABEL_WIDTH);
        for month in &board.months {
            let strip: String = board
                .arrows
                .iter()
                .filter(|a| a.column == Some(month.column))
                .map(|a| glyph(&a.arrow, row.phase))
                .collect();

            let text = board
                .cells
                .iter()
                .find(|c| c.row == row.row && c.column == month.column)
                .map(|c| {
                    c.activities
                        .iter()
                        .map(|a| a.text.as_str())
                        .collect::<Vec<_>>()
                        .join("; ")
                })
                .unwrap_or_default();

            let content = if strip.is_empty() {
                text
            } else {
                format!("{} {}", strip, text)
            };

            line.push_str(" | ");
            line.push_str(&pad(content.trim_end(), cell_width));
        }
        push_line(&mut output, &line);
    }

    output
}

/// The glyph `arrow` contributes to the row of `phase`.
fn glyph(arrow: &Arrow, phase: Phase) -> char {
    let start = arrow.start_phase.index();
    let end = arrow.end_phase.index();
    let here = phase.index();

    if here == start {
        ARROW_START
    } else if here == end {
        if arrow.is_down() {
            ARROW_END_DOWN
        } else {
            ARROW_END_UP
        }
    } else if here > start.min(end) && here < start.max(end) {
        ARROW_THROUGH
    } else {
        ' '
    }
}

fn pad(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len > width {
        let mut cut: String = s.chars().take(width - 1).collect();
        cut.push('…');
        cut
    } else {
        format!("{}{}", s, " ".repeat(width - len))
    }
}

fn push_line(output: &mut String, line: &str) {
    output.push_str(line.trim_end());
    output.push('\n');
}
