//! Text rendering of grids, paylines and rule listings
//!
//! Pure presentation: nothing here feeds back into play or statistics.

use crate::grid::{Payline, Window};
use crate::machine::Machine;
use crate::symbols::Symbol;

/// Marker appended to rows the first column scores on
pub const SCORE_MARKER: &str = "<<<";

/// Grid rows top to bottom.
///
/// Symbols a payline passes through are wrapped in `**`; rows scored in the
/// first column end with [`SCORE_MARKER`]. Columns shorter than the tallest
/// leave their missing cells blank.
pub fn render_grid(machine: &Machine, grid: &[Vec<Symbol>]) -> String {
    let max_rows = grid.iter().map(Vec::len).max().unwrap_or(0);

    (0..max_rows)
        .map(|row| {
            let mut line: String = grid
                .iter()
                .enumerate()
                .map(|(column, cells)| match cells.get(row) {
                    Some(symbol) if machine.is_on_scoreline(column, row) => {
                        format!("**{}** ", symbol.name())
                    }
                    Some(symbol) => format!("{} ", symbol.name()),
                    None => "  ".to_string(),
                })
                .collect();
            if machine.is_on_scoreline(0, row) {
                line.push(' ');
                line.push_str(SCORE_MARKER);
            }
            line.push('\n');
            line
        })
        .collect()
}

/// ASCII diagram of `payline` over `window`.
///
/// Each column draws one cell on its payline row: `―` when the next column
/// stays level (or it is the last column), `╲` when the line steps down and
/// `╱` when it steps up.
pub fn render_payline(payline: &Payline, window: &Window) -> String {
    let rows = window.max_rows();
    let cols = window.cols().max(payline.len());
    let mut art = vec![vec![' '; cols]; rows];

    let indices = &payline.indices;
    for (column, &row) in indices.iter().enumerate() {
        let glyph = match indices.get(column + 1) {
            Some(&next) if next > row => '╲',
            Some(&next) if next < row => '╱',
            _ => '―',
        };
        if let Some(cell) = art.get_mut(row).and_then(|line| line.get_mut(column)) {
            *cell = glyph;
        }
    }

    art.iter()
        .map(|line| line.iter().collect::<String>().trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Every game's rules and payline diagrams
pub fn render_rules(machine: &Machine) -> String {
    let mut out = String::new();
    for game in machine.games() {
        out.push_str(&format!("Game {}\nPay Rules:\n", game.name()));
        for rule in game.pay_rules() {
            out.push_str(&format!("{rule}\n"));
        }
        out.push_str("Paylines:\n");
        for payline in game.paylines() {
            let art = render_payline(payline, machine.window());
            out.push_str(&format!("{payline}\n{art}\n"));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;

    #[test]
    fn test_render_grid_highlights_centerline() {
        let machine = presets::single_line().unwrap();
        let a = Symbol::plain("A");
        let x = Symbol::plain("X");
        let grid = vec![vec![x.clone(), a.clone(), x.clone()]; 3];

        let text = render_grid(&machine, &grid);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "X X X ");
        assert_eq!(lines[1], "**A** **A** **A**  <<<");
        assert_eq!(lines[2], "X X X ");
    }

    #[test]
    fn test_render_flat_payline() {
        let window = Window::uniform(3, 3);
        let art = render_payline(&window.centerline(), &window);
        assert_eq!(art, "\n―――\n");
    }

    #[test]
    fn test_render_diagonals() {
        let window = Window::uniform(3, 3);
        assert_eq!(render_payline(&window.top_left_diagonal(), &window), "╲\n ╲\n  ―");
        assert_eq!(render_payline(&window.bottom_left_diagonal(), &window), "  ―\n ╱\n╱");
    }

    #[test]
    fn test_render_rules_lists_everything() {
        let machine = presets::classic().unwrap();
        let text = render_rules(&machine);
        assert!(text.starts_with("Game Default\n"));
        assert!(text.contains("cherries cherries cherries --- $1000.00"));
        assert!(text.contains("[1, 1, 1]"));
        assert!(text.contains("―――"));
    }

    #[test]
    fn test_render_rules_exact_listing() {
        let machine = presets::single_line().unwrap();
        assert_eq!(
            render_rules(&machine),
            "Game Single Line\nPay Rules:\nA A A --- $1000.00\nPaylines:\n[1, 1, 1]\n\n―――\n\n\n"
        );
    }
}
