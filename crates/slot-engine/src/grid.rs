//! Window geometry and paylines

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::symbols::Symbol;

/// Drawn symbols, indexed `grid[column][row]`
pub type Grid = Vec<Vec<Symbol>>;

/// Visible layout: number of rows shown for each reel (column)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    pub rows_per_column: Vec<usize>,
}

impl Window {
    pub fn new(rows_per_column: Vec<usize>) -> Self {
        Self { rows_per_column }
    }

    /// Every column shows the same number of rows
    pub fn uniform(rows: usize, cols: usize) -> Self {
        Self::new(vec![rows; cols])
    }

    /// Number of columns (reels)
    pub fn cols(&self) -> usize {
        self.rows_per_column.len()
    }

    /// Rows shown in `column`
    pub fn rows(&self, column: usize) -> Option<usize> {
        self.rows_per_column.get(column).copied()
    }

    /// Tallest column
    pub fn max_rows(&self) -> usize {
        self.rows_per_column.iter().copied().max().unwrap_or(0)
    }

    /// Total visible positions
    pub fn total_positions(&self) -> usize {
        self.rows_per_column.iter().sum()
    }

    /// Straight line through the middle row of every column
    pub fn centerline(&self) -> Payline {
        self.line_by(|_, rows| rows / 2)
    }

    /// Straight line through the first row
    pub fn topline(&self) -> Payline {
        self.line_by(|_, _| 0)
    }

    /// Straight line through the last row of every column
    pub fn bottomline(&self) -> Payline {
        self.line_by(|_, rows| rows.saturating_sub(1))
    }

    /// Diagonal from the top-left corner, clamped to each column's height
    pub fn top_left_diagonal(&self) -> Payline {
        self.line_by(|col, rows| col.min(rows.saturating_sub(1)))
    }

    /// Diagonal from the bottom-left corner, clamped to each column's height
    pub fn bottom_left_diagonal(&self) -> Payline {
        self.line_by(|col, rows| {
            let last = rows.saturating_sub(1);
            last - col.min(last)
        })
    }

    /// All five named lines
    pub fn standard_paylines(&self) -> Vec<Payline> {
        vec![
            self.centerline(),
            self.topline(),
            self.bottomline(),
            self.top_left_diagonal(),
            self.bottom_left_diagonal(),
        ]
    }

    /// A copy grown by `extra_rows` on every column and `extra_cols` new
    /// columns shaped like the last one
    pub fn expanded(&self, extra_rows: usize, extra_cols: usize) -> Self {
        let mut rows_per_column: Vec<usize> = self
            .rows_per_column
            .iter()
            .map(|rows| rows + extra_rows)
            .collect();
        let last = rows_per_column.last().copied().unwrap_or(extra_rows);
        rows_per_column.extend(std::iter::repeat_n(last, extra_cols));
        Self { rows_per_column }
    }

    /// Append one column with the same height as the last
    pub(crate) fn push_repeat_last(&mut self) {
        if let Some(&last) = self.rows_per_column.last() {
            self.rows_per_column.push(last);
        }
    }

    fn line_by(&self, row_for: impl Fn(usize, usize) -> usize) -> Payline {
        Payline::new(
            self.rows_per_column
                .iter()
                .enumerate()
                .map(|(col, &rows)| row_for(col, rows))
                .collect(),
        )
    }
}

/// A scoring line: one row index per column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Payline {
    pub indices: Vec<usize>,
}

impl Payline {
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    /// Row used in `column`
    pub fn row(&self, column: usize) -> Option<usize> {
        self.indices.get(column).copied()
    }

    /// Number of columns covered
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    /// Symbols this line picks out of a drawn grid, in column order.
    ///
    /// Stops at the first column the grid cannot supply.
    pub fn symbols_on<'a>(&self, grid: &'a [Vec<Symbol>]) -> Vec<&'a Symbol> {
        self.indices
            .iter()
            .enumerate()
            .map_while(|(col, &row)| grid.get(col).and_then(|column| column.get(row)))
            .collect()
    }

    /// Append the last row index once more
    pub(crate) fn repeat_last(&mut self) {
        if let Some(&last) = self.indices.last() {
            self.indices.push(last);
        }
    }
}

impl fmt::Display for Payline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<String> = self.indices.iter().map(|r| r.to_string()).collect();
        write!(f, "[{}]", rows.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_shape() {
        let window = Window::uniform(3, 5);
        assert_eq!(window.rows_per_column, vec![3; 5]);
        assert_eq!(window.cols(), 5);
        assert_eq!(window.max_rows(), 3);
        assert_eq!(window.total_positions(), 15);
        assert_eq!(window.rows(5), None);
    }

    #[test]
    fn test_named_lines_3x3() {
        let window = Window::uniform(3, 3);
        assert_eq!(window.centerline().indices, vec![1, 1, 1]);
        assert_eq!(window.topline().indices, vec![0, 0, 0]);
        assert_eq!(window.bottomline().indices, vec![2, 2, 2]);
        assert_eq!(window.top_left_diagonal().indices, vec![0, 1, 2]);
        assert_eq!(window.bottom_left_diagonal().indices, vec![2, 1, 0]);
    }

    #[test]
    fn test_diagonal_clamps_on_wide_window() {
        let window = Window::uniform(3, 5);
        assert_eq!(window.top_left_diagonal().indices, vec![0, 1, 2, 2, 2]);
        assert_eq!(window.bottom_left_diagonal().indices, vec![2, 1, 0, 0, 0]);
    }

    #[test]
    fn test_ragged_centerline() {
        let window = Window::new(vec![3, 5, 3]);
        assert_eq!(window.centerline().indices, vec![1, 2, 1]);
    }

    #[test]
    fn test_expanded() {
        let window = Window::new(vec![3, 4]).expanded(1, 2);
        assert_eq!(window.rows_per_column, vec![4, 5, 5, 5]);
    }

    #[test]
    fn test_payline_access() {
        let line = Payline::new(vec![0, 1, 2]);
        for (i, row) in line.iter().enumerate() {
            assert_eq!(row, i);
        }
        assert_eq!(line.row(3), None);
        assert_eq!(line.to_string(), "[0, 1, 2]");
    }

    #[test]
    fn test_symbols_on() {
        let a = Symbol::plain("A");
        let b = Symbol::plain("B");
        let grid = vec![
            vec![a.clone(), b.clone()],
            vec![b.clone(), a.clone()],
        ];
        let line = Payline::new(vec![0, 1, 1]);
        assert_eq!(line.symbols_on(&grid), vec![&a, &a]);
    }
}
