//! Weighted reel strips

use std::collections::HashSet;
use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::grid::Window;
use crate::symbols::{Symbol, matches};

/// A virtual reel strip.
///
/// Holds the flat population built from `(symbol, count)` pairs. The strip is
/// circular: spinning reads a run of adjacent cells, wrapping past the end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReelStrip {
    /// Population in strip order (after shuffling)
    symbols: Vec<Symbol>,
    /// Input weights, kept for display
    weights: Vec<(Symbol, usize)>,
}

impl ReelStrip {
    /// Build and shuffle with the thread-local generator
    pub fn new(symbols: &[Symbol], counts: &[usize]) -> Result<Self, ConfigError> {
        Self::build(symbols, counts, true, &mut rand::rng())
    }

    /// Build without shuffling: every symbol's copies sit next to each other
    pub fn ordered(symbols: &[Symbol], counts: &[usize]) -> Result<Self, ConfigError> {
        Self::build(symbols, counts, false, &mut rand::rng())
    }

    /// Expand each symbol `count` times, then optionally permute uniformly
    pub fn build<R: Rng + ?Sized>(
        symbols: &[Symbol],
        counts: &[usize],
        shuffle: bool,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        if symbols.len() != counts.len() {
            return Err(ConfigError::WeightCountMismatch {
                symbols: symbols.len(),
                counts: counts.len(),
            });
        }

        let mut population = Vec::with_capacity(counts.iter().sum());
        for (symbol, &count) in symbols.iter().zip(counts) {
            population.extend(std::iter::repeat_n(symbol.clone(), count));
        }
        if population.is_empty() {
            return Err(ConfigError::EmptyReel);
        }
        if shuffle {
            population.shuffle(rng);
        }

        Ok(Self {
            symbols: population,
            weights: symbols.iter().cloned().zip(counts.iter().copied()).collect(),
        })
    }

    /// Draw the visible cells of `column`.
    ///
    /// Picks a uniform center, backs up `cols / 2` cells and reads
    /// `rows_per_column[column]` consecutive cells around the wheel.
    pub fn spin<R: Rng + ?Sized>(
        &self,
        window: &Window,
        column: usize,
        rng: &mut R,
    ) -> Vec<Symbol> {
        let len = self.symbols.len();
        if len == 0 {
            return Vec::new();
        }
        let rows = window.rows(column).unwrap_or_else(|| window.max_rows());
        let center = rng.random_range(0..len);
        let back = (window.cols() / 2) as isize;
        let start = (center as isize - back).rem_euclid(len as isize) as usize;
        self.window_at(start, rows)
    }

    /// `rows` consecutive cells starting at `start`, wrapping
    pub fn window_at(&self, start: usize, rows: usize) -> Vec<Symbol> {
        let len = self.symbols.len();
        if len == 0 {
            return Vec::new();
        }
        (0..rows)
            .map(|offset| self.symbols[(start + offset) % len].clone())
            .collect()
    }

    /// Exact occurrences of `symbol` in the population
    pub fn get_count(&self, symbol: &Symbol) -> usize {
        self.symbols.iter().filter(|s| *s == symbol).count()
    }

    /// Cells a pattern element accepts
    pub fn count_matching(&self, pattern: &Symbol) -> usize {
        self.symbols.iter().filter(|s| matches(s, pattern)).count()
    }

    /// Number of distinct symbols on the strip
    pub fn distinct_count(&self) -> usize {
        self.symbols.iter().collect::<HashSet<_>>().len()
    }

    /// Population in strip order
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// `(symbol, count)` pairs the strip was built from
    pub fn weights(&self) -> &[(Symbol, usize)] {
        &self.weights
    }

    /// Get total strip length
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl fmt::Display for ReelStrip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries: Vec<String> = self
            .weights
            .iter()
            .map(|(symbol, count)| format!("{symbol}: {count}"))
            .collect();
        write!(f, "{{{}}}", entries.join(", "))
    }
}
