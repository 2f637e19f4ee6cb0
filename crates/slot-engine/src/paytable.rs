//! Pay rules and win calculation

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::reward::Reward;
use crate::symbols::{Symbol, matches};

/// Default cap on patterns produced by wildcard expansion
pub const DEFAULT_MAX_EXPANSIONS: usize = 4096;

/// Pattern scored along a payline.
///
/// The pattern matches when it appears as a contiguous run anywhere in the
/// line's drawn symbols, not only from the first column. Scatter elements are
/// only counted by [`ScatterRule`]; a line pattern containing one never pays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRule {
    pub symbol_pattern: Vec<Symbol>,
    pub reward: Reward,
}

impl LineRule {
    pub fn new(symbol_pattern: Vec<Symbol>, reward: Reward) -> Self {
        Self {
            symbol_pattern,
            reward,
        }
    }

    /// First offset at which the pattern lines up with `drawn`
    pub fn match_offset(&self, drawn: &[&Symbol]) -> Option<usize> {
        let width = self.symbol_pattern.len();
        if width == 0 || width > drawn.len() || self.has_scatter() {
            return None;
        }
        (0..=drawn.len() - width).find(|&offset| {
            drawn[offset..offset + width]
                .iter()
                .zip(&self.symbol_pattern)
                .all(|(drawn, pattern)| matches(drawn, pattern))
        })
    }

    pub fn matches_line(&self, drawn: &[&Symbol]) -> bool {
        self.match_offset(drawn).is_some()
    }

    /// Whether the pattern mentions a scatter element
    pub fn has_scatter(&self) -> bool {
        self.symbol_pattern.iter().any(Symbol::is_scatter)
    }
}

/// Pattern counted anywhere on the grid, once per column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterRule {
    pub symbol_pattern: Vec<Symbol>,
    pub min_count: usize,
    pub reward: Reward,
}

impl ScatterRule {
    pub fn new(symbol_pattern: Vec<Symbol>, min_count: usize, reward: Reward) -> Self {
        Self {
            symbol_pattern,
            min_count,
            reward,
        }
    }

    /// Scatter hits on `grid`.
    ///
    /// Each distinct pattern symbol counts at most once per column, however
    /// many times it shows up in that column.
    pub fn count(&self, grid: &[Vec<Symbol>]) -> usize {
        let mut distinct: Vec<&Symbol> = Vec::with_capacity(self.symbol_pattern.len());
        for symbol in &self.symbol_pattern {
            if !distinct.contains(&symbol) {
                distinct.push(symbol);
            }
        }

        grid.iter()
            .map(|column| {
                distinct
                    .iter()
                    .filter(|pattern| column.iter().any(|drawn| matches(drawn, pattern)))
                    .count()
            })
            .sum()
    }

    pub fn matches_grid(&self, grid: &[Vec<Symbol>]) -> bool {
        self.count(grid) >= self.min_count
    }
}

/// Any rule a game can pay on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum PayRule {
    Line(LineRule),
    Scatter(ScatterRule),
}

impl PayRule {
    /// Shorthand for a line rule
    pub fn line(symbol_pattern: Vec<Symbol>, reward: Reward) -> Self {
        PayRule::Line(LineRule::new(symbol_pattern, reward))
    }

    /// Shorthand for a scatter rule
    pub fn scatter(symbol_pattern: Vec<Symbol>, min_count: usize, reward: Reward) -> Self {
        PayRule::Scatter(ScatterRule::new(symbol_pattern, min_count, reward))
    }

    pub fn symbol_pattern(&self) -> &[Symbol] {
        match self {
            PayRule::Line(rule) => &rule.symbol_pattern,
            PayRule::Scatter(rule) => &rule.symbol_pattern,
        }
    }

    pub fn reward(&self) -> Reward {
        match self {
            PayRule::Line(rule) => rule.reward,
            PayRule::Scatter(rule) => rule.reward,
        }
    }

    pub fn is_scatter(&self) -> bool {
        matches!(self, PayRule::Scatter(_))
    }
}

impl From<LineRule> for PayRule {
    fn from(rule: LineRule) -> Self {
        PayRule::Line(rule)
    }
}

impl From<ScatterRule> for PayRule {
    fn from(rule: ScatterRule) -> Self {
        PayRule::Scatter(rule)
    }
}

fn join_pattern(pattern: &[Symbol]) -> String {
    pattern
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for PayRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayRule::Line(rule) => {
                write!(f, "{} --- {}", join_pattern(&rule.symbol_pattern), rule.reward)
            }
            PayRule::Scatter(rule) => write!(
                f,
                "{} ({}+ anywhere) --- {}",
                join_pattern(&rule.symbol_pattern),
                rule.min_count,
                rule.reward
            ),
        }
    }
}

/// Builds line rules from a pattern containing wildcards.
///
/// Every wildcard position is replaced by each non-wildcard symbol the pattern
/// mentions, so `[A, *, B]` becomes `[A, A, B]` and `[A, B, B]`. Expansion
/// happens once, up front; the resulting rules carry no wildcards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnyPayRule {
    pub symbol_pattern: Vec<Symbol>,
    pub reward: Reward,
    symbol_patterns: Vec<Vec<Symbol>>,
}

impl AnyPayRule {
    pub fn new(symbol_pattern: Vec<Symbol>, reward: Reward) -> Result<Self, ConfigError> {
        Self::with_limit(symbol_pattern, reward, DEFAULT_MAX_EXPANSIONS)
    }

    /// Expand under `config.max_pattern_expansions`
    pub fn with_config(
        symbol_pattern: Vec<Symbol>,
        reward: Reward,
        config: &EngineConfig,
    ) -> Result<Self, ConfigError> {
        Self::with_limit(symbol_pattern, reward, config.max_pattern_expansions)
    }

    /// Expand, refusing to produce more than `limit` patterns
    pub fn with_limit(
        symbol_pattern: Vec<Symbol>,
        reward: Reward,
        limit: usize,
    ) -> Result<Self, ConfigError> {
        let mut alphabet: Vec<&Symbol> = Vec::new();
        for symbol in symbol_pattern.iter().filter(|s| !s.is_wildcard()) {
            if !alphabet.contains(&symbol) {
                alphabet.push(symbol);
            }
        }

        let wildcards = symbol_pattern.iter().filter(|s| s.is_wildcard()).count();
        let patterns = u32::try_from(wildcards)
            .ok()
            .and_then(|w| alphabet.len().checked_pow(w))
            .unwrap_or(usize::MAX);
        if patterns > limit {
            return Err(ConfigError::ExpansionLimit { patterns, limit });
        }

        let mut symbol_patterns: Vec<Vec<Symbol>> = vec![Vec::with_capacity(symbol_pattern.len())];
        for symbol in &symbol_pattern {
            symbol_patterns = if symbol.is_wildcard() {
                symbol_patterns
                    .into_iter()
                    .flat_map(|prefix| {
                        alphabet.iter().map(move |choice| {
                            let mut next = prefix.clone();
                            next.push((*choice).clone());
                            next
                        })
                    })
                    .collect()
            } else {
                symbol_patterns
                    .into_iter()
                    .map(|mut prefix| {
                        prefix.push(symbol.clone());
                        prefix
                    })
                    .collect()
            };
        }

        Ok(Self {
            symbol_pattern,
            reward,
            symbol_patterns,
        })
    }

    /// Concrete patterns
    pub fn symbol_patterns(&self) -> &[Vec<Symbol>] {
        &self.symbol_patterns
    }

    /// One line rule per concrete pattern, all paying the same reward
    pub fn into_rules(self) -> Vec<PayRule> {
        let reward = self.reward;
        self.symbol_patterns
            .into_iter()
            .map(|pattern| PayRule::line(pattern, reward))
            .collect()
    }
}

/// A payline win
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineWin {
    /// Index into the game's pay rules
    pub rule_index: usize,
    /// Index into the game's paylines
    pub payline_index: usize,
    /// Column where the pattern starts
    pub offset: usize,
    pub reward: Reward,
}

/// A scatter win
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterWin {
    /// Index into the game's pay rules
    pub rule_index: usize,
    /// Per-column scatter hits
    pub count: usize,
    pub reward: Reward,
}

/// Which rule produced a winning reward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "win", rename_all = "snake_case")]
pub enum WinSource {
    Line(LineWin),
    Scatter(ScatterWin),
}

impl WinSource {
    pub fn reward(&self) -> Reward {
        match self {
            WinSource::Line(win) => win.reward,
            WinSource::Scatter(win) => win.reward,
        }
    }

    pub fn rule_index(&self) -> usize {
        match self {
            WinSource::Line(win) => win.rule_index,
            WinSource::Scatter(win) => win.rule_index,
        }
    }
}

/// Result of evaluating a grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Best reward (zero money when nothing matched)
    pub reward: Reward,
    /// Winning rule, if any
    pub source: Option<WinSource>,
}

impl Evaluation {
    /// Check if this is a winning draw
    pub fn is_win(&self) -> bool {
        self.source.is_some()
    }
}
