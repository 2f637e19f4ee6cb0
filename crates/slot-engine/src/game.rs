//! Game rulesets

use serde::Serialize;

use crate::error::ConfigError;
use crate::grid::{Payline, Window};
use crate::paytable::PayRule;
use crate::reel::ReelStrip;

/// One ruleset a machine can run: paylines, pay rules and one reel per column.
///
/// Only constructible against a window it fits, so a `GameBase` in hand
/// always has `reels.len() == window.cols()` and in-bounds paylines for the
/// window it was checked against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameBase {
    name: String,
    paylines: Vec<Payline>,
    pay_rules: Vec<PayRule>,
    reels: Vec<ReelStrip>,
    is_free_game: bool,
}

impl GameBase {
    /// Create a game and check it against `window`
    pub fn new(
        name: impl Into<String>,
        paylines: Vec<Payline>,
        pay_rules: Vec<PayRule>,
        reels: Vec<ReelStrip>,
        window: &Window,
    ) -> Result<Self, ConfigError> {
        let game = Self {
            name: name.into(),
            paylines,
            pay_rules,
            reels,
            is_free_game: false,
        };
        game.validate(window)?;
        Ok(game)
    }

    /// Mark as the game played during free spins
    pub fn with_free_game(mut self, is_free_game: bool) -> Self {
        self.is_free_game = is_free_game;
        self
    }

    /// Check reel count and payline bounds against `window`
    pub fn validate(&self, window: &Window) -> Result<(), ConfigError> {
        if self.reels.len() != window.cols() {
            return Err(ConfigError::ReelCountMismatch {
                game: self.name.clone(),
                reels: self.reels.len(),
                cols: window.cols(),
            });
        }

        for (index, payline) in self.paylines.iter().enumerate() {
            if payline.len() > window.cols() {
                return Err(ConfigError::PaylineTooLong {
                    game: self.name.clone(),
                    payline: index,
                    len: payline.len(),
                    cols: window.cols(),
                });
            }
            for (column, row) in payline.iter().enumerate() {
                let rows = window.rows(column).unwrap_or(0);
                if row >= rows {
                    return Err(ConfigError::PaylineOutOfBounds {
                        game: self.name.clone(),
                        payline: index,
                        column,
                        row,
                        rows,
                    });
                }
            }
        }

        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn paylines(&self) -> &[Payline] {
        &self.paylines
    }

    pub fn pay_rules(&self) -> &[PayRule] {
        &self.pay_rules
    }

    pub fn reels(&self) -> &[ReelStrip] {
        &self.reels
    }

    pub fn is_free_game(&self) -> bool {
        self.is_free_game
    }

    /// Sum of every rule's reward value
    pub fn total_payout(&self) -> f64 {
        self.pay_rules.iter().map(|rule| rule.reward().value).sum()
    }

    pub(crate) fn push_reel(&mut self, reel: ReelStrip) {
        self.reels.push(reel);
        for payline in &mut self.paylines {
            payline.repeat_last();
        }
    }
}
