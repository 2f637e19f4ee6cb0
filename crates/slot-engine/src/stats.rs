//! Analytic machine statistics
//!
//! Everything here is a pure function of reel composition and pay rules; no
//! draw is ever made. Results are rounded to `EngineConfig::stat_precision`
//! digits so repeated calls compare equal.

use serde::{Deserialize, Serialize};

use crate::game::GameBase;
use crate::machine::Machine;
use crate::paytable::PayRule;
use crate::reel::ReelStrip;
use crate::symbols::Symbol;

/// Per-rule statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleStats {
    pub game: String,
    pub rule: String,
    pub prob_winning: f64,
    pub hit_rate: f64,
    pub hit_frequency: f64,
}

/// Snapshot of all statistics for one average bet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineStats {
    pub rules: Vec<RuleStats>,
    pub total_prob_winning: f64,
    pub avg_bet: f64,
    pub rtp: f64,
    pub volatility: f64,
}

/// Chance of one pattern element lining up on `reel`
fn position_probability(reel: &ReelStrip, element: &Symbol) -> f64 {
    if element.is_wildcard() {
        reel.len() as f64 / reel.distinct_count() as f64
    } else {
        reel.count_matching(element) as f64 / reel.len() as f64
    }
}

/// Unrounded win probability of `rule` against `game`'s reels
fn raw_prob_winning(game: &GameBase, rule: &PayRule) -> f64 {
    if matches!(rule, PayRule::Line(line) if line.has_scatter()) {
        return 0.0;
    }
    game.reels()
        .iter()
        .zip(rule.symbol_pattern())
        .map(|(reel, element)| position_probability(reel, element))
        .product()
}

impl Machine {
    fn raw_total_prob_winning(&self) -> f64 {
        self.games()
            .iter()
            .flat_map(|game| game.pay_rules().iter().map(move |rule| raw_prob_winning(game, rule)))
            .sum()
    }

    fn raw_rtp(&self, avg_bet: f64) -> f64 {
        let payouts: f64 = self.games().iter().map(GameBase::total_payout).sum();
        self.raw_total_prob_winning() * payouts / avg_bet
    }

    /// Probability that `rule` pays on the active game's reels.
    ///
    /// Product over pattern positions of (matching cells ÷ reel length). A
    /// wildcard position contributes (reel length ÷ distinct symbols).
    pub fn prob_winning(&self, rule: &PayRule) -> f64 {
        let prob = raw_prob_winning(self.current_game(), rule);
        if prob == 0.0 {
            log::warn!("Probability of winning is zero for rule '{rule}'. Check the pay rules.");
        }
        self.config().round(prob)
    }

    /// Expected spins per win; infinite when the rule never pays
    pub fn hit_rate(&self, rule: &PayRule) -> f64 {
        let prob = self.prob_winning(rule);
        if prob == 0.0 {
            return f64::INFINITY;
        }
        self.config().round(1.0 / prob)
    }

    /// Inverse of the hit rate; 1.0 when the hit rate is zero
    pub fn hit_frequency(&self, rule: &PayRule) -> f64 {
        let rate = self.hit_rate(rule);
        if rate == 0.0 {
            return 1.0;
        }
        self.config().round(1.0 / rate)
    }

    /// Sum of win probabilities of every rule in every game, each against its
    /// own game's reels
    pub fn total_prob_winning(&self) -> f64 {
        self.config().round(self.raw_total_prob_winning())
    }

    /// Return to player for `avg_bet`; 1.0 when the bet is zero
    pub fn rtp(&self, avg_bet: f64) -> f64 {
        if avg_bet == 0.0 {
            return 1.0;
        }
        let rtp = self.raw_rtp(avg_bet);
        if rtp == 0.0 {
            log::warn!("RTP is zero: no rule can pay out.");
        }
        self.config().round(rtp)
    }

    /// `1 / rtp(1.0)`; infinite when the rounded RTP is zero
    pub fn volatility(&self) -> f64 {
        let rtp = self.rtp(1.0);
        if rtp == 0.0 {
            log::warn!("Volatility is unbounded: RTP is zero.");
            return f64::INFINITY;
        }
        self.config().round(1.0 / rtp)
    }

    /// All statistics at once, rules listed game by game
    pub fn statistics(&self, avg_bet: f64) -> MachineStats {
        let rules = self
            .games()
            .iter()
            .flat_map(|game| {
                game.pay_rules().iter().map(move |rule| {
                    let prob = self.config().round(raw_prob_winning(game, rule));
                    let hit_rate = if prob == 0.0 {
                        f64::INFINITY
                    } else {
                        self.config().round(1.0 / prob)
                    };
                    let hit_frequency = if hit_rate == 0.0 {
                        1.0
                    } else {
                        self.config().round(1.0 / hit_rate)
                    };
                    RuleStats {
                        game: game.name().to_string(),
                        rule: rule.to_string(),
                        prob_winning: prob,
                        hit_rate,
                        hit_frequency,
                    }
                })
            })
            .collect();

        MachineStats {
            rules,
            total_prob_winning: self.total_prob_winning(),
            avg_bet,
            rtp: self.rtp(avg_bet),
            volatility: self.volatility(),
        }
    }
}
