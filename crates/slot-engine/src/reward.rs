//! Rewards and their ranking

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// What a winning rule pays out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardKind {
    /// Amount credited to the player
    Money,
    /// Number of extra spins
    FreeSpin,
}

/// A rule's payout.
///
/// Rewards deliberately do not implement `PartialOrd`: ranking goes through
/// [`Reward::compare`] so the free-spins-beat-money rule stays visible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub kind: RewardKind,
    pub value: f64,
}

impl Reward {
    pub fn new(kind: RewardKind, value: f64) -> Self {
        Self { kind, value }
    }

    pub fn money(value: f64) -> Self {
        Self::new(RewardKind::Money, value)
    }

    pub fn free_spins(spins: u32) -> Self {
        Self::new(RewardKind::FreeSpin, f64::from(spins))
    }

    /// The "nothing matched" reward
    pub fn none() -> Self {
        Self::money(0.0)
    }

    /// Check if this pays anything
    pub fn is_win(&self) -> bool {
        self.value > 0.0
    }

    pub fn is_free_spin(&self) -> bool {
        self.kind == RewardKind::FreeSpin
    }

    /// Rank two rewards: any free-spin reward beats any money reward,
    /// same kinds compare by value.
    pub fn compare(a: &Reward, b: &Reward) -> Ordering {
        match (a.kind, b.kind) {
            (RewardKind::FreeSpin, RewardKind::Money) => Ordering::Greater,
            (RewardKind::Money, RewardKind::FreeSpin) => Ordering::Less,
            _ => a.value.total_cmp(&b.value),
        }
    }

    /// The higher-ranked of two rewards (`a` on ties)
    pub fn best(a: Reward, b: Reward) -> Reward {
        if Reward::compare(&b, &a) == Ordering::Greater { b } else { a }
    }
}

impl Default for Reward {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Display for Reward {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RewardKind::Money => write!(f, "${:.2}", self.value),
            RewardKind::FreeSpin if self.value == 1.0 => write!(f, "1 free spin"),
            RewardKind::FreeSpin => write!(f, "{} free spins", self.value),
        }
    }
}
