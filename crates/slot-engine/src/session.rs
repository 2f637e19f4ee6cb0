//! Play sessions against external balance and upgrade services
//!
//! The engine owns no money and no inventory. A [`SlotTable`] asks a
//! [`BalanceService`] whether a player can afford a play, builds that player's
//! machine from the upgrades an [`UpgradeService`] reports, runs one round and
//! settles the result back through the balance service.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result, SlotError};
use crate::grid::Grid;
use crate::machine::Machine;
use crate::presets;
use crate::reel::ReelStrip;
use crate::reward::{Reward, RewardKind};

/// Ledger memo for a winning play
pub const WINNINGS_MEMO: &str = "slot winnings";

/// Ledger memo for a losing play
pub const COST_MEMO: &str = "slot cost";

/// Player identifier understood by the services
pub type AccountId = u64;

// ═══════════════════════════════════════════════════════════════════════════════
// SERVICES
// ═══════════════════════════════════════════════════════════════════════════════

/// Player balances, implemented by the host application
pub trait BalanceService: Send + Sync {
    /// Current balance of `account`
    fn balance(&self, account: AccountId) -> Result<f64>;

    /// Credit `amount` with a ledger memo
    fn deposit(&self, account: AccountId, amount: f64, memo: &str) -> Result<()>;

    /// Debit `amount` with a ledger memo
    fn withdraw(&self, account: AccountId, amount: f64, memo: &str) -> Result<()>;
}

/// Purchased machine upgrades, implemented by the host application
pub trait UpgradeService: Send + Sync {
    /// How many of `kind` the player owns
    fn owned_quantity(&self, account: AccountId, kind: UpgradeKind) -> Result<u32>;

    /// Owned upgrades of `kind` grouped by their parameters
    fn owned_upgrade_properties(
        &self,
        account: AccountId,
        kind: UpgradeKind,
    ) -> Result<Vec<OwnedUpgrade>>;
}

/// Upgrades a player can own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeKind {
    /// One more reel, a copy of the table's base reel
    ExtraReel,
    /// A larger window
    WindowExpansion,
}

/// Growth applied by one window expansion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowExpansion {
    pub extra_rows: usize,
    pub extra_cols: usize,
}

/// `count` identical upgrades sharing `params`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedUpgrade {
    pub count: u32,
    pub params: WindowExpansion,
}

// ═══════════════════════════════════════════════════════════════════════════════
// OUTCOMES
// ═══════════════════════════════════════════════════════════════════════════════

/// What one round of spins produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundOutcome {
    /// Spins actually made, the paid one included
    pub spins_played: u32,
    /// Free spins awarded along the way
    pub free_spins_won: u32,
    /// Money won across every spin
    pub winnings: f64,
    /// Grid of the final spin
    pub last_grid: Grid,
    /// Reward of the final spin
    pub last_reward: Reward,
    /// Spins were still owed when the per-round cap stopped play
    pub truncated: bool,
}

impl RoundOutcome {
    pub fn is_win(&self) -> bool {
        self.winnings > 0.0
    }
}

/// A settled play
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayOutcome {
    pub round: RoundOutcome,
    /// Price of the play
    pub cost: f64,
    /// Balance change: winnings when the round paid, minus the cost otherwise
    pub net: f64,
}

// ═══════════════════════════════════════════════════════════════════════════════
// TABLE
// ═══════════════════════════════════════════════════════════════════════════════

/// A base machine offered at a fixed price per play
#[derive(Debug, Clone)]
pub struct SlotTable {
    machine: Machine,
    base_reel: ReelStrip,
    cost: f64,
}

impl SlotTable {
    pub fn new(machine: Machine, base_reel: ReelStrip, cost: f64) -> Self {
        Self {
            machine,
            base_reel,
            cost,
        }
    }

    /// The classic fruit machine at 20 per play
    pub fn classic() -> std::result::Result<Self, ConfigError> {
        Ok(Self::new(presets::classic()?, presets::classic_reel()?, 20.0))
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    pub fn base_reel(&self) -> &ReelStrip {
        &self.base_reel
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// A private copy of the base machine with `account`'s upgrades applied:
    /// one extra reel per owned reel, then every owned window expansion
    pub fn prepare_machine(
        &self,
        account: AccountId,
        upgrades: &dyn UpgradeService,
    ) -> Result<Machine> {
        let mut machine = self.machine.clone();

        let extra_reels = upgrades.owned_quantity(account, UpgradeKind::ExtraReel)?;
        for _ in 0..extra_reels {
            machine.add_reel(self.base_reel.clone());
        }

        for owned in upgrades.owned_upgrade_properties(account, UpgradeKind::WindowExpansion)? {
            for _ in 0..owned.count {
                let grown = machine
                    .window()
                    .expanded(owned.params.extra_rows, owned.params.extra_cols);
                machine.expand_window(grown);
            }
        }

        Ok(machine)
    }

    /// Spin until no spins remain.
    ///
    /// Starts with one spin; a free-spin reward adds its value in spins and a
    /// money reward adds to the winnings. Stops early once
    /// `max_spins_per_round` spins have been made.
    pub fn play_round<R: Rng + ?Sized>(&self, machine: &Machine, rng: &mut R) -> RoundOutcome {
        let cap = machine.config().max_spins_per_round;
        let mut remaining: u32 = 1;
        let mut outcome = RoundOutcome {
            spins_played: 0,
            free_spins_won: 0,
            winnings: 0.0,
            last_grid: Grid::new(),
            last_reward: Reward::none(),
            truncated: false,
        };

        while remaining > 0 {
            if outcome.spins_played >= cap {
                log::debug!("Round stopped at {cap} spins with {remaining} still owed");
                outcome.truncated = true;
                break;
            }

            let grid = machine.pull_lever_with(rng);
            let reward = machine.evaluate(&grid);
            match reward.kind {
                RewardKind::FreeSpin => {
                    let won = reward.value as u32;
                    outcome.free_spins_won = outcome.free_spins_won.saturating_add(won);
                    remaining = remaining.saturating_add(won);
                }
                RewardKind::Money => outcome.winnings += reward.value,
            }

            remaining -= 1;
            outcome.spins_played += 1;
            outcome.last_grid = grid;
            outcome.last_reward = reward;
        }

        outcome
    }

    /// One paid play for `account`.
    ///
    /// Refuses with [`SlotError::InsufficientBalance`] when the balance is
    /// below the cost. A round that wins deposits the winnings; one that
    /// doesn't withdraws the cost.
    pub fn play<R: Rng + ?Sized>(
        &self,
        account: AccountId,
        balance: &dyn BalanceService,
        upgrades: &dyn UpgradeService,
        rng: &mut R,
    ) -> Result<PlayOutcome> {
        let current = balance.balance(account)?;
        if current < self.cost {
            return Err(SlotError::InsufficientBalance {
                balance: current,
                cost: self.cost,
            });
        }

        let machine = self.prepare_machine(account, upgrades)?;
        let round = self.play_round(&machine, rng);

        let net = if round.is_win() {
            balance.deposit(account, round.winnings, WINNINGS_MEMO)?;
            round.winnings
        } else {
            balance.withdraw(account, self.cost, COST_MEMO)?;
            -self.cost
        };

        log::info!(
            "Account {account} played {} spin(s): net {net:.2}",
            round.spins_played
        );

        Ok(PlayOutcome {
            round,
            cost: self.cost,
            net,
        })
    }
}
