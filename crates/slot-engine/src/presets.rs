//! Ready-made machines

use crate::error::ConfigError;
use crate::game::GameBase;
use crate::grid::Window;
use crate::machine::Machine;
use crate::paytable::PayRule;
use crate::reel::ReelStrip;
use crate::reward::Reward;
use crate::symbols::Symbol;

const NUM_REELS: usize = 3;

/// Fruit symbols of the classic machine, rarest last
pub fn classic_symbols() -> Vec<Symbol> {
    ["apple", "banana", "cherries"]
        .into_iter()
        .map(Symbol::plain)
        .collect()
}

/// The reel every classic column starts from; also what extra-reel
/// upgrades append
pub fn classic_reel() -> Result<ReelStrip, ConfigError> {
    ReelStrip::new(&classic_symbols(), &[6, 4, 2])
}

/// Three fruit reels on a 3×3 window scored on the centerline.
///
/// Three of a kind pays 200 (apple), 500 (banana) or 1000 (cherries).
pub fn classic() -> Result<Machine, ConfigError> {
    let window = Window::uniform(3, NUM_REELS);
    let reel = classic_reel()?;
    let pay_rules = classic_symbols()
        .into_iter()
        .zip([200.0, 500.0, 1000.0])
        .map(|(symbol, pay)| PayRule::line(vec![symbol; NUM_REELS], Reward::money(pay)))
        .collect();

    let game = GameBase::new(
        "Default",
        vec![window.centerline()],
        pay_rules,
        vec![reel; NUM_REELS],
        &window,
    )?;
    Machine::new(vec![game], window)
}

/// One rare symbol among blanks; AAA on the centerline pays 1000
pub fn single_line() -> Result<Machine, ConfigError> {
    let window = Window::uniform(3, NUM_REELS);
    let a = Symbol::plain("A");
    let reel = ReelStrip::new(&[a.clone(), Symbol::plain("X")], &[1, 9])?;

    let game = GameBase::new(
        "Single Line",
        vec![window.centerline()],
        vec![PayRule::line(vec![a; NUM_REELS], Reward::money(1000.0))],
        vec![reel; NUM_REELS],
        &window,
    )?;
    Machine::new(vec![game], window)
}
