//! Slot machine play and reconfiguration

use rand::Rng;
use serde::Serialize;

use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::game::GameBase;
use crate::grid::{Grid, Window};
use crate::paytable::{Evaluation, LineWin, PayRule, ScatterWin, WinSource};
use crate::reel::ReelStrip;
use crate::reward::Reward;
use crate::symbols::Symbol;

/// A slot machine running one of several games through a shared window.
///
/// `Machine` is a plain value: `Clone` is a deep copy. Per-player upgrades
/// (`add_reel`, `expand_window`) mutate in place, so apply them to a clone of
/// the base machine, never to an instance other plays are reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Machine {
    games: Vec<GameBase>,
    window: Window,
    current_game: usize,
    config: EngineConfig,
}

impl Machine {
    /// Create a machine with default config
    pub fn new(games: Vec<GameBase>, window: Window) -> Result<Self, ConfigError> {
        Self::with_config(games, window, EngineConfig::default())
    }

    /// Create with specific config
    pub fn with_config(
        games: Vec<GameBase>,
        window: Window,
        config: EngineConfig,
    ) -> Result<Self, ConfigError> {
        if games.is_empty() {
            return Err(ConfigError::NoGames);
        }
        for game in &games {
            Self::validate_game_window(&window, game)?;
        }

        Ok(Self {
            games,
            window,
            current_game: 0,
            config,
        })
    }

    /// Check that `game` fits `window`
    pub fn validate_game_window(window: &Window, game: &GameBase) -> Result<(), ConfigError> {
        game.validate(window)
    }

    /// Re-run the construction checks on the current geometry
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.games
            .iter()
            .try_for_each(|game| Self::validate_game_window(&self.window, game))
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ACCESSORS
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn games(&self) -> &[GameBase] {
        &self.games
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn current_game_index(&self) -> usize {
        self.current_game
    }

    pub fn current_game(&self) -> &GameBase {
        &self.games[self.current_game]
    }

    /// Switch the active game
    pub fn select_game(&mut self, index: usize) -> Result<(), ConfigError> {
        if index >= self.games.len() {
            return Err(ConfigError::UnknownGame {
                index,
                count: self.games.len(),
            });
        }
        self.current_game = index;
        Ok(())
    }

    /// First game flagged for free spins
    pub fn free_game_index(&self) -> Option<usize> {
        self.games.iter().position(GameBase::is_free_game)
    }

    /// Reels in the active game
    pub fn num_reels(&self) -> usize {
        self.current_game().reels().len()
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // PLAY
    // ═══════════════════════════════════════════════════════════════════════════

    /// Spin every reel of the active game with the thread-local generator
    pub fn pull_lever(&self) -> Grid {
        self.pull_lever_with(&mut rand::rng())
    }

    /// Spin every reel of the active game, in reel order
    pub fn pull_lever_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Grid {
        self.current_game()
            .reels()
            .iter()
            .enumerate()
            .map(|(column, reel)| reel.spin(&self.window, column, rng))
            .collect()
    }

    /// Best reward `grid` earns in the active game
    pub fn evaluate(&self, grid: &[Vec<Symbol>]) -> Reward {
        self.evaluate_detailed(grid).reward
    }

    /// Best reward plus the rule that produced it.
    ///
    /// Line and scatter rules are ranked together with [`Reward::compare`];
    /// only the single best win counts. Earlier rules win ties.
    pub fn evaluate_detailed(&self, grid: &[Vec<Symbol>]) -> Evaluation {
        let game = self.current_game();
        let mut best: Option<WinSource> = None;

        let mut consider = |candidate: WinSource| {
            let replace = match &best {
                None => true,
                Some(current) => {
                    Reward::compare(&candidate.reward(), &current.reward()).is_gt()
                }
            };
            if replace {
                best = Some(candidate);
            }
        };

        for (payline_index, payline) in game.paylines().iter().enumerate() {
            let drawn = payline.symbols_on(grid);
            for (rule_index, rule) in game.pay_rules().iter().enumerate() {
                if let PayRule::Line(line) = rule {
                    if let Some(offset) = line.match_offset(&drawn) {
                        consider(WinSource::Line(LineWin {
                            rule_index,
                            payline_index,
                            offset,
                            reward: line.reward,
                        }));
                    }
                }
            }
        }

        for (rule_index, rule) in game.pay_rules().iter().enumerate() {
            if let PayRule::Scatter(scatter) = rule {
                let count = scatter.count(grid);
                if count >= scatter.min_count {
                    consider(WinSource::Scatter(ScatterWin {
                        rule_index,
                        count,
                        reward: scatter.reward,
                    }));
                }
            }
        }

        Evaluation {
            reward: best.as_ref().map(WinSource::reward).unwrap_or_default(),
            source: best,
        }
    }

    /// Whether any payline of the active game passes through `(column, row)`
    pub fn is_on_scoreline(&self, column: usize, row: usize) -> bool {
        self.current_game()
            .paylines()
            .iter()
            .any(|payline| payline.row(column) == Some(row))
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // RECONFIGURATION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Append a reel to the active game.
    ///
    /// Grows the window by repeating its last column when the reels outnumber
    /// it, and repeats every payline's last row. No re-validation.
    pub fn add_reel(&mut self, reel: ReelStrip) {
        let game = &mut self.games[self.current_game];
        game.push_reel(reel);
        if game.reels().len() > self.window.cols() {
            self.window.push_repeat_last();
        }
        log::debug!(
            "Added reel to '{}': {} reels, window {:?}",
            self.games[self.current_game].name(),
            self.num_reels(),
            self.window.rows_per_column
        );
    }

    /// Replace the window wholesale. The caller guarantees it still fits
    /// every game; see [`Machine::try_expand_window`] for the checked form.
    pub fn expand_window(&mut self, window: Window) {
        log::debug!(
            "Window {:?} -> {:?}",
            self.window.rows_per_column,
            window.rows_per_column
        );
        self.window = window;
    }

    /// Replace the window only if every game still fits it
    pub fn try_expand_window(&mut self, window: Window) -> Result<(), ConfigError> {
        for game in &self.games {
            Self::validate_game_window(&window, game)?;
        }
        self.expand_window(window);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Payline;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn a() -> Symbol {
        Symbol::plain("A")
    }

    fn b() -> Symbol {
        Symbol::plain("B")
    }

    fn only(symbol: Symbol) -> ReelStrip {
        ReelStrip::new(&[symbol], &[1]).unwrap()
    }

    fn ab_reel() -> ReelStrip {
        ReelStrip::new(&[a(), b()], &[1, 1]).unwrap()
    }

    fn flat_game(rules: Vec<PayRule>, reel: ReelStrip) -> (GameBase, Window) {
        let window = Window::uniform(1, 3);
        let game =
            GameBase::new("Game1", vec![window.topline()], rules, vec![reel; 3], &window).unwrap();
        (game, window)
    }

    #[test]
    fn test_machine_creation() {
        let (game, window) = flat_game(
            vec![PayRule::line(vec![a(); 3], Reward::money(1000.0))],
            ab_reel(),
        );
        let machine = Machine::new(vec![game], window.clone()).unwrap();
        assert_eq!(machine.current_game_index(), 0);
        assert_eq!(machine.window(), &window);
        assert_eq!(machine.num_reels(), 3);
    }

    #[test]
    fn test_no_games() {
        assert_eq!(
            Machine::new(Vec::new(), Window::uniform(3, 3)).unwrap_err(),
            ConfigError::NoGames
        );
    }

    #[test]
    fn test_game_window_mismatch() {
        let (game, _) = flat_game(vec![], ab_reel());
        let err = Machine::new(vec![game], Window::uniform(3, 5)).unwrap_err();
        assert!(matches!(err, ConfigError::ReelCountMismatch { reels: 3, cols: 5, .. }));
    }

    #[test]
    fn test_pull_lever_single_symbol() {
        let (game, window) = flat_game(vec![], only(a()));
        let machine = Machine::new(vec![game], window).unwrap();
        let grid = machine.pull_lever();
        assert_eq!(grid.len(), 3);
        assert!(grid.iter().flatten().all(|s| *s == a()));
    }

    #[test]
    fn test_pull_lever_shape_follows_window() {
        let window = Window::new(vec![3, 5, 3]);
        let game =
            GameBase::new("g", vec![window.centerline()], vec![], vec![ab_reel(); 3], &window)
                .unwrap();
        let machine = Machine::new(vec![game], window).unwrap();
        let grid = machine.pull_lever_with(&mut ChaCha8Rng::seed_from_u64(1));
        let heights: Vec<usize> = grid.iter().map(Vec::len).collect();
        assert_eq!(heights, vec![3, 5, 3]);
    }

    #[test]
    fn test_evaluate_win_and_loss() {
        let (game, window) = flat_game(
            vec![PayRule::line(vec![a(); 3], Reward::money(1000.0))],
            ab_reel(),
        );
        let machine = Machine::new(vec![game], window).unwrap();
        assert_eq!(machine.evaluate(&[vec![a()], vec![a()], vec![a()]]), Reward::money(1000.0));
        assert_eq!(machine.evaluate(&[vec![b()], vec![b()], vec![b()]]), Reward::none());
    }

    #[test]
    fn test_evaluate_uses_active_game() {
        let (game_a, window) = flat_game(
            vec![PayRule::line(vec![a(); 3], Reward::money(1000.0))],
            only(a()),
        );
        let (game_b, _) = flat_game(
            vec![PayRule::line(vec![b(); 3], Reward::money(500.0))],
            only(b()),
        );
        let mut machine = Machine::new(vec![game_a, game_b], window).unwrap();
        let all_b = [vec![b()], vec![b()], vec![b()]];
        assert_eq!(machine.evaluate(&all_b), Reward::none());
        machine.select_game(1).unwrap();
        assert_eq!(machine.evaluate(&all_b), Reward::money(500.0));
        assert!(machine.select_game(2).is_err());
    }

    #[test]
    fn test_sub_pattern_on_longer_line() {
        let window = Window::uniform(1, 3);
        let game = GameBase::new(
            "g",
            vec![Payline::new(vec![0, 0, 0])],
            vec![PayRule::line(vec![a(), a()], Reward::money(1000.0))],
            vec![ab_reel(); 3],
            &window,
        )
        .unwrap();
        let machine = Machine::new(vec![game], window).unwrap();
        assert_eq!(machine.evaluate(&[vec![a()], vec![a()], vec![b()]]), Reward::money(1000.0));
    }

    #[test]
    fn test_free_spin_outranks_money() {
        let window = Window::uniform(1, 3);
        let game = GameBase::new(
            "g",
            vec![window.topline()],
            vec![
                PayRule::line(vec![a(); 3], Reward::money(500.0)),
                PayRule::line(vec![a(), a()], Reward::free_spins(1)),
            ],
            vec![ab_reel(); 3],
            &window,
        )
        .unwrap();
        let machine = Machine::new(vec![game], window).unwrap();
        let detail = machine.evaluate_detailed(&[vec![a()], vec![a()], vec![a()]]);
        assert_eq!(detail.reward, Reward::free_spins(1));
        assert_eq!(detail.source.map(|s| s.rule_index()), Some(1));
    }

    #[test]
    fn test_scatter_competes_with_lines() {
        let window = Window::uniform(3, 3);
        let game = GameBase::new(
            "g",
            vec![window.centerline()],
            vec![
                PayRule::line(vec![b(); 3], Reward::money(50.0)),
                PayRule::scatter(vec![Symbol::scatter(&a()); 3], 3, Reward::money(1000.0)),
            ],
            vec![ab_reel(); 3],
            &window,
        )
        .unwrap();
        let machine = Machine::new(vec![game], window).unwrap();
        let grid = vec![
            vec![a(), b(), b()],
            vec![a(), b(), a()],
            vec![b(), b(), a()],
        ];
        let detail = machine.evaluate_detailed(&grid);
        assert_eq!(detail.reward, Reward::money(1000.0));
        assert!(matches!(detail.source, Some(WinSource::Scatter(ScatterWin { count: 3, .. }))));
    }

    #[test]
    fn test_is_on_scoreline() {
        let window = Window::uniform(3, 3);
        let game = GameBase::new(
            "g",
            vec![window.top_left_diagonal(), window.topline()],
            vec![],
            vec![ab_reel(); 3],
            &window,
        )
        .unwrap();
        let machine = Machine::new(vec![game], window).unwrap();
        assert!(machine.is_on_scoreline(0, 0));
        assert!(machine.is_on_scoreline(1, 1));
        assert!(machine.is_on_scoreline(2, 2));
        assert!(machine.is_on_scoreline(1, 0));
        assert!(machine.is_on_scoreline(2, 0));
        assert!(!machine.is_on_scoreline(0, 2));
    }

    #[test]
    fn test_add_reel_extends_geometry() {
        let window = Window::uniform(3, 3);
        let game = GameBase::new(
            "g",
            vec![window.top_left_diagonal()],
            vec![],
            vec![ab_reel(); 3],
            &window,
        )
        .unwrap();
        let mut machine = Machine::new(vec![game], window).unwrap();
        machine.add_reel(ab_reel());
        assert_eq!(machine.num_reels(), 4);
        assert_eq!(machine.window().rows_per_column, vec![3, 3, 3, 3]);
        assert_eq!(machine.current_game().paylines()[0].indices, vec![0, 1, 2, 2]);
        assert!(machine.validate().is_ok());
        assert_eq!(machine.pull_lever().len(), 4);
    }

    #[test]
    fn test_clone_before_customize() {
        let (game, window) = flat_game(vec![], ab_reel());
        let base = Machine::new(vec![game], window).unwrap();
        let mut custom = base.clone();
        custom.add_reel(ab_reel());
        assert_eq!(base.num_reels(), 3);
        assert_eq!(custom.num_reels(), 4);
    }

    #[test]
    fn test_expand_window_is_unchecked() {
        let window = Window::uniform(3, 3);
        let game =
            GameBase::new("g", vec![window.bottomline()], vec![], vec![ab_reel(); 3], &window)
                .unwrap();
        let mut machine = Machine::new(vec![game], window).unwrap();

        let shrunk = Window::uniform(1, 3);
        assert!(machine.try_expand_window(shrunk.clone()).is_err());
        assert_eq!(machine.window().max_rows(), 3);

        machine.expand_window(shrunk);
        assert_eq!(machine.window().max_rows(), 1);
        assert!(machine.validate().is_err());

        machine.expand_window(Window::uniform(4, 3));
        assert!(machine.validate().is_ok());
        assert!(machine.pull_lever().iter().all(|column| column.len() == 4));
    }

    #[test]
    fn test_free_game_index() {
        let (game, window) = flat_game(vec![], ab_reel());
        let free = game.clone().with_free_game(true);
        let machine = Machine::new(vec![game, free], window).unwrap();
        assert_eq!(machine.free_game_index(), Some(1));
    }
}
