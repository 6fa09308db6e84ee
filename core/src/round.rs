use core::time::Duration;
use rand::{Rng, SeedableRng, rngs::SmallRng};
use serde::{Deserialize, Serialize};

use crate::*;

/// Lifecycle of the single active round.
///
/// `Idle -> Configuring -> Playing -> {Won, Lost} -> Idle`
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    Idle,
    Configuring,
    Playing,
    Won,
    Lost,
}

impl RoundState {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    pub const fn can_start(self) -> bool {
        matches!(self, Self::Idle | Self::Won | Self::Lost)
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Summary of a won round.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub difficulty: Difficulty,
    pub elapsed: Duration,
    pub score: u32,
    pub new_best: bool,
}

/// Owns the grid, the counters and the best-time store, and is the entry point for all
/// player actions.
#[derive(Clone, Debug)]
pub struct Round<S> {
    rules: RulesConfig,
    engine: RevealEngine,
    scores: ScoreStore<S>,
    rng: SmallRng,
    grid: Option<Grid>,
    state: RoundState,
    difficulty: Option<Difficulty>,
    cleared_count: CellCount,
    goal: CellCount,
    elapsed: Duration,
    triggered_at: Option<Coord3>,
    last_result: Option<RoundResult>,
}

impl<S: KeyValueStore> Round<S> {
    pub fn new(rules: RulesConfig, scores: ScoreStore<S>, seed: u64) -> Result<Self> {
        rules.validate()?;
        Ok(Self {
            rules,
            engine: RevealEngine::from_rules(&rules)?,
            scores,
            rng: SmallRng::seed_from_u64(seed),
            grid: None,
            state: Default::default(),
            difficulty: None,
            cleared_count: 0,
            goal: 0,
            elapsed: Duration::ZERO,
            triggered_at: None,
            last_result: None,
        })
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn cleared_count(&self) -> CellCount {
        self.cleared_count
    }

    pub fn goal(&self) -> CellCount {
        self.goal
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn cell_at(&self, coords: Coord3) -> Option<&Cell> {
        self.grid.as_ref()?.cell(coords)
    }

    /// Hidden cells currently carrying a flag.
    pub fn flagged_count(&self) -> CellCount {
        let Some(grid) = &self.grid else {
            return 0;
        };
        grid.iter_cells()
            .filter(|(_, cell)| !cell.is_revealed() && cell.is_flagged())
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    pub fn triggers_left(&self) -> isize {
        let triggers = self.grid.as_ref().map_or(0, Grid::trigger_count);
        (triggers as isize) - (self.flagged_count() as isize)
    }

    /// Trigger that ended the last lost round.
    pub fn triggered_at(&self) -> Option<Coord3> {
        self.triggered_at
    }

    pub fn last_result(&self) -> Option<RoundResult> {
        self.last_result
    }

    pub fn scores(&self) -> &ScoreStore<S> {
        &self.scores
    }

    pub fn scores_mut(&mut self) -> &mut ScoreStore<S> {
        &mut self.scores
    }

    /// Configures and immediately begins a round with a random layout.
    pub fn start(&mut self, difficulty: Difficulty) -> Result<()> {
        self.configure(difficulty)?;
        self.begin()
    }

    pub fn start_with<G: GridGenerator>(&mut self, difficulty: Difficulty, generator: G) -> Result<()> {
        self.configure_with(difficulty, generator)?;
        self.begin()
    }

    pub fn configure(&mut self, difficulty: Difficulty) -> Result<()> {
        self.check_can_start()?;
        let generator = RandomGridGenerator::new(self.rng.random());
        self.configure_with(difficulty, generator)
    }

    /// Replaces the grid and resets the counters, leaving the round in `Configuring`.
    ///
    /// On error the previous state is kept and no round is started.
    pub fn configure_with<G: GridGenerator>(&mut self, difficulty: Difficulty, generator: G) -> Result<()> {
        self.check_can_start()?;
        let config = self.rules.grid_config(difficulty)?;
        let grid = generator.generate(config)?;

        self.goal = grid.goal();
        self.grid = Some(grid);
        self.difficulty = Some(difficulty);
        self.cleared_count = 0;
        self.elapsed = Duration::ZERO;
        self.triggered_at = None;
        self.last_result = None;
        self.transition(RoundState::Configuring);
        Ok(())
    }

    /// Hands control to the player once setup is done.
    pub fn begin(&mut self) -> Result<()> {
        if !matches!(self.state, RoundState::Configuring) {
            return Err(GameError::InvalidState(self.state));
        }
        self.transition(RoundState::Playing);
        Ok(())
    }

    /// Advances the round timer, only while playing.
    pub fn tick(&mut self, delta: Duration) {
        if self.state.is_playing() {
            self.elapsed = self.elapsed.saturating_add(delta);
        }
    }

    pub fn reveal_at(&mut self, coords: Coord3) -> Result<RevealOutcome> {
        self.check_playing()?;
        let Some(grid) = self.grid.as_mut() else {
            return Err(GameError::InvalidState(self.state));
        };

        let cascade = self.engine.reveal(grid, coords, &mut self.rng);

        if cascade.is_loss() {
            self.triggered_at = Some(coords);
            self.end_round(false);
            return Ok(RevealOutcome::HitTrigger);
        }

        if cascade.revealed.is_empty() {
            return Ok(RevealOutcome::NoChange);
        }

        let newly_cleared: CellCount = cascade.revealed.len().try_into().unwrap_or(CellCount::MAX);
        self.cleared_count = self.cleared_count.saturating_add(newly_cleared);
        log::debug!(
            "Reveal at {} cleared {} cells, {}/{}",
            coords,
            newly_cleared,
            self.cleared_count,
            self.goal
        );

        if self.cleared_count >= self.goal {
            self.end_round(true);
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Revealed)
        }
    }

    pub fn toggle_mark(&mut self, coords: Coord3) -> Result<MarkOutcome> {
        self.check_playing()?;

        let Some(cell) = self.grid.as_mut().and_then(|grid| grid.cell_mut(coords)) else {
            return Ok(MarkOutcome::NoChange);
        };

        if cell.revealed {
            return Ok(MarkOutcome::NoChange);
        }

        cell.mark = cell.mark.next();
        Ok(MarkOutcome::Changed(cell.mark))
    }

    /// Ends the current round as lost.
    pub fn lose(&mut self) -> Result<()> {
        self.check_playing()?;
        self.end_round(false);
        Ok(())
    }

    /// Returns a finished round to `Idle` once the host is done showing the result.
    pub fn reset(&mut self) -> Result<()> {
        match self.state {
            RoundState::Idle => Ok(()),
            RoundState::Won | RoundState::Lost => {
                self.transition(RoundState::Idle);
                Ok(())
            }
            state => Err(GameError::InvalidState(state)),
        }
    }

    fn end_round(&mut self, won: bool) {
        if !self.state.is_playing() {
            return;
        }

        if !won {
            self.transition(RoundState::Lost);
            return;
        }

        self.transition(RoundState::Won);
        let Some(difficulty) = self.difficulty else {
            return;
        };
        let score = normalized_score(self.elapsed, difficulty);
        let new_best = match self.scores.save(score, difficulty) {
            Ok(outcome) => outcome.is_new_best(),
            Err(err) => {
                log::error!("Could not save best time for {}: {}", difficulty, err);
                false
            }
        };
        self.last_result = Some(RoundResult {
            difficulty,
            elapsed: self.elapsed,
            score,
            new_best,
        });
    }

    fn transition(&mut self, next: RoundState) {
        log::debug!("Round {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn check_playing(&self) -> Result<()> {
        if self.state.is_playing() {
            Ok(())
        } else {
            Err(GameError::InvalidState(self.state))
        }
    }

    fn check_can_start(&self) -> Result<()> {
        if self.state.can_start() {
            Ok(())
        } else {
            Err(GameError::InvalidState(self.state))
        }
    }
}
