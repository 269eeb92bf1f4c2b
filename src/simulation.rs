//! Long-lived simulation state.
//!
//! Owns one board, the random source used to seed it, and the generation
//! counter. A request handler drives it through [`Simulation::handle_request`],
//! which writes the rendered board and advances one generation.
//!
//! A `Simulation` is not internally synchronised; callers sharing one across
//! threads must serialise access themselves.

use std::io::Write;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::board::{Board, BoardError};
use crate::evolve::{evolve, evolve_parallel};
use crate::protocol::text::{parse_board, TextError};

/// Whether a request advances the board before or after rendering it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOrder {
    /// Advance, then render the new generation.
    #[default]
    EvolveFirst,
    /// Render the current generation, then advance.
    RenderFirst,
}

/// Configuration for a simulation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Board width in cells.
    pub width: usize,
    /// Board height in cells.
    pub height: usize,
    /// One random draw per `seed_ratio` cells when seeding.
    pub seed_ratio: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Ordering of render and step within a request.
    pub order: StepOrder,
    /// Worker threads for stepping; 1 steps on the calling thread.
    pub threads: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            width: 15,
            height: 15,
            seed_ratio: 4,
            seed: 0,
            order: StepOrder::EvolveFirst,
            threads: 1,
        }
    }
}

impl SimulationConfig {
    /// Reads a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SimulationError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Errors surfaced by the simulation driver.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("failed to read board text: {0}")]
    Text(#[from] TextError),

    #[error("invalid simulation config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to write board: {0}")]
    Io(#[from] std::io::Error),
}

/// A board plus everything needed to seed and advance it.
pub struct Simulation {
    config: SimulationConfig,
    board: Board,
    generation: u64,
    rng: SmallRng,
    pool: Option<rayon::ThreadPool>,
}

impl Simulation {
    /// Creates a simulation with a freshly seeded random board.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        let board = Board::new(config.width, config.height)?;
        let mut sim = Self::with_board(config, board)?;
        sim.reseed()?;
        Ok(sim)
    }

    /// Creates a simulation that starts from `board` instead of a random one.
    ///
    /// The board's own dimensions take precedence over the configured ones.
    pub fn with_board(config: SimulationConfig, board: Board) -> Result<Self, SimulationError> {
        let rng = if config.seed != 0 {
            SmallRng::seed_from_u64(config.seed)
        } else {
            SmallRng::from_entropy()
        };
        let pool = if config.threads > 1 {
            Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(config.threads)
                    .build()?,
            )
        } else {
            None
        };
        Ok(Simulation {
            config,
            board,
            generation: 0,
            rng,
            pool,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of generations stepped since the board was last replaced.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Renders the current generation.
    pub fn render(&self) -> String {
        self.board.render()
    }

    /// Replaces the board with its successor.
    pub fn step(&mut self) {
        let next = match &self.pool {
            Some(pool) => pool.install(|| evolve_parallel(&self.board)),
            None => evolve(&self.board),
        };
        self.board = next;
        self.generation += 1;
        debug!(
            generation = self.generation,
            population = self.board.population(),
            "stepped generation"
        );
    }

    /// Serves one request: writes the board to `out` and advances it once,
    /// in the configured order.
    pub fn handle_request<W: Write>(&mut self, out: &mut W) -> Result<(), SimulationError> {
        match self.config.order {
            StepOrder::EvolveFirst => {
                self.step();
                out.write_all(self.render().as_bytes())?;
            }
            StepOrder::RenderFirst => {
                out.write_all(self.render().as_bytes())?;
                self.step();
            }
        }
        out.flush()?;
        Ok(())
    }

    /// Loads a board from strict `*`/`.` text and restarts the generation count.
    ///
    /// On failure the current board is kept.
    pub fn set_position(&mut self, text: &str) -> Result<(), SimulationError> {
        let board = match parse_board(text) {
            Ok(b) => b,
            Err(e) => {
                warn!(error = %e, "rejected board position");
                return Err(e.into());
            }
        };
        info!(
            width = board.width(),
            height = board.height(),
            population = board.population(),
            "loaded board position"
        );
        self.board = board;
        self.generation = 0;
        Ok(())
    }

    /// Replaces the board with a freshly seeded one of the same size.
    ///
    /// On failure the current board and generation count are kept.
    pub fn reseed(&mut self) -> Result<(), SimulationError> {
        let mut board = Board::new(self.board.width(), self.board.height())?;
        let draws = match board.randomize(self.config.seed_ratio, &mut self.rng) {
            Ok(n) => n,
            Err(e) => {
                warn!(error = %e, "rejected reseed");
                return Err(e.into());
            }
        };
        self.board = board;
        self.generation = 0;
        info!(
            width = self.board.width(),
            height = self.board.height(),
            draws,
            population = self.board.population(),
            "seeded board"
        );
        Ok(())
    }
}
