pub mod engine;
pub mod trace;
pub mod types;

pub use self::engine::Game;
pub use self::trace::{Snapshot, TraceSink, WriterSink};
pub use self::types::{GameOutcome, GameStats, Verdict};

use crate::arrangement::Arrangement;
use crate::config::DEFAULT_MAX_STATES;
use crate::error::SearchResult;

/// Plays arrangements to completion. Holds no game state, so one instance can
/// be shared by every worker thread.
#[derive(Debug, Clone, Copy)]
pub struct Simulator {
    max_states: usize,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_STATES)
    }
}

impl Simulator {
    pub fn new(max_states: usize) -> Self {
        Self { max_states }
    }

    pub fn play(&self, arrangement: &Arrangement) -> SearchResult<GameOutcome> {
        self.play_traced(arrangement, None)
    }

    pub fn play_traced(
        &self,
        arrangement: &Arrangement,
        sink: Option<&mut dyn TraceSink>,
    ) -> SearchResult<GameOutcome> {
        let stats = Game::deal(arrangement).run(self.max_states, sink)?;
        Ok(GameOutcome {
            arrangement: *arrangement,
            stats,
        })
    }
}

/// Plays `arrangement` with the default state ceiling.
pub fn play(arrangement: &Arrangement) -> SearchResult<GameOutcome> {
    Simulator::default().play(arrangement)
}
