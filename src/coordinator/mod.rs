pub mod checkpoint;
pub mod state;

pub use self::checkpoint::{Checkpoint, CHECKPOINT_RECORD, LONGEST_RECORD};
pub use self::state::{Report, SearchState};

use self::checkpoint::anomaly_record_name;
use crate::arrangement::Arrangement;
use crate::config::SearchParams;
use crate::error::{SearchError, SearchResult};
use crate::simulator::{GameOutcome, Simulator};
use crate::store::Store;
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;
use tracing::{error, info, warn};

/// Runs the exhaustive search in checkpointed batches across a thread pool.
pub struct Coordinator<S: Store> {
    store: S,
    params: SearchParams,
    simulator: Simulator,
    state: Mutex<SearchState>,
}

impl<S: Store> Coordinator<S> {
    /// Resumes from the checkpoint in `store` if there is one, otherwise
    /// starts from the first arrangement.
    pub fn new(store: S, params: SearchParams) -> SearchResult<Self> {
        params.validate()?;
        let simulator = Simulator::new(params.max_states);

        let (cursor, longest) = match store.read(CHECKPOINT_RECORD)? {
            Some(text) => {
                let cp = Checkpoint::parse(&text)?;
                // Only the arrangement is saved; replay it for the statistics.
                let longest = cp.best.map(|a| simulator.play(&a)).transpose()?;
                if let Some(best) = &longest {
                    if best.is_nonterminating() {
                        return Err(SearchError::Format(format!(
                            "Checkpointed longest game {} does not terminate",
                            best.arrangement
                        )));
                    }
                }
                (cp.cursor, longest)
            }
            None => (Some(Arrangement::seed()), None),
        };

        let state = SearchState::new(cursor, longest, params.batch_size);
        Ok(Self {
            store,
            params,
            simulator,
            state: Mutex::new(state),
        })
    }

    fn lock(&self) -> MutexGuard<'_, SearchState> {
        // Every update is completed inside one critical section, so a poisoned
        // guard still holds consistent state.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn cursor(&self) -> Option<Arrangement> {
        self.lock().cursor()
    }

    pub fn longest(&self) -> Option<GameOutcome> {
        self.lock().longest()
    }

    pub fn games_played(&self) -> u64 {
        self.lock().games()
    }

    pub fn anomalies_found(&self) -> u64 {
        self.lock().anomalies()
    }

    /// Runs batches until every arrangement has been played.
    pub fn run(&self) -> SearchResult<()> {
        self.log_resume();
        while self.run_batch()? {}
        info!("🏁 Search space exhausted after {} games", self.games_played());
        Ok(())
    }

    /// Runs at most `batches` batches. Returns how many ran.
    pub fn run_batches(&self, batches: u64) -> SearchResult<u64> {
        self.log_resume();
        let mut ran = 0;
        while ran < batches && !self.lock().is_exhausted() {
            self.run_batch()?;
            ran += 1;
        }
        Ok(ran)
    }

    fn log_resume(&self) {
        let state = self.lock();
        match state.cursor() {
            Some(cursor) => info!("▶️  Resuming from arrangement: {}", cursor),
            None => info!("▶️  Enumeration already complete"),
        }
        match state.longest() {
            Some(best) => info!("Longest game so far: {}", best),
            None => info!("Longest game so far: none"),
        }
    }

    /// Plays one batch and checkpoints it. Returns `false` once the
    /// enumeration is exhausted.
    pub fn run_batch(&self) -> SearchResult<bool> {
        if self.lock().is_exhausted() {
            return Ok(false);
        }

        let pool = worker_pool(self.params.resolved_threads())?;

        let start = Instant::now();
        self.lock().start_batch();

        let results: Vec<SearchResult<()>> = pool.broadcast(|_| self.work());
        for result in results {
            result?;
        }

        let state = self.lock();
        // All workers are done: the cursor is past everything dispatched.
        self.store
            .write(CHECKPOINT_RECORD, &state.checkpoint().render())?;

        let elapsed = start.elapsed().as_secs_f64().max(1e-6);
        info!(
            "💾 Checkpoint: {} games in {:.1}s ({:.0} games/s), {} total, {} nonterminating",
            state.dispatched(),
            elapsed,
            state.dispatched() as f64 / elapsed,
            state.games(),
            state.anomalies()
        );

        Ok(!state.is_exhausted())
    }

    /// Worker loop: pull arrangements until the batch is drained.
    fn work(&self) -> SearchResult<()> {
        loop {
            let Some(arrangement) = self.lock().acquire() else {
                return Ok(());
            };

            match self.simulator.play(&arrangement) {
                Ok(outcome) => self.record(&outcome),
                Err(e) => {
                    self.lock().abort();
                    error!("Error running this arrangement: {}\n{}", arrangement, e);
                    return Err(SearchError::Worker {
                        arrangement: arrangement.to_string(),
                        source: Box::new(e),
                    });
                }
            }
        }
    }

    fn record(&self, outcome: &GameOutcome) {
        let mut state = self.lock();
        match state.report(outcome) {
            Report::Anomaly => {
                warn!("♾️  NONTERMINATING GAME FOUND: {}", outcome);
                if let Err(e) = self
                    .store
                    .write(&anomaly_record_name(), &outcome.to_string())
                {
                    error!("Cannot save nonterminating game, continuing: {}", e);
                }
            }
            Report::NewLongest => {
                info!("🏆 Found longer game: {}", outcome);
                if let Err(e) = self.store.write(LONGEST_RECORD, &outcome.to_string()) {
                    error!("Cannot save longest game, continuing: {}", e);
                }
            }
            Report::Ignored => {}
        }
    }
}

fn worker_pool(threads: usize) -> SearchResult<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("cavacamixa-worker-{}", i))
        .build()
        .map_err(|e| {
            SearchError::Config(format!("Cannot start {} worker threads: {}", threads, e))
        })
}
