use crate::error::{SearchError, SearchResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Games played between two checkpoints.
pub const DEFAULT_BATCH_SIZE: u64 = 10_000_000;

/// Safety ceiling on distinct hand-boundary states per game. Not a proof
/// bound: a game that outgrows it aborts the run instead of being classified.
pub const DEFAULT_MAX_STATES: usize = 5000;

#[derive(Args, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Games played between two checkpoints
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: u64,

    /// Worker threads per batch (default: one per available core)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Ceiling on distinct hand states recorded while playing one game
    #[arg(long, default_value_t = DEFAULT_MAX_STATES)]
    pub max_states: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            threads: None,
            max_states: DEFAULT_MAX_STATES,
        }
    }
}

impl SearchParams {
    /// Reads a JSON file; missing keys keep their defaults. Not validated
    /// here, since command line flags may still override bad values.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SearchResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SearchError::Config(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Copies over the values the user typed explicitly, leaving file values
    /// in place for everything that came from clap defaults.
    pub fn merge_from_cli(&mut self, cli: &SearchParams, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(batch_size);
        update_if_present!(threads);
        update_if_present!(max_states);
    }

    pub fn validate(&self) -> SearchResult<()> {
        if self.batch_size == 0 {
            return Err(SearchError::Config("batch_size must be positive".into()));
        }
        if self.threads == Some(0) {
            return Err(SearchError::Config("threads must be positive".into()));
        }
        if self.max_states == 0 {
            return Err(SearchError::Config("max_states must be positive".into()));
        }
        Ok(())
    }

    pub fn resolved_threads(&self) -> usize {
        self.threads.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
        })
    }
}
