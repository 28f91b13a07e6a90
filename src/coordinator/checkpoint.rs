use crate::arrangement::Arrangement;
use crate::error::{SearchError, SearchResult};
use uuid::Uuid;

pub const CHECKPOINT_RECORD: &str = "cavacamixa_checkpoint.txt";
pub const LONGEST_RECORD: &str = "cavacamixa_longest_game.txt";
const ANOMALY_PREFIX: &str = "cavacamixa_infinite_game_";

// Cursor line once every arrangement has been dispatched.
const EXHAUSTED_MARKER: &str = "END";

/// A fresh, never reused record name for a nonterminating game.
pub fn anomaly_record_name() -> String {
    format!("{}{}.txt", ANOMALY_PREFIX, Uuid::new_v4())
}

pub fn is_anomaly_record(name: &str) -> bool {
    name.starts_with(ANOMALY_PREFIX)
}

/// Saved progress: the next arrangement to play and the longest game so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkpoint {
    pub cursor: Option<Arrangement>,
    pub best: Option<Arrangement>,
}

impl Checkpoint {
    pub fn parse(text: &str) -> SearchResult<Self> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        if lines.is_empty() || lines.len() > 2 {
            return Err(SearchError::Format(format!(
                "Invalid checkpoint: expected 2 lines, found {}",
                lines.len()
            )));
        }

        let cursor: Option<Arrangement> = match lines[0] {
            EXHAUSTED_MARKER => None,
            line => Some(line.parse()?),
        };
        let best: Option<Arrangement> = lines.get(1).map(|l| l.parse()).transpose()?;

        Ok(Self { cursor, best })
    }

    pub fn render(&self) -> String {
        let cursor = match &self.cursor {
            Some(a) => a.to_string(),
            None => EXHAUSTED_MARKER.to_string(),
        };
        match &self.best {
            Some(best) => format!("{}\n{}", cursor, best),
            None => cursor,
        }
    }
}
