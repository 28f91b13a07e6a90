use super::checkpoint::Checkpoint;
use crate::arrangement::Arrangement;
use crate::simulator::GameOutcome;

/// What the coordinator has to persist after a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    Anomaly,
    NewLongest,
    Ignored,
}

/// Everything the workers share. Lives behind the coordinator's lock; the only
/// ways in are [`SearchState::acquire`] and [`SearchState::report`].
#[derive(Debug)]
pub struct SearchState {
    cursor: Option<Arrangement>,
    longest: Option<GameOutcome>,
    dispatched: u64,
    batch_size: u64,
    aborted: bool,
    games: u64,
    anomalies: u64,
}

impl SearchState {
    pub fn new(cursor: Option<Arrangement>, longest: Option<GameOutcome>, batch_size: u64) -> Self {
        Self {
            cursor,
            longest,
            dispatched: 0,
            batch_size,
            aborted: false,
            games: 0,
            anomalies: 0,
        }
    }

    pub fn start_batch(&mut self) {
        self.dispatched = 0;
    }

    /// Hands out the cursor and advances it, unless the batch is full, the
    /// enumeration is over or a worker failed.
    pub fn acquire(&mut self) -> Option<Arrangement> {
        if self.aborted || self.dispatched >= self.batch_size {
            return None;
        }
        let current = self.cursor?;
        self.dispatched += 1;
        self.cursor = current.next();
        Some(current)
    }

    pub fn report(&mut self, outcome: &GameOutcome) -> Report {
        self.games += 1;

        if outcome.is_nonterminating() {
            self.anomalies += 1;
            return Report::Anomaly;
        }

        let longer = match &self.longest {
            Some(best) => outcome.cards_played() > best.cards_played(),
            None => true,
        };
        if longer {
            self.longest = Some(*outcome);
            Report::NewLongest
        } else {
            Report::Ignored
        }
    }

    pub fn abort(&mut self) {
        self.aborted = true;
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor.is_none()
    }

    pub fn cursor(&self) -> Option<Arrangement> {
        self.cursor
    }

    pub fn longest(&self) -> Option<GameOutcome> {
        self.longest
    }

    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    pub fn games(&self) -> u64 {
        self.games
    }

    pub fn anomalies(&self) -> u64 {
        self.anomalies
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            cursor: self.cursor,
            best: self.longest.map(|o| o.arrangement),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::{GameStats, Verdict};

    fn outcome(cards_played: u32, verdict: Verdict) -> GameOutcome {
        GameOutcome {
            arrangement: Arrangement::seed(),
            stats: GameStats {
                cards_played,
                penalty_cards_played: 0,
                hands_won: 0,
                verdict,
            },
        }
    }

    #[test]
    fn test_acquire_respects_batch_size_and_order() {
        let mut state = SearchState::new(Some(Arrangement::seed()), None, 3);
        let got: Vec<Arrangement> = std::iter::from_fn(|| state.acquire()).collect();
        let expected: Vec<Arrangement> = Arrangement::seed().iter_from().take(3).collect();
        assert_eq!(got, expected);
        assert_eq!(state.cursor(), expected[2].next());

        state.start_batch();
        assert_eq!(state.acquire(), expected[2].next());
    }

    #[test]
    fn test_acquire_stops_at_end_of_enumeration() {
        let mut state = SearchState::new(Some(Arrangement::last()), None, 10);
        assert_eq!(state.acquire(), Some(Arrangement::last()));
        assert_eq!(state.acquire(), None);
        assert!(state.is_exhausted());
        assert_eq!(state.dispatched(), 1);
    }

    #[test]
    fn test_abort_stops_dispatch() {
        let mut state = SearchState::new(Some(Arrangement::seed()), None, 10);
        assert!(!state.is_aborted());
        state.abort();
        assert!(state.is_aborted());
        assert_eq!(state.acquire(), None);
        assert_eq!(state.cursor(), Some(Arrangement::seed()));
    }

    #[test]
    fn test_report_only_strictly_longer_games() {
        let mut state = SearchState::new(Some(Arrangement::seed()), None, 10);
        assert_eq!(state.report(&outcome(36, Verdict::Lost(0))), Report::NewLongest);
        assert_eq!(state.report(&outcome(36, Verdict::Lost(1))), Report::Ignored);
        assert_eq!(state.report(&outcome(40, Verdict::Lost(1))), Report::NewLongest);
        assert_eq!(state.longest().map(|o| o.cards_played()), Some(40));
    }

    #[test]
    fn test_nonterminating_never_becomes_longest() {
        let mut state = SearchState::new(Some(Arrangement::seed()), None, 10);
        assert_eq!(
            state.report(&outcome(10_000, Verdict::Nonterminating)),
            Report::Anomaly
        );
        assert!(state.longest().is_none());
        assert_eq!(state.anomalies(), 1);
        assert_eq!(state.games(), 1);
    }
}
