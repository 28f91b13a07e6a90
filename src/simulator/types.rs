use crate::arrangement::Arrangement;
use std::fmt;

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The given player (0 starts the game) ran out of cards.
    Lost(usize),
    /// A hand-boundary state repeated, so play cycles forever.
    Nonterminating,
}

/// Counters accumulated while a game is played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameStats {
    pub cards_played: u32,
    /// Aces, twos and threes played.
    pub penalty_cards_played: u32,
    /// Number of times a player collected the pile.
    pub hands_won: u32,
    pub verdict: Verdict,
}

/// Result of playing one arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOutcome {
    pub arrangement: Arrangement,
    pub stats: GameStats,
}

impl GameOutcome {
    pub fn cards_played(&self) -> u32 {
        self.stats.cards_played
    }

    pub fn penalty_cards_played(&self) -> u32 {
        self.stats.penalty_cards_played
    }

    pub fn hands_won(&self) -> u32 {
        self.stats.hands_won
    }

    pub fn is_nonterminating(&self) -> bool {
        self.stats.verdict == Verdict::Nonterminating
    }

    pub fn losing_player(&self) -> Option<usize> {
        match self.stats.verdict {
            Verdict::Lost(p) => Some(p),
            Verdict::Nonterminating => None,
        }
    }

    pub fn winning_player(&self) -> Option<usize> {
        self.losing_player().map(|p| p ^ 1)
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GameOutcome [arrangement={}, cardsPlayed={}, penaltyCardsPlayed={}, hands={}, ",
            self.arrangement,
            self.stats.cards_played,
            self.stats.penalty_cards_played,
            self.stats.hands_won
        )?;
        match self.winning_player() {
            Some(p) => write!(f, "winningPlayer={}]", p),
            None => write!(f, "nonterminating]"),
        }
    }
}
