use super::trace::{Snapshot, TraceSink};
use super::types::{GameStats, Verdict};
use crate::arrangement::{Arrangement, HAND_SIZE};
use crate::error::{SearchError, SearchResult};
use fnv::FnvHashSet;
use std::collections::VecDeque;

// Separates the two hands inside a fingerprint; never a card value.
const HAND_SEPARATOR: u8 = 0xFF;

/// Outcome of a single card being played (or not).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Active player has no cards left.
    Exhausted,
    Played { penalty: bool },
    /// The pile went to the player who is now active.
    PileWon,
}

/// A game in progress: two hands (top card at the front), the pile and the
/// penalty still owed by the active player.
#[derive(Debug, Clone)]
pub struct Game {
    hands: [VecDeque<u8>; 2],
    pile: Vec<u8>,
    active: usize,
    pending: u8,
}

impl Game {
    /// First half of the deck to player 0, second half to player 1.
    pub fn deal(arrangement: &Arrangement) -> Self {
        let (first, second) = arrangement.cards().split_at(HAND_SIZE);
        Self::with_hands(first, second)
    }

    /// Starts a game from arbitrary hands; used for fabricated positions.
    pub fn from_hands(hand0: &[u8], hand1: &[u8]) -> SearchResult<Self> {
        if let Some(&bad) = hand0.iter().chain(hand1).find(|&&c| c > 3) {
            return Err(SearchError::Format(format!("Invalid card value: {}", bad)));
        }
        Ok(Self::with_hands(hand0, hand1))
    }

    fn with_hands(hand0: &[u8], hand1: &[u8]) -> Self {
        let total = hand0.len() + hand1.len();
        let mut hands = [
            VecDeque::with_capacity(total),
            VecDeque::with_capacity(total),
        ];
        hands[0].extend(hand0.iter().copied());
        hands[1].extend(hand1.iter().copied());
        Self {
            hands,
            pile: Vec::with_capacity(total),
            active: 0,
            pending: 0,
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            active: self.active,
            hands: [&self.hands[0], &self.hands[1]],
            pile: &self.pile,
        }
    }

    /// Active player plus both hands in order. Only meaningful at a hand
    /// boundary, where the pile is empty and no penalty is owed.
    fn fingerprint(&self) -> Box<[u8]> {
        let mut fp = Vec::with_capacity(self.hands[0].len() + self.hands[1].len() + 2);
        fp.push(self.active as u8);
        fp.extend(self.hands[0].iter().copied());
        fp.push(HAND_SEPARATOR);
        fp.extend(self.hands[1].iter().copied());
        fp.into_boxed_slice()
    }

    fn step(&mut self) -> Step {
        let Some(card) = self.hands[self.active].pop_front() else {
            return Step::Exhausted;
        };
        self.pile.push(card);

        if card != 0 {
            self.pending = card;
            self.active ^= 1;
            return Step::Played { penalty: true };
        }

        if self.pending == 0 {
            self.active ^= 1;
            return Step::Played { penalty: false };
        }

        self.pending -= 1;
        if self.pending > 0 {
            return Step::Played { penalty: false };
        }

        // Penalty not answered: the opponent collects the pile and leads.
        self.active ^= 1;
        let winner = &mut self.hands[self.active];
        winner.extend(self.pile.drain(..));
        Step::PileWon
    }

    /// Plays until a player runs out of cards or a hand-boundary state repeats.
    ///
    /// Fails with [`SearchError::StateExplosion`] once more than `max_states`
    /// distinct hand-boundary states have been recorded.
    pub fn run(
        mut self,
        max_states: usize,
        mut sink: Option<&mut dyn TraceSink>,
    ) -> SearchResult<GameStats> {
        let mut seen: FnvHashSet<Box<[u8]>> = FnvHashSet::default();
        seen.insert(self.fingerprint());

        let mut cards_played = 0u32;
        let mut penalty_cards_played = 0u32;
        let mut hands_won = 0u32;

        loop {
            if let Some(sink) = sink.as_deref_mut() {
                sink.on_step(&self.snapshot());
            }

            match self.step() {
                Step::Exhausted => {
                    return Ok(GameStats {
                        cards_played,
                        penalty_cards_played,
                        hands_won,
                        verdict: Verdict::Lost(self.active),
                    });
                }
                Step::Played { penalty } => {
                    cards_played += 1;
                    if penalty {
                        penalty_cards_played += 1;
                    }
                }
                Step::PileWon => {
                    cards_played += 1;
                    hands_won += 1;

                    if !seen.insert(self.fingerprint()) {
                        return Ok(GameStats {
                            cards_played,
                            penalty_cards_played,
                            hands_won,
                            verdict: Verdict::Nonterminating,
                        });
                    }
                    if seen.len() > max_states {
                        return Err(SearchError::StateExplosion {
                            states: seen.len(),
                            limit: max_states,
                        });
                    }
                }
            }
        }
    }
}
