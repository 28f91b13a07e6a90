use crate::error::{SearchError, SearchResult};
use std::fmt;
use std::str::FromStr;

pub const DECK_SIZE: usize = 40;
pub const HAND_SIZE: usize = DECK_SIZE / 2;

/// How many cards of each value (0 = plain card, 1..=3 = penalty cards) a deck holds.
pub const MULTIPLICITIES: [usize; 4] = [28, 4, 4, 4];

/// 40! / (28! * 4! * 4! * 4!)
pub const TOTAL_ARRANGEMENTS: u64 = 193_584_473_082_000;

/// One ordering of the 40-card deck. Cards are stored as their face value (0..=3).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Arrangement([u8; DECK_SIZE]);

impl Arrangement {
    /// The lexicographically smallest arrangement: all plain cards first.
    pub fn seed() -> Self {
        let mut cards = [0u8; DECK_SIZE];
        let mut idx = 0;
        for (value, &count) in MULTIPLICITIES.iter().enumerate() {
            for _ in 0..count {
                cards[idx] = value as u8;
                idx += 1;
            }
        }
        Self(cards)
    }

    /// The lexicographically largest arrangement; it has no successor.
    pub fn last() -> Self {
        let mut cards = Self::seed().0;
        cards.reverse();
        Self(cards)
    }

    /// Builds an arrangement from raw card values, checking the deck composition.
    pub fn from_cards(cards: [u8; DECK_SIZE]) -> SearchResult<Self> {
        let mut counts = [0usize; 4];
        for &c in &cards {
            if c > 3 {
                return Err(SearchError::Format(format!("Invalid card value: {}", c)));
            }
            counts[c as usize] += 1;
        }
        if counts != MULTIPLICITIES {
            return Err(SearchError::Format(format!(
                "Deck must hold 28 zeros and four each of 1, 2, 3; found {:?}",
                counts
            )));
        }
        Ok(Self(cards))
    }

    pub fn cards(&self) -> &[u8; DECK_SIZE] {
        &self.0
    }

    /// Lexicographically next distinct arrangement of the same deck, or `None`
    /// if this is the last one.
    pub fn next(&self) -> Option<Self> {
        let mut cards = self.0;
        if next_permutation(&mut cards) {
            Some(Self(cards))
        } else {
            None
        }
    }

    /// Iterates from this arrangement (inclusive) to the end of the enumeration.
    pub fn iter_from(self) -> impl Iterator<Item = Arrangement> {
        std::iter::successors(Some(self), Arrangement::next)
    }
}

/// Advances `cards` in place to its lexicographic successor among the
/// distinct permutations of the same multiset. Returns `false` (leaving the
/// slice untouched) when it is already the largest one.
pub fn next_permutation(cards: &mut [u8]) -> bool {
    if cards.len() < 2 {
        return false;
    }

    // Largest i with cards[i] < cards[i + 1]
    let mut i = cards.len() - 1;
    while i > 0 && cards[i - 1] >= cards[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let pivot = i - 1;

    // Largest j > pivot with cards[j] > cards[pivot]
    let mut j = cards.len() - 1;
    while cards[j] <= cards[pivot] {
        j -= 1;
    }

    cards.swap(pivot, j);
    cards[pivot + 1..].reverse();
    true
}

/// Number of distinct arrangements of a multiset with the given multiplicities.
pub fn count_arrangements(multiplicities: &[usize]) -> u128 {
    // Built as a product of binomials so intermediates stay small.
    let mut total: u128 = 1;
    let mut placed: u128 = 0;
    for &m in multiplicities {
        for k in 1..=m as u128 {
            placed += 1;
            total = total * placed / k;
        }
    }
    total
}

pub fn total_arrangements() -> u128 {
    count_arrangements(&MULTIPLICITIES)
}

impl FromStr for Arrangement {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != DECK_SIZE {
            return Err(SearchError::Format(format!(
                "Arrangement must be {} digits long, got {}: '{}'",
                DECK_SIZE,
                s.len(),
                s
            )));
        }
        let mut cards = [0u8; DECK_SIZE];
        for (i, b) in s.bytes().enumerate() {
            match b {
                b'0'..=b'3' => cards[i] = b - b'0',
                _ => {
                    return Err(SearchError::Format(format!(
                        "Invalid card '{}' at position {} in '{}'",
                        b as char, i, s
                    )))
                }
            }
        }
        Self::from_cards(cards)
    }
}

impl fmt::Display for Arrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &c in &self.0 {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Arrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Arrangement({})", self)
    }
}
