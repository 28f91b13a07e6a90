use std::collections::VecDeque;
use std::fmt;
use std::io::Write;

/// Table state seen just before a step is taken.
pub struct Snapshot<'a> {
    pub active: usize,
    pub hands: [&'a VecDeque<u8>; 2],
    pub pile: &'a [u8],
}

impl Snapshot<'_> {
    pub fn card_count(&self) -> usize {
        self.hands[0].len() + self.hands[1].len() + self.pile.len()
    }
}

fn write_cards<'c>(f: &mut fmt::Formatter<'_>, cards: impl Iterator<Item = &'c u8>) -> fmt::Result {
    write!(f, "[")?;
    for (i, c) in cards.enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", c)?;
    }
    write!(f, "]")
}

impl fmt::Display for Snapshot<'_> {
    // Active player's hand is printed first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} > ", self.active)?;
        write_cards(f, self.hands[self.active].iter())?;
        write!(f, " - ")?;
        write_cards(f, self.hands[self.active ^ 1].iter())?;
        write!(f, " - ")?;
        write_cards(f, self.pile.iter())
    }
}

/// Receives the table state before every step of a game.
///
/// Tracing is best effort: sinks must not fail the game.
pub trait TraceSink {
    fn on_step(&mut self, snapshot: &Snapshot<'_>);
}

/// Writes one line per step to any `Write`; write errors are dropped.
pub struct WriterSink<W: Write>(pub W);

impl<W: Write> TraceSink for WriterSink<W> {
    fn on_step(&mut self, snapshot: &Snapshot<'_>) {
        let _ = writeln!(self.0, "{}", snapshot);
    }
}
