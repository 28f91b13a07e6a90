use crate::reports;
use cavacamixa::config::SearchParams;
use cavacamixa::simulator::{Simulator, TraceSink, WriterSink};
use cavacamixa::{Arrangement, SearchResult};
use std::io;

pub fn run(arrangement: &str, params: &SearchParams, quiet: bool) -> SearchResult<()> {
    let arrangement: Arrangement = arrangement.parse()?;

    println!("\nPlaying game using arrangement: {}\n", arrangement);
    reports::print_deal_grid(&arrangement);

    let simulator = Simulator::new(params.max_states);
    let mut sink = WriterSink(io::stdout().lock());
    let trace: Option<&mut dyn TraceSink> = if quiet { None } else { Some(&mut sink) };
    let outcome = simulator.play_traced(&arrangement, trace)?;
    drop(sink);

    println!("\nGame results: {}", outcome);
    reports::print_outcome(&outcome);
    if outcome.is_nonterminating() {
        println!("*** THIS IS A NONTERMINATING GAME ***");
    }
    Ok(())
}
