pub mod arrangement;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod simulator;
pub mod store;

pub use arrangement::Arrangement;
pub use coordinator::Coordinator;
pub use error::{SearchError, SearchResult};
pub use simulator::{play, GameOutcome, Simulator};
