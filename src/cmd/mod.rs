pub mod play;
pub mod search;
