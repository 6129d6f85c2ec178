pub mod commands;
pub mod diff;
pub mod serve;
pub mod sessions;
pub mod shares;
pub mod stats;

pub use commands::{Cli, Commands};
