// Sat Jan 24 2026 - Alex

pub mod cli;
pub mod errors;

pub use cli::{Args, Command, CommandHandler};
pub use errors::ErrorDisplay;
