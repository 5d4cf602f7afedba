// Sat Jan 24 2026 - Alex

pub mod display;

pub use display::ErrorDisplay;
