//! Answers fixed questions about a recorded match telemetry table:
//! how often a team enters a map zone, when it reaches an area armed,
//! and where it stands when defending.
//!
//! The command line in `main.rs` is a thin layer over [`app`].

pub mod types;
pub mod analysis;
pub mod parsing;
pub mod config;
pub mod app;

pub use analysis::area::{inside, point_in_area};
pub use analysis::{AnalysisError, GameState};
pub use types::clock::{clock_time_to_seconds, seconds_to_clock_time};
