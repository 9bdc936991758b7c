//! Collaborator ports (interfaces the core consumes).

pub mod analyzer;
pub mod clock;
pub mod diff_engine;

pub use analyzer::AiAnalyzer;
pub use clock::{Clock, FixedClock, SystemClock};
pub use diff_engine::DiffEngine;
