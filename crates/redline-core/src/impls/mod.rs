//! Built-in collaborator implementations.
//!
//! These make the runtime usable without an AI backend: a plain text diff
//! engine and a rule-based analyzer standing in for the AI. Integrators with
//! a real model implement the ports themselves.

mod rule_based;
mod text_diff;

pub use rule_based::RuleBasedAnalyzer;
pub use text_diff::TextDiffEngine;
