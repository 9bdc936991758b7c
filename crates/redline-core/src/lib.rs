//! redline-core
//!
//! Core building blocks for the Redline document diff/merge runtime.
//!
//! # Module map
//! - **domain**: domain model (ids, task records, diff and merge payloads)
//! - **ports**: abstraction layer (DiffEngine, AiAnalyzer, Clock)
//! - **store**: task store port + in-memory implementation
//! - **progress**: ProgressRecorder, the cooperative progress checkpoint
//! - **runner**: DiffTaskRunner / MergeTaskRunner phase state machines
//! - **janitor**: age-based eviction of finished task records
//! - **app**: wiring (AppBuilder) and the facade callers talk to
//! - **impls**: built-in collaborator implementations (text diff, rule-based
//!   analyzer) for running without an AI backend

pub mod app;
pub mod domain;
pub mod error;
pub mod impls;
pub mod janitor;
pub mod observability;
pub mod ports;
pub mod progress;
pub mod runner;
pub mod store;
