//! AppBuilder: wiring with fail-fast validation.

use std::sync::Arc;

use super::App;
use crate::janitor::TaskJanitor;
use crate::ports::{AiAnalyzer, Clock, DiffEngine, SystemClock};
use crate::runner::{DiffTaskRunner, MergeTaskRunner};
use crate::store::{InMemoryTaskStore, TaskStore};

/// Builds an [`App`].
///
/// The two collaborator ports are mandatory and checked at `build()` time
/// with a named error, so a miswired process fails at startup instead of on
/// the first request. Clock and store have in-process defaults.
///
/// ```ignore
/// let app = AppBuilder::new()
///     .diff_engine(Arc::new(TextDiffEngine))
///     .analyzer(Arc::new(RuleBasedAnalyzer))
///     .build()?;
/// ```
#[derive(Default)]
pub struct AppBuilder {
    diff_engine: Option<Arc<dyn DiffEngine>>,
    analyzer: Option<Arc<dyn AiAnalyzer>>,
    clock: Option<Arc<dyn Clock>>,
    store: Option<Arc<dyn TaskStore>>,
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("no DiffEngine was registered")]
    MissingDiffEngine,

    #[error("no AIAnalyzer was registered")]
    MissingAnalyzer,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diff_engine(mut self, engine: Arc<dyn DiffEngine>) -> Self {
        self.diff_engine = Some(engine);
        self
    }

    pub fn analyzer(mut self, analyzer: Arc<dyn AiAnalyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    /// Override the clock (tests pin it; production keeps `SystemClock`).
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Override the store (defaults to a fresh in-memory store).
    pub fn store(mut self, store: Arc<dyn TaskStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn build(self) -> Result<App, BuildError> {
        let engine = self.diff_engine.ok_or(BuildError::MissingDiffEngine)?;
        let analyzer = self.analyzer.ok_or(BuildError::MissingAnalyzer)?;
        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(SystemClock) as Arc<dyn Clock>);
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(InMemoryTaskStore::new(clock.clone())) as Arc<dyn TaskStore>);

        let diff_runner = DiffTaskRunner::new(
            engine,
            analyzer.clone(),
            store.clone(),
            clock.clone(),
        );
        let merge_runner = MergeTaskRunner::new(analyzer, store.clone(), clock.clone());
        let janitor = TaskJanitor::new(store.clone(), clock.clone());

        Ok(App::new(store, diff_runner, merge_runner, janitor, clock))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::{RuleBasedAnalyzer, TextDiffEngine};

    #[test]
    fn build_fails_fast_without_a_diff_engine() {
        let err = AppBuilder::new()
            .analyzer(Arc::new(RuleBasedAnalyzer))
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::MissingDiffEngine));
    }

    #[test]
    fn build_fails_fast_without_an_analyzer() {
        let err = AppBuilder::new()
            .diff_engine(Arc::new(TextDiffEngine))
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::MissingAnalyzer));
    }

    #[test]
    fn build_succeeds_with_both_collaborators() {
        let app = AppBuilder::new()
            .diff_engine(Arc::new(TextDiffEngine))
            .analyzer(Arc::new(RuleBasedAnalyzer))
            .build();
        assert!(app.is_ok());
    }
}
