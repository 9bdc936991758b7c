use thiserror::Error;

#[derive(Debug, Error)]
pub enum RedlineError {
    #[error("diff computation failed: {0}")]
    Diff(String),

    #[error("AI analysis failed: {0}")]
    Analysis(String),

    #[error("AI merge failed: {0}")]
    Merge(String),

    #[error("unsupported conflict resolution strategy: {0}")]
    UnsupportedStrategy(String),

    #[error("{0}")]
    Other(String),
}

impl RedlineError {
    /// Render the error with its full source chain.
    ///
    /// This is what lands in a failed record's `error_trace` field: operator
    /// diagnostics, never shown to end users (the short `Display` form is).
    pub fn trace(&self) -> String {
        let mut out = format!("{self:?}: {self}");
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            out.push_str(&format!("\ncaused by: {err}"));
            source = err.source();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_contains_variant_and_message() {
        let err = RedlineError::Merge("model timed out".to_string());
        let trace = err.trace();
        assert!(trace.contains("Merge"));
        assert!(trace.contains("model timed out"));
    }
}
