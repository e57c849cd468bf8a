use crate::model::InvalidInput;

/// Errors surfaced by the analysis service
///
/// Upstream and extraction failures are absorbed by the heuristic fallback
/// and never appear here; rejected input is the single caller-visible
/// failure mode.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),
}
