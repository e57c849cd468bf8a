pub mod analysis;
pub mod config;

pub use analysis::{AnalysisKind, AnalysisRequest, Classification, InvalidInput, Verdict};
pub use config::{Config, UpstreamConfig};
