pub mod analysis;
pub mod assistant;
pub mod gemini;

pub use analysis::AnalysisService;
pub use assistant::AssistantService;
pub use gemini::GeminiClient;
