// Prompt quality scorer: a fixed catalog of independent heuristic rules,
// aggregated into per-category and overall scores.

pub mod analyzer;
pub mod handlers;
pub mod models;
pub mod rules;

pub use analyzer::QualityAnalyzer;
pub use models::QualityMetrics;
