use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Quality dimension a rule contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Clarity,
    Specificity,
    Context,
    Structure,
    Completeness,
}

impl Category {
    #[cfg(test)]
    pub const ALL: [Category; 5] = [
        Category::Clarity,
        Category::Specificity,
        Category::Context,
        Category::Structure,
        Category::Completeness,
    ];
}

/// Scores strictly above this pass.
pub const PASS_THRESHOLD: f64 = 70.0;

/// Outcome of one rule against one prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub passed: bool,
    pub score: f64,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
}

impl Verdict {
    /// Builds a verdict, deriving `passed` from the clamped score.
    pub fn new(score: f64, issues: Vec<String>, suggestions: Vec<String>) -> Self {
        let score = score.clamp(0.0, 100.0);
        Self {
            passed: score > PASS_THRESHOLD,
            score,
            issues,
            suggestions,
        }
    }
}

/// One flagged problem, flattened out of a failing rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityIssue {
    pub rule: String,
    pub category: Category,
    pub issue: String,
    pub suggestion: String,
}

/// Aggregate of every rule for one prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub overall_score: f64,
    pub category_scores: BTreeMap<Category, f64>,
    pub issues: Vec<QualityIssue>,
    pub strengths: Vec<String>,
    pub recommendations: Vec<String>,
}

impl AnalysisResult {
    pub fn category_score(&self, category: Category) -> Option<f64> {
        self.category_scores.get(&category).copied()
    }

    /// Projects the result onto the backend's per-dimension metrics record.
    pub fn metrics(&self) -> QualityMetrics {
        let score = |c| self.category_score(c).unwrap_or(0.0);
        QualityMetrics {
            clarity_score: score(Category::Clarity),
            specificity_score: score(Category::Specificity),
            context_score: score(Category::Context),
            structure_score: score(Category::Structure),
            completeness_score: score(Category::Completeness),
            overall_score: self.overall_score,
        }
    }
}

/// Per-dimension scores as stored alongside an optimization result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub clarity_score: f64,
    pub specificity_score: f64,
    pub context_score: f64,
    pub structure_score: f64,
    pub completeness_score: f64,
    pub overall_score: f64,
}
