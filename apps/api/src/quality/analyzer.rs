//! Prompt quality analyzer: runs the rule catalog and aggregates the verdicts.
//!
//! Algorithm:
//! 1. Evaluate every rule independently against the raw text.
//! 2. overall = Σ(score × weight) / Σ(weight)
//! 3. category score = the same weighted mean restricted to that category
//! 4. Failing rules contribute their issues (paired with suggestions by position),
//!    passing rules contribute their name to `strengths`.
//! 5. One recommendation, picked by the overall score.

use std::collections::BTreeMap;

use tracing::debug;

use crate::quality::models::{AnalysisResult, Category, QualityIssue};
use crate::quality::rules::{Rule, RULES};

pub const DEFAULT_SUGGESTION: &str = "Consider revising this aspect of the prompt.";

pub const MAJOR_REVISION: &str =
    "The prompt needs major revision; consider redesigning it from scratch.";
pub const ROOM_FOR_IMPROVEMENT: &str =
    "The prompt has room for improvement; fix the flagged issues first.";
pub const GOOD_QUALITY: &str = "The prompt is of good quality; only minor polish is needed.";

/// Pure scorer over a fixed rule set.
#[derive(Debug, Clone)]
pub struct QualityAnalyzer {
    rules: &'static [Rule],
}

impl Default for QualityAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl QualityAnalyzer {
    pub fn new() -> Self {
        Self { rules: &RULES }
    }

    #[cfg(test)]
    pub fn with_rules(rules: &'static [Rule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static [Rule] {
        self.rules
    }

    /// Scores a prompt, or returns `None` for blank input, which is skipped
    /// rather than treated as an error.
    pub fn analyze(&self, text: &str) -> Option<AnalysisResult> {
        if text.trim().is_empty() {
            return None;
        }
        Some(self.evaluate(text))
    }

    /// Runs every rule and aggregates. Callers are expected to skip blank input.
    pub fn evaluate(&self, text: &str) -> AnalysisResult {
        let verdicts: Vec<_> = self
            .rules
            .iter()
            .map(|rule| (rule, rule.evaluate(text)))
            .collect();

        let mut total_weighted = 0.0;
        let mut total_weight = 0.0;
        let mut per_category: BTreeMap<Category, (f64, f64)> = BTreeMap::new();

        for (rule, verdict) in &verdicts {
            total_weighted += verdict.score * rule.weight;
            total_weight += rule.weight;

            let entry = per_category.entry(rule.category).or_insert((0.0, 0.0));
            entry.0 += verdict.score * rule.weight;
            entry.1 += rule.weight;
        }

        let category_scores = per_category
            .into_iter()
            .map(|(category, (weighted, weight))| (category, weighted_mean(weighted, weight)))
            .collect();

        let overall_score = weighted_mean(total_weighted, total_weight);

        let mut issues = Vec::new();
        let mut strengths = Vec::new();
        for (rule, verdict) in verdicts {
            if verdict.passed {
                strengths.push(rule.name.to_string());
                continue;
            }
            for (index, issue) in verdict.issues.into_iter().enumerate() {
                let suggestion = verdict
                    .suggestions
                    .get(index)
                    .filter(|s| !s.is_empty())
                    .cloned()
                    .unwrap_or_else(|| DEFAULT_SUGGESTION.to_string());
                issues.push(QualityIssue {
                    rule: rule.id.to_string(),
                    category: rule.category,
                    issue,
                    suggestion,
                });
            }
        }

        debug!(
            overall_score,
            issues = issues.len(),
            strengths = strengths.len(),
            "prompt analyzed"
        );

        AnalysisResult {
            overall_score,
            category_scores,
            issues,
            strengths,
            recommendations: vec![recommendation_for(overall_score).to_string()],
        }
    }
}

fn weighted_mean(weighted: f64, weight: f64) -> f64 {
    if weight > 0.0 {
        (weighted / weight).clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Overall-score thresholds: < 60, 60..80, ≥ 80.
pub fn recommendation_for(overall_score: f64) -> &'static str {
    if overall_score < 60.0 {
        MAJOR_REVISION
    } else if overall_score < 80.0 {
        ROOM_FOR_IMPROVEMENT
    } else {
        GOOD_QUALITY
    }
}
