use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::quality::models::{AnalysisResult, QualityMetrics};
use crate::quality::rules::RuleInfo;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub content: String,
    /// Accepted for compatibility with the backend's analysis schema; not used in scoring.
    #[serde(default)]
    pub framework_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub metrics: QualityMetrics,
}

impl From<AnalysisResult> for AnalyzeResponse {
    fn from(result: AnalysisResult) -> Self {
        let metrics = result.metrics();
        Self { result, metrics }
    }
}

/// POST /api/v1/quality/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let result = state
        .analyzer
        .analyze(&req.content)
        .ok_or_else(|| AppError::Validation("content must not be blank".to_string()))?;

    tracing::info!(
        overall_score = result.overall_score,
        issues = result.issues.len(),
        framework = req.framework_type.as_deref().unwrap_or("none"),
        "quality analysis complete"
    );

    Ok(Json(result.into()))
}

/// GET /api/v1/quality/rules
pub async fn handle_list_rules(State(state): State<AppState>) -> Json<Vec<RuleInfo>> {
    Json(state.analyzer.rules().iter().map(|r| r.info()).collect())
}
