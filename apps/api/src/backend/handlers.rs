use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::backend::models::{
    ApiConfig, ApiConfigCreate, ApiConfigUpdate, ApiTestResponse, ConfigStatus, GenerateRequest,
    GenerateResponse, ModelInfo, OptimizationResult, OptimizationResultCreate, Pagination, Prompt,
    PromptCreate, PromptUpdate, PromptVersion, PromptVersionCreate, PromptWithVersions,
    ProviderTemplate, ProviderTestResponse, ProvidersResponse, VersionWithResults,
};
use crate::backend::validation;
use crate::errors::AppError;
use crate::quality::handlers::AnalyzeResponse;
use crate::state::AppState;

// ── Prompts ────────────────────────────────────────────────────────────────

/// GET /api/v1/prompts
pub async fn handle_list_prompts(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<Prompt>>, AppError> {
    Ok(Json(state.backend.list_prompts(page).await?))
}

/// POST /api/v1/prompts
pub async fn handle_create_prompt(
    State(state): State<AppState>,
    Json(req): Json<PromptCreate>,
) -> Result<(StatusCode, Json<Prompt>), AppError> {
    validation::validate_prompt_create(&req)?;
    let prompt = state.backend.create_prompt(&req).await?;
    tracing::info!(prompt_id = prompt.id, "prompt created");
    Ok((StatusCode::CREATED, Json(prompt)))
}

/// GET /api/v1/prompts/:id
pub async fn handle_get_prompt(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PromptWithVersions>, AppError> {
    Ok(Json(state.backend.get_prompt(id).await?))
}

/// PUT /api/v1/prompts/:id
pub async fn handle_update_prompt(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<PromptUpdate>,
) -> Result<Json<Prompt>, AppError> {
    validation::validate_prompt_update(&req)?;
    Ok(Json(state.backend.update_prompt(id, &req).await?))
}

/// DELETE /api/v1/prompts/:id
pub async fn handle_delete_prompt(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.backend.delete_prompt(id).await?;
    tracing::info!(prompt_id = id, "prompt deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/prompts/:id/versions
pub async fn handle_create_version(
    State(state): State<AppState>,
    Path(prompt_id): Path<i64>,
    Json(req): Json<PromptVersionCreate>,
) -> Result<(StatusCode, Json<PromptVersion>), AppError> {
    validation::validate_version_create(&req)?;
    let version = state.backend.create_version(prompt_id, &req).await?;
    tracing::info!(
        prompt_id,
        version_id = version.id,
        version_number = version.version_number,
        "version created"
    );
    Ok((StatusCode::CREATED, Json(version)))
}

// ── Versions ───────────────────────────────────────────────────────────────

/// GET /api/v1/versions/:id
pub async fn handle_get_version(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<VersionWithResults>, AppError> {
    Ok(Json(state.backend.get_version(id).await?))
}

/// GET /api/v1/versions/:id/results
pub async fn handle_list_results(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<OptimizationResult>>, AppError> {
    Ok(Json(state.backend.list_results(id).await?))
}

/// POST /api/v1/versions/:id/results
pub async fn handle_create_result(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<OptimizationResultCreate>,
) -> Result<(StatusCode, Json<OptimizationResult>), AppError> {
    validation::validate_result_create(&req)?;
    let result = state.backend.create_result(id, &req).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

#[derive(Serialize)]
pub struct VersionAnalysis {
    pub version_id: i64,
    pub prompt_id: i64,
    pub version_number: i32,
    pub analysis: AnalyzeResponse,
}

/// GET /api/v1/versions/:id/analyze
/// Scores the stored content of a version with the local quality analyzer.
pub async fn handle_analyze_version(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<VersionAnalysis>, AppError> {
    let version = state.backend.get_version(id).await?.version;
    let result = state.analyzer.analyze(&version.content).ok_or_else(|| {
        AppError::Validation(format!("Version {id} has no content to analyze"))
    })?;

    tracing::info!(
        version_id = id,
        overall_score = result.overall_score,
        "stored version analyzed"
    );

    Ok(Json(VersionAnalysis {
        version_id: version.id,
        prompt_id: version.prompt_id,
        version_number: version.version_number,
        analysis: result.into(),
    }))
}

// ── LLM ────────────────────────────────────────────────────────────────────

/// GET /api/v1/llm/providers
pub async fn handle_list_providers(
    State(state): State<AppState>,
) -> Result<Json<ProvidersResponse>, AppError> {
    Ok(Json(state.backend.list_providers().await?))
}

/// GET /api/v1/llm/providers/:provider/models
pub async fn handle_list_provider_models(
    State(state): State<AppState>,
    Path(provider): Path<String>,
) -> Result<Json<ModelInfo>, AppError> {
    Ok(Json(state.backend.list_provider_models(&provider).await?))
}

/// POST /api/v1/llm/test/:provider
pub async fn handle_test_provider(
    State(state): State<AppState>,
    Path(provider): Path<String>,
) -> Result<Json<ProviderTestResponse>, AppError> {
    let outcome = state.backend.test_provider(&provider).await?;
    tracing::info!(provider = %provider, status = ?outcome.status, "provider tested");
    Ok(Json(outcome))
}

/// POST /api/v1/llm/generate
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    if req.prompt.trim().is_empty() {
        return Err(AppError::Validation("prompt must not be blank".to_string()));
    }
    Ok(Json(state.backend.generate(&req).await?))
}

// ── API configs ────────────────────────────────────────────────────────────

/// GET /api/v1/api-config
pub async fn handle_list_api_configs(
    State(state): State<AppState>,
) -> Result<Json<Vec<ApiConfig>>, AppError> {
    Ok(Json(state.backend.list_api_configs().await?))
}

/// GET /api/v1/api-config/enabled
pub async fn handle_list_enabled_api_configs(
    State(state): State<AppState>,
) -> Result<Json<Vec<ApiConfig>>, AppError> {
    Ok(Json(state.backend.list_enabled_api_configs().await?))
}

/// GET /api/v1/api-config/status
pub async fn handle_api_config_status(
    State(state): State<AppState>,
) -> Result<Json<ConfigStatus>, AppError> {
    Ok(Json(state.backend.api_config_status().await?))
}

/// GET /api/v1/api-config/templates
pub async fn handle_list_provider_templates(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProviderTemplate>>, AppError> {
    Ok(Json(state.backend.list_provider_templates().await?))
}

/// GET /api/v1/api-config/templates/:provider
pub async fn handle_get_provider_template(
    State(state): State<AppState>,
    Path(provider): Path<String>,
) -> Result<Json<ProviderTemplate>, AppError> {
    Ok(Json(state.backend.get_provider_template(&provider).await?))
}

/// GET /api/v1/api-config/:id
pub async fn handle_get_api_config(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiConfig>, AppError> {
    Ok(Json(state.backend.get_api_config(id).await?))
}

/// POST /api/v1/api-config
pub async fn handle_create_api_config(
    State(state): State<AppState>,
    Json(req): Json<ApiConfigCreate>,
) -> Result<(StatusCode, Json<ApiConfig>), AppError> {
    validation::validate_api_config_create(&req)?;
    let config = state.backend.create_api_config(&req).await?;
    tracing::info!(config_id = config.id, provider = ?config.provider, "API config created");
    Ok((StatusCode::CREATED, Json(config)))
}

/// PUT /api/v1/api-config/:id
pub async fn handle_update_api_config(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<ApiConfigUpdate>,
) -> Result<Json<ApiConfig>, AppError> {
    validation::validate_api_config_update(&req)?;
    Ok(Json(state.backend.update_api_config(id, &req).await?))
}

/// DELETE /api/v1/api-config/:id
pub async fn handle_delete_api_config(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.backend.delete_api_config(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/api-config/test/:id
pub async fn handle_test_api_config(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiTestResponse>, AppError> {
    let outcome = state.backend.test_api_config(id).await?;
    tracing::info!(config_id = id, status = ?outcome.status, "API config tested");
    Ok(Json(outcome))
}
