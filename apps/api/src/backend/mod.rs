//! Gateway to the external prompt backend.
//!
//! The backend owns persistence and all LLM invocation. Every operation here is
//! one HTTP request with no retries and no caching.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::errors::AppError;

pub mod handlers;
pub mod models;
pub mod validation;

use models::{
    ApiConfig, ApiConfigCreate, ApiConfigUpdate, ApiTestResponse, ConfigStatus, GenerateRequest,
    GenerateResponse, ModelInfo, OptimizationResult, OptimizationResultCreate, Pagination, Prompt,
    PromptCreate, PromptUpdate, PromptVersion, PromptVersionCreate, PromptWithVersions,
    ProviderTemplate, ProviderTestResponse, ProvidersResponse, VersionWithResults,
};

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("rejected by backend (status {status}): {detail}")]
    Rejected { status: u16, detail: String },

    #[error("backend error (status {status}): {detail}")]
    Api { status: u16, detail: String },
}

impl From<BackendError> for AppError {
    fn from(e: BackendError) -> Self {
        match e {
            BackendError::NotFound(detail) => AppError::NotFound(detail),
            BackendError::Rejected { detail, .. } => AppError::Validation(detail),
            other => AppError::Backend(other.to_string()),
        }
    }
}

/// Operations the service forwards to the backend.
///
/// Carried in `AppState` as `Arc<dyn PromptBackend>` so handlers can be exercised
/// against an in-memory implementation.
#[async_trait]
pub trait PromptBackend: Send + Sync {
    async fn list_prompts(&self, page: Pagination) -> Result<Vec<Prompt>, BackendError>;
    async fn create_prompt(&self, req: &PromptCreate) -> Result<Prompt, BackendError>;
    async fn get_prompt(&self, id: i64) -> Result<PromptWithVersions, BackendError>;
    async fn update_prompt(&self, id: i64, req: &PromptUpdate) -> Result<Prompt, BackendError>;
    async fn delete_prompt(&self, id: i64) -> Result<(), BackendError>;
    async fn create_version(
        &self,
        prompt_id: i64,
        req: &PromptVersionCreate,
    ) -> Result<PromptVersion, BackendError>;

    async fn get_version(&self, id: i64) -> Result<VersionWithResults, BackendError>;
    async fn list_results(&self, version_id: i64) -> Result<Vec<OptimizationResult>, BackendError>;
    async fn create_result(
        &self,
        version_id: i64,
        req: &OptimizationResultCreate,
    ) -> Result<OptimizationResult, BackendError>;

    async fn list_providers(&self) -> Result<ProvidersResponse, BackendError>;
    async fn list_provider_models(&self, provider: &str) -> Result<ModelInfo, BackendError>;
    async fn generate(&self, req: &GenerateRequest) -> Result<GenerateResponse, BackendError>;
    async fn test_provider(&self, provider: &str) -> Result<ProviderTestResponse, BackendError>;

    async fn list_provider_templates(&self) -> Result<Vec<ProviderTemplate>, BackendError>;
    async fn get_provider_template(&self, provider: &str)
        -> Result<ProviderTemplate, BackendError>;
    async fn list_api_configs(&self) -> Result<Vec<ApiConfig>, BackendError>;
    async fn list_enabled_api_configs(&self) -> Result<Vec<ApiConfig>, BackendError>;
    async fn api_config_status(&self) -> Result<ConfigStatus, BackendError>;
    async fn get_api_config(&self, id: i64) -> Result<ApiConfig, BackendError>;
    async fn create_api_config(&self, req: &ApiConfigCreate) -> Result<ApiConfig, BackendError>;
    async fn update_api_config(
        &self,
        id: i64,
        req: &ApiConfigUpdate,
    ) -> Result<ApiConfig, BackendError>;
    async fn delete_api_config(&self, id: i64) -> Result<(), BackendError>;
    async fn test_api_config(&self, id: i64) -> Result<ApiTestResponse, BackendError>;
}

/// reqwest-backed client for the backend's `/api/v1` REST surface.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<reqwest::Response, BackendError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = extract_detail(&body);

        match status {
            StatusCode::NOT_FOUND => {
                warn!("Backend resource not found: {detail}");
                Err(BackendError::NotFound(detail))
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                warn!("Backend rejected request ({status}): {detail}");
                Err(BackendError::Rejected {
                    status: status.as_u16(),
                    detail,
                })
            }
            _ => {
                if status.is_server_error() {
                    error!("Backend server error ({status}): {detail}");
                } else {
                    warn!("Backend returned {status}: {detail}");
                }
                Err(BackendError::Api {
                    status: status.as_u16(),
                    detail,
                })
            }
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        debug!("GET {path}");
        let response = self.execute(self.client.get(self.url(path))).await?;
        Ok(response.json().await?)
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &B,
    ) -> Result<T, BackendError> {
        debug!("{method} {path}");
        let request = self.client.request(method, self.url(path)).json(body);
        let response = self.execute(request).await?;
        Ok(response.json().await?)
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        debug!("POST {path}");
        let response = self.execute(self.client.post(self.url(path))).await?;
        Ok(response.json().await?)
    }

    async fn delete(&self, path: &str) -> Result<(), BackendError> {
        debug!("DELETE {path}");
        self.execute(self.client.delete(self.url(path))).await?;
        Ok(())
    }
}

/// Pulls a readable message out of a backend error body.
/// The backend reports `{"detail": "..."}`, or a list of field errors on validation failure.
fn extract_detail(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return if body.trim().is_empty() {
            "no details provided".to_string()
        } else {
            body.trim().to_string()
        };
    };

    match value.get("detail") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.get("msg")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| item.to_string())
            })
            .collect::<Vec<_>>()
            .join("; "),
        Some(other) => other.to_string(),
        None => value.to_string(),
    }
}

#[async_trait]
impl PromptBackend for BackendClient {
    async fn list_prompts(&self, page: Pagination) -> Result<Vec<Prompt>, BackendError> {
        self.get(&format!("/prompts?skip={}&limit={}", page.skip, page.limit))
            .await
    }

    async fn create_prompt(&self, req: &PromptCreate) -> Result<Prompt, BackendError> {
        self.send_json(reqwest::Method::POST, "/prompts", req).await
    }

    async fn get_prompt(&self, id: i64) -> Result<PromptWithVersions, BackendError> {
        self.get(&format!("/prompts/{id}")).await
    }

    async fn update_prompt(&self, id: i64, req: &PromptUpdate) -> Result<Prompt, BackendError> {
        self.send_json(reqwest::Method::PUT, &format!("/prompts/{id}"), req)
            .await
    }

    async fn delete_prompt(&self, id: i64) -> Result<(), BackendError> {
        self.delete(&format!("/prompts/{id}")).await
    }

    async fn create_version(
        &self,
        prompt_id: i64,
        req: &PromptVersionCreate,
    ) -> Result<PromptVersion, BackendError> {
        self.send_json(
            reqwest::Method::POST,
            &format!("/prompts/{prompt_id}/versions"),
            req,
        )
        .await
    }

    async fn get_version(&self, id: i64) -> Result<VersionWithResults, BackendError> {
        self.get(&format!("/versions/{id}")).await
    }

    async fn list_results(&self, version_id: i64) -> Result<Vec<OptimizationResult>, BackendError> {
        self.get(&format!("/versions/{version_id}/results")).await
    }

    async fn create_result(
        &self,
        version_id: i64,
        req: &OptimizationResultCreate,
    ) -> Result<OptimizationResult, BackendError> {
        self.send_json(
            reqwest::Method::POST,
            &format!("/versions/{version_id}/results"),
            req,
        )
        .await
    }

    async fn list_providers(&self) -> Result<ProvidersResponse, BackendError> {
        self.get("/llm/providers").await
    }

    async fn list_provider_models(&self, provider: &str) -> Result<ModelInfo, BackendError> {
        self.get(&format!("/llm/providers/{provider}/models")).await
    }

    async fn generate(&self, req: &GenerateRequest) -> Result<GenerateResponse, BackendError> {
        self.send_json(reqwest::Method::POST, "/llm/generate", req)
            .await
    }

    async fn test_provider(&self, provider: &str) -> Result<ProviderTestResponse, BackendError> {
        self.post_empty(&format!("/llm/test/{provider}")).await
    }

    async fn list_provider_templates(&self) -> Result<Vec<ProviderTemplate>, BackendError> {
        self.get("/api-config/templates").await
    }

    async fn get_provider_template(
        &self,
        provider: &str,
    ) -> Result<ProviderTemplate, BackendError> {
        self.get(&format!("/api-config/templates/{provider}")).await
    }

    async fn list_api_configs(&self) -> Result<Vec<ApiConfig>, BackendError> {
        self.get("/api-config/").await
    }

    async fn list_enabled_api_configs(&self) -> Result<Vec<ApiConfig>, BackendError> {
        self.get("/api-config/enabled").await
    }

    async fn api_config_status(&self) -> Result<ConfigStatus, BackendError> {
        self.get("/api-config/status").await
    }

    async fn get_api_config(&self, id: i64) -> Result<ApiConfig, BackendError> {
        self.get(&format!("/api-config/{id}")).await
    }

    async fn create_api_config(&self, req: &ApiConfigCreate) -> Result<ApiConfig, BackendError> {
        self.send_json(reqwest::Method::POST, "/api-config/", req)
            .await
    }

    async fn update_api_config(
        &self,
        id: i64,
        req: &ApiConfigUpdate,
    ) -> Result<ApiConfig, BackendError> {
        self.send_json(reqwest::Method::PUT, &format!("/api-config/{id}"), req)
            .await
    }

    async fn delete_api_config(&self, id: i64) -> Result<(), BackendError> {
        self.delete(&format!("/api-config/{id}")).await
    }

    async fn test_api_config(&self, id: i64) -> Result<ApiTestResponse, BackendError> {
        self.post_empty(&format!("/api-config/test/{id}")).await
    }
}
