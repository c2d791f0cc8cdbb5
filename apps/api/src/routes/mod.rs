pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::backend::handlers as backend;
use crate::quality::handlers as quality;
use crate::state::AppState;
use crate::templates::handlers as templates;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Quality analysis
        .route("/api/v1/quality/analyze", post(quality::handle_analyze))
        .route("/api/v1/quality/rules", get(quality::handle_list_rules))
        // Template library
        .route("/api/v1/templates", get(templates::handle_list_templates))
        .route("/api/v1/templates/:id", get(templates::handle_get_template))
        .route(
            "/api/v1/templates/:id/render",
            post(templates::handle_render_template),
        )
        // Prompts (forwarded to backend)
        .route(
            "/api/v1/prompts",
            get(backend::handle_list_prompts).post(backend::handle_create_prompt),
        )
        .route(
            "/api/v1/prompts/:id",
            get(backend::handle_get_prompt)
                .put(backend::handle_update_prompt)
                .delete(backend::handle_delete_prompt),
        )
        .route(
            "/api/v1/prompts/:id/versions",
            post(backend::handle_create_version),
        )
        // Versions
        .route("/api/v1/versions/:id", get(backend::handle_get_version))
        .route(
            "/api/v1/versions/:id/results",
            get(backend::handle_list_results).post(backend::handle_create_result),
        )
        .route(
            "/api/v1/versions/:id/analyze",
            get(backend::handle_analyze_version),
        )
        // LLM
        .route("/api/v1/llm/providers", get(backend::handle_list_providers))
        .route(
            "/api/v1/llm/providers/:provider/models",
            get(backend::handle_list_provider_models),
        )
        .route("/api/v1/llm/generate", post(backend::handle_generate))
        .route("/api/v1/llm/test/:provider", post(backend::handle_test_provider))
        // API configs
        .route(
            "/api/v1/api-config",
            get(backend::handle_list_api_configs).post(backend::handle_create_api_config),
        )
        .route(
            "/api/v1/api-config/enabled",
            get(backend::handle_list_enabled_api_configs),
        )
        .route(
            "/api/v1/api-config/status",
            get(backend::handle_api_config_status),
        )
        .route(
            "/api/v1/api-config/templates",
            get(backend::handle_list_provider_templates),
        )
        .route(
            "/api/v1/api-config/templates/:provider",
            get(backend::handle_get_provider_template),
        )
        .route(
            "/api/v1/api-config/:id",
            get(backend::handle_get_api_config)
                .put(backend::handle_update_api_config)
                .delete(backend::handle_delete_api_config),
        )
        .route(
            "/api/v1/api-config/test/:id",
            post(backend::handle_test_api_config),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::Utc;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::backend::models::*;
    use crate::backend::{BackendError, PromptBackend};
    use crate::quality::QualityAnalyzer;

    /// In-memory backend holding a single stored version (id 1).
    #[derive(Default)]
    struct FakeBackend {
        forwarded: AtomicUsize,
    }

    fn missing<T>() -> Result<T, BackendError> {
        Err(BackendError::NotFound("Not found".to_string()))
    }

    fn stored_version() -> PromptVersion {
        PromptVersion {
            id: 1,
            prompt_id: 10,
            version_number: 2,
            version_name: None,
            content: "just do it".to_string(),
            llm_config: None,
            change_notes: None,
            is_baseline: false,
            created_at: Utc::now(),
        }
    }

    #[async_trait]
    impl PromptBackend for FakeBackend {
        async fn list_prompts(&self, _page: Pagination) -> Result<Vec<Prompt>, BackendError> {
            Ok(vec![])
        }
        async fn create_prompt(&self, req: &PromptCreate) -> Result<Prompt, BackendError> {
            self.forwarded.fetch_add(1, Ordering::SeqCst);
            Ok(Prompt {
                id: 42,
                title: req.title.clone(),
                description: req.description.clone(),
                category: req.category,
                tags: req.tags.clone(),
                is_public: req.is_public,
                is_template: req.is_template,
                framework_type: req.framework_type,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
        }
        async fn get_prompt(&self, _id: i64) -> Result<PromptWithVersions, BackendError> {
            missing()
        }
        async fn update_prompt(&self, _id: i64, _req: &PromptUpdate) -> Result<Prompt, BackendError> {
            missing()
        }
        async fn delete_prompt(&self, _id: i64) -> Result<(), BackendError> {
            Ok(())
        }
        async fn create_version(
            &self,
            _prompt_id: i64,
            _req: &PromptVersionCreate,
        ) -> Result<PromptVersion, BackendError> {
            missing()
        }
        async fn get_version(&self, id: i64) -> Result<VersionWithResults, BackendError> {
            if id != 1 {
                return missing();
            }
            Ok(VersionWithResults {
                version: stored_version(),
                optimization_results: vec![],
            })
        }
        async fn list_results(&self, _id: i64) -> Result<Vec<OptimizationResult>, BackendError> {
            Ok(vec![])
        }
        async fn create_result(
            &self,
            _id: i64,
            _req: &OptimizationResultCreate,
        ) -> Result<OptimizationResult, BackendError> {
            missing()
        }
        async fn list_providers(&self) -> Result<ProvidersResponse, BackendError> {
            Err(BackendError::Api {
                status: 503,
                detail: "unavailable".to_string(),
            })
        }
        async fn list_provider_models(&self, _provider: &str) -> Result<ModelInfo, BackendError> {
            missing()
        }
        async fn generate(&self, _req: &GenerateRequest) -> Result<GenerateResponse, BackendError> {
            missing()
        }
        async fn test_provider(&self, _provider: &str) -> Result<ProviderTestResponse, BackendError> {
            missing()
        }
        async fn list_provider_templates(&self) -> Result<Vec<ProviderTemplate>, BackendError> {
            Ok(vec![])
        }
        async fn get_provider_template(
            &self,
            _provider: &str,
        ) -> Result<ProviderTemplate, BackendError> {
            missing()
        }
        async fn list_enabled_api_configs(&self) -> Result<Vec<ApiConfig>, BackendError> {
            Ok(vec![])
        }
        async fn api_config_status(&self) -> Result<ConfigStatus, BackendError> {
            Ok(ConfigStatus {
                total_configs: 2,
                enabled_configs: 1,
                working_configs: 1,
                last_updated: None,
            })
        }
        async fn get_api_config(&self, _id: i64) -> Result<ApiConfig, BackendError> {
            missing()
        }
        async fn list_api_configs(&self) -> Result<Vec<ApiConfig>, BackendError> {
            Ok(vec![])
        }
        async fn create_api_config(&self, _req: &ApiConfigCreate) -> Result<ApiConfig, BackendError> {
            missing()
        }
        async fn update_api_config(
            &self,
            _id: i64,
            _req: &ApiConfigUpdate,
        ) -> Result<ApiConfig, BackendError> {
            missing()
        }
        async fn delete_api_config(&self, _id: i64) -> Result<(), BackendError> {
            Ok(())
        }
        async fn test_api_config(&self, _id: i64) -> Result<ApiTestResponse, BackendError> {
            missing()
        }
    }

    fn app_with(backend: Arc<FakeBackend>) -> Router {
        build_router(AppState {
            analyzer: QualityAnalyzer::new(),
            backend,
        })
    }

    fn app() -> Router {
        app_with(Arc::new(FakeBackend::default()))
    }

    async fn read_body(resp: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let resp = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_body(resp).await;
        assert_eq!(body["service"], "prompt-studio-api");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn analyze_returns_scores_and_metrics() {
        let resp = app()
            .oneshot(post_json(
                "/api/v1/quality/analyze",
                json!({"content": "just do it"}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_body(resp).await;
        let overall = body["overall_score"].as_f64().unwrap();
        assert!((overall - 67.5).abs() < 1e-9);
        assert!(body["category_scores"]["clarity"].is_number());
        assert_eq!(body["metrics"]["overall_score"], body["overall_score"]);
        assert!(!body["issues"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn analyze_blank_is_bad_request() {
        let resp = app()
            .oneshot(post_json("/api/v1/quality/analyze", json!({"content": "  \n"})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = read_body(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn rules_lists_catalog() {
        let resp = app()
            .oneshot(Request::get("/api/v1/quality/rules").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = read_body(resp).await;
        let rules = body.as_array().unwrap();
        assert_eq!(rules.len(), 7);
        assert_eq!(rules[0]["id"], "length_check");
    }

    #[tokio::test]
    async fn templates_filter_and_render() {
        let resp = app()
            .oneshot(
                Request::get("/api/v1/templates?kind=framework")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = read_body(resp).await;
        assert_eq!(body.as_array().unwrap().len(), 5);

        let resp = app()
            .oneshot(post_json(
                "/api/v1/templates/costar/render",
                json!({"values": {}}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_body(resp).await;
        assert!(!body["unresolved"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_template_is_not_found() {
        let resp = app()
            .oneshot(Request::get("/api/v1/templates/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_prompt_is_not_forwarded() {
        let backend = Arc::new(FakeBackend::default());
        let resp = app_with(backend.clone())
            .oneshot(post_json("/api/v1/prompts", json!({"title": ""})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(backend.forwarded.load(Ordering::SeqCst), 0);

        let resp = app_with(backend.clone())
            .oneshot(post_json("/api/v1/prompts", json!({"title": "Digest"})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(backend.forwarded.load(Ordering::SeqCst), 1);
        assert_eq!(read_body(resp).await["id"], 42);
    }

    #[tokio::test]
    async fn stored_version_is_analyzed() {
        let resp = app()
            .oneshot(Request::get("/api/v1/versions/1/analyze").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_body(resp).await;
        assert_eq!(body["version_id"], 1);
        assert_eq!(body["prompt_id"], 10);
        let overall = body["analysis"]["overall_score"].as_f64().unwrap();
        assert!((overall - 67.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn missing_version_maps_to_not_found() {
        let resp = app()
            .oneshot(Request::get("/api/v1/versions/9/analyze").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn backend_failure_is_bad_gateway() {
        let resp = app()
            .oneshot(Request::get("/api/v1/llm/providers").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(read_body(resp).await["error"]["code"], "BACKEND_ERROR");
    }

    #[tokio::test]
    async fn api_config_static_paths_win_over_id() {
        let resp = app()
            .oneshot(Request::get("/api/v1/api-config/status").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(read_body(resp).await["total_configs"], 2);

        let resp = app()
            .oneshot(Request::get("/api/v1/api-config/templates").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = app()
            .oneshot(Request::get("/api/v1/api-config/7").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_prompt_returns_no_content() {
        let resp = app()
            .oneshot(Request::delete("/api/v1/prompts/3").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }
}
