//! Request validation applied before anything is forwarded to the backend.
//!
//! Mirrors the backend's own schema limits so bad form input is rejected locally
//! with every problem listed at once.

use crate::backend::models::{
    ApiConfigCreate, ApiConfigUpdate, LlmConfig, OptimizationResultCreate, PromptCreate,
    PromptUpdate, PromptVersionCreate,
};
use crate::errors::AppError;

pub const MAX_TITLE_CHARS: usize = 255;
pub const MAX_TAGS: usize = 10;
pub const MAX_VERSION_NAME_CHARS: usize = 100;
pub const MAX_DISPLAY_NAME_CHARS: usize = 100;
pub const MAX_COMPLETION_TOKENS: u32 = 8192;
pub const TIMEOUT_RANGE_SECS: (u32, u32) = (1, 300);

#[derive(Debug, Default)]
struct Problems(Vec<String>);

impl Problems {
    fn check(&mut self, ok: bool, message: impl Into<String>) {
        if !ok {
            self.0.push(message.into());
        }
    }

    fn range(&mut self, field: &str, value: Option<f64>, min: f64, max: f64) {
        if let Some(v) = value {
            self.check(
                (min..=max).contains(&v),
                format!("{field} must be between {min} and {max}, got {v}"),
            );
        }
    }

    fn finish(self) -> Result<(), AppError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self.0.join("; ")))
        }
    }
}

fn chars(s: &str) -> usize {
    s.chars().count()
}

fn title(p: &mut Problems, title: &str) {
    let len = chars(title.trim());
    p.check(
        (1..=MAX_TITLE_CHARS).contains(&len),
        format!("title must be 1 to {MAX_TITLE_CHARS} characters"),
    );
}

fn tags(p: &mut Problems, tags: &[String]) {
    p.check(
        tags.len() <= MAX_TAGS,
        format!("at most {MAX_TAGS} tags are allowed, got {}", tags.len()),
    );
}

pub fn validate_prompt_create(req: &PromptCreate) -> Result<(), AppError> {
    let mut p = Problems::default();
    title(&mut p, &req.title);
    tags(&mut p, &req.tags);
    p.finish()
}

pub fn validate_prompt_update(req: &PromptUpdate) -> Result<(), AppError> {
    let mut p = Problems::default();
    if let Some(t) = &req.title {
        title(&mut p, t);
    }
    if let Some(t) = &req.tags {
        tags(&mut p, t);
    }
    p.finish()
}

fn llm_config(p: &mut Problems, config: &LlmConfig) {
    p.check(!config.model.trim().is_empty(), "llm_config.model must not be empty");
    p.range("temperature", config.temperature, 0.0, 2.0);
    p.range("top_p", config.top_p, 0.0, 1.0);
    p.range("frequency_penalty", config.frequency_penalty, -2.0, 2.0);
    p.range("presence_penalty", config.presence_penalty, -2.0, 2.0);
    if let Some(max_tokens) = config.max_tokens {
        p.check(
            (1..=MAX_COMPLETION_TOKENS).contains(&max_tokens),
            format!("max_tokens must be between 1 and {MAX_COMPLETION_TOKENS}"),
        );
    }
}

pub fn validate_version_create(req: &PromptVersionCreate) -> Result<(), AppError> {
    let mut p = Problems::default();
    p.check(!req.content.trim().is_empty(), "content must not be blank");
    if let Some(name) = &req.version_name {
        p.check(
            chars(name) <= MAX_VERSION_NAME_CHARS,
            format!("version_name must be at most {MAX_VERSION_NAME_CHARS} characters"),
        );
    }
    if let Some(config) = &req.llm_config {
        llm_config(&mut p, config);
    }
    p.finish()
}

pub fn validate_result_create(req: &OptimizationResultCreate) -> Result<(), AppError> {
    let mut p = Problems::default();
    if let Some(rating) = req.user_rating {
        p.check(
            (1..=5).contains(&rating),
            format!("user_rating must be between 1 and 5, got {rating}"),
        );
    }
    p.range("quality_score", req.quality_score, 0.0, 100.0);
    for (field, value) in [
        ("input_tokens", req.input_tokens),
        ("output_tokens", req.output_tokens),
        ("total_tokens", req.total_tokens),
    ] {
        if let Some(v) = value {
            p.check(v >= 0, format!("{field} must not be negative"));
        }
    }
    for (field, value) in [("execution_time", req.execution_time), ("cost", req.cost)] {
        if let Some(v) = value {
            p.check(v >= 0.0, format!("{field} must not be negative"));
        }
    }
    p.finish()
}

fn display_name(p: &mut Problems, name: &str) {
    let len = chars(name.trim());
    p.check(
        (1..=MAX_DISPLAY_NAME_CHARS).contains(&len),
        format!("display_name must be 1 to {MAX_DISPLAY_NAME_CHARS} characters"),
    );
}

fn timeout(p: &mut Problems, secs: u32) {
    let (min, max) = TIMEOUT_RANGE_SECS;
    p.check(
        (min..=max).contains(&secs),
        format!("timeout must be between {min} and {max} seconds"),
    );
}

fn models(p: &mut Problems, supported: &[String], default_model: Option<&str>) {
    p.check(
        supported.iter().any(|m| !m.trim().is_empty()),
        "at least one supported model is required",
    );
    if let Some(default_model) = default_model {
        p.check(
            supported.iter().any(|m| m == default_model),
            format!("default_model '{default_model}' is not among supported_models"),
        );
    }
}

pub fn validate_api_config_create(req: &ApiConfigCreate) -> Result<(), AppError> {
    let mut p = Problems::default();
    display_name(&mut p, &req.display_name);
    p.check(!req.api_key.trim().is_empty(), "api_key must not be empty");
    timeout(&mut p, req.timeout);
    models(&mut p, &req.supported_models, req.default_model.as_deref());
    p.finish()
}

pub fn validate_api_config_update(req: &ApiConfigUpdate) -> Result<(), AppError> {
    let mut p = Problems::default();
    if let Some(name) = &req.display_name {
        display_name(&mut p, name);
    }
    if let Some(key) = &req.api_key {
        p.check(!key.trim().is_empty(), "api_key must not be empty");
    }
    if let Some(secs) = req.timeout {
        timeout(&mut p, secs);
    }
    if let Some(supported) = &req.supported_models {
        models(&mut p, supported, req.default_model.as_deref());
    }
    p.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::models::LlmProvider;
    use std::collections::HashMap;

    fn message(result: Result<(), AppError>) -> String {
        match result {
            Err(AppError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_prompt_create_ok() {
        let req = PromptCreate {
            title: "Weekly summary".to_string(),
            tags: vec!["ops".to_string()],
            ..Default::default()
        };
        assert!(validate_prompt_create(&req).is_ok());
    }

    #[test]
    fn test_prompt_create_reports_all_problems() {
        let req = PromptCreate {
            title: "   ".to_string(),
            tags: (0..11).map(|i| format!("t{i}")).collect(),
            ..Default::default()
        };
        let msg = message(validate_prompt_create(&req));
        assert!(msg.contains("title"));
        assert!(msg.contains("at most 10 tags"));
    }

    #[test]
    fn test_prompt_update_only_checks_present_fields() {
        assert!(validate_prompt_update(&PromptUpdate::default()).is_ok());
        let req = PromptUpdate {
            title: Some("x".repeat(256)),
            ..Default::default()
        };
        assert!(message(validate_prompt_update(&req)).contains("title"));
    }

    #[test]
    fn test_version_llm_config_ranges() {
        let req = PromptVersionCreate {
            content: "请总结".to_string(),
            llm_config: Some(LlmConfig {
                provider: LlmProvider::Openai,
                model: "gpt-4".to_string(),
                temperature: Some(2.5),
                max_tokens: Some(0),
                top_p: Some(1.0),
                frequency_penalty: None,
                presence_penalty: Some(-2.0),
                stop_sequences: vec![],
            }),
            ..Default::default()
        };
        let msg = message(validate_version_create(&req));
        assert!(msg.contains("temperature"));
        assert!(msg.contains("max_tokens"));
        assert!(!msg.contains("top_p"));
        assert!(!msg.contains("presence_penalty"));
    }

    #[test]
    fn test_version_blank_content_rejected() {
        let req = PromptVersionCreate {
            content: " \n".to_string(),
            ..Default::default()
        };
        assert!(message(validate_version_create(&req)).contains("content"));
    }

    #[test]
    fn test_result_bounds() {
        let req = OptimizationResultCreate {
            output_text: "ok".to_string(),
            user_rating: Some(6),
            quality_score: Some(101.0),
            input_tokens: Some(-1),
            ..Default::default()
        };
        let msg = message(validate_result_create(&req));
        assert!(msg.contains("user_rating"));
        assert!(msg.contains("quality_score"));
        assert!(msg.contains("input_tokens"));
    }

    fn config_create() -> ApiConfigCreate {
        ApiConfigCreate {
            provider: LlmProvider::Anthropic,
            display_name: "Anthropic".to_string(),
            is_enabled: true,
            api_key: "sk-ant-test".to_string(),
            api_url: None,
            timeout: 60,
            extra_config: HashMap::new(),
            supported_models: vec!["claude-3-sonnet".to_string()],
            default_model: Some("claude-3-sonnet".to_string()),
            description: None,
        }
    }

    #[test]
    fn test_api_config_create_ok() {
        assert!(validate_api_config_create(&config_create()).is_ok());
    }

    #[test]
    fn test_api_config_default_model_must_be_supported() {
        let mut req = config_create();
        req.default_model = Some("claude-2".to_string());
        req.timeout = 301;
        let msg = message(validate_api_config_create(&req));
        assert!(msg.contains("default_model"));
        assert!(msg.contains("timeout"));
    }

    #[test]
    fn test_api_config_requires_models_and_key() {
        let mut req = config_create();
        req.supported_models.clear();
        req.default_model = None;
        req.api_key = String::new();
        let msg = message(validate_api_config_create(&req));
        assert!(msg.contains("supported model"));
        assert!(msg.contains("api_key"));
    }

    #[test]
    fn test_api_config_update_partial() {
        assert!(validate_api_config_update(&ApiConfigUpdate::default()).is_ok());
        let req = ApiConfigUpdate {
            timeout: Some(0),
            ..Default::default()
        };
        assert!(message(validate_api_config_update(&req)).contains("timeout"));
    }
}
