use std::collections::HashMap;

use axum::{
    extract::{Path, Query},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::templates::library::{self, Template, TemplateFilter};
use crate::templates::render::{placeholders, render, Rendered};

#[derive(Serialize)]
pub struct TemplateDetail {
    #[serde(flatten)]
    pub template: &'static Template,
    pub placeholders: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RenderRequest {
    #[serde(default)]
    pub values: HashMap<String, String>,
}

fn lookup(id: &str) -> Result<&'static Template, AppError> {
    library::find(id).ok_or_else(|| AppError::NotFound(format!("Template {id} not found")))
}

/// GET /api/v1/templates
pub async fn handle_list_templates(
    Query(filter): Query<TemplateFilter>,
) -> Json<Vec<&'static Template>> {
    Json(library::filter(&filter))
}

/// GET /api/v1/templates/:id
pub async fn handle_get_template(Path(id): Path<String>) -> Result<Json<TemplateDetail>, AppError> {
    let template = lookup(&id)?;
    Ok(Json(TemplateDetail {
        template,
        placeholders: placeholders(template.body),
    }))
}

/// POST /api/v1/templates/:id/render
pub async fn handle_render_template(
    Path(id): Path<String>,
    Json(req): Json<RenderRequest>,
) -> Result<Json<Rendered>, AppError> {
    let template = lookup(&id)?;
    Ok(Json(render(template.body, &req.values)))
}
