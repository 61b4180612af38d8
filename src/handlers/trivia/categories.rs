use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::{json, Value};

use crate::api::envelope;
use crate::api::pagination::{paginate, PageQuery};
use crate::database::categories::CategoryRepository;
use crate::database::models::category;
use crate::database::models::Question;
use crate::database::questions::QuestionRepository;
use crate::error::ApiError;
use crate::AppState;

/// GET /categories - the full `{id: type}` map
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let categories = CategoryRepository::new(state.pool.clone()).list_all().await?;

    if categories.is_empty() {
        return Err(ApiError::not_found("no categories found"));
    }

    Ok(envelope::ok(
        "GET Success",
        json!({ "categories": category::simplify(&categories) }),
    ))
}

/// GET /categories/:id/questions?page=N - paginated questions in one category.
/// A syntactically valid but nonexistent category id is unprocessable.
pub async fn questions(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Value>, ApiError> {
    let categories = CategoryRepository::new(state.pool.clone());
    let category = categories
        .get(id)
        .await?
        .ok_or_else(|| ApiError::unprocessable(format!("category {} does not exist", id)))?;

    let in_category = QuestionRepository::new(state.pool.clone()).list_by_category(id).await?;
    let page = paginate(&in_category, query.page)?;
    if page.is_empty() {
        return Err(ApiError::not_found("no questions on the requested page"));
    }

    Ok(envelope::ok(
        "GET Success",
        json!({
            "questions": page.iter().map(Question::format).collect::<Vec<_>>(),
            "total_questions": in_category.len(),
            "current_category": category.id,
        }),
    ))
}
