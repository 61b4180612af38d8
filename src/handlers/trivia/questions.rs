use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::{json, Value};

use crate::api::envelope;
use crate::api::pagination::{check_page, paginate, PageQuery};
use crate::database::categories::CategoryRepository;
use crate::database::models::category;
use crate::database::models::Question;
use crate::database::questions::{NewQuestion, QuestionRepository};
use crate::error::ApiError;
use crate::AppState;

fn format_all(questions: &[Question]) -> Vec<Value> {
    questions.iter().map(Question::format).collect()
}

/// GET /questions?page=N - paginated question list with category index
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Value>, ApiError> {
    let questions = QuestionRepository::new(state.pool.clone());
    let categories = CategoryRepository::new(state.pool.clone());

    let all = questions.list_all().await?;
    let page = paginate(&all, query.page)?;
    if page.is_empty() {
        return Err(ApiError::not_found("no questions on the requested page"));
    }

    let total = questions.count().await?;
    let category_map = category::simplify(&categories.list_all().await?);

    Ok(envelope::ok(
        "GET Success",
        json!({
            "questions": format_all(page),
            "total_questions": total,
            "categories": category_map,
            "current_category": Value::Null,
        }),
    ))
}

/// POST /questions - create a question, or search when the body carries
/// `searchTerm`.
pub async fn create_or_search(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, ApiError> {
    let Json(payload) = body.ok_or_else(|| ApiError::bad_request("JSON body required"))?;

    if let Some(term) = payload.get("searchTerm") {
        let term = term
            .as_str()
            .ok_or_else(|| ApiError::bad_request("searchTerm must be a string"))?;
        return search(&state, term).await;
    }

    create(&state, &payload).await
}

/// Substring search; zero matches is a success with an empty list.
async fn search(state: &AppState, term: &str) -> Result<Json<Value>, ApiError> {
    let questions = QuestionRepository::new(state.pool.clone());
    let matches = questions.search(term).await?;

    Ok(envelope::ok(
        "POST Success",
        json!({
            "questions": format_all(&matches),
            "total_questions": matches.len(),
            "current_category": Value::Null,
        }),
    ))
}

async fn create(state: &AppState, payload: &Value) -> Result<Json<Value>, ApiError> {
    let text = require_string(payload, "question")?;
    let answer = require_string(payload, "answer")?;
    let difficulty = require_integer(payload, "difficulty")?;
    let category = require_integer(payload, "category")?;

    let questions = QuestionRepository::new(state.pool.clone());

    // The category foreign key also guards this, but checking up front gives
    // the caller a message naming the bad reference
    let categories = CategoryRepository::new(state.pool.clone());
    if categories.get(category).await?.is_none() {
        return Err(ApiError::unprocessable(format!("category {} does not exist", category)));
    }

    let created = questions
        .create(&NewQuestion {
            question: text.to_string(),
            answer: answer.to_string(),
            difficulty,
            category,
        })
        .await?;
    let total = questions.count().await?;

    Ok(envelope::ok(
        "POST Success",
        json!({
            "created": created.id,
            "question": created.format(),
            "total_questions": total,
        }),
    ))
}

/// DELETE /questions/:id - remove a question and return the resulting page.
/// An empty page after a delete is a normal outcome, not an error.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Value>, ApiError> {
    let questions = QuestionRepository::new(state.pool.clone());
    let categories = CategoryRepository::new(state.pool.clone());

    // Reject a bad page number before the row is gone
    check_page(query.page)?;

    if !questions.delete(id).await? {
        return Err(ApiError::not_found(format!("question {} not found", id)));
    }

    let all = questions.list_all().await?;
    let page = paginate(&all, query.page)?;
    let total = questions.count().await?;
    let category_map = category::simplify(&categories.list_all().await?);

    Ok(envelope::ok(
        "DELETE Success",
        json!({
            "deleted": id,
            "questions": format_all(page),
            "total_questions": total,
            "categories": category_map,
            "current_category": Value::Null,
        }),
    ))
}

fn require_string<'a>(payload: &'a Value, field: &str) -> Result<&'a str, ApiError> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::bad_request(format!("{} is required", field)))
}

fn require_integer(payload: &Value, field: &str) -> Result<i64, ApiError> {
    payload
        .get(field)
        .and_then(Value::as_i64)
        .ok_or_else(|| ApiError::bad_request(format!("{} is required", field)))
}
