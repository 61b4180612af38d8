use axum::extract::State;
use axum::Json;
use rand::seq::SliceRandom;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::envelope;
use crate::database::questions::QuestionRepository;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct QuizCategory {
    pub id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct QuizInput {
    #[serde(default)]
    pub quiz_category: Option<QuizCategory>,
    #[serde(default)]
    pub previous_questions: Vec<i64>,
}

/// POST /quizzes - serve one random question not seen before in this quiz.
///
/// Category id 0 (or no category) means "any category". An exhausted
/// candidate set is the normal end of a quiz: 200 with `question: null`.
pub async fn play(
    State(state): State<AppState>,
    body: Option<Json<QuizInput>>,
) -> Result<Json<Value>, ApiError> {
    let Json(input) = body.ok_or_else(|| ApiError::bad_request("JSON body required"))?;

    let category_id = input.quiz_category.unwrap_or_default().id.unwrap_or(0);

    let questions = QuestionRepository::new(state.pool.clone());
    let pool = if category_id == 0 {
        questions.list_all().await?
    } else {
        questions.list_by_category(category_id).await?
    };

    let candidates: Vec<_> = pool
        .into_iter()
        .filter(|q| !input.previous_questions.contains(&q.id))
        .collect();

    let question = candidates
        .choose(&mut rand::thread_rng())
        .map(|q| q.format())
        .unwrap_or(Value::Null);

    let message = if question.is_null() { "no more questions" } else { "POST Success" };

    Ok(envelope::ok(message, json!({ "question": question })))
}
