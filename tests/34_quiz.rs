mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn serves_a_question_from_the_requested_category() {
    let (app, pool) = common::test_app().await;
    let (science, history) = common::seed_trivia(&pool, 3).await;

    let (status, body) = common::post_json(
        &app,
        "/quizzes",
        json!({ "quiz_category": { "id": science }, "previous_questions": [] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["question"]["category"], science);
    assert_ne!(body["question"]["category"], history);
}

#[tokio::test]
async fn category_zero_draws_from_every_category() {
    let (app, pool) = common::test_app().await;
    common::seed_trivia(&pool, 2).await;

    let (status, body) = common::post_json(
        &app,
        "/quizzes",
        json!({ "quiz_category": { "id": 0 }, "previous_questions": [] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["question"].is_object());
}

#[tokio::test]
async fn omitting_the_category_means_any() {
    let (app, pool) = common::test_app().await;
    common::seed_trivia(&pool, 1).await;

    let (status, body) =
        common::post_json(&app, "/quizzes", json!({ "previous_questions": [] })).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["question"].is_object());
}

#[tokio::test]
async fn never_repeats_a_previous_question() {
    let (app, pool) = common::test_app().await;
    let science = common::seed_category(&pool, "Science").await;
    let first = common::seed_question(&pool, "q1", "a", science, 1).await;
    let second = common::seed_question(&pool, "q2", "a", science, 1).await;

    let (status, body) = common::post_json(
        &app,
        "/quizzes",
        json!({ "quiz_category": { "id": science }, "previous_questions": [first] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["question"]["id"], second);
}

#[tokio::test]
async fn an_exhausted_quiz_ends_with_a_null_question() {
    let (app, pool) = common::test_app().await;
    let science = common::seed_category(&pool, "Science").await;
    let only = common::seed_question(&pool, "q1", "a", science, 1).await;

    let (status, body) = common::post_json(
        &app,
        "/quizzes",
        json!({ "quiz_category": { "id": science }, "previous_questions": [only] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["question"], Value::Null);
    assert_eq!(body["message"], "no more questions");
}

#[tokio::test]
async fn a_category_with_no_questions_ends_immediately() {
    let (app, pool) = common::test_app().await;
    common::seed_category(&pool, "Empty").await;

    let (status, body) = common::post_json(
        &app,
        "/quizzes",
        json!({ "quiz_category": { "id": 999 }, "previous_questions": [] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["question"], Value::Null);
}

#[tokio::test]
async fn a_quiz_round_walks_through_every_question_once() {
    let (app, pool) = common::test_app().await;
    let science = common::seed_category(&pool, "Science").await;
    for i in 0..4 {
        common::seed_question(&pool, &format!("q{i}"), "a", science, 1).await;
    }

    let mut seen = Vec::new();
    loop {
        let (status, body) = common::post_json(
            &app,
            "/quizzes",
            json!({ "quiz_category": { "id": science }, "previous_questions": &seen }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        match body["question"].as_object() {
            Some(question) => {
                let id = question["id"].as_i64().unwrap();
                assert!(!seen.contains(&id), "question {id} repeated");
                seen.push(id);
            }
            None => break,
        }
    }
    assert_eq!(seen.len(), 4);
}

#[tokio::test]
async fn a_missing_body_is_rejected() {
    let (app, _pool) = common::test_app().await;

    let (status, body) =
        common::request(&app, axum::http::Method::POST, "/quizzes", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}
