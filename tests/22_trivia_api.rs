mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn question_list_is_paginated_with_category_index() {
    let (app, pool) = common::test_app().await;
    let (science, history) = common::seed_trivia(&pool, 8).await;

    let (status, body) = common::get(&app, "/questions").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["questions"].as_array().unwrap().len(), 10);
    assert_eq!(body["total_questions"], 16);
    assert_eq!(body["current_category"], serde_json::Value::Null);

    let categories = body["categories"].as_object().unwrap();
    assert_eq!(categories[&science.to_string()], "Science");
    assert_eq!(categories[&history.to_string()], "History");

    let (status, body) = common::get(&app, "/questions?page=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions"].as_array().unwrap().len(), 6);
    assert_eq!(body["total_questions"], 16);
}

#[tokio::test]
async fn page_one_is_the_default() {
    let (app, pool) = common::test_app().await;
    common::seed_trivia(&pool, 8).await;

    let (_, defaulted) = common::get(&app, "/questions").await;
    let (_, explicit) = common::get(&app, "/questions?page=1").await;
    assert_eq!(defaulted["questions"], explicit["questions"]);
}

#[tokio::test]
async fn invalid_and_out_of_range_pages() {
    let (app, pool) = common::test_app().await;
    common::seed_trivia(&pool, 2).await;

    let (status, _) = common::get(&app, "/questions?page=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = common::get(&app, "/questions?page=-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = common::get(&app, "/questions?page=50").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_database_has_no_questions_or_categories() {
    let (app, _pool) = common::test_app().await;

    let (status, _) = common::get(&app, "/questions").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = common::get(&app, "/categories").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn lists_questions_scoped_to_a_category() {
    let (app, pool) = common::test_app().await;
    let (science, _) = common::seed_trivia(&pool, 3).await;

    let (status, body) =
        common::get(&app, &format!("/categories/{}/questions", science)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions"].as_array().unwrap().len(), 3);
    assert_eq!(body["total_questions"], 3);
    assert_eq!(body["current_category"], science);
}

#[tokio::test]
async fn unknown_category_is_unprocessable() {
    let (app, pool) = common::test_app().await;
    common::seed_trivia(&pool, 1).await;

    let (status, body) = common::get(&app, "/categories/999/questions").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status_code"], 422);
}

#[tokio::test]
async fn search_matches_substrings_case_insensitively() {
    let (app, pool) = common::test_app().await;
    common::seed_trivia(&pool, 4).await;

    let (status, body) =
        common::post_json(&app, "/questions", json!({ "searchTerm": "science" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions"].as_array().unwrap().len(), 4);
    assert_eq!(body["total_questions"], 4);
}

#[tokio::test]
async fn search_with_no_matches_is_still_a_success() {
    let (app, pool) = common::test_app().await;
    common::seed_trivia(&pool, 2).await;

    let (status, body) =
        common::post_json(&app, "/questions", json!({ "searchTerm": "zzzz" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions"].as_array().unwrap().len(), 0);
    assert_eq!(body["total_questions"], 0);
}

#[tokio::test]
async fn non_string_search_term_is_rejected() {
    let (app, pool) = common::test_app().await;
    common::seed_trivia(&pool, 1).await;

    let (status, _) = common::post_json(&app, "/questions", json!({ "searchTerm": 7 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn creates_a_question_and_grows_the_total() {
    let (app, pool) = common::test_app().await;
    let (science, _) = common::seed_trivia(&pool, 2).await;

    let (status, body) = common::post_json(
        &app,
        "/questions",
        json!({
            "question": "What boils at 100C?",
            "answer": "Water",
            "difficulty": 1,
            "category": science,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let created = body["created"].as_i64().unwrap();
    assert!(created > 0);
    assert_eq!(body["total_questions"], 5);
    assert_eq!(body["question"]["answer"], "Water");

    // The new question is retrievable on a subsequent page fetch
    let (status, body) = common::get(&app, "/questions?page=1").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_i64().unwrap())
        .collect();
    assert!(ids.contains(&created));
}

#[tokio::test]
async fn create_requires_every_field() {
    let (app, pool) = common::test_app().await;
    let (science, _) = common::seed_trivia(&pool, 1).await;

    for incomplete in [
        json!({ "answer": "a", "difficulty": 1, "category": science }),
        json!({ "question": "q", "difficulty": 1, "category": science }),
        json!({ "question": "q", "answer": "a", "category": science }),
        json!({ "question": "q", "answer": "a", "difficulty": 1 }),
    ] {
        let (status, _) = common::post_json(&app, "/questions", incomplete).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn create_with_unknown_category_is_unprocessable() {
    let (app, pool) = common::test_app().await;
    common::seed_trivia(&pool, 1).await;

    let (status, _) = common::post_json(
        &app,
        "/questions",
        json!({ "question": "q", "answer": "a", "difficulty": 1, "category": 999 }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn deletes_a_question_and_returns_the_remaining_page() {
    let (app, pool) = common::test_app().await;
    let (science, _) = common::seed_trivia(&pool, 6).await;
    let doomed = common::seed_question(&pool, "Doomed", "gone", science, 1).await;

    let (status, body) = common::delete(&app, &format!("/questions/{}", doomed)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], doomed);
    assert_eq!(body["total_questions"], 12);
    assert_eq!(body["questions"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn deleting_the_last_question_on_a_page_is_not_an_error() {
    let (app, pool) = common::test_app().await;
    let science = common::seed_category(&pool, "Science").await;
    let mut ids = Vec::new();
    for i in 0..11 {
        ids.push(common::seed_question(&pool, &format!("q{i}"), "a", science, 1).await);
    }

    let (status, body) =
        common::delete(&app, &format!("/questions/{}?page=2", ids[10])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions"].as_array().unwrap().len(), 0);
    assert_eq!(body["total_questions"], 10);
}

#[tokio::test]
async fn a_bad_page_number_rejects_the_delete_before_it_happens() {
    let (app, pool) = common::test_app().await;
    let science = common::seed_category(&pool, "Science").await;
    let survivor = common::seed_question(&pool, "Still here", "yes", science, 1).await;

    let (status, body) =
        common::delete(&app, &format!("/questions/{}?page=0", survivor)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    // The failed request must not have removed the row
    let (status, body) = common::get(&app, "/questions").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_questions"], 1);
    assert_eq!(body["questions"][0]["id"], survivor);
}

#[tokio::test]
async fn deleting_a_missing_question_is_not_found() {
    let (app, pool) = common::test_app().await;
    common::seed_trivia(&pool, 1).await;

    let (status, _) = common::delete(&app, "/questions/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
