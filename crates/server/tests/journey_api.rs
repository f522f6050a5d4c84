//! Journey API tests.
//!
//! These tests drive the wizard over HTTP with a mock recommender and text
//! source: step-by-step answers, skips, bypass, retry and exit.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use std::time::Duration;
use verse_core::{testing::MockRecommender, text_source::TextPart, RecommendError};

use common::TestFixture;

#[tokio::test]
async fn test_health_endpoint() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/api/v1/health").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["recommender"], "mock");
    assert_eq!(response.body["corpus_size"], 10);
}

#[tokio::test]
async fn test_facets_lists_steps_in_order() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/api/v1/facets").await;
    assert_status!(response, StatusCode::OK);

    let steps = response.body["steps"].as_array().unwrap();
    let facets: Vec<&str> = steps.iter().map(|s| s["facet"].as_str().unwrap()).collect();
    assert_eq!(facets, vec!["theme", "audience", "length", "tone", "location"]);
    assert!(!steps[0]["options"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_journey_awaits_first_facet() {
    let fixture = TestFixture::new().await;
    let response = fixture.post_empty("/api/v1/journeys").await;

    assert_status!(response, StatusCode::CREATED);
    assert!(response.body["id"].is_string());
    assert_eq!(response.body["state"], "awaiting_facet");
    assert_eq!(response.body["step_index"], 0);
    assert_eq!(response.body["total_steps"], 5);
    assert_eq!(response.body["progress"], 0.0);
    assert_eq!(response.body["current_step"]["facet"], "theme");
    assert!(response.body["outcome"].is_null());
}

#[tokio::test]
async fn test_answering_every_step_resolves() {
    let fixture = TestFixture::new().await;
    let id = fixture.start_journey().await;
    let path = format!("/api/v1/journeys/{}/select", id);

    for value in ["knowledge", "believers", "long", "encouragement"] {
        let response = fixture.post(&path, json!({ "value": value })).await;
        assert_status!(response, StatusCode::OK);
        assert!(response.body["outcome"].is_null());
    }

    let response = fixture.post(&path, json!({ "value": "madani" })).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["state"], "complete");
    assert_eq!(response.body["progress"], 1.0);
    assert!(response.body["current_step"].is_null());
    assert_eq!(response.body["selection"]["location"], "madinah");

    let outcome = &response.body["outcome"];
    assert_eq!(outcome["status"], "success");
    assert_eq!(outcome["verse"]["surah_number"], 2);
    assert_eq!(outcome["verse"]["verse_number"], 255);
    assert_eq!(outcome["verse"]["text"], "arabic text for 2:255");
    assert_eq!(
        outcome["verse"]["audio"],
        "https://everyayah.com/data/Alafasy_128kbps/002255.mp3"
    );

    let selections = fixture.recommender.recorded_selections().await;
    assert_eq!(selections.len(), 1);
    assert_eq!(selections[0].len(), 5);
}

#[tokio::test]
async fn test_skip_every_step_resolves_unconstrained() {
    let fixture = TestFixture::new().await;
    let id = fixture.start_journey().await;
    let path = format!("/api/v1/journeys/{}/skip", id);

    let mut response = fixture.post_empty(&path).await;
    for _ in 0..4 {
        response = fixture.post_empty(&path).await;
    }

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["state"], "complete");
    assert_eq!(response.body["outcome"]["status"], "success");
    assert!(fixture.recommender.recorded_selections().await[0].is_empty());
}

#[tokio::test]
async fn test_skip_all_resolves_with_collected_answers() {
    let fixture = TestFixture::new().await;
    let id = fixture.start_journey().await;

    fixture
        .post(
            &format!("/api/v1/journeys/{}/select", id),
            json!({ "value": "patience" }),
        )
        .await;
    let response = fixture
        .post_empty(&format!("/api/v1/journeys/{}/skip-all", id))
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["state"], "bypassed");
    assert_eq!(response.body["step_index"], 1);
    assert_eq!(response.body["selection"]["theme"], "patience");
    assert_eq!(response.body["selection"]["audience"], "");
    assert_eq!(response.body["outcome"]["status"], "success");
    assert_eq!(
        response.body["outcome"]["verse"]["themes"],
        json!(["patience"])
    );
}

#[tokio::test]
async fn test_unknown_value_is_rejected_and_state_kept() {
    let fixture = TestFixture::new().await;
    let id = fixture.start_journey().await;

    let response = fixture
        .post(
            &format!("/api/v1/journeys/{}/select", id),
            json!({ "value": "cooking" }),
        )
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].as_str().unwrap().contains("cooking"));

    let view = fixture.get(&format!("/api/v1/journeys/{}", id)).await;
    assert_eq!(view.body["step_index"], 0);
    assert_eq!(view.body["current_step"]["facet"], "theme");
}

#[tokio::test]
async fn test_stepping_a_terminal_journey_conflicts() {
    let fixture = TestFixture::new().await;
    let id = fixture.start_journey().await;
    fixture
        .post_empty(&format!("/api/v1/journeys/{}/skip-all", id))
        .await;

    let skip = fixture
        .post_empty(&format!("/api/v1/journeys/{}/skip", id))
        .await;
    assert_status!(skip, StatusCode::CONFLICT);

    let select = fixture
        .post(
            &format!("/api/v1/journeys/{}/select", id),
            json!({ "value": "story" }),
        )
        .await;
    assert_status!(select, StatusCode::CONFLICT);

    let skip_all = fixture
        .post_empty(&format!("/api/v1/journeys/{}/skip-all", id))
        .await;
    assert_status!(skip_all, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_unknown_journey_is_not_found() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .get("/api/v1/journeys/550e8400-e29b-41d4-a716-446655440000")
        .await;
    assert_status!(response, StatusCode::NOT_FOUND);

    let response = fixture.post_empty("/api/v1/journeys/not-a-uuid/skip").await;
    assert_status!(response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_recommend_failure_is_reported_then_retried() {
    let fixture = TestFixture::new().await;
    fixture
        .recommender
        .set_next_error(RecommendError::Server {
            status: 500,
            message: "Internal error".into(),
        })
        .await;

    let id = fixture.start_journey().await;
    let response = fixture
        .post_empty(&format!("/api/v1/journeys/{}/skip-all", id))
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["outcome"]["status"], "failure");
    assert_eq!(response.body["outcome"]["kind"], "server_unavailable");
    assert!(response.body["outcome"]["message"].is_string());
    assert!(response.body["outcome"].get("detail").is_none());

    let retry = fixture
        .post_empty(&format!("/api/v1/journeys/{}/retry", id))
        .await;
    assert_status!(retry, StatusCode::OK);
    assert_eq!(retry.body["outcome"]["status"], "success");
    assert_eq!(fixture.recommender.call_count().await, 2);
}

#[tokio::test]
async fn test_retry_before_terminal_conflicts() {
    let fixture = TestFixture::new().await;
    let id = fixture.start_journey().await;

    let response = fixture
        .post_empty(&format!("/api/v1/journeys/{}/retry", id))
        .await;
    assert_status!(response, StatusCode::CONFLICT);
    assert_eq!(fixture.recommender.call_count().await, 0);
}

#[tokio::test]
async fn test_slow_recommender_times_out() {
    let recommender = MockRecommender::with_pairs(&[(2, 255)]);
    recommender.set_delay(Duration::from_secs(30)).await;
    let fixture = TestFixture::with_recommender(recommender).await;

    let id = fixture.start_journey().await;
    let response = fixture
        .post_empty(&format!("/api/v1/journeys/{}/skip-all", id))
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["outcome"]["kind"], "timeout");
}

#[tokio::test]
async fn test_failed_translation_degrades_to_placeholder() {
    let fixture = TestFixture::new().await;
    fixture.text_source.fail_part(TextPart::Translation).await;

    let id = fixture.start_journey().await;
    let response = fixture
        .post_empty(&format!("/api/v1/journeys/{}/skip-all", id))
        .await;

    let outcome = &response.body["outcome"];
    assert_eq!(outcome["status"], "partial_success");
    assert_eq!(outcome["degraded"], json!(["translation"]));
    assert_eq!(
        outcome["verse"]["translation"],
        "Translation is currently unavailable."
    );
    assert_eq!(outcome["verse"]["text"], "arabic text for 2:255");
}

#[tokio::test]
async fn test_delete_exits_journey() {
    let fixture = TestFixture::new().await;
    let id = fixture.start_journey().await;

    let response = fixture.delete(&format!("/api/v1/journeys/{}", id)).await;
    assert_status!(response, StatusCode::NO_CONTENT);

    let response = fixture.get(&format!("/api/v1/journeys/{}", id)).await;
    assert_status!(response, StatusCode::NOT_FOUND);

    let response = fixture.delete(&format!("/api/v1/journeys/{}", id)).await;
    assert_status!(response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_one_shot_resolve() {
    let fixture = TestFixture::new().await;
    let response = fixture
        .post(
            "/api/v1/resolve",
            json!({ "theme": "knowledge", "location": "" }),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], "success");
    assert_eq!(response.body["verse"]["themes"], json!(["knowledge"]));

    let selections = fixture.recommender.recorded_selections().await;
    assert_eq!(selections[0].len(), 1);
}

#[tokio::test]
async fn test_one_shot_resolve_not_found() {
    let fixture = TestFixture::with_recommender(MockRecommender::new()).await;
    let response = fixture.post("/api/v1/resolve", json!({})).await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], "failure");
    assert_eq!(response.body["kind"], "not_found");
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let fixture = TestFixture::new().await;
    fixture.start_journey().await;

    let response = fixture.get("/metrics").await;
    assert_status!(response, StatusCode::OK);
    assert!(response.text.contains("verse_journeys_started_total"));
    assert!(response.text.contains("verse_http_requests_total"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/nowhere").await;
    assert_status!(response, StatusCode::NOT_FOUND);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["error"], "Endpoint not found");
}
