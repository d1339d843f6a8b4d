use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use solace_api::ai::{AiError, AnalysisService, AudioAnalysis, TextAnalysis};
use solace_api::config::Config;
use solace_api::models::entry::{EntryType, NewJournalEntry};
use solace_api::models::mood::Mood;
use solace_api::models::profile::{AiTone, Profile};
use solace_api::routes::router;
use solace_api::services::Services;
use solace_api::store::memory::InMemoryStore;
use solace_api::store::EntryStore;
use solace_api::AppState;

const SECRET: &str = "integration-secret";

struct FixedAnalysis;

#[async_trait]
impl AnalysisService for FixedAnalysis {
    async fn analyze_text(&self, text: &str, tone: AiTone) -> Result<TextAnalysis, AiError> {
        Ok(TextAnalysis {
            mood: Mood::Happy,
            response: format!("({}) noted", tone.as_str()),
            summary: text.to_string(),
            highlights: vec![],
            happiness_score: Some(7.0),
        })
    }

    async fn analyze_audio(
        &self,
        _audio: &[u8],
        _mime_type: &str,
        _tone: AiTone,
    ) -> Result<AudioAnalysis, AiError> {
        Err(AiError::Reported("audio not supported in tests".into()))
    }
}

fn config() -> Config {
    Config {
        database_url: String::new(),
        host: "127.0.0.1".into(),
        port: 0,
        frontend_url: "http://localhost:5173".into(),
        auth_jwt_secret: SECRET.into(),
        auth_jwt_audience: None,
        ai_service_url: String::new(),
        ai_timeout_secs: 1,
        ai_model_version: "test-model".into(),
        rewind_window_days: 5,
        happiness_lookback_days: 30,
    }
}

fn app(store: Arc<InMemoryStore>) -> Router {
    let services = Services::new(store, Arc::new(FixedAnalysis), "test-model");
    router(AppState {
        config: Arc::new(config()),
        services,
    })
}

fn token(user_id: Uuid, email: Option<&str>) -> String {
    let claims = json!({ "sub": user_id, "email": email, "exp": Utc::now().timestamp() + 3600 });
    encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap()
}

async fn send(app: &Router, user_id: Uuid, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    send_with_token(app, &token(user_id, None), method, uri, body).await
}

async fn send_with_token(
    app: &Router,
    token: &str,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"));
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn protected_routes_require_a_bearer_token() {
    let app = app(Arc::new(InMemoryStore::new()));
    let response = app
        .oneshot(Request::builder().uri("/api/entries").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_and_readiness() {
    let store = Arc::new(InMemoryStore::new());
    let app = app(store.clone());

    let ok = app
        .clone()
        .oneshot(Request::builder().uri("/readyz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);

    store.set_offline(true);
    let down = app
        .oneshot(Request::builder().uri("/readyz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(down.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn submitted_entry_feeds_the_daily_rollup_and_happiness_index() {
    let app = app(Arc::new(InMemoryStore::new()));
    let user = Uuid::new_v4();

    let (status, created) = send(
        &app,
        user,
        "POST",
        "/api/entries",
        Some(json!({ "content": "A long walk in the sun" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["entry"]["mood"], "happy");
    assert_eq!(created["entry"]["word_count"], 6);
    assert_eq!(created["used_fallback"], false);

    let (_, rows) = send(&app, user, "GET", "/api/analytics/moods", None).await;
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["entry_count"], 1);
    assert_eq!(rows[0]["mood_distribution"], json!({ "happy": 1, "neutral": 0, "sad": 0 }));

    let (_, happiness) = send(&app, user, "GET", "/api/analytics/happiness", None).await;
    assert_eq!(happiness["happiness_index"], 7.0);
    assert_eq!(happiness["is_fallback"], false);

    let id = created["entry"]["id"].as_str().unwrap().to_string();
    let (status, _) = send(&app, user, "DELETE", &format!("/api/entries/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, user, "GET", &format!("/api/entries/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn happiness_without_data_reports_the_display_midpoint() {
    let app = app(Arc::new(InMemoryStore::new()));
    let (status, body) = send(&app, Uuid::new_v4(), "GET", "/api/analytics/happiness?days=7", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["happiness_index"], 5.0);
    assert_eq!(body["is_fallback"], true);
    assert_eq!(body["days"], 7);
}

#[tokio::test]
async fn empty_entry_is_rejected() {
    let app = app(Arc::new(InMemoryStore::new()));
    let (status, body) = send(&app, Uuid::new_v4(), "POST", "/api/entries", Some(json!({}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], 422);
}

#[tokio::test]
async fn rewind_for_an_empty_month_is_stored_once() {
    let app = app(Arc::new(InMemoryStore::new()));
    let user = Uuid::new_v4();

    let (status, first) = send(&app, user, "GET", "/api/rewinds/2026/4", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["total_entries"], 0);
    assert_eq!(first["average_happiness_index"], Value::Null);
    assert_eq!(first["key_insights"], json!([]));

    let (_, second) = send(&app, user, "GET", "/api/rewinds/2026/4", None).await;
    assert_eq!(first["id"], second["id"]);

    let (status, _) = send(&app, user, "GET", "/api/rewinds/2026/13", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn birthday_is_celebrated_once_per_year() {
    let store = Arc::new(InMemoryStore::new());
    let user = Uuid::new_v4();
    store
        .put_profile(Profile {
            id: user,
            full_name: "Grace Hopper".into(),
            email: "grace@example.com".into(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 3, 15).unwrap(),
            timezone: None,
            created_at: Utc::now(),
        })
        .await;
    let app = app(store.clone());

    let (_, other_day) = send(&app, user, "GET", "/api/birthday?today=2026-03-14", None).await;
    assert_eq!(other_day, json!({ "status": "no_celebration" }));

    let (status, first) = send(&app, user, "GET", "/api/birthday?today=2026-03-15", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["status"], "celebration");
    assert_eq!(first["celebration"]["celebration_year"], 2026);

    let (_, again) = send(&app, user, "GET", "/api/birthday?today=2026-03-15", None).await;
    assert_eq!(first, again);
    assert_eq!(store.celebration_count().await, 1);
}

fn stored_entry(user_id: Uuid, mood: Mood, score: Option<f64>, created_at: DateTime<Utc>) -> NewJournalEntry {
    NewJournalEntry {
        user_id,
        content: format!("{mood:?} day"),
        mood,
        happiness_score: score,
        ai_response: None,
        summary: None,
        highlights: vec![],
        word_count: 2,
        entry_type: EntryType::Text,
        transcription: None,
        created_at,
    }
}

#[tokio::test]
async fn happiness_lookback_past_the_calendar_range_is_rejected() {
    let app = app(Arc::new(InMemoryStore::new()));
    let (status, body) = send(
        &app,
        Uuid::new_v4(),
        "GET",
        "/api/analytics/happiness?today=-262143-01-01&days=30",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], 422);

    let (status, _) = send(&app, Uuid::new_v4(), "GET", "/api/analytics/happiness?days=0", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn summary_by_window_and_by_month() {
    let store = Arc::new(InMemoryStore::new());
    let user = Uuid::new_v4();
    for (created_at, mood, score) in [
        (Utc.with_ymd_and_hms(2026, 2, 28, 23, 59, 59).unwrap(), Mood::Sad, Some(1.0)),
        (Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap(), Mood::Happy, Some(8.0)),
        (Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap(), Mood::Happy, Some(6.0)),
        (Utc.with_ymd_and_hms(2026, 3, 20, 9, 0, 0).unwrap(), Mood::Neutral, None),
        (Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap(), Mood::Sad, Some(2.0)),
    ] {
        store.insert_entry(stored_entry(user, mood, score, created_at)).await.unwrap();
    }
    let app = app(store);

    // `since` inclusive, `until` exclusive.
    let (status, window) = send(
        &app,
        user,
        "GET",
        "/api/analytics/summary?since=2026-03-01T00:00:00Z&until=2026-03-20T09:00:00Z",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(window["total_entries"], 2);
    assert_eq!(window["mood_summary"], json!({ "happy": 2, "neutral": 0, "sad": 0 }));
    assert_eq!(window["percentages"], json!({ "happy": 100, "neutral": 0, "sad": 0 }));
    assert_eq!(window["happiness_index"], 7.0);
    assert!(window.get("reflection").is_none());

    let (status, month) = send(&app, user, "GET", "/api/analytics/summary?year=2026&month=3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(month["total_entries"], 3);
    assert_eq!(month["dominant_mood"], "happy");
    assert_eq!(month["percentages"], json!({ "happy": 67, "neutral": 33, "sad": 0 }));
    assert_eq!(month["happiness_index"], 7.0);
    assert!(month["reflection"]
        .as_str()
        .unwrap()
        .starts_with("This was a positive month for you! You logged 3 entries"));

    let (status, _) = send(&app, user, "GET", "/api/analytics/summary?year=2026", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let (status, _) = send(&app, user, "GET", "/api/analytics/summary?month=3", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let (status, _) = send(&app, user, "GET", "/api/analytics/summary?year=2026&month=13", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn saved_profile_drives_the_birthday_check() {
    let app = app(Arc::new(InMemoryStore::new()));
    let user = Uuid::new_v4();
    let bearer = token(user, Some("ada@example.com"));

    let (status, _) = send_with_token(&app, &bearer, "GET", "/api/profile", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, saved) = send_with_token(
        &app,
        &bearer,
        "PUT",
        "/api/profile",
        Some(json!({ "fullName": "Ada", "dateOfBirth": "1990-03-15", "timezone": "Europe/London" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["email"], "ada@example.com");

    let (_, fetched) = send_with_token(&app, &bearer, "GET", "/api/profile", None).await;
    assert_eq!(fetched["timezone"], "Europe/London");
    assert_eq!(fetched["created_at"], saved["created_at"]);

    let (_, outcome) = send(&app, user, "GET", "/api/birthday?today=2026-03-15", None).await;
    assert_eq!(outcome["status"], "celebration");
    assert!(outcome["celebration"]["special_message"].as_str().unwrap().contains("Ada"));

    // No email in the token or the body.
    let (status, _) = send(
        &app,
        Uuid::new_v4(),
        "PUT",
        "/api/profile",
        Some(json!({ "fullName": "Nobody", "dateOfBirth": "1990-01-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn preferred_tone_reaches_the_analysis_service() {
    let app = app(Arc::new(InMemoryStore::new()));
    let user = Uuid::new_v4();

    let (status, _) = send(&app, user, "PUT", "/api/preferences", Some(json!({ "aiTone": "cheerful" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send(
        &app,
        user,
        "PUT",
        "/api/profile",
        Some(json!({ "fullName": "Ada", "email": "ada@example.com", "dateOfBirth": "1990-03-15" })),
    )
    .await;
    let (_, defaults) = send(&app, user, "GET", "/api/preferences", None).await;
    assert_eq!(defaults["ai_tone"], "calm");

    let (status, updated) = send(&app, user, "PUT", "/api/preferences", Some(json!({ "aiTone": "cheerful" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["ai_tone"], "cheerful");

    let (_, created) = send(&app, user, "POST", "/api/entries", Some(json!({ "content": "Sunny" }))).await;
    assert_eq!(created["entry"]["ai_response"], "(cheerful) noted");
}

#[tokio::test]
async fn prompts_and_wellness_round_trip_through_the_router() {
    let store = Arc::new(InMemoryStore::new());
    store.put_prompt("What are you grateful for?", true).await;
    let app = app(store);
    let user = Uuid::new_v4();

    let (_, random) = send(&app, user, "GET", "/api/prompts/random", None).await;
    assert_eq!(random["prompt"]["prompt_text"], "What are you grateful for?");
    assert_eq!(random["prompt"]["usage_count"], 1);
    let (_, listed) = send(&app, user, "GET", "/api/prompts?limit=5", None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    let (status, _) = send(&app, user, "GET", "/api/prompts?limit=0", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app,
        user,
        "PUT",
        "/api/wellness",
        Some(json!({ "date": "2026-03-09", "today": "2026-03-10", "sleepHours": 7.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, merged) = send(
        &app,
        user,
        "PUT",
        "/api/wellness",
        Some(json!({ "date": "2026-03-09", "today": "2026-03-10", "exerciseMinutes": 30 })),
    )
    .await;
    assert_eq!(merged["sleep_hours"], 7.5);
    assert_eq!(merged["exercise_minutes"], 30);

    let (status, _) = send(
        &app,
        user,
        "PUT",
        "/api/wellness",
        Some(json!({ "today": "2026-03-10", "sleepHours": 30.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, rows) = send(&app, user, "GET", "/api/wellness?start_date=2026-03-01&end_date=2026-03-31", None).await;
    assert_eq!(rows.as_array().unwrap().len(), 1);
}
