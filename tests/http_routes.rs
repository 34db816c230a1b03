mod common;

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use pet_care_service::app::create_router;
use pet_care_service::app_state::AppState;
use pet_care_service::core::notifier::rules::ReminderThresholds;
use pet_care_service::core::store::Directory;
use pet_care_service::core::store::memory::InMemoryStore;
use serde_json::{Value, json};
use tower::ServiceExt;

use common::*;

const CRON_SECRET: &str = "s3cret";

fn app(store: Arc<InMemoryStore>) -> Router {
    let state = AppState::from_store(
        store,
        Arc::new(StaticTextGenerator(GENERATED_TEXT)),
        chrono_tz::UTC,
        ReminderThresholds::default(),
        Some(CRON_SECRET.to_string()),
    );
    create_router(state).0
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    bearer: Option<&str>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}

#[tokio::test]
async fn health_check_answers_ok() {
    let app = app(Arc::new(InMemoryStore::new()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn created_event_is_linked_from_the_dog() {
    let store = Arc::new(InMemoryStore::new());
    let (user_id, dog_id) = owner_with_dog(&store, "Sam", "Rex").await;
    let app = app(store.clone());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/events/diet",
        Some(json!({
            "userId": user_id,
            "dogId": dog_id,
            "eventDate": "2025-03-01T08:30:00Z",
            "details": { "foodType": "wet", "brandName": "Acme", "quantity": 1.5 },
        })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["category"], "diet");
    assert_eq!(body["eventDate"], "2025-03-01T08:30:00.000Z");
    assert_eq!(body["details"]["brandName"], "Acme");

    let event_id = body["id"].as_str().unwrap().to_string();
    let dog = store.find_dog(&dog_id).await.unwrap().unwrap();
    assert_eq!(dog.diet_event_ids, vec![event_id.clone()]);

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/v1/events/diet/{event_id}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], event_id.as_str());
}

#[tokio::test]
async fn invalid_event_payloads_are_rejected() {
    let store = Arc::new(InMemoryStore::new());
    let (user_id, dog_id) = owner_with_dog(&store, "Sam", "Rex").await;
    let app = app(store);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/events/diet",
        Some(json!({
            "userId": user_id,
            "dogId": dog_id,
            "details": { "foodType": "pizza", "quantity": 1 },
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 40002);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/events/wellness",
        Some(json!({
            "dogId": dog_id,
            "details": { "mentalState": "happy", "severity": 3 },
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/events/grooming",
        Some(json!({ "userId": user_id, "dogId": dog_id, "details": {} })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn events_list_newest_first_and_delete_is_idempotent() {
    let store = Arc::new(InMemoryStore::new());
    let (user_id, dog_id) = owner_with_dog(&store, "Sam", "Rex").await;
    log_exercise(&store, &user_id, &dog_id, days_ago(3)).await;
    log_exercise(&store, &user_id, &dog_id, days_ago(1)).await;
    let app = app(store.clone());

    let (status, _) = send(&app, Method::GET, "/api/v1/events/exercise", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let uri = format!("/api/v1/events/exercise?dogId={dog_id}");
    let (status, body) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    let listed = body.as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed[0]["eventDate"].as_str() > listed[1]["eventDate"].as_str());

    let newest = listed[0]["id"].as_str().unwrap().to_string();
    let delete_uri = format!("/api/v1/events/exercise/{newest}");
    let (status, _) = send(&app, Method::DELETE, &delete_uri, None, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::DELETE, &delete_uri, None, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &delete_uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let dog = store.find_dog(&dog_id).await.unwrap().unwrap();
    assert_eq!(dog.exercise_event_ids.len(), 1);
}

#[tokio::test]
async fn notification_lifecycle() {
    let store = Arc::new(InMemoryStore::new());
    let (user_id, dog_id) = owner_with_dog(&store, "Sam", "Rex").await;
    let app = app(store);

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/v1/notifications",
        Some(json!({
            "userId": user_id,
            "dogId": dog_id,
            "type": "wellness",
            "message": "Rex looked tired today",
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["title"], "Notification");
    assert_eq!(created["message"], "Rex looked tired today");
    assert_eq!(created["read"], false);

    // keep the two createdAt values apart
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let (status, generated) = send(
        &app,
        Method::POST,
        "/api/v1/notifications",
        Some(json!({ "userId": user_id, "dogId": dog_id, "type": "diet" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(generated["title"], "Diet Update Reminder");
    assert_eq!(generated["message"], GENERATED_TEXT);

    let (status, listed) = send(
        &app,
        Method::GET,
        &format!("/api/v1/notifications?userId={user_id}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["id"], generated["id"]);

    let id = created["id"].as_str().unwrap();
    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/notifications/{id}/read"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notificationId"], id);
    assert_eq!(body["read"], true);

    let uri = format!("/api/v1/notifications/{id}");
    let (_, body) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(body["read"], true);

    let (status, _) = send(&app, Method::DELETE, &uri, None, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::DELETE, &uri, None, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 40003);
}

#[tokio::test]
async fn notification_requests_are_validated() {
    let app = app(Arc::new(InMemoryStore::new()));

    let (status, _) = send(&app, Method::GET, "/api/v1/notifications", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/notifications",
        Some(json!({ "userId": "u1", "dogId": "d1", "type": "grooming" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("grooming"));

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/api/v1/notifications/65f000000000000000000000/read",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cron_requires_the_shared_secret() {
    let store = Arc::new(InMemoryStore::new());
    owner_with_dog(&store, "Sam", "Rex").await;
    let app = app(store.clone());

    let (status, _) = send(&app, Method::GET, "/api/v1/cron/daily", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/api/v1/cron/daily", None, Some("nope")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(store.notification_count().await, 0);

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/cron/daily",
        None,
        Some(CRON_SECRET),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["report"]["created"], 4);
    assert_eq!(store.notification_count().await, 4);
}

#[tokio::test]
async fn event_update_replaces_details() {
    let store = Arc::new(InMemoryStore::new());
    let (user_id, dog_id) = owner_with_dog(&store, "Sam", "Rex").await;
    log_diet(&store, &user_id, &dog_id, days_ago(2)).await;
    let app = app(store.clone());

    let (_, listed) = send(
        &app,
        Method::GET,
        &format!("/api/v1/events/diet?dogId={dog_id}"),
        None,
        None,
    )
    .await;
    let original = listed[0].clone();
    let uri = format!("/api/v1/events/diet/{}", original["id"].as_str().unwrap());

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "details": { "foodType": "raw", "brandName": "Acme", "quantity": 4 } })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["details"]["foodType"], "raw");
    assert_eq!(body["details"]["quantity"], 4.0);
    assert_eq!(body["eventDate"], original["eventDate"]);
    assert!(body["updatedAt"].as_str() >= original["updatedAt"].as_str());

    let (status, _) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "details": { "foodType": "pizza", "quantity": 1 } })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/v1/events/diet/65f000000000000000000000",
        Some(json!({ "details": { "foodType": "raw", "quantity": 1 } })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn user_history_spans_dogs_with_names() {
    let store = Arc::new(InMemoryStore::new());
    let (user_id, rex) = owner_with_dog(&store, "Sam", "Rex").await;
    let fido = store
        .insert_dog(pet_care_service::models::dog::Dog {
            name: "Fido".to_string(),
            owner_ids: vec![user_id.clone()],
            ..Default::default()
        })
        .await;
    let (other_user, other_dog) = owner_with_dog(&store, "Kim", "Bolt").await;
    log_diet(&store, &user_id, &rex, days_ago(3)).await;
    log_diet(&store, &user_id, &fido, days_ago(1)).await;
    log_diet(&store, &other_user, &other_dog, days_ago(1)).await;
    let app = app(store);

    let uri = format!("/api/v1/events/diet/by-user?userId={user_id}");
    let (status, body) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|event| event["dogName"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Fido", "Rex"]);
    assert_eq!(body[0]["category"], "diet");

    let (status, _) = send(&app, Method::GET, "/api/v1/events/diet/by-user", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn dashboard_scores_mean_health_severity() {
    let store = Arc::new(InMemoryStore::new());
    let (user_id, dog_id) = owner_with_dog(&store, "Sam", "Rex").await;
    log_exercise(&store, &user_id, &dog_id, days_ago(1)).await;
    let app = app(store);

    for severity in [2, 6] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/events/health",
            Some(json!({
                "userId": user_id,
                "dogId": dog_id,
                "details": { "eventType": "Vet visit", "severity": severity },
            })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let uri = format!("/api/v1/dashboard?userId={user_id}&dogId={dog_id}");
    let (status, body) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalHealthScore"], 4.0);
    assert_eq!(body["activitySummary"].as_array().unwrap().len(), 1);
    assert!(body["dietSummary"].as_array().unwrap().is_empty());

    let uri = format!("/api/v1/dashboard?userId={user_id}");
    let (status, _) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let uri = format!("/api/v1/dashboard?userId=someone-else&dogId={dog_id}");
    let (status, _) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dog_lifecycle() {
    let store = Arc::new(InMemoryStore::new());
    let app = app(store);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/dogs",
        Some(json!({ "userId": "u1", "name": "Rex", "breed": "Beagle", "weight": 0 })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/v1/dogs",
        Some(json!({
            "userId": "u1",
            "name": "Rex",
            "breed": "Beagle",
            "age": 3,
            "sex": "male",
            "weight": 12.5,
            "birthday": "2021-04-02T00:00:00Z",
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["ownerIds"], json!(["u1"]));
    let uri = format!("/api/v1/dogs/{}", created["id"].as_str().unwrap());

    let (status, body) = send(&app, Method::GET, "/api/v1/dogs?userId=u1", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    let (status, _) = send(&app, Method::GET, "/api/v1/dogs", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "weight": 14.0 })), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["weight"], 14.0);
    assert_eq!(body["name"], "Rex");

    let (status, _) = send(&app, Method::DELETE, &uri, None, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::DELETE, &uri, None, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::PUT, &uri, Some(json!({ "name": "Max" })), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
