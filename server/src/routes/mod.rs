//! HTTP route definitions.

mod board;
mod health;

use crate::AppState;
use axum::Router;

/// Create all application routes.
pub fn create_routes() -> Router<AppState> {
    Router::new().merge(health::routes()).merge(board::routes())
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::storage::MemoryStore;
    use crate::{build_app, AppState};
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use axum::Router;
    use cronos_engine::{Board, Event, EventKind};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const D1: &str = "2024-05-01";
    const D2: &str = "2024-05-02";

    async fn test_app(events: Vec<Event>) -> (Router, AppState) {
        let store = MemoryStore::new();
        for event in &events {
            store.upsert_event(event.clone()).await.unwrap();
        }
        store.seed_templates().await.unwrap();

        let state = AppState::new(Board::from_events(events), store, Config::default());
        (build_app(state.clone()), state)
    }

    fn three_on_d1() -> Vec<Event> {
        vec![
            Event::new("e0", D1, EventKind::Due, "Card A").with_rank(0),
            Event::new("e1", D1, EventKind::Due, "Card B").with_rank(1),
            Event::new("e2", D1, EventKind::Due, "Card C").with_rank(2),
        ]
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    fn ids(value: &Value) -> Vec<String> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["id"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (app, _) = test_app(Vec::new()).await;

        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["persistent"], false);
    }

    #[tokio::test]
    async fn move_within_day_persists_change_set() {
        let (app, state) = test_app(three_on_d1()).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/events/e0/move",
            Some(json!({ "targetDate": D1, "targetIndex": 2 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["changed"].as_array().unwrap().len(), 3);
        assert!(body["failed"].as_array().unwrap().is_empty());

        let (_, day) = send(&app, Method::GET, &format!("/days/{D1}"), None).await;
        assert_eq!(ids(&day["events"]), vec!["e1", "e2", "e0"]);

        let stored = state.store.list_events().await.unwrap();
        let e0 = stored.iter().find(|e| e.id.as_str() == "e0").unwrap();
        assert_eq!(e0.rank, Some(2));
    }

    #[tokio::test]
    async fn move_across_days() {
        let mut events = three_on_d1();
        events.push(Event::new("e3", D2, EventKind::Push, "Promo").with_rank(0));
        let (app, _) = test_app(events).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/events/e1/move",
            Some(json!({ "targetDate": D2, "targetIndex": 0 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["changed"].as_array().unwrap().len(), 3);

        let (_, d1) = send(&app, Method::GET, &format!("/days/{D1}"), None).await;
        let (_, d2) = send(&app, Method::GET, &format!("/days/{D2}"), None).await;
        assert_eq!(ids(&d1["events"]), vec!["e0", "e2"]);
        assert_eq!(ids(&d2["events"]), vec!["e1", "e3"]);
    }

    #[tokio::test]
    async fn move_in_place_writes_nothing() {
        let (app, _) = test_app(three_on_d1()).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/events/e1/move",
            Some(json!({ "targetDate": D1, "targetIndex": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["changed"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_from_template_appends() {
        let (app, state) = test_app(three_on_d1()).await;
        let template = state.store.list_templates().await.unwrap().remove(0);

        let (status, body) = send(
            &app,
            Method::POST,
            "/events",
            Some(json!({ "date": D1, "templateId": template.id })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["order"], 3);
        assert_eq!(body["templateId"], template.id.as_str());
        assert!(!body["id"].as_str().unwrap().is_empty());

        assert_eq!(state.board.lock().await.day(&D1.into()).len(), 4);
    }

    #[tokio::test]
    async fn create_validates_input() {
        let (app, _) = test_app(Vec::new()).await;

        let (status, _) = send(
            &app,
            Method::POST,
            "/events",
            Some(json!({ "date": D1, "title": "  " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            Method::POST,
            "/events",
            Some(json!({ "date": D1, "templateId": "missing" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_closes_gap() {
        let (app, state) = test_app(three_on_d1()).await;

        let (status, body) = send(&app, Method::DELETE, "/events/e0", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["removed"]["id"], "e0");
        assert_eq!(ids(&body["changed"]), vec!["e1", "e2"]);

        let stored = state.store.list_events().await.unwrap();
        assert_eq!(stored.len(), 2);
        let ranks: Vec<_> = stored.iter().map(|e| (e.id.as_str(), e.rank)).collect();
        assert_eq!(ranks, vec![("e1", Some(0)), ("e2", Some(1))]);

        let (status, _) = send(&app, Method::DELETE, "/events/e0", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn completed_flag_updates_summary() {
        let (app, _) = test_app(three_on_d1()).await;

        let (status, body) = send(
            &app,
            Method::PUT,
            "/events/e2/completed",
            Some(json!({ "completed": true })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isCompleted"], true);

        let (status, body) = send(&app, Method::GET, "/calendar/2024/5", None).await;
        assert_eq!(status, StatusCode::OK);
        let days = body["days"].as_array().unwrap();
        assert_eq!(days.len(), 42);
        let first = days.iter().find(|d| d["date"] == D1).unwrap();
        assert_eq!(first["total"], 3);
        assert_eq!(first["active"], 2);
    }

    #[tokio::test]
    async fn invalid_month_is_bad_request() {
        let (app, _) = test_app(Vec::new()).await;

        let (status, _) = send(&app, Method::GET, "/calendar/2024/13", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn templates_and_snapshot() {
        let (app, _) = test_app(three_on_d1()).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/templates",
            Some(json!({ "type": "closing", "title": "Fatura", "content": "Sua fatura fechou" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["titleColor"], "yellow");

        let (status, _) =
            send(&app, Method::POST, "/templates", Some(json!({ "title": "" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, templates) = send(&app, Method::GET, "/templates", None).await;
        assert_eq!(templates.as_array().unwrap().len(), 4);

        let (status, snapshot) = send(&app, Method::GET, "/snapshot", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(snapshot["events"].as_array().unwrap().len(), 3);
        assert_eq!(snapshot["templates"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn update_template_keeps_id_and_events() {
        let (app, state) = test_app(Vec::new()).await;
        let template = state.store.list_templates().await.unwrap().remove(0);

        let (_, created) = send(
            &app,
            Method::POST,
            "/events",
            Some(json!({ "date": D1, "templateId": template.id })),
        )
        .await;

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/templates/{}", template.id),
            Some(json!({ "type": "due", "title": "Boleto", "content": "Pague hoje" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], template.id.as_str());
        assert_eq!(body["title"], "Boleto");
        assert_eq!(body["titleColor"], "red");
        assert_eq!(state.store.list_templates().await.unwrap().len(), 3);

        let (_, events) = send(&app, Method::GET, "/events", None).await;
        assert_eq!(events[0]["title"], template.title.as_str());
        assert_eq!(events[0]["customContent"], created["customContent"]);
        assert_ne!(events[0]["customContent"], "Pague hoje");
    }

    #[tokio::test]
    async fn update_template_rejects_bad_input() {
        let (app, state) = test_app(Vec::new()).await;
        let template = state.store.list_templates().await.unwrap().remove(0);

        let (status, _) = send(
            &app,
            Method::PUT,
            "/templates/missing",
            Some(json!({ "title": "Boleto" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            Method::PUT,
            &format!("/templates/{}", template.id),
            Some(json!({ "title": "   " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            state.store.get_template(&template.id).await.unwrap(),
            Some(template)
        );
    }

    #[tokio::test]
    async fn delete_template() {
        let (app, state) = test_app(Vec::new()).await;
        let template = state.store.list_templates().await.unwrap().remove(0);
        let uri = format!("/templates/{}", template.id);

        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(state.store.list_templates().await.unwrap().len(), 2);

        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
