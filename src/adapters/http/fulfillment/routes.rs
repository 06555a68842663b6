//! Axum routes for the conversation webhook.

use std::sync::Arc;

use axum::routing::post;
use axum::Router;
use tower_http::trace::TraceLayer;

use super::handlers::{fulfill, FulfillmentAppState};
use crate::adapters::actions::ActionsApp;

/// Path the platform posts conversation requests to.
pub fn fulfillment_path(bot_id: &str) -> String {
    format!("/{}/fulfillment", bot_id)
}

/// Creates the fulfillment router for `bot_id`.
///
/// - POST /{bot_id}/fulfillment - Run one conversation turn
pub fn fulfillment_router(bot_id: &str, app: Arc<ActionsApp>) -> Router {
    Router::new()
        .route(&fulfillment_path(bot_id), post(fulfill))
        .with_state(FulfillmentAppState::new(app))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::actions::{ActionsAppOptions, AppResponse, MAIN_INTENT};
    use crate::domain::conversation::Conversation;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn echo_app() -> Arc<ActionsApp> {
        Arc::new(ActionsApp::new(ActionsAppOptions::default()).intent(
            MAIN_INTENT,
            |conversation: Arc<Conversation>, query: Option<String>| async move {
                conversation.ask(query.unwrap_or_default());
                Ok(())
            },
        ))
    }

    fn post_json(uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn path_is_scoped_by_bot_id() {
        assert_eq!(fulfillment_path("MyBot"), "/MyBot/fulfillment");
    }

    #[tokio::test]
    async fn fulfillment_answers_with_app_response() {
        let app = fulfillment_router("MyBot", echo_app());
        let body = json!({
            "conversation": { "conversationId": "ABCDEFGH", "type": "NEW" },
            "inputs": [{ "intent": MAIN_INTENT, "rawInputs": [{ "query": "hello" }] }]
        });

        let response = app
            .oneshot(post_json("/MyBot/fulfillment", body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let parsed: AppResponse = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(parsed.texts(), vec!["hello"]);
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let app = fulfillment_router("MyBot", echo_app());

        let response = app
            .oneshot(post_json("/MyBot/fulfillment", "{not json".to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn unknown_intent_is_not_found() {
        let app = fulfillment_router("MyBot", echo_app());
        let body = json!({ "inputs": [{ "intent": "actions.intent.OPTION" }] });

        let response = app
            .oneshot(post_json("/MyBot/fulfillment", body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn other_bot_path_is_not_routed() {
        let app = fulfillment_router("MyBot", echo_app());

        let response = app
            .oneshot(post_json("/OtherBot/fulfillment", "{}".to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
