use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::json;
use tracing::error;

use super::domain::{PreferencesPatch, SyncRequest};
use super::repository::UserRepository;
use super::service::{UserService, UserServiceError};

/// Router builder for `/api/users`.
pub fn user_router<R>(service: Arc<UserService<R>>) -> Router
where
    R: UserRepository + 'static,
{
    Router::new()
        .route("/api/users/sync", post(sync_handler::<R>))
        .route(
            "/api/users/:uid/preferences",
            get(preferences_handler::<R>).put(update_preferences_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn sync_handler<R>(
    State(service): State<Arc<UserService<R>>>,
    Json(request): Json<SyncRequest>,
) -> Response
where
    R: UserRepository + 'static,
{
    match service.sync(request, Utc::now()) {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(err) => service_error(err),
    }
}

pub(crate) async fn preferences_handler<R>(
    State(service): State<Arc<UserService<R>>>,
    Path(uid): Path<String>,
) -> Response
where
    R: UserRepository + 'static,
{
    match service.preferences(&uid) {
        Ok(preferences) => (StatusCode::OK, Json(preferences)).into_response(),
        Err(err) => service_error(err),
    }
}

pub(crate) async fn update_preferences_handler<R>(
    State(service): State<Arc<UserService<R>>>,
    Path(uid): Path<String>,
    Json(patch): Json<PreferencesPatch>,
) -> Response
where
    R: UserRepository + 'static,
{
    match service.update_preferences(&uid, patch, Utc::now()) {
        Ok(preferences) => (StatusCode::OK, Json(preferences)).into_response(),
        Err(err) => service_error(err),
    }
}

fn service_error(err: UserServiceError) -> Response {
    let status = match &err {
        UserServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        UserServiceError::Repository(_) => {
            error!(error = %err, "user request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::InMemoryUserRepository;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde_json::Value;
    use tower::ServiceExt;

    fn router() -> Router {
        user_router(Arc::new(UserService::new(Arc::new(
            InMemoryUserRepository::default(),
        ))))
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn sync_route_returns_user_document() {
        let response = router()
            .oneshot(
                Request::post("/api/users/sync")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({ "firebaseUID": "uid-1", "email": "ada@example.com" }).to_string(),
                    ))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let user = json_body(response).await;
        assert_eq!(user["firebaseUID"], "uid-1");
        assert_eq!(user["preferences"]["loanPreference"], "lowestEMI");
        assert!(user["age"].is_null());
    }

    #[tokio::test]
    async fn sync_route_rejects_incomplete_payload() {
        let response = router()
            .oneshot(
                Request::post("/api/users/sync")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(json!({ "firebaseUID": "uid-1" }).to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["error"],
            "firebaseUID and email are required"
        );
    }

    #[tokio::test]
    async fn preferences_round_trip_through_put_and_get() {
        let router = router();

        let put = router
            .clone()
            .oneshot(
                Request::put("/api/users/uid-3/preferences")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({ "loanPreference": "lowestInterest" }).to_string(),
                    ))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(put.status(), StatusCode::OK);

        let get = router
            .oneshot(
                Request::get("/api/users/uid-3/preferences")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(
            json_body(get).await,
            json!({ "loanPreference": "lowestInterest" })
        );
    }
}
