use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use service::users::{NewUser, User};

use super::UserState;
use crate::errors::ApiError;

pub async fn list_users(State(state): State<UserState>) -> Json<Vec<User>> {
    Json(state.users.list_all().await)
}

pub async fn get_user(
    State(state): State<UserState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<User>, ApiError> {
    let Path(id) = path.map_err(|_| ApiError::bad_request("Invalid user ID"))?;
    match state.users.get(id).await {
        Some(user) => Ok(Json(user)),
        None => Err(ApiError::not_found("User not found")),
    }
}

pub async fn create_user(
    State(state): State<UserState>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let Json(input) = payload.map_err(|_| ApiError::invalid_json())?;
    let user = state.users.create(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request},
        Router,
    };
    use common::observability::NoopRecorder;
    use serde_json::{json, Value};
    use service::users::UserRepository;
    use tower::ServiceExt;

    use super::*;
    use crate::routes::{build_cors, build_user_router};

    fn app() -> Router {
        let state = UserState { users: Arc::new(UserRepository::with_fixtures()), metrics: Arc::new(NoopRecorder) };
        build_user_router(state, build_cors())
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut req = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                req = req.header(header::CONTENT_TYPE, "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let resp = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn health_and_listing() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "user-service");

        let (_, body) = send(&app, Method::GET, "/users", None).await;
        let names: Vec<&str> = body.as_array().unwrap().iter().map(|u| u["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["John Doe", "Jane Smith"]);
    }

    #[tokio::test]
    async fn get_user_by_id() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/users/2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "jane@example.com");
        assert!(body["created"].is_string());

        let (status, body) = send(&app, Method::GET, "/users/999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "User not found");

        let (status, body) = send(&app, Method::GET, "/users/nope", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid user ID");
    }

    #[tokio::test]
    async fn create_user_flow() {
        let app = app();
        let (status, body) = send(&app, Method::POST, "/users", Some(json!({"name": "Ada", "email": "ada@example.com"}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], 3);

        let (status, body) = send(&app, Method::POST, "/users", Some(json!({"name": "Ada"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Name and email are required");

        let (status, body) = send(&app, Method::POST, "/users", Some(json!("just a string"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid JSON");
    }
}
