//! A Serverify-compatible mock server.
//!
//! Sessions are created over the control API under `/session`. Every request
//! sent to `/mock/{name}/...` is recorded against session `name` and can be
//! read back with `GET /session/{name}`.

pub mod config;

use std::{collections::HashMap, sync::Arc};

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

pub use config::Config;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionBody {
    pub session: String,
}

/// One request received on a session's mock endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct History {
    pub method: String,
    pub headers: HashMap<String, String>,
    pub path: String,
    pub query: HashMap<String, String>,
    pub body: String,
    #[serde(rename = "requestedAt")]
    pub requested_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Histories {
    pub histories: Vec<History>,
}

/// Failures rendered as `{"serverify_error": {"message": ...}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    AlreadyExists(String),
    NotFound(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::AlreadyExists(_) => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::AlreadyExists(name) => format!("session \"{name}\" is already exists"),
            ApiError::NotFound(name) => format!("session \"{name}\" is not found"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "serverify_error": { "message": self.message() } });
        (self.status(), Json(body)).into_response()
    }
}

pub type Db = Arc<RwLock<HashMap<String, Vec<History>>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/session", post(create_session))
        .route("/session/{name}", get(get_session).delete(delete_session))
        .route("/mock/{name}", any(mock_root))
        .route("/mock/{name}/{*path}", any(mock_path))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn create_session(
    State(db): State<Db>,
    Json(input): Json<SessionBody>,
) -> Result<(StatusCode, Json<SessionBody>), ApiError> {
    let mut sessions = db.write().await;
    if sessions.contains_key(&input.session) {
        return Err(ApiError::AlreadyExists(input.session));
    }
    sessions.insert(input.session.clone(), Vec::new());
    tracing::info!(session = %input.session, "session created");
    Ok((StatusCode::ACCEPTED, Json(input)))
}

async fn get_session(
    State(db): State<Db>,
    Path(name): Path<String>,
) -> Result<Json<Histories>, ApiError> {
    let sessions = db.read().await;
    let histories = sessions.get(&name).cloned().ok_or(ApiError::NotFound(name))?;
    Ok(Json(Histories { histories }))
}

async fn delete_session(
    State(db): State<Db>,
    Path(name): Path<String>,
) -> Result<Json<SessionBody>, ApiError> {
    let mut sessions = db.write().await;
    if sessions.remove(&name).is_none() {
        return Err(ApiError::NotFound(name));
    }
    tracing::info!(session = %name, "session deleted");
    Ok(Json(SessionBody { session: name }))
}

async fn mock_root(
    State(db): State<Db>,
    Path(name): Path<String>,
    method: Method,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, ApiError> {
    record(&db, name, "/".to_string(), method, &headers, query, &body).await
}

async fn mock_path(
    State(db): State<Db>,
    Path((name, path)): Path<(String, String)>,
    method: Method,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, ApiError> {
    record(&db, name, format!("/{path}"), method, &headers, query, &body).await
}

async fn record(
    db: &Db,
    name: String,
    path: String,
    method: Method,
    headers: &HeaderMap,
    query: Vec<(String, String)>,
    body: &[u8],
) -> Result<Json<serde_json::Value>, ApiError> {
    let history = History {
        method: method.as_str().to_string(),
        headers: first_header_values(headers),
        path,
        query: first_values(query),
        body: String::from_utf8_lossy(body).into_owned(),
        requested_at: Utc::now(),
    };

    let mut sessions = db.write().await;
    let histories = sessions
        .get_mut(&name)
        .ok_or_else(|| ApiError::NotFound(name.clone()))?;
    tracing::debug!(session = %name, method = %history.method, path = %history.path, "mock request recorded");
    histories.push(history);
    Ok(Json(serde_json::json!({})))
}

fn first_header_values(headers: &HeaderMap) -> HashMap<String, String> {
    let mut out = HashMap::new();
    for (name, value) in headers {
        if let Ok(value) = value.to_str() {
            out.entry(name.as_str().to_string())
                .or_insert_with(|| value.to_string());
        }
    }
    out
}

fn first_values(pairs: Vec<(String, String)>) -> HashMap<String, String> {
    let mut out = HashMap::new();
    for (key, value) in pairs {
        out.entry(key).or_insert(value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_serializes_requested_at_in_rfc3339() {
        let history = History {
            method: "POST".to_string(),
            headers: HashMap::new(),
            path: "/test".to_string(),
            query: HashMap::new(),
            body: "[1, 2]".to_string(),
            requested_at: "2024-07-01T15:00:00Z".parse().unwrap(),
        };
        let json = serde_json::to_value(&history).unwrap();
        assert_eq!(json["requestedAt"], "2024-07-01T15:00:00Z");
        assert_eq!(json["body"], "[1, 2]");
    }

    #[test]
    fn error_messages_name_the_session() {
        assert_eq!(
            ApiError::AlreadyExists("a".to_string()).message(),
            "session \"a\" is already exists"
        );
        assert_eq!(ApiError::NotFound("a".to_string()).message(), "session \"a\" is not found");
        assert_eq!(ApiError::NotFound("a".to_string()).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn first_query_value_wins() {
        let query = first_values(vec![
            ("k".to_string(), "1".to_string()),
            ("k".to_string(), "2".to_string()),
            ("j".to_string(), "3".to_string()),
        ]);
        assert_eq!(query["k"], "1");
        assert_eq!(query["j"], "3");
    }

    #[test]
    fn session_body_rejects_missing_name() {
        let result: Result<SessionBody, _> = serde_json::from_str(r#"{"name":"x"}"#);
        assert!(result.is_err());
    }
}
