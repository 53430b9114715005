//! In-process mock of the dashboard backend.
//!
//! Serves `/api/{entity}` collections from memory on an ephemeral port so
//! the client can be exercised over real HTTP.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{FromRequest, Multipart, Path, Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use planboard_client::{ApiClient, ClientConfig};
use serde_json::{json, Value};

/// A request as seen by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct Seen {
    pub method: String,
    pub path: String,
}

#[derive(Default)]
pub struct MockState {
    pub records: HashMap<String, Vec<Value>>,
    pub next_id: i64,
    pub seen: Vec<Seen>,
    pub last_auth: Option<String>,
    pub last_upload: Option<UploadedFile>,
    /// Every request fails with this status and body.
    pub fail: Option<(StatusCode, String)>,
    /// Lists are wrapped as `{ "data": [...] }`.
    pub wrap_lists: bool,
    /// Mutations answer `{ "message": ... }` instead of the record.
    pub ack_only: bool,
    /// Delay applied to mutations.
    pub mutation_delay: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub field: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub size: usize,
}

pub type Shared = Arc<Mutex<MockState>>;

pub struct MockBackend {
    pub base_url: String,
    pub state: Shared,
}

impl MockBackend {
    pub async fn start() -> Self {
        Self::start_with(MockState::default()).await
    }

    pub async fn start_with(state: MockState) -> Self {
        let state = Arc::new(Mutex::new(state));
        let app = Router::new()
            .route("/api/{entity}", get(list_items).post(create_item))
            .route("/api/{entity}/{id}", put(update_item).delete(delete_item))
            .route("/api/{entity}/{id}/upload", put(confirm_upload))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn api(&self) -> ApiClient {
        let config = ClientConfig {
            base_url: self.base_url.clone(),
            ..ClientConfig::default()
        };
        ApiClient::new(&config).unwrap()
    }

    /// Put records into a collection, assigning ids.
    pub fn seed(&self, entity: &str, items: Vec<Value>) {
        let mut state = self.state.lock().unwrap();
        for mut item in items {
            state.next_id += 1;
            item["id"] = json!(state.next_id);
            state.records.entry(entity.to_string()).or_default().push(item);
        }
    }

    pub fn items(&self, entity: &str) -> Vec<Value> {
        let state = self.state.lock().unwrap();
        state.records.get(entity).cloned().unwrap_or_default()
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.state.lock().unwrap().seen.clone()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.seen()
            .iter()
            .filter(|s| s.method == method && s.path == path)
            .count()
    }

    pub fn set_fail(&self, status: StatusCode, body: &str) {
        self.state.lock().unwrap().fail = Some((status, body.to_string()));
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn record(state: &Shared, method: &str, path: String, headers: &HeaderMap) -> Option<Response> {
    let mut s = state.lock().unwrap();
    s.seen.push(Seen {
        method: method.to_string(),
        path,
    });
    s.last_auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    s.fail
        .clone()
        .map(|(status, body)| (status, body).into_response())
}

async fn mutation_delay(state: &Shared) {
    let delay = state.lock().unwrap().mutation_delay;
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
}

fn mutation_reply(state: &Shared, status: StatusCode, item: Value) -> Response {
    if state.lock().unwrap().ack_only {
        (status, Json(json!({ "message": "ok" }))).into_response()
    } else {
        (status, Json(item)).into_response()
    }
}

async fn list_items(
    State(state): State<Shared>,
    Path(entity): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Some(fail) = record(&state, "GET", format!("/api/{entity}"), &headers) {
        return fail;
    }
    let s = state.lock().unwrap();
    let items = Value::Array(s.records.get(&entity).cloned().unwrap_or_default());
    if s.wrap_lists {
        Json(json!({ "data": items })).into_response()
    } else {
        Json(items).into_response()
    }
}

async fn create_item(
    State(state): State<Shared>,
    Path(entity): Path<String>,
    headers: HeaderMap,
    req: Request,
) -> Response {
    if let Some(fail) = record(&state, "POST", format!("/api/{entity}"), &headers) {
        return fail;
    }
    mutation_delay(&state).await;

    let mut item = match read_body(&state, &headers, req).await {
        Ok(item) => item,
        Err(resp) => return resp,
    };

    let mut s = state.lock().unwrap();
    s.next_id += 1;
    item["id"] = json!(s.next_id);
    s.records.entry(entity).or_default().push(item.clone());
    drop(s);

    mutation_reply(&state, StatusCode::CREATED, item)
}

async fn update_item(
    State(state): State<Shared>,
    Path((entity, id)): Path<(String, i64)>,
    headers: HeaderMap,
    req: Request,
) -> Response {
    if let Some(fail) = record(&state, "PUT", format!("/api/{entity}/{id}"), &headers) {
        return fail;
    }
    mutation_delay(&state).await;

    let mut item = match read_body(&state, &headers, req).await {
        Ok(item) => item,
        Err(resp) => return resp,
    };
    item["id"] = json!(id);

    let mut s = state.lock().unwrap();
    let Some(slot) = s
        .records
        .get_mut(&entity)
        .and_then(|items| items.iter_mut().find(|i| i["id"] == json!(id)))
    else {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "Data not found" })))
            .into_response();
    };
    *slot = item.clone();
    drop(s);

    mutation_reply(&state, StatusCode::OK, item)
}

async fn delete_item(
    State(state): State<Shared>,
    Path((entity, id)): Path<(String, i64)>,
    headers: HeaderMap,
) -> Response {
    if let Some(fail) = record(&state, "DELETE", format!("/api/{entity}/{id}"), &headers) {
        return fail;
    }
    let mut s = state.lock().unwrap();
    if let Some(items) = s.records.get_mut(&entity) {
        items.retain(|i| i["id"] != json!(id));
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn confirm_upload(
    State(state): State<Shared>,
    Path((entity, id)): Path<(String, i64)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(fail) = record(&state, "PUT", format!("/api/{entity}/{id}/upload"), &headers) {
        return fail;
    }
    let mut s = state.lock().unwrap();
    let Some(item) = s
        .records
        .get_mut(&entity)
        .and_then(|items| items.iter_mut().find(|i| i["id"] == json!(id)))
    else {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "Data not found" })))
            .into_response();
    };
    item["link"] = body["link"].clone();
    item["status"] = json!("done");
    let item = item.clone();
    drop(s);

    mutation_reply(&state, StatusCode::OK, item)
}

/// Decode a JSON or multipart body into a JSON object.
async fn read_body(state: &Shared, headers: &HeaderMap, req: Request) -> Result<Value, Response> {
    let is_multipart = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    if !is_multipart {
        let Json(value) = Json::<Value>::from_request(req, &())
            .await
            .map_err(IntoResponse::into_response)?;
        return Ok(value);
    }

    let mut multipart = Multipart::from_request(req, &())
        .await
        .map_err(IntoResponse::into_response)?;
    let mut item = json!({});
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(IntoResponse::into_response)?
    {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(IntoResponse::into_response)?;
                item["script_file"] = json!(format!("uploads/{file_name}"));
                state.lock().unwrap().last_upload = Some(UploadedFile {
                    field: name,
                    file_name,
                    content_type,
                    size: bytes.len(),
                });
            }
            None => {
                let text = field.text().await.map_err(IntoResponse::into_response)?;
                item[name] = json!(text);
            }
        }
    }
    Ok(item)
}
