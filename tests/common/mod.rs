//! 테스트용 경매 서버
//! 세션 쿠키(`sessionid=valid`)가 없으면 프로필/변경 요청에 401 을 반환하고,
//! 변경 요청은 CSRF 헤더가 쿠키와 같아야 처리한다.
#![allow(dead_code)]

// region:    --- Imports
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

// endregion: --- Imports

pub const SESSION_COOKIE: &str = "sessionid=valid";
pub const CSRF_TOKEN: &str = "tok-123";

// region:    --- Backend State
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub content_type: Option<String>,
    pub csrf_token: Option<String>,
    pub accept: Option<String>,
}

pub struct BackendState {
    pub items: Vec<Value>,
    pub profile: Value,
    pub requests: Vec<RecordedRequest>,
    /// 목록 응답을 깨진 JSON 으로 반환
    pub malformed_items: bool,
    next_id: i64,
}

pub type SharedBackend = Arc<Mutex<BackendState>>;

impl BackendState {
    fn seeded() -> Self {
        Self {
            items: vec![
                item(7, "Vintage lamp", "Brass desk lamp", "12.50", false),
                item(3, "Oak desk", "Solid oak writing desk", "80.00", false),
                ended_item(),
            ],
            profile: json!({
                "id": 3,
                "username": "mina",
                "email": "mina@example.com",
                "first_name": "Mina",
                "last_name": "Park",
                "date_of_birth": "1994-05-02",
                "profile_image_url": null
            }),
            requests: Vec::new(),
            malformed_items: false,
            next_id: 100,
        }
    }

    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn item_mut(&mut self, item_id: i64) -> Option<&mut Value> {
        self.items.iter_mut().find(|item| item["id"] == json!(item_id))
    }

    pub fn last_request(&self) -> Option<&RecordedRequest> {
        self.requests.last()
    }
}

fn item(id: i64, title: &str, description: &str, starting_price: &str, has_ended: bool) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": description,
        "starting_price": starting_price,
        "end_time": "2030-01-01T12:00:00+00:00",
        "has_ended": has_ended,
        "bids": [],
        "questions": [],
        "winning_bid": null
    })
}

fn ended_item() -> Value {
    let mut value = item(9, "Record player", "Needs a new belt", "40.00", true);
    value["end_time"] = json!("2025-01-01T12:00:00+00:00");
    value["bids"] = json!([
        {"id": 51, "bidder_id": 4, "amount": "45.00", "created_at": "2024-12-30T10:00:00+00:00"}
    ]);
    value["winning_bid"] = json!({"id": 51, "bidder_id": 4, "amount": "45.00"});
    value
}

fn summary(item: &Value) -> Value {
    json!({
        "id": item["id"],
        "title": item["title"],
        "description": item["description"],
        "starting_price": item["starting_price"],
        "end_time": item["end_time"],
        "has_ended": item["has_ended"],
    })
}

fn decimal(value: &Value) -> Option<f64> {
    value
        .as_str()
        .and_then(|raw| raw.parse().ok())
        .or_else(|| value.as_f64())
}

// endregion: --- Backend State

// region:    --- Auth Helpers
fn cookies(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}

fn record(state: &mut BackendState, method: Method, path: &str, headers: &HeaderMap) {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };
    state.requests.push(RecordedRequest {
        method,
        path: path.to_string(),
        content_type: header_value("content-type"),
        csrf_token: header_value("x-csrftoken"),
        accept: header_value("accept"),
    });
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// 세션 확인, 변경 요청이면 CSRF 토큰도 확인
fn authorize(headers: &HeaderMap, mutating: bool) -> Result<(), Response> {
    let cookies = cookies(headers);
    if cookies.get("sessionid").map(String::as_str) != Some("valid") {
        return Err(StatusCode::UNAUTHORIZED.into_response());
    }
    if mutating {
        let header_token = headers.get("x-csrftoken").and_then(|v| v.to_str().ok());
        let cookie_token = cookies.get("csrftoken").map(String::as_str);
        if header_token.is_none() || header_token != cookie_token {
            return Err(error(StatusCode::FORBIDDEN, "CSRF verification failed."));
        }
    }
    Ok(())
}

// endregion: --- Auth Helpers

// region:    --- Handlers
async fn list_items(
    State(state): State<SharedBackend>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.lock().unwrap();
    record(&mut state, Method::GET, "/auctions/items/", &headers);
    if state.malformed_items {
        return (
            [(header::CONTENT_TYPE, "application/json")],
            r#"{"items": [{"id": 7,"#,
        )
            .into_response();
    }
    let query = params
        .get("q")
        .map(|q| q.trim().to_lowercase())
        .unwrap_or_default();
    let items: Vec<Value> = state
        .items
        .iter()
        .filter(|item| {
            query.is_empty()
                || item["title"].as_str().unwrap_or("").to_lowercase().contains(&query)
                || item["description"].as_str().unwrap_or("").to_lowercase().contains(&query)
        })
        .map(summary)
        .collect();
    (
        [(header::SET_COOKIE, format!("csrftoken={}; Path=/", CSRF_TOKEN))],
        Json(json!({ "items": items })),
    )
        .into_response()
}

async fn item_detail(
    State(state): State<SharedBackend>,
    Path(item_id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.lock().unwrap();
    record(&mut state, Method::GET, &format!("/auctions/items/{}/", item_id), &headers);
    match state.item_mut(item_id) {
        Some(item) => {
            let mut item = item.clone();
            if let Some(bids) = item["bids"].as_array_mut() {
                bids.sort_by(|a, b| {
                    let a = decimal(&a["amount"]).unwrap_or(0.0);
                    let b = decimal(&b["amount"]).unwrap_or(0.0);
                    b.total_cmp(&a)
                });
            }
            Json(item).into_response()
        }
        None => error(StatusCode::NOT_FOUND, "Not found."),
    }
}

async fn create_item(
    State(state): State<SharedBackend>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    record(&mut state, Method::POST, "/auctions/items/create/", &headers);
    if let Err(response) = authorize(&headers, true) {
        return response;
    }
    let (Some(title), Some(price), Some(end_time)) = (
        payload["title"].as_str(),
        decimal(&payload["starting_price"]),
        payload["end_time"].as_str(),
    ) else {
        return error(
            StatusCode::BAD_REQUEST,
            "owner_id, title, starting_price, and end_time are required.",
        );
    };
    let id = state.next_id();
    let mut created = item(
        id,
        title,
        payload["description"].as_str().unwrap_or(""),
        &format!("{:.2}", price),
        false,
    );
    created["end_time"] = json!(end_time);
    state.items.push(created);
    (StatusCode::CREATED, Json(json!({"id": id, "message": "Item created."}))).into_response()
}

async fn place_bid(
    State(state): State<SharedBackend>,
    Path(item_id): Path<i64>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    record(&mut state, Method::POST, &format!("/auctions/items/{}/bids/", item_id), &headers);
    if let Err(response) = authorize(&headers, true) {
        return response;
    }
    let (Some(bidder_id), Some(amount)) = (payload["bidder_id"].as_i64(), decimal(&payload["amount"]))
    else {
        return error(StatusCode::BAD_REQUEST, "bidder_id and amount are required.");
    };
    let id = state.next_id();
    let Some(item) = state.item_mut(item_id) else {
        return error(StatusCode::NOT_FOUND, "Not found.");
    };
    if item["has_ended"] == json!(true) {
        return error(StatusCode::BAD_REQUEST, "Auction has ended.");
    }
    let starting = decimal(&item["starting_price"]).unwrap_or(0.0);
    let highest = item["bids"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|bid| decimal(&bid["amount"]))
        .fold(starting, f64::max);
    if amount <= highest {
        return error(
            StatusCode::BAD_REQUEST,
            "Bid must be higher than the current highest amount.",
        );
    }
    if let Some(bids) = item["bids"].as_array_mut() {
        bids.push(json!({
            "id": id,
            "bidder_id": bidder_id,
            "amount": format!("{:.2}", amount),
            "created_at": "2026-10-19T12:00:00+00:00"
        }));
    }
    (StatusCode::CREATED, Json(json!({"id": id, "message": "Bid placed."}))).into_response()
}

async fn post_question(
    State(state): State<SharedBackend>,
    Path(item_id): Path<i64>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    record(
        &mut state,
        Method::POST,
        &format!("/auctions/items/{}/questions/", item_id),
        &headers,
    );
    if let Err(response) = authorize(&headers, true) {
        return response;
    }
    let (Some(asker_id), Some(text)) = (payload["asker_id"].as_i64(), payload["text"].as_str()) else {
        return error(StatusCode::BAD_REQUEST, "asker_id and text are required.");
    };
    let id = state.next_id();
    let Some(item) = state.item_mut(item_id) else {
        return error(StatusCode::NOT_FOUND, "Not found.");
    };
    if let Some(questions) = item["questions"].as_array_mut() {
        questions.push(json!({
            "id": id,
            "asker_id": asker_id,
            "text": text,
            "created_at": "2026-10-19T12:00:00+00:00",
            "answer": null
        }));
    }
    (StatusCode::CREATED, Json(json!({"id": id, "message": "Question posted."}))).into_response()
}

async fn post_answer(
    State(state): State<SharedBackend>,
    Path(question_id): Path<i64>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    record(
        &mut state,
        Method::POST,
        &format!("/auctions/questions/{}/answers/", question_id),
        &headers,
    );
    if let Err(response) = authorize(&headers, true) {
        return response;
    }
    let (Some(responder_id), Some(text)) =
        (payload["responder_id"].as_i64(), payload["text"].as_str())
    else {
        return error(StatusCode::BAD_REQUEST, "responder_id and text are required.");
    };
    let id = state.next_id();
    let question = state
        .items
        .iter_mut()
        .filter_map(|item| item["questions"].as_array_mut())
        .flatten()
        .find(|question| question["id"] == json!(question_id));
    let Some(question) = question else {
        return error(StatusCode::NOT_FOUND, "Not found.");
    };
    if !question["answer"].is_null() {
        return error(StatusCode::BAD_REQUEST, "Question already has an answer.");
    }
    question["answer"] = json!({
        "id": id,
        "responder_id": responder_id,
        "text": text,
        "created_at": "2026-10-19T13:00:00+00:00"
    });
    (StatusCode::CREATED, Json(json!({"id": id, "message": "Answer posted."}))).into_response()
}

async fn profile_detail(State(state): State<SharedBackend>, headers: HeaderMap) -> Response {
    let mut state = state.lock().unwrap();
    record(&mut state, Method::GET, "/accounts/profile/", &headers);
    if let Err(response) = authorize(&headers, false) {
        return response;
    }
    Json(state.profile.clone()).into_response()
}

async fn profile_update(
    State(state): State<SharedBackend>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let mut fields = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let Ok(bytes) = field.bytes().await else {
            return error(StatusCode::BAD_REQUEST, "Invalid multipart payload.");
        };
        fields.push((name, file_name, bytes));
    }

    let mut state = state.lock().unwrap();
    record(&mut state, Method::PATCH, "/accounts/profile/update/", &headers);
    if let Err(response) = authorize(&headers, true) {
        return response;
    }
    for (name, file_name, bytes) in fields {
        match (name.as_str(), file_name) {
            ("profile_image", Some(file_name)) => {
                state.profile["profile_image_url"] =
                    json!(format!("/media/profile_images/{}", file_name));
            }
            ("first_name" | "last_name" | "email" | "date_of_birth", _) => {
                state.profile[name.as_str()] = json!(String::from_utf8_lossy(&bytes));
            }
            _ => {}
        }
    }
    Json(state.profile.clone()).into_response()
}

async fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn broken() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

// endregion: --- Handlers

// region:    --- Spawn
/// 임의 포트로 서버 실행, (기본 URL, 공유 상태) 반환
pub async fn spawn_backend() -> (String, SharedBackend) {
    let state: SharedBackend = Arc::new(Mutex::new(BackendState::seeded()));
    let routes = Router::new()
        .route("/auctions/items/", get(list_items))
        .route("/auctions/items/create/", post(create_item))
        .route("/auctions/items/:id/", get(item_detail))
        .route("/auctions/items/:id/bids/", post(place_bid))
        .route("/auctions/items/:id/questions/", post(post_question))
        .route("/auctions/questions/:id/answers/", post(post_answer))
        .route("/accounts/profile/", get(profile_detail))
        .route("/accounts/profile/update/", patch(profile_update))
        .route("/empty/", get(no_content))
        .route("/broken/", get(broken))
        .with_state(Arc::clone(&state));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, routes).await.unwrap();
    });

    (format!("http://{}/", addr), state)
}
// endregion: --- Spawn
