use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::dom::{Document, TextDisplay};
use crate::models::SeatId;
use crate::persistence::RequestCookies;
use crate::room::Room;
use crate::AppState;

pub const SEAT_ACTION_BASE: &str = "/seats";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(seat_page))
        .route("/seats/{id}/toggle", post(toggle_seat_form))
        .route("/api/room", get(room_state))
        .route("/api/seats/{id}/toggle", post(toggle_seat_api))
}

/* ---------- helpers ---------- */

type PageRoom = Room<Document, TextDisplay, RequestCookies>;

// Комната собирается заново на каждый запрос из cookie браузера,
// на сервере выбор не хранится
fn open_room(state: &AppState, headers: &HeaderMap) -> PageRoom {
    Room::new(
        &state.layout,
        Document::new().with_seat_action(SEAT_ACTION_BASE),
        TextDisplay::default(),
        RequestCookies::from_headers(headers),
        state.room_options.clone(),
    )
}

fn render_page(room: &PageRoom) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Seats</title>\n</head>\n<body>\n\
         <p>Selected: {counter}</p>\n<form method=\"post\">{grid}</form>\n</body>\n</html>\n",
        counter = room.display().render_html(),
        grid = room.surface().render_html(),
    )
}

fn seat_not_found(id: SeatId) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "error": format!("Seat {} not found", id)
        })),
    )
}

/* ---------- PAGE ---------- */

// GET /
async fn seat_page(State(state): State<Arc<AppState>>, headers: HeaderMap) -> impl IntoResponse {
    let room = open_room(&state, &headers);
    let page = render_page(&room);
    (room.cookies().set_cookie_headers(), Html(page))
}

// POST /seats/{id}/toggle
async fn toggle_seat_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SeatId>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let mut room = open_room(&state, &headers);
    if room.handle_click(Some(id)) {
        tracing::info!("Seat {} toggled, selection now {}", id, room.counter_text());
    }
    (room.cookies().set_cookie_headers(), Redirect::to("/"))
}

/* ---------- API ---------- */

// GET /api/room
async fn room_state(State(state): State<Arc<AppState>>, headers: HeaderMap) -> impl IntoResponse {
    let room = open_room(&state, &headers);
    (room.cookies().set_cookie_headers(), Json(room.view()))
}

// POST /api/seats/{id}/toggle
async fn toggle_seat_api(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SeatId>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    let mut room = open_room(&state, &headers);
    if room.seat(id).is_none() {
        return Err(seat_not_found(id));
    }

    room.handle_click(Some(id));
    tracing::info!("Seat {} toggled, selection now {}", id, room.counter_text());

    Ok((room.cookies().set_cookie_headers(), Json(room.view())))
}
