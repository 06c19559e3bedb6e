pub mod config;
pub mod controllers;
pub mod dom;
pub mod error;
pub mod models;
pub mod persistence;
pub mod room;
pub mod surface;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

// Общее состояние приложения, только для чтения
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub layout: models::Layout,
    pub room_options: room::RoomOptions,
}

impl AppState {
    pub fn new(config: crate::config::Config, layout: models::Layout) -> Arc<Self> {
        let room_options = config.room.room_options();
        Arc::new(Self {
            config,
            layout,
            room_options,
        })
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/health", get(|| async { "OK" }))
        .merge(controllers::routes());

    if let Some(dir) = &state.config.room.static_dir {
        router = router.nest_service("/static", ServeDir::new(dir));
    }

    router.with_state(state).layer(TraceLayer::new_for_http())
}
