use axum::{
    Json, Router, middleware,
    routing::{delete, get, post, put},
};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::require_auth;
use crate::state::AppState;
use crate::{auth, dashboard, entries, leaderboard, rewards};

pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/estimate", post(entries::estimate));

    let protected_routes = Router::new()
        .route(
            "/entries",
            get(entries::list_entries)
                .post(entries::create_entry)
                .delete(entries::clear_entries),
        )
        .route("/entries/{entry_id}", delete(entries::delete_entry))
        .route("/dashboard", get(dashboard::get_dashboard))
        .route("/profile", get(dashboard::get_profile))
        .route("/leaderboard", get(leaderboard::get_leaderboard))
        .route("/rewards", get(rewards::get_rewards))
        .route("/rewards/goals/{month}", put(rewards::set_goal))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
