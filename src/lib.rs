//! Givebox - a small peer-to-peer giveaway marketplace backend.
//!
//! Hosts list items, anyone can browse them, and a claimer takes an item by
//! posting a claim. State lives in an in-memory store; the HTTP layer is a
//! thin JSON API over it.

pub mod handlers;
pub mod models;
pub mod notify;
pub mod store;
pub mod validation;

use axum::{
    routing::{get, post},
    Router,
};
use notify::Notifier;
use std::sync::Arc;
use store::SharedStorage;

/// Everything the handlers need, injected once at startup. Fresh instances
/// per test keep tests independent.
#[derive(Clone)]
pub struct AppState {
    pub storage: SharedStorage,
    pub notifier: Arc<dyn Notifier>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/giveaways",
            get(handlers::list_giveaways).post(handlers::create_giveaway),
        )
        .route("/api/giveaways/claim", post(handlers::claim_giveaway))
        .route("/api/giveaways/:id", get(handlers::get_giveaway))
        .route("/api/claims/:host_username", get(handlers::claims_by_host))
        .with_state(state)
}
