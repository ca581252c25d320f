use crate::models::NewClaim;
use crate::validation;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};

pub async fn list_giveaways(State(state): State<AppState>) -> Response {
    let storage = state.storage.lock().await;
    (StatusCode::OK, Json(storage.all_giveaways())).into_response()
}

pub async fn get_giveaway(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id: i64 = match id.parse() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "Invalid giveaway ID" })),
            )
                .into_response()
        }
    };

    let storage = state.storage.lock().await;
    match storage.giveaway(id) {
        Some(giveaway) => (StatusCode::OK, Json(giveaway)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Giveaway not found" })),
        )
            .into_response(),
    }
}

pub async fn create_giveaway(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    let input = match validation::new_giveaway(&body) {
        Ok(input) => input,
        Err(errors) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "message": "Invalid giveaway data",
                    "errors": errors,
                })),
            )
                .into_response()
        }
    };

    let mut storage = state.storage.lock().await;
    let giveaway = storage.create_giveaway(input);
    tracing::info!(id = giveaway.id, host = %giveaway.host_username, "giveaway created");
    (StatusCode::CREATED, Json(giveaway)).into_response()
}

pub async fn claims_by_host(
    State(state): State<AppState>,
    Path(host_username): Path<String>,
) -> Response {
    let storage = state.storage.lock().await;
    (StatusCode::OK, Json(storage.claims_by_host(&host_username))).into_response()
}

/// Claims a giveaway for the caller. The only business rule lives here:
/// claims against an ended giveaway are rejected before any record is
/// written. There is deliberately no already-claimed guard (see DESIGN.md);
/// a repeat claim succeeds and the latest claimer wins.
pub async fn claim_giveaway(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    let giveaway_id = match body.get("giveawayId").and_then(Value::as_i64) {
        Some(id) => id,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "Invalid giveaway ID" })),
            )
                .into_response()
        }
    };

    let claimer_name = match body.get("claimerName").and_then(Value::as_str) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "Claimer name is required" })),
            )
                .into_response()
        }
    };

    // Lock held across the check and the write so the lookup and the claim
    // are one atomic step.
    let mut storage = state.storage.lock().await;

    let giveaway = match storage.giveaway(giveaway_id) {
        Some(giveaway) => giveaway,
        None => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": "Giveaway not found" })),
            )
                .into_response()
        }
    };

    if Utc::now() > giveaway.end_date {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Giveaway has ended" })),
        )
            .into_response();
    }

    state
        .notifier
        .notify(&giveaway.host_username, &claimer_name, &giveaway.title);

    storage.create_claim(NewClaim {
        giveaway_id,
        claimer_name,
        claimer_contact: None,
    });

    (
        StatusCode::OK,
        Json(json!({
            "message": "Claim submitted successfully! Host has been notified.",
            "hostNotified": true,
        })),
    )
        .into_response()
}
