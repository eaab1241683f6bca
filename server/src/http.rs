//! HTTP routes for the currency API.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use ratehub_common::{Currency, CurrencyCode};
use ratehub_store::StoreError;
use serde::Deserialize;
use tracing::{info, warn};

use crate::service::ExchangeService;

/// Body of `POST /currencies`.
#[derive(Debug, Deserialize)]
pub struct AddCurrencyRequest {
    /// Currency code to start tracking.
    pub code: String,
    /// Display name.
    pub name: String,
}

/// Build the API router.
pub fn router(service: Arc<ExchangeService>) -> Router {
    Router::new()
        .route("/currencies", get(list_currencies).post(add_currency))
        .route("/currencies/:code", get(get_exchange_rate))
        .with_state(service)
}

async fn list_currencies(State(service): State<Arc<ExchangeService>>) -> Response {
    match service.list_currencies().await {
        Ok(currencies) => Json(currencies).into_response(),
        Err(e) => {
            warn!(error = %e, "Failed to list currencies");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn add_currency(
    State(service): State<Arc<ExchangeService>>,
    Json(request): Json<AddCurrencyRequest>,
) -> Response {
    let code = match CurrencyCode::new(&request.code) {
        Ok(code) => code,
        Err(e) => {
            warn!(error = %e, "Rejected currency code");
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    match service.add_currency(Currency::new(code, request.name)).await {
        Ok(currency) => Json(currency).into_response(),
        Err(e @ StoreError::DuplicateCurrency(_)) => {
            (StatusCode::CONFLICT, e.to_string()).into_response()
        }
        Err(e) => {
            warn!(error = %e, "Failed to store currency");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn get_exchange_rate(
    State(service): State<Arc<ExchangeService>>,
    Path(code): Path<String>,
) -> Response {
    let Ok(code) = CurrencyCode::new(&code) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match service.get_exchange_rate(&code) {
        Some(rate) => {
            info!(code = %code, rate = %rate, "Returning exchange rate");
            Json(rate).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
