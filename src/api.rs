//! HTTP surface of the ledger.
//!
//! Handlers translate requests into [`Ledger`] calls and map errors to a
//! status code plus a fixed plain-text body. The single-account routes report
//! unknown accounts as 404; the transfer route reports them as 400, since the
//! offending identifier sits in the request body rather than the path.

use std::sync::Arc;

use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use rust_decimal::Decimal;

use crate::{AccountId, Ledger, LedgerError, TransferRequest};

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests)
pub fn build_app(ledger: Arc<Ledger>) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/account", account_router())
        .layer(Extension(ledger))
}

fn account_router() -> Router {
    Router::new()
        .route("/transfer", post(transfer))
        .route("/:id", get(get_balance).post(deposit))
        .route("/:id/withdraw", post(withdraw))
}

#[derive(Debug, serde::Serialize)]
struct BalanceResponse {
    balance: Decimal,
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn get_balance(
    Extension(ledger): Extension<Arc<Ledger>>,
    Path(id): Path<AccountId>,
) -> Response {
    match ledger.balance(&id) {
        Ok(balance) => (StatusCode::OK, Json(BalanceResponse { balance })).into_response(),
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn deposit(
    Extension(ledger): Extension<Arc<Ledger>>,
    Path(id): Path<AccountId>,
    Json(amount): Json<Decimal>,
) -> Response {
    match ledger.deposit(&id, amount) {
        Ok(()) => StatusCode::OK.into_response(),
        Err(LedgerError::AccountNotFound) => StatusCode::NOT_FOUND.into_response(),
        Err(err) => bad_request(&err),
    }
}

async fn withdraw(
    Extension(ledger): Extension<Arc<Ledger>>,
    Path(id): Path<AccountId>,
    Json(amount): Json<Decimal>,
) -> Response {
    match ledger.withdraw(&id, amount) {
        Ok(()) => StatusCode::OK.into_response(),
        Err(LedgerError::AccountNotFound) => StatusCode::NOT_FOUND.into_response(),
        Err(err) => bad_request(&err),
    }
}

async fn transfer(
    Extension(ledger): Extension<Arc<Ledger>>,
    Json(request): Json<TransferRequest>,
) -> Response {
    match ledger.transfer(&request) {
        Ok(()) => StatusCode::OK.into_response(),
        Err(err) => {
            tracing::debug!(
                debtor = %request.debtor_id(),
                creditor = %request.creditor_id(),
                %err,
                "transfer rejected"
            );
            bad_request(&err)
        }
    }
}

fn bad_request(err: &LedgerError) -> Response {
    (StatusCode::BAD_REQUEST, format!("error: {err}")).into_response()
}
