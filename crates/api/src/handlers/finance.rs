//! Handlers for the resident ledger (`/finance`).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use site_core::error::CoreError;
use site_core::finance::{summarize, BalanceSummary};
use site_core::status::TransactionKind;
use site_core::types::DbId;
use site_core::validation::parse_iso_date;
use site_db::models::transaction::{CreateTransaction, Transaction};
use site_db::repositories::{ProfileRepo, TransactionRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Ledger {
    pub summary: BalanceSummary,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTransactionBody {
    pub user_id: DbId,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub due_date: String,
}

/// GET /api/v1/finance/mine
pub async fn my_ledger(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Ledger>>> {
    let transactions = TransactionRepo::list_for_user(&state.pool, auth.user_id).await?;
    let summary = summarize(transactions.iter().map(|t| (t.status, t.amount)));
    Ok(Json(DataResponse {
        data: Ledger {
            summary,
            transactions,
        },
    }))
}

/// POST /api/v1/admin/transactions
pub async fn create_transaction(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateTransactionBody>,
) -> AppResult<(StatusCode, Json<DataResponse<Transaction>>)> {
    if !input.amount.is_finite() || input.amount <= 0.0 {
        return Err(AppError::Core(CoreError::Validation(
            "amount must be a positive number".into(),
        )));
    }
    let due_date = parse_iso_date("due_date", &input.due_date)?;
    if ProfileRepo::find_by_id(&state.pool, input.user_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "profile",
            id: input.user_id,
        }));
    }

    let transaction = TransactionRepo::create(
        &state.pool,
        &CreateTransaction {
            user_id: input.user_id,
            amount: input.amount,
            kind: input.kind,
            due_date,
        },
    )
    .await?;

    tracing::info!(
        transaction_id = transaction.id,
        user_id = input.user_id,
        admin_id = admin.user_id,
        kind = %transaction.kind,
        "Charge posted"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: transaction })))
}
