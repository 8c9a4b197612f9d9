//! Handlers for `/gate`: the security desk's queue and token resolution.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use site_core::guest_pass::{evaluate_check_in, normalize_token, GateOutcome};
use site_core::status::GuestStatus;
use site_core::types::DbId;
use site_db::models::guest::Guest;
use site_db::repositories::GuestRepo;
use site_events::{tables, SiteEvent};

use crate::error::AppResult;
use crate::middleware::rbac::RequireGateOperator;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ResolveTokenRequest {
    pub token: String,
}

/// What the operator sees after a scan. Always returned with 200 so the
/// client can branch on `outcome`.
#[derive(Debug, Serialize)]
pub struct GateResolution {
    pub outcome: GateOutcome,
    /// The matching pass, if any.
    pub guest: Option<Guest>,
}

/// GET /api/v1/gate/queue
///
/// Guests expected or currently on site, earliest visit first.
pub async fn queue(
    State(state): State<AppState>,
    RequireGateOperator(_operator): RequireGateOperator,
) -> AppResult<Json<DataResponse<Vec<Guest>>>> {
    let guests =
        GuestRepo::list_by_statuses(&state.pool, &[GuestStatus::Expected, GuestStatus::Arrived])
            .await?;
    Ok(Json(DataResponse { data: guests }))
}

/// POST /api/v1/gate/resolve
///
/// Looks up a scanned or typed token and checks the guest in when the pass
/// is still expected. Unknown, used and departed passes are reported as
/// outcomes and never mutated.
pub async fn resolve(
    State(state): State<AppState>,
    RequireGateOperator(operator): RequireGateOperator,
    Json(input): Json<ResolveTokenRequest>,
) -> AppResult<Json<DataResponse<GateResolution>>> {
    let token = normalize_token(&input.token)?;
    let found = GuestRepo::find_by_token(&state.pool, token).await?;

    let resolution = match found {
        None => GateResolution {
            outcome: GateOutcome::Denied,
            guest: None,
        },
        Some(guest) => match evaluate_check_in(Some(guest.status)) {
            Err(rejection) => GateResolution {
                outcome: rejection.into(),
                guest: Some(guest),
            },
            Ok(()) => check_in(&state, guest, operator.user_id).await?,
        },
    };

    tracing::info!(
        outcome = ?resolution.outcome,
        guest_id = resolution.guest.as_ref().map(|g| g.id),
        operator_id = operator.user_id,
        "Gate token resolved"
    );
    Ok(Json(DataResponse { data: resolution }))
}

/// Move an expected guest to arrived. Losing the race to a concurrent scan
/// reports the pass as already used.
async fn check_in(state: &AppState, guest: Guest, operator_id: DbId) -> AppResult<GateResolution> {
    let arrived = GuestRepo::advance_status(
        &state.pool,
        guest.id,
        GuestStatus::Expected,
        GuestStatus::Arrived,
    )
    .await?;

    match arrived {
        Some(arrived) => {
            state.publish(
                SiteEvent::updated(tables::GUESTS, arrived.id, &arrived).with_actor(operator_id),
            );
            Ok(GateResolution {
                outcome: GateOutcome::Granted,
                guest: Some(arrived),
            })
        }
        None => Ok(GateResolution {
            outcome: GateOutcome::AlreadyUsed,
            guest: GuestRepo::find_by_id(&state.pool, guest.id).await?,
        }),
    }
}
