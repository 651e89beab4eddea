use super::load_team;
use crate::auth::AuthUser;
use crate::{ApiError, ApiResult, AppData};
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use sportdesk_core::shared::parse_amount;
use sportdesk_core::{AssignedPenalty, Penalty, Team, User, format_amount, is_cashier, is_member};
use serde::{Deserialize, Serialize};

/// Ledger views are open to members and the cashier; every write is
/// cashier-only.
fn can_view_ledger(user: &User, team: &Team) -> bool {
    is_member(user, team) || is_cashier(user, team)
}

#[derive(Serialize)]
pub struct PenaltyResponse {
    pub id: u32,
    pub title: String,
    pub amount: String,
    pub description: String,
}

pub fn penalty_response(penalty: &Penalty) -> PenaltyResponse {
    PenaltyResponse {
        id: penalty.id,
        title: penalty.title.clone(),
        amount: format_amount(penalty.amount_cents),
        description: penalty.description.clone(),
    }
}

#[derive(Serialize)]
pub struct AssignedPenaltyResponse {
    pub id: u32,
    pub user_id: u32,
    pub penalty_id: u32,
    pub assigned_at: DateTime<Utc>,
    pub note: String,
    pub paid: bool,
}

fn assigned_response(assigned: &AssignedPenalty) -> AssignedPenaltyResponse {
    AssignedPenaltyResponse {
        id: assigned.id,
        user_id: assigned.user_id,
        penalty_id: assigned.penalty_id,
        assigned_at: assigned.assigned_at,
        note: assigned.note.clone(),
        paid: assigned.paid,
    }
}

#[derive(Serialize)]
pub struct LedgerResponse {
    pub penalties: Vec<PenaltyResponse>,
    pub assigned: Vec<AssignedPenaltyResponse>,
}

pub async fn ledger_action(
    State(state): State<AppData>,
    AuthUser(user): AuthUser,
    Path(team_slug): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let team = load_team(&state, &team_slug).await?;
    if !can_view_ledger(&user, &team) {
        return Err(ApiError::Forbidden("No access to this ledger".to_string()));
    }

    let penalties = state.storage.penalties_for_team(team.id).await?;
    let assigned = state.storage.assigned_penalties_for_team(team.id).await?;

    Ok(Json(LedgerResponse {
        penalties: penalties.iter().map(penalty_response).collect(),
        assigned: assigned.iter().map(assigned_response).collect(),
    }))
}

#[derive(Deserialize)]
pub struct PenaltyCreateRequest {
    pub title: String,
    /// Decimal amount, e.g. "2.50".
    pub amount: String,
    #[serde(default)]
    pub description: String,
}

pub async fn penalty_create_action(
    State(state): State<AppData>,
    AuthUser(user): AuthUser,
    Path(team_slug): Path<String>,
    Json(payload): Json<PenaltyCreateRequest>,
) -> ApiResult<impl IntoResponse> {
    let team = load_team(&state, &team_slug).await?;
    if !is_cashier(&user, &team) {
        return Err(ApiError::Forbidden(
            "Only the cashier may edit the fine catalog".to_string(),
        ));
    }

    let title = payload.title.trim();
    if title.is_empty() {
        return Err(ApiError::BadRequest("Title must not be empty".to_string()));
    }
    let amount_cents = parse_amount(&payload.amount)
        .filter(|cents| *cents >= 0)
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid amount '{}'", payload.amount)))?;

    let penalty = state
        .storage
        .create_penalty(team.id, title, amount_cents, payload.description.trim())
        .await?;

    Ok(Json(penalty_response(&penalty)))
}

#[derive(Deserialize)]
pub struct AssignRequest {
    pub penalty_id: u32,
    pub user_id: u32,
    #[serde(default)]
    pub note: String,
}

pub async fn penalty_assign_action(
    State(state): State<AppData>,
    AuthUser(user): AuthUser,
    Path(team_slug): Path<String>,
    Json(payload): Json<AssignRequest>,
) -> ApiResult<impl IntoResponse> {
    let team = load_team(&state, &team_slug).await?;
    if !is_cashier(&user, &team) {
        return Err(ApiError::Forbidden(
            "Only the cashier may assign fines".to_string(),
        ));
    }

    // the fine must come from this team's own catalog
    let penalty = state
        .storage
        .penalty_by_id(team.id, payload.penalty_id)
        .await?
        .ok_or_else(|| {
            ApiError::BadRequest(format!(
                "Penalty {} does not belong to this team",
                payload.penalty_id
            ))
        })?;

    let assigned = state
        .storage
        .assign_penalty(team.id, payload.user_id, penalty.id, &payload.note, user.id)
        .await?;

    Ok(Json(assigned_response(&assigned)))
}

pub async fn penalty_mark_paid_action(
    State(state): State<AppData>,
    AuthUser(user): AuthUser,
    Path((team_slug, assigned_id)): Path<(String, u32)>,
) -> ApiResult<impl IntoResponse> {
    let team = load_team(&state, &team_slug).await?;
    if !is_cashier(&user, &team) {
        return Err(ApiError::Forbidden(
            "Only the cashier may confirm payments".to_string(),
        ));
    }

    let assigned = state
        .storage
        .mark_assigned_penalty_paid(team.id, assigned_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Assignment {} not found", assigned_id)))?;

    Ok(Json(assigned_response(&assigned)))
}
