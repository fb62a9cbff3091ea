//! Handlers for the authenticated organizer's own account.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use vowly_core::error::CoreError;
use vowly_core::plans::{Feature, Limit, Plan};
use vowly_db::models::organizer::{Organizer, UpdateOrganizer};
use vowly_db::repositories::OrganizerRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Per-event caps of the organizer's plan. `None` means unlimited.
#[derive(Debug, Serialize)]
pub struct PlanLimits {
    pub guests: Option<i64>,
    pub custom_questions: Option<i64>,
    pub media_items: Option<i64>,
}

impl From<Plan> for PlanLimits {
    fn from(plan: Plan) -> Self {
        Self {
            guests: plan.limit(Limit::Guests),
            custom_questions: plan.limit(Limit::CustomQuestions),
            media_items: plan.limit(Limit::MediaItems),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub organizer: Organizer,
    pub plan: Plan,
    pub features: Vec<Feature>,
    pub limits: PlanLimits,
}

impl MeResponse {
    fn new(organizer: Organizer) -> AppResult<Self> {
        let plan = organizer.plan()?;
        Ok(Self {
            organizer,
            plan,
            features: plan.features(),
            limits: plan.into(),
        })
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/me
///
/// The organizer's profile with the features and limits of their plan.
/// The local row is created on first access.
pub async fn get(State(state): State<AppState>, user: AuthUser) -> AppResult<impl IntoResponse> {
    let organizer = load_organizer(&state, &user).await?;
    Ok(Json(DataResponse {
        data: MeResponse::new(organizer)?,
    }))
}

/// PUT /api/v1/me
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<UpdateOrganizer>,
) -> AppResult<impl IntoResponse> {
    load_organizer(&state, &user).await?;
    let organizer = OrganizerRepo::update(&state.pool, user.organizer_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Organizer",
            id: user.organizer_id,
        }))?;

    tracing::info!(organizer_id = %organizer.id, "Organizer profile updated");
    Ok(Json(DataResponse {
        data: MeResponse::new(organizer)?,
    }))
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Fetch the organizer row for the token's subject, creating it on first
/// sight and backfilling the email the auth provider shared.
pub(crate) async fn load_organizer(state: &AppState, user: &AuthUser) -> AppResult<Organizer> {
    let organizer = match OrganizerRepo::find_by_id(&state.pool, user.organizer_id).await? {
        Some(organizer) => organizer,
        None => {
            let organizer = OrganizerRepo::ensure(&state.pool, user.organizer_id).await?;
            tracing::info!(organizer_id = %organizer.id, "Organizer registered");
            organizer
        }
    };

    if organizer.email.is_none() && user.email.is_some() {
        let patch = UpdateOrganizer {
            email: user.email.clone(),
            display_name: None,
        };
        if let Some(updated) = OrganizerRepo::update(&state.pool, organizer.id, &patch).await? {
            return Ok(updated);
        }
    }
    Ok(organizer)
}

/// The plan of the authenticated organizer.
pub(crate) async fn organizer_plan(state: &AppState, user: &AuthUser) -> AppResult<Plan> {
    Ok(load_organizer(state, user).await?.plan()?)
}
