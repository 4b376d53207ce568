//! `/api/business` handlers

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bizkit_domain::{BizkitError, BusinessProfile, ProfileFields};
use serde::Serialize;

use super::logged;
use crate::auth::Owner;
use crate::context::AppContext;
use crate::errors::ApiError;

/// Success envelope for business routes
#[derive(Debug, Serialize)]
pub struct BusinessEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business: Option<BusinessProfile>,
}

impl BusinessEnvelope {
    fn new(message: Option<&'static str>, business: Option<BusinessProfile>) -> Json<Self> {
        Json(Self { success: true, message, business })
    }
}

/// `POST`/`PUT /api/business`: create the owner's profile or replace it.
pub async fn save_business(
    State(ctx): State<Arc<AppContext>>,
    Owner(identity): Owner,
    payload: Result<Json<ProfileFields>, JsonRejection>,
) -> Result<(StatusCode, Json<BusinessEnvelope>), ApiError> {
    logged("business::save", async move {
        let Json(fields) = payload.map_err(|rejection| {
            BizkitError::Validation(format!("Invalid request body: {}", rejection.body_text()))
        })?;

        let write = ctx.profiles.create_or_update(&identity.owner_id, fields).await?;
        let (status, message) = if write.created {
            (StatusCode::CREATED, "Business profile created successfully")
        } else {
            (StatusCode::OK, "Business profile updated successfully")
        };
        Ok((status, BusinessEnvelope::new(Some(message), Some(write.profile))))
    })
    .await
}

/// `GET /api/business`
pub async fn get_business(
    State(ctx): State<Arc<AppContext>>,
    Owner(identity): Owner,
) -> Result<Json<BusinessEnvelope>, ApiError> {
    logged("business::get", async move {
        let profile = ctx.profiles.get(&identity.owner_id).await?.ok_or(ApiError::NoBusiness)?;
        Ok(BusinessEnvelope::new(None, Some(profile)))
    })
    .await
}

/// `DELETE /api/business`
pub async fn delete_business(
    State(ctx): State<Arc<AppContext>>,
    Owner(identity): Owner,
) -> Result<Json<BusinessEnvelope>, ApiError> {
    logged("business::delete", async move {
        if !ctx.profiles.delete(&identity.owner_id).await? {
            return Err(ApiError::NoBusiness);
        }
        Ok(BusinessEnvelope::new(Some("Business deleted successfully"), None))
    })
    .await
}
